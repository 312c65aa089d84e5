// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Visitlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Visitlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Standalone SVG output for a [`Scene`].

use serde::{Deserialize, Serialize};

use crate::geometry::{CurveKind, GridLineKind, Scene};

const BACKGROUND: &str = "#ffffff";
const GRID_STROKE: &str = "#e5e7eb";
const MUTED_TEXT: &str = "#6b7280";
const FONT_FAMILY: &str = "system-ui, sans-serif";

const EMPTY_MIN_WIDTH: f64 = 320.0;
const EMPTY_MIN_HEIGHT: f64 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SvgOptions {
    pub show_grid: bool,
    pub show_track_labels: bool,
    /// Emit `<title>` tooltips on nodes.
    pub show_node_titles: bool,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self { show_grid: true, show_track_labels: true, show_node_titles: true }
    }
}

/// Serializes `scene` to an SVG document.
///
/// Nodes carry `data-visit-id`, `data-row` and `data-track` so an embedding page can wire up
/// hover and click handlers without re-running layout.
pub fn render_scene_svg(scene: &Scene, options: &SvgOptions) -> String {
    if let Some(message) = scene.empty_state {
        return render_empty_state(scene, message);
    }

    let mut svg = String::new();
    open_svg(&mut svg, scene.width, scene.height);

    if options.show_grid && !scene.grid_lines.is_empty() {
        svg.push_str(&format!("<g class=\"grid\" stroke=\"{GRID_STROKE}\" stroke-width=\"1\">"));
        for line in &scene.grid_lines {
            let dash = match line.kind {
                GridLineKind::Track => "",
                GridLineKind::Row => " stroke-dasharray=\"2 4\"",
            };
            svg.push_str(&format!(
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"{dash}/>",
                line.from.x, line.from.y, line.to.x, line.to.y
            ));
        }
        svg.push_str("</g>");
    }

    if options.show_track_labels && !scene.track_labels.is_empty() {
        svg.push_str(&format!(
            "<g class=\"track-labels\" font-family=\"{FONT_FAMILY}\" font-size=\"12\" \
             text-anchor=\"middle\">"
        ));
        for label in &scene.track_labels {
            svg.push_str(&format!(
                "<text x=\"{}\" y=\"{}\" fill=\"{}\" data-track=\"{}\">{}</text>",
                label.anchor.x,
                label.anchor.y,
                escape_xml(&label.color),
                label.track,
                escape_xml(&label.text)
            ));
        }
        svg.push_str("</g>");
    }

    svg.push_str("<g class=\"connections\" fill=\"none\" stroke-width=\"2\">");
    for curve in &scene.curves {
        let (class, dash) = match curve.kind {
            CurveKind::SameDoctor => ("same-doctor", ""),
            CurveKind::Branch => ("branch", " stroke-dasharray=\"6 4\""),
        };
        svg.push_str(&format!(
            "<path class=\"{class}\" d=\"{}\" stroke=\"{}\"{dash} data-from-row=\"{}\" \
             data-to-row=\"{}\"/>",
            curve.curve.svg_path_data(),
            escape_xml(&curve.color),
            curve.from_row,
            curve.to_row
        ));
    }
    svg.push_str("</g>");

    svg.push_str("<g class=\"nodes\">");
    for node in &scene.nodes {
        svg.push_str(&format!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\" stroke=\"{BACKGROUND}\" \
             stroke-width=\"2\" data-visit-id=\"{}\" data-row=\"{}\" data-track=\"{}\"",
            node.center.x,
            node.center.y,
            node.radius,
            escape_xml(&node.color),
            escape_xml(node.visit_id().as_str()),
            node.row,
            node.track
        ));
        if options.show_node_titles {
            svg.push_str(&format!("><title>{}</title></circle>", escape_xml(&node.hover.tooltip())));
        } else {
            svg.push_str("/>");
        }
    }
    svg.push_str("</g>");

    svg.push_str("</svg>");
    svg
}

fn render_empty_state(scene: &Scene, message: &str) -> String {
    let width = scene.width.max(EMPTY_MIN_WIDTH);
    let height = scene.height.max(EMPTY_MIN_HEIGHT);

    let mut svg = String::new();
    open_svg(&mut svg, width, height);
    svg.push_str(&format!(
        "<text class=\"empty-state\" x=\"{}\" y=\"{}\" text-anchor=\"middle\" \
         dominant-baseline=\"middle\" font-family=\"{FONT_FAMILY}\" font-size=\"14\" \
         fill=\"{MUTED_TEXT}\">{}</text>",
        width / 2.0,
        height / 2.0,
        escape_xml(message)
    ));
    svg.push_str("</svg>");
    svg
}

fn open_svg(svg: &mut String, width: f64, height: f64) {
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" \
         viewBox=\"0 0 {width} {height}\" role=\"img\" aria-label=\"Visit history\">"
    ));
    svg.push_str(&format!("<rect width=\"100%\" height=\"100%\" fill=\"{BACKGROUND}\"/>"));
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
