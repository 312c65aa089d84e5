// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Visitlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Visitlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Pixel geometry for a [`VisitLayout`].
//!
//! Maps track/row indices to a 2D coordinate system (x grows right, y grows down) and emits a
//! drawable [`Scene`]: nodes, quadratic connection curves, grid lines and track labels. Node
//! metadata drives hover tooltips and click payloads.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::layout::VisitLayout;
use crate::model::{VisitId, VisitRecord};

/// Text shown instead of a graph when there are no visits.
pub const EMPTY_STATE_TEXT: &str = "No visit history available";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeometryConfig {
    pub padding: f64,
    pub track_width: f64,
    pub row_height: f64,
    pub curve_height: f64,
    pub branch_curve_height: f64,
    pub node_radius: f64,
    /// Extra pointer tolerance around a node for hit testing.
    pub hit_slop: f64,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            padding: 40.0,
            track_width: 100.0,
            row_height: 60.0,
            curve_height: 20.0,
            branch_curve_height: 20.0,
            node_radius: 6.0,
            hit_slop: 4.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuadCurve {
    pub from: Point,
    pub control: Point,
    pub to: Point,
}

impl QuadCurve {
    pub fn point_at(&self, t: f64) -> Point {
        let u = 1.0 - t;
        Point::new(
            u * u * self.from.x + 2.0 * u * t * self.control.x + t * t * self.to.x,
            u * u * self.from.y + 2.0 * u * t * self.control.y + t * t * self.to.y,
        )
    }

    /// SVG path data: `M x0 y0 Q cx cy x1 y1`.
    pub fn svg_path_data(&self) -> String {
        format!(
            "M {} {} Q {} {} {} {}",
            self.from.x, self.from.y, self.control.x, self.control.y, self.to.x, self.to.y
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CurveKind {
    SameDoctor,
    Branch,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneCurve {
    pub kind: CurveKind,
    pub curve: QuadCurve,
    pub color: SmolStr,
    pub from_track: usize,
    pub from_row: usize,
    pub to_track: usize,
    pub to_row: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GridLineKind {
    /// Vertical lane through a track's node centers.
    Track,
    /// Horizontal line through a row's node centers.
    Row,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridLine {
    pub kind: GridLineKind,
    pub index: usize,
    pub from: Point,
    pub to: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackLabel {
    pub track: usize,
    pub text: String,
    pub anchor: Point,
    pub color: SmolStr,
}

/// Tooltip content for a hovered node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoverInfo {
    pub visit_id: VisitId,
    pub doctor_name: String,
    pub appointment_date: String,
}

impl HoverInfo {
    pub fn tooltip(&self) -> String {
        format!("{}\n{}\n{}", self.visit_id, self.doctor_name, self.appointment_date)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneNode {
    pub row: usize,
    pub track: usize,
    pub center: Point,
    pub radius: f64,
    pub color: SmolStr,
    pub hover: HoverInfo,
}

impl SceneNode {
    pub fn visit_id(&self) -> &VisitId {
        &self.hover.visit_id
    }

    pub fn contains(&self, point: Point, slop: f64) -> bool {
        self.center.distance_to(point) <= self.radius + slop
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub hit_slop: f64,
    pub grid_lines: Vec<GridLine>,
    pub track_labels: Vec<TrackLabel>,
    pub curves: Vec<SceneCurve>,
    /// One node per row, in row order.
    pub nodes: Vec<SceneNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_state: Option<&'static str>,
}

impl Scene {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_for_row(&self, row: usize) -> Option<&SceneNode> {
        self.nodes.get(row).filter(|node| node.row == row)
    }

    /// Topmost node under `point`; later rows are drawn last and win on overlap.
    pub fn node_at(&self, point: Point) -> Option<&SceneNode> {
        self.nodes.iter().rev().find(|node| node.contains(point, self.hit_slop))
    }
}

/// Center of the node at `(track, row)`.
pub fn node_position(config: &GeometryConfig, track: usize, row: usize) -> Point {
    Point::new(
        config.padding + track as f64 * config.track_width + config.track_width / 2.0,
        config.padding + row as f64 * config.row_height,
    )
}

/// `(width, height)` of the canvas for `tracks` x `rows`.
pub fn canvas_size(config: &GeometryConfig, tracks: usize, rows: usize) -> (f64, f64) {
    (
        tracks as f64 * config.track_width + 2.0 * config.padding,
        rows as f64 * config.row_height + 2.0 * config.padding,
    )
}

/// Control point at the horizontal midpoint, lifted `curve_height` above the vertical midpoint.
pub fn same_doctor_curve(config: &GeometryConfig, from: Point, to: Point) -> QuadCurve {
    let control = Point::new((from.x + to.x) / 2.0, (from.y + to.y) / 2.0 - config.curve_height);
    QuadCurve { from, control, to }
}

/// Control point at the horizontal midpoint, lifted `branch_curve_height` above the higher
/// endpoint.
pub fn branch_curve(config: &GeometryConfig, from: Point, to: Point) -> QuadCurve {
    let control =
        Point::new((from.x + to.x) / 2.0, from.y.min(to.y) - config.branch_curve_height);
    QuadCurve { from, control, to }
}

/// Builds the drawable scene for `layout`, which must have been computed from `visits`.
///
/// Rows without a matching visit are skipped. An empty layout produces an empty scene
/// carrying [`EMPTY_STATE_TEXT`].
pub fn build_scene(visits: &[VisitRecord], layout: &VisitLayout, config: &GeometryConfig) -> Scene {
    let (width, height) = canvas_size(config, layout.track_count(), layout.row_count());

    if layout.is_empty() {
        return Scene {
            width,
            height,
            hit_slop: config.hit_slop,
            grid_lines: Vec::new(),
            track_labels: Vec::new(),
            curves: Vec::new(),
            nodes: Vec::new(),
            empty_state: Some(EMPTY_STATE_TEXT),
        };
    }

    let mut grid_lines = Vec::with_capacity(layout.track_count() + layout.row_count());
    let mut track_labels = Vec::with_capacity(layout.track_count());
    for track in layout.tracks() {
        let top = node_position(config, track.index(), 0);
        let bottom = node_position(config, track.index(), layout.row_count() - 1);
        grid_lines.push(GridLine {
            kind: GridLineKind::Track,
            index: track.index(),
            from: top,
            to: bottom,
        });
        track_labels.push(TrackLabel {
            track: track.index(),
            text: track.key().label().to_owned(),
            anchor: Point::new(top.x, config.padding / 2.0),
            color: SmolStr::new(track.color()),
        });
    }
    for row in 0..layout.row_count() {
        let y = node_position(config, 0, row).y;
        grid_lines.push(GridLine {
            kind: GridLineKind::Row,
            index: row,
            from: Point::new(config.padding, y),
            to: Point::new(width - config.padding, y),
        });
    }

    let mut curves = Vec::with_capacity(
        layout.same_doctor_connections().len() + layout.branch_connections().len(),
    );
    for connection in layout.same_doctor_connections() {
        let from = node_position(config, connection.track(), connection.from_row());
        let to = node_position(config, connection.track(), connection.to_row());
        curves.push(SceneCurve {
            kind: CurveKind::SameDoctor,
            curve: same_doctor_curve(config, from, to),
            color: SmolStr::new(connection.color()),
            from_track: connection.track(),
            from_row: connection.from_row(),
            to_track: connection.track(),
            to_row: connection.to_row(),
        });
    }
    for connection in layout.branch_connections() {
        let from = node_position(config, connection.from_track(), connection.from_row());
        let to = node_position(config, connection.to_track(), connection.to_row());
        curves.push(SceneCurve {
            kind: CurveKind::Branch,
            curve: branch_curve(config, from, to),
            color: SmolStr::new(connection.color()),
            from_track: connection.from_track(),
            from_row: connection.from_row(),
            to_track: connection.to_track(),
            to_row: connection.to_row(),
        });
    }

    let nodes = layout
        .rows()
        .iter()
        .filter_map(|row_track| {
            let visit = visits.get(row_track.row())?;
            Some(SceneNode {
                row: row_track.row(),
                track: row_track.track(),
                center: node_position(config, row_track.track(), row_track.row()),
                radius: config.node_radius,
                color: SmolStr::new(row_track.color()),
                hover: HoverInfo {
                    visit_id: visit.visit_id().clone(),
                    doctor_name: visit.doctor_label().to_owned(),
                    appointment_date: visit.display_date(),
                },
            })
        })
        .collect();

    Scene {
        width,
        height,
        hit_slop: config.hit_slop,
        grid_lines,
        track_labels,
        curves,
        nodes,
        empty_state: None,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        branch_curve, build_scene, canvas_size, node_position, same_doctor_curve, CurveKind,
        GeometryConfig, GridLineKind, Point, EMPTY_STATE_TEXT,
    };
    use crate::layout::{layout_visits, BranchOrigin, LayoutOptions};
    use crate::model::fixtures::visits_by_doctor;

    fn config() -> GeometryConfig {
        GeometryConfig {
            padding: 10.0,
            track_width: 40.0,
            row_height: 30.0,
            curve_height: 5.0,
            branch_curve_height: 8.0,
            node_radius: 4.0,
            hit_slop: 2.0,
        }
    }

    #[test]
    fn node_positions_follow_track_and_row() {
        let config = config();
        assert_eq!(node_position(&config, 0, 0), Point::new(30.0, 10.0));
        assert_eq!(node_position(&config, 2, 3), Point::new(110.0, 100.0));
    }

    #[test]
    fn canvas_size_adds_padding_on_both_sides() {
        assert_eq!(canvas_size(&config(), 3, 4), (140.0, 140.0));
        assert_eq!(canvas_size(&config(), 0, 0), (20.0, 20.0));
    }

    #[test]
    fn same_doctor_control_point_lifts_from_vertical_midpoint() {
        let curve = same_doctor_curve(&config(), Point::new(30.0, 10.0), Point::new(30.0, 70.0));
        assert_eq!(curve.control, Point::new(30.0, 35.0));
    }

    #[test]
    fn branch_control_point_lifts_from_higher_endpoint() {
        let curve = branch_curve(&config(), Point::new(30.0, 70.0), Point::new(70.0, 40.0));
        assert_eq!(curve.control, Point::new(50.0, 32.0));
    }

    #[test]
    fn quad_curve_endpoints_and_path() {
        let curve = same_doctor_curve(&config(), Point::new(0.0, 0.0), Point::new(10.0, 20.0));
        assert_eq!(curve.point_at(0.0), curve.from);
        assert_eq!(curve.point_at(1.0), curve.to);
        assert_eq!(curve.svg_path_data(), "M 0 0 Q 5 5 10 20");
    }

    #[test]
    fn scene_for_a_b_a() {
        let visits = visits_by_doctor(&["A", "B", "A"]);
        let layout = layout_visits(&visits, &LayoutOptions::default());
        let scene = build_scene(&visits, &layout, &config());

        assert_eq!((scene.width, scene.height), (100.0, 110.0));
        assert_eq!(scene.nodes.len(), 3);
        assert_eq!(scene.nodes[1].center, Point::new(70.0, 40.0));
        assert_eq!(scene.nodes[1].hover.visit_id.as_str(), "v1");

        let kinds = scene.curves.iter().map(|curve| curve.kind).collect::<Vec<_>>();
        assert_eq!(kinds, vec![CurveKind::SameDoctor, CurveKind::Branch]);

        let branch = &scene.curves[1];
        assert_eq!(branch.curve.from, Point::new(30.0, 40.0));
        assert_eq!(branch.curve.to, Point::new(70.0, 40.0));
        assert_eq!(branch.curve.control, Point::new(50.0, 32.0));

        let track_lines =
            scene.grid_lines.iter().filter(|line| line.kind == GridLineKind::Track).count();
        let row_lines = scene.grid_lines.iter().filter(|line| line.kind == GridLineKind::Row).count();
        assert_eq!((track_lines, row_lines), (2, 3));
        assert_eq!(scene.track_labels[1].text, "B");
    }

    #[test]
    fn branch_from_previous_track_last_row_starts_on_that_node() {
        let visits = visits_by_doctor(&["A", "A", "B"]);
        let options =
            LayoutOptions { branch_origin: BranchOrigin::PreviousTrackLastRow, ..Default::default() };
        let layout = layout_visits(&visits, &options);
        let scene = build_scene(&visits, &layout, &config());

        let branch = scene.curves.iter().find(|curve| curve.kind == CurveKind::Branch).expect("branch");
        assert_eq!(branch.curve.from, scene.nodes[1].center);
        assert_eq!(branch.curve.to, scene.nodes[2].center);
    }

    #[test]
    fn hit_testing_uses_radius_plus_slop() {
        let visits = visits_by_doctor(&["A", "B"]);
        let layout = layout_visits(&visits, &LayoutOptions::default());
        let scene = build_scene(&visits, &layout, &config());

        let center = scene.nodes[1].center;
        assert_eq!(scene.node_at(Point::new(center.x + 6.0, center.y)).map(|n| n.row), Some(1));
        assert!(scene.node_at(Point::new(center.x + 6.5, center.y)).is_none());
        assert_eq!(scene.node_for_row(0).map(|node| node.track), Some(0));
    }

    #[test]
    fn empty_input_yields_empty_state_scene() {
        let layout = layout_visits(&[], &LayoutOptions::default());
        let scene = build_scene(&[], &layout, &config());
        assert!(scene.is_empty());
        assert_eq!(scene.empty_state, Some(EMPTY_STATE_TEXT));
        assert!(scene.curves.is_empty());
        assert!(scene.node_at(Point::new(10.0, 10.0)).is_none());
    }
}
