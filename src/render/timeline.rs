// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Visitlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Visitlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use thiserror::Error;

use crate::geometry::EMPTY_STATE_TEXT;
use crate::layout::VisitLayout;
use crate::model::VisitRecord;

use super::text::{canvas_to_string_trimmed, text_len, truncate_with_ellipsis};
use super::{
    clamp_highlight_index_to_text, AnnotatedRender, Canvas, CanvasError, HighlightIndex,
    RenderOptions,
};

const LANE_LEFT_MARGIN: usize = 1;
const LANE_GAP: usize = 4;
const LABEL_GAP: usize = 3;
const NODE_GLYPH: char = '●';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimelineRenderError {
    #[error("canvas error: {0}")]
    Canvas(#[from] CanvasError),
    #[error("layout row {row} has no matching visit")]
    MissingVisit { row: usize },
}

/// Column of the lane for `track`.
pub(crate) fn lane_x(track: usize) -> usize {
    LANE_LEFT_MARGIN + track * LANE_GAP
}

/// Column where row labels start for a layout with `track_count` tracks.
pub(crate) fn label_x(track_count: usize) -> usize {
    lane_x(track_count.saturating_sub(1)) + LABEL_GAP
}

fn row_label(visit: &VisitRecord, options: RenderOptions) -> String {
    let label = if options.show_visit_ids {
        format!("{}  {}  [{}]", visit.display_date(), visit.doctor_label(), visit.visit_id())
    } else {
        format!("{}  {}", visit.display_date(), visit.doctor_label())
    };
    truncate_with_ellipsis(&label, options.max_label_len)
}

/// Renders a visit layout as Unicode text: one line per visit, one lane per doctor.
pub fn render_timeline_unicode(
    visits: &[VisitRecord],
    layout: &VisitLayout,
) -> Result<String, TimelineRenderError> {
    render_timeline_unicode_with_options(visits, layout, RenderOptions::default())
}

pub fn render_timeline_unicode_with_options(
    visits: &[VisitRecord],
    layout: &VisitLayout,
    options: RenderOptions,
) -> Result<String, TimelineRenderError> {
    render_timeline_unicode_annotated_with_options(visits, layout, options)
        .map(|render| render.text)
}

/// Like [`render_timeline_unicode`], plus spans per visit row (node glyph and label).
pub fn render_timeline_unicode_annotated(
    visits: &[VisitRecord],
    layout: &VisitLayout,
) -> Result<AnnotatedRender, TimelineRenderError> {
    render_timeline_unicode_annotated_with_options(visits, layout, RenderOptions::default())
}

pub fn render_timeline_unicode_annotated_with_options(
    visits: &[VisitRecord],
    layout: &VisitLayout,
    options: RenderOptions,
) -> Result<AnnotatedRender, TimelineRenderError> {
    if layout.is_empty() {
        return Ok(AnnotatedRender {
            text: EMPTY_STATE_TEXT.to_owned(),
            highlight_index: HighlightIndex::new(),
        });
    }

    let labels = layout
        .rows()
        .iter()
        .map(|row_track| {
            visits
                .get(row_track.row())
                .map(|visit| row_label(visit, options))
                .ok_or(TimelineRenderError::MissingVisit { row: row_track.row() })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let label_x = label_x(layout.track_count());
    let label_width = labels.iter().map(|label| text_len(label)).max().unwrap_or(0);
    let mut canvas = Canvas::new(label_x + label_width.max(1), layout.row_count())?;

    for track in layout.tracks() {
        if track.first_row() < track.last_row() {
            canvas.draw_vline(lane_x(track.index()), track.first_row(), track.last_row())?;
        }
    }

    for branch in layout.branch_connections() {
        let from_x = lane_x(branch.from_track());
        let to_x = lane_x(branch.to_track());
        if branch.from_row() < branch.to_row() {
            canvas.draw_vline(from_x, branch.from_row(), branch.to_row())?;
        }
        canvas.draw_hline(from_x, to_x, branch.to_row())?;
    }

    let mut highlight_index = HighlightIndex::new();
    for (row_track, label) in layout.rows().iter().zip(&labels) {
        let row = row_track.row();
        let node_x = lane_x(row_track.track());
        canvas.set_node(node_x, row, NODE_GLYPH)?;
        canvas.write_str(label_x, row, label)?;

        let mut spans = vec![(row, node_x, node_x)];
        if !label.is_empty() {
            spans.push((row, label_x, label_x + text_len(label) - 1));
        }
        highlight_index.insert(row, spans);
    }

    let text = canvas_to_string_trimmed(&canvas);
    clamp_highlight_index_to_text(&mut highlight_index, &text);

    Ok(AnnotatedRender { text, highlight_index })
}
