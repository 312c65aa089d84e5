// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Visitlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Visitlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Interaction state for a rendered visit graph.
//!
//! Hover and selection are transient and owned by whoever renders the scene (the TUI, or an
//! embedding UI). Nothing here feeds back into layout.

use crate::context::VisitContext;
use crate::geometry::{HoverInfo, Point, Scene};
use crate::model::VisitRecord;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    rev: u64,
    hovered_row: Option<usize>,
    selected_row: Option<usize>,
}

impl InteractionState {
    /// Bumped on every hover or selection change.
    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn hovered_row(&self) -> Option<usize> {
        self.hovered_row
    }

    pub fn selected_row(&self) -> Option<usize> {
        self.selected_row
    }

    /// Pointer moved to `point`; returns the tooltip of the node under it, if any.
    pub fn hover_at(&mut self, scene: &Scene, point: Point) -> Option<HoverInfo> {
        let node = scene.node_at(point);
        self.set_hovered(node.map(|node| node.row));
        node.map(|node| node.hover.clone())
    }

    /// Keyboard-driven hover of a row.
    pub fn hover_row(&mut self, scene: &Scene, row: usize) -> Option<HoverInfo> {
        let node = scene.node_for_row(row);
        self.set_hovered(node.map(|node| node.row));
        node.map(|node| node.hover.clone())
    }

    pub fn clear_hover(&mut self) {
        self.set_hovered(None);
    }

    /// Click at `point`; selects the node under it and returns its visit context.
    ///
    /// Clicking empty canvas leaves the current selection untouched.
    pub fn click_at(
        &mut self,
        scene: &Scene,
        visits: &[VisitRecord],
        point: Point,
    ) -> Option<VisitContext> {
        let row = scene.node_at(point)?.row;
        self.select_row(scene, visits, row)
    }

    pub fn select_row(
        &mut self,
        scene: &Scene,
        visits: &[VisitRecord],
        row: usize,
    ) -> Option<VisitContext> {
        scene.node_for_row(row)?;
        let visit = visits.get(row)?;
        if self.selected_row != Some(row) {
            self.selected_row = Some(row);
            self.rev += 1;
        }
        Some(VisitContext::from_record(visit))
    }

    pub fn clear_selection(&mut self) {
        if self.selected_row.take().is_some() {
            self.rev += 1;
        }
    }

    fn set_hovered(&mut self, row: Option<usize>) {
        if self.hovered_row != row {
            self.hovered_row = row;
            self.rev += 1;
        }
    }
}
