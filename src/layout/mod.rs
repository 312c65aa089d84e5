// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Visitlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Visitlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Track and connection layout for visit histories.
//!
//! Layout is coordinates-free: it works in track/row indices only. `crate::geometry` maps the
//! result to pixels.

pub mod connections;
pub mod tracks;

use serde::Serialize;

use crate::model::VisitRecord;

pub use connections::{
    build_branch_connections, build_same_doctor_connections, BranchConnection, BranchOrigin,
    SameDoctorConnection,
};
pub use tracks::{
    assign_tracks, Palette, PaletteError, RowTrack, Track, TrackAssignment, TrackKey,
    DEFAULT_PALETTE,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LayoutOptions {
    pub palette: Palette,
    pub branch_origin: BranchOrigin,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct VisitLayout {
    assignment: TrackAssignment,
    branch_connections: Vec<BranchConnection>,
    same_doctor_connections: Vec<SameDoctorConnection>,
}

impl VisitLayout {
    pub fn assignment(&self) -> &TrackAssignment {
        &self.assignment
    }

    pub fn tracks(&self) -> &[Track] {
        self.assignment.tracks()
    }

    pub fn rows(&self) -> &[RowTrack] {
        self.assignment.rows()
    }

    pub fn track_count(&self) -> usize {
        self.assignment.track_count()
    }

    pub fn row_count(&self) -> usize {
        self.assignment.rows().len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignment.rows().is_empty()
    }

    pub fn branch_connections(&self) -> &[BranchConnection] {
        &self.branch_connections
    }

    pub fn same_doctor_connections(&self) -> &[SameDoctorConnection] {
        &self.same_doctor_connections
    }
}

/// Deterministic layout of a visit list.
///
/// - `track`: one per distinct doctor, in order of first appearance
/// - `row`: position in `visits` (input order is kept as-is)
///
/// Recomputed from scratch on every call; infallible, empty input yields an empty layout.
pub fn layout_visits(visits: &[VisitRecord], options: &LayoutOptions) -> VisitLayout {
    let assignment = assign_tracks(visits, &options.palette);
    let branch_connections = build_branch_connections(&assignment, options.branch_origin);
    let same_doctor_connections = build_same_doctor_connections(&assignment);

    VisitLayout { assignment, branch_connections, same_doctor_connections }
}
