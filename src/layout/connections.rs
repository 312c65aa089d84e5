// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Visitlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Visitlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::tracks::TrackAssignment;

/// Where a newly introduced track branches off the previously created track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BranchOrigin {
    /// Branch at the row that introduces the new track.
    #[default]
    CurrentRow,
    /// Branch from the previous track's latest visit before the introducing row.
    PreviousTrackLastRow,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchConnection {
    from_track: usize,
    from_row: usize,
    to_track: usize,
    to_row: usize,
    color: SmolStr,
}

impl BranchConnection {
    pub fn from_track(&self) -> usize {
        self.from_track
    }

    pub fn from_row(&self) -> usize {
        self.from_row
    }

    pub fn to_track(&self) -> usize {
        self.to_track
    }

    /// Row where `to_track` first appears.
    pub fn to_row(&self) -> usize {
        self.to_row
    }

    /// Color of the new track.
    pub fn color(&self) -> &str {
        &self.color
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SameDoctorConnection {
    from_row: usize,
    to_row: usize,
    track: usize,
    color: SmolStr,
}

impl SameDoctorConnection {
    pub fn from_row(&self) -> usize {
        self.from_row
    }

    pub fn to_row(&self) -> usize {
        self.to_row
    }

    pub fn track(&self) -> usize {
        self.track
    }

    pub fn color(&self) -> &str {
        &self.color
    }
}

/// One connection per track after the first, in track order.
pub fn build_branch_connections(
    assignment: &TrackAssignment,
    origin: BranchOrigin,
) -> Vec<BranchConnection> {
    let mut connections = Vec::with_capacity(assignment.track_count().saturating_sub(1));
    let mut last_row_by_track = vec![None::<usize>; assignment.track_count()];

    for row_track in assignment.rows() {
        let row = row_track.row();
        let track = row_track.track();
        let introduced_here = assignment.track(track).is_some_and(|t| t.first_row() == row);

        if introduced_here && track > 0 {
            let from_track = track - 1;
            let from_row = match origin {
                BranchOrigin::CurrentRow => row,
                // Track `from_track` was introduced before `row`, so it has been seen.
                BranchOrigin::PreviousTrackLastRow => last_row_by_track[from_track].unwrap_or(row),
            };
            connections.push(BranchConnection {
                from_track,
                from_row,
                to_track: track,
                to_row: row,
                color: SmolStr::new(row_track.color()),
            });
        }

        last_row_by_track[track] = Some(row);
    }

    connections
}

/// Links every row to the nearest later row on the same track, ordered by `from_row`.
///
/// A doctor seen at rows 0, 2 and 5 yields `0 -> 2` and `2 -> 5`, never `0 -> 5`.
pub fn build_same_doctor_connections(assignment: &TrackAssignment) -> Vec<SameDoctorConnection> {
    let mut next_row_by_track = vec![None::<usize>; assignment.track_count()];
    let mut connections = Vec::new();

    for row_track in assignment.rows().iter().rev() {
        let track = row_track.track();
        if let Some(to_row) = next_row_by_track[track] {
            connections.push(SameDoctorConnection {
                from_row: row_track.row(),
                to_row,
                track,
                color: SmolStr::new(row_track.color()),
            });
        }
        next_row_by_track[track] = Some(row_track.row());
    }

    connections.reverse();
    connections
}
