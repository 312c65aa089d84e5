// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Visitlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Visitlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use smallvec::SmallVec;
use smol_str::SmolStr;
use thiserror::Error;

use crate::model::VisitRecord;

/// Track colors, cycled by track index.
pub const DEFAULT_PALETTE: [&str; 8] = [
    "#4f46e5", "#0891b2", "#16a34a", "#ea580c", "#db2777", "#7c3aed", "#ca8a04", "#dc2626",
];

const UNKNOWN_DOCTOR_LABEL: &str = "Unknown doctor";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    #[error("palette must contain at least one color")]
    Empty,
    #[error("palette color #{index} is blank")]
    BlankColor { index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Palette {
    colors: Vec<SmolStr>,
}

impl Default for Palette {
    fn default() -> Self {
        Self { colors: DEFAULT_PALETTE.iter().copied().map(SmolStr::new_static).collect() }
    }
}

impl Palette {
    pub fn new<I, S>(colors: I) -> Result<Self, PaletteError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let colors = colors
            .into_iter()
            .enumerate()
            .map(|(index, color)| {
                let color = color.as_ref().trim();
                if color.is_empty() {
                    return Err(PaletteError::BlankColor { index });
                }
                Ok(SmolStr::new(color))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if colors.is_empty() {
            return Err(PaletteError::Empty);
        }
        Ok(Self { colors })
    }

    pub fn colors(&self) -> &[SmolStr] {
        &self.colors
    }

    /// `palette[track_index % palette_len]`.
    pub fn color_for(&self, track_index: usize) -> &SmolStr {
        &self.colors[track_index % self.colors.len()]
    }
}

/// Grouping key of a track: the raw doctor name, compared by exact string equality.
///
/// Visits without a doctor share the `None` key and therefore one track.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TrackKey(Option<SmolStr>);

impl TrackKey {
    pub fn from_visit(visit: &VisitRecord) -> Self {
        Self(visit.doctor_name().map(SmolStr::new))
    }

    pub fn doctor_name(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn label(&self) -> &str {
        self.doctor_name().unwrap_or(UNKNOWN_DOCTOR_LABEL)
    }
}

impl fmt::Display for TrackKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Track {
    index: usize,
    key: TrackKey,
    color: SmolStr,
    first_row: usize,
    last_row: usize,
    rows: SmallVec<[usize; 8]>,
}

impl Track {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn key(&self) -> &TrackKey {
        &self.key
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    /// Row where the track was introduced.
    pub fn first_row(&self) -> usize {
        self.first_row
    }

    /// Row of the most recent visit on this track.
    pub fn last_row(&self) -> usize {
        self.last_row
    }

    /// All rows on this track, ascending.
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowTrack {
    row: usize,
    track: usize,
    color: SmolStr,
}

impl RowTrack {
    pub fn row(&self) -> usize {
        self.row
    }

    pub fn track(&self) -> usize {
        self.track
    }

    pub fn color(&self) -> &str {
        &self.color
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TrackAssignment {
    tracks: Vec<Track>,
    rows: Vec<RowTrack>,
}

impl TrackAssignment {
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Per-row mapping `row -> {track, color}`, indexed by row.
    pub fn rows(&self) -> &[RowTrack] {
        &self.rows
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn track(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn track_for_row(&self, row: usize) -> Option<&Track> {
        self.rows.get(row).and_then(|row| self.tracks.get(row.track))
    }
}

/// Assigns one track per distinct doctor in order of first appearance.
///
/// Single forward pass; input order is never changed. Track indices start at 0 and grow by
/// one per new key, so identical input yields identical indices and colors.
pub fn assign_tracks(visits: &[VisitRecord], palette: &Palette) -> TrackAssignment {
    let mut index_by_key = BTreeMap::<TrackKey, usize>::new();
    let mut tracks = Vec::<Track>::new();
    let mut rows = Vec::<RowTrack>::with_capacity(visits.len());

    for (row, visit) in visits.iter().enumerate() {
        let key = TrackKey::from_visit(visit);
        let index = match index_by_key.get(&key) {
            Some(&index) => {
                let track = &mut tracks[index];
                track.last_row = row;
                track.rows.push(row);
                index
            }
            None => {
                let index = tracks.len();
                index_by_key.insert(key.clone(), index);
                let mut track_rows = SmallVec::new();
                track_rows.push(row);
                tracks.push(Track {
                    index,
                    key,
                    color: palette.color_for(index).clone(),
                    first_row: row,
                    last_row: row,
                    rows: track_rows,
                });
                index
            }
        };

        rows.push(RowTrack { row, track: index, color: tracks[index].color.clone() });
    }

    TrackAssignment { tracks, rows }
}
