// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Visitlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Visitlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Near-duplicate doctor names.
//!
//! Tracks group by the exact doctor string, so `Dr. Smith` and `dr smith` end up on separate
//! lanes. This module only reports such pairs; it never merges them.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use tracing::warn;

use crate::layout::VisitLayout;

/// Default `rapidfuzz` ratio above which two names are reported.
pub const DEFAULT_MIN_RATIO: f64 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Similarity {
    /// Equal after [`normalize_doctor_name`].
    Normalized,
    /// Fuzzy ratio of the normalized names reached the threshold.
    Fuzzy,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarDoctorNames {
    pub first_track: usize,
    pub second_track: usize,
    pub first_name: String,
    pub second_name: String,
    pub similarity: Similarity,
    /// `0.0..=1.0`; `1.0` for normalized matches.
    pub ratio: f64,
}

fn whitespace() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"))
}

fn title_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(dr|doctor)\.?\s+").expect("valid regex"))
}

/// Case-folded, whitespace-collapsed name without a leading `Dr.`/`Doctor` title.
pub fn normalize_doctor_name(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let collapsed = whitespace().replace_all(&lowered, " ");
    title_prefix().replace(&collapsed, "").into_owned()
}

/// Pairs of named tracks that probably refer to the same doctor, ordered by track index.
pub fn similar_doctor_names(layout: &VisitLayout, min_ratio: f64) -> Vec<SimilarDoctorNames> {
    let named = layout
        .tracks()
        .iter()
        .filter_map(|track| {
            let name = track.key().doctor_name()?;
            Some((track.index(), name, normalize_doctor_name(name)))
        })
        .collect::<Vec<_>>();

    let mut pairs = Vec::new();
    for (i, (first_track, first_name, first_norm)) in named.iter().enumerate() {
        for (second_track, second_name, second_norm) in &named[i + 1..] {
            let (similarity, ratio) = if first_norm == second_norm {
                (Similarity::Normalized, 1.0)
            } else {
                let ratio = rapidfuzz::fuzz::ratio(first_norm.chars(), second_norm.chars());
                if ratio < min_ratio {
                    continue;
                }
                (Similarity::Fuzzy, ratio)
            };

            warn!(
                first = %first_name,
                second = %second_name,
                ratio,
                "doctor names look like the same person but are laid out on separate tracks"
            );
            pairs.push(SimilarDoctorNames {
                first_track: *first_track,
                second_track: *second_track,
                first_name: (*first_name).to_owned(),
                second_name: (*second_name).to_owned(),
                similarity,
                ratio,
            });
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::{normalize_doctor_name, similar_doctor_names, Similarity, DEFAULT_MIN_RATIO};
    use crate::layout::{layout_visits, LayoutOptions};
    use crate::model::fixtures::visits_by_doctor;
    use crate::model::{VisitId, VisitRecord};

    #[test]
    fn normalization_folds_case_whitespace_and_title() {
        assert_eq!(normalize_doctor_name("  Dr.   Amara  Okafor "), "amara okafor");
        assert_eq!(normalize_doctor_name("doctor Amara Okafor"), "amara okafor");
        assert_eq!(normalize_doctor_name("Drake Ramoray"), "drake ramoray");
    }

    #[test]
    fn reports_normalized_and_fuzzy_pairs() {
        let visits =
            visits_by_doctor(&["Dr. Amara Okafor", "dr amara okafor", "Dr. Amara Okafr", "Dr. Lee"]);
        let layout = layout_visits(&visits, &LayoutOptions::default());
        let pairs = similar_doctor_names(&layout, DEFAULT_MIN_RATIO);

        let found = pairs
            .iter()
            .map(|pair| (pair.first_track, pair.second_track, pair.similarity))
            .collect::<Vec<_>>();
        assert_eq!(
            found,
            vec![(0, 1, Similarity::Normalized), (0, 2, Similarity::Fuzzy), (1, 2, Similarity::Fuzzy)]
        );
        assert!(pairs.iter().all(|pair| pair.ratio >= DEFAULT_MIN_RATIO));
    }

    #[test]
    fn unknown_doctor_track_is_ignored() {
        let visits = vec![
            VisitRecord::new(VisitId::new("a").expect("id")),
            VisitRecord::new(VisitId::new("b").expect("id")).with_doctor("Unknown doctor"),
        ];
        let layout = layout_visits(&visits, &LayoutOptions::default());
        assert!(similar_doctor_names(&layout, 0.0).is_empty());
    }

    #[test]
    fn distinct_names_are_not_reported() {
        let layout =
            layout_visits(&visits_by_doctor(&["Dr. Okafor", "Dr. Tanaka"]), &LayoutOptions::default());
        assert!(similar_doctor_names(&layout, DEFAULT_MIN_RATIO).is_empty());
    }
}
