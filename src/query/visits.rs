// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Visitlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Visitlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use regex::RegexBuilder;
use thiserror::Error;

use crate::model::VisitRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitSearchMode {
    Substring,
    Regex,
}

#[derive(Debug, Clone, Error)]
pub enum VisitSearchError {
    #[error("invalid search regex: {0}")]
    Regex(#[from] regex::Error),
}

/// Searchable text of a visit, one entry per field so matches never span fields.
fn search_fields(visit: &VisitRecord) -> Vec<String> {
    let mut fields = vec![visit.visit_id().to_string(), visit.doctor_label().to_owned()];
    if let Some(date) = visit.appointment_date() {
        fields.push(date.to_owned());
    }
    fields.push(visit.display_date());
    fields.extend(visit.symptoms().map(ToString::to_string));
    fields.extend(visit.prescription().map(ToString::to_string));
    fields
}

/// Rows (input positions) of visits whose id, doctor, date, symptoms or prescription match.
pub fn visit_search(
    visits: &[VisitRecord],
    needle: &str,
    mode: VisitSearchMode,
    case_insensitive: bool,
) -> Result<Vec<usize>, VisitSearchError> {
    let rows_where = |matches: &dyn Fn(&str) -> bool| {
        visits
            .iter()
            .enumerate()
            .filter(|(_, visit)| search_fields(visit).iter().any(|field| matches(field)))
            .map(|(row, _)| row)
            .collect::<Vec<_>>()
    };

    match mode {
        VisitSearchMode::Substring if case_insensitive => {
            let needle_lower = needle.to_lowercase();
            Ok(rows_where(&|field| field.to_lowercase().contains(&needle_lower)))
        }
        VisitSearchMode::Substring => Ok(rows_where(&|field| field.contains(needle))),
        VisitSearchMode::Regex => {
            let regex = RegexBuilder::new(needle).case_insensitive(case_insensitive).build()?;
            Ok(rows_where(&|field| regex.is_match(field)))
        }
    }
}
