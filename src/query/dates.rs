// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Visitlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Visitlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::Serialize;

use crate::model::VisitRecord;

/// Observed order of the parseable appointment dates, in input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateOrder {
    /// Oldest first (ties allowed).
    Ascending,
    /// Most recent first (ties allowed).
    Descending,
    Mixed,
    /// Fewer than two parseable dates, or all equal.
    Undetermined,
}

/// Reports how the input is ordered by date. Rows are never reordered; the layout always
/// follows input order.
pub fn visit_date_order(visits: &[VisitRecord]) -> DateOrder {
    let dates = visits.iter().filter_map(VisitRecord::parsed_date).collect::<Vec<_>>();

    let mut rising = false;
    let mut falling = false;
    for pair in dates.windows(2) {
        rising |= pair[0] < pair[1];
        falling |= pair[0] > pair[1];
    }

    match (rising, falling) {
        (true, true) => DateOrder::Mixed,
        (true, false) => DateOrder::Ascending,
        (false, true) => DateOrder::Descending,
        (false, false) => DateOrder::Undetermined,
    }
}
