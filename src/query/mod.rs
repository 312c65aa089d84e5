// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Visitlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Visitlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only queries over visit lists and layouts.
//!
//! Queries power the TUI search and the `lint` command. None of them change grouping or
//! ordering; they only report.

pub mod dates;
pub mod doctors;
pub mod visits;

pub use dates::{visit_date_order, DateOrder};
pub use doctors::{normalize_doctor_name, similar_doctor_names, SimilarDoctorNames, Similarity};
pub use visits::{visit_search, VisitSearchError, VisitSearchMode};
