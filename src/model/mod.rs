// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Visitlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Visitlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Visit records as supplied by the caller.
//!
//! The model is read-only input to the layout engine; its order is the row order.

pub mod fixtures;
pub mod ids;
pub mod visit;

pub use fixtures::demo_visits;
pub use ids::{IdError, VisitId};
pub use visit::{parse_appointment_date, ClinicalEntry, ClinicalText, DetailedEntry, VisitRecord};
