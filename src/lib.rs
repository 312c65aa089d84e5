// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Visitlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Visitlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Visitlane: a deterministic lane graph for a patient's visit history.
//!
//! Visits are laid out one per row in input order; each distinct doctor gets a track (lane)
//! with its own color. Same-doctor visits are joined by curves along their track, and every
//! new track is joined to its left neighbor by a branch curve.
//!
//! The pipeline is pure: [`layout::layout_visits`] assigns tracks and connections,
//! [`geometry::build_scene`] maps them to pixels, and [`render`] turns a scene into SVG or a
//! layout into Unicode text. [`ui::InteractionState`] handles hover and click, producing a
//! [`context::VisitContext`] for the selected visit.

pub mod config;
pub mod context;
pub mod geometry;
pub mod layout;
pub mod model;
pub mod query;
pub mod render;
pub mod store;
pub mod tui;
pub mod ui;

pub use config::{ConfigError, VisitlaneConfig};
pub use context::{summarize_visit, VisitContext};
pub use geometry::{build_scene, GeometryConfig, Scene};
pub use layout::{layout_visits, LayoutOptions, VisitLayout};
pub use model::{VisitId, VisitRecord};
