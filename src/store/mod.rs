// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Visitlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Visitlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Visit input and rendered output on disk.
//!
//! Input is JSON: either a bare array of visit records or an object with a `visits` array
//! (the shape the patient portal's API returns). Records keep input order.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::de::Error as _;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::model::{VisitId, VisitRecord};

mod write;

pub use write::{write_output, WriteDurability};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid visit JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid visit JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parses visit records from a JSON document.
pub fn parse_visits(json: &str) -> Result<Vec<VisitRecord>, StoreError> {
    let visits = visits_from_str(json)?;
    warn_on_duplicate_ids(&visits);
    Ok(visits)
}

/// Reads and parses the visit file at `path`.
pub fn load_visits(path: &Path) -> Result<Vec<VisitRecord>, StoreError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|source| StoreError::Io { path: path.to_path_buf(), source })?;
    let visits = visits_from_str(&contents)
        .map_err(|source| StoreError::Parse { path: path.to_path_buf(), source })?;

    debug!(path = %path.display(), visits = visits.len(), "loaded visits");
    warn_on_duplicate_ids(&visits);
    Ok(visits)
}

fn visits_from_str(json: &str) -> Result<Vec<VisitRecord>, serde_json::Error> {
    let list = match serde_json::from_str::<Value>(json)? {
        Value::Object(mut document) => document.remove("visits").ok_or_else(|| {
            serde_json::Error::custom("expected an array of visits or an object with `visits`")
        })?,
        other => other,
    };
    serde_json::from_value(list)
}

/// Rows are keyed by position, so repeated ids still lay out; they are almost always a data
/// problem upstream though.
fn warn_on_duplicate_ids(visits: &[VisitRecord]) {
    let mut first_rows = BTreeMap::<&VisitId, usize>::new();
    for (row, visit) in visits.iter().enumerate() {
        if let Some(first_row) = first_rows.insert(visit.visit_id(), row) {
            first_rows.insert(visit.visit_id(), first_row);
            warn!(visit_id = %visit.visit_id(), first_row, row, "duplicate visit id");
        }
    }
}
