// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Visitlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Visitlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Visit context: the payload emitted when a visit node is clicked.
//!
//! The context is meant for downstream consumers such as a chat assistant that wants the
//! selected visit injected into its prompt. It is an in-process value; the JSON schema is
//! exported so consumers can validate what they receive.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::VisitRecord;

const UNKNOWN_DOCTOR: &str = "an unknown doctor";
const UNKNOWN_DATE: &str = "an unknown date";
const NOTHING_RECORDED: &str = "none recorded";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisitContext {
    pub visit_id: String,
    pub doctor_name: Option<String>,
    pub appointment_date: Option<String>,
    /// Symptoms as display text; list entries are joined with `, `.
    pub symptoms: String,
    /// Prescription as display text; list entries are joined with `, `.
    pub prescription: String,
    /// One sentence naming doctor, date, symptoms and prescription.
    pub summary: String,
}

impl VisitContext {
    pub fn from_record(visit: &VisitRecord) -> Self {
        Self {
            visit_id: visit.visit_id().to_string(),
            doctor_name: visit.doctor_name().map(ToOwned::to_owned),
            appointment_date: visit.appointment_date().map(ToOwned::to_owned),
            symptoms: visit.symptoms().map(ToString::to_string).unwrap_or_default(),
            prescription: visit.prescription().map(ToString::to_string).unwrap_or_default(),
            summary: summarize_visit(visit),
        }
    }
}

/// Natural-language summary of a visit.
///
/// Doctor name, date, symptoms and prescription appear verbatim. A present doctor or date is
/// never replaced, even when it is only whitespace, since it still names its own track. Absent
/// parts and blank clinical text are spelled out.
pub fn summarize_visit(visit: &VisitRecord) -> String {
    let doctor = visit.doctor_name().unwrap_or(UNKNOWN_DOCTOR);
    let date = visit.appointment_date().unwrap_or(UNKNOWN_DATE);
    let symptoms = visit
        .symptoms()
        .filter(|text| !text.is_blank())
        .map(ToString::to_string)
        .unwrap_or_else(|| NOTHING_RECORDED.to_owned());
    let prescription = visit
        .prescription()
        .filter(|text| !text.is_blank())
        .map(ToString::to_string)
        .unwrap_or_else(|| NOTHING_RECORDED.to_owned());

    format!(
        "Visit with {doctor} on {date}. Symptoms: {symptoms}. Prescription: {prescription}."
    )
}

/// JSON schema of [`VisitContext`].
pub fn visit_context_schema() -> serde_json::Value {
    // A generated schema is a JSON object with string keys; converting it cannot fail.
    serde_json::to_value(schemars::schema_for!(VisitContext)).expect("schema is valid JSON")
}
