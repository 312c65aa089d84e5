// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Visitlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Visitlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::ids::{IdError, VisitId};

const UNKNOWN_DOCTOR_LABEL: &str = "Unknown doctor";
const UNKNOWN_DATE_LABEL: &str = "Unknown date";

/// One visit as supplied by the caller.
///
/// Records are read-only to the layout engine. Doctor and date are optional: a sparse record
/// is still laid out, it just groups under the "unknown doctor" track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "WireVisit")]
pub struct VisitRecord {
    visit_id: VisitId,
    #[serde(skip_serializing_if = "Option::is_none")]
    doctor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    appointment_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    symptoms: Option<ClinicalText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    prescription: Option<ClinicalText>,
}

impl VisitRecord {
    pub fn new(visit_id: VisitId) -> Self {
        Self {
            visit_id,
            doctor_name: None,
            appointment_date: None,
            symptoms: None,
            prescription: None,
        }
    }

    pub fn with_doctor(mut self, doctor_name: impl Into<String>) -> Self {
        self.doctor_name = Some(doctor_name.into());
        self
    }

    pub fn with_date(mut self, appointment_date: impl Into<String>) -> Self {
        self.appointment_date = Some(appointment_date.into());
        self
    }

    pub fn with_symptoms(mut self, symptoms: impl Into<ClinicalText>) -> Self {
        self.symptoms = Some(symptoms.into());
        self
    }

    pub fn with_prescription(mut self, prescription: impl Into<ClinicalText>) -> Self {
        self.prescription = Some(prescription.into());
        self
    }

    pub fn visit_id(&self) -> &VisitId {
        &self.visit_id
    }

    pub fn doctor_name(&self) -> Option<&str> {
        self.doctor_name.as_deref()
    }

    pub fn appointment_date(&self) -> Option<&str> {
        self.appointment_date.as_deref()
    }

    pub fn symptoms(&self) -> Option<&ClinicalText> {
        self.symptoms.as_ref()
    }

    pub fn prescription(&self) -> Option<&ClinicalText> {
        self.prescription.as_ref()
    }

    /// Doctor name for display; missing names render as a placeholder.
    pub fn doctor_label(&self) -> &str {
        self.doctor_name().unwrap_or(UNKNOWN_DOCTOR_LABEL)
    }

    pub fn parsed_date(&self) -> Option<NaiveDateTime> {
        self.appointment_date().and_then(parse_appointment_date)
    }

    /// Human-friendly date (`Mar 5, 2024`), falling back to the raw value when it does not
    /// parse.
    pub fn display_date(&self) -> String {
        match (self.parsed_date(), self.appointment_date()) {
            (Some(parsed), _) => format_display_date(parsed),
            (None, Some(raw)) if !raw.trim().is_empty() => raw.to_owned(),
            _ => UNKNOWN_DATE_LABEL.to_owned(),
        }
    }
}

/// A visit as the portal backend sends it.
///
/// Document stores emit the same id under several keys (`_id` plus an `id` virtual), and
/// `doctor` may be a populated reference object. The first present key wins.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireVisit {
    visit_id: Option<VisitId>,
    #[serde(rename = "_id")]
    document_id: Option<VisitId>,
    id: Option<VisitId>,
    doctor_name: Option<String>,
    doctor: Option<serde_json::Value>,
    appointment_date: Option<String>,
    date: Option<String>,
    symptoms: Option<ClinicalText>,
    prescription: Option<ClinicalText>,
}

impl TryFrom<WireVisit> for VisitRecord {
    type Error = IdError;

    fn try_from(wire: WireVisit) -> Result<Self, Self::Error> {
        let visit_id = wire.visit_id.or(wire.document_id).or(wire.id).ok_or(IdError::Missing)?;
        let doctor_name = wire.doctor_name.or_else(|| match wire.doctor? {
            serde_json::Value::String(name) => Some(name),
            serde_json::Value::Object(mut reference) => match reference.remove("name") {
                Some(serde_json::Value::String(name)) => Some(name),
                _ => None,
            },
            _ => None,
        });

        Ok(Self {
            visit_id,
            doctor_name,
            appointment_date: wire.appointment_date.or(wire.date),
            symptoms: wire.symptoms,
            prescription: wire.prescription,
        })
    }
}

/// Free text or a list of entries, as health-data forms submit either shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClinicalText {
    Text(String),
    List(Vec<ClinicalEntry>),
}

impl ClinicalText {
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::List(entries) => entries.iter().all(ClinicalEntry::is_blank),
        }
    }
}

impl fmt::Display for ClinicalText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::List(entries) => {
                let mut first = true;
                for entry in entries.iter().filter(|entry| !entry.is_blank()) {
                    if !first {
                        f.write_str(", ")?;
                    }
                    write!(f, "{entry}")?;
                    first = false;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for ClinicalText {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ClinicalText {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<ClinicalEntry>> From<Vec<T>> for ClinicalText {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClinicalEntry {
    Text(String),
    Detailed(DetailedEntry),
}

impl ClinicalEntry {
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::Detailed(entry) => entry.name.trim().is_empty(),
        }
    }
}

impl fmt::Display for ClinicalEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Detailed(entry) => write!(f, "{entry}"),
        }
    }
}

impl From<&str> for ClinicalEntry {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ClinicalEntry {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<DetailedEntry> for ClinicalEntry {
    fn from(value: DetailedEntry) -> Self {
        Self::Detailed(value)
    }
}

/// Structured list entry, e.g. a prescribed medicine with dosage.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DetailedEntry {
    #[serde(alias = "medicine", alias = "medication", alias = "drug", alias = "symptom")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, alias = "instructions", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl fmt::Display for DetailedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(dosage) = non_blank(self.dosage.as_deref()) {
            write!(f, " {dosage}")?;
        }

        let details = [self.frequency.as_deref(), self.duration.as_deref(), self.notes.as_deref()]
            .into_iter()
            .filter_map(non_blank)
            .collect::<Vec<_>>();
        if !details.is_empty() {
            write!(f, " ({})", details.join(", "))?;
        }
        Ok(())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

/// Parses the date shapes the portal backend emits: RFC 3339 timestamps, ISO local
/// date-times and plain ISO dates.
pub fn parse_appointment_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.naive_local());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}

fn format_display_date(parsed: NaiveDateTime) -> String {
    if parsed.time() == NaiveTime::MIN {
        parsed.format("%b %-d, %Y").to_string()
    } else {
        parsed.format("%b %-d, %Y %H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{ClinicalText, DetailedEntry, VisitRecord};
    use crate::model::ids::VisitId;

    fn visit(id: &str) -> VisitRecord {
        VisitRecord::new(VisitId::new(id).expect("visit id"))
    }

    #[test]
    fn deserializes_camel_case_and_aliases() {
        let json = r#"[
            {"visitId": "v1", "doctorName": "Dr. Rao", "appointmentDate": "2024-03-05",
             "symptoms": "cough", "prescription": ["Syrup", "Rest"]},
            {"_id": 7, "doctor": "Dr. Lin", "date": "2024-03-09T10:30:00Z"}
        ]"#;
        let visits: Vec<VisitRecord> = serde_json::from_str(json).expect("visits");

        assert_eq!(visits[0].visit_id().as_str(), "v1");
        assert_eq!(visits[0].doctor_name(), Some("Dr. Rao"));
        assert_eq!(visits[0].prescription().map(ToString::to_string).as_deref(), Some("Syrup, Rest"));
        assert_eq!(visits[1].visit_id().as_str(), "7");
        assert_eq!(visits[1].doctor_name(), Some("Dr. Lin"));
        assert!(visits[1].symptoms().is_none());
    }

    #[test]
    fn null_doctor_is_a_sparse_record() {
        let record: VisitRecord =
            serde_json::from_str(r#"{"visitId": "v1", "doctorName": null}"#).expect("visit");
        assert_eq!(record.doctor_name(), None);
        assert_eq!(record.doctor_label(), "Unknown doctor");
        assert_eq!(record.display_date(), "Unknown date");
    }

    #[test]
    fn detailed_entries_render_with_details() {
        let json = r#"{"visitId": "v1", "prescription": [
            {"medicine": "Amoxicillin", "dosage": "500mg", "frequency": "twice daily", "duration": "7 days"},
            {"name": "Paracetamol"}
        ]}"#;
        let record: VisitRecord = serde_json::from_str(json).expect("visit");
        assert_eq!(
            record.prescription().expect("prescription").to_string(),
            "Amoxicillin 500mg (twice daily, 7 days), Paracetamol"
        );
    }

    #[test]
    fn blank_clinical_text_is_detected() {
        assert!(ClinicalText::from("  ").is_blank());
        assert!(ClinicalText::from(vec!["", " "]).is_blank());
        assert!(!ClinicalText::from(vec![DetailedEntry {
            name: "Ibuprofen".to_owned(),
            ..DetailedEntry::default()
        }])
        .is_blank());
    }

    #[test]
    fn display_date_formats_parseable_dates_and_keeps_raw_otherwise() {
        assert_eq!(visit("a").with_date("2024-03-05").display_date(), "Mar 5, 2024");
        assert_eq!(visit("b").with_date("2024-03-05T09:15:00").display_date(), "Mar 5, 2024 09:15");
        assert_eq!(
            visit("c").with_date("2024-03-05T09:15:00+02:00").display_date(),
            "Mar 5, 2024 09:15"
        );
        assert_eq!(visit("d").with_date("next tuesday").display_date(), "next tuesday");
    }
}
