// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Visitlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Visitlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::VisitId;
use super::visit::{ClinicalText, DetailedEntry, VisitRecord};

fn vid(value: &str) -> VisitId {
    VisitId::new(value).expect("visit id")
}

fn medicine(name: &str, dosage: &str, frequency: &str) -> DetailedEntry {
    DetailedEntry {
        name: name.to_owned(),
        dosage: Some(dosage.to_owned()),
        frequency: Some(frequency.to_owned()),
        ..DetailedEntry::default()
    }
}

/// Built-in visit history used by `visitlane tui --demo` and the docs.
///
/// Date-descending, three doctors, with one doctor returning after a gap so the graph shows
/// both a long same-doctor curve and two branches.
pub fn demo_visits() -> Vec<VisitRecord> {
    vec![
        VisitRecord::new(vid("visit-0107"))
            .with_doctor("Dr. Amara Okafor")
            .with_date("2024-06-18")
            .with_symptoms("Follow-up, blood pressure stable")
            .with_prescription(ClinicalText::from(vec![medicine(
                "Amlodipine",
                "5mg",
                "once daily",
            )])),
        VisitRecord::new(vid("visit-0104"))
            .with_doctor("Dr. Lucas Brandt")
            .with_date("2024-05-02")
            .with_symptoms(vec!["Knee pain", "Swelling after running"])
            .with_prescription(ClinicalText::from(vec![medicine(
                "Ibuprofen",
                "400mg",
                "as needed",
            )])),
        VisitRecord::new(vid("visit-0101"))
            .with_doctor("Dr. Amara Okafor")
            .with_date("2024-03-11")
            .with_symptoms("Headaches, elevated blood pressure")
            .with_prescription(ClinicalText::from(vec![
                medicine("Amlodipine", "5mg", "once daily"),
                medicine("Paracetamol", "500mg", "as needed"),
            ])),
        VisitRecord::new(vid("visit-0096"))
            .with_doctor("Dr. Mei Tanaka")
            .with_date("2024-01-23")
            .with_symptoms(vec!["Persistent cough", "Mild fever"])
            .with_prescription("Rest, fluids, review in two weeks"),
        VisitRecord::new(vid("visit-0090"))
            .with_doctor("Dr. Mei Tanaka")
            .with_date("2023-12-04")
            .with_symptoms("Sore throat")
            .with_prescription(ClinicalText::from(vec![medicine(
                "Amoxicillin",
                "500mg",
                "three times daily",
            )])),
    ]
}

/// Minimal visits keyed only by doctor, with ids `v0`, `v1`, ...
#[cfg(test)]
pub(crate) fn visits_by_doctor(doctors: &[&str]) -> Vec<VisitRecord> {
    doctors
        .iter()
        .enumerate()
        .map(|(row, doctor)| VisitRecord::new(vid(&format!("v{row}"))).with_doctor(*doctor))
        .collect()
}
