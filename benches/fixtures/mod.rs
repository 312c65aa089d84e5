// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Visitlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Visitlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use chrono::{Duration, NaiveDate};
use visitlane::model::{ClinicalText, DetailedEntry, VisitId, VisitRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryParams {
    pub visits: usize,
    pub doctors: usize,
    /// Rows between two visits of the same doctor when cycling (`1` = strict round robin).
    pub stride: usize,
    pub medicines_per_visit: usize,
}

impl HistoryParams {
    pub const fn new(
        visits: usize,
        doctors: usize,
        stride: usize,
        medicines_per_visit: usize,
    ) -> Self {
        Self { visits, doctors, stride, medicines_per_visit }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Small,
    Returning,
    ManyDoctors,
    LongHistory,
}

impl Case {
    pub const ALL: [Case; 4] = [Case::Small, Case::Returning, Case::ManyDoctors, Case::LongHistory];

    pub const fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Returning => "returning",
            Self::ManyDoctors => "many_doctors",
            Self::LongHistory => "long_history",
        }
    }

    pub const fn params(self) -> HistoryParams {
        match self {
            Self::Small => HistoryParams::new(12, 3, 1, 1),
            Self::Returning => HistoryParams::new(200, 8, 3, 2),
            Self::ManyDoctors => HistoryParams::new(400, 200, 1, 1),
            Self::LongHistory => HistoryParams::new(5_000, 24, 5, 3),
        }
    }
}

fn doctor_for_row(row: usize, params: HistoryParams) -> usize {
    // Runs of `stride` visits per doctor, doctors visited in a shuffled but fixed order.
    let run = row / params.stride.max(1);
    (run * 7 + run / params.doctors.max(1)) % params.doctors.max(1)
}

/// Date-descending visit history with a deterministic doctor pattern.
pub fn history(params: HistoryParams) -> Vec<VisitRecord> {
    assert!(params.doctors >= 1, "doctors must be >= 1");

    let newest = NaiveDate::from_ymd_opt(2024, 12, 31).expect("valid date");
    (0..params.visits)
        .map(|row| {
            let doctor = doctor_for_row(row, params);
            let date = newest - Duration::days(row as i64 * 3);
            let medicines = (0..params.medicines_per_visit)
                .map(|idx| DetailedEntry {
                    name: format!("Medicine {:03}", (row + idx) % 97),
                    dosage: Some(format!("{}mg", 50 * (idx + 1))),
                    frequency: Some("twice daily".to_owned()),
                    ..DetailedEntry::default()
                })
                .collect::<Vec<_>>();

            VisitRecord::new(VisitId::new(format!("visit-{row:05}")).expect("valid visit id"))
                .with_doctor(format!("Dr. Doctor {doctor:03}"))
                .with_date(date.format("%Y-%m-%d").to_string())
                .with_symptoms(format!("Symptom set {} with follow-up notes", row % 13))
                .with_prescription(ClinicalText::from(medicines))
        })
        .collect()
}

pub fn fixture(case: Case) -> Vec<VisitRecord> {
    history(case.params())
}
