// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Visitlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Visitlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::str::FromStr;
use std::time::Duration;

use criterion::Criterion;
use pprof::criterion::{Output, PProfProfiler};

/// Reads `VISITLANE_BENCH_<name>`, falling back to `default` when unset or unparseable.
fn bench_env<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(format!("VISITLANE_BENCH_{name}"))
        .ok()
        .and_then(|raw| raw.trim().parse::<T>().ok())
        .unwrap_or(default)
}

/// Criterion with a pprof flamegraph profiler (`cargo bench -- --profile-time 10`).
pub fn criterion() -> Criterion {
    let frequency = bench_env::<i32>("PROFILE_FREQ", 100).clamp(1, 1000);
    let sample_size = bench_env::<usize>("SAMPLE_SIZE", 50).clamp(10, 200);
    let warmup_secs = bench_env::<u64>("WARMUP_SECS", 2).clamp(1, 60);
    let measurement_secs = bench_env::<u64>("MEASUREMENT_SECS", 5).clamp(1, 120);

    Criterion::default()
        .sample_size(sample_size)
        .warm_up_time(Duration::from_secs(warmup_secs))
        .measurement_time(Duration::from_secs(measurement_secs))
        .with_profiler(PProfProfiler::new(frequency, Output::Flamegraph(None)))
}
