// Dweve FioRank - FIO Benchmark Ranking Toolkit
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Per-system analysis: optimal random read, matching mixed series and
//! knee point.
//!
//! Analysis never fails. Missing inputs produce a partial [`SystemAnalysis`]
//! whose `notes` describe what could not be computed.

use crate::classify::{find_matching_mixed_series, find_optimal_randread, sorted_randreads};
use crate::error::FioRankError;
use crate::knee::{analyze_knee_point, KneePointAnalysis};
use crate::workload::WorkloadRecord;
use tracing::{debug, warn};

/// Fewer random-read results than this are reported as insufficient.
pub const MIN_RANDREAD_RESULTS: usize = 2;

/// Derived analysis of one system directory.
#[derive(Debug, Clone)]
pub struct SystemAnalysis {
    pub system_name: String,
    pub system_profile: String,
    pub optimal_randread: Option<WorkloadRecord>,
    /// Sorted by bandwidth descending.
    pub all_randread_results: Vec<WorkloadRecord>,
    pub matching_series: Option<u32>,
    pub matching_mixed_series: Vec<WorkloadRecord>,
    pub knee_point: KneePointAnalysis,
    /// Number of workload files that parsed successfully.
    pub total_workloads: usize,
    /// Files that failed to parse and were skipped.
    pub skipped_files: Vec<FioRankError>,
    /// Human-readable status for each incomplete stage.
    pub notes: Vec<String>,
}

impl SystemAnalysis {
    /// Whether a knee point (and therefore an optimal mixed workload) exists.
    pub fn is_complete(&self) -> bool {
        self.knee_point.optimal_mixed().is_some()
    }
}

/// Analyze the parsed workloads of one system.
pub fn analyze_system(
    system_name: impl Into<String>,
    system_profile: impl Into<String>,
    records: &[WorkloadRecord],
) -> SystemAnalysis {
    let system_name = system_name.into();
    let mut notes = Vec::new();

    let all_randread_results: Vec<WorkloadRecord> =
        sorted_randreads(records).into_iter().cloned().collect();
    if all_randread_results.len() < MIN_RANDREAD_RESULTS {
        notes.push(format!(
            "Insufficient random-read data: {} usable result(s), at least {} expected",
            all_randread_results.len(),
            MIN_RANDREAD_RESULTS
        ));
    }

    let optimal = find_optimal_randread(records);
    if optimal.is_none() {
        notes.push("No random-read workload with read metrics found".to_string());
    }

    let matched = find_matching_mixed_series(records, optimal);
    let (matching_series, matching_mixed_series) = match matched {
        Some(m) => (Some(m.series), m.records.into_iter().cloned().collect()),
        None => {
            notes.push("No matching mixed workload series found".to_string());
            (None, Vec::new())
        }
    };

    let knee_point = if matching_mixed_series.is_empty() {
        KneePointAnalysis::empty()
    } else {
        analyze_knee_point(&matching_mixed_series)
    };
    if knee_point.optimal_mixed().is_none() {
        notes.push(knee_point.message().to_string());
    }

    debug!(
        system = %system_name,
        workloads = records.len(),
        series = ?matching_series,
        status = knee_point.message(),
        "system analysis complete"
    );

    SystemAnalysis {
        system_name,
        system_profile: system_profile.into(),
        optimal_randread: optimal.cloned(),
        all_randread_results,
        matching_series,
        matching_mixed_series,
        knee_point,
        total_workloads: records.len(),
        skipped_files: Vec::new(),
        notes,
    }
}

/// Parse `(filename, content)` pairs and analyze the resulting workloads.
///
/// Files that fail to parse are logged, recorded in
/// [`SystemAnalysis::skipped_files`] and otherwise ignored.
pub fn analyze_files<I, N, C>(
    system_name: impl Into<String>,
    system_profile: impl Into<String>,
    files: I,
) -> SystemAnalysis
where
    I: IntoIterator<Item = (N, C)>,
    N: AsRef<str>,
    C: AsRef<str>,
{
    let system_name = system_name.into();
    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for (name, content) in files {
        match WorkloadRecord::from_json_str(name.as_ref(), content.as_ref()) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(system = %system_name, "skipping workload file: {}", e);
                skipped.push(e);
            }
        }
    }

    let mut analysis = analyze_system(system_name, system_profile, &records);
    analysis.skipped_files = skipped;
    analysis
}
