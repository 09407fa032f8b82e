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

//! Profile-level summary statistics over per-system metrics.

use crate::error::{FioRankError, Result};
use crate::metrics::SystemMetrics;
use serde::{Deserialize, Serialize};

/// Average, extremes and spread of one metric across a profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub average: f64,
    pub minimum: f64,
    pub maximum: f64,
    /// `maximum / minimum`, or 0.0 when the minimum is 0.0.
    pub range_factor: f64,
    /// Number of systems that reported the metric.
    pub samples: usize,
}

impl MetricSummary {
    /// Summarize the values that are present (greater than 0.0).
    ///
    /// ```
    /// use fiorank_core::MetricSummary;
    ///
    /// let summary = MetricSummary::from_values([500.0, 1000.0, 2000.0]);
    /// assert_eq!(summary.maximum, 2000.0);
    /// assert_eq!(summary.range_factor, 4.0);
    /// ```
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        let present: Vec<f64> = values.into_iter().filter(|v| *v > 0.0).collect();
        if present.is_empty() {
            return Self::default();
        }

        let sum: f64 = present.iter().sum();
        let minimum = present.iter().copied().fold(f64::INFINITY, f64::min);
        let maximum = present.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self {
            average: sum / present.len() as f64,
            minimum,
            maximum,
            range_factor: if minimum == 0.0 { 0.0 } else { maximum / minimum },
            samples: present.len(),
        }
    }
}

/// Aggregate metrics of every system in one profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemProfileMetrics {
    pub profile_name: String,
    pub total_systems: usize,
    pub system_names: Vec<String>,

    pub randread_throughput_mbps: MetricSummary,
    pub randread_iops: MetricSummary,
    pub randread_latency_p50_ms: MetricSummary,
    pub randread_latency_p95_ms: MetricSummary,
    pub randread_latency_p99_ms: MetricSummary,
    pub randread_latency_p99_p50_ratio: MetricSummary,
    pub seqread_throughput_mbps: MetricSummary,
    pub seqwrite_throughput_mbps: MetricSummary,

    pub best_system_name: String,
    pub best_system_randread_throughput_mbps: f64,
    pub analysis_timestamp: String,
}

fn summarize(systems: &[SystemMetrics], field: impl Fn(&SystemMetrics) -> f64) -> MetricSummary {
    MetricSummary::from_values(systems.iter().map(field))
}

/// First system with the highest random-read throughput.
fn best_system(systems: &[SystemMetrics]) -> Option<&SystemMetrics> {
    let mut best: Option<&SystemMetrics> = None;
    for system in systems {
        match best {
            Some(current)
                if system.randread_throughput_mbps <= current.randread_throughput_mbps => {}
            _ => best = Some(system),
        }
    }
    best
}

/// Roll the metrics of a profile's systems into summary statistics.
///
/// # Errors
///
/// Returns [`FioRankError::InsufficientData`] when `systems` is empty.
pub fn aggregate_profile(
    profile_name: impl Into<String>,
    systems: &[SystemMetrics],
) -> Result<SystemProfileMetrics> {
    let profile_name = profile_name.into();
    let best = best_system(systems).ok_or_else(|| {
        FioRankError::insufficient_data(format!("no systems in profile '{}'", profile_name))
    })?;

    Ok(SystemProfileMetrics {
        total_systems: systems.len(),
        system_names: systems.iter().map(|s| s.system_name.clone()).collect(),
        randread_throughput_mbps: summarize(systems, |s| s.randread_throughput_mbps),
        randread_iops: summarize(systems, |s| s.randread_iops),
        randread_latency_p50_ms: summarize(systems, |s| s.randread_latency_p50_ms),
        randread_latency_p95_ms: summarize(systems, |s| s.randread_latency_p95_ms),
        randread_latency_p99_ms: summarize(systems, |s| s.randread_latency_p99_ms),
        randread_latency_p99_p50_ratio: summarize(systems, |s| s.randread_latency_p99_p50_ratio),
        seqread_throughput_mbps: summarize(systems, |s| s.seqread_throughput_mbps),
        seqwrite_throughput_mbps: summarize(systems, |s| s.seqwrite_throughput_mbps),
        best_system_name: best.system_name.clone(),
        best_system_randread_throughput_mbps: best.randread_throughput_mbps,
        analysis_timestamp: chrono::Utc::now().to_rfc3339(),
        profile_name,
    })
}
