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

//! Knee-point detection over a mixed-workload series.
//!
//! The series is ordered by streaming limit (uncapped last) and scanned for
//! the largest relative jump in random-read P99 latency between neighbours.
//! A jump only counts as a knee when it exceeds [`KNEE_THRESHOLD`].

use crate::workload::WorkloadRecord;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Minimum relative P99 increase (20%) for a transition to count as a knee.
pub const KNEE_THRESHOLD: f64 = 0.20;

/// Fewer points than this cannot produce a knee.
pub const MIN_KNEE_POINTS: usize = 3;

/// Outcome of a knee-point scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum KneeStatus {
    /// `index` is the sub-optimal point; `increase` is the relative jump into it.
    Found { index: usize, increase: f64 },
    NoClearKnee,
    InsufficientData { points: usize },
}

impl KneeStatus {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Found { .. } => "Knee point analysis complete",
            Self::NoClearKnee => "No clear knee point found",
            Self::InsufficientData { .. } => "Insufficient mixed workload data",
        }
    }
}

/// Knee-point analysis of one system's matching mixed series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KneePointAnalysis {
    pub status: KneeStatus,
    /// The series sorted by streaming limit ascending.
    pub series: Vec<WorkloadRecord>,
}

impl KneePointAnalysis {
    /// Analysis of an empty series.
    pub fn empty() -> Self {
        Self {
            status: KneeStatus::InsufficientData { points: 0 },
            series: Vec::new(),
        }
    }

    /// The last point before the knee.
    pub fn optimal_mixed(&self) -> Option<&WorkloadRecord> {
        match self.status {
            KneeStatus::Found { index, .. } => {
                index.checked_sub(1).and_then(|i| self.series.get(i))
            }
            _ => None,
        }
    }

    /// The point at the knee.
    pub fn sub_optimal_mixed(&self) -> Option<&WorkloadRecord> {
        match self.status {
            KneeStatus::Found { index, .. } => self.series.get(index),
            _ => None,
        }
    }

    pub fn message(&self) -> &'static str {
        self.status.message()
    }
}

/// Sort key placing uncapped workloads after every capped one.
pub fn stream_limit_sort_key(record: &WorkloadRecord) -> f64 {
    record
        .stream_limit_mbps()
        .map(f64::from)
        .unwrap_or(f64::INFINITY)
}

/// Locate the knee in a latency sequence.
///
/// Returns the index of the sub-optimal point and the relative increase
/// leading into it. Pairs whose earlier value is not positive are skipped.
///
/// ```
/// use fiorank_core::knee::find_knee;
///
/// let (index, increase) = find_knee(&[100.0, 110.0, 115.0, 300.0]).unwrap();
/// assert_eq!(index, 3);
/// assert!((increase - 1.6087).abs() < 1e-3);
/// ```
pub fn find_knee(p99: &[f64]) -> Option<(usize, f64)> {
    if p99.len() < MIN_KNEE_POINTS {
        return None;
    }

    let mut knee: Option<(usize, f64)> = None;
    for i in 1..p99.len() {
        let prev = p99[i - 1];
        let curr = p99[i];
        if prev <= 0.0 {
            debug!(index = i, "skipping pair with non-positive baseline latency");
            continue;
        }
        let increase = (curr - prev) / prev;
        debug!(index = i, prev, curr, increase, "latency transition");

        let best = knee.map(|(_, inc)| inc).unwrap_or(KNEE_THRESHOLD);
        if increase > KNEE_THRESHOLD && increase > best {
            knee = Some((i, increase));
        }
    }
    knee
}

/// Sort a mixed series by streaming limit and look for its knee point.
pub fn analyze_knee_point(series: &[WorkloadRecord]) -> KneePointAnalysis {
    let mut sorted = series.to_vec();
    sorted.sort_by(|a, b| stream_limit_sort_key(a).total_cmp(&stream_limit_sort_key(b)));

    if sorted.len() < MIN_KNEE_POINTS {
        return KneePointAnalysis {
            status: KneeStatus::InsufficientData {
                points: sorted.len(),
            },
            series: sorted,
        };
    }

    let p99: Vec<f64> = sorted.iter().map(WorkloadRecord::randread_p99_ns).collect();
    let status = match find_knee(&p99) {
        Some((index, increase)) => KneeStatus::Found { index, increase },
        None => KneeStatus::NoClearKnee,
    };

    KneePointAnalysis {
        status,
        series: sorted,
    }
}
