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

//! FioRank core: turning fio result files into ranked system comparisons.
//!
//! # Pipeline
//!
//! ```text
//! fio JSON ─► WorkloadRecord ─► SystemAnalysis ─► SystemMetrics ─┬─► score_and_rank
//!             (workload)        (analysis,         (extract)      │
//!                                classify, knee)                  └─► aggregate_profile
//! ```
//!
//! 1. [`WorkloadRecord::from_json_str`] parses one `<kind>-<testId>-<parameter>.fio.json`.
//! 2. [`analyze_files`] picks the best random-read blocksize, matches the
//!    mixed-workload series of the closest blocksize and runs knee-point
//!    detection over it.
//! 3. [`extract_metrics`] reads the optimal mixed workload into a flat
//!    [`SystemMetrics`] record with normalized units.
//! 4. [`score_and_rank`] evaluates a [`ScoringConfiguration`] over many
//!    systems; [`aggregate_profile`] summarizes a profile.
//!
//! The core performs no file-system access. Callers supply file names and
//! contents, and receive plain values back.
//!
//! # Example
//!
//! ```
//! use fiorank_core::{analyze_files, extract_metrics, score_and_rank, ScoringConfiguration};
//! use serde_json::json;
//!
//! let randread = json!({"jobs": [{"jobname": "randread", "read": {"bw": 409600}}]});
//! let mixed = |p99_ns: u64| {
//!     json!({"jobs": [
//!         {"jobname": "randread", "read": {
//!             "bw": 204800,
//!             "iops": 51200,
//!             "clat_ns": {"mean": 60000, "percentile": {
//!                 "50.000000": 50000, "95.000000": 90000, "99.000000": p99_ns
//!             }}
//!         }},
//!         {"jobname": "seqwrite", "write": {"bw": 102400}}
//!     ]})
//!     .to_string()
//! };
//!
//! let files = vec![
//!     ("randread-101-16k.fio.json".to_string(), randread.to_string()),
//!     ("mixed-301-16k_10Mseq.fio.json".to_string(), mixed(100_000)),
//!     ("mixed-302-16k_20Mseq.fio.json".to_string(), mixed(105_000)),
//!     ("mixed-303-16k_uncapped.fio.json".to_string(), mixed(400_000)),
//! ];
//!
//! let analysis = analyze_files("host1", "nvme", files);
//! let metrics = extract_metrics(&analysis);
//! assert_eq!(metrics.randread_latency_p99_ms, 0.105);
//!
//! let ranked = score_and_rank(&[metrics], &ScoringConfiguration::builtin_default());
//! assert!(!ranked[0].disqualified);
//! ```

pub mod aggregate;
pub mod analysis;
pub mod classify;
pub mod error;
pub mod extract;
pub mod knee;
pub mod metric_name;
pub mod metrics;
pub mod scoring;
pub mod units;
pub mod workload;

pub use aggregate::{aggregate_profile, MetricSummary, SystemProfileMetrics};
pub use analysis::{analyze_files, analyze_system, SystemAnalysis};
pub use classify::{find_matching_mixed_series, find_optimal_randread, SeriesMatch};
pub use error::{FioRankError, Result};
pub use extract::extract_metrics;
pub use knee::{analyze_knee_point, KneePointAnalysis, KneeStatus};
pub use metric_name::MetricName;
pub use metrics::{RawMetrics, SystemMetrics};
pub use scoring::{
    score_and_rank, score_system, ComponentScore, MappingFunction, RankingFunctions,
    RankingSource, ResolvedRanking, ScoringComponent, ScoringConfiguration, ScoringResult,
};
pub use workload::{JobRole, WorkloadKind, WorkloadRecord};
