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

//! Serde mirror of the subset of fio's `--output-format=json` schema we read.
//!
//! Unknown fields are ignored, so full fio output deserializes cleanly.

use serde::Deserialize;
use std::collections::BTreeMap;

/// Top-level fio result document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FioDocument {
    /// Absent `jobs` is a parse error; an empty array is accepted.
    pub jobs: Option<Vec<FioJob>>,
}

/// One fio job section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FioJob {
    #[serde(default)]
    pub jobname: String,
    pub read: Option<FioIo>,
    pub write: Option<FioIo>,
}

/// Per-direction statistics of a job.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FioIo {
    #[serde(default)]
    pub io_bytes: u64,
    /// Bandwidth in KiB/s.
    #[serde(default)]
    pub bw: f64,
    #[serde(default)]
    pub iops: f64,
    #[serde(default)]
    pub runtime: u64,
    pub clat_ns: Option<FioLatency>,
}

/// Completion latency block, in nanoseconds.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FioLatency {
    #[serde(default)]
    pub mean: f64,
    /// Keys are fio's fixed-precision percentile labels such as `"99.000000"`.
    #[serde(default)]
    pub percentile: BTreeMap<String, f64>,
}

pub const P50_KEY: &str = "50.000000";
pub const P95_KEY: &str = "95.000000";
pub const P99_KEY: &str = "99.000000";

impl FioLatency {
    /// Look up a percentile; missing entries read as 0.0.
    pub fn percentile(&self, key: &str) -> f64 {
        self.percentile.get(key).copied().unwrap_or(0.0)
    }
}
