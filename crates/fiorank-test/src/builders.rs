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

//! Fluent builders for fio result documents and metrics records.

use fiorank_core::SystemMetrics;
use serde_json::{json, Map, Value};

/// Builder for one fio job section.
///
/// # Examples
///
/// ```
/// use fiorank_test::builders::FioJobBuilder;
///
/// let job = FioJobBuilder::new("randread")
///     .read(409600.0, 102400.0)
///     .read_latency_ms(0.5, 1.0, 2.0)
///     .build();
///
/// assert_eq!(job["read"]["bw"], 409600.0);
/// assert_eq!(job["read"]["clat_ns"]["percentile"]["99.000000"], 2_000_000.0);
/// ```
#[derive(Debug, Clone)]
pub struct FioJobBuilder {
    name: String,
    read: Option<Map<String, Value>>,
    write: Option<Map<String, Value>>,
}

fn io_section(bw_kbps: f64, iops: f64) -> Map<String, Value> {
    let mut section = Map::new();
    section.insert("bw".to_string(), json!(bw_kbps));
    section.insert("iops".to_string(), json!(iops));
    section.insert("io_bytes".to_string(), json!((bw_kbps * 1024.0 * 60.0) as u64));
    section.insert("runtime".to_string(), json!(60000));
    section
}

fn latency_section(p50_ms: f64, p95_ms: f64, p99_ms: f64) -> Value {
    json!({
        "mean": (p50_ms + p95_ms) / 2.0 * 1e6,
        "percentile": {
            "50.000000": p50_ms * 1e6,
            "95.000000": p95_ms * 1e6,
            "99.000000": p99_ms * 1e6
        }
    })
}

impl FioJobBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            read: None,
            write: None,
        }
    }

    /// Adds a read side with bandwidth (KiB/s) and IOPS.
    pub fn read(mut self, bw_kbps: f64, iops: f64) -> Self {
        self.read = Some(io_section(bw_kbps, iops));
        self
    }

    /// Adds completion latency percentiles, in milliseconds, to the read side.
    pub fn read_latency_ms(mut self, p50_ms: f64, p95_ms: f64, p99_ms: f64) -> Self {
        let section = self.read.get_or_insert_with(|| io_section(0.0, 0.0));
        section.insert("clat_ns".to_string(), latency_section(p50_ms, p95_ms, p99_ms));
        self
    }

    /// Adds a write side with bandwidth (KiB/s) and IOPS.
    pub fn write(mut self, bw_kbps: f64, iops: f64) -> Self {
        self.write = Some(io_section(bw_kbps, iops));
        self
    }

    pub fn build(self) -> Value {
        let mut job = Map::new();
        job.insert("jobname".to_string(), json!(self.name));
        if let Some(read) = self.read {
            job.insert("read".to_string(), Value::Object(read));
        }
        if let Some(write) = self.write {
            job.insert("write".to_string(), Value::Object(write));
        }
        Value::Object(job)
    }
}

/// Builder for a complete fio result document.
#[derive(Debug, Clone, Default)]
pub struct FioDocumentBuilder {
    jobs: Vec<Value>,
}

impl FioDocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn job(mut self, job: FioJobBuilder) -> Self {
        self.jobs.push(job.build());
        self
    }

    pub fn build(self) -> Value {
        json!({
            "fio version": "fio-3.36",
            "jobs": self.jobs
        })
    }

    /// The document serialized as fio would write it.
    pub fn to_json(self) -> String {
        self.build().to_string()
    }
}

/// Builder for [`SystemMetrics`] records.
///
/// ```
/// use fiorank_test::builders::MetricsBuilder;
///
/// let metrics = MetricsBuilder::new("host1")
///     .profile("nvme")
///     .throughput_mbps(2048.0)
///     .p99_ms(0.3)
///     .build();
/// assert_eq!(metrics.system_profile, "nvme");
/// assert_eq!(metrics.randread_throughput_mbps, 2048.0);
/// ```
#[derive(Debug, Clone)]
pub struct MetricsBuilder {
    metrics: SystemMetrics,
}

impl MetricsBuilder {
    /// A system with plausible non-zero values for every metric.
    pub fn new(system_name: impl Into<String>) -> Self {
        Self {
            metrics: SystemMetrics {
                system_name: system_name.into(),
                system_profile: "default".to_string(),
                randread_throughput_mbps: 1000.0,
                randread_iops: 256_000.0,
                randread_latency_mean_ms: 0.12,
                randread_latency_p50_ms: 0.1,
                randread_latency_p95_ms: 0.2,
                randread_latency_p99_ms: 0.4,
                randread_latency_p99_p50_ratio: 4.0,
                seqread_throughput_mbps: 2500.0,
                seqwrite_throughput_mbps: 1800.0,
                knee_point_latency_increase_percent: 40.0,
                optimal_stream_limit_mbps: Some(100.0),
                optimal_mixed_workload_name: Some("mixed-302-16k_100Mseq".to_string()),
                optimal_blocksize: Some("16k".to_string()),
                total_workloads: 12,
            },
        }
    }

    pub fn profile(mut self, profile: impl Into<String>) -> Self {
        self.metrics.system_profile = profile.into();
        self
    }

    pub fn throughput_mbps(mut self, value: f64) -> Self {
        self.metrics.randread_throughput_mbps = value;
        self
    }

    pub fn iops(mut self, value: f64) -> Self {
        self.metrics.randread_iops = value;
        self
    }

    /// Sets P99 and keeps the P99/P50 ratio consistent.
    pub fn p99_ms(mut self, value: f64) -> Self {
        self.metrics.randread_latency_p99_ms = value;
        let p50 = self.metrics.randread_latency_p50_ms;
        self.metrics.randread_latency_p99_p50_ratio = if value > 0.0 && p50 > 0.0 {
            value / p50
        } else {
            0.0
        };
        self
    }

    pub fn knee_percent(mut self, value: f64) -> Self {
        self.metrics.knee_point_latency_increase_percent = value;
        self
    }

    pub fn seqread_mbps(mut self, value: f64) -> Self {
        self.metrics.seqread_throughput_mbps = value;
        self
    }

    pub fn seqwrite_mbps(mut self, value: f64) -> Self {
        self.metrics.seqwrite_throughput_mbps = value;
        self
    }

    pub fn build(self) -> SystemMetrics {
        self.metrics
    }
}
