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

//! The canonical per-system metrics record that scoring operates on.
//!
//! Throughput is stored in MB/s and latency in milliseconds. A value of
//! exactly 0.0 means the metric is missing.

use crate::units::{kbps_to_mbps, ns_to_ms};
use crate::workload::LatencyStats;
use serde::{Deserialize, Serialize};

/// Persisted metrics of one system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemMetrics {
    pub system_name: String,
    pub system_profile: String,

    pub randread_throughput_mbps: f64,
    pub randread_iops: f64,
    pub randread_latency_mean_ms: f64,
    pub randread_latency_p50_ms: f64,
    pub randread_latency_p95_ms: f64,
    pub randread_latency_p99_ms: f64,
    pub randread_latency_p99_p50_ratio: f64,
    pub seqread_throughput_mbps: f64,
    pub seqwrite_throughput_mbps: f64,

    pub knee_point_latency_increase_percent: f64,
    pub optimal_stream_limit_mbps: Option<f64>,
    pub optimal_mixed_workload_name: Option<String>,
    pub optimal_blocksize: Option<String>,
    pub total_workloads: usize,
}

/// Raw values pulled out of a system's workloads, before unit conversion
/// and derived fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMetrics {
    pub randread_bandwidth_kbps: f64,
    pub randread_iops: f64,
    pub randread_latency: LatencyStats,
    pub seqread_bandwidth_kbps: f64,
    pub seqwrite_bandwidth_kbps: f64,
    /// Random-read P99 of the optimal and sub-optimal knee points, in ns.
    pub optimal_p99_ns: f64,
    pub sub_optimal_p99_ns: f64,
    pub stream_limit_mbps: Option<u32>,
    pub optimal_mixed_workload_name: Option<String>,
    pub optimal_blocksize: Option<String>,
    pub total_workloads: usize,
}

fn latency_ms(ns: Option<f64>) -> f64 {
    ns.map(ns_to_ms).unwrap_or(0.0)
}

fn ratio_if_positive(numerator: f64, denominator: f64) -> f64 {
    if numerator > 0.0 && denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

impl SystemMetrics {
    /// Convert raw values and compute every derived field in one step.
    pub fn finalize(
        system_name: impl Into<String>,
        system_profile: impl Into<String>,
        raw: &RawMetrics,
    ) -> Self {
        let p50 = latency_ms(raw.randread_latency.p50_ns);
        let p99 = latency_ms(raw.randread_latency.p99_ns);

        let knee_increase = if raw.optimal_p99_ns > 0.0 && raw.sub_optimal_p99_ns > 0.0 {
            (raw.sub_optimal_p99_ns - raw.optimal_p99_ns) / raw.optimal_p99_ns * 100.0
        } else {
            0.0
        };

        Self {
            system_name: system_name.into(),
            system_profile: system_profile.into(),
            randread_throughput_mbps: kbps_to_mbps(raw.randread_bandwidth_kbps),
            randread_iops: raw.randread_iops,
            randread_latency_mean_ms: latency_ms(raw.randread_latency.mean_ns),
            randread_latency_p50_ms: p50,
            randread_latency_p95_ms: latency_ms(raw.randread_latency.p95_ns),
            randread_latency_p99_ms: p99,
            randread_latency_p99_p50_ratio: ratio_if_positive(p99, p50),
            seqread_throughput_mbps: kbps_to_mbps(raw.seqread_bandwidth_kbps),
            seqwrite_throughput_mbps: kbps_to_mbps(raw.seqwrite_bandwidth_kbps),
            knee_point_latency_increase_percent: knee_increase,
            optimal_stream_limit_mbps: raw.stream_limit_mbps.map(f64::from),
            optimal_mixed_workload_name: raw.optimal_mixed_workload_name.clone(),
            optimal_blocksize: raw.optimal_blocksize.clone(),
            total_workloads: raw.total_workloads,
        }
    }

    /// Look up a metric by its ranking-function name. Unknown names read as 0.0.
    pub fn metric_value(&self, name: &str) -> f64 {
        crate::metric_name::MetricName::parse(name).value(self)
    }

    /// Randread throughput in GB/s.
    pub fn randread_throughput_gbps(&self) -> f64 {
        self.randread_throughput_mbps / 1024.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawMetrics {
        RawMetrics {
            randread_bandwidth_kbps: 2_048_000.0,
            randread_iops: 500_000.0,
            randread_latency: LatencyStats {
                mean_ns: Some(90_000.0),
                p50_ns: Some(80_000.0),
                p95_ns: Some(150_000.0),
                p99_ns: Some(240_000.0),
            },
            seqread_bandwidth_kbps: 0.0,
            seqwrite_bandwidth_kbps: 1_024_000.0,
            optimal_p99_ns: 240_000.0,
            sub_optimal_p99_ns: 480_000.0,
            stream_limit_mbps: Some(100),
            optimal_mixed_workload_name: Some("mixed-302-16k_100Mseq".to_string()),
            optimal_blocksize: Some("16k".to_string()),
            total_workloads: 12,
        }
    }

    #[test]
    fn test_finalize_converts_units() {
        let m = SystemMetrics::finalize("host1", "nvme", &raw());
        assert_eq!(m.randread_throughput_mbps, 2000.0);
        assert_eq!(m.seqwrite_throughput_mbps, 1000.0);
        assert_eq!(m.randread_latency_p99_ms, 0.24);
        assert_eq!(m.randread_latency_p50_ms, 0.08);
        assert_eq!(m.optimal_stream_limit_mbps, Some(100.0));
        assert_eq!(m.total_workloads, 12);
    }

    #[test]
    fn test_finalize_derived_fields() {
        let m = SystemMetrics::finalize("host1", "nvme", &raw());
        assert!((m.randread_latency_p99_p50_ratio - 3.0).abs() < 1e-12);
        assert!((m.knee_point_latency_increase_percent - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_ratio_requires_both_percentiles() {
        let mut input = raw();
        input.randread_latency.p50_ns = None;
        let m = SystemMetrics::finalize("host1", "nvme", &input);
        assert_eq!(m.randread_latency_p50_ms, 0.0);
        assert_eq!(m.randread_latency_p99_p50_ratio, 0.0);
    }

    #[test]
    fn test_knee_increase_missing_without_points() {
        let mut input = raw();
        input.sub_optimal_p99_ns = 0.0;
        let m = SystemMetrics::finalize("host1", "nvme", &input);
        assert_eq!(m.knee_point_latency_increase_percent, 0.0);
    }

    #[test]
    fn test_serializes_snake_case_keys() {
        let m = SystemMetrics::finalize("host1", "nvme", &raw());
        let value = serde_json::to_value(&m).unwrap();
        assert_eq!(value["system_name"], "host1");
        assert_eq!(value["randread_throughput_mbps"], 2000.0);
        assert_eq!(value["optimal_stream_limit_mbps"], 100.0);
        assert!(value.get("randread_latency_p99_p50_ratio").is_some());
    }

    #[test]
    fn test_deserialize_tolerates_missing_fields() {
        let m: SystemMetrics =
            serde_json::from_str(r#"{"system_name": "old", "randread_iops": 10.0}"#).unwrap();
        assert_eq!(m.system_name, "old");
        assert_eq!(m.randread_iops, 10.0);
        assert_eq!(m.optimal_stream_limit_mbps, None);
    }
}
