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

//! Metric names accepted in ranking functions.
//!
//! Names are matched case-insensitively against a fixed table. `optimal_*`
//! names are aliases of the corresponding `randread_*` metrics, and the
//! `_us` latency spellings resolve to the same stored millisecond values
//! as their `_ms` counterparts.

use crate::metrics::SystemMetrics;
use std::fmt;

/// Value reported for names that are not in the table.
pub const UNKNOWN_METRIC_VALUE: f64 = 0.0;

/// A metric a ranking component can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    RandreadThroughputMbps,
    RandreadThroughputGbps,
    RandreadIops,
    RandreadLatencyMean,
    RandreadLatencyP50,
    RandreadLatencyP95,
    RandreadLatencyP99,
    RandreadLatencyP99P50Ratio,
    SeqreadThroughputMbps,
    SeqwriteThroughputMbps,
    KneePointLatencyIncreasePercent,
    OptimalStreamLimitMbps,
    TotalWorkloads,
    Unknown,
}

impl MetricName {
    /// Every known metric, in display order.
    pub const ALL: [MetricName; 13] = [
        Self::RandreadThroughputMbps,
        Self::RandreadThroughputGbps,
        Self::RandreadIops,
        Self::RandreadLatencyMean,
        Self::RandreadLatencyP50,
        Self::RandreadLatencyP95,
        Self::RandreadLatencyP99,
        Self::RandreadLatencyP99P50Ratio,
        Self::SeqreadThroughputMbps,
        Self::SeqwriteThroughputMbps,
        Self::KneePointLatencyIncreasePercent,
        Self::OptimalStreamLimitMbps,
        Self::TotalWorkloads,
    ];

    /// Resolve a ranking-function metric name.
    ///
    /// ```
    /// use fiorank_core::MetricName;
    ///
    /// assert_eq!(MetricName::parse("Optimal_IOPS"), MetricName::RandreadIops);
    /// assert_eq!(MetricName::parse("randread_latency_p99_us"), MetricName::RandreadLatencyP99);
    /// assert_eq!(MetricName::parse("cpu_usage"), MetricName::Unknown);
    /// ```
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "randread_throughput_mbps" | "optimal_throughput_mbps" => Self::RandreadThroughputMbps,
            "randread_throughput_gbps" | "optimal_throughput_gbps" => Self::RandreadThroughputGbps,
            "randread_iops" | "optimal_iops" => Self::RandreadIops,
            "randread_latency_mean_ms"
            | "randread_latency_mean_us"
            | "optimal_latency_mean_ms"
            | "optimal_latency_mean_us" => Self::RandreadLatencyMean,
            "randread_latency_p50_ms"
            | "randread_latency_p50_us"
            | "optimal_latency_p50_ms"
            | "optimal_latency_p50_us" => Self::RandreadLatencyP50,
            "randread_latency_p95_ms"
            | "randread_latency_p95_us"
            | "optimal_latency_p95_ms"
            | "optimal_latency_p95_us" => Self::RandreadLatencyP95,
            "randread_latency_p99_ms"
            | "randread_latency_p99_us"
            | "optimal_latency_p99_ms"
            | "optimal_latency_p99_us" => Self::RandreadLatencyP99,
            "randread_latency_p99_p50_ratio" | "optimal_latency_p99_p50_ratio" => {
                Self::RandreadLatencyP99P50Ratio
            }
            "seqread_throughput_mbps" => Self::SeqreadThroughputMbps,
            "seqwrite_throughput_mbps" => Self::SeqwriteThroughputMbps,
            "knee_point_latency_increase_percent" => Self::KneePointLatencyIncreasePercent,
            "optimal_stream_limit_mbps" => Self::OptimalStreamLimitMbps,
            "total_workloads" => Self::TotalWorkloads,
            _ => Self::Unknown,
        }
    }

    /// The canonical name, as persisted in [`SystemMetrics`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RandreadThroughputMbps => "randread_throughput_mbps",
            Self::RandreadThroughputGbps => "randread_throughput_gbps",
            Self::RandreadIops => "randread_iops",
            Self::RandreadLatencyMean => "randread_latency_mean_ms",
            Self::RandreadLatencyP50 => "randread_latency_p50_ms",
            Self::RandreadLatencyP95 => "randread_latency_p95_ms",
            Self::RandreadLatencyP99 => "randread_latency_p99_ms",
            Self::RandreadLatencyP99P50Ratio => "randread_latency_p99_p50_ratio",
            Self::SeqreadThroughputMbps => "seqread_throughput_mbps",
            Self::SeqwriteThroughputMbps => "seqwrite_throughput_mbps",
            Self::KneePointLatencyIncreasePercent => "knee_point_latency_increase_percent",
            Self::OptimalStreamLimitMbps => "optimal_stream_limit_mbps",
            Self::TotalWorkloads => "total_workloads",
            Self::Unknown => "unknown",
        }
    }

    /// Read this metric from a system's metrics.
    pub fn value(&self, metrics: &SystemMetrics) -> f64 {
        match self {
            Self::RandreadThroughputMbps => metrics.randread_throughput_mbps,
            Self::RandreadThroughputGbps => metrics.randread_throughput_gbps(),
            Self::RandreadIops => metrics.randread_iops,
            Self::RandreadLatencyMean => metrics.randread_latency_mean_ms,
            Self::RandreadLatencyP50 => metrics.randread_latency_p50_ms,
            Self::RandreadLatencyP95 => metrics.randread_latency_p95_ms,
            Self::RandreadLatencyP99 => metrics.randread_latency_p99_ms,
            Self::RandreadLatencyP99P50Ratio => metrics.randread_latency_p99_p50_ratio,
            Self::SeqreadThroughputMbps => metrics.seqread_throughput_mbps,
            Self::SeqwriteThroughputMbps => metrics.seqwrite_throughput_mbps,
            Self::KneePointLatencyIncreasePercent => metrics.knee_point_latency_increase_percent,
            Self::OptimalStreamLimitMbps => metrics.optimal_stream_limit_mbps.unwrap_or(0.0),
            Self::TotalWorkloads => metrics.total_workloads as f64,
            Self::Unknown => UNKNOWN_METRIC_VALUE,
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SystemMetrics {
        SystemMetrics {
            system_name: "host1".to_string(),
            randread_throughput_mbps: 2048.0,
            randread_iops: 400_000.0,
            randread_latency_mean_ms: 0.09,
            randread_latency_p50_ms: 0.08,
            randread_latency_p95_ms: 0.15,
            randread_latency_p99_ms: 0.24,
            randread_latency_p99_p50_ratio: 3.0,
            seqread_throughput_mbps: 3000.0,
            seqwrite_throughput_mbps: 1500.0,
            knee_point_latency_increase_percent: 45.0,
            optimal_stream_limit_mbps: Some(200.0),
            total_workloads: 14,
            ..SystemMetrics::default()
        }
    }

    #[test]
    fn test_every_canonical_name_round_trips() {
        for metric in MetricName::ALL {
            assert_eq!(MetricName::parse(metric.as_str()), metric);
        }
    }

    #[test]
    fn test_aliases_read_same_field() {
        let m = sample();
        assert_eq!(m.metric_value("optimal_throughput_mbps"), 2048.0);
        assert_eq!(m.metric_value("optimal_throughput_gbps"), 2.0);
        assert_eq!(m.metric_value("OPTIMAL_IOPS"), 400_000.0);
        assert_eq!(m.metric_value("optimal_latency_p99_us"), 0.24);
        assert_eq!(m.metric_value("randread_latency_p99_ms"), 0.24);
        assert_eq!(m.metric_value("optimal_latency_p99_p50_ratio"), 3.0);
        assert_eq!(m.metric_value("optimal_latency_mean_ms"), 0.09);
        assert_eq!(m.metric_value("randread_latency_p95_us"), 0.15);
    }

    #[test]
    fn test_metadata_metrics() {
        let m = sample();
        assert_eq!(m.metric_value("knee_point_latency_increase_percent"), 45.0);
        assert_eq!(m.metric_value("optimal_stream_limit_mbps"), 200.0);
        assert_eq!(m.metric_value("total_workloads"), 14.0);
        assert_eq!(m.metric_value("seqwrite_throughput_mbps"), 1500.0);
    }

    #[test]
    fn test_uncapped_stream_limit_reads_zero() {
        let m = SystemMetrics {
            optimal_stream_limit_mbps: None,
            ..sample()
        };
        assert_eq!(m.metric_value("optimal_stream_limit_mbps"), 0.0);
    }

    #[test]
    fn test_unknown_metric_is_zero() {
        let m = sample();
        assert_eq!(m.metric_value("cpu_utilization"), UNKNOWN_METRIC_VALUE);
        assert_eq!(m.metric_value(""), UNKNOWN_METRIC_VALUE);
    }
}
