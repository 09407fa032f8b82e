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

//! Metric extraction from the optimal mixed workload.

use crate::analysis::SystemAnalysis;
use crate::metrics::{RawMetrics, SystemMetrics};
use crate::workload::{IoMetrics, JobRole, WorkloadRecord};
use tracing::warn;

fn record_randread(raw: &mut RawMetrics, io: &IoMetrics) {
    raw.randread_bandwidth_kbps = io.bandwidth_kbps;
    raw.randread_iops = io.iops;
    raw.randread_latency = io.latency;
}

/// Collect component values from a mixed workload's jobs, in file order.
///
/// The first random-read job wins, the same job
/// [`WorkloadRecord::randread_job`] picks for knee detection. Later
/// sequential jobs overwrite earlier ones. When no job carries a recognised
/// role, the first job is read as the random-read component.
pub fn collect_component_values(record: &WorkloadRecord, raw: &mut RawMetrics) {
    let mut matched = false;
    let mut randread_seen = false;

    for job in record.components() {
        match job.role {
            JobRole::RandRead => {
                matched = true;
                if randread_seen {
                    continue;
                }
                randread_seen = true;
                if let Some(read) = &job.read {
                    record_randread(raw, read);
                }
            }
            JobRole::SeqRead => {
                matched = true;
                if let Some(read) = &job.read {
                    raw.seqread_bandwidth_kbps = read.bandwidth_kbps;
                }
            }
            JobRole::SeqWrite => {
                matched = true;
                if let Some(write) = &job.write {
                    raw.seqwrite_bandwidth_kbps = write.bandwidth_kbps;
                }
            }
            JobRole::Unknown => {}
        }
    }

    if !matched {
        warn!(
            file = record.filename(),
            "no randread/seqread/seqwrite job found; using first job as random read"
        );
        let first = record
            .components()
            .first()
            .and_then(|job| job.read.as_ref().or(job.write.as_ref()));
        if let Some(io) = first {
            record_randread(raw, io);
        }
    }
}

/// Gather the raw, unconverted values for a system.
pub fn collect_raw_metrics(analysis: &SystemAnalysis) -> RawMetrics {
    let mut raw = RawMetrics {
        total_workloads: analysis.total_workloads,
        optimal_blocksize: analysis
            .optimal_randread
            .as_ref()
            .map(|r| r.parameter().to_string()),
        ..RawMetrics::default()
    };

    let knee = &analysis.knee_point;
    if let Some(optimal) = knee.optimal_mixed() {
        collect_component_values(optimal, &mut raw);
        raw.optimal_p99_ns = optimal.randread_p99_ns();
        raw.stream_limit_mbps = optimal.stream_limit_mbps();
        raw.optimal_mixed_workload_name = Some(optimal.workload_name().to_string());
    }
    if let Some(sub_optimal) = knee.sub_optimal_mixed() {
        raw.sub_optimal_p99_ns = sub_optimal.randread_p99_ns();
    }

    raw
}

/// Build the persisted metrics record for an analyzed system.
///
/// Systems without an optimal mixed workload produce a record whose
/// component metrics are all 0.0, which disqualifies them when ranked.
pub fn extract_metrics(analysis: &SystemAnalysis) -> SystemMetrics {
    let raw = collect_raw_metrics(analysis);
    SystemMetrics::finalize(&analysis.system_name, &analysis.system_profile, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze_files;
    use serde_json::json;

    fn mixed_doc(p50_ms: f64, p99_ms: f64) -> String {
        json!({"jobs": [
            {"jobname": "randread", "read": {
                "bw": 204800.0,
                "iops": 51200.0,
                "clat_ns": {
                    "mean": p50_ms * 1.1e6,
                    "percentile": {
                        "50.000000": p50_ms * 1e6,
                        "95.000000": p99_ms * 0.8e6,
                        "99.000000": p99_ms * 1e6
                    }
                }
            }},
            {"jobname": "seqread", "read": {"bw": 1024000.0, "iops": 1000.0}},
            {"jobname": "seqwrite", "write": {"bw": 512000.0, "iops": 500.0}},
            {"jobname": "housekeeping", "read": {"bw": 1.0}}
        ]})
        .to_string()
    }

    fn system_files() -> Vec<(String, String)> {
        let randread =
            json!({"jobs": [{"jobname": "randread", "read": {"bw": 300000.0}}]}).to_string();
        vec![
            ("randread-101-16k.fio.json".to_string(), randread),
            ("mixed-301-16k_10Mseq.fio.json".to_string(), mixed_doc(50.0, 100.0)),
            ("mixed-302-16k_20Mseq.fio.json".to_string(), mixed_doc(52.5, 105.0)),
            ("mixed-303-16k_uncapped.fio.json".to_string(), mixed_doc(200.0, 400.0)),
        ]
    }

    #[test]
    fn test_extract_from_optimal_mixed() {
        let analysis = analyze_files("host1", "nvme", system_files());
        let m = extract_metrics(&analysis);

        assert_eq!(m.system_name, "host1");
        assert_eq!(m.system_profile, "nvme");
        assert_eq!(m.randread_throughput_mbps, 200.0);
        assert_eq!(m.randread_iops, 51200.0);
        assert_eq!(m.randread_latency_p99_ms, 105.0);
        assert_eq!(m.randread_latency_p50_ms, 52.5);
        assert!((m.randread_latency_p99_p50_ratio - 2.0).abs() < 1e-12);
        assert_eq!(m.seqread_throughput_mbps, 1000.0);
        assert_eq!(m.seqwrite_throughput_mbps, 500.0);
        assert_eq!(m.optimal_stream_limit_mbps, Some(20.0));
        assert_eq!(m.optimal_mixed_workload_name.as_deref(), Some("mixed-302-16k_20Mseq"));
        assert_eq!(m.optimal_blocksize.as_deref(), Some("16k"));
        assert_eq!(m.total_workloads, 4);
        assert!((m.knee_point_latency_increase_percent - 295.0 / 105.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_extract_without_knee_is_all_zero() {
        let mut files = system_files();
        files.truncate(2);
        let analysis = analyze_files("host1", "nvme", files);
        let m = extract_metrics(&analysis);
        assert_eq!(m.randread_throughput_mbps, 0.0);
        assert_eq!(m.randread_latency_p99_ms, 0.0);
        assert_eq!(m.knee_point_latency_increase_percent, 0.0);
        assert_eq!(m.optimal_stream_limit_mbps, None);
        assert_eq!(m.optimal_blocksize.as_deref(), Some("16k"));
    }

    #[test]
    fn test_fallback_uses_first_job() {
        let doc = json!({"jobs": [
            {"jobname": "job_a", "read": {"bw": 4096.0, "iops": 10.0,
                "clat_ns": {"percentile": {"50.000000": 1e6, "99.000000": 4e6}}}},
            {"jobname": "job_b", "read": {"bw": 999999.0}}
        ]})
        .to_string();
        let record = WorkloadRecord::from_json_str("mixed-301-4k_10Mseq.fio.json", &doc).unwrap();
        let mut raw = RawMetrics::default();
        collect_component_values(&record, &mut raw);
        assert_eq!(raw.randread_bandwidth_kbps, 4096.0);
        assert_eq!(raw.randread_latency.p99_ns, Some(4e6));
        assert_eq!(raw.seqread_bandwidth_kbps, 0.0);
    }

    #[test]
    fn test_sequential_roles_only_set_throughput() {
        let doc = json!({"jobs": [
            {"jobname": "seqread", "read": {"bw": 2048.0, "iops": 77.0,
                "clat_ns": {"percentile": {"99.000000": 9e6}}}}
        ]})
        .to_string();
        let record = WorkloadRecord::from_json_str("mixed-301-4k_10Mseq.fio.json", &doc).unwrap();
        let mut raw = RawMetrics::default();
        collect_component_values(&record, &mut raw);
        assert_eq!(raw.seqread_bandwidth_kbps, 2048.0);
        assert_eq!(raw.randread_iops, 0.0);
        assert_eq!(raw.randread_latency.p99_ns, None);
    }

    #[test]
    fn test_first_randread_job_wins() {
        let doc = json!({"jobs": [
            {"jobname": "randread_a", "read": {"bw": 4096.0,
                "clat_ns": {"percentile": {"50.000000": 1e6, "99.000000": 2e6}}}},
            {"jobname": "randread_b", "read": {"bw": 8192.0,
                "clat_ns": {"percentile": {"50.000000": 3e6, "99.000000": 7e6}}}}
        ]})
        .to_string();
        let record = WorkloadRecord::from_json_str("mixed-301-4k_10Mseq.fio.json", &doc).unwrap();
        let mut raw = RawMetrics::default();
        collect_component_values(&record, &mut raw);
        assert_eq!(raw.randread_bandwidth_kbps, 4096.0);
        assert_eq!(raw.randread_latency.p99_ns, Some(record.randread_p99_ns()));
        assert_eq!(raw.randread_latency.p99_ns, Some(2e6));
    }
}
