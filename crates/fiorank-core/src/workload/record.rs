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

//! Parsed workload records.

use crate::error::{FioRankError, Result};
use crate::units::sanitize_latency_ns;
use crate::workload::blocksize::{parse_blocksize, parse_stream_limit, size_token};
use crate::workload::filename::parse_workload_filename;
use crate::workload::raw::{FioDocument, FioIo, FioJob, FioLatency, P50_KEY, P95_KEY, P99_KEY};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Access pattern of a workload file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkloadKind {
    RandRead,
    SeqRead,
    SeqWrite,
    Mixed,
}

impl WorkloadKind {
    /// Parse the kind token of a filename (case-insensitive).
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "randread" => Some(Self::RandRead),
            "seqread" => Some(Self::SeqRead),
            "seqwrite" => Some(Self::SeqWrite),
            "mixed" => Some(Self::Mixed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RandRead => "randread",
            Self::SeqRead => "seqread",
            Self::SeqWrite => "seqwrite",
            Self::Mixed => "mixed",
        }
    }
}

impl fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role of a single job inside a workload, inferred from its job name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobRole {
    RandRead,
    SeqRead,
    SeqWrite,
    Unknown,
}

impl JobRole {
    /// Classify a job by case-insensitive substring match on its name.
    ///
    /// Total: every name maps to exactly one role.
    ///
    /// ```
    /// use fiorank_core::workload::JobRole;
    ///
    /// assert_eq!(JobRole::from_job_name("mixed_RandRead_4k"), JobRole::RandRead);
    /// assert_eq!(JobRole::from_job_name("stream-seqwrite"), JobRole::SeqWrite);
    /// assert_eq!(JobRole::from_job_name("warmup"), JobRole::Unknown);
    /// ```
    pub fn from_job_name(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        if lower.contains("randread") {
            Self::RandRead
        } else if lower.contains("seqread") {
            Self::SeqRead
        } else if lower.contains("seqwrite") {
            Self::SeqWrite
        } else {
            Self::Unknown
        }
    }
}

/// Completion latency statistics in nanoseconds.
///
/// Corrupt samples (negative or at least 10 s) are dropped and read as `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LatencyStats {
    pub mean_ns: Option<f64>,
    pub p50_ns: Option<f64>,
    pub p95_ns: Option<f64>,
    pub p99_ns: Option<f64>,
}

impl LatencyStats {
    fn from_raw(raw: &FioLatency) -> Self {
        Self {
            mean_ns: sanitize_latency_ns(raw.mean),
            p50_ns: sanitize_latency_ns(raw.percentile(P50_KEY)),
            p95_ns: sanitize_latency_ns(raw.percentile(P95_KEY)),
            p99_ns: sanitize_latency_ns(raw.percentile(P99_KEY)),
        }
    }
}

/// Metrics of one direction (read or write) of a job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IoMetrics {
    pub bandwidth_kbps: f64,
    pub iops: f64,
    pub io_bytes: u64,
    pub latency: LatencyStats,
}

impl IoMetrics {
    fn from_raw(raw: &FioIo) -> Self {
        Self {
            bandwidth_kbps: raw.bw.max(0.0),
            iops: raw.iops.max(0.0),
            io_bytes: raw.io_bytes,
            latency: raw
                .clat_ns
                .as_ref()
                .map(LatencyStats::from_raw)
                .unwrap_or_default(),
        }
    }
}

/// One job of a workload, tagged with its inferred role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMetrics {
    pub name: String,
    pub role: JobRole,
    pub read: Option<IoMetrics>,
    pub write: Option<IoMetrics>,
}

impl JobMetrics {
    fn from_raw(raw: &FioJob) -> Self {
        Self {
            name: raw.jobname.clone(),
            role: JobRole::from_job_name(&raw.jobname),
            read: raw.read.as_ref().map(IoMetrics::from_raw),
            write: raw.write.as_ref().map(IoMetrics::from_raw),
        }
    }
}

/// One parsed workload result file. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadRecord {
    filename: String,
    kind: WorkloadKind,
    test_id: String,
    test_number: u32,
    parameter: String,
    components: Vec<JobMetrics>,
}

impl WorkloadRecord {
    /// Parse a workload from its filename and fio JSON content.
    ///
    /// # Errors
    ///
    /// Returns [`FioRankError::Parse`] for malformed filenames, invalid JSON,
    /// or a document without a `jobs` array.
    ///
    /// # Examples
    ///
    /// ```
    /// use fiorank_core::WorkloadRecord;
    ///
    /// let json = r#"{"jobs":[{"jobname":"randread","read":{"bw":2048,"iops":512}}]}"#;
    /// let record = WorkloadRecord::from_json_str("randread-102-4k.fio.json", json).unwrap();
    /// assert_eq!(record.series(), 1);
    /// assert_eq!(record.read_bandwidth_kbps(), Some(2048.0));
    /// ```
    pub fn from_json_str(filename: &str, content: &str) -> Result<Self> {
        let document: FioDocument = serde_json::from_str(content)
            .map_err(|e| FioRankError::parse(filename, format!("invalid JSON: {}", e)))?;
        Self::from_document(filename, &document)
    }

    /// Build a record from an already-deserialized fio document.
    pub fn from_document(filename: &str, document: &FioDocument) -> Result<Self> {
        let name = parse_workload_filename(filename)?;
        let jobs = document
            .jobs
            .as_ref()
            .ok_or_else(|| FioRankError::parse(&name.filename, "missing jobs array"))?;

        let components: Vec<JobMetrics> = jobs.iter().map(JobMetrics::from_raw).collect();
        debug!(
            file = %name.filename,
            kind = %name.kind,
            jobs = components.len(),
            "parsed workload"
        );

        Ok(Self {
            filename: name.filename,
            kind: name.kind,
            test_id: name.test_id,
            test_number: name.test_number,
            parameter: name.parameter,
            components,
        })
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn kind(&self) -> WorkloadKind {
        self.kind
    }

    pub fn test_id(&self) -> &str {
        &self.test_id
    }

    /// Leading digit of a three-digit test id.
    pub fn series(&self) -> u32 {
        self.test_number / 100
    }

    pub fn parameter(&self) -> &str {
        &self.parameter
    }

    pub fn components(&self) -> &[JobMetrics] {
        &self.components
    }

    /// Filename without the `.fio.json` / `.json` extension.
    pub fn workload_name(&self) -> &str {
        self.filename
            .strip_suffix(".fio.json")
            .or_else(|| self.filename.strip_suffix(".json"))
            .unwrap_or(&self.filename)
    }

    /// The job whose read side represents random-read behaviour: the first
    /// randread-tagged job, falling back to the first job.
    pub fn randread_job(&self) -> Option<&JobMetrics> {
        self.components
            .iter()
            .find(|job| job.role == JobRole::RandRead)
            .or_else(|| self.components.first())
    }

    /// Read side of [`Self::randread_job`], if the job has one.
    pub fn randread_metrics(&self) -> Option<&IoMetrics> {
        self.randread_job().and_then(|job| job.read.as_ref())
    }

    pub fn read_bandwidth_kbps(&self) -> Option<f64> {
        self.randread_metrics().map(|m| m.bandwidth_kbps)
    }

    /// Random-read P99 in nanoseconds; 0.0 when missing or corrupt.
    pub fn randread_p99_ns(&self) -> f64 {
        self.randread_metrics()
            .and_then(|m| m.latency.p99_ns)
            .unwrap_or(0.0)
    }

    /// Blocksize in bytes of the size token preceding any `_`.
    pub fn blocksize_bytes(&self) -> f64 {
        parse_blocksize(size_token(&self.parameter))
    }

    /// Streaming limit in MB/s, `None` when uncapped.
    pub fn stream_limit_mbps(&self) -> Option<u32> {
        parse_stream_limit(&self.parameter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mixed_doc() -> String {
        json!({
            "jobs": [
                {
                    "jobname": "seqwrite_stream",
                    "write": {"bw": 10240, "iops": 10, "io_bytes": 1024}
                },
                {
                    "jobname": "randread_4k",
                    "read": {
                        "bw": 4096,
                        "iops": 1024,
                        "io_bytes": 4096,
                        "clat_ns": {
                            "mean": 120000.0,
                            "percentile": {
                                "50.000000": 100000,
                                "95.000000": 200000,
                                "99.000000": 20000000000u64
                            }
                        }
                    }
                }
            ]
        })
        .to_string()
    }

    #[test]
    fn test_from_json_str_tags_roles() {
        let record =
            WorkloadRecord::from_json_str("mixed-301-4k_10Mseq.fio.json", &mixed_doc()).unwrap();
        assert_eq!(record.kind(), WorkloadKind::Mixed);
        assert_eq!(record.series(), 3);
        assert_eq!(record.components().len(), 2);
        assert_eq!(record.components()[0].role, JobRole::SeqWrite);
        assert_eq!(record.components()[1].role, JobRole::RandRead);
        assert_eq!(record.stream_limit_mbps(), Some(10));
        assert_eq!(record.blocksize_bytes(), 4096.0);
    }

    #[test]
    fn test_corrupt_latency_discarded() {
        let record =
            WorkloadRecord::from_json_str("mixed-301-4k_10Mseq.fio.json", &mixed_doc()).unwrap();
        let latency = record.randread_metrics().unwrap().latency;
        assert_eq!(latency.p50_ns, Some(100_000.0));
        assert_eq!(latency.p99_ns, None);
        assert_eq!(record.randread_p99_ns(), 0.0);
    }

    #[test]
    fn test_randread_job_falls_back_to_first_job() {
        let json = json!({"jobs": [
            {
                "jobname": "job0",
                "read": {"bw": 100, "clat_ns": {"percentile": {"99.000000": 5000}}}
            },
            {"jobname": "job1", "read": {"bw": 900}}
        ]})
        .to_string();
        let record = WorkloadRecord::from_json_str("randread-101-4k.fio.json", &json).unwrap();
        assert_eq!(record.randread_job().unwrap().name, "job0");
        assert_eq!(record.read_bandwidth_kbps(), Some(100.0));
        assert_eq!(record.randread_p99_ns(), 5000.0);
    }

    #[test]
    fn test_missing_jobs_is_parse_error() {
        let err = WorkloadRecord::from_json_str("randread-101-4k.fio.json", "{}").unwrap_err();
        assert_eq!(
            err,
            FioRankError::parse("randread-101-4k.fio.json", "missing jobs array")
        );
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err =
            WorkloadRecord::from_json_str("randread-101-4k.fio.json", "{\"jobs\": [").unwrap_err();
        assert!(matches!(err, FioRankError::Parse { .. }));
        assert!(err.to_string().contains("invalid JSON"));
    }

    #[test]
    fn test_empty_jobs_has_no_randread_job() {
        let record =
            WorkloadRecord::from_json_str("randread-101-4k.fio.json", r#"{"jobs": []}"#).unwrap();
        assert!(record.randread_job().is_none());
        assert_eq!(record.read_bandwidth_kbps(), None);
    }

    #[test]
    fn test_workload_name_strips_extension() {
        let record =
            WorkloadRecord::from_json_str("seqread-201-1M.json", r#"{"jobs": []}"#).unwrap();
        assert_eq!(record.workload_name(), "seqread-201-1M");
    }

    #[test]
    fn test_job_role_is_total() {
        assert_eq!(JobRole::from_job_name(""), JobRole::Unknown);
        assert_eq!(JobRole::from_job_name("SEQREAD"), JobRole::SeqRead);
        assert_eq!(JobRole::from_job_name("randread+seqwrite"), JobRole::RandRead);
    }
}
