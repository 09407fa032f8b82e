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

//! Canned workload sets and metric populations.

use crate::builders::{FioDocumentBuilder, FioJobBuilder, MetricsBuilder};
use fiorank_core::SystemMetrics;
use std::fs;
use std::io;
use std::path::Path;

/// A workload file as `(filename, content)`.
pub type WorkloadFile = (String, String);

/// A random-read workload with a single `randread` job.
pub fn randread(test_id: u32, parameter: &str, bw_kbps: f64) -> WorkloadFile {
    let content = FioDocumentBuilder::new()
        .job(
            FioJobBuilder::new("randread")
                .read(bw_kbps, bw_kbps / 4.0)
                .read_latency_ms(0.08, 0.15, 0.25),
        )
        .to_json();
    (format!("randread-{}-{}.fio.json", test_id, parameter), content)
}

/// A sequential workload of the given kind (`seqread` or `seqwrite`).
pub fn sequential(kind: &str, test_id: u32, parameter: &str, bw_kbps: f64) -> WorkloadFile {
    let job = if kind == "seqwrite" {
        FioJobBuilder::new(kind).write(bw_kbps, bw_kbps / 1024.0)
    } else {
        FioJobBuilder::new(kind).read(bw_kbps, bw_kbps / 1024.0)
    };
    let content = FioDocumentBuilder::new().job(job).to_json();
    (format!("{}-{}-{}.fio.json", kind, test_id, parameter), content)
}

/// A mixed workload whose random-read job has the given P99 (ms).
///
/// Random-read bandwidth is 200 MiB/s with P50 at half the P99; the
/// sequential jobs run at 1000 MiB/s (read) and 500 MiB/s (write).
pub fn mixed(test_id: u32, parameter: &str, p99_ms: f64) -> WorkloadFile {
    let content = FioDocumentBuilder::new()
        .job(
            FioJobBuilder::new("randread")
                .read(204_800.0, 51_200.0)
                .read_latency_ms(p99_ms / 2.0, p99_ms * 0.8, p99_ms),
        )
        .job(FioJobBuilder::new("seqread").read(1_024_000.0, 1000.0))
        .job(FioJobBuilder::new("seqwrite").write(512_000.0, 500.0))
        .to_json();
    (format!("mixed-{}-{}.fio.json", test_id, parameter), content)
}

/// A complete system: three random-read blocksizes, sequential runs and
/// two mixed series. The 16k series is the match; its P99 goes
/// 100 ms, 105 ms, 400 ms across 10 MB/s, 20 MB/s and uncapped.
pub fn knee_system() -> Vec<WorkloadFile> {
    vec![
        randread(101, "4k", 100_000.0),
        randread(102, "16k", 500_000.0),
        randread(103, "1to4k", 300_000.0),
        sequential("seqread", 201, "1M", 3_072_000.0),
        sequential("seqwrite", 202, "1M", 2_048_000.0),
        mixed(301, "16k_10Mseq", 100.0),
        mixed(302, "16k_20Mseq", 105.0),
        mixed(303, "16k_uncapped", 400.0),
        mixed(401, "1M_10Mseq", 10.0),
        mixed(402, "1M_20Mseq", 90.0),
        mixed(403, "1M_uncapped", 95.0),
    ]
}

/// Same shape as [`knee_system`], scaled so that it ranks lower.
pub fn slower_system() -> Vec<WorkloadFile> {
    let slow_mixed = |id: u32, param: &str, p99_ms: f64| {
        let content = FioDocumentBuilder::new()
            .job(
                FioJobBuilder::new("randread")
                    .read(51_200.0, 12_800.0)
                    .read_latency_ms(p99_ms / 2.0, p99_ms * 0.8, p99_ms),
            )
            .job(FioJobBuilder::new("seqwrite").write(102_400.0, 100.0))
            .to_json();
        (format!("mixed-{}-{}.fio.json", id, param), content)
    };
    vec![
        randread(101, "4k", 50_000.0),
        randread(102, "16k", 80_000.0),
        slow_mixed(301, "16k_10Mseq", 200.0),
        slow_mixed(302, "16k_20Mseq", 210.0),
        slow_mixed(303, "16k_uncapped", 900.0),
    ]
}

/// A system whose mixed series never shows a knee.
pub fn flat_system() -> Vec<WorkloadFile> {
    vec![
        randread(101, "16k", 200_000.0),
        mixed(301, "16k_10Mseq", 100.0),
        mixed(302, "16k_20Mseq", 105.0),
        mixed(303, "16k_uncapped", 110.0),
    ]
}

/// Four systems with distinct trade-offs.
pub fn ranking_population() -> Vec<SystemMetrics> {
    vec![
        MetricsBuilder::new("high_perf")
            .throughput_mbps(3000.0)
            .p99_ms(0.3)
            .knee_percent(15.0)
            .build(),
        MetricsBuilder::new("medium_perf")
            .throughput_mbps(1500.0)
            .p99_ms(0.6)
            .knee_percent(30.0)
            .build(),
        MetricsBuilder::new("low_perf")
            .throughput_mbps(500.0)
            .p99_ms(0.8)
            .knee_percent(20.0)
            .build(),
        MetricsBuilder::new("high_throughput_bad_latency")
            .throughput_mbps(3500.0)
            .p99_ms(5.0)
            .knee_percent(120.0)
            .build(),
    ]
}

/// Write workload files into `dir`, creating it if needed.
pub fn write_workloads(dir: &Path, files: &[WorkloadFile]) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    for (name, content) in files {
        fs::write(dir.join(name), content)?;
    }
    Ok(())
}
