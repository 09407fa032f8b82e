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

//! Scoring and analysis benchmarks.
//!
//! Measures per-system analysis of a full workload directory and ranking
//! of populations up to a few thousand systems.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fiorank_core::{analyze_files, extract_metrics, score_and_rank, ScoringConfiguration};
use fiorank_test::{scenarios, MetricsBuilder};

fn population(size: usize) -> Vec<fiorank_core::SystemMetrics> {
    (0..size)
        .map(|i| {
            let spread = (i % 97) as f64;
            MetricsBuilder::new(format!("system_{:05}", i))
                .throughput_mbps(500.0 + spread * 30.0)
                .p99_ms(0.2 + spread / 100.0)
                .knee_percent(10.0 + spread)
                .build()
        })
        .collect()
}

// ============================================================================
// Ranking Benchmarks
// ============================================================================

fn bench_score_and_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("score_and_rank");
    let config = ScoringConfiguration::builtin_default();

    for size in [10usize, 100, 1_000, 5_000] {
        let systems = population(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &systems, |b, systems| {
            b.iter(|| score_and_rank(black_box(systems), black_box(&config)))
        });
    }

    group.finish();
}

// ============================================================================
// Analysis Benchmarks
// ============================================================================

fn bench_analyze_system(c: &mut Criterion) {
    let files = scenarios::knee_system();
    c.bench_function("analyze_knee_system", |b| {
        b.iter(|| {
            let analysis = analyze_files("bench", "nvme", black_box(files.clone()));
            extract_metrics(&analysis)
        })
    });
}

criterion_group!(benches, bench_score_and_rank, bench_analyze_system);
criterion_main!(benches);
