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

//! Markdown report rendering.

use super::sparkline::{labeled_sparkline, log_sparkline, sparkline};
use fiorank_core::knee::KNEE_THRESHOLD;
use fiorank_core::units::{kbps_to_mbps, ns_to_ms};
use fiorank_core::{
    KneeStatus, MetricSummary, ScoringResult, SystemAnalysis, SystemMetrics,
    SystemProfileMetrics, WorkloadRecord,
};

fn opt_ms(ns: Option<f64>) -> String {
    ns.map(|v| format!("{:.3}", ns_to_ms(v)))
        .unwrap_or_else(|| "N/A".to_string())
}

fn stream_limit_label(record: &WorkloadRecord) -> String {
    record
        .stream_limit_mbps()
        .map(|l| format!("{} MB/s", l))
        .unwrap_or_else(|| "Uncapped".to_string())
}

fn randread_table(md: &mut String, analysis: &SystemAnalysis) {
    md.push_str("### Optimal Blocksize\n\n");
    if analysis.all_randread_results.is_empty() {
        md.push_str("*No random-read workloads found.*\n\n");
        return;
    }

    let optimal = analysis.optimal_randread.as_ref().map(WorkloadRecord::filename);
    md.push_str("| Workload | Blocksize | Throughput (MB/s) | IOPS | P99 (ms) |\n");
    md.push_str("|----------|-----------|-------------------|------|----------|\n");
    for record in &analysis.all_randread_results {
        let io = record.randread_metrics();
        let name = if Some(record.filename()) == optimal {
            format!("**{}** (optimal)", record.workload_name())
        } else {
            record.workload_name().to_string()
        };
        md.push_str(&format!(
            "| {} | {} | {:.1} | {:.0} | {} |\n",
            name,
            record.parameter(),
            kbps_to_mbps(io.map(|m| m.bandwidth_kbps).unwrap_or(0.0)),
            io.map(|m| m.iops).unwrap_or(0.0),
            opt_ms(io.and_then(|m| m.latency.p99_ns)),
        ));
    }
    md.push('\n');
}

fn mixed_table(md: &mut String, analysis: &SystemAnalysis) {
    md.push_str("### Matching Mixed Series\n\n");
    let Some(series) = analysis.matching_series else {
        md.push_str("*No matching mixed workload series found.*\n\n");
        return;
    };

    md.push_str(&format!(
        "Series **{}xx**, {} workload(s), ordered by streaming limit.\n\n",
        series,
        analysis.knee_point.series.len()
    ));
    md.push_str("| Workload | Streaming Limit | P50 (ms) | P95 (ms) | P99 (ms) |\n");
    md.push_str("|----------|-----------------|----------|----------|----------|\n");
    for record in &analysis.knee_point.series {
        let latency = record.randread_metrics().map(|m| m.latency).unwrap_or_default();
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            record.workload_name(),
            stream_limit_label(record),
            opt_ms(latency.p50_ns),
            opt_ms(latency.p95_ns),
            opt_ms(latency.p99_ns),
        ));
    }
    md.push('\n');
}

fn knee_section(md: &mut String, analysis: &SystemAnalysis) {
    let knee = &analysis.knee_point;
    md.push_str("### Knee Point\n\n");
    md.push_str(&format!("**Status**: {}\n\n", knee.message()));

    if let (KneeStatus::Found { increase, .. }, Some(optimal), Some(sub_optimal)) =
        (&knee.status, knee.optimal_mixed(), knee.sub_optimal_mixed())
    {
        let optimal_p99 = ns_to_ms(optimal.randread_p99_ns());
        let sub_p99 = ns_to_ms(sub_optimal.randread_p99_ns());
        md.push_str(&format!(
            "- **Optimal**: `{}` ({})\n",
            optimal.filename(),
            stream_limit_label(optimal)
        ));
        md.push_str(&format!(
            "- **Sub-optimal**: `{}` ({})\n",
            sub_optimal.filename(),
            stream_limit_label(sub_optimal)
        ));
        md.push_str(&format!(
            "- **Calculation**: ({:.3} ms - {:.3} ms) / {:.3} ms = {:.1}% (threshold {:.0}%)\n\n",
            sub_p99,
            optimal_p99,
            optimal_p99,
            increase * 100.0,
            KNEE_THRESHOLD * 100.0
        ));
    }

    if knee.series.is_empty() {
        return;
    }
    let column = |f: fn(&fiorank_core::workload::LatencyStats) -> Option<f64>| -> Vec<f64> {
        knee.series
            .iter()
            .map(|r| {
                r.randread_metrics()
                    .and_then(|m| f(&m.latency))
                    .map(ns_to_ms)
                    .unwrap_or(0.0)
            })
            .collect()
    };
    let p50 = column(|l| l.p50_ns);
    let p95 = column(|l| l.p95_ns);
    let p99 = column(|l| l.p99_ns);

    md.push_str("#### Latency Progression\n\n");
    md.push_str("| Quantile | Linear | Logarithmic |\n");
    md.push_str("|----------|--------|-------------|\n");
    for (label, values) in [("P50", &p50), ("P95", &p95), ("P99", &p99)] {
        md.push_str(&format!(
            "| {} | {} | {} |\n",
            label,
            labeled_sparkline(values, "ms"),
            log_sparkline(values)
        ));
    }
    md.push('\n');
}

fn metrics_table(md: &mut String, m: &SystemMetrics) {
    md.push_str("### Extracted Metrics\n\n");
    md.push_str("| Metric | Value |\n");
    md.push_str("|--------|-------|\n");
    let rows: [(&str, String); 12] = [
        ("Random-read throughput", format!("{:.1} MB/s", m.randread_throughput_mbps)),
        ("Random-read IOPS", format!("{:.0}", m.randread_iops)),
        ("Latency mean", format!("{:.3} ms", m.randread_latency_mean_ms)),
        ("Latency P50", format!("{:.3} ms", m.randread_latency_p50_ms)),
        ("Latency P95", format!("{:.3} ms", m.randread_latency_p95_ms)),
        ("Latency P99", format!("{:.3} ms", m.randread_latency_p99_ms)),
        ("P99/P50 ratio", format!("{:.2}", m.randread_latency_p99_p50_ratio)),
        ("Sequential read", format!("{:.1} MB/s", m.seqread_throughput_mbps)),
        ("Sequential write", format!("{:.1} MB/s", m.seqwrite_throughput_mbps)),
        ("Knee latency increase", format!("{:.1}%", m.knee_point_latency_increase_percent)),
        (
            "Optimal streaming limit",
            m.optimal_stream_limit_mbps
                .map(|l| format!("{:.0} MB/s", l))
                .unwrap_or_else(|| "N/A".to_string()),
        ),
        (
            "Optimal blocksize",
            m.optimal_blocksize.clone().unwrap_or_else(|| "N/A".to_string()),
        ),
    ];
    for (label, value) in rows {
        md.push_str(&format!("| {} | {} |\n", label, value));
    }
    md.push('\n');
}

/// Per-system report: selection tables, knee point, metrics, sparklines.
pub fn render_system_report(analysis: &SystemAnalysis, metrics: &SystemMetrics) -> String {
    let mut md = String::new();

    md.push_str(&format!("# System Report: {}\n\n", analysis.system_name));
    md.push_str(&format!("**Profile**: {}\n", analysis.system_profile));
    md.push_str(&format!("**Workloads parsed**: {}\n", analysis.total_workloads));
    md.push_str(&format!("**Files skipped**: {}\n\n", analysis.skipped_files.len()));

    if !analysis.notes.is_empty() {
        md.push_str("## Notes\n\n");
        for note in &analysis.notes {
            md.push_str(&format!("- {}\n", note));
        }
        md.push('\n');
    }

    md.push_str("## Analysis\n\n");
    randread_table(&mut md, analysis);
    mixed_table(&mut md, analysis);
    knee_section(&mut md, analysis);
    metrics_table(&mut md, metrics);

    if !analysis.skipped_files.is_empty() {
        md.push_str("## Skipped Files\n\n");
        for err in &analysis.skipped_files {
            md.push_str(&format!("- {}\n", err));
        }
        md.push('\n');
    }

    md
}

fn summary_row(md: &mut String, label: &str, unit: &str, summary: &MetricSummary) {
    md.push_str(&format!(
        "| {} | {:.3}{} | {:.3}{} | {:.3}{} | {:.2}x | {} |\n",
        label,
        summary.average,
        unit,
        summary.minimum,
        unit,
        summary.maximum,
        unit,
        summary.range_factor,
        summary.samples
    ));
}

/// Profile report: summary table plus one row per system.
pub fn render_profile_report(profile: &SystemProfileMetrics, systems: &[SystemMetrics]) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Profile Report: {}\n\n", profile.profile_name));
    md.push_str(&format!("**Systems**: {}\n", profile.total_systems));
    md.push_str(&format!(
        "**Best system**: {} ({:.1} MB/s)\n",
        profile.best_system_name, profile.best_system_randread_throughput_mbps
    ));
    md.push_str(&format!("**Generated**: {}\n\n", profile.analysis_timestamp));

    md.push_str("## Summary\n\n");
    md.push_str("| Metric | Average | Minimum | Maximum | Range | Samples |\n");
    md.push_str("|--------|---------|---------|---------|-------|---------|\n");
    summary_row(&mut md, "Random-read throughput", " MB/s", &profile.randread_throughput_mbps);
    summary_row(&mut md, "Random-read IOPS", "", &profile.randread_iops);
    summary_row(&mut md, "Latency P50", " ms", &profile.randread_latency_p50_ms);
    summary_row(&mut md, "Latency P95", " ms", &profile.randread_latency_p95_ms);
    summary_row(&mut md, "Latency P99", " ms", &profile.randread_latency_p99_ms);
    summary_row(&mut md, "P99/P50 ratio", "", &profile.randread_latency_p99_p50_ratio);
    summary_row(&mut md, "Sequential read", " MB/s", &profile.seqread_throughput_mbps);
    summary_row(&mut md, "Sequential write", " MB/s", &profile.seqwrite_throughput_mbps);
    md.push('\n');

    md.push_str("## Systems\n\n");
    md.push_str("| System | Throughput (MB/s) | IOPS | P99 (ms) | Knee (%) | Blocksize |\n");
    md.push_str("|--------|-------------------|------|----------|----------|-----------|\n");
    for m in systems {
        md.push_str(&format!(
            "| {} | {:.1} | {:.0} | {:.3} | {:.1} | {} |\n",
            m.system_name,
            m.randread_throughput_mbps,
            m.randread_iops,
            m.randread_latency_p99_ms,
            m.knee_point_latency_increase_percent,
            m.optimal_blocksize.as_deref().unwrap_or("N/A"),
        ));
    }
    let throughputs: Vec<f64> = systems.iter().map(|m| m.randread_throughput_mbps).collect();
    md.push_str(&format!("\nThroughput across systems: {}\n", sparkline(&throughputs)));

    md
}

/// Ranking report: table followed by each system's explanation.
pub fn render_ranking_report(
    function: &str,
    description: &str,
    results: &[ScoringResult],
) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Ranking: {}\n\n", function));
    md.push_str(&format!("{}\n\n", description));

    md.push_str("| Rank | System | Profile | Score | Disqualified |\n");
    md.push_str("|------|--------|---------|-------|--------------|\n");
    for (i, result) in results.iter().enumerate() {
        md.push_str(&format!(
            "| {} | {} | {} | {:.6} | {} |\n",
            i + 1,
            result.system_name,
            result.system_profile,
            result.total_score,
            if result.disqualified { "yes" } else { "no" }
        ));
    }
    md.push('\n');

    md.push_str("## Explanations\n\n");
    for result in results {
        md.push_str("```text\n");
        md.push_str(&result.explanation);
        md.push_str("\n```\n\n");
    }

    md
}

/// Throughput class of a system: above 5000 MB/s is High, above 1000 MB/s
/// is Medium, everything else is Low.
pub fn performance_class(throughput_mbps: f64) -> &'static str {
    if throughput_mbps > 5000.0 {
        "High"
    } else if throughput_mbps > 1000.0 {
        "Medium"
    } else {
        "Low"
    }
}

/// Comparison across every profile of a run.
///
/// `systems` holds the metrics of all profiles; the overall table ranks
/// them by random-read throughput.
pub fn render_cross_profile_report(
    profiles: &[SystemProfileMetrics],
    systems: &[SystemMetrics],
) -> String {
    let mut md = String::new();

    md.push_str("# Cross-Profile Comparison\n\n");
    md.push_str(&format!("**Profiles**: {}\n", profiles.len()));
    md.push_str(&format!("**Systems**: {}\n\n", systems.len()));

    md.push_str("## Key Performance Indicators by Profile\n\n");
    md.push_str(
        "| Profile | Systems | Avg Throughput | Max Throughput | Avg P99 Latency | Best System |\n",
    );
    md.push_str(
        "|---------|---------|----------------|----------------|-----------------|-------------|\n",
    );
    for profile in profiles {
        md.push_str(&format!(
            "| **{}** | {} | {:.1} MB/s | {:.1} MB/s | {:.3} ms | `{}` |\n",
            profile.profile_name,
            profile.total_systems,
            profile.randread_throughput_mbps.average,
            profile.randread_throughput_mbps.maximum,
            profile.randread_latency_p99_ms.average,
            profile.best_system_name,
        ));
    }
    md.push('\n');

    let mut by_throughput: Vec<&SystemMetrics> = systems.iter().collect();
    by_throughput.sort_by(|a, b| {
        b.randread_throughput_mbps
            .total_cmp(&a.randread_throughput_mbps)
    });

    md.push_str("## Overall System Ranking by Throughput\n\n");
    md.push_str("| Rank | System | Profile | Throughput | P99 Latency | Performance Class |\n");
    md.push_str("|------|--------|---------|------------|-------------|-------------------|\n");
    for (i, m) in by_throughput.iter().enumerate() {
        md.push_str(&format!(
            "| {} | `{}` | **{}** | {:.1} MB/s ({:.2} GB/s) | {:.3} ms | **{}** |\n",
            i + 1,
            m.system_name,
            m.system_profile,
            m.randread_throughput_mbps,
            m.randread_throughput_mbps / 1024.0,
            m.randread_latency_p99_ms,
            performance_class(m.randread_throughput_mbps),
        ));
    }
    md.push('\n');

    let mut by_average: Vec<&SystemProfileMetrics> = profiles.iter().collect();
    by_average.sort_by(|a, b| {
        b.randread_throughput_mbps
            .average
            .total_cmp(&a.randread_throughput_mbps.average)
    });

    md.push_str("## Profile Performance Summary\n\n");
    for (i, profile) in by_average.iter().enumerate() {
        let average = profile.randread_throughput_mbps.average;
        md.push_str(&format!(
            "{}. **{}** - average {:.1} MB/s ({:.2} GB/s)\n",
            i + 1,
            profile.profile_name,
            average,
            average / 1024.0
        ));
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use fiorank_core::{
        aggregate_profile, analyze_files, extract_metrics, score_and_rank, ScoringConfiguration,
    };
    use serde_json::json;

    fn doc(bw: f64, p99_ms: f64) -> String {
        json!({"jobs": [{"jobname": "randread", "read": {
            "bw": bw,
            "iops": bw / 4.0,
            "clat_ns": {"percentile": {"50.000000": p99_ms * 5e5, "99.000000": p99_ms * 1e6}}
        }}]})
        .to_string()
    }

    fn analysis() -> SystemAnalysis {
        analyze_files(
            "host1",
            "nvme",
            vec![
                ("randread-101-4k.fio.json".to_string(), doc(100_000.0, 0.2)),
                ("randread-102-16k.fio.json".to_string(), doc(400_000.0, 0.3)),
                ("mixed-301-16k_10Mseq.fio.json".to_string(), doc(204_800.0, 1.0)),
                ("mixed-302-16k_20Mseq.fio.json".to_string(), doc(204_800.0, 1.1)),
                ("mixed-303-16k_uncapped.fio.json".to_string(), doc(204_800.0, 4.0)),
            ],
        )
    }

    #[test]
    fn test_system_report_sections() {
        let analysis = analysis();
        let metrics = extract_metrics(&analysis);
        let md = render_system_report(&analysis, &metrics);

        assert!(md.starts_with("# System Report: host1\n"));
        assert!(md.contains("| **randread-102-16k** (optimal) | 16k |"));
        assert!(md.contains("Series **3xx**"));
        assert!(md.contains("| mixed-303-16k_uncapped | Uncapped |"));
        assert!(md.contains("**Status**: Knee point analysis complete"));
        assert!(md.contains("`mixed-302-16k_20Mseq.fio.json` (20 MB/s)"));
        assert!(md.contains("#### Latency Progression"));
        assert!(md.contains("| Optimal streaming limit | 20 MB/s |"));
        assert!(!md.contains("## Notes"));
    }

    #[test]
    fn test_system_report_without_mixed() {
        let analysis = analyze_files(
            "solo",
            "nvme",
            vec![("randread-101-4k.fio.json".to_string(), doc(1000.0, 0.2))],
        );
        let md = render_system_report(&analysis, &extract_metrics(&analysis));
        assert!(md.contains("## Notes"));
        assert!(md.contains("*No matching mixed workload series found.*"));
        assert!(!md.contains("#### Latency Progression"));
    }

    #[test]
    fn test_profile_and_ranking_reports() {
        let metrics = vec![extract_metrics(&analysis())];
        let profile = aggregate_profile("nvme", &metrics).unwrap();
        let md = render_profile_report(&profile, &metrics);
        assert!(md.contains("# Profile Report: nvme"));
        assert!(md.contains("**Best system**: host1 (200.0 MB/s)"));
        assert!(md.contains("| host1 | 200.0 |"));

        let config = ScoringConfiguration::builtin_default();
        let ranked = score_and_rank(&metrics, &config);
        let md = render_ranking_report("default", &config.description, &ranked);
        assert!(md.contains("| 1 | host1 | nvme |"));
        assert!(md.contains("Scoring breakdown for host1:"));
    }

    fn system(profile: &str, name: &str, throughput: f64, p99_ms: f64) -> SystemMetrics {
        SystemMetrics {
            system_name: name.to_string(),
            system_profile: profile.to_string(),
            randread_throughput_mbps: throughput,
            randread_latency_p99_ms: p99_ms,
            ..SystemMetrics::default()
        }
    }

    #[test]
    fn test_performance_class_boundaries() {
        assert_eq!(performance_class(6000.0), "High");
        assert_eq!(performance_class(5000.0), "Medium");
        assert_eq!(performance_class(1000.5), "Medium");
        assert_eq!(performance_class(1000.0), "Low");
        assert_eq!(performance_class(0.0), "Low");
    }

    #[test]
    fn test_cross_profile_report() {
        let nvme = vec![system("nvme", "fast", 6144.0, 0.2), system("nvme", "mid", 2048.0, 0.4)];
        let sata = vec![system("sata", "slow", 512.0, 2.0)];
        let profiles = vec![
            aggregate_profile("sata", &sata).unwrap(),
            aggregate_profile("nvme", &nvme).unwrap(),
        ];
        let all: Vec<SystemMetrics> = sata.iter().chain(&nvme).cloned().collect();

        let md = render_cross_profile_report(&profiles, &all);
        assert!(md.starts_with("# Cross-Profile Comparison\n"));
        assert!(md.contains("| **nvme** | 2 | 4096.0 MB/s | 6144.0 MB/s | 0.300 ms | `fast` |"));
        assert!(md.contains("| **sata** | 1 | 512.0 MB/s | 512.0 MB/s | 2.000 ms | `slow` |"));
        assert!(md.contains(
            "| 1 | `fast` | **nvme** | 6144.0 MB/s (6.00 GB/s) | 0.200 ms | **High** |"
        ));
        assert!(md.contains(
            "| 2 | `mid` | **nvme** | 2048.0 MB/s (2.00 GB/s) | 0.400 ms | **Medium** |"
        ));
        assert!(md.contains(
            "| 3 | `slow` | **sata** | 512.0 MB/s (0.50 GB/s) | 2.000 ms | **Low** |"
        ));

        let nvme_pos = md.find("1. **nvme** - average 4096.0 MB/s (4.00 GB/s)").unwrap();
        let sata_pos = md.find("2. **sata** - average 512.0 MB/s (0.50 GB/s)").unwrap();
        assert!(nvme_pos < sata_pos);
    }
}
