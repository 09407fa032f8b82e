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

//! The `analyze` command: discover, analyze, persist, aggregate, rank.

use super::write_output;
use crate::config::load_ranking_functions;
use crate::discovery::{discover_systems, SystemDir};
use crate::error::CliError;
use crate::pipeline::{run_pipeline, PipelineConfig, SystemOutcome};
use crate::report::{
    profile_report_name, ranking_report_name, render_cross_profile_report, render_profile_report,
    render_ranking_report, render_system_report, system_report_name, FailedSystem, Manifest,
    ManifestProfile, CROSS_PROFILE_REPORT, MANIFEST_FILE,
};
use crate::store::MetricsStore;
use colored::Colorize;
use fiorank_core::{aggregate_profile, score_and_rank, SystemMetrics};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{info, warn};

/// Options for [`analyze`].
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub root: PathBuf,
    pub report_dir: PathBuf,
    pub jobs: Option<usize>,
    pub ranking_function: Option<String>,
    pub ranking_file: Option<PathBuf>,
    /// Only analyze systems without persisted metrics.
    pub update: bool,
    pub quiet: bool,
    pub verbose: bool,
}

impl AnalyzeOptions {
    pub fn new(root: impl Into<PathBuf>, report_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            report_dir: report_dir.into(),
            jobs: None,
            ranking_function: None,
            ranking_file: None,
            update: false,
            quiet: false,
            verbose: false,
        }
    }
}

type SystemKey = (String, String);

fn key(system: &SystemDir) -> SystemKey {
    (system.profile.clone(), system.name.clone())
}

/// Split systems into previously persisted metrics (when updating) and
/// systems that still need analysis.
fn partition(
    systems: Vec<SystemDir>,
    store: &MetricsStore,
    update: bool,
) -> (HashMap<SystemKey, SystemMetrics>, Vec<SystemDir>) {
    let mut reused = HashMap::new();
    let mut pending = Vec::new();
    for system in systems {
        if update && store.contains_system(&system.profile, &system.name) {
            match store.load_system(&system.profile, &system.name) {
                Ok(metrics) => {
                    reused.insert(key(&system), metrics);
                    continue;
                }
                Err(e) => {
                    warn!(system = %system.name, "re-analyzing, stored metrics unreadable: {}", e)
                }
            }
        }
        pending.push(system);
    }
    (reused, pending)
}

/// Run a full analysis of `options.root` into `options.report_dir`.
///
/// # Errors
///
/// Returns `Err` for an unreadable root, a root without systems, or a
/// failure writing reports. Individual system failures are reported and
/// recorded in the manifest instead.
pub fn analyze(options: &AnalyzeOptions) -> Result<(), CliError> {
    let cwd = std::env::current_dir().map_err(|e| CliError::io_error(".", e))?;
    let (functions, origin) = load_ranking_functions(options.ranking_file.as_deref(), &cwd);
    let ranking = functions.resolve(options.ranking_function.as_deref());

    let discovery = discover_systems(&options.root)?;
    if discovery.is_empty() {
        return Err(CliError::invalid_input(format!(
            "no system directories with *.fio.json files found under '{}'",
            options.root.display()
        )));
    }
    info!(
        profiles = discovery.profiles.len(),
        systems = discovery.total_systems(),
        "discovered systems"
    );

    let store = MetricsStore::new(&options.report_dir);
    let report_dir = &options.report_dir;
    let mut manifest = Manifest::new(
        options.root.display().to_string(),
        ranking.name.clone(),
        origin.to_string(),
    );

    let all_systems: Vec<SystemDir> = discovery.systems().cloned().collect();
    let (reused, pending) = partition(all_systems, &store, options.update);
    if !reused.is_empty() {
        info!(reused = reused.len(), "reusing persisted metrics");
    }

    let mut config = PipelineConfig::default()
        .with_verbose(options.verbose && !options.quiet)
        .with_progress_interval(if options.quiet { 0 } else { 10 });
    if let Some(jobs) = options.jobs {
        config = config.with_max_threads(jobs);
    }
    let outcomes = run_pipeline(&pending, &config)?;

    // Every system is persisted before any aggregate or ranking is computed.
    let mut fresh: HashMap<SystemKey, SystemMetrics> = HashMap::new();
    for outcome in outcomes {
        match outcome {
            SystemOutcome::Analyzed(analyzed) => {
                store.save_system(&analyzed.metrics)?;
                let name = system_report_name(&analyzed.system.profile, &analyzed.system.name);
                let md = render_system_report(&analyzed.analysis, &analyzed.metrics);
                write_output(&md, Some(&report_dir.join(&name)))?;
                manifest.reports.push(name);
                fresh.insert(key(&analyzed.system), analyzed.metrics);
            }
            SystemOutcome::Failed { system, reason } => {
                warn!(
                    system = %system.name,
                    profile = %system.profile,
                    "analysis failed: {}",
                    reason
                );
                manifest.failed_systems.push(FailedSystem {
                    profile: system.profile,
                    system: system.name,
                    reason,
                });
            }
        }
    }

    let mut ranked_input: Vec<SystemMetrics> = Vec::new();
    let mut summaries = Vec::new();
    for (profile, systems) in &discovery.profiles {
        let metrics: Vec<SystemMetrics> = systems
            .iter()
            .filter_map(|s| {
                let k = key(s);
                fresh.get(&k).or_else(|| reused.get(&k)).cloned()
            })
            .collect();

        match aggregate_profile(profile.as_str(), &metrics) {
            Ok(summary) => {
                store.save_profile(&summary)?;
                let name = profile_report_name(profile);
                let md = render_profile_report(&summary, &metrics);
                write_output(&md, Some(&report_dir.join(&name)))?;
                manifest.profiles.push(ManifestProfile {
                    name: profile.clone(),
                    systems: metrics.iter().map(|m| m.system_name.clone()).collect(),
                    report: name.clone(),
                });
                manifest.reports.push(name);
                summaries.push(summary);
            }
            Err(e) => warn!(profile = %profile, "skipping profile report: {}", e),
        }
        ranked_input.extend(metrics);
    }

    if !summaries.is_empty() {
        let md = render_cross_profile_report(&summaries, &ranked_input);
        write_output(&md, Some(&report_dir.join(CROSS_PROFILE_REPORT)))?;
        manifest.reports.push(CROSS_PROFILE_REPORT.to_string());
    }

    let results = score_and_rank(&ranked_input, &ranking.configuration);
    let ranking_name = ranking_report_name(&ranking.name);
    let md = render_ranking_report(&ranking.name, &ranking.configuration.description, &results);
    write_output(&md, Some(&report_dir.join(&ranking_name)))?;
    manifest.reports.push(ranking_name);

    write_output(&manifest.to_json()?, Some(&report_dir.join(MANIFEST_FILE)))?;

    if !options.quiet {
        println!(
            "{} {} systems in {} profiles ({} failed), ranked with '{}'",
            "Analyzed".green().bold(),
            ranked_input.len(),
            manifest.profiles.len(),
            manifest.failed_systems.len(),
            ranking.name.as_str().bright_white()
        );
        for (i, result) in results.iter().take(5).enumerate() {
            println!(
                "  {:>2}. {} [{}] {:.6}",
                i + 1,
                result.system_name,
                result.system_profile,
                result.total_score
            );
        }
        println!("Reports written to {}", report_dir.display());
    }

    Ok(())
}
