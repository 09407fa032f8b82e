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

//! Parallel per-system analysis.
//!
//! Each system is analyzed independently on a bounded rayon pool. Results
//! come back in input order, so everything after the parallel stage
//! (aggregation, persistence, scoring) runs on the calling thread over a
//! complete, deterministic list.
//!
//! # Examples
//!
//! ```rust,no_run
//! use fiorank_cli::discovery::discover_systems;
//! use fiorank_cli::pipeline::{run_pipeline, PipelineConfig};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), fiorank_cli::error::CliError> {
//! let discovery = discover_systems(Path::new("results"))?;
//! let systems: Vec<_> = discovery.systems().cloned().collect();
//! let outcomes = run_pipeline(&systems, &PipelineConfig::default().with_max_threads(4))?;
//! println!("{} systems analyzed", outcomes.len());
//! # Ok(())
//! # }
//! ```

use crate::commands::read_file;
use crate::discovery::SystemDir;
use crate::error::CliError;
use colored::Colorize;
use fiorank_core::{analyze_files, extract_metrics, SystemAnalysis, SystemMetrics};
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::{info, warn};

/// Configuration for a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Worker threads; `None` uses the available parallelism.
    pub max_threads: Option<usize>,
    /// Report progress every N systems (0 disables progress lines).
    pub progress_interval: usize,
    /// Print one line per system.
    pub verbose: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_threads: None,
            progress_interval: 1,
            verbose: false,
        }
    }
}

impl PipelineConfig {
    pub fn with_max_threads(mut self, threads: usize) -> Self {
        self.max_threads = Some(threads);
        self
    }

    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn thread_count(&self) -> usize {
        self.max_threads
            .filter(|&n| n > 0)
            .or_else(|| std::thread::available_parallelism().ok().map(|n| n.get()))
            .unwrap_or(1)
    }
}

/// A successfully analyzed system.
#[derive(Debug, Clone)]
pub struct AnalyzedSystem {
    pub system: SystemDir,
    pub analysis: SystemAnalysis,
    pub metrics: SystemMetrics,
}

/// Result of analyzing one system.
#[derive(Debug, Clone)]
pub enum SystemOutcome {
    Analyzed(Box<AnalyzedSystem>),
    Failed { system: SystemDir, reason: String },
}

impl SystemOutcome {
    pub fn system(&self) -> &SystemDir {
        match self {
            Self::Analyzed(a) => &a.system,
            Self::Failed { system, .. } => system,
        }
    }

    pub fn analyzed(&self) -> Option<&AnalyzedSystem> {
        match self {
            Self::Analyzed(a) => Some(a),
            Self::Failed { .. } => None,
        }
    }
}

/// Read, parse, analyze and extract one system directory.
///
/// Unreadable files are skipped like unparsable ones. A system with no
/// parsable workload at all is a failure.
pub fn analyze_system_dir(system: &SystemDir) -> Result<AnalyzedSystem, CliError> {
    let mut files = Vec::with_capacity(system.result_files.len());
    let mut unreadable = 0usize;
    for path in &system.result_files {
        match read_file(path) {
            Ok(content) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                files.push((name, content));
            }
            Err(e) => {
                warn!(system = %system.name, "skipping unreadable file: {}", e);
                unreadable += 1;
            }
        }
    }

    let analysis = analyze_files(&system.name, &system.profile, files);
    if analysis.total_workloads == 0 {
        return Err(CliError::invalid_input(format!(
            "no parsable workload files in '{}' ({} skipped, {} unreadable)",
            system.path.display(),
            analysis.skipped_files.len(),
            unreadable
        )));
    }

    let metrics = extract_metrics(&analysis);
    Ok(AnalyzedSystem {
        system: system.clone(),
        analysis,
        metrics,
    })
}

/// Progress tracker shared across worker threads.
struct ProgressTracker {
    total: usize,
    processed: AtomicUsize,
    succeeded: AtomicUsize,
    failed: AtomicUsize,
    interval: usize,
    verbose: bool,
    start_time: Instant,
}

impl ProgressTracker {
    fn new(total: usize, interval: usize, verbose: bool) -> Self {
        Self {
            total,
            processed: AtomicUsize::new(0),
            succeeded: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            interval,
            verbose,
            start_time: Instant::now(),
        }
    }

    fn record(&self, outcome: &SystemOutcome) {
        let processed = self.processed.fetch_add(1, Ordering::Relaxed) + 1;
        let system = outcome.system();
        match outcome {
            SystemOutcome::Analyzed(a) => {
                self.succeeded.fetch_add(1, Ordering::Relaxed);
                if self.verbose {
                    let status = if a.analysis.is_complete() {
                        "✓".green().bold()
                    } else {
                        "!".yellow().bold()
                    };
                    eprintln!("{} {}/{}", status, system.profile, system.name);
                }
            }
            SystemOutcome::Failed { reason, .. } => {
                self.failed.fetch_add(1, Ordering::Relaxed);
                eprintln!(
                    "{} {}/{} - {}",
                    "✗".red().bold(),
                    system.profile,
                    system.name,
                    reason
                );
            }
        }

        if self.interval > 0 && (processed % self.interval == 0 || processed == self.total) {
            eprintln!(
                "Progress: [{}/{}] {} analyzed, {} failed",
                processed,
                self.total,
                self.succeeded.load(Ordering::Relaxed),
                self.failed.load(Ordering::Relaxed)
            );
        }
    }

    fn print_summary(&self) {
        let processed = self.processed.load(Ordering::Relaxed);
        let elapsed = self.start_time.elapsed();

        eprintln!();
        eprintln!("{}", "═".repeat(60).bright_blue());
        eprintln!("{}", "System Analysis".bright_blue().bold());
        eprintln!("{}", "═".repeat(60).bright_blue());
        eprintln!(
            "  {} {}",
            "Total systems:".bright_cyan(),
            processed.to_string().bright_white()
        );
        eprintln!(
            "  {} {}",
            "Analyzed:".green().bold(),
            self.succeeded.load(Ordering::Relaxed).to_string().bright_white()
        );
        eprintln!(
            "  {} {}",
            "Failed:".red().bold(),
            self.failed.load(Ordering::Relaxed).to_string().bright_white()
        );
        eprintln!("  {} {:.2}s", "Elapsed:".bright_cyan(), elapsed.as_secs_f64());
        eprintln!("{}", "═".repeat(60).bright_blue());
    }
}

/// Analyze every system on a bounded thread pool.
///
/// Per-system failures are returned as [`SystemOutcome::Failed`] and never
/// abort the run. Outcomes are in the same order as `systems`.
///
/// # Errors
///
/// Returns `Err` only if the thread pool cannot be built.
pub fn run_pipeline(
    systems: &[SystemDir],
    config: &PipelineConfig,
) -> Result<Vec<SystemOutcome>, CliError> {
    let threads = config.thread_count();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| CliError::ThreadPool(e.to_string()))?;

    info!(systems = systems.len(), threads, "starting analysis");
    let show_progress = config.progress_interval > 0 || config.verbose;
    let tracker = ProgressTracker::new(systems.len(), config.progress_interval, config.verbose);

    let outcomes: Vec<SystemOutcome> = pool.install(|| {
        systems
            .par_iter()
            .map(|system| {
                let outcome = match analyze_system_dir(system) {
                    Ok(analyzed) => SystemOutcome::Analyzed(Box::new(analyzed)),
                    Err(e) => SystemOutcome::Failed {
                        system: system.clone(),
                        reason: e.to_string(),
                    },
                };
                if show_progress {
                    tracker.record(&outcome);
                }
                outcome
            })
            .collect()
    });

    if show_progress {
        tracker.print_summary();
    }
    Ok(outcomes)
}
