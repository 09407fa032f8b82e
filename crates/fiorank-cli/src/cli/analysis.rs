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

//! Analysis and ranking commands.

use crate::commands::{self, AnalyzeOptions};
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum AnalysisCommands {
    /// Analyze a results tree and write reports
    ///
    /// Discovers system directories under ROOT, analyzes each one in
    /// parallel, persists per-system and per-profile metrics, and renders
    /// markdown reports plus a ranking with the selected function.
    Analyze {
        /// Results root (ROOT/<profile>/.../<system>/*.fio.json)
        #[arg(value_name = "ROOT")]
        root: PathBuf,

        /// Output directory for reports and metrics
        #[arg(short = 'o', long, default_value = "report")]
        report_dir: PathBuf,

        /// Number of worker threads (defaults to available cores)
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Ranking function name (defaults to the first in the document)
        #[arg(short = 'r', long)]
        ranking_function: Option<String>,

        /// Ranking-function document (JSON or YAML)
        #[arg(long)]
        ranking_file: Option<PathBuf>,

        /// Only analyze systems without persisted metrics
        #[arg(short, long)]
        update: bool,

        /// Suppress progress and summary output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Rank systems from persisted metrics
    ///
    /// Loads every system persisted by a previous `analyze` run and scores
    /// them with the selected ranking function.
    Rank {
        /// Report directory of a previous analyze run
        #[arg(value_name = "REPORT_DIR", default_value = "report")]
        report_dir: PathBuf,

        /// Ranking function name (defaults to the first in the document)
        #[arg(short = 'r', long)]
        ranking_function: Option<String>,

        /// Ranking-function document (JSON or YAML)
        #[arg(long)]
        ranking_file: Option<PathBuf>,

        /// Output format (text, json, markdown)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

impl AnalysisCommands {
    pub fn execute(self, verbose: bool) -> Result<(), String> {
        let result = match self {
            AnalysisCommands::Analyze {
                root,
                report_dir,
                jobs,
                ranking_function,
                ranking_file,
                update,
                quiet,
            } => {
                let options = AnalyzeOptions {
                    jobs,
                    ranking_function,
                    ranking_file,
                    update,
                    quiet,
                    verbose,
                    ..AnalyzeOptions::new(root, report_dir)
                };
                commands::analyze(&options)
            }
            AnalysisCommands::Rank {
                report_dir,
                ranking_function,
                ranking_file,
                format,
            } => commands::rank(
                &report_dir,
                ranking_function.as_deref(),
                ranking_file.as_deref(),
                &format,
            ),
        };
        result.map_err(|e| e.to_string())
    }
}
