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

//! The `rank` command: score persisted metrics with a ranking function.

use super::write_output;
use crate::config::load_ranking_functions;
use crate::error::CliError;
use crate::report::{render_ranking_json, render_ranking_report};
use crate::store::MetricsStore;
use colored::Colorize;
use fiorank_core::{score_and_rank, ScoringResult};
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "markdown" | "md" => Ok(Self::Markdown),
            other => Err(CliError::invalid_input(format!(
                "unknown output format '{}' (expected text, json or markdown)",
                other
            ))),
        }
    }
}

fn render_text(function: &str, description: &str, results: &[ScoringResult]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", "Ranking:".bright_blue().bold(), function));
    out.push_str(&format!("{}\n\n", description));
    for (i, result) in results.iter().enumerate() {
        let score = if result.disqualified {
            "DISQUALIFIED".red().bold().to_string()
        } else {
            format!("{:.6}", result.total_score)
        };
        out.push_str(&format!(
            "{:>3}. {:<32} {:<16} {}\n",
            i + 1,
            result.system_name,
            result.system_profile,
            score
        ));
    }
    out
}

/// Load every system persisted under `report_dir` and print a ranking.
///
/// # Errors
///
/// Returns `Err` if the metrics store is missing or empty or the format is
/// unknown.
pub fn rank(
    report_dir: &Path,
    ranking_function: Option<&str>,
    ranking_file: Option<&Path>,
    format: &str,
) -> Result<(), CliError> {
    let format: OutputFormat = format.parse()?;
    let cwd = std::env::current_dir().map_err(|e| CliError::io_error(".", e))?;
    let (functions, _) = load_ranking_functions(ranking_file, &cwd);
    let ranking = functions.resolve(ranking_function);

    let store = MetricsStore::new(report_dir);
    let systems = store.load_all_systems()?;
    if systems.is_empty() {
        return Err(CliError::invalid_input(format!(
            "no persisted metrics in '{}' (run `fiorank analyze` first)",
            store.dir().display()
        )));
    }

    let results = score_and_rank(&systems, &ranking.configuration);
    let description = ranking.configuration.description.as_str();
    let output = match format {
        OutputFormat::Text => render_text(&ranking.name, description, &results),
        OutputFormat::Json => render_ranking_json(&ranking.name, description, &results)? + "\n",
        OutputFormat::Markdown => render_ranking_report(&ranking.name, description, &results),
    };
    write_output(&output, None)
}
