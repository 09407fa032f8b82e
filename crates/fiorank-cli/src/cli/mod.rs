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

//! CLI command definitions and argument parsing.
//!
//! - [`analysis`]: analyze and rank
//! - [`config`]: ranking-function document commands (list-functions, init-config)

mod analysis;
mod config;

use clap::Subcommand;

pub use analysis::AnalysisCommands;
pub use config::ConfigCommands;

/// Top-level CLI commands enum.
///
/// ```text
/// Commands
/// ├── Analysis (analyze, rank)
/// └── Config (list-functions, init-config)
/// ```
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use fiorank_cli::cli::Commands;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
/// ```
#[derive(Subcommand)]
pub enum Commands {
    #[command(flatten)]
    Analysis(AnalysisCommands),

    #[command(flatten)]
    Config(ConfigCommands),
}

impl Commands {
    /// Execute the command. `verbose` enables per-system progress lines.
    ///
    /// # Errors
    ///
    /// Returns the rendered error message on failure.
    pub fn execute(self, verbose: bool) -> Result<(), String> {
        match self {
            Commands::Analysis(cmd) => cmd.execute(verbose),
            Commands::Config(cmd) => cmd.execute(),
        }
    }
}
