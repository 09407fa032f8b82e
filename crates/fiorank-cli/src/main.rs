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

//! FioRank Command Line Interface

use clap::Parser;
use fiorank_cli::cli::Commands;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// FioRank - FIO benchmark analysis and ranking toolkit
///
/// Parses FIO JSON results, finds the optimal random-read blocksize and
/// the latency knee of each system, and ranks systems with configurable
/// scoring functions.
///
/// # Examples
///
/// ```bash
/// # Analyze a results tree into ./report
/// fiorank analyze results/
///
/// # Re-rank persisted metrics with another function
/// fiorank rank report --ranking-function latency_focused
///
/// # Show available ranking functions
/// fiorank list-functions --all
/// ```
#[derive(Parser)]
#[command(name = "fiorank")]
#[command(
    author,
    version,
    about = "FioRank - FIO benchmark analysis and ranking toolkit",
    long_about = None
)]
struct Cli {
    /// Enable debug logging and per-system progress
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(verbose: bool) {
    let directive = if verbose { "fiorank=debug" } else { "fiorank=info" };
    let filter = EnvFilter::from_default_env()
        .add_directive(directive.parse().expect("valid log directive"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command.execute(cli.verbose) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
