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

//! Ranking-function document commands: `list-functions` and `init-config`.

use crate::config::{init_ranking_file, load_ranking_functions};
use crate::error::CliError;
use colored::Colorize;
use std::path::Path;

/// Print ranking functions in document order. Names containing
/// `example` are hidden unless `all` is set.
pub fn list_functions(ranking_file: Option<&Path>, all: bool) -> Result<(), CliError> {
    let cwd = std::env::current_dir().map_err(|e| CliError::io_error(".", e))?;
    let (functions, origin) = load_ranking_functions(ranking_file, &cwd);

    println!("{} {}", "Ranking functions from".bright_blue().bold(), origin);
    let first = functions.first_name();
    let visible = if all {
        functions.names()
    } else {
        functions.non_example_names()
    };

    for name in visible {
        let Some(config) = functions.get(name) else {
            continue;
        };
        let marker = if Some(name) == first { " (default)" } else { "" };
        println!(
            "  {}{} - {} [{} components]",
            name.bright_white().bold(),
            marker,
            config.description,
            config.components.len()
        );
    }
    Ok(())
}

pub fn init_config(output: &Path, force: bool) -> Result<(), CliError> {
    init_ranking_file(output, force)?;
    println!("{} {}", "Wrote".green().bold(), output.display());
    Ok(())
}
