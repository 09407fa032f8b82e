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

//! Ranking-function document commands.

use crate::commands;
use crate::config::DEFAULT_RANKING_FILE;
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// List available ranking functions
    ListFunctions {
        /// Ranking-function document (JSON or YAML)
        #[arg(long)]
        ranking_file: Option<PathBuf>,

        /// Include example functions
        #[arg(short, long)]
        all: bool,
    },

    /// Write the bundled ranking-function document
    InitConfig {
        /// Destination path
        #[arg(short, long, default_value = DEFAULT_RANKING_FILE)]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

impl ConfigCommands {
    pub fn execute(self) -> Result<(), String> {
        let result = match self {
            ConfigCommands::ListFunctions { ranking_file, all } => {
                commands::list_functions(ranking_file.as_deref(), all)
            }
            ConfigCommands::InitConfig { output, force } => commands::init_config(&output, force),
        };
        result.map_err(|e| e.to_string())
    }
}
