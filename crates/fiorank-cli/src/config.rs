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

//! Ranking-function document loading.
//!
//! Lookup order: an explicit `--ranking-file`, then `./ranking-functions.json`,
//! then the document bundled into the binary. A document that cannot be
//! loaded is logged and replaced by the built-in default function.

use crate::commands::read_file;
use crate::error::CliError;
use fiorank_core::RankingFunctions;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// The ranking-function document shipped with the binary.
pub const BUNDLED_RANKING_FUNCTIONS: &str = include_str!("../ranking-functions.json");

/// File name looked up in the working directory.
pub const DEFAULT_RANKING_FILE: &str = "ranking-functions.json";

/// Where a loaded document came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOrigin {
    File(PathBuf),
    Bundled,
    /// The selected document failed to load.
    BuiltIn,
}

impl std::fmt::Display for DocumentOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Bundled => f.write_str("<bundled>"),
            Self::BuiltIn => f.write_str("<built-in>"),
        }
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref(),
        Some("yaml") | Some("yml")
    )
}

/// Parse a ranking document from disk, choosing JSON or YAML by extension.
pub fn load_ranking_file(path: &Path) -> Result<RankingFunctions, CliError> {
    let content = read_file(path)?;
    let functions = if is_yaml(path) {
        RankingFunctions::from_yaml_str(&content)?
    } else {
        RankingFunctions::from_json_str(&content)?
    };
    debug!(path = %path.display(), functions = functions.len(), "loaded ranking document");
    Ok(functions)
}

pub fn bundled_ranking_functions() -> Result<RankingFunctions, CliError> {
    Ok(RankingFunctions::from_json_str(BUNDLED_RANKING_FUNCTIONS)?)
}

fn or_builtin(
    loaded: Result<RankingFunctions, CliError>,
    origin: DocumentOrigin,
) -> (RankingFunctions, DocumentOrigin) {
    match loaded {
        Ok(functions) => (functions, origin),
        Err(e) => {
            warn!(document = %origin, "using built-in ranking function: {}", e);
            (RankingFunctions::builtin(), DocumentOrigin::BuiltIn)
        }
    }
}

/// Resolve and load the ranking document for a run.
///
/// `cwd` is the directory searched for [`DEFAULT_RANKING_FILE`]. Never
/// fails: an unreadable or invalid document yields
/// [`RankingFunctions::builtin`] with [`DocumentOrigin::BuiltIn`].
pub fn load_ranking_functions(
    explicit: Option<&Path>,
    cwd: &Path,
) -> (RankingFunctions, DocumentOrigin) {
    if let Some(path) = explicit {
        return or_builtin(load_ranking_file(path), DocumentOrigin::File(path.to_path_buf()));
    }

    let local = cwd.join(DEFAULT_RANKING_FILE);
    if local.is_file() {
        return or_builtin(load_ranking_file(&local), DocumentOrigin::File(local));
    }

    or_builtin(bundled_ranking_functions(), DocumentOrigin::Bundled)
}

/// Write the bundled document to `path`. Refuses to overwrite unless `force`.
pub fn init_ranking_file(path: &Path, force: bool) -> Result<(), CliError> {
    if path.exists() && !force {
        return Err(CliError::invalid_input(format!(
            "'{}' already exists (use --force to overwrite)",
            path.display()
        )));
    }
    crate::commands::write_output(BUNDLED_RANKING_FUNCTIONS, Some(path))?;
    info!(path = %path.display(), "wrote ranking-function document");
    Ok(())
}
