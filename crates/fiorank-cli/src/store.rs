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

//! Persisted metrics under `<report dir>/metrics/`.
//!
//! `<profile>__<system>.json` holds one [`SystemMetrics`];
//! `profiles/PROFILE_<profile>.json` holds one [`SystemProfileMetrics`].
//! Profile summaries live in their own directory so that no profile or
//! system name can make them look like system metrics.

use crate::commands::{read_file, write_output};
use crate::error::CliError;
use fiorank_core::{SystemMetrics, SystemProfileMetrics};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const METRICS_DIR: &str = "metrics";
pub const PROFILES_DIR: &str = "profiles";
pub const PROFILE_PREFIX: &str = "PROFILE_";
pub const NAME_SEPARATOR: &str = "__";

#[derive(Debug, Clone)]
pub struct MetricsStore {
    dir: PathBuf,
}

impl MetricsStore {
    /// Store rooted at `<report_dir>/metrics`.
    pub fn new(report_dir: &Path) -> Self {
        Self {
            dir: report_dir.join(METRICS_DIR),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn system_path(&self, profile: &str, system: &str) -> PathBuf {
        self.dir
            .join(format!("{}{}{}.json", profile, NAME_SEPARATOR, system))
    }

    pub fn profile_path(&self, profile: &str) -> PathBuf {
        self.dir
            .join(PROFILES_DIR)
            .join(format!("{}{}.json", PROFILE_PREFIX, profile))
    }

    pub fn contains_system(&self, profile: &str, system: &str) -> bool {
        self.system_path(profile, system).is_file()
    }

    pub fn save_system(&self, metrics: &SystemMetrics) -> Result<PathBuf, CliError> {
        let path = self.system_path(&metrics.system_profile, &metrics.system_name);
        write_output(&serde_json::to_string_pretty(metrics)?, Some(&path))?;
        debug!(path = %path.display(), "saved system metrics");
        Ok(path)
    }

    pub fn save_profile(&self, profile: &SystemProfileMetrics) -> Result<PathBuf, CliError> {
        let path = self.profile_path(&profile.profile_name);
        write_output(&serde_json::to_string_pretty(profile)?, Some(&path))?;
        Ok(path)
    }

    pub fn load_system(&self, profile: &str, system: &str) -> Result<SystemMetrics, CliError> {
        let content = read_file(&self.system_path(profile, system))?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn load_profile(&self, profile: &str) -> Result<SystemProfileMetrics, CliError> {
        let content = read_file(&self.profile_path(profile))?;
        Ok(serde_json::from_str(&content)?)
    }

    fn json_files(&self) -> Result<Vec<PathBuf>, CliError> {
        let entries = fs::read_dir(&self.dir).map_err(|e| CliError::io_error(&self.dir, e))?;
        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| CliError::io_error(&self.dir, e))?.path();
            if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("json") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Every persisted system, sorted by file name. Unreadable files are
    /// logged and skipped.
    pub fn load_all_systems(&self) -> Result<Vec<SystemMetrics>, CliError> {
        let mut systems = Vec::new();
        for path in self.json_files()? {
            match read_file(&path).and_then(|c| Ok(serde_json::from_str::<SystemMetrics>(&c)?)) {
                Ok(metrics) => systems.push(metrics),
                Err(e) => warn!(path = %path.display(), "skipping metrics file: {}", e),
            }
        }
        Ok(systems)
    }
}
