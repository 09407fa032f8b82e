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

//! Workload filenames: `<kind>-<testId>-<parameter>.fio.json`.

use crate::error::{FioRankError, Result};
use crate::workload::WorkloadKind;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static WORKLOAD_FILENAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z]+)-(\d+)-(\w+)\.(?:fio\.)?json$").expect("valid workload filename regex")
});

/// The identity encoded in a workload filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadName {
    pub filename: String,
    pub kind: WorkloadKind,
    pub test_id: String,
    pub test_number: u32,
    pub parameter: String,
}

/// Split a workload filename into kind, test id and parameter.
///
/// Leading directories are ignored. The `.fio` infix is optional.
///
/// # Errors
///
/// Returns [`FioRankError::Parse`] if the name does not follow the pattern,
/// names an unsupported workload kind, or carries a test id that does not
/// fit in a `u32`.
///
/// # Examples
///
/// ```
/// use fiorank_core::workload::{parse_workload_filename, WorkloadKind};
///
/// let name = parse_workload_filename("results/mixed-302-1to4k_20Mseq.fio.json").unwrap();
/// assert_eq!(name.kind, WorkloadKind::Mixed);
/// assert_eq!(name.test_id, "302");
/// assert_eq!(name.parameter, "1to4k_20Mseq");
/// ```
pub fn parse_workload_filename(path: &str) -> Result<WorkloadName> {
    let filename = Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path);

    let caps = WORKLOAD_FILENAME.captures(filename).ok_or_else(|| {
        FioRankError::parse(
            filename,
            "filename does not match <kind>-<testId>-<parameter>.fio.json",
        )
    })?;

    let kind = WorkloadKind::from_token(&caps[1]).ok_or_else(|| {
        FioRankError::parse(filename, format!("unsupported workload kind '{}'", &caps[1]))
    })?;

    let test_number = caps[2]
        .parse::<u32>()
        .map_err(|e| FioRankError::parse(filename, format!("invalid test id: {}", e)))?;

    Ok(WorkloadName {
        filename: filename.to_string(),
        kind,
        test_id: caps[2].to_string(),
        test_number,
        parameter: caps[3].to_string(),
    })
}
