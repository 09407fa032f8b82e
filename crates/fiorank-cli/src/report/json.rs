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

//! JSON outputs: the run manifest and machine-readable rankings.

use crate::error::CliError;
use fiorank_core::ScoringResult;
use serde::{Deserialize, Serialize};

/// Manifest file name inside the report directory.
pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestProfile {
    pub name: String,
    pub systems: Vec<String>,
    pub report: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedSystem {
    pub profile: String,
    pub system: String,
    pub reason: String,
}

/// Index of everything one `analyze` run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub generated_at: String,
    pub root: String,
    pub ranking_function: String,
    pub ranking_document: String,
    pub profiles: Vec<ManifestProfile>,
    /// Report paths relative to the report directory.
    pub reports: Vec<String>,
    pub failed_systems: Vec<FailedSystem>,
}

impl Manifest {
    pub fn new(
        root: impl Into<String>,
        ranking_function: impl Into<String>,
        ranking_document: impl Into<String>,
    ) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            root: root.into(),
            ranking_function: ranking_function.into(),
            ranking_document: ranking_document.into(),
            profiles: Vec::new(),
            reports: Vec::new(),
            failed_systems: Vec::new(),
        }
    }

    pub fn to_json(&self) -> Result<String, CliError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Serialize)]
struct RankingOutput<'a> {
    ranking_function: &'a str,
    description: &'a str,
    results: Vec<RankedEntry<'a>>,
}

#[derive(Serialize)]
struct RankedEntry<'a> {
    rank: usize,
    #[serde(flatten)]
    result: &'a ScoringResult,
}

/// Ranked results as pretty JSON, with explicit 1-based ranks.
pub fn render_ranking_json(
    function: &str,
    description: &str,
    results: &[ScoringResult],
) -> Result<String, CliError> {
    let output = RankingOutput {
        ranking_function: function,
        description,
        results: results
            .iter()
            .enumerate()
            .map(|(i, result)| RankedEntry { rank: i + 1, result })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fiorank_core::{score_and_rank, ScoringConfiguration, SystemMetrics};

    #[test]
    fn test_manifest_round_trip() {
        let mut manifest = Manifest::new("results", "default", "<bundled>");
        manifest.profiles.push(ManifestProfile {
            name: "nvme".to_string(),
            systems: vec!["host1".to_string()],
            report: "PROFILE_nvme.md".to_string(),
        });
        manifest.reports.push("nvme__host1.md".to_string());

        let json = manifest.to_json().unwrap();
        let back: Manifest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, manifest);
        assert!(chrono::DateTime::parse_from_rfc3339(&back.generated_at).is_ok());
    }

    #[test]
    fn test_ranking_json_has_ranks() {
        let systems = vec![SystemMetrics {
            system_name: "a".to_string(),
            system_profile: "nvme".to_string(),
            ..SystemMetrics::default()
        }];
        let results = score_and_rank(&systems, &ScoringConfiguration::builtin_default());
        let json = render_ranking_json("default", "desc", &results).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["ranking_function"], "default");
        assert_eq!(value["results"][0]["rank"], 1);
        assert_eq!(value["results"][0]["system_name"], "a");
        assert_eq!(value["results"][0]["disqualified"], true);
    }
}
