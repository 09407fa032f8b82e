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

//! Scoring results and their human-readable explanations.

use serde::{Deserialize, Serialize};

/// Score of one component for one system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentScore {
    pub metric_name: String,
    pub raw_value: f64,
    pub score: f64,
    pub weight: f64,
    pub threshold_triggered: bool,
}

/// The outcome of scoring one system with one ranking function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub system_name: String,
    pub system_profile: String,
    pub total_score: f64,
    pub component_scores: Vec<ComponentScore>,
    pub explanation: String,
    pub disqualified: bool,
}

impl ScoringResult {
    /// Metric names whose raw value caused disqualification.
    pub fn missing_metrics(&self) -> Vec<&str> {
        if !self.disqualified {
            return Vec::new();
        }
        self.component_scores
            .iter()
            .filter(|c| c.raw_value == 0.0)
            .map(|c| c.metric_name.as_str())
            .collect()
    }
}

pub(crate) fn disqualified_explanation(system_name: &str, components: &[ComponentScore]) -> String {
    let mut text = String::new();
    text.push_str(&format!("DISQUALIFIED - {}:\n", system_name));
    text.push_str("System disqualified due to missing or zero values for required metrics:\n");
    for c in components {
        if c.raw_value == 0.0 {
            text.push_str(&format!(
                "  - {}: MISSING/ZERO (required for ranking)\n",
                c.metric_name
            ));
        } else {
            text.push_str(&format!(
                "  - {}: {:.3} (weight: {:.1})\n",
                c.metric_name, c.raw_value, c.weight
            ));
        }
    }
    text.push_str("Total Score: 0.000 (DISQUALIFIED)");
    text
}

pub(crate) fn scoring_explanation(
    system_name: &str,
    components: &[ComponentScore],
    total_score: f64,
) -> String {
    let mut text = String::new();
    text.push_str(&format!("Scoring breakdown for {}:\n", system_name));
    for c in components {
        text.push_str(&format!(
            "  - {}: {:.6} (weight: {:.1}, raw: {:.1})",
            c.metric_name, c.score, c.weight, c.raw_value
        ));
        if c.threshold_triggered {
            text.push_str(" [threshold penalty]");
        }
        text.push('\n');
    }
    text.push_str(&format!("Total Score: {:.6}", total_score));
    text
}
