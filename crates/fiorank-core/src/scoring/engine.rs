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

//! Weighted-product scoring.
//!
//! Each component maps its raw metric to a score independently of every
//! other system. The total is `Π score_i ^ weight_i`, so a weak score on
//! any heavily weighted component pulls the whole product down.
//!
//! A raw value of exactly 0.0 on any component disqualifies the system:
//! it keeps its place in the output with a total of 0.0 and an explanation
//! naming the missing metrics.

use crate::metric_name::MetricName;
use crate::metrics::SystemMetrics;
use crate::scoring::config::{ScoringComponent, ScoringConfiguration};
use crate::scoring::result::{
    disqualified_explanation, scoring_explanation, ComponentScore, ScoringResult,
};

/// Score a single component's raw value.
///
/// Returns the score and whether the threshold penalty was applied.
pub fn component_score(component: &ScoringComponent, raw: f64) -> (f64, bool) {
    let input = if component.invert_better {
        1.0 / (1.0 + raw)
    } else {
        raw
    };
    let mapped = component.mapping_function.apply(input);

    let triggered = match component.threshold_value {
        Some(threshold) if component.invert_better => raw > threshold,
        Some(threshold) => raw < threshold,
        None => false,
    };

    if triggered {
        (mapped * component.threshold_penalty, true)
    } else {
        (mapped, false)
    }
}

fn raw_values(metrics: &SystemMetrics, config: &ScoringConfiguration) -> Vec<f64> {
    config
        .components
        .iter()
        .map(|c| MetricName::parse(&c.metric_name).value(metrics))
        .collect()
}

/// Score one system.
pub fn score_system(metrics: &SystemMetrics, config: &ScoringConfiguration) -> ScoringResult {
    let raws = raw_values(metrics, config);
    let disqualified = raws.iter().any(|&raw| raw == 0.0);

    let component_scores: Vec<ComponentScore> = config
        .components
        .iter()
        .zip(&raws)
        .map(|(component, &raw)| {
            let (score, threshold_triggered) = if disqualified {
                (0.0, false)
            } else {
                component_score(component, raw)
            };
            ComponentScore {
                metric_name: component.metric_name.clone(),
                raw_value: raw,
                score,
                weight: component.weight,
                threshold_triggered,
            }
        })
        .collect();

    let (total_score, explanation) = if disqualified {
        (
            0.0,
            disqualified_explanation(&metrics.system_name, &component_scores),
        )
    } else {
        let product: f64 = component_scores
            .iter()
            .map(|c| c.score.powf(c.weight))
            .product();
        let total = if product.is_nan() { 0.0 } else { product };
        (
            total,
            scoring_explanation(&metrics.system_name, &component_scores, total),
        )
    };

    ScoringResult {
        system_name: metrics.system_name.clone(),
        system_profile: metrics.system_profile.clone(),
        total_score,
        component_scores,
        explanation,
        disqualified,
    }
}

/// Score every system and sort by total score, highest first.
///
/// Disqualified systems always rank below qualified ones, even when a
/// qualified total collapses to 0.0. The sort is stable: equal scores keep
/// their input order.
pub fn score_and_rank(
    systems: &[SystemMetrics],
    config: &ScoringConfiguration,
) -> Vec<ScoringResult> {
    let mut results: Vec<ScoringResult> =
        systems.iter().map(|m| score_system(m, config)).collect();
    results.sort_by(|a, b| {
        a.disqualified
            .cmp(&b.disqualified)
            .then_with(|| b.total_score.total_cmp(&a.total_score))
    });
    results
}
