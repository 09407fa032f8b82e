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

//! Declarative ranking-function configuration.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Default component weight.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Default multiplier applied when a threshold triggers.
pub const DEFAULT_THRESHOLD_PENALTY: f64 = 0.1;

/// Default description of a configuration that omits one.
pub const DEFAULT_DESCRIPTION: &str = "Default scoring function";

/// Description of the built-in fallback configuration.
pub const BUILTIN_DESCRIPTION: &str =
    "Default balanced scoring: 60% throughput, 30% latency, 10% consistency";

/// Transform applied to a component's (optionally inverted) raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingFunction {
    #[default]
    Linear,
    /// `ln(1 + x)`
    Log,
    /// `1 / (1 + x)`
    Inverse,
    /// `1` if `x > 0`, else `0`
    Threshold,
}

impl MappingFunction {
    /// Case-insensitive lookup; unrecognised names behave as linear.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "log" => Self::Log,
            "inverse" => Self::Inverse,
            "threshold" => Self::Threshold,
            _ => Self::Linear,
        }
    }

    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Self::Linear => x,
            Self::Log => x.ln_1p(),
            Self::Inverse => 1.0 / (1.0 + x),
            Self::Threshold => {
                if x > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Log => "log",
            Self::Inverse => "inverse",
            Self::Threshold => "threshold",
        }
    }
}

impl fmt::Display for MappingFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MappingFunction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}

fn default_weight() -> f64 {
    DEFAULT_WEIGHT
}

fn default_threshold_penalty() -> f64 {
    DEFAULT_THRESHOLD_PENALTY
}

fn default_normalization() -> String {
    "minmax".to_string()
}

fn default_easing() -> String {
    "linear".to_string()
}

fn default_description() -> String {
    DEFAULT_DESCRIPTION.to_string()
}

/// One weighted metric term of a ranking function.
///
/// `normalization` and `easing_function` are carried for compatibility
/// with existing ranking documents and do not affect scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringComponent {
    pub metric_name: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default)]
    pub mapping_function: MappingFunction,
    #[serde(default = "default_normalization")]
    pub normalization: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_value: Option<f64>,
    #[serde(default = "default_threshold_penalty")]
    pub threshold_penalty: f64,
    #[serde(default = "default_easing")]
    pub easing_function: String,
    #[serde(default)]
    pub invert_better: bool,
}

impl ScoringComponent {
    /// A linear, higher-is-better component with default weight.
    pub fn new(metric_name: impl Into<String>) -> Self {
        Self {
            metric_name: metric_name.into(),
            weight: DEFAULT_WEIGHT,
            mapping_function: MappingFunction::Linear,
            normalization: default_normalization(),
            threshold_value: None,
            threshold_penalty: DEFAULT_THRESHOLD_PENALTY,
            easing_function: default_easing(),
            invert_better: false,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_mapping(mut self, mapping: MappingFunction) -> Self {
        self.mapping_function = mapping;
        self
    }

    /// Mark lower raw values as better.
    pub fn inverted(mut self) -> Self {
        self.invert_better = true;
        self
    }

    pub fn with_threshold(mut self, value: f64, penalty: f64) -> Self {
        self.threshold_value = Some(value);
        self.threshold_penalty = penalty;
        self
    }
}

/// A named ranking function's body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfiguration {
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default)]
    pub components: Vec<ScoringComponent>,
}

impl Default for ScoringConfiguration {
    fn default() -> Self {
        Self::new(DEFAULT_DESCRIPTION)
    }
}

impl ScoringConfiguration {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            components: Vec::new(),
        }
    }

    pub fn with_component(mut self, component: ScoringComponent) -> Self {
        self.components.push(component);
        self
    }

    /// The configuration used when no ranking document provides one.
    ///
    /// ```
    /// use fiorank_core::ScoringConfiguration;
    ///
    /// let config = ScoringConfiguration::builtin_default();
    /// assert_eq!(config.components.len(), 3);
    /// assert_eq!(config.components[0].metric_name, "randread_throughput_mbps");
    /// ```
    pub fn builtin_default() -> Self {
        Self::new(BUILTIN_DESCRIPTION)
            .with_component(
                ScoringComponent::new("randread_throughput_mbps")
                    .with_weight(0.6)
                    .with_mapping(MappingFunction::Log),
            )
            .with_component(
                ScoringComponent::new("randread_latency_p99_ms")
                    .with_weight(0.3)
                    .with_mapping(MappingFunction::Log)
                    .inverted()
                    .with_threshold(1.0, 0.5),
            )
            .with_component(
                ScoringComponent::new("knee_point_latency_increase_percent")
                    .with_weight(0.1)
                    .inverted()
                    .with_threshold(50.0, 0.3),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_functions() {
        assert_eq!(MappingFunction::Linear.apply(3.5), 3.5);
        assert!((MappingFunction::Log.apply(std::f64::consts::E - 1.0) - 1.0).abs() < 1e-12);
        assert_eq!(MappingFunction::Inverse.apply(1.0), 0.5);
        assert_eq!(MappingFunction::Threshold.apply(0.001), 1.0);
        assert_eq!(MappingFunction::Threshold.apply(0.0), 0.0);
    }

    #[test]
    fn test_mapping_name_lookup() {
        assert_eq!(MappingFunction::from_name("LOG"), MappingFunction::Log);
        assert_eq!(MappingFunction::from_name("Inverse"), MappingFunction::Inverse);
        assert_eq!(MappingFunction::from_name("sigmoid"), MappingFunction::Linear);
    }

    #[test]
    fn test_component_defaults_from_json() {
        let c: ScoringComponent =
            serde_json::from_str(r#"{"metric_name": "randread_iops"}"#).unwrap();
        assert_eq!(c.weight, 1.0);
        assert_eq!(c.mapping_function, MappingFunction::Linear);
        assert_eq!(c.normalization, "minmax");
        assert_eq!(c.threshold_value, None);
        assert_eq!(c.threshold_penalty, 0.1);
        assert_eq!(c.easing_function, "linear");
        assert!(!c.invert_better);
    }

    #[test]
    fn test_component_full_json() {
        let c: ScoringComponent = serde_json::from_str(
            r#"{
                "metric_name": "randread_latency_p99_ms",
                "weight": 0.3,
                "mapping_function": "Log",
                "threshold_value": 2.5,
                "threshold_penalty": 0.5,
                "invert_better": true
            }"#,
        )
        .unwrap();
        assert_eq!(c.mapping_function, MappingFunction::Log);
        assert_eq!(c.threshold_value, Some(2.5));
        assert!(c.invert_better);
    }

    #[test]
    fn test_configuration_default_description() {
        let config: ScoringConfiguration = serde_json::from_str(r#"{"components": []}"#).unwrap();
        assert_eq!(config.description, DEFAULT_DESCRIPTION);
    }

    #[test]
    fn test_builtin_default_shape() {
        let config = ScoringConfiguration::builtin_default();
        let weights: Vec<f64> = config.components.iter().map(|c| c.weight).collect();
        assert_eq!(weights, vec![0.6, 0.3, 0.1]);
        assert!(config.components[1].invert_better);
        assert_eq!(config.components[1].threshold_value, Some(1.0));
        assert_eq!(config.components[2].threshold_penalty, 0.3);
    }
}
