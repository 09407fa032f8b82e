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

//! Named ranking functions loaded from a declarative document.
//!
//! The document is a mapping from function name to
//! [`ScoringConfiguration`]. Functions keep the order in which they appear
//! in the document; the first one is the default when no name is given.
//!
//! # Examples
//!
//! ```
//! use fiorank_core::RankingFunctions;
//!
//! let functions = RankingFunctions::from_json_str(r#"{
//!     "throughput_only": {
//!         "description": "Raw random-read throughput",
//!         "components": [{"metric_name": "randread_throughput_mbps"}]
//!     },
//!     "example_latency": {
//!         "components": [{"metric_name": "randread_latency_p99_ms", "invert_better": true}]
//!     }
//! }"#).unwrap();
//!
//! assert_eq!(functions.names(), vec!["throughput_only", "example_latency"]);
//! assert_eq!(functions.non_example_names(), vec!["throughput_only"]);
//! assert_eq!(functions.first_name(), Some("throughput_only"));
//! ```

use crate::error::Result;
use crate::scoring::config::ScoringConfiguration;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use tracing::warn;

/// Name of the document entry used when a requested function is missing.
pub const DEFAULT_FUNCTION_NAME: &str = "default";

/// Where a resolved ranking function came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingSource {
    /// The requested (or first) function in the document.
    Document,
    /// The requested function was missing; the document's `"default"` entry was used.
    DocumentDefault,
    /// Neither was available; the built-in configuration was used.
    BuiltIn,
}

/// A ranking function selected for a run.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRanking {
    pub name: String,
    pub configuration: ScoringConfiguration,
    pub source: RankingSource,
}

/// Ranking functions in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankingFunctions {
    entries: Vec<(String, ScoringConfiguration)>,
}

impl RankingFunctions {
    /// Build from explicit entries. A repeated name replaces the earlier
    /// configuration but keeps its position.
    pub fn from_entries(entries: Vec<(String, ScoringConfiguration)>) -> Self {
        let mut functions = Self::default();
        for (name, config) in entries {
            functions.insert(name, config);
        }
        functions
    }

    /// A registry containing only the built-in default under `"default"`.
    pub fn builtin() -> Self {
        Self {
            entries: vec![(
                DEFAULT_FUNCTION_NAME.to_string(),
                ScoringConfiguration::builtin_default(),
            )],
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    fn insert(&mut self, name: String, config: ScoringConfiguration) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => {
                warn!("duplicate ranking function '{}'; the last definition wins", name);
                *existing = config;
            }
            None => self.entries.push((name, config)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ScoringConfiguration> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, config)| config)
    }

    /// Function names in document order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Names that do not contain `"example"`.
    pub fn non_example_names(&self) -> Vec<&str> {
        self.names()
            .into_iter()
            .filter(|n| !n.contains("example"))
            .collect()
    }

    pub fn first_name(&self) -> Option<&str> {
        self.entries.first().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScoringConfiguration)> {
        self.entries.iter().map(|(n, c)| (n.as_str(), c))
    }

    /// Select the ranking function for a run.
    ///
    /// With no name, the first function in the document is used. A missing
    /// name falls back to the `"default"` entry and then to
    /// [`ScoringConfiguration::builtin_default`], logging a warning each
    /// time. Never fails.
    pub fn resolve(&self, name: Option<&str>) -> ResolvedRanking {
        let requested = name.or_else(|| self.first_name());

        if let Some(requested) = requested {
            if let Some(config) = self.get(requested) {
                return ResolvedRanking {
                    name: requested.to_string(),
                    configuration: config.clone(),
                    source: RankingSource::Document,
                };
            }
            warn!(
                "ranking function '{}' not found; falling back to '{}'",
                requested, DEFAULT_FUNCTION_NAME
            );
        }

        if let Some(config) = self.get(DEFAULT_FUNCTION_NAME) {
            return ResolvedRanking {
                name: DEFAULT_FUNCTION_NAME.to_string(),
                configuration: config.clone(),
                source: RankingSource::DocumentDefault,
            };
        }

        warn!(
            "no '{}' ranking function defined; using built-in default",
            DEFAULT_FUNCTION_NAME
        );
        ResolvedRanking {
            name: DEFAULT_FUNCTION_NAME.to_string(),
            configuration: ScoringConfiguration::builtin_default(),
            source: RankingSource::BuiltIn,
        }
    }
}

struct RankingFunctionsVisitor;

impl<'de> Visitor<'de> for RankingFunctionsVisitor {
    type Value = RankingFunctions;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of ranking function names to scoring configurations")
    }

    fn visit_map<M>(self, mut access: M) -> std::result::Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut functions = RankingFunctions::default();
        while let Some((name, config)) = access.next_entry::<String, ScoringConfiguration>()? {
            functions.insert(name, config);
        }
        Ok(functions)
    }
}

impl<'de> Deserialize<'de> for RankingFunctions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(RankingFunctionsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "zeta_first": {
            "description": "listed first",
            "components": [{"metric_name": "randread_iops"}]
        },
        "default": {
            "components": [{"metric_name": "randread_throughput_mbps", "weight": 2.0}]
        },
        "alpha_example": {"components": []}
    }"#;

    #[test]
    fn test_preserves_document_order() {
        let functions = RankingFunctions::from_json_str(DOC).unwrap();
        assert_eq!(functions.names(), vec!["zeta_first", "default", "alpha_example"]);
        assert_eq!(functions.first_name(), Some("zeta_first"));
        assert_eq!(functions.len(), 3);
    }

    #[test]
    fn test_non_example_names() {
        let functions = RankingFunctions::from_json_str(DOC).unwrap();
        assert_eq!(functions.non_example_names(), vec!["zeta_first", "default"]);
    }

    #[test]
    fn test_resolve_named() {
        let functions = RankingFunctions::from_json_str(DOC).unwrap();
        let resolved = functions.resolve(Some("zeta_first"));
        assert_eq!(resolved.name, "zeta_first");
        assert_eq!(resolved.source, RankingSource::Document);
        assert_eq!(resolved.configuration.description, "listed first");
    }

    #[test]
    fn test_resolve_without_name_uses_first() {
        let functions = RankingFunctions::from_json_str(DOC).unwrap();
        assert_eq!(functions.resolve(None).name, "zeta_first");
    }

    #[test]
    fn test_resolve_missing_falls_back_to_default_entry() {
        let functions = RankingFunctions::from_json_str(DOC).unwrap();
        let resolved = functions.resolve(Some("nope"));
        assert_eq!(resolved.name, "default");
        assert_eq!(resolved.source, RankingSource::DocumentDefault);
        assert_eq!(resolved.configuration.components[0].weight, 2.0);
    }

    #[test]
    fn test_resolve_falls_back_to_builtin() {
        let functions = RankingFunctions::from_json_str(r#"{"only": {"components": []}}"#).unwrap();
        let resolved = functions.resolve(Some("missing"));
        assert_eq!(resolved.source, RankingSource::BuiltIn);
        assert_eq!(resolved.configuration, ScoringConfiguration::builtin_default());

        let empty = RankingFunctions::default();
        assert_eq!(empty.resolve(None).source, RankingSource::BuiltIn);
    }

    #[test]
    fn test_yaml_document() {
        let yaml = concat!(
            "latency_first:\n",
            "  components:\n",
            "    - metric_name: randread_latency_p99_ms\n",
            "      invert_better: true\n",
            "throughput:\n",
            "  components: []\n",
        );
        let functions = RankingFunctions::from_yaml_str(yaml).unwrap();
        assert_eq!(functions.names(), vec!["latency_first", "throughput"]);
        assert!(functions.get("latency_first").unwrap().components[0].invert_better);
    }

    #[test]
    fn test_duplicate_names_last_definition_wins() {
        let functions = RankingFunctions::from_json_str(
            r#"{
                "a": {"description": "first", "components": []},
                "b": {"components": []},
                "a": {"description": "second", "components": []}
            }"#,
        )
        .unwrap();
        assert_eq!(functions.names(), vec!["a", "b"]);
        assert_eq!(functions.get("a").unwrap().description, "second");

        let functions = RankingFunctions::from_entries(vec![
            ("b".to_string(), ScoringConfiguration::new("one")),
            ("b".to_string(), ScoringConfiguration::new("two")),
        ]);
        assert_eq!(functions.len(), 1);
        assert_eq!(functions.get("b").unwrap().description, "two");
    }

    #[test]
    fn test_builtin_registry() {
        let functions = RankingFunctions::builtin();
        assert_eq!(functions.names(), vec!["default"]);
        assert_eq!(functions.resolve(None).source, RankingSource::Document);
    }

    #[test]
    fn test_rejects_non_map_document() {
        assert!(RankingFunctions::from_json_str("[1, 2]").is_err());
    }
}
