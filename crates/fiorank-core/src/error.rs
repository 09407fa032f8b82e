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

//! Error types for workload analysis and ranking.
//!
//! Only [`FioRankError::Parse`] is ever returned from the per-file entry
//! points. The remaining variants describe conditions the analysis recovers
//! from (insufficient data, missing ranking functions) and are surfaced to
//! callers that want to report them.

use thiserror::Error;

/// Errors produced by the FioRank core.
///
/// Implements `Clone` so per-file failures can be collected from parallel
/// workers and attached to a [`crate::SystemAnalysis`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FioRankError {
    /// Malformed filename, invalid JSON content, or missing `jobs` array.
    #[error("Parse error in '{file}': {message}")]
    Parse {
        /// The workload file that failed to parse
        file: String,
        /// What went wrong
        message: String,
    },

    /// Not enough workloads to complete a stage of the analysis.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Invalid or incomplete ranking-function configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// JSON deserialization failure outside of a specific workload file.
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML deserialization failure.
    #[error("YAML error: {0}")]
    Yaml(String),
}

impl FioRankError {
    /// Create a parse error for a workload file.
    ///
    /// # Examples
    ///
    /// ```
    /// use fiorank_core::FioRankError;
    ///
    /// let err = FioRankError::parse("randread-101-4k.fio.json", "missing jobs array");
    /// assert!(err.to_string().contains("missing jobs array"));
    /// ```
    pub fn parse(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create an insufficient-data error.
    pub fn insufficient_data(msg: impl Into<String>) -> Self {
        Self::InsufficientData(msg.into())
    }

    /// Create a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

impl From<serde_json::Error> for FioRankError {
    fn from(source: serde_json::Error) -> Self {
        Self::Json(source.to_string())
    }
}

impl From<serde_yaml::Error> for FioRankError {
    fn from(source: serde_yaml::Error) -> Self {
        Self::Yaml(source.to_string())
    }
}

/// Result type alias for FioRank core operations.
pub type Result<T> = std::result::Result<T, FioRankError>;
