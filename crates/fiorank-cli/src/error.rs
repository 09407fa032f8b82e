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

//! Structured error types for the FioRank CLI.
//!
//! Errors are `Clone` so that per-system failures can be stored in pipeline
//! results and reported after the parallel stage completes.

use fiorank_core::FioRankError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// I/O operation failed (file read, write, directory walk).
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// A result file exceeds the configured maximum size.
    #[error(
        "File '{path}' is too large ({actual} bytes). Maximum allowed: {max} bytes ({max_mb} MB)"
    )]
    FileTooLarge {
        path: PathBuf,
        actual: u64,
        max: u64,
        max_mb: u64,
    },

    /// Error from the analysis library.
    #[error(transparent)]
    Core(#[from] FioRankError),

    /// JSON serialization/deserialization error.
    #[error("JSON format error: {message}")]
    JsonFormat {
        /// The error message
        message: String,
    },

    /// Invalid input provided by the user.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The worker thread pool could not be created.
    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}

impl CliError {
    /// Create an I/O error with path context.
    ///
    /// ```rust,no_run
    /// use fiorank_cli::error::CliError;
    /// use std::fs;
    ///
    /// let result = fs::read_to_string("randread-101-4k.fio.json")
    ///     .map_err(|e| CliError::io_error("randread-101-4k.fio.json", e));
    /// ```
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    pub fn file_too_large(path: impl Into<PathBuf>, actual: u64, max: u64) -> Self {
        Self::FileTooLarge {
            path: path.into(),
            actual,
            max,
            max_mb: max / (1024 * 1024),
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonFormat {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err = CliError::io_error(
            "report/metrics",
            io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        );
        assert_eq!(
            err.to_string(),
            "I/O error for 'report/metrics': permission denied"
        );
    }

    #[test]
    fn test_file_too_large_computes_mb() {
        let err = CliError::file_too_large("big.fio.json", 3 * 1024 * 1024, 2 * 1024 * 1024);
        match &err {
            CliError::FileTooLarge { max_mb, .. } => assert_eq!(*max_mb, 2),
            other => panic!("unexpected variant: {:?}", other),
        }
        assert!(err.to_string().contains("(2 MB)"));
    }

    #[test]
    fn test_core_error_is_transparent() {
        let err: CliError = FioRankError::parse("a.json", "missing jobs array").into();
        assert_eq!(err.to_string(), "Parse error in 'a.json': missing jobs array");
    }

    #[test]
    fn test_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CliError = json_err.into();
        assert!(matches!(err, CliError::JsonFormat { .. }));
    }

    #[test]
    fn test_clone_preserves_message() {
        let err = CliError::invalid_input("unknown format 'xml'");
        assert_eq!(err.clone().to_string(), err.to_string());
    }
}
