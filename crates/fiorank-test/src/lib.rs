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

//! Shared test fixtures for FioRank crates.
//!
//! # Quick Start
//!
//! ```rust
//! use fiorank_test::builders::{FioDocumentBuilder, FioJobBuilder};
//! use fiorank_test::scenarios;
//!
//! // A single hand-built fio document
//! let json = FioDocumentBuilder::new()
//!     .job(FioJobBuilder::new("randread").read(4096.0, 1024.0))
//!     .to_json();
//! assert!(json.contains("\"jobname\":\"randread\""));
//!
//! // A complete system directory's worth of workloads
//! let files = scenarios::knee_system();
//! assert!(files.iter().any(|(name, _)| name == "mixed-303-16k_uncapped.fio.json"));
//! ```

pub mod builders;
pub mod scenarios;

pub use builders::{FioDocumentBuilder, FioJobBuilder, MetricsBuilder};
pub use scenarios::WorkloadFile;
