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

//! FioRank command-line interface library.
//!
//! Drives the core analysis over a results tree:
//!
//! 1. [`discovery`] finds system directories grouped by profile
//! 2. [`pipeline`] analyzes systems in parallel
//! 3. [`store`] persists per-system and per-profile metrics
//! 4. [`report`] renders markdown and JSON reports
//!
//! The `fiorank` binary wires these together through [`cli::Commands`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod discovery;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod store;

pub use error::CliError;
