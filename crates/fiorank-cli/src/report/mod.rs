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

//! Report rendering.
//!
//! - [`markdown`]: system, profile and ranking reports
//! - [`json`]: run manifest and machine-readable rankings
//! - [`sparkline`]: Unicode sparklines used inside the markdown

pub mod json;
pub mod markdown;
pub mod sparkline;

pub use json::{render_ranking_json, FailedSystem, Manifest, ManifestProfile, MANIFEST_FILE};
pub use markdown::{
    performance_class, render_cross_profile_report, render_profile_report, render_ranking_report,
    render_system_report,
};

/// File name of the cross-profile comparison report.
pub const CROSS_PROFILE_REPORT: &str = "CROSS_PROFILE_COMPARISON.md";

/// `<profile>__<system>.md`
pub fn system_report_name(profile: &str, system: &str) -> String {
    format!("{}__{}.md", profile, system)
}

/// `PROFILE_<profile>.md`
pub fn profile_report_name(profile: &str) -> String {
    format!("PROFILE_{}.md", profile)
}

/// `RANKING_<function>.md`
pub fn ranking_report_name(function: &str) -> String {
    format!("RANKING_{}.md", crate::discovery::sanitize_name(function))
}
