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

//! Unicode sparklines for latency progressions.

/// Eight levels, lowest first.
pub const GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Glyph used for every point of a flat series.
pub const FLAT_GLYPH: char = GLYPHS[4];

/// Min-max normalize `values` onto [`GLYPHS`].
///
/// ```
/// use fiorank_cli::report::sparkline::sparkline;
///
/// assert_eq!(sparkline(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]), "▁▂▃▄▅▆▇█");
/// assert_eq!(sparkline(&[3.0, 3.0]), "▅▅");
/// assert_eq!(sparkline(&[]), "");
/// ```
pub fn sparkline(values: &[f64]) -> String {
    if values.is_empty() {
        return String::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    if !range.is_finite() || range <= 0.0 {
        return std::iter::repeat(FLAT_GLYPH).take(values.len()).collect();
    }

    let top = (GLYPHS.len() - 1) as f64;
    values
        .iter()
        .map(|v| {
            let normalized = if v.is_finite() { (v - min) / range } else { 0.0 };
            let index = (normalized * top).round().clamp(0.0, top) as usize;
            GLYPHS[index]
        })
        .collect()
}

/// [`sparkline`] over `ln(1 + v)`, for series spanning orders of magnitude.
pub fn log_sparkline(values: &[f64]) -> String {
    let logged: Vec<f64> = values.iter().map(|v| v.max(0.0).ln_1p()).collect();
    sparkline(&logged)
}

/// Sparkline followed by the value range, e.g. `▁▅█ (0.1ms - 0.4ms)`.
pub fn labeled_sparkline(values: &[f64], unit: &str) -> String {
    let line = sparkline(values);
    if values.is_empty() {
        return line;
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    format!("{} ({:.3}{} - {:.3}{})", line, min, unit, max, unit)
}
