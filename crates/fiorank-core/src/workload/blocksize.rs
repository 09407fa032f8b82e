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

//! Blocksize and streaming-limit tokens embedded in workload parameters.
//!
//! Supported blocksize grammars:
//!
//! | Token      | Meaning                          | Bytes    |
//! |------------|----------------------------------|----------|
//! | `512`      | bare size                        | 512      |
//! | `16k`      | size with suffix                 | 16384    |
//! | `1to4k`    | range, suffix shared by bounds   | 2560     |
//! | `512Kto1M` | range, suffix per bound          | 786432   |
//! | `1to4`     | bare numeric range               | 2.5      |
//!
//! Ranges evaluate to the mean of both bounds. Anything else is 0.0.

use once_cell::sync::Lazy;
use regex::Regex;

static SIZE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)([kKmMgG]?)$").expect("valid blocksize regex"));

static RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+)([kKmMgG]?)to(\d+)([kKmMgG]?)$").expect("valid blocksize range regex")
});

static STREAM_LIMIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|_)(\d+)Mseq").expect("valid stream limit regex"));

fn multiplier(suffix: &str) -> f64 {
    match suffix {
        "k" | "K" => 1024.0,
        "m" | "M" => 1024.0 * 1024.0,
        "g" | "G" => 1024.0 * 1024.0 * 1024.0,
        _ => 1.0,
    }
}

fn number(digits: &str) -> Option<f64> {
    digits.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// The size portion of a parameter: everything before the first `_`.
///
/// ```
/// use fiorank_core::workload::size_token;
///
/// assert_eq!(size_token("1to4k_10Mseq"), "1to4k");
/// assert_eq!(size_token("16k"), "16k");
/// ```
pub fn size_token(parameter: &str) -> &str {
    parameter.split('_').next().unwrap_or(parameter)
}

/// Parse a blocksize token into bytes.
///
/// Never fails: unparseable tokens yield 0.0, which ranks as the worst
/// possible match when comparing series.
///
/// ```
/// use fiorank_core::workload::parse_blocksize;
///
/// assert_eq!(parse_blocksize("16k"), 16384.0);
/// assert_eq!(parse_blocksize("1to4k"), 2560.0);
/// assert_eq!(parse_blocksize("uncapped"), 0.0);
/// ```
pub fn parse_blocksize(token: &str) -> f64 {
    let token = token.trim();

    if let Some(caps) = SIZE.captures(token) {
        return number(&caps[1])
            .map(|n| n * multiplier(&caps[2]))
            .unwrap_or(0.0);
    }

    if let Some(caps) = RANGE.captures(token) {
        let (Some(low), Some(high)) = (number(&caps[1]), number(&caps[3])) else {
            return 0.0;
        };
        let high_suffix = &caps[4];
        // `1to4k`: a bare lower bound takes the upper bound's suffix.
        let low_suffix = if caps[2].is_empty() {
            high_suffix
        } else {
            &caps[2]
        };
        return (low * multiplier(low_suffix) + high * multiplier(high_suffix)) / 2.0;
    }

    0.0
}

/// Streaming limit in MB/s from a `_<N>Mseq` token, `None` when uncapped.
///
/// ```
/// use fiorank_core::workload::parse_stream_limit;
///
/// assert_eq!(parse_stream_limit("16k_10Mseq"), Some(10));
/// assert_eq!(parse_stream_limit("16k_uncapped"), None);
/// ```
pub fn parse_stream_limit(parameter: &str) -> Option<u32> {
    STREAM_LIMIT
        .captures(parameter)
        .and_then(|caps| caps[1].parse::<u32>().ok())
}
