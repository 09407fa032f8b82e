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

//! Unit normalization applied when metrics are persisted.

/// fio reports bandwidth in KiB/s; persisted throughput is MiB/s.
pub const KIB_PER_MIB: f64 = 1024.0;

/// Nanoseconds per millisecond.
pub const NANOS_PER_MILLI: f64 = 1_000_000.0;

/// Latencies at or above 10 seconds are corrupt samples.
pub const CORRUPT_LATENCY_NS: f64 = 1e10;

/// Convert fio bandwidth (KiB/s) to MiB/s.
#[inline]
pub fn kbps_to_mbps(kbps: f64) -> f64 {
    kbps / KIB_PER_MIB
}

/// Convert nanoseconds to fractional milliseconds.
#[inline]
pub fn ns_to_ms(ns: f64) -> f64 {
    ns / NANOS_PER_MILLI
}

/// Keep a raw latency sample only if it is finite, non-negative and below
/// [`CORRUPT_LATENCY_NS`].
pub fn sanitize_latency_ns(ns: f64) -> Option<f64> {
    if ns.is_finite() && ns >= 0.0 && ns < CORRUPT_LATENCY_NS {
        Some(ns)
    } else {
        None
    }
}
