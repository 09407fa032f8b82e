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

//! Optimal random-read selection and mixed-series matching.

use crate::workload::{WorkloadKind, WorkloadRecord};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Random-read records that have a usable read job.
fn usable_randreads(records: &[WorkloadRecord]) -> impl Iterator<Item = &WorkloadRecord> {
    records
        .iter()
        .filter(|r| r.kind() == WorkloadKind::RandRead && r.randread_metrics().is_some())
}

/// The random-read workload with the highest read bandwidth.
///
/// Ties go to the record encountered first. Returns `None` when no
/// random-read record has a read job.
pub fn find_optimal_randread(records: &[WorkloadRecord]) -> Option<&WorkloadRecord> {
    let mut best: Option<(&WorkloadRecord, f64)> = None;
    for record in usable_randreads(records) {
        let bw = record.read_bandwidth_kbps().unwrap_or(0.0);
        match best {
            Some((_, best_bw)) if bw <= best_bw => {}
            _ => best = Some((record, bw)),
        }
    }
    best.map(|(record, _)| record)
}

/// All usable random-read records, by bandwidth descending (stable).
pub fn sorted_randreads(records: &[WorkloadRecord]) -> Vec<&WorkloadRecord> {
    let mut sorted: Vec<&WorkloadRecord> = usable_randreads(records).collect();
    sorted.sort_by(|a, b| {
        let a_bw = a.read_bandwidth_kbps().unwrap_or(0.0);
        let b_bw = b.read_bandwidth_kbps().unwrap_or(0.0);
        b_bw.total_cmp(&a_bw)
    });
    sorted
}

/// Mixed records grouped by series, iterated in ascending series order.
pub fn group_mixed_by_series(records: &[WorkloadRecord]) -> BTreeMap<u32, Vec<&WorkloadRecord>> {
    let mut groups: BTreeMap<u32, Vec<&WorkloadRecord>> = BTreeMap::new();
    for record in records.iter().filter(|r| r.kind() == WorkloadKind::Mixed) {
        groups.entry(record.series()).or_default().push(record);
    }
    groups
}

/// A mixed series chosen for knee-point analysis.
#[derive(Debug, Clone)]
pub struct SeriesMatch<'a> {
    pub series: u32,
    pub mean_blocksize: f64,
    pub distance: f64,
    pub records: Vec<&'a WorkloadRecord>,
}

/// The mixed series whose mean blocksize is closest to the optimal
/// random-read blocksize.
///
/// Series are compared in ascending order and a candidate only replaces
/// the current best when strictly closer, so equidistant series resolve
/// to the lowest series number.
pub fn find_matching_mixed_series<'a>(
    records: &'a [WorkloadRecord],
    optimal_randread: Option<&WorkloadRecord>,
) -> Option<SeriesMatch<'a>> {
    let optimal = optimal_randread?;
    let target = optimal.blocksize_bytes();

    let mut best: Option<SeriesMatch<'a>> = None;
    for (series, group) in group_mixed_by_series(records) {
        let mean_blocksize =
            group.iter().map(|r| r.blocksize_bytes()).sum::<f64>() / group.len() as f64;
        let distance = (mean_blocksize - target).abs();
        debug!(series, mean_blocksize, distance, "mixed series candidate");

        match &best {
            Some(current) if distance > current.distance => {}
            Some(current) if distance == current.distance => {
                warn!(
                    kept = current.series,
                    skipped = series,
                    "mixed series equidistant from optimal blocksize; keeping lower series"
                );
            }
            _ => {
                best = Some(SeriesMatch {
                    series,
                    mean_blocksize,
                    distance,
                    records: group,
                });
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn randread(id: u32, param: &str, bw: f64) -> WorkloadRecord {
        let doc = json!({"jobs": [{"jobname": "randread", "read": {"bw": bw, "iops": bw / 4.0}}]});
        let name = format!("randread-{}-{}.fio.json", id, param);
        WorkloadRecord::from_json_str(&name, &doc.to_string()).unwrap()
    }

    fn mixed(id: u32, param: &str) -> WorkloadRecord {
        let doc = json!({"jobs": [{"jobname": "randread", "read": {"bw": 1.0}}]});
        WorkloadRecord::from_json_str(&format!("mixed-{}-{}.fio.json", id, param), &doc.to_string())
            .unwrap()
    }

    #[test]
    fn test_optimal_randread_picks_max_bandwidth() {
        let records = vec![
            randread(101, "4k", 100.0),
            randread(102, "16k", 500.0),
            randread(103, "64k", 300.0),
        ];
        let optimal = find_optimal_randread(&records).unwrap();
        assert_eq!(optimal.read_bandwidth_kbps(), Some(500.0));
        assert_eq!(optimal.parameter(), "16k");
    }

    #[test]
    fn test_optimal_randread_tie_keeps_first() {
        let records = vec![randread(101, "4k", 500.0), randread(102, "16k", 500.0)];
        assert_eq!(find_optimal_randread(&records).unwrap().test_id(), "101");
    }

    #[test]
    fn test_optimal_randread_none_without_randreads() {
        assert!(find_optimal_randread(&[]).is_none());
        let records = vec![mixed(301, "4k_10Mseq")];
        assert!(find_optimal_randread(&records).is_none());
    }

    #[test]
    fn test_optimal_randread_skips_records_without_read_job() {
        let write_only = WorkloadRecord::from_json_str(
            "randread-104-1M.fio.json",
            r#"{"jobs": [{"jobname": "randread", "write": {"bw": 99999}}]}"#,
        )
        .unwrap();
        let records = vec![write_only, randread(101, "4k", 10.0)];
        assert_eq!(find_optimal_randread(&records).unwrap().test_id(), "101");
    }

    #[test]
    fn test_sorted_randreads_descending_and_stable() {
        let records = vec![
            randread(101, "4k", 100.0),
            randread(102, "8k", 300.0),
            randread(103, "16k", 300.0),
            randread(104, "64k", 200.0),
        ];
        let ids: Vec<&str> = sorted_randreads(&records).iter().map(|r| r.test_id()).collect();
        assert_eq!(ids, vec!["102", "103", "104", "101"]);
    }

    #[test]
    fn test_matching_series_closest_mean_blocksize() {
        let records = vec![
            randread(101, "16k", 900.0),
            mixed(301, "4k_10Mseq"),
            mixed(302, "4k_20Mseq"),
            mixed(401, "16k_10Mseq"),
            mixed(402, "16k_uncapped"),
            mixed(501, "1M_10Mseq"),
        ];
        let optimal = find_optimal_randread(&records);
        let matched = find_matching_mixed_series(&records, optimal).unwrap();
        assert_eq!(matched.series, 4);
        assert_eq!(matched.records.len(), 2);
        assert_eq!(matched.mean_blocksize, 16384.0);
        assert_eq!(matched.distance, 0.0);
    }

    #[test]
    fn test_matching_series_equidistant_prefers_lower_series() {
        // 8k sits exactly between 4k and 12k.
        let records = vec![
            randread(101, "8k", 900.0),
            mixed(501, "12k_10Mseq"),
            mixed(301, "4k_10Mseq"),
        ];
        let optimal = find_optimal_randread(&records);
        let matched = find_matching_mixed_series(&records, optimal).unwrap();
        assert_eq!(matched.series, 3);
    }

    #[test]
    fn test_matching_series_uses_size_before_underscore() {
        let records = vec![
            randread(101, "1to4k", 900.0),
            mixed(301, "1to4k_10Mseq"),
            mixed(401, "64k_10Mseq"),
        ];
        let optimal = find_optimal_randread(&records);
        let matched = find_matching_mixed_series(&records, optimal).unwrap();
        assert_eq!(matched.series, 3);
        assert_eq!(matched.mean_blocksize, 2560.0);
    }

    #[test]
    fn test_matching_series_empty_cases() {
        let records = vec![mixed(301, "4k_10Mseq")];
        assert!(find_matching_mixed_series(&records, None).is_none());

        let only_randread = vec![randread(101, "4k", 10.0)];
        let optimal = find_optimal_randread(&only_randread);
        assert!(find_matching_mixed_series(&only_randread, optimal).is_none());
    }

    #[test]
    fn test_group_mixed_by_series_ascending() {
        let records = vec![mixed(501, "4k"), mixed(301, "4k"), mixed(302, "8k")];
        let groups = group_mixed_by_series(&records);
        let keys: Vec<u32> = groups.keys().copied().collect();
        assert_eq!(keys, vec![3, 5]);
        assert_eq!(groups[&3].len(), 2);
    }
}
