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

//! Discovery of system directories under a results root.
//!
//! The expected layout is `ROOT/<profile>/.../<system>/` where each system
//! directory holds `*.fio.json` files, either directly or under `logs/`.
//! Systems are grouped by profile (the first path component below ROOT).

use crate::error::CliError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Suffix of fio JSON result files.
pub const RESULT_SUFFIX: &str = ".fio.json";

/// Depth below ROOT searched for system directories.
pub const MAX_SEARCH_DEPTH: usize = 3;

/// Depth below `<system>/logs` searched for result files.
pub const MAX_LOGS_DEPTH: usize = 2;

const LOGS_DIR: &str = "logs";

static UNSAFE_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9._-]").expect("valid name regex"));

/// Replace every character outside `[A-Za-z0-9._-]` with `_`.
///
/// ```
/// use fiorank_cli::discovery::sanitize_name;
///
/// assert_eq!(sanitize_name("nvme gen4/host#1"), "nvme_gen4_host_1");
/// ```
pub fn sanitize_name(name: &str) -> String {
    UNSAFE_CHARS.replace_all(name, "_").into_owned()
}

pub fn is_result_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.ends_with(RESULT_SUFFIX))
        .unwrap_or(false)
}

/// One discovered system directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemDir {
    pub profile: String,
    pub name: String,
    pub path: PathBuf,
    /// Result files sorted by path.
    pub result_files: Vec<PathBuf>,
}

/// Systems grouped by profile, both in sorted order.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    pub profiles: BTreeMap<String, Vec<SystemDir>>,
}

impl Discovery {
    pub fn total_systems(&self) -> usize {
        self.profiles.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Every system in profile order.
    pub fn systems(&self) -> impl Iterator<Item = &SystemDir> {
        self.profiles.values().flatten()
    }
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.')
        || name.starts_with("report")
        || name == "src"
        || name == "target"
        || name == LOGS_DIR
}

fn direct_result_files(dir: &Path) -> Result<Vec<PathBuf>, CliError> {
    let mut files = Vec::new();
    let entries = std::fs::read_dir(dir).map_err(|e| CliError::io_error(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| CliError::io_error(dir, e))?;
        let path = entry.path();
        if path.is_file() && is_result_file(&path) {
            files.push(path);
        }
    }
    Ok(files)
}

fn logs_result_files(dir: &Path) -> Vec<PathBuf> {
    let logs = dir.join(LOGS_DIR);
    if !logs.is_dir() {
        return Vec::new();
    }
    WalkDir::new(&logs)
        .max_depth(MAX_LOGS_DEPTH)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                warn!(dir = %logs.display(), "skipping unreadable log entry: {}", err);
                None
            }
        })
        .filter(|e| e.file_type().is_file() && is_result_file(e.path()))
        .map(DirEntry::into_path)
        .collect()
}

/// All result files belonging to a system directory, sorted.
pub fn collect_result_files(dir: &Path) -> Result<Vec<PathBuf>, CliError> {
    let mut files = direct_result_files(dir)?;
    files.extend(logs_result_files(dir));
    files.sort();
    Ok(files)
}

/// Like [`collect_result_files`], but an unreadable directory is logged
/// and treated as holding no result files.
fn readable_result_files(dir: &Path) -> Vec<PathBuf> {
    match collect_result_files(dir) {
        Ok(files) => files,
        Err(e) => {
            warn!(dir = %dir.display(), "skipping unreadable directory: {}", e);
            Vec::new()
        }
    }
}

fn components(relative: &Path) -> Vec<String> {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

/// Derive system names by dropping path components shared by every system
/// of a profile, at the front and at the back.
///
/// A path that would be left empty falls back to its full relative path.
/// Colliding names get a numeric suffix.
///
/// ```
/// use fiorank_cli::discovery::derive_system_names;
///
/// let names = derive_system_names(&[
///     vec!["nvme".into(), "host1".into(), "run".into()],
///     vec!["nvme".into(), "host2".into(), "run".into()],
/// ]);
/// assert_eq!(names, vec!["host1", "host2"]);
/// ```
pub fn derive_system_names(paths: &[Vec<String>]) -> Vec<String> {
    let shortest = paths.iter().map(Vec::len).min().unwrap_or(0);

    let prefix = (0..shortest)
        .take_while(|&i| paths.iter().all(|p| p[i] == paths[0][i]))
        .count();
    let suffix = (0..shortest - prefix)
        .take_while(|&i| {
            let first = &paths[0][paths[0].len() - 1 - i];
            paths.iter().all(|p| &p[p.len() - 1 - i] == first)
        })
        .count();

    let mut names: Vec<String> = Vec::with_capacity(paths.len());
    for path in paths {
        let middle = &path[prefix..path.len() - suffix];
        let raw = if middle.is_empty() {
            path.join("_")
        } else {
            middle.join("_")
        };
        let base = sanitize_name(&raw);

        let mut candidate = base.clone();
        let mut n = 2;
        while names.contains(&candidate) {
            candidate = format!("{}_{}", base, n);
            n += 1;
        }
        names.push(candidate);
    }
    names
}

/// Walk `root` and group the system directories found by profile.
///
/// Directories that cannot be read are logged and skipped.
///
/// # Errors
///
/// Returns `Err` if `root` is not a directory.
pub fn discover_systems(root: &Path) -> Result<Discovery, CliError> {
    if !root.is_dir() {
        return Err(CliError::invalid_input(format!(
            "'{}' is not a directory",
            root.display()
        )));
    }

    let mut found: BTreeMap<String, Vec<(Vec<String>, PathBuf, Vec<PathBuf>)>> = BTreeMap::new();

    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(MAX_SEARCH_DEPTH)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_skipped_dir(e));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                warn!("skipping unreadable directory entry: {}", err);
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }

        let files = readable_result_files(entry.path());
        if files.is_empty() {
            continue;
        }

        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let parts = components(relative);
        let Some(profile) = parts.first().map(|p| sanitize_name(p)) else {
            continue;
        };
        debug!(dir = %entry.path().display(), files = files.len(), "found system directory");
        found
            .entry(profile)
            .or_default()
            .push((parts, entry.path().to_path_buf(), files));
    }

    let mut discovery = Discovery::default();
    for (profile, entries) in found {
        let paths: Vec<Vec<String>> = entries.iter().map(|(parts, _, _)| parts.clone()).collect();
        let names = derive_system_names(&paths);
        let systems = entries
            .into_iter()
            .zip(names)
            .map(|((_, path, result_files), name)| SystemDir {
                profile: profile.clone(),
                name,
                path,
                result_files,
            })
            .collect();
        discovery.profiles.insert(profile, systems);
    }

    Ok(discovery)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "{}").unwrap();
    }

    fn parts(p: &str) -> Vec<String> {
        p.split('/').map(String::from).collect()
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize_name("ok-name_1.2"), "ok-name_1.2");
        assert_eq!(sanitize_name("a b:c"), "a_b_c");
    }

    #[test]
    fn test_names_single_system_uses_full_path() {
        assert_eq!(derive_system_names(&[parts("nvme/host1")]), vec!["nvme_host1"]);
    }

    #[test]
    fn test_names_differing_depth() {
        let names = derive_system_names(&[parts("nvme/a"), parts("nvme/a/b")]);
        assert_eq!(names, vec!["nvme_a", "b"]);
    }

    #[test]
    fn test_names_collisions_are_suffixed() {
        let names = derive_system_names(&[parts("p/x y"), parts("p/x_y")]);
        assert_eq!(names, vec!["x_y", "x_y_2"]);
    }

    #[test]
    fn test_discover_groups_by_profile() {
        let root = tempfile::tempdir().unwrap();
        touch(&root.path().join("nvme/host1/randread-101-4k.fio.json"));
        touch(&root.path().join("nvme/host2/logs/randread-101-4k.fio.json"));
        touch(&root.path().join("sata/hostA/mixed-301-4k_10Mseq.fio.json"));
        touch(&root.path().join("sata/hostA/notes.json"));
        touch(&root.path().join("report/metrics/nvme__host1.fio.json"));
        touch(&root.path().join(".cache/x/randread-101-4k.fio.json"));

        let discovery = discover_systems(root.path()).unwrap();
        let profiles: Vec<&String> = discovery.profiles.keys().collect();
        assert_eq!(profiles, vec!["nvme", "sata"]);
        assert_eq!(discovery.total_systems(), 3);

        let nvme = &discovery.profiles["nvme"];
        assert_eq!(nvme[0].name, "host1");
        assert_eq!(nvme[1].name, "host2");
        assert_eq!(nvme[1].result_files.len(), 1);

        let sata = &discovery.profiles["sata"];
        assert_eq!(sata[0].name, "sata_hostA");
        assert_eq!(sata[0].result_files.len(), 1);
    }

    #[test]
    fn test_unreadable_directory_has_no_result_files() {
        let root = tempfile::tempdir().unwrap();
        let missing = root.path().join("vanished");
        assert!(collect_result_files(&missing).is_err());
        assert!(readable_result_files(&missing).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_skips_unreadable_system_dir() {
        use std::os::unix::fs::PermissionsExt;

        let root = tempfile::tempdir().unwrap();
        touch(&root.path().join("nvme/host1/randread-101-4k.fio.json"));
        touch(&root.path().join("nvme/locked/randread-101-4k.fio.json"));
        let locked = root.path().join("nvme/locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let result = discover_systems(root.path());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let discovery = result.unwrap();
        let nvme = &discovery.profiles["nvme"];
        assert!(nvme.iter().any(|s| s.path.ends_with("host1")));
    }

    #[test]
    fn test_discover_rejects_missing_root() {
        let root = tempfile::tempdir().unwrap();
        assert!(discover_systems(&root.path().join("nope")).is_err());
    }
}
