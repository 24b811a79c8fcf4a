//! Output folder naming for the compound and comparison modes.
//!
//! Benchmark result folders are named `<yyyyMMdd-HHmmss>_<benchmark>_...`.
//! The timestamp prefix of each contributing folder is carried into the output
//! folder name so that merged results can be traced back to their runs.

use std::collections::BTreeSet;
use std::path::Path;

use chrono::NaiveDateTime;

/// Timestamp format benchmark drivers prefix result folders with.
pub const RESULT_TIME_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Longest folder name the output layout produces.
pub const MAX_FOLDER_NAME_LEN: usize = 255;

pub const COMPOUND_PREFIX: &str = "compound_results_";
pub const COMPARISON_PREFIX: &str = "comparison_results_";

/// Root folders named `results_<x>` contribute `<x>` to the comparison name.
pub const RESULTS_FOLDER_PREFIX: &str = "results_";

/// Returns the text up to the second `_` of `folder_name` when it starts with
/// a valid benchmark timestamp, or `None`.
pub fn parse_time(folder_name: &str) -> Option<&str> {
    let first = folder_name.find('_')?;
    let second = folder_name[first + 1..].find('_')? + first + 1;
    let time = &folder_name[..second];

    NaiveDateTime::parse_and_remainder(time, RESULT_TIME_FORMAT)
        .ok()
        .map(|_| time)
}

/// Cuts `name` down to [`MAX_FOLDER_NAME_LEN`] characters.
pub fn truncate_folder_name(name: String) -> String {
    if name.chars().count() <= MAX_FOLDER_NAME_LEN {
        return name;
    }
    name.chars().take(MAX_FOLDER_NAME_LEN).collect()
}

/// `compound_results_<T>`, where `<T>` joins the distinct timestamp prefixes
/// of the given run folder names in sorted order.
pub fn compound_folder_name<'a>(run_folders: impl IntoIterator<Item = &'a str>) -> String {
    let times: BTreeSet<&str> = run_folders.into_iter().filter_map(parse_time).collect();
    let suffix = times.into_iter().collect::<Vec<_>>().join("_");

    truncate_folder_name(format!("{COMPOUND_PREFIX}{suffix}"))
}

/// `comparison_results_<S>`, where `<S>` joins the `results_`-stripped names
/// of the input roots. Roots without that prefix contribute nothing.
///
/// Only the leading `results_` is removed: a root named `results_a_results_b`
/// contributes `a_results_b`. Later occurrences are part of the benchmark
/// name and are kept on purpose.
pub fn comparison_parent_name<'a>(root_names: impl IntoIterator<Item = &'a str>) -> String {
    let suffix = root_names
        .into_iter()
        .filter_map(|n| n.strip_prefix(RESULTS_FOLDER_PREFIX))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("_");

    truncate_folder_name(format!("{COMPARISON_PREFIX}{suffix}"))
}

/// `<NNN>_<T>` for the zero-based run `index`: the 1-based index padded to
/// three digits, then the timestamp prefixes of the participating run
/// folders in the given order.
pub fn comparison_run_name<'a>(index: usize, run_folders: impl IntoIterator<Item = &'a str>) -> String {
    let suffix = run_folders
        .into_iter()
        .filter_map(parse_time)
        .collect::<Vec<_>>()
        .join("_");

    truncate_folder_name(format!("{:03}_{}", index + 1, suffix))
}

/// Final path component of `path` as a string, empty when there is none.
pub fn folder_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_accepts_timestamp_prefix() {
        assert_eq!(
            parse_time("20240312-093015_put_benchmark"),
            Some("20240312-093015_put")
        );
    }

    #[test]
    fn test_parse_time_requires_two_underscores() {
        assert_eq!(parse_time("20240312-093015_put"), None);
        assert_eq!(parse_time("20240312-093015"), None);
    }

    #[test]
    fn test_parse_time_rejects_non_timestamp() {
        assert_eq!(parse_time("results_put_benchmark"), None);
        assert_eq!(parse_time("20241340-093015_put_benchmark"), None);
    }

    #[test]
    fn test_compound_name_dedups_and_sorts() {
        let name = compound_folder_name([
            "20240312-093015_put_a",
            "20240101-000000_get_b",
            "20240312-093015_put_a",
            "misc",
        ]);

        assert_eq!(
            name,
            "compound_results_20240101-000000_get_20240312-093015_put"
        );
    }

    #[test]
    fn test_compound_name_without_timestamps() {
        assert_eq!(compound_folder_name(["misc"]), "compound_results_");
    }

    #[test]
    fn test_long_names_are_truncated() {
        let folders: Vec<String> = (0..40)
            .map(|i| format!("20240101-0000{:02}_bench{}_x", i % 60, i))
            .collect();
        let name = compound_folder_name(folders.iter().map(String::as_str));

        assert_eq!(name.len(), MAX_FOLDER_NAME_LEN);
        assert!(name.starts_with(COMPOUND_PREFIX));
    }

    #[test]
    fn test_short_names_untouched() {
        assert_eq!(truncate_folder_name("abc".to_string()), "abc");
    }

    #[test]
    fn test_comparison_parent_name() {
        let name = comparison_parent_name(["results_ignite", "results_other", "plain"]);
        assert_eq!(name, "comparison_results_ignite_other");
    }

    #[test]
    fn test_comparison_parent_strips_leading_prefix_only() {
        let name = comparison_parent_name(["results_a_results_b"]);
        assert_eq!(name, "comparison_results_a_results_b");
    }

    #[test]
    fn test_comparison_run_padding() {
        assert!(comparison_run_name(0, []).starts_with("001_"));
        assert!(comparison_run_name(8, []).starts_with("009_"));
        assert!(comparison_run_name(9, []).starts_with("010_"));
        assert!(comparison_run_name(98, []).starts_with("099_"));
        assert!(comparison_run_name(99, []).starts_with("100_"));
        assert!(comparison_run_name(999, []).starts_with("1000_"));
    }

    #[test]
    fn test_comparison_run_keeps_root_order() {
        let name = comparison_run_name(
            1,
            ["20240312-093015_put_a", "20240101-000000_put_b", "junk"],
        );
        assert_eq!(name, "002_20240312-093015_put_20240101-000000_put");
    }
}
