//! Directory scanning and grouping of same-named probe files.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::parser::INPUT_FILE_EXTENSION;

/// Base file name to every path sharing that name, in scan order.
pub type FileGroups = BTreeMap<String, Vec<PathBuf>>;

/// Groups the probe files of `root` by file name.
///
/// Files directly inside `root` and files one level down (one subdirectory
/// per run) are considered. Entries are visited in name order so that the
/// resulting path lists are deterministic. Unreadable entries are skipped
/// with a warning.
pub fn scan(root: &Path) -> FileGroups {
    let mut res = FileGroups::new();

    let entries = match sorted_entries(root) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(folder = %root.display(), error = %e, "Folder can not be listed");
            return res;
        }
    };

    for entry in entries {
        if entry.is_dir() {
            match sorted_entries(&entry) {
                Ok(files) => {
                    for file in files {
                        add_file(&file, &mut res);
                    }
                }
                Err(e) => warn!(folder = %entry.display(), error = %e, "Folder can not be listed"),
            }
        } else {
            add_file(&entry, &mut res);
        }
    }

    debug!(folder = %root.display(), groups = res.len(), "Folder scanned");
    res
}

/// Appends every path list of `src` to the matching key of `dst`.
pub fn merge_groups(dst: &mut FileGroups, src: FileGroups) {
    for (name, paths) in src {
        dst.entry(name).or_default().extend(paths);
    }
}

/// Lists the immediate subdirectories of `folder`, sorted by name.
pub fn sorted_subdirs(folder: &Path) -> std::io::Result<Vec<PathBuf>> {
    Ok(sorted_entries(folder)?
        .into_iter()
        .filter(|p| p.is_dir())
        .collect())
}

fn sorted_entries(folder: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut entries = Vec::new();

    for entry in fs::read_dir(folder)? {
        entries.push(entry?.path());
    }

    entries.sort();
    Ok(entries)
}

fn add_file(file: &Path, res: &mut FileGroups) {
    if file.is_dir() {
        return;
    }

    let Some(name) = file.file_name().and_then(|n| n.to_str()) else {
        return;
    };

    if !name.ends_with(INPUT_FILE_EXTENSION) {
        return;
    }

    if let Err(e) = File::open(file) {
        warn!(path = %file.display(), error = %e, "File can not be read");
        return;
    }

    res.entry(name.to_string()).or_default().push(file.to_path_buf());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "1,1\n").unwrap();
    }

    #[test]
    fn test_scan_groups_same_name_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        touch(&root.join("run_b/probe.csv"));
        touch(&root.join("run_a/probe.csv"));
        touch(&root.join("run_a/other.csv"));
        touch(&root.join("run_a/notes.txt"));

        let groups = scan(root);

        assert_eq!(groups.len(), 2);
        assert_eq!(
            groups["probe.csv"],
            vec![root.join("run_a/probe.csv"), root.join("run_b/probe.csv")]
        );
        assert_eq!(groups["other.csv"], vec![root.join("run_a/other.csv")]);
    }

    #[test]
    fn test_scan_includes_direct_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        touch(&root.join("probe.csv"));

        let groups = scan(root);

        assert_eq!(groups["probe.csv"], vec![root.join("probe.csv")]);
    }

    #[test]
    fn test_scan_ignores_deeper_nesting() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        touch(&root.join("run/nested/probe.csv"));

        assert!(scan(root).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_skips_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        touch(&root.join("run/probe.csv"));
        std::os::unix::fs::symlink(root.join("gone.csv"), root.join("run/dangling.csv")).unwrap();

        let groups = scan(root);

        assert_eq!(groups.len(), 1);
        assert!(groups.contains_key("probe.csv"));
    }

    #[test]
    fn test_scan_missing_folder_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan(&dir.path().join("absent")).is_empty());
    }

    #[test]
    fn test_merge_groups_concatenates() {
        let mut dst = FileGroups::new();
        dst.insert("a.csv".into(), vec![PathBuf::from("/r1/x/a.csv")]);

        let mut src = FileGroups::new();
        src.insert("a.csv".into(), vec![PathBuf::from("/r2/y/a.csv")]);
        src.insert("b.csv".into(), vec![PathBuf::from("/r2/y/b.csv")]);

        merge_groups(&mut dst, src);

        assert_eq!(
            dst["a.csv"],
            vec![PathBuf::from("/r1/x/a.csv"), PathBuf::from("/r2/y/a.csv")]
        );
        assert_eq!(dst["b.csv"].len(), 1);
    }

    #[test]
    fn test_sorted_subdirs_skips_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        fs::create_dir(root.join("002")).unwrap();
        fs::create_dir(root.join("001")).unwrap();
        touch(&root.join("loose.csv"));

        let dirs = sorted_subdirs(root).unwrap();
        assert_eq!(dirs, vec![root.join("001"), root.join("002")]);
    }
}
