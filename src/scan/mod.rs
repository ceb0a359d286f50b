//! Local file enumeration.
//!
//! Walks a directory tree collecting the relative paths of regular files,
//! skipping well-known tooling and dependency directories plus any entry
//! whose name starts with a dot. Symlinks are followed, so a link to a
//! regular file is listed like any other file. Entries that cannot be read
//! (broken symlinks, permission errors) are skipped with a debug line rather
//! than aborting the walk.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Directory and file names that are never published.
///
/// Version-control metadata, dependency caches, virtual environments, and
/// editor/tooling state. The leading-dot rule catches most of these anyway;
/// the plain names are the exceptions.
pub const IGNORED_NAMES: &[&str] = &[
    ".git",
    "node_modules",
    ".replit",
    ".config",
    "__pycache__",
    ".upm",
    "venv",
    "pythonlibs",
    ".pythonlibs",
    "nix",
    ".cache",
    "local",
];

/// Returns true if an entry with this name is excluded from publishing.
pub fn is_ignored_name(name: &str) -> bool {
    name.starts_with('.') || IGNORED_NAMES.contains(&name)
}

/// Recursively lists the regular files under `root`, as paths relative to it.
///
/// Ordering follows directory-listing order and is not guaranteed sorted.
/// The root itself is never filtered, so scanning `.` works even though the
/// name starts with a dot.
pub fn list_files(root: &Path) -> Vec<PathBuf> {
    let walker = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 {
                return true;
            }
            entry
                .file_name()
                .to_str()
                .map(|name| !is_ignored_name(name))
                .unwrap_or(true)
        });

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!("skipping unreadable entry: {err}");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        if let Ok(relative) = entry.path().strip_prefix(root) {
            files.push(relative.to_path_buf());
        }
    }

    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;
    use std::fs;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"content").unwrap();
    }

    fn listed(root: &Path) -> BTreeSet<String> {
        list_files(root)
            .into_iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn ignores_vcs_and_dependency_dirs() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.txt");
        touch(dir.path(), ".git/config");
        touch(dir.path(), "node_modules/x.js");

        assert_eq!(listed(dir.path()), BTreeSet::from(["a.txt".to_string()]));
    }

    #[test]
    fn ignores_dotfiles_at_any_depth() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "src/main.rs");
        touch(dir.path(), "src/.hidden");
        touch(dir.path(), "docs/.notes/draft.md");

        assert_eq!(
            listed(dir.path()),
            BTreeSet::from(["src/main.rs".to_string()])
        );
    }

    #[test]
    fn nested_ignored_dir_is_pruned_whole() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "vendor/node_modules/deep/pkg.json");
        touch(dir.path(), "vendor/kept.txt");

        assert_eq!(
            listed(dir.path()),
            BTreeSet::from(["vendor/kept.txt".to_string()])
        );
    }

    #[test]
    fn returns_every_eligible_file_exactly_once() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ["a.txt", "b/c.txt", "b/d/e.txt", "f.rs"];
        for path in paths {
            touch(dir.path(), path);
        }

        let found = list_files(dir.path());
        assert_eq!(found.len(), paths.len());

        let unique: BTreeSet<_> = found.iter().collect();
        assert_eq!(unique.len(), paths.len());
    }

    #[cfg(unix)]
    #[test]
    fn symlink_to_regular_file_is_listed() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "real.txt");
        std::os::unix::fs::symlink(dir.path().join("real.txt"), dir.path().join("link.txt"))
            .unwrap();

        assert_eq!(
            listed(dir.path()),
            BTreeSet::from(["link.txt".to_string(), "real.txt".to_string()])
        );
    }

    #[cfg(unix)]
    #[test]
    fn broken_symlink_is_skipped_without_aborting() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "kept.txt");
        std::os::unix::fs::symlink(dir.path().join("gone.txt"), dir.path().join("dangling.txt"))
            .unwrap();

        assert_eq!(listed(dir.path()), BTreeSet::from(["kept.txt".to_string()]));
    }

    #[test]
    fn empty_root_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_files(dir.path()).is_empty());
    }

    #[test]
    fn plain_ignored_names_also_exclude_files() {
        // The ignore set applies to any entry, not only directories.
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "local");
        touch(dir.path(), "kept.txt");

        assert_eq!(listed(dir.path()), BTreeSet::from(["kept.txt".to_string()]));
    }

    fn arb_segment() -> impl Strategy<Value = String> {
        prop_oneof![
            4 => "[a-z][a-z0-9]{0,7}",
            1 => Just(".git".to_string()),
            1 => Just("node_modules".to_string()),
            1 => "\\.[a-z]{1,6}",
        ]
    }

    proptest! {
        #[test]
        fn never_returns_a_path_under_an_ignored_segment(
            entries in prop::collection::btree_set((arb_segment(), arb_segment()), 1..12)
        ) {
            let dir = tempfile::tempdir().unwrap();
            let mut expected = BTreeSet::new();

            for (parent, name) in &entries {
                touch(dir.path(), &format!("{parent}/{name}"));
                if !is_ignored_name(parent) && !is_ignored_name(name) {
                    expected.insert(format!("{parent}/{name}"));
                }
            }

            let found = listed(dir.path());

            for path in &found {
                for segment in path.split('/') {
                    prop_assert!(
                        !is_ignored_name(segment),
                        "listed path {path} contains ignored segment {segment}"
                    );
                }
            }

            prop_assert_eq!(found, expected);
        }
    }
}
