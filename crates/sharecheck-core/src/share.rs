//! Ancestor/descendant test against a machine's shared mount roots.

use sharecheck_common::types::MountEntry;

use crate::flavor::{NativeFlavor, PathFlavor};

/// Decides whether a normalized path is visible inside the machine.
///
/// The test is lexical. Paths that reach a shared root only through a
/// symlink are reported as not shared.
#[derive(Debug, Clone, Copy, Default)]
pub struct MountShareChecker<F = NativeFlavor> {
    flavor: F,
}

impl<F: PathFlavor> MountShareChecker<F> {
    /// Creates a checker for the given path flavor.
    #[must_use]
    pub const fn new(flavor: F) -> Self {
        Self { flavor }
    }

    /// Returns `true` if `path` equals, or lies below, the source of any
    /// entry in `mounts`. Entries are tried in order; entries with an empty
    /// source are ignored. An empty slice shares nothing.
    pub fn is_shared(&self, path: &str, mounts: &[MountEntry]) -> bool {
        if mounts.is_empty() {
            return false;
        }
        let path = self.flavor.clean(path);
        for mount in mounts {
            if mount.source.is_empty() {
                continue;
            }
            let source = self.flavor.clean(&mount.source);
            let Some(rel) = self.flavor.relative(&source, &path) else {
                continue;
            };
            if rel == "." {
                return true;
            }
            if rel.split(F::SEPARATOR).next() == Some("..") {
                continue;
            }
            return true;
        }
        false
    }
}

/// Returns whether `path` is shared by `mounts`, using the native path flavor.
pub fn is_path_shared_with_machine(path: &str, mounts: &[MountEntry]) -> bool {
    MountShareChecker::new(NativeFlavor::default()).is_shared(path, mounts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flavor::{Posix, Windows};

    fn mounts(sources: &[&str]) -> Vec<MountEntry> {
        sources.iter().copied().map(MountEntry::new).collect()
    }

    #[test]
    fn root_itself_is_shared() {
        let checker = MountShareChecker::new(Posix);
        assert!(checker.is_shared("/tmp/shared", &mounts(&["/tmp/shared"])));
    }

    #[test]
    fn descendants_at_any_depth_are_shared() {
        let checker = MountShareChecker::new(Posix);
        let m = mounts(&["/tmp/shared"]);
        assert!(checker.is_shared("/tmp/shared/child", &m));
        assert!(checker.is_shared("/tmp/shared/child/nested", &m));
        assert!(checker.is_shared("/tmp/shared/a/b/c/d/e", &m));
    }

    #[test]
    fn siblings_and_parents_are_not_shared() {
        let checker = MountShareChecker::new(Posix);
        let m = mounts(&["/tmp/shared"]);
        assert!(!checker.is_shared("/tmp/elsewhere", &m));
        assert!(!checker.is_shared("/tmp", &m));
        assert!(!checker.is_shared("/", &m));
    }

    #[test]
    fn name_prefix_is_not_ancestry() {
        let checker = MountShareChecker::new(Posix);
        assert!(!checker.is_shared("/tmp/shared-other", &mounts(&["/tmp/shared"])));
        assert!(!checker.is_shared("/tmp/sharedx/y", &mounts(&["/tmp/shared"])));
    }

    #[test]
    fn child_named_with_dots_is_still_a_descendant() {
        let checker = MountShareChecker::new(Posix);
        assert!(checker.is_shared("/tmp/shared/..hidden", &mounts(&["/tmp/shared"])));
    }

    #[test]
    fn empty_mount_list_shares_nothing() {
        let checker = MountShareChecker::new(Posix);
        assert!(!checker.is_shared("/tmp/shared", &[]));
        assert!(!checker.is_shared("/", &[]));
    }

    #[test]
    fn mount_sources_are_cleaned_before_comparison() {
        let checker = MountShareChecker::new(Posix);
        let m = mounts(&["/Users/me/", "/opt//data/./x/.."]);
        assert!(checker.is_shared("/Users/me/code", &m));
        assert!(checker.is_shared("/opt/data/file", &m));
    }

    #[test]
    fn any_matching_entry_is_enough() {
        let checker = MountShareChecker::new(Posix);
        let m = mounts(&["/a", "", "/b/c", "/d"]);
        assert!(checker.is_shared("/b/c/e", &m));
        assert!(checker.is_shared("/d", &m));
        assert!(!checker.is_shared("/b", &m));
    }

    #[test]
    fn root_mount_shares_everything_absolute() {
        let checker = MountShareChecker::new(Posix);
        assert!(checker.is_shared("/anything/at/all", &mounts(&["/"])));
    }

    #[test]
    fn empty_sources_are_skipped() {
        let checker = MountShareChecker::new(Posix);
        assert!(!checker.is_shared("/tmp", &mounts(&[""])));
    }

    #[test]
    fn windows_drives_compare_case_insensitively() {
        let checker = MountShareChecker::new(Windows);
        let m = mounts(&[r"C:\Users"]);
        assert!(checker.is_shared(r"c:\users\me\code", &m));
        assert!(!checker.is_shared(r"D:\Users\me", &m));
        assert!(!checker.is_shared(r"C:\Temp", &m));
    }

    #[test]
    fn native_helper_matches_checker() {
        let m = mounts(&["/srv"]);
        assert_eq!(
            is_path_shared_with_machine("/srv/x", &m),
            MountShareChecker::new(NativeFlavor::default()).is_shared("/srv/x", &m)
        );
    }
}
