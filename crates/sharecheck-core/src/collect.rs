//! Batch check of volume specs against a machine's mounts.

use std::collections::BTreeSet;
use std::io;
use std::path::PathBuf;

use sharecheck_common::types::MountEntry;

use crate::flavor::{NativeFlavor, PathFlavor};
use crate::normalize::PathNormalizer;
use crate::share::MountShareChecker;
use crate::volume::VolumeSpecParser;

/// Finds the bind-mount sources a machine cannot see.
#[derive(Debug, Clone, Default)]
pub struct UnsharedPathCollector<F = NativeFlavor> {
    parser: VolumeSpecParser<F>,
    normalizer: PathNormalizer<F>,
    checker: MountShareChecker<F>,
}

impl<F: PathFlavor> UnsharedPathCollector<F> {
    /// Creates a collector that resolves relative sources against the
    /// process working directory.
    #[must_use]
    pub const fn new(flavor: F) -> Self {
        Self {
            parser: VolumeSpecParser::new(flavor),
            normalizer: PathNormalizer::new(flavor),
            checker: MountShareChecker::new(flavor),
        }
    }

    /// Resolves relative sources against `dir` instead.
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<String>) -> Self {
        self.normalizer = self.normalizer.with_working_dir(dir);
        self
    }

    /// Looks the working directory up with `lookup` instead of asking the
    /// process.
    #[must_use]
    pub fn with_working_dir_lookup(mut self, lookup: fn() -> io::Result<PathBuf>) -> Self {
        self.normalizer = self.normalizer.with_working_dir_lookup(lookup);
        self
    }

    /// Returns the normalized bind-mount sources in `volume_specs` that no
    /// entry of `mounts` shares, sorted and without duplicates.
    ///
    /// Named volumes and malformed specs are ignored. A source whose path
    /// cannot be resolved is skipped and logged at debug level.
    pub fn collect<S: AsRef<str>>(&self, volume_specs: &[S], mounts: &[MountEntry]) -> Vec<String> {
        let mut unshared = BTreeSet::new();
        for spec in volume_specs {
            let spec = spec.as_ref();
            let Some(source) = self.parser.bind_source(spec) else {
                continue;
            };
            let normalized = match self.normalizer.normalize(source) {
                Ok(path) => path,
                Err(e) => {
                    tracing::debug!(source, error = %e, "machine volume check: unable to normalize source");
                    continue;
                }
            };
            if self.checker.is_shared(&normalized, mounts) {
                continue;
            }
            if !unshared.insert(normalized) {
                tracing::trace!(spec, "unshared source already recorded");
            }
        }
        unshared.into_iter().collect()
    }
}

/// Collects unshared bind-mount sources with the native path flavor.
pub fn collect_unshared_host_paths<S: AsRef<str>>(
    volume_specs: &[S],
    mounts: &[MountEntry],
) -> Vec<String> {
    UnsharedPathCollector::new(NativeFlavor::default()).collect(volume_specs, mounts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flavor::{Posix, Windows};

    #[test]
    fn reports_only_unshared_sources() {
        let mounts = vec![MountEntry::new("/tmp/shared")];
        let specs = [
            "/tmp/shared:/data",
            "/tmp/shared/nested:/n",
            "/tmp/other:/f",
            "/tmp/other:/f2",
            "namedVolume:/ctr",
        ];
        let missing = UnsharedPathCollector::new(Posix).collect(&specs, &mounts);
        assert_eq!(missing, vec!["/tmp/other".to_string()]);
    }

    #[test]
    fn duplicate_sources_are_reported_once() {
        let missing = UnsharedPathCollector::new(Posix).collect(&["/x:/a", "/x/:/b", "/x/./:/c"], &[]);
        assert_eq!(missing, vec!["/x".to_string()]);
    }

    #[test]
    fn output_is_sorted_not_input_ordered() {
        let specs = ["/zeta:/z", "/alpha:/a", "/mid/dir:/m"];
        let missing = UnsharedPathCollector::new(Posix).collect(&specs, &[MountEntry::new("/shared")]);
        assert_eq!(missing, vec!["/alpha", "/mid/dir", "/zeta"]);
    }

    #[test]
    fn empty_mount_list_reports_every_bind_source() {
        let specs = ["/a:/a", "vol:/v", "/b:/b:ro"];
        let missing = UnsharedPathCollector::new(Posix).collect(&specs, &[]);
        assert_eq!(missing, vec!["/a", "/b"]);
    }

    #[test]
    fn empty_spec_list_reports_nothing() {
        let specs: [&str; 0] = [];
        assert!(UnsharedPathCollector::new(Posix).collect(&specs, &[]).is_empty());
    }

    #[test]
    fn relative_sources_are_resolved_first() {
        let collector = UnsharedPathCollector::new(Posix).with_working_dir("/home/me/project");
        let mounts = vec![MountEntry::new("/home/me")];
        let specs = ["./src:/src", "../../../etc:/etc", "../other:/o"];
        assert_eq!(collector.collect(&specs, &mounts), vec!["/etc"]);
    }

    #[test]
    fn named_volumes_never_appear() {
        let specs = ["data:/data", "cache:/cache:ro", "x:/y"];
        assert!(UnsharedPathCollector::new(Posix).collect(&specs, &[]).is_empty());
    }

    #[test]
    fn accepts_owned_strings() {
        let specs = vec![String::from("/opt/app:/app")];
        let missing = UnsharedPathCollector::new(Posix).collect(&specs, &[MountEntry::new("/opt")]);
        assert!(missing.is_empty());
    }

    #[test]
    fn windows_specs_split_on_the_right_colon() {
        let mounts = vec![MountEntry::new(r"C:\Users")];
        let specs = [r"C:\Users\me\code:/code", r"D:\data:/data:ro", "vol:/v"];
        let missing = UnsharedPathCollector::new(Windows).collect(&specs, &mounts);
        assert_eq!(missing, vec![r"D:\data"]);
    }

    #[test]
    fn windows_rooted_sources_resolve_on_the_working_dir_drive() {
        let collector = UnsharedPathCollector::new(Windows).with_working_dir(r"C:\work");
        let shared_users = vec![MountEntry::new(r"C:\Users")];
        assert!(collector.collect(&["/Users/me:/data"], &shared_users).is_empty());

        let shared_cwd = vec![MountEntry::new(r"C:\work")];
        assert_eq!(collector.collect(&["/etc:/x"], &shared_cwd), vec![r"C:\etc"]);
    }

    #[test]
    fn unresolvable_sources_are_skipped_and_the_rest_still_reported() {
        let collector = UnsharedPathCollector::new(Posix)
            .with_working_dir_lookup(|| Err(io::Error::other("cwd removed")));
        let specs = ["./rel:/r", "/abs:/a", "../up:/u", "/also:/b"];
        assert_eq!(collector.collect(&specs, &[]), vec!["/abs", "/also"]);
    }
}
