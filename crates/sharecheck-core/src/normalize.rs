//! Conversion of candidate sources into cleaned absolute paths.

use std::io;
use std::path::PathBuf;

use sharecheck_common::error::{Result, SharecheckError};

use crate::flavor::{NativeFlavor, PathFlavor};

/// Where relative sources are resolved.
#[derive(Debug, Clone, Default)]
enum WorkingDir {
    #[default]
    Process,
    Fixed(String),
    Lookup(fn() -> io::Result<PathBuf>),
}

/// Turns a bind-mount source into a cleaned absolute path.
///
/// Relative sources resolve against the process working directory, or
/// against a fixed directory set with [`with_working_dir`](Self::with_working_dir).
#[derive(Debug, Clone, Default)]
pub struct PathNormalizer<F = NativeFlavor> {
    flavor: F,
    working_dir: WorkingDir,
}

impl<F: PathFlavor> PathNormalizer<F> {
    /// Creates a normalizer that resolves against the process working directory.
    #[must_use]
    pub const fn new(flavor: F) -> Self {
        Self {
            flavor,
            working_dir: WorkingDir::Process,
        }
    }

    /// Resolves relative sources against `dir` instead of the process
    /// working directory. `dir` should be absolute.
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<String>) -> Self {
        self.working_dir = WorkingDir::Fixed(self.flavor.clean(&dir.into()));
        self
    }

    /// Looks the working directory up with `lookup` each time a relative
    /// source is normalized, instead of asking the process.
    #[must_use]
    pub fn with_working_dir_lookup(mut self, lookup: fn() -> io::Result<PathBuf>) -> Self {
        self.working_dir = WorkingDir::Lookup(lookup);
        self
    }

    /// Normalizes `candidate`.
    ///
    /// Normalizing an already normalized path returns it unchanged. A path
    /// rooted on no volume (`\Users` on Windows) takes the volume of the
    /// working directory.
    ///
    /// # Errors
    ///
    /// Returns [`SharecheckError::Resolution`] if `candidate` needs the
    /// working directory and it cannot be determined.
    pub fn normalize(&self, candidate: &str) -> Result<String> {
        if self.flavor.is_host_absolute(candidate) || self.flavor.is_absolute(candidate) {
            return Ok(self.flavor.clean(candidate));
        }
        let parts = self.flavor.parse(candidate);
        if parts.rooted && parts.volume.is_empty() {
            let base = self.resolve_working_dir(candidate)?;
            let volume = self.flavor.parse(&base).volume;
            return Ok(self.flavor.clean(&format!("{volume}{candidate}")));
        }
        let base = self.resolve_working_dir(candidate)?;
        Ok(self.flavor.join(&base, candidate))
    }

    fn resolve_working_dir(&self, candidate: &str) -> Result<String> {
        let lookup: fn() -> io::Result<PathBuf> = match &self.working_dir {
            WorkingDir::Fixed(dir) => return Ok(dir.clone()),
            WorkingDir::Process => std::env::current_dir,
            WorkingDir::Lookup(lookup) => *lookup,
        };
        lookup()
            .map(|dir| dir.to_string_lossy().into_owned())
            .map_err(|e| SharecheckError::Resolution {
                path: candidate.to_owned(),
                source: e,
            })
    }
}

/// Normalizes `candidate` with the native flavor and process working directory.
///
/// # Errors
///
/// Returns [`SharecheckError::Resolution`] if the working directory cannot
/// be determined for a relative `candidate`.
pub fn normalize_volume_source(candidate: &str) -> Result<String> {
    PathNormalizer::new(NativeFlavor::default()).normalize(candidate)
}
