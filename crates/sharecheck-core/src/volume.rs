//! Extraction of bind-mount sources from `--volume` specs.

use crate::flavor::{NativeFlavor, PathFlavor};

/// Pulls the host source path out of a `source:destination[:options]` spec.
#[derive(Debug, Clone, Copy, Default)]
pub struct VolumeSpecParser<F = NativeFlavor> {
    flavor: F,
}

impl<F: PathFlavor> VolumeSpecParser<F> {
    /// Creates a parser for the given path flavor.
    #[must_use]
    pub const fn new(flavor: F) -> Self {
        Self { flavor }
    }

    /// Returns the bind-mount source of `spec`, or `None` when the spec is
    /// not a bind mount.
    ///
    /// A spec is rejected when it has no destination, when its source is
    /// empty, or when the source is a named volume rather than a path. A
    /// path starts with `/` or `.`, or uses the flavor's host-style
    /// absolute syntax.
    pub fn bind_source<'a>(&self, spec: &'a str) -> Option<&'a str> {
        let fields = self.flavor.split_volume_spec(spec);
        if fields.len() < 2 {
            return None;
        }
        let source = fields[0];
        if source.is_empty() {
            return None;
        }
        if source.starts_with('/') || source.starts_with('.') || self.flavor.is_host_absolute(source) {
            return Some(source);
        }
        tracing::trace!(spec, "named volume, not a bind mount");
        None
    }
}

/// Returns the bind-mount source of `spec` using the native path flavor.
pub fn extract_bind_mount_source(spec: &str) -> Option<&str> {
    VolumeSpecParser::new(NativeFlavor::default()).bind_source(spec)
}
