//! Platform path conventions.
//!
//! A [`PathFlavor`] pairs the "is this a host path" predicates with the
//! lexical operations (clean, join, relative) for one convention, so the
//! rest of the crate never branches on the target platform itself.

use std::fmt;

/// A path broken into volume, root marker, and cleaned elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParts {
    /// Volume prefix (`C:`, `\\server\share`), empty on POSIX.
    pub volume: String,
    /// Whether the path starts at the root of its volume.
    pub rooted: bool,
    /// Path elements with `.` removed and `..` folded.
    pub elements: Vec<String>,
}

/// Lexical path rules for one platform.
pub trait PathFlavor: Copy + Default + fmt::Debug + Send + Sync {
    /// Preferred element separator.
    const SEPARATOR: char;

    /// Splits a volume spec into its colon-delimited fields.
    fn split_volume_spec<'a>(self, spec: &'a str) -> Vec<&'a str>;

    /// Whether `path` uses host-style absolute syntax (drive letter, UNC).
    fn is_host_absolute(self, path: &str) -> bool;

    /// Whether `path` is absolute on this platform.
    fn is_absolute(self, path: &str) -> bool;

    /// Breaks `path` into cleaned parts.
    fn parse(self, path: &str) -> PathParts;

    /// Compares two volume names or path elements.
    fn same_name(self, a: &str, b: &str) -> bool {
        a == b
    }

    /// Returns the shortest lexically equivalent form of `path`.
    ///
    /// Repeated separators collapse, `.` elements disappear, and `..`
    /// removes the preceding element. `..` directly under the root is
    /// dropped. An empty result becomes `.`.
    fn clean(self, path: &str) -> String {
        render(&self.parse(path), Self::SEPARATOR)
    }

    /// Joins `rel` onto `base` and cleans the result.
    fn join(self, base: &str, rel: &str) -> String {
        if base.is_empty() {
            return self.clean(rel);
        }
        self.clean(&format!("{base}{}{rel}", Self::SEPARATOR))
    }

    /// Returns the path that leads from `base` to `target`.
    ///
    /// Yields `"."` when both clean to the same path and `None` when no
    /// relative path exists (different volumes, or only one side rooted).
    fn relative(self, base: &str, target: &str) -> Option<String> {
        let base = self.parse(base);
        let target = self.parse(target);
        if base.rooted != target.rooted || !self.same_name(&base.volume, &target.volume) {
            return None;
        }

        let common = base
            .elements
            .iter()
            .zip(&target.elements)
            .take_while(|(b, t)| self.same_name(b, t))
            .count();
        let climb = &base.elements[common..];
        if climb.iter().any(|e| e == "..") {
            return None;
        }

        let mut rel: Vec<&str> = vec![".."; climb.len()];
        rel.extend(target.elements[common..].iter().map(String::as_str));
        if rel.is_empty() {
            return Some(".".into());
        }
        Some(rel.join(Self::SEPARATOR.to_string().as_str()))
    }
}

/// Slash-separated paths (Linux, macOS, BSD).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Posix;

impl PathFlavor for Posix {
    const SEPARATOR: char = '/';

    fn split_volume_spec<'a>(self, spec: &'a str) -> Vec<&'a str> {
        spec.split(':').collect()
    }

    fn is_host_absolute(self, _path: &str) -> bool {
        false
    }

    fn is_absolute(self, path: &str) -> bool {
        path.starts_with('/')
    }

    fn parse(self, path: &str) -> PathParts {
        let rooted = path.starts_with('/');
        PathParts {
            volume: String::new(),
            rooted,
            elements: fold_elements(rooted, path.split('/')),
        }
    }
}

/// Drive-letter and UNC paths.
///
/// `/` is accepted as a separator and rewritten to `\`. Volume names and
/// elements compare case-insensitively.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Windows;

const EXTENDED_PREFIX: &str = r"\\?\";

impl PathFlavor for Windows {
    const SEPARATOR: char = '\\';

    fn split_volume_spec<'a>(self, spec: &'a str) -> Vec<&'a str> {
        let start = if spec.starts_with(EXTENDED_PREFIX) {
            EXTENDED_PREFIX.len()
        } else {
            0
        };
        if !has_drive_scheme(spec, start) {
            return spec.split(':').collect();
        }

        // The drive colon belongs to the source field.
        let after_drive = start + 2;
        match spec[after_drive..].find(':') {
            Some(i) => {
                let end = after_drive + i;
                let mut fields = vec![&spec[..end]];
                fields.extend(spec[end + 1..].split(':'));
                fields
            }
            None => vec![spec],
        }
    }

    fn is_host_absolute(self, path: &str) -> bool {
        path.starts_with(r"\\") || has_drive_scheme(path, 0)
    }

    fn is_absolute(self, path: &str) -> bool {
        let parts = self.parse(path);
        !parts.volume.is_empty() && parts.rooted
    }

    fn parse(self, path: &str) -> PathParts {
        let path = path.replace('/', "\\");
        let (volume_len, unc) = windows_volume(&path);
        let (volume, rest) = path.split_at(volume_len);
        let rooted = unc || rest.starts_with('\\');
        PathParts {
            volume: volume.to_owned(),
            rooted,
            elements: fold_elements(rooted, rest.split('\\')),
        }
    }

    fn same_name(self, a: &str, b: &str) -> bool {
        a.to_lowercase() == b.to_lowercase()
    }
}

/// The flavor of the platform this crate was compiled for.
#[cfg(windows)]
pub type NativeFlavor = Windows;

/// The flavor of the platform this crate was compiled for.
#[cfg(not(windows))]
pub type NativeFlavor = Posix;

fn has_drive_scheme(path: &str, start: usize) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= start + 2 && bytes[start + 1] == b':' && bytes[start].is_ascii_alphabetic()
}

/// Length of the volume prefix and whether it is a UNC share.
fn windows_volume(path: &str) -> (usize, bool) {
    if has_drive_scheme(path, 0) {
        return (2, false);
    }
    if path.starts_with(EXTENDED_PREFIX) && has_drive_scheme(path, EXTENDED_PREFIX.len()) {
        return (EXTENDED_PREFIX.len() + 2, false);
    }
    let Some(server_and_share) = path.strip_prefix(r"\\") else {
        return (0, false);
    };
    if server_and_share.is_empty() || server_and_share.starts_with('\\') {
        return (0, false);
    }

    // \\server\share: the volume ends at the separator after the share name.
    let len = match server_and_share.find('\\') {
        None => path.len(),
        Some(server_end) => {
            let share_start = server_end + 1;
            server_and_share[share_start..]
                .find('\\')
                .map_or(path.len(), |share_end| 2 + share_start + share_end)
        }
    };
    (len, true)
}

fn fold_elements<'a>(rooted: bool, raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for name in raw {
        match name {
            "" | "." => {}
            ".." => {
                if out.last().is_some_and(|last| last != "..") {
                    let _ = out.pop();
                } else if !rooted {
                    out.push("..".into());
                }
            }
            _ => out.push(name.to_owned()),
        }
    }
    out
}

fn render(parts: &PathParts, separator: char) -> String {
    let mut out = parts.volume.clone();
    // A bare UNC share renders without the trailing separator.
    let bare_share = parts.volume.starts_with(r"\\")
        && !parts.volume.starts_with(EXTENDED_PREFIX)
        && parts.elements.is_empty();
    if parts.rooted && !bare_share {
        out.push(separator);
    }
    out.push_str(&parts.elements.join(separator.to_string().as_str()));
    if out.is_empty() {
        out.push('.');
    }
    out
}
