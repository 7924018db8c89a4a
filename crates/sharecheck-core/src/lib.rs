//! # sharecheck-core
//!
//! Decides which host directories requested as bind-mount sources are not
//! reachable from inside the virtual machine that runs the container engine.
//!
//! The pipeline is four small, pure stages:
//! - **Parsing**: [`volume::VolumeSpecParser`] pulls the host source out of
//!   a `source:destination[:options]` spec and drops named volumes.
//! - **Normalization**: [`normalize::PathNormalizer`] turns the source into
//!   a cleaned absolute path.
//! - **Share check**: [`share::MountShareChecker`] tests the path against the
//!   machine's shared roots with ancestor/descendant semantics.
//! - **Collection**: [`collect::UnsharedPathCollector`] runs the stages over
//!   a batch of specs and returns the sorted, deduplicated misses.
//!
//! Every stage is generic over a [`flavor::PathFlavor`] so POSIX and
//! drive-letter path conventions share the same logic. All checks are
//! lexical: symlinks are never resolved.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod collect;
pub mod flavor;
pub mod normalize;
pub mod share;
pub mod volume;

pub use collect::{UnsharedPathCollector, collect_unshared_host_paths};
pub use flavor::{NativeFlavor, PathFlavor, Posix, Windows};
