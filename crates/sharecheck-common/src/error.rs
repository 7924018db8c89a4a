//! Unified error types for the sharecheck workspace.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum SharecheckError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// A required resource was not found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Type of the missing resource.
        kind: &'static str,
        /// Identifier of the missing resource.
        id: String,
    },

    /// A connection URI could not be parsed.
    #[error("invalid connection URI {uri:?}: {reason}")]
    InvalidUri {
        /// The URI as supplied.
        uri: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// A relative path could not be made absolute.
    #[error("unable to resolve {path:?} against the working directory: {source}")]
    Resolution {
        /// The candidate path that was being resolved.
        path: String,
        /// Failure from the working-directory lookup.
        source: std::io::Error,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, SharecheckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_error_names_the_path() {
        let err = SharecheckError::Resolution {
            path: "./data".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "cwd removed"),
        };
        let msg = err.to_string();
        assert!(msg.contains("\"./data\""));
        assert!(msg.contains("cwd removed"));
    }

    #[test]
    fn not_found_formats_kind_and_id() {
        let err = SharecheckError::NotFound {
            kind: "machine",
            id: "ssh port 2222".into(),
        };
        assert_eq!(err.to_string(), "machine not found: ssh port 2222");
    }

    #[test]
    fn serde_errors_convert() {
        let parse: std::result::Result<u32, _> = serde_json::from_str("nope");
        let err: SharecheckError = parse.unwrap_err().into();
        assert!(matches!(err, SharecheckError::Serialization { .. }));
    }
}
