//! Connection URI parsing.

use std::fmt;

use sharecheck_common::error::{Result, SharecheckError};
use url::Url;

/// A parsed engine connection such as `ssh://core@127.0.0.1:52417/run/podman/podman.sock`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionUri {
    raw: String,
    url: Url,
}

impl ConnectionUri {
    /// Parses `uri`.
    ///
    /// # Errors
    ///
    /// Returns [`SharecheckError::InvalidUri`] if `uri` is not a valid absolute URI.
    pub fn parse(uri: &str) -> Result<Self> {
        let url = Url::parse(uri).map_err(|e| SharecheckError::InvalidUri {
            uri: uri.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            raw: uri.to_owned(),
            url,
        })
    }

    /// URI scheme, e.g. `ssh` or `unix`.
    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    /// Host component, if any.
    pub fn host(&self) -> Option<&str> {
        self.url.host_str()
    }

    /// Explicit port. Default ports of well-known schemes are not filled in.
    pub fn port(&self) -> Option<u16> {
        self.url.port()
    }
}

impl fmt::Display for ConnectionUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
