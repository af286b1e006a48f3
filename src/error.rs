//! Error types shared by both pipelines.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("missing required property {key}; set it in the environment or the taskbridge config file")]
    ConfigurationMissing { key: String },

    #[error("failed to load properties from {path:?}: {message}")]
    ConfigFile { path: PathBuf, message: String },

    #[error("failed to fetch {what}: {message}")]
    UpstreamFetch { what: String, message: String },

    #[error("failed to write {what}: {message}")]
    DestinationWrite { what: String, message: String },

    #[error("failed to clean up {what}: {message}")]
    Cleanup { what: String, message: String },

    #[error("{what} \"{name}\" not found")]
    LookupMiss { what: String, name: String },

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    pub fn missing<S: Into<String>>(key: S) -> Self {
        Self::ConfigurationMissing { key: key.into() }
    }

    pub fn fetch<W: Into<String>, M: ToString>(what: W, message: M) -> Self {
        Self::UpstreamFetch {
            what: what.into(),
            message: message.to_string(),
        }
    }

    pub fn write<W: Into<String>, M: ToString>(what: W, message: M) -> Self {
        Self::DestinationWrite {
            what: what.into(),
            message: message.to_string(),
        }
    }

    pub fn cleanup<W: Into<String>, M: ToString>(what: W, message: M) -> Self {
        Self::Cleanup {
            what: what.into(),
            message: message.to_string(),
        }
    }

    pub fn lookup_miss<W: Into<String>, N: Into<String>>(what: W, name: N) -> Self {
        Self::LookupMiss {
            what: what.into(),
            name: name.into(),
        }
    }

    /// Whether this is a cleanup failure.
    pub fn is_cleanup(&self) -> bool {
        matches!(self, Error::Cleanup { .. })
    }

    /// Reclassify as a cleanup failure of `what`. Cleanup errors pass
    /// through as they are.
    pub fn into_cleanup<W: Into<String>>(self, what: W) -> Self {
        if self.is_cleanup() {
            self
        } else {
            Self::cleanup(what, self)
        }
    }
}
