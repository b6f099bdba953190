//! Error types for the profile build pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the core build components.
///
/// Filesystem failures inside the rebrand pass are the one exception to
/// fatal propagation; they are collected per file in a
/// [`RebrandReport`](crate::rebrand::RebrandReport) instead.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A required configuration field is missing or malformed.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// An overlay entry point was absent when it had to be marked
    /// executable. A missing entry point means the overlay is broken.
    #[error("missing entry point '{}'", path.display())]
    MissingEntryPoint { path: PathBuf },

    /// A copy, read, write, or chmod on the working tree failed.
    #[error("filesystem operation failed for '{}': {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BuildError {
    pub(crate) fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }
}
