use std::path::PathBuf;

use routes_common::route::Route;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by the store and the codec.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// An identical route is already stored. The store is unchanged.
    #[error("{route} -> route already exists")]
    Duplicate { route: Route },

    /// Persisted data does not match the expected shape. Nothing was loaded.
    #[error("{location}: {reason}")]
    Validation { location: String, reason: String },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn validation(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            location: location.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
