use std::io;
use std::path::PathBuf;

use foamdesk_dict::{ParseError, ValueError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaseError {
    #[error("dictionary not found: {}", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Value(#[from] ValueError),

    #[error("'{key}' is not set in {}", .path.display())]
    MissingEntry { path: PathBuf, key: String },

    #[error("invalid case path: {}", .0.display())]
    InvalidPath(PathBuf),
}

impl CaseError {
    /// Wrap a read failure, keeping "file missing" distinct from other I/O errors.
    pub(crate) fn read(path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            CaseError::NotFound { path, source }
        } else {
            CaseError::Io { path, source }
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CaseError::Io {
            path: path.into(),
            source,
        }
    }
}
