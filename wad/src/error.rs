use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WadError {
    /// Bad magic, or a header/directory/picture that ends early
    #[error("{origin}: {message}")]
    Format { origin: String, message: String },

    /// The lump is described by the directory but the file holds fewer bytes
    #[error("short read of lump {name}: expected {expected} bytes, got {read}")]
    ShortRead {
        name: String,
        expected: usize,
        read: usize,
    },

    #[error("io error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("lump {0} not found")]
    NotFound(String),

    #[error("lump index {index} out of range (directory has {count} entries)")]
    Index { index: usize, count: usize },

    #[error("archive has been closed")]
    Closed,
}

impl WadError {
    /// `origin` is a file path or lump name
    pub(crate) fn format(origin: impl fmt::Display, message: impl Into<String>) -> Self {
        Self::Format {
            origin: origin.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, WadError>;
