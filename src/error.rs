use std::path::PathBuf;

use thiserror::Error;

/// Why a package node was rejected before rendering.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("package name must not be empty")]
    EmptyName,

    #[error("max_depth must be non-negative, got {0}")]
    NegativeDepth(i64),

    #[error("{package}: {field}[{index}] is not a string")]
    NonStringEntry {
        package: String,
        field: &'static str,
        index: usize,
    },

    #[error("{package}: {field}[{index}] is empty")]
    EmptyEntry {
        package: String,
        field: &'static str,
        index: usize,
    },

    #[error("{package}: field `{field}` has the wrong type")]
    WrongType { package: String, field: &'static str },

    #[error("manifest does not describe any packages")]
    NoPackages,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("page name `{0}` would escape the output directory")]
    UnsafePageName(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
