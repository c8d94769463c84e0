use std::path::PathBuf;

use thiserror::Error;

/// Reasons a pasted hymn submission cannot become a [`crate::Hymn`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseHymnError {
    #[error("Please paste the hymn text.")]
    Empty,
    #[error("Could not parse hymn. Make sure verses start with \"1.\", \"2.\", etc.")]
    NoVerses,
    #[error("Please provide a hymn number.")]
    MissingNumber,
    #[error("Please provide a hymn title.")]
    MissingTitle,
}

/// Failures while loading a JSON content document (hymnal, liturgy, scripture).
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {0}")]
    Parse(#[from] serde_json::Error),
}

/// Reasons a typed scripture reference cannot be shown.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptureError {
    #[error("Invalid format. Please use format like \"John 3:16\" or \"Psalm 23:1-6\"")]
    InvalidFormat,
    #[error("Unknown book \"{0}\".")]
    UnknownBook(String),
    #[error("Scripture not found. Please check the reference and try again.")]
    NotFound,
}

/// Failures while loading `config.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config.toml: {0}")]
    Parse(#[from] toml::de::Error),
}
