//! Error types for sluice operations.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    #[error("cannot open source {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot open sink {path}: {source}")]
    SinkUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed filter expression: {0}")]
    MalformedExpression(String),

    #[error("wrong number of filter values: {0}")]
    Arity(String),

    #[error("duplicate key in batch insert: {0}")]
    ConstraintViolation(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("record is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, Error>;
