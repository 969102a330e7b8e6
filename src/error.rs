//! Error types for fwdlist.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FwdListError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("No valid domains extracted from {0}")]
    EmptyResult(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
