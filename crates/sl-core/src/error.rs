//! Shared error type.
//!
//! Sub-crates define their own error enums; `SlError` covers what lives in
//! this crate (configuration and its I/O).

use thiserror::Error;

/// Errors produced by `sl-core`.
#[derive(Debug, Error)]
pub enum SlError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `sl-core`.
pub type SlResult<T> = Result<T, SlError>;
