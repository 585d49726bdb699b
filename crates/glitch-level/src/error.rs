//! Error types for level operations.
//!
//! This module provides the main error type [`GlitchLevelError`] which wraps
//! the error conditions that can occur while processing levels.

use std::io;

use thiserror::Error;

use glitch_level_parser::error::ParseError;

use crate::link::CodecError;

/// The main error type for level operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant contains structured error information with source code
/// spans, together with the source it refers to, for rich error reporting.
#[derive(Debug, Error)]
pub enum GlitchLevelError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Link error: {0}")]
    Codec(#[from] CodecError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0} is not canonically formatted")]
    Unformatted(String),
}

impl GlitchLevelError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
