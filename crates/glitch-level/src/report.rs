//! Live-editing feedback for an external editor.
//!
//! [`check`] runs the grid parser and the validator and folds the outcome
//! into a [`Report`]. Every call is independent: nothing is remembered
//! between calls, so the editor simply re-checks after each change.

use std::ops::Range;

use log::debug;
use serde::{Deserialize, Serialize};

use glitch_level_parser::{ValidationConfig, grid, validate};

/// Outcome of checking a level text.
///
/// Serialises as `{"status":"ok"}` or
/// `{"status":"error","error":{"parse_failed":{"rest":"..."}}}` /
/// `{"status":"error","error":{"validation_error":{"message":"..."}}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Report {
    Ok,
    Error { error: Failure },
}

/// Why a level text was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Failure {
    /// A cell did not parse. `rest` is the source from the failing cell on.
    ParseFailed { rest: String },
    /// The grid parsed but breaks a level invariant.
    ValidationError { message: String },
}

impl Report {
    pub fn is_ok(&self) -> bool {
        matches!(self, Report::Ok)
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Report::Ok => None,
            Report::Error { error } => Some(error),
        }
    }
}

impl Failure {
    /// Byte range of `source` an editor should highlight.
    ///
    /// For parse failures this is the first character of the first
    /// occurrence of `rest` in `source`. The search is textual, so a `rest`
    /// that also appears earlier in the document highlights that earlier
    /// spot. Validation errors cover the whole document.
    pub fn range(&self, source: &str) -> Range<usize> {
        match self {
            Failure::ParseFailed { rest } => {
                let start = source.find(rest.as_str()).unwrap_or(0);
                let width = source[start..].chars().next().map_or(0, char::len_utf8);
                start..start + width
            }
            Failure::ValidationError { .. } => 0..source.len(),
        }
    }

    pub fn message(&self) -> String {
        match self {
            Failure::ParseFailed { rest } => {
                let token = rest.split_whitespace().next().unwrap_or_default();
                format!("cannot parse cell `{token}`")
            }
            Failure::ValidationError { message } => message.clone(),
        }
    }
}

/// Checks level text with the default limits.
pub fn check(text: &str) -> Report {
    check_with(text, &ValidationConfig::default())
}

/// Checks level text against `config`.
pub fn check_with(text: &str, config: &ValidationConfig) -> Report {
    let failure = match grid::parse_grid(text) {
        Err(failure) => Failure::ParseFailed {
            rest: failure.rest().to_string(),
        },
        Ok(level) => match validate::validate(&level, config) {
            Ok(()) => return Report::Ok,
            Err(err) => Failure::ValidationError {
                message: err.message(),
            },
        },
    };
    debug!(failure:?; "Level check failed");
    Report::Error { error: failure }
}
