//! The ParseError type for a rejected level.
//!
//! [`ParseError`] wraps the [`Diagnostic`] that rejected a level, whether it
//! came from the cell grammar or from validation.

use std::fmt;

use crate::error::{Diagnostic, ParseFailure};

/// Error type for the whole parse-and-validate pipeline.
///
/// Parsing stops at the first problem, so there is exactly one diagnostic.
#[derive(Debug, Clone)]
pub struct ParseError {
    diagnostic: Diagnostic,
}

impl ParseError {
    /// The diagnostic that rejected the level.
    pub fn diagnostic(&self) -> &Diagnostic {
        &self.diagnostic
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.diagnostic, f)
    }
}

impl std::error::Error for ParseError {}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self { diagnostic }
    }
}

impl From<&ParseFailure> for ParseError {
    fn from(failure: &ParseFailure) -> Self {
        Diagnostic::from(failure).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorCode, span::Span};

    #[test]
    fn test_parse_error_from_diagnostic() {
        let diag = Diagnostic::error("missing player").with_code(ErrorCode::E200);
        let err: ParseError = diag.into();

        assert_eq!(err.diagnostic().message(), "missing player");
        assert_eq!(err.to_string(), "error[E200]: missing player");
    }

    #[test]
    fn test_parse_error_from_failure() {
        let failure = ParseFailure::new(
            crate::error::ParseFailureKind::UnknownTile,
            "Q",
            "Q",
            Span::new(0..1),
        );
        let err = ParseError::from(&failure);
        assert_eq!(err.diagnostic().code(), Some(ErrorCode::E100));
    }
}
