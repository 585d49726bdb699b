//! Error codes for the level diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E1xx` - Cell grammar errors
//! - `E2xx` - Validation errors
//! - `W2xx` - Validation warnings

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Cell Grammar Errors (E1xx)
    // =========================================================================
    /// Unknown tile kind.
    ///
    /// A cell token does not start with a known tile kind, optionally preceded
    /// by the `_` layer marker.
    E100,

    /// Unexpected cell content.
    ///
    /// The tile kind parsed but the rest of the token is not a valid sequence
    /// of `+<modifier>` suffixes: an unknown modifier tag, a bad multiplier, or
    /// a malformed parameter.
    E101,

    // =========================================================================
    // Validation Errors (E2xx)
    // =========================================================================
    /// No player start.
    E200,

    /// More than one player start.
    E201,

    /// Undefined trigger.
    ///
    /// A door is gated by an identifier that no trigger defines.
    E202,

    /// Level too large.
    E203,

    // =========================================================================
    // Validation Warnings (W2xx)
    // =========================================================================
    /// Unused trigger.
    ///
    /// A trigger defines an identifier that no door references.
    W200,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::W200 => "W200",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "unknown tile kind",
            ErrorCode::E101 => "unexpected cell content",
            ErrorCode::E200 => "missing player start",
            ErrorCode::E201 => "multiple player starts",
            ErrorCode::E202 => "undefined trigger",
            ErrorCode::E203 => "level too large",
            ErrorCode::W200 => "unused trigger",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::E202.to_string(), "E202");
        assert_eq!(ErrorCode::W200.to_string(), "W200");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E100.description(), "unknown tile kind");
        assert_eq!(ErrorCode::E202.description(), "undefined trigger");
    }
}
