//! Error and diagnostic system for the level parser.
//!
//! Two layers live here:
//!
//! - The raw failures produced by the pipeline: [`ParseFailure`] (cell syntax,
//!   carries the unconsumed remainder of the source) and [`ValidationError`]
//!   (a cross-cell invariant is broken, document scoped).
//! - The presentation layer: [`Diagnostic`] with an [`ErrorCode`], a
//!   [`Severity`], labelled spans and help text. Failures convert into
//!   diagnostics, and one or more diagnostics are wrapped in [`ParseError`].
//!
//! # Example
//!
//! ```
//! # use glitch_level_parser::error::{Diagnostic, ErrorCode};
//! # use glitch_level_parser::Span;
//!
//! let diag = Diagnostic::error("unknown tile kind `Q`")
//!     .with_code(ErrorCode::E100)
//!     .with_label(Span::new(4..5), "not a tile kind")
//!     .with_help("cells start with one of `N`, `X` or `H`");
//! assert_eq!(diag.to_string(), "error[E100]: unknown tile kind `Q`");
//! ```

mod diagnostic;
mod error_code;
mod failure;
mod label;
mod parse_error;
mod severity;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use failure::{ParseFailure, ParseFailureKind, ValidationError, ValidationErrorKind};
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
