//! # Glitch Level Parser
//!
//! Parser for the Stereo Glitch level language. This crate turns level text
//! into a validated [`Level`].
//!
//! ## Usage
//!
//! ```
//! # use glitch_level_parser::{parse, ParseError, ValidationConfig};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = "N N+W N\nN N+P N+T(red)\nX N+D(red) H";
//!
//!     let level = parse(source, &ValidationConfig::default())?;
//!     assert_eq!(level.dimensions(), (3, 3, 1));
//!     Ok(())
//! }
//! ```

pub mod cell;
pub mod error;
pub mod grid;
mod span;
pub mod tokenizer;
pub mod validate;

pub use error::{Diagnostic, ErrorCode, ParseError, ParseFailure, ValidationError};
pub use span::Span;
pub use validate::ValidationConfig;

use log::{debug, info};

use glitch_level_core::level::Level;

/// Parse source text into a validated level.
///
/// This is the main entry point for parsing level text. It runs the
/// complete pipeline:
///
/// 1. **Tokenize** - Split the source into cell tokens
/// 2. **Parse** - Parse every cell and build the grid
/// 3. **Validate** - Check the level invariants
///
/// # Errors
///
/// Returns a [`ParseError`] carrying the diagnostic of the first cell that
/// does not parse, or of the first broken invariant.
pub fn parse(source: &str, config: &ValidationConfig) -> Result<Level, ParseError> {
    debug!(bytes = source.len(); "Parsing level");

    let level = grid::parse_grid(source).map_err(|failure| ParseError::from(&failure))?;
    validate::validate(&level, config)
        .map_err(|err| ParseError::from(validate::locate(&err, source)))?;

    let (width, height, depth) = level.dimensions();
    info!(width, height, depth; "Level parsed");
    Ok(level)
}
