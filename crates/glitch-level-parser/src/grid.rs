//! Grid parser: turns a whole level text into a [`Level`].

use log::{debug, trace};

use glitch_level_core::level::{Cell, Level};

use crate::{cell::parse_cell, error::ParseFailure, tokenizer};

/// Parses every cell of `source` in row-major order.
///
/// Rows may have different lengths. Cross-cell invariants are not checked
/// here; see [`validate`](crate::validate::validate).
///
/// # Errors
///
/// Stops at the first cell token that does not parse. The returned
/// [`ParseFailure`]'s `rest` is the remainder of the entire source from the
/// start of that token onward.
pub fn parse_grid(source: &str) -> Result<Level, ParseFailure> {
    let mut rows: Vec<Vec<Cell>> = Vec::new();

    for line in tokenizer::lines(source) {
        let mut row = Vec::new();
        for token in line.tokens() {
            let cell = parse_cell(&token).map_err(|failure| {
                debug!(
                    row = token.row,
                    col = token.col,
                    token = token.text;
                    "Cell token rejected"
                );
                failure.with_rest(&source[token.span.start()..])
            })?;
            row.push(cell);
        }
        rows.push(row);
    }

    let level = Level::new(rows);
    trace!(level:?; "Parsed level grid");
    Ok(level)
}
