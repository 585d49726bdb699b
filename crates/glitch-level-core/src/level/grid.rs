//! The whole level grid.

use std::fmt;

use log::trace;
use serde::Serialize;

use super::{Cell, Modifier, Position, SymbolTable};

/// A parsed level: a ragged grid of cells plus its derived symbol table.
///
/// Rows may have different lengths. A level is never edited in place; a new
/// parse of the edited text replaces it.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Level {
    rows: Vec<Vec<Cell>>,
    symbols: SymbolTable,
}

impl Level {
    /// Builds a level from its rows and derives the symbol table.
    ///
    /// Trailing empty rows are dropped so that a final line break does not add
    /// a row. Empty rows in between are kept.
    pub fn new(mut rows: Vec<Vec<Cell>>) -> Self {
        while rows.last().is_some_and(Vec::is_empty) {
            rows.pop();
        }
        let symbols = SymbolTable::from_cells(rows.iter().flatten());
        trace!(rows = rows.len(), symbols = symbols.len(); "Level built");
        Self { rows, symbols }
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn cell(&self, position: Position) -> Option<&Cell> {
        self.rows.get(position.row)?.get(position.col)
    }

    /// Iterates over all cells in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flatten()
    }

    /// Returns the dimensions of the level in the form of (width, height, depth).
    ///
    /// Width is the longest row, depth the tallest modifier stack.
    pub fn dimensions(&self) -> (usize, usize, usize) {
        let height = self.rows.len();
        let width = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        let depth = self
            .iter_cells()
            .map(|cell| cell.stack_height() as usize)
            .max()
            .unwrap_or(0);
        (width, height, depth)
    }

    /// Positions of every cell carrying a player start.
    pub fn player_starts(&self) -> Vec<Position> {
        self.iter_cells()
            .filter(|cell| cell.has_modifier(|m| matches!(m, Modifier::PlayerStart)))
            .map(Cell::position)
            .collect()
    }

    /// Counts player start modifiers, including stacked ones.
    pub fn player_start_count(&self) -> usize {
        self.iter_cells()
            .flat_map(Cell::modifiers)
            .filter(|m| matches!(m.value(), Modifier::PlayerStart))
            .map(|m| m.multiplier().get() as usize)
            .sum()
    }
}

impl fmt::Display for Level {
    /// Writes the level as canonical text: tab separated cells, one row per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row_idx, row) in self.rows.iter().enumerate() {
            if row_idx > 0 {
                f.write_str("\n")?;
            }
            for (col_idx, cell) in row.iter().enumerate() {
                if col_idx > 0 {
                    f.write_str("\t")?;
                }
                write!(f, "{cell}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (width, height, depth) = self.dimensions();
        writeln!(f, "Dimensions: ({width}, {height}, {depth})")?;
        for cell in self.iter_cells() {
            writeln!(f, "Cell at {}: {cell}", cell.position())?;
        }
        Ok(())
    }
}
