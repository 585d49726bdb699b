//! A single grid cell.

use std::fmt;

use serde::Serialize;

use super::{Modifier, Stacked, TileKind};

/// Zero-based grid coordinates. `row` is the source line index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row + 1, self.col + 1)
    }
}

/// One parsed cell: its tile, layer flag and ordered modifiers.
///
/// `Display` writes the canonical cell token, which parses back to an equal
/// cell. Explicit `x1` multipliers are dropped in the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    position: Position,
    tile: Stacked<TileKind>,
    underground: bool,
    modifiers: Vec<Stacked<Modifier>>,
}

impl Cell {
    pub fn new(
        position: Position,
        tile: Stacked<TileKind>,
        underground: bool,
        modifiers: Vec<Stacked<Modifier>>,
    ) -> Self {
        Self {
            position,
            tile,
            underground,
            modifiers,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn tile(&self) -> &Stacked<TileKind> {
        &self.tile
    }

    /// Whether the cell belongs to the alternate (underground) layer.
    pub fn is_underground(&self) -> bool {
        self.underground
    }

    /// Modifiers in source order.
    pub fn modifiers(&self) -> &[Stacked<Modifier>] {
        &self.modifiers
    }

    pub fn has_modifier(&self, predicate: impl Fn(&Modifier) -> bool) -> bool {
        self.modifiers.iter().any(|m| predicate(m.value()))
    }

    /// Total number of stacked modifier layers on this cell.
    pub fn stack_height(&self) -> u32 {
        self.modifiers.iter().map(|m| m.multiplier().get()).sum()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.underground {
            f.write_str("_")?;
        }
        write!(f, "{}{}", self.tile.value().symbol(), self.tile.multiplier())?;
        for modifier in &self.modifiers {
            f.write_str("+")?;
            modifier.value().fmt_head(f)?;
            write!(f, "{}", modifier.multiplier())?;
            modifier.value().fmt_param(f)?;
        }
        Ok(())
    }
}
