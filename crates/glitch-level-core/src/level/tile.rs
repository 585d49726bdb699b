//! Base terrain kinds and layer multipliers.

use std::fmt;

use serde::Serialize;

/// Base terrain of a cell. Every cell has exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TileKind {
    /// Regular walkable floor (`N`).
    Normal,
    /// No floor at all (`X`).
    Empty,
    /// Hazard floor that glitches whatever stands on it (`H`).
    Hazard,
}

impl TileKind {
    /// All tile kinds in symbol order.
    pub const ALL: [TileKind; 3] = [TileKind::Normal, TileKind::Empty, TileKind::Hazard];

    /// The single-character symbol used in level text.
    pub fn symbol(self) -> char {
        match self {
            TileKind::Normal => 'N',
            TileKind::Empty => 'X',
            TileKind::Hazard => 'H',
        }
    }

    /// Looks up the tile kind for a level text symbol.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.symbol() == symbol)
    }
}

impl fmt::Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TileKind::Normal => "normal floor",
            TileKind::Empty => "empty",
            TileKind::Hazard => "hazard floor",
        };
        f.write_str(name)
    }
}

/// Number of stacked layers of a tile or modifier, written `x<N>`.
///
/// Always within `1..=Multiplier::MAX`; the default is a single layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Multiplier(u32);

impl Multiplier {
    /// Largest accepted multiplier.
    pub const MAX: u32 = 99;

    /// A single layer.
    pub const ONE: Multiplier = Multiplier(1);

    /// Returns `None` when `count` is zero or above [`Multiplier::MAX`].
    pub fn new(count: u32) -> Option<Self> {
        (1..=Self::MAX).contains(&count).then_some(Self(count))
    }

    /// The layer count.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Whether this is the implicit single layer.
    pub fn is_one(self) -> bool {
        self.0 == 1
    }
}

impl Default for Multiplier {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Multiplier {
    /// Writes the `x<N>` suffix, or nothing for a single layer.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_one() {
            Ok(())
        } else {
            write!(f, "x{}", self.0)
        }
    }
}

/// A tile or modifier together with its [`Multiplier`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Stacked<T> {
    value: T,
    multiplier: Multiplier,
}

impl<T> Stacked<T> {
    /// Wraps `value` with an explicit multiplier.
    pub fn new(value: T, multiplier: Multiplier) -> Self {
        Self { value, multiplier }
    }

    /// Wraps `value` as a single layer.
    pub fn single(value: T) -> Self {
        Self::new(value, Multiplier::ONE)
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn multiplier(&self) -> Multiplier {
        self.multiplier
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}
