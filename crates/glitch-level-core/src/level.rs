//! Level model types.
//!
//! This module contains the in-memory representation of a level after the
//! description text has been tokenized and every cell token parsed.
//!
//! # Pipeline Position
//!
//! ```text
//! Level Text
//!     ↓ tokenizer
//! Cell Tokens (text + span)
//!     ↓ cell grammar
//! Cells (these types)
//!     ↓ grid parser
//! Level + SymbolTable (these types)
//!     ↓ validator
//! Playable level handed to the simulation engine
//! ```
//!
//! # Organization
//!
//! - [`tile`] - Base terrain: [`TileKind`], [`Multiplier`], [`Stacked`]
//! - [`modifier`] - Cell attachments: [`Modifier`], [`EnemyVariant`]
//! - [`cell`] - A single grid cell: [`Cell`], [`Position`]
//! - [`grid`] - The whole ragged grid: [`Level`]
//! - [`symbols`] - Trigger/door linkage: [`SymbolTable`], [`Symbol`]

pub mod cell;
pub mod grid;
pub mod modifier;
pub mod symbols;
pub mod tile;

pub use cell::*;
pub use grid::*;
pub use modifier::*;
pub use symbols::*;
pub use tile::*;
