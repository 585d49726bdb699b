//! Glitch Level Core Types
//!
//! This crate provides the foundational types for Stereo Glitch level
//! descriptions. It includes:
//!
//! - **Identifiers**: Interned trigger and goal names ([`identifier::Id`])
//! - **Level**: Tiles, modifiers, cells, the ragged level grid and its
//!   symbol table ([`level`] module)

pub mod identifier;
pub mod level;
