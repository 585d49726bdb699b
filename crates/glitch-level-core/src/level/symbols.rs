//! Trigger and door linkage by identifier.
//!
//! Doors never point at trigger cells directly. Instead every identifier is
//! recorded once in a [`SymbolTable`] together with the cells that define it
//! (triggers) and the cells that consume it (door gates).

use indexmap::IndexMap;
use serde::Serialize;

use super::{Cell, Modifier, Position};
use crate::identifier::Id;

/// Every place an identifier appears.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Symbol {
    definitions: Vec<Position>,
    references: Vec<Position>,
}

impl Symbol {
    /// Positions of the triggers defining this identifier.
    pub fn definitions(&self) -> &[Position] {
        &self.definitions
    }

    /// Positions of the doors gated by this identifier.
    pub fn references(&self) -> &[Position] {
        &self.references
    }

    pub fn is_defined(&self) -> bool {
        !self.definitions.is_empty()
    }

    pub fn is_referenced(&self) -> bool {
        !self.references.is_empty()
    }
}

/// Identifier → occurrences, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SymbolTable {
    symbols: IndexMap<Id, Symbol>,
}

impl SymbolTable {
    /// Collects the symbols of `cells`, visited in the given order.
    pub fn from_cells<'a>(cells: impl IntoIterator<Item = &'a Cell>) -> Self {
        let mut table = Self::default();
        for cell in cells {
            for modifier in cell.modifiers() {
                match modifier.value() {
                    Modifier::Trigger(id) => table.entry(*id).definitions.push(cell.position()),
                    Modifier::Door(gates) => {
                        for gate in gates {
                            table.entry(*gate).references.push(cell.position());
                        }
                    }
                    _ => {}
                }
            }
        }
        table
    }

    fn entry(&mut self, id: Id) -> &mut Symbol {
        self.symbols.entry(id).or_default()
    }

    pub fn get(&self, id: Id) -> Option<&Symbol> {
        self.symbols.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Id, &Symbol)> {
        self.symbols.iter().map(|(id, symbol)| (*id, symbol))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Identifiers some door waits for but no trigger defines.
    pub fn undefined_references(&self) -> impl Iterator<Item = (Id, &Symbol)> {
        self.iter()
            .filter(|(_, symbol)| symbol.is_referenced() && !symbol.is_defined())
    }

    /// Identifiers defined by a trigger that no door waits for.
    pub fn unused_definitions(&self) -> impl Iterator<Item = (Id, &Symbol)> {
        self.iter()
            .filter(|(_, symbol)| symbol.is_defined() && !symbol.is_referenced())
    }
}
