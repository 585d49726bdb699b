//! Cell modifiers: walls, enemies, triggers, doors and the other attachments
//! layered on top of a tile.

use std::fmt;

use serde::Serialize;

use crate::identifier::Id;

/// Movement pattern of an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyVariant {
    /// Walks back and forth along a line (`L`, the default).
    #[default]
    Linear,
    /// Circles around its start cell (`C`).
    Circular,
    /// Stays put and watches (`S`).
    Sentry,
}

impl EnemyVariant {
    pub const ALL: [EnemyVariant; 3] = [
        EnemyVariant::Linear,
        EnemyVariant::Circular,
        EnemyVariant::Sentry,
    ];

    pub fn symbol(self) -> char {
        match self {
            EnemyVariant::Linear => 'L',
            EnemyVariant::Circular => 'C',
            EnemyVariant::Sentry => 'S',
        }
    }
}

/// An attachment on a cell.
///
/// Doors reference triggers by identifier only; the link between the two is
/// resolved through the level's [`SymbolTable`](super::SymbolTable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    Wall,
    Enemy {
        variant: EnemyVariant,
        /// Starts moving in the opposite direction.
        reversed: bool,
    },
    Box,
    Charge,
    /// Defines a trigger identifier.
    Trigger(Id),
    /// A door that opens once every referenced trigger has fired.
    Door(Vec<Id>),
    Goal(Option<Id>),
    PlayerStart,
    /// Checkpoint the player respawns at.
    StartMarker,
}

impl Modifier {
    /// The tag character that introduces this modifier after a `+`.
    pub fn tag(&self) -> char {
        match self {
            Modifier::Wall => 'W',
            Modifier::Enemy { .. } => 'E',
            Modifier::Box => 'B',
            Modifier::Charge => 'C',
            Modifier::Trigger(_) => 'T',
            Modifier::Door(_) => 'D',
            Modifier::Goal(_) => 'G',
            Modifier::PlayerStart => 'P',
            Modifier::StartMarker => 'S',
        }
    }

    /// Short human readable name, used in diagnostics and summaries.
    pub fn name(&self) -> &'static str {
        match self {
            Modifier::Wall => "wall",
            Modifier::Enemy { .. } => "enemy",
            Modifier::Box => "box",
            Modifier::Charge => "charge",
            Modifier::Trigger(_) => "trigger",
            Modifier::Door(_) => "door",
            Modifier::Goal(_) => "goal",
            Modifier::PlayerStart => "player start",
            Modifier::StartMarker => "start marker",
        }
    }

    /// Writes the tag plus any inline variant flags (everything before the
    /// multiplier).
    pub(crate) fn fmt_head(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())?;
        if let Modifier::Enemy { variant, reversed } = self {
            if *variant != EnemyVariant::default() {
                write!(f, "{}", variant.symbol())?;
            }
            if *reversed {
                f.write_str("r")?;
            }
        }
        Ok(())
    }

    /// Writes the parenthesized parameter, if this modifier carries one.
    pub(crate) fn fmt_param(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modifier::Trigger(id) | Modifier::Goal(Some(id)) => write!(f, "({id})"),
            Modifier::Door(gates) => {
                f.write_str("(")?;
                for (idx, gate) in gates.iter().enumerate() {
                    if idx > 0 {
                        f.write_str("&")?;
                    }
                    write!(f, "{gate}")?;
                }
                f.write_str(")")
            }
            _ => Ok(()),
        }
    }
}
