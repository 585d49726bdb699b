//! Identifier management using string interning for efficient string storage and comparison
//!
//! Trigger names, door gate references and goal labels are all [`Id`]s. They are
//! compared far more often than they are printed, so each one is interned once and
//! carried around as a small copyable symbol.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use serde::{Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};
use thiserror::Error;

/// Global string interner for identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    f(&mut interner)
}

/// Reasons a string is rejected as an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("identifier is empty")]
    Empty,

    #[error("identifier is longer than {max} characters", max = Id::MAX_LEN)]
    TooLong,

    #[error("identifier must be ASCII alphanumeric")]
    NotAlphanumeric,
}

/// Interned identifier naming a trigger or a goal.
///
/// Identifiers are 1 to [`Id::MAX_LEN`] ASCII alphanumeric characters.
///
/// # Examples
///
/// ```
/// use glitch_level_core::identifier::Id;
///
/// let red = Id::try_from("red").unwrap();
/// assert_eq!(red, "red");
/// assert!(Id::try_from("not valid").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Maximum identifier length in characters.
    pub const MAX_LEN: usize = 10;

    /// Interns `name` without checking it.
    ///
    /// The cell grammar only hands over text it already matched against the
    /// identifier rule; everything else should go through [`TryFrom`].
    pub fn new(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }

    /// Checks `name` against the identifier rule.
    pub fn validate(name: &str) -> Result<(), IdError> {
        if name.is_empty() {
            return Err(IdError::Empty);
        }
        if name.len() > Self::MAX_LEN {
            return Err(IdError::TooLong);
        }
        if !name.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(IdError::NotAlphanumeric);
        }
        Ok(())
    }
}

impl TryFrom<&str> for Id {
    type Error = IdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::validate(value)?;
        Ok(Self::new(value))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        with_interner(|interner| match interner.resolve(self.0) {
            Some(name) => f.write_str(name),
            None => Err(fmt::Error),
        })
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        with_interner(|interner| interner.resolve(self.0) == Some(*other))
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        *self == other
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
