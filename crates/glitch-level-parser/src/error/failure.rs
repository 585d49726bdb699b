//! Raw pipeline failures: cell syntax errors and broken level invariants.

use std::fmt;

use thiserror::Error;

use glitch_level_core::{identifier::Id, level::Position};

use crate::{
    error::{Diagnostic, ErrorCode},
    span::Span,
};

/// Which part of the cell grammar gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailureKind {
    /// Nothing of the token matched a tile kind.
    UnknownTile,
    /// The tile kind matched, something after it did not.
    UnexpectedContent,
}

/// A cell token that does not match the cell grammar.
///
/// `rest` is the unconsumed remainder of the input: the tail of the token when
/// produced by [`parse_cell`](crate::cell::parse_cell), the tail of the whole
/// source from the failing token onward when produced by
/// [`parse_grid`](crate::grid::parse_grid). `span` covers the exact offending
/// part of the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    kind: ParseFailureKind,
    token: String,
    rest: String,
    span: Span,
}

impl ParseFailure {
    pub(crate) fn new(kind: ParseFailureKind, token: &str, rest: &str, span: Span) -> Self {
        Self {
            kind,
            token: token.to_string(),
            rest: rest.to_string(),
            span,
        }
    }

    /// Replaces the remainder, keeping everything else.
    pub(crate) fn with_rest(mut self, rest: &str) -> Self {
        self.rest = rest.to_string();
        self
    }

    pub fn kind(&self) -> ParseFailureKind {
        self.kind
    }

    /// The complete failing cell token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The unconsumed remainder of the input.
    pub fn rest(&self) -> &str {
        &self.rest
    }

    /// Byte span of the offending part of the token.
    pub fn span(&self) -> Span {
        self.span
    }

    /// The offending part of the token.
    pub fn fragment(&self) -> &str {
        let start = self.token.len() - self.span.range().len().min(self.token.len());
        &self.token[start..]
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            ParseFailureKind::UnknownTile => ErrorCode::E100,
            ParseFailureKind::UnexpectedContent => ErrorCode::E101,
        }
    }

    fn help(&self) -> &'static str {
        if self.kind == ParseFailureKind::UnknownTile {
            return "a cell starts with a tile kind `N`, `X` or `H`, optionally preceded by the `_` layer marker";
        }
        match self.fragment().chars().next() {
            Some('+') => {
                "modifiers are `+W`, `+E`, `+B`, `+C`, `+P`, `+S`, `+G`, `+T(id)` and `+D(id&id)`"
            }
            Some('x') => "a multiplier is written `x<N>` with N between 1 and 99",
            Some('(') => {
                "only triggers, doors and goals take a parameter, and identifiers are 1 to 10 letters or digits"
            }
            _ => "separate cells with whitespace and modifiers with `+`",
        }
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParseFailureKind::UnknownTile => {
                write!(f, "unknown tile kind in cell `{}`", self.token)
            }
            ParseFailureKind::UnexpectedContent => write!(
                f,
                "unexpected `{}` in cell `{}`",
                self.fragment(),
                self.token
            ),
        }
    }
}

impl std::error::Error for ParseFailure {}

impl From<&ParseFailure> for Diagnostic {
    fn from(failure: &ParseFailure) -> Self {
        let label = match failure.kind {
            ParseFailureKind::UnknownTile => "not a tile kind",
            ParseFailureKind::UnexpectedContent => "cannot parse from here",
        };
        Diagnostic::error(failure.to_string())
            .with_code(failure.code())
            .with_label(failure.span, label)
            .with_help(failure.help())
    }
}

/// The broken invariant behind a [`ValidationError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationErrorKind {
    #[error("level has no player start")]
    MissingPlayer,

    #[error("level must have exactly one player start, found {count}")]
    MultiplePlayers {
        count: usize,
        positions: Vec<Position>,
    },

    #[error("door gated by undefined trigger `{id}`")]
    UndefinedTrigger { id: Id, doors: Vec<Position> },

    #[error("level is {width}x{height} cells, the maximum is {max}x{max}")]
    TooLarge {
        width: usize,
        height: usize,
        max: usize,
    },
}

/// A structurally valid level that breaks a cross-cell invariant.
///
/// Validation errors are document scoped: they are reported against the
/// whole level rather than a single cell.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(transparent)]
pub struct ValidationError {
    kind: ValidationErrorKind,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> &ValidationErrorKind {
        &self.kind
    }

    /// Human readable description of the violation.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            ValidationErrorKind::MissingPlayer => ErrorCode::E200,
            ValidationErrorKind::MultiplePlayers { .. } => ErrorCode::E201,
            ValidationErrorKind::UndefinedTrigger { .. } => ErrorCode::E202,
            ValidationErrorKind::TooLarge { .. } => ErrorCode::E203,
        }
    }

    fn help(&self) -> String {
        match &self.kind {
            ValidationErrorKind::MissingPlayer => {
                "add `+P` to the cell the player starts on".to_string()
            }
            ValidationErrorKind::MultiplePlayers { positions, .. } => {
                let cells: Vec<String> = positions.iter().map(ToString::to_string).collect();
                format!(
                    "keep a single `+P`; player starts found at {}",
                    cells.join(", ")
                )
            }
            ValidationErrorKind::UndefinedTrigger { id, doors } => {
                let cells: Vec<String> = doors.iter().map(ToString::to_string).collect();
                format!(
                    "add `+T({id})` to some cell, or fix the door at {}",
                    cells.join(", ")
                )
            }
            ValidationErrorKind::TooLarge { .. } => "split the level into smaller ones".to_string(),
        }
    }
}

impl From<&ValidationError> for Diagnostic {
    fn from(error: &ValidationError) -> Self {
        Diagnostic::error(error.message())
            .with_code(error.code())
            .with_help(error.help())
    }
}
