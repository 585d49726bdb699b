//! Cross-cell checks run on a parsed [`Level`].
//!
//! The grid parser only knows about one cell at a time. Everything that needs
//! the whole grid lives here: the single player start, trigger/door linkage
//! and the size limit.

use log::debug;

use glitch_level_core::level::{Level, Position};

use crate::{
    error::{Diagnostic, ErrorCode, ValidationError, ValidationErrorKind},
    tokenizer,
};

/// Limits applied while validating a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Maximum width and height of a level, in cells.
    pub max_dimension: usize,
}

impl ValidationConfig {
    pub const DEFAULT_MAX_DIMENSION: usize = 256;

    pub fn new(max_dimension: usize) -> Self {
        Self { max_dimension }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_DIMENSION)
    }
}

/// Checks the level invariants, stopping at the first violation.
///
/// In order: exactly one player start, every door gate names a defined
/// trigger, and the level fits within `config.max_dimension` in both
/// directions.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found.
pub fn validate(level: &Level, config: &ValidationConfig) -> Result<(), ValidationError> {
    check_player(level)?;
    check_triggers(level)?;
    check_size(level, config)?;
    debug!(rows = level.rows().len(); "Level validated");
    Ok(())
}

fn check_player(level: &Level) -> Result<(), ValidationError> {
    match level.player_start_count() {
        1 => Ok(()),
        0 => Err(ValidationError::new(ValidationErrorKind::MissingPlayer)),
        count => Err(ValidationError::new(
            ValidationErrorKind::MultiplePlayers {
                count,
                positions: level.player_starts(),
            },
        )),
    }
}

fn check_triggers(level: &Level) -> Result<(), ValidationError> {
    match level.symbols().undefined_references().next() {
        None => Ok(()),
        Some((id, symbol)) => Err(ValidationError::new(
            ValidationErrorKind::UndefinedTrigger {
                id,
                doors: symbol.references().to_vec(),
            },
        )),
    }
}

fn check_size(level: &Level, config: &ValidationConfig) -> Result<(), ValidationError> {
    let (width, height, _) = level.dimensions();
    if width > config.max_dimension || height > config.max_dimension {
        return Err(ValidationError::new(ValidationErrorKind::TooLarge {
            width,
            height,
            max: config.max_dimension,
        }));
    }
    Ok(())
}

/// Converts a validation error into a diagnostic labelled at the cells it
/// names in `source`. The first cell gets the primary label.
pub(crate) fn locate(error: &ValidationError, source: &str) -> Diagnostic {
    let (cells, first, others) = match error.kind() {
        ValidationErrorKind::MultiplePlayers { positions, .. } => (
            positions.as_slice(),
            "first player start".to_string(),
            "another player start".to_string(),
        ),
        ValidationErrorKind::UndefinedTrigger { id, doors } => (
            doors.as_slice(),
            format!("gated by undefined trigger `{id}`"),
            "also gated by it".to_string(),
        ),
        ValidationErrorKind::MissingPlayer | ValidationErrorKind::TooLarge { .. } => {
            return Diagnostic::from(error);
        }
    };

    let tokens = tokenizer::tokenize(source);
    let span_of = |position: &Position| {
        tokens
            .iter()
            .find(|token| Position::new(token.row, token.col) == *position)
            .map(|token| token.span)
    };

    cells
        .iter()
        .filter_map(span_of)
        .enumerate()
        .fold(Diagnostic::from(error), |diagnostic, (index, span)| {
            if index == 0 {
                diagnostic.with_label(span, &first)
            } else {
                diagnostic.with_secondary_label(span, &others)
            }
        })
}

/// Non-fatal findings: triggers that no door waits for.
pub fn lint(level: &Level) -> Vec<Diagnostic> {
    level
        .symbols()
        .unused_definitions()
        .map(|(id, symbol)| {
            let cells: Vec<String> = symbol.definitions().iter().map(ToString::to_string).collect();
            debug!(trigger = id.to_string(); "Trigger is never used by a door");
            Diagnostic::warning(format!("trigger `{id}` is never used by a door"))
                .with_code(ErrorCode::W200)
                .with_help(format!(
                    "remove `+T({id})` at {} or gate a door with `+D({id})`",
                    cells.join(", ")
                ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use glitch_level_core::identifier::Id;

    use super::*;
    use crate::{error::Severity, grid::parse_grid, span::Span};

    fn validate_source(source: &str) -> Result<(), ValidationError> {
        let level = parse_grid(source).expect("grid should parse");
        validate(&level, &ValidationConfig::default())
    }

    #[test]
    fn test_single_player_is_valid() {
        assert!(validate_source("N N+P N").is_ok());
    }

    #[test]
    fn test_missing_player() {
        let err = validate_source("N N\nN N").unwrap_err();
        assert_eq!(err.kind(), &ValidationErrorKind::MissingPlayer);
        assert_eq!(err.code(), ErrorCode::E200);
    }

    #[test]
    fn test_multiple_players_have_distinct_message() {
        let err = validate_source("N+P N\nN N+P").unwrap_err();
        assert_eq!(
            err.kind(),
            &ValidationErrorKind::MultiplePlayers {
                count: 2,
                positions: vec![Position::new(0, 0), Position::new(1, 1)],
            }
        );
        assert_ne!(
            err.message(),
            ValidationError::new(ValidationErrorKind::MissingPlayer).message()
        );
    }

    #[test]
    fn test_stacked_player_counts_twice() {
        let err = validate_source("N+Px2").unwrap_err();
        assert!(matches!(
            err.kind(),
            ValidationErrorKind::MultiplePlayers { count: 2, .. }
        ));
    }

    #[test]
    fn test_undefined_trigger_is_named() {
        let err = validate_source("N+P N+D(red) N+T(blue)").unwrap_err();
        assert_eq!(err.code(), ErrorCode::E202);
        assert!(err.message().contains("red"));
        assert_eq!(
            err.kind(),
            &ValidationErrorKind::UndefinedTrigger {
                id: Id::new("red"),
                doors: vec![Position::new(0, 1)],
            }
        );
    }

    #[test]
    fn test_trigger_defined_after_door_resolves() {
        assert!(validate_source("N+D(a&b) N+P\nN+T(b) N+T(a)").is_ok());
    }

    #[test]
    fn test_player_checked_before_triggers() {
        let err = validate_source("N+D(red)").unwrap_err();
        assert_eq!(err.kind(), &ValidationErrorKind::MissingPlayer);
    }

    #[test]
    fn test_size_limit() {
        let level = parse_grid("N N N N+P\nN").unwrap();
        assert!(validate(&level, &ValidationConfig::new(4)).is_ok());

        let err = validate(&level, &ValidationConfig::new(3)).unwrap_err();
        assert_eq!(
            err.kind(),
            &ValidationErrorKind::TooLarge {
                width: 4,
                height: 2,
                max: 3
            }
        );
    }

    #[test]
    fn test_tall_level_is_too_large() {
        let source = format!("N+P{}", "\nN".repeat(256));
        let err = validate_source(&source).unwrap_err();
        assert!(matches!(
            err.kind(),
            ValidationErrorKind::TooLarge { height: 257, .. }
        ));
    }

    #[test]
    fn test_undefined_trigger_labels_every_door() {
        let source = "N+P N+D(red)\nN+D(red&b)  N+T(b)";
        let err = validate_source(source).unwrap_err();
        let diagnostic = locate(&err, source);

        let labels = diagnostic.labels();
        assert_eq!(labels.len(), 2);
        assert!(labels[0].is_primary());
        assert_eq!(&source[labels[0].span().range()], "N+D(red)");
        assert_eq!(labels[0].message(), "gated by undefined trigger `red`");
        assert!(!labels[1].is_primary());
        assert_eq!(&source[labels[1].span().range()], "N+D(red&b)");
    }

    #[test]
    fn test_extra_player_starts_are_labelled() {
        let source = "N+P N\nN N+P";
        let err = validate_source(source).unwrap_err();
        let labels = locate(&err, source).labels().to_vec();

        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].span(), Span::new(0..3));
        assert_eq!(labels[1].span(), Span::new(8..11));
        assert_eq!(labels[1].message(), "another player start");
    }

    #[test]
    fn test_document_errors_have_no_labels() {
        let source = "N N";
        let err = validate_source(source).unwrap_err();
        assert!(locate(&err, source).labels().is_empty());
    }

    #[test]
    fn test_lint_reports_unused_triggers() {
        let level = parse_grid("N+P N+T(a) N+T(b) N+D(a)").unwrap();
        let warnings = lint(&level);

        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].severity(), Severity::Warning);
        assert_eq!(warnings[0].code(), Some(ErrorCode::W200));
        assert!(warnings[0].message().contains("`b`"));
        assert!(warnings[0].help().unwrap().contains("1:3"));
    }

    #[test]
    fn test_lint_is_quiet_for_linked_level() {
        let level = parse_grid("N+P N+T(a) N+D(a)").unwrap();
        assert!(lint(&level).is_empty());
    }
}
