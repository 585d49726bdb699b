//! Grammar for a single cell token.
//!
//! ```text
//! cell       := '_'? tile multiplier? ('+' modifier)*
//! tile       := 'N' | 'X' | 'H'
//! multiplier := 'x' [0-9]+                 value 1..=99
//! modifier   := 'W' | 'B' | 'C' | 'P' | 'S'
//!             | 'E' ('L' | 'C' | 'S')? 'r'?
//!             | 'T' multiplier? '(' id ')'
//!             | 'D' multiplier? '(' id ('&' id)* ')'
//!             | 'G' multiplier? ('(' id ')')?
//! id         := [A-Za-z0-9]{1,10}
//! ```
//!
//! Plain modifiers and enemies take an optional multiplier directly after the
//! tag (and enemy flags). The parser consumes the longest prefix of the token
//! that forms a valid cell; whatever is left over is reported verbatim in the
//! [`ParseFailure`].

use winnow::{
    Parser as _,
    ascii::digit1,
    combinator::{delimited, opt, preceded, repeat, separated},
    error::{ContextError, ErrMode, StrContext},
    stream::{LocatingSlice, Location},
    token::{any, take_while},
};

use glitch_level_core::{
    identifier::Id,
    level::{Cell, EnemyVariant, Modifier, Multiplier, Position, Stacked, TileKind},
};

use crate::{
    error::{ParseFailure, ParseFailureKind},
    span::Span,
    tokenizer::CellToken,
};

type Input<'src> = LocatingSlice<&'src str>;
type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

/// Everything a cell token describes, before it is placed on the grid.
struct CellBody {
    underground: bool,
    tile: Stacked<TileKind>,
    modifiers: Vec<Stacked<Modifier>>,
}

fn backtrack() -> ErrMode<ContextError> {
    ErrMode::Backtrack(ContextError::new())
}

/// Parse the optional `_` layer marker
fn layer_marker(input: &mut Input<'_>) -> IResult<bool> {
    opt('_').map(|marker| marker.is_some()).parse_next(input)
}

fn tile_kind(input: &mut Input<'_>) -> IResult<TileKind> {
    any.verify_map(TileKind::from_symbol)
        .context(StrContext::Label("tile kind"))
        .parse_next(input)
}

/// Parse `x<N>`
fn multiplier(input: &mut Input<'_>) -> IResult<Multiplier> {
    preceded(
        'x',
        digit1.verify_map(|digits: &str| digits.parse::<u32>().ok().and_then(Multiplier::new)),
    )
    .context(StrContext::Label("multiplier"))
    .parse_next(input)
}

/// Parse an optional multiplier, defaulting to a single layer
fn layers(input: &mut Input<'_>) -> IResult<Multiplier> {
    opt(multiplier)
        .map(Option::unwrap_or_default)
        .parse_next(input)
}

fn identifier(input: &mut Input<'_>) -> IResult<Id> {
    take_while(1..=Id::MAX_LEN, |c: char| c.is_ascii_alphanumeric())
        .map(Id::new)
        .context(StrContext::Label("identifier"))
        .parse_next(input)
}

/// Parse `(id)`
fn single_param(input: &mut Input<'_>) -> IResult<Id> {
    delimited('(', identifier, ')').parse_next(input)
}

/// Parse `(id&id&...)`
fn gate_list(input: &mut Input<'_>) -> IResult<Vec<Id>> {
    delimited('(', separated(1.., identifier, '&'), ')')
        .context(StrContext::Label("door gate list"))
        .parse_next(input)
}

fn enemy_variant(input: &mut Input<'_>) -> IResult<EnemyVariant> {
    any.verify_map(|c: char| {
        EnemyVariant::ALL
            .into_iter()
            .find(|variant| variant.symbol() == c)
    })
    .parse_next(input)
}

/// Parse a modifier after its `+`
fn modifier(input: &mut Input<'_>) -> IResult<Stacked<Modifier>> {
    let tag = any.context(StrContext::Label("modifier")).parse_next(input)?;

    let value = match tag {
        'W' => Modifier::Wall,
        'B' => Modifier::Box,
        'C' => Modifier::Charge,
        'P' => Modifier::PlayerStart,
        'S' => Modifier::StartMarker,
        'E' => {
            let variant = opt(enemy_variant).parse_next(input)?.unwrap_or_default();
            let reversed = opt('r').parse_next(input)?.is_some();
            Modifier::Enemy { variant, reversed }
        }
        'T' => {
            let count = layers(input)?;
            let id = single_param(input)?;
            return Ok(Stacked::new(Modifier::Trigger(id), count));
        }
        'D' => {
            let count = layers(input)?;
            let gates = gate_list(input)?;
            return Ok(Stacked::new(Modifier::Door(gates), count));
        }
        'G' => {
            let count = layers(input)?;
            let label = opt(single_param).parse_next(input)?;
            return Ok(Stacked::new(Modifier::Goal(label), count));
        }
        _ => return Err(backtrack()),
    };

    let count = layers(input)?;
    Ok(Stacked::new(value, count))
}

fn cell_body(input: &mut Input<'_>) -> IResult<CellBody> {
    let underground = layer_marker(input)?;
    let tile = tile_kind(input)?;
    let tile_layers = layers(input)?;
    let modifiers: Vec<Stacked<Modifier>> =
        repeat(0.., preceded('+', modifier)).parse_next(input)?;

    Ok(CellBody {
        underground,
        tile: Stacked::new(tile, tile_layers),
        modifiers,
    })
}

/// Parses one cell token.
///
/// # Errors
///
/// Returns a [`ParseFailure`] whose `rest` is the unconsumed suffix of the
/// token: the whole token when no tile kind could be read, otherwise
/// everything after the longest valid prefix.
pub fn parse_cell(token: &CellToken<'_>) -> Result<Cell, ParseFailure> {
    let mut input = LocatingSlice::new(token.text);

    let Ok(body) = cell_body.parse_next(&mut input) else {
        return Err(ParseFailure::new(
            ParseFailureKind::UnknownTile,
            token.text,
            token.text,
            token.span,
        ));
    };

    let consumed = input.current_token_start();
    if consumed == token.text.len() {
        return Ok(Cell::new(
            Position::new(token.row, token.col),
            body.tile,
            body.underground,
            body.modifiers,
        ));
    }

    Err(ParseFailure::new(
        ParseFailureKind::UnexpectedContent,
        token.text,
        &token.text[consumed..],
        Span::new(token.span.start() + consumed..token.span.end()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn parse(text: &str) -> Result<Cell, ParseFailure> {
        let tokens = tokenize(text);
        assert_eq!(tokens.len(), 1, "expected a single token in {text:?}");
        parse_cell(&tokens[0])
    }

    fn modifiers(text: &str) -> Vec<Modifier> {
        parse(text)
            .expect("cell should parse")
            .modifiers()
            .iter()
            .map(|m| m.value().clone())
            .collect()
    }

    fn rest(text: &str) -> String {
        parse(text).expect_err("cell should fail").rest().to_string()
    }

    #[test]
    fn test_plain_tiles() {
        for (text, kind) in [
            ("N", TileKind::Normal),
            ("X", TileKind::Empty),
            ("H", TileKind::Hazard),
        ] {
            let cell = parse(text).unwrap();
            assert_eq!(*cell.tile().value(), kind);
            assert!(!cell.is_underground());
            assert!(cell.modifiers().is_empty());
        }
    }

    #[test]
    fn test_layer_marker_and_tile_multiplier() {
        let cell = parse("_Nx3").unwrap();
        assert!(cell.is_underground());
        assert_eq!(cell.tile().multiplier().get(), 3);
    }

    #[test]
    fn test_modifier_order_is_preserved() {
        assert_eq!(
            modifiers("N+W+B+C+P+S"),
            vec![
                Modifier::Wall,
                Modifier::Box,
                Modifier::Charge,
                Modifier::PlayerStart,
                Modifier::StartMarker,
            ]
        );
    }

    #[test]
    fn test_modifier_multiplier() {
        let cell = parse("N+Wx2+B").unwrap();
        assert_eq!(cell.modifiers()[0].multiplier().get(), 2);
        assert_eq!(cell.modifiers()[1].multiplier(), Multiplier::ONE);
    }

    #[test]
    fn test_enemy_variants() {
        assert_eq!(
            modifiers("N+E+EC+ESr+Er"),
            vec![
                Modifier::Enemy {
                    variant: EnemyVariant::Linear,
                    reversed: false
                },
                Modifier::Enemy {
                    variant: EnemyVariant::Circular,
                    reversed: false
                },
                Modifier::Enemy {
                    variant: EnemyVariant::Sentry,
                    reversed: true
                },
                Modifier::Enemy {
                    variant: EnemyVariant::Linear,
                    reversed: true
                },
            ]
        );
    }

    #[test]
    fn test_trigger_door_goal_params() {
        assert_eq!(
            modifiers("N+T(red)+D(red&blue)+G+G(exit1)"),
            vec![
                Modifier::Trigger(Id::new("red")),
                Modifier::Door(vec![Id::new("red"), Id::new("blue")]),
                Modifier::Goal(None),
                Modifier::Goal(Some(Id::new("exit1"))),
            ]
        );
    }

    #[test]
    fn test_multiplier_before_param() {
        let cell = parse("N+Dx2(a)").unwrap();
        assert_eq!(cell.modifiers()[0].multiplier().get(), 2);
        assert_eq!(
            *cell.modifiers()[0].value(),
            Modifier::Door(vec![Id::new("a")])
        );
    }

    #[test]
    fn test_unknown_tile_reports_whole_token() {
        let failure = parse("Q+W").unwrap_err();
        assert_eq!(failure.kind(), ParseFailureKind::UnknownTile);
        assert_eq!(failure.rest(), "Q+W");

        // A token made only of modifiers has no tile kind.
        assert_eq!(rest("+W"), "+W");
        assert_eq!(rest("_"), "_");
    }

    #[test]
    fn test_unknown_modifier_reports_suffix() {
        assert_eq!(rest("N+W+Q"), "+Q");
        assert_eq!(rest("N+"), "+");
    }

    #[test]
    fn test_bad_multiplier_reports_suffix() {
        assert_eq!(rest("N+Wxa"), "xa");
        assert_eq!(rest("Nx0"), "x0");
        assert_eq!(rest("N+Bx100"), "x100");
        assert_eq!(rest("Nx"), "x");
    }

    #[test]
    fn test_bad_params_report_suffix() {
        // Unterminated parameter: the whole modifier is left over.
        assert_eq!(rest("N+T(abc"), "+T(abc");
        // Missing required parameter.
        assert_eq!(rest("N+D"), "+D");
        // Parameter on a modifier that takes none.
        assert_eq!(rest("N+W(a)"), "(a)");
        // Unterminated optional parameter.
        assert_eq!(rest("N+G(a"), "(a");
        // Identifier longer than ten characters.
        assert_eq!(rest("N+G(abcdefghijk)"), "(abcdefghijk)");
        // Empty gate list and trailing separator.
        assert_eq!(rest("N+D()"), "+D()");
        assert_eq!(rest("N+D(a&)"), "+D(a&)");
    }

    #[test]
    fn test_failure_span_covers_rest() {
        let source = "N  N+Wxa";
        let token = tokenize(source)[1];
        let failure = parse_cell(&token).unwrap_err();

        assert_eq!(&source[failure.span().range()], "xa");
        assert_eq!(failure.fragment(), "xa");
    }

    #[test]
    fn test_foreign_separator_is_unexpected_content() {
        let failure = parse("N\u{a0}N+P").unwrap_err();
        assert_eq!(failure.kind(), ParseFailureKind::UnexpectedContent);
        assert_eq!(failure.rest(), "\u{a0}N+P");
        assert_eq!(failure.span(), Span::new(1..6));
    }

    #[test]
    fn test_display_round_trip() {
        for text in [
            "N",
            "_Hx2",
            "N+Wx3+ECr+P",
            "X+T(a)+D(a&b)+G(exit)",
            "N+Gx2+S+Cx4",
        ] {
            let cell = parse(text).unwrap();
            assert_eq!(cell.to_string(), text);
        }
        assert_eq!(parse("Nx1+Wx1+EL").unwrap().to_string(), "N+W+E");
    }
}
