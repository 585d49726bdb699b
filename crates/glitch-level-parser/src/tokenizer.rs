//! Tokenizer for level text.
//!
//! Splits the source into lines and every line into cell tokens separated by
//! spaces and tabs, keeping byte offsets into the original text. No other
//! character separates cells: a non-breaking space or a lone `\r` stays inside
//! its token and is rejected later by the [`cell`](crate::cell) grammar. The
//! tokenizer itself never fails.

use winnow::{
    Parser as _,
    combinator::{alt, not, repeat},
    error::ModalResult,
    stream::{LocatingSlice, Location},
    token::{none_of, take_while},
};

use crate::span::Span;

type Input<'src> = LocatingSlice<&'src str>;
type IResult<O> = ModalResult<O>;

/// A cell token: a maximal run of characters other than spaces, tabs and
/// line breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellToken<'src> {
    /// The token text, never empty.
    pub text: &'src str,
    /// Zero-based line index.
    pub row: usize,
    /// Zero-based token index within the line.
    pub col: usize,
    /// Byte range of `text` in the source.
    pub span: Span,
}

/// One source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'src> {
    /// Zero-based line index.
    pub index: usize,
    /// Line content without its line break.
    pub content: &'src str,
    /// The line break that ended this line: `"\n"`, `"\r\n"`, or `""` for the
    /// last line of a source without a final newline.
    pub line_break: &'src str,
    /// Byte offset of `content` in the source.
    pub offset: usize,
    tokens: Vec<CellToken<'src>>,
}

impl<'src> Line<'src> {
    fn open(index: usize, offset: usize) -> Self {
        Self {
            index,
            content: "",
            line_break: "",
            offset,
            tokens: Vec::new(),
        }
    }

    fn push(&mut self, text: &'src str, span: Span) {
        self.tokens.push(CellToken {
            text,
            row: self.index,
            col: self.tokens.len(),
            span,
        });
    }

    fn close(mut self, source: &'src str, end: usize, line_break: &'src str) -> Self {
        self.content = &source[self.offset..end];
        self.line_break = line_break;
        self
    }

    /// Cell tokens of this line, left to right.
    pub fn tokens(&self) -> impl Iterator<Item = CellToken<'src>> + '_ {
        self.tokens.iter().copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lexeme<'src> {
    Cell(&'src str),
    Blank,
    Break(&'src str),
}

/// `\r\n` or `\n`
fn line_break<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    alt(("\r\n", "\n")).parse_next(input)
}

/// Spaces and tabs between cells
fn blank<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    take_while(1.., [' ', '\t']).parse_next(input)
}

fn cell_text<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    repeat(
        1..,
        alt((
            none_of([' ', '\t', '\r', '\n']).void(),
            ('\r', not('\n')).void(),
        )),
    )
    .map(|()| ())
    .take()
    .parse_next(input)
}

/// Parse a single lexeme with its position
fn lexeme<'src>(input: &mut Input<'src>) -> IResult<(Lexeme<'src>, Span)> {
    let start = input.current_token_start();

    let lexeme = alt((
        line_break.map(Lexeme::Break), // Must come before cell text: `\r\n`
        blank.value(Lexeme::Blank),
        cell_text.map(Lexeme::Cell),
    ))
    .parse_next(input)?;

    let end = input.current_token_start();
    Ok((lexeme, Span::new(start..end)))
}

/// Splits `source` into lines, losslessly: concatenating `content` and
/// `line_break` of every line gives back the source.
pub fn lines(source: &str) -> impl Iterator<Item = Line<'_>> {
    let mut input = LocatingSlice::new(source);
    let lexemes: Vec<(Lexeme<'_>, Span)> = repeat(0.., lexeme)
        .parse_next(&mut input)
        .expect("every character starts a lexeme");

    let mut lines = Vec::new();
    let mut line = Line::open(0, 0);
    for (lexeme, span) in lexemes {
        match lexeme {
            Lexeme::Cell(text) => line.push(text, span),
            Lexeme::Blank => {}
            Lexeme::Break(line_break) => {
                let next = Line::open(line.index + 1, span.end());
                lines.push(line.close(source, span.start(), line_break));
                line = next;
            }
        }
    }
    if line.offset < source.len() {
        lines.push(line.close(source, source.len(), ""));
    }

    lines.into_iter()
}

/// Tokenizes the whole source in row-major order.
pub fn tokenize(source: &str) -> Vec<CellToken<'_>> {
    lines(source).flat_map(|line| line.tokens).collect()
}
