//! CLI logic for the Stereo Glitch level tool.
//!
//! This module contains the core CLI logic: one function per subcommand,
//! all writing their results to a caller supplied writer.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command};

use std::{
    collections::BTreeMap,
    fs,
    io::{self, Write},
};

use log::{info, warn};
use serde::Serialize;

use glitch_level::{
    GlitchLevelError, LevelBuilder,
    level::{Level, Position},
    levels::default_level,
    report,
};

use error_adapter::DiagnosticAdapter;

/// How a command that ran to completion ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command did what was asked.
    Success,
    /// The level was rejected and the rejection was already written as the
    /// command's output, as `check --json` does.
    Rejected,
}

/// Run the glitch-level CLI application, printing results to stdout.
///
/// # Errors
///
/// Returns `GlitchLevelError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing and validation errors, unless the command reports them itself
/// - Files that are not formatted when checking the format
pub fn run(args: &Args) -> Result<Outcome, GlitchLevelError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(args, &mut out)
}

/// Run the command in `args`, writing its output to `out`.
///
/// # Errors
///
/// See [`run`].
pub fn execute(args: &Args, out: &mut impl Write) -> Result<Outcome, GlitchLevelError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let builder = LevelBuilder::new(app_config);

    match &args.command {
        Command::Check { input, json: true } => return check_json(&builder, input, out),
        Command::Check { input, json: false } => check(&builder, input, out)?,
        Command::Fmt {
            input,
            write,
            check,
        } => fmt(&builder, input, *write, *check, out)?,
        Command::Share { input } => share(&builder, input, out)?,
        Command::Open { token, output } => open(&builder, token, output.as_deref(), out)?,
        Command::Inspect { input, json } => inspect(&builder, input, *json, out)?,
    }
    Ok(Outcome::Success)
}

fn read_level(input: &str) -> Result<String, GlitchLevelError> {
    info!(input_path = input; "Reading level");
    Ok(fs::read_to_string(input)?)
}

fn check(builder: &LevelBuilder, input: &str, out: &mut impl Write) -> Result<(), GlitchLevelError> {
    let source = read_level(input)?;
    let level = builder.parse(&source)?;

    let warnings = builder.lint(&level);
    for warning in &warnings {
        let rendered = error_adapter::render(&DiagnosticAdapter::new(warning, &source));
        write!(out, "{rendered}")?;
    }
    let (width, height, _) = level.dimensions();
    writeln!(
        out,
        "{input}: ok ({width}x{height}, {} warning(s))",
        warnings.len()
    )?;
    Ok(())
}

/// The JSON report is the whole answer: a rejected level is not also raised
/// as an error.
fn check_json(
    builder: &LevelBuilder,
    input: &str,
    out: &mut impl Write,
) -> Result<Outcome, GlitchLevelError> {
    let source = read_level(input)?;
    let validation = builder.config().level().validation();
    let report = report::check_with(&source, &validation);
    let json = serde_json::to_string(&report).map_err(io::Error::from)?;
    writeln!(out, "{json}")?;

    if report.is_ok() {
        Ok(Outcome::Success)
    } else {
        info!(input_path = input; "Level rejected");
        Ok(Outcome::Rejected)
    }
}

fn fmt(
    builder: &LevelBuilder,
    input: &str,
    write: bool,
    check: bool,
    out: &mut impl Write,
) -> Result<(), GlitchLevelError> {
    let source = read_level(input)?;
    let formatted = builder.format(&source);
    let unchanged = formatted.text == source;

    if check {
        if !unchanged {
            return Err(GlitchLevelError::Unformatted(input.to_string()));
        }
        info!(input_path = input; "Level is formatted");
    } else if write {
        if unchanged {
            info!(input_path = input; "Level already formatted");
        } else {
            fs::write(input, &formatted.text)?;
            info!(input_path = input, tab_width = formatted.tab_width; "Level formatted");
        }
    } else {
        write!(out, "{}", formatted.text)?;
    }

    Ok(())
}

fn share(builder: &LevelBuilder, input: &str, out: &mut impl Write) -> Result<(), GlitchLevelError> {
    let source = read_level(input)?;
    builder.parse(&source)?;
    writeln!(out, "{}", builder.share(&source))?;
    Ok(())
}

fn open(
    builder: &LevelBuilder,
    token: &str,
    output: Option<&str>,
    out: &mut impl Write,
) -> Result<(), GlitchLevelError> {
    let level = builder.open(token).unwrap_or_else(|err| {
        warn!(err:%; "Cannot open shared level, using the default level");
        default_level()
    });
    let text = format!("{level}\n");

    match output {
        Some(path) => {
            fs::write(path, text)?;
            info!(output_path = path; "Level written");
        }
        None => write!(out, "{text}")?,
    }
    Ok(())
}

/// Summary printed by `inspect`.
#[derive(Debug, Serialize)]
struct Summary<'a> {
    width: usize,
    height: usize,
    depth: usize,
    cells: usize,
    underground_cells: usize,
    player: Option<Position>,
    tiles: BTreeMap<String, u32>,
    modifiers: BTreeMap<&'static str, u32>,
    symbols: &'a glitch_level::level::SymbolTable,
    warnings: Vec<String>,
}

impl<'a> Summary<'a> {
    fn new(builder: &LevelBuilder, level: &'a Level) -> Self {
        let (width, height, depth) = level.dimensions();

        let mut tiles = BTreeMap::new();
        let mut modifiers = BTreeMap::new();
        for cell in level.iter_cells() {
            *tiles.entry(cell.tile().value().to_string()).or_default() +=
                cell.tile().multiplier().get();
            for modifier in cell.modifiers() {
                *modifiers.entry(modifier.value().name()).or_default() +=
                    modifier.multiplier().get();
            }
        }

        Self {
            width,
            height,
            depth,
            cells: level.iter_cells().count(),
            underground_cells: level.iter_cells().filter(|c| c.is_underground()).count(),
            player: level.player_starts().first().copied(),
            tiles,
            modifiers,
            symbols: level.symbols(),
            warnings: builder
                .lint(level)
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

fn tally<'a>(counts: impl Iterator<Item = (&'a str, u32)>) -> String {
    counts
        .map(|(name, count)| format!("{name} {count}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn inspect(
    builder: &LevelBuilder,
    input: &str,
    json: bool,
    out: &mut impl Write,
) -> Result<(), GlitchLevelError> {
    let source = read_level(input)?;
    let level = builder.parse(&source)?;
    let summary = Summary::new(builder, &level);

    if json {
        let json = serde_json::to_string_pretty(&summary).map_err(io::Error::from)?;
        writeln!(out, "{json}")?;
        return Ok(());
    }

    writeln!(
        out,
        "size:    {}x{} (depth {})",
        summary.width, summary.height, summary.depth
    )?;
    writeln!(
        out,
        "cells:   {} ({} underground)",
        summary.cells, summary.underground_cells
    )?;
    if let Some(player) = summary.player {
        writeln!(out, "player:  {player}")?;
    }
    writeln!(
        out,
        "tiles:   {}",
        tally(summary.tiles.iter().map(|(k, v)| (k.as_str(), *v)))
    )?;
    if !summary.modifiers.is_empty() {
        writeln!(
            out,
            "objects: {}",
            tally(summary.modifiers.iter().map(|(k, v)| (*k, *v)))
        )?;
    }
    for (id, symbol) in level.symbols().iter() {
        let cells = |positions: &[Position]| {
            positions
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        writeln!(
            out,
            "trigger: {id} defined at [{}], gates doors at [{}]",
            cells(symbol.definitions()),
            cells(symbol.references())
        )?;
    }
    for warning in &summary.warnings {
        writeln!(out, "{warning}")?;
    }
    Ok(())
}
