//! miette rendering for level diagnostics and other CLI errors.
//!
//! A rejected level carries a [`Diagnostic`] with its own code, severity,
//! labelled spans and help, rendered against the level source. Every other
//! [`GlitchLevelError`] is rendered as a plain error with a
//! `glitch_level::*` code and, where it helps, a hint.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use glitch_level::GlitchLevelError;
use glitch_level_parser::error::{Diagnostic, Severity};

/// A level diagnostic together with the source it points into.
#[derive(Debug)]
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self { diag, src }
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        let code = self.diag.code()?;
        Some(Box::new(code))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.diag.severity() {
            Severity::Error => miette::Severity::Error,
            Severity::Warning => miette::Severity::Warning,
        })
    }

    /// The diagnostic's own help, or the description of its code.
    fn help<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        match (self.diag.help(), self.diag.code()) {
            (Some(help), _) => Some(Box::new(help)),
            (None, Some(code)) => Some(Box::new(code.description())),
            (None, None) => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diag.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.iter().map(|label| {
            let span = SourceSpan::from(label.span().range());
            let message = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

/// A CLI error that is not about the level text itself. Rejected levels go
/// through [`DiagnosticAdapter`] instead; see [`report`].
#[derive(Debug)]
struct ToolError<'a>(&'a GlitchLevelError);

impl fmt::Display for ToolError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.0, f)
    }
}

impl std::error::Error for ToolError<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ToolError<'_> {
    fn code<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        let code = match self.0 {
            GlitchLevelError::Io(_) => "glitch_level::io",
            GlitchLevelError::Parse { .. } => "glitch_level::parse",
            GlitchLevelError::Codec(_) => "glitch_level::link",
            GlitchLevelError::Config(_) => "glitch_level::config",
            GlitchLevelError::Unformatted(_) => "glitch_level::fmt",
        };
        Some(Box::new(code))
    }

    fn help<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        let help = match self.0 {
            GlitchLevelError::Codec(_) => "the link is damaged or cut short; copy the whole link again",
            GlitchLevelError::Config(_) => {
                "the configuration file takes a `[level]` table with `max_dimension` and a `[link]` table with `base_url`, `quality` and `window`"
            }
            GlitchLevelError::Unformatted(_) => "run `glitch-level fmt --write` on the file",
            GlitchLevelError::Io(_) | GlitchLevelError::Parse { .. } => return None,
        };
        Some(Box::new(help))
    }
}

/// The miette view of a CLI error.
///
/// A rejected level is shown through its diagnostic, pointing into the level
/// source.
pub fn report(err: &GlitchLevelError) -> Box<dyn MietteDiagnostic + '_> {
    match err {
        GlitchLevelError::Parse { err, src } => {
            Box::new(DiagnosticAdapter::new(err.diagnostic(), src))
        }
        _ => Box::new(ToolError(err)),
    }
}

/// Render a diagnostic to a string without colors.
pub fn render(diagnostic: &dyn MietteDiagnostic) -> String {
    let reporter =
        miette::GraphicalReportHandler::new_themed(miette::GraphicalTheme::unicode_nocolor());
    let mut writer = String::new();
    reporter
        .render_report(&mut writer, diagnostic)
        .expect("Writing to String buffer is infallible");
    writer
}
