//! Glitch Level - the level description language of Stereo Glitch.
//!
//! Parsing, validation, canonical formatting and link sharing for level
//! text. Levels are written as a grid of whitespace separated cells, one row
//! per line.

pub mod config;
pub mod format;
pub mod host;
pub mod levels;
pub mod link;
pub mod report;

mod error;

pub use glitch_level_core::{identifier, level};
pub use glitch_level_parser::{Diagnostic, ErrorCode, ParseError, Span, ValidationConfig};

pub use error::GlitchLevelError;

use log::{debug, info, trace};

use config::AppConfig;
use format::Formatted;
use level::Level;

/// Builder for processing Stereo Glitch levels.
///
/// This provides an API for taking level text through parsing, formatting
/// and sharing, with limits and link settings taken from [`AppConfig`].
///
/// # Examples
///
/// ```rust
/// use glitch_level::{LevelBuilder, config::AppConfig};
///
/// let source = "N  N+P\nN+T(a)  N+D(a)";
///
/// // With custom config
/// let config = AppConfig::default();
/// let builder = LevelBuilder::new(config);
///
/// // Parse and validate
/// let level = builder.parse(source)
///     .expect("Failed to parse");
///
/// // Share it as a link and open it again
/// let link = builder.share(source);
/// let reopened = builder.open(&link).expect("Failed to open");
/// assert_eq!(level, reopened);
///
/// // Or use default config
/// let builder = LevelBuilder::default();
/// ```
#[derive(Debug, Default)]
pub struct LevelBuilder {
    config: AppConfig,
}

impl LevelBuilder {
    /// Create a new level builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse and validate level text.
    ///
    /// # Errors
    ///
    /// Returns `GlitchLevelError::Parse` for cell syntax errors and broken
    /// level invariants. The error keeps the source for rich reporting.
    pub fn parse(&self, source: &str) -> Result<Level, GlitchLevelError> {
        info!("Parsing level");

        let validation = self.config.level().validation();
        let level = glitch_level_parser::parse(source, &validation)
            .map_err(|err| GlitchLevelError::new_parse_error(err, source))?;

        debug!("Level parsed successfully");
        trace!(level:?; "Parsed level");

        Ok(level)
    }

    /// Non-fatal warnings about a parsed level.
    pub fn lint(&self, level: &Level) -> Vec<Diagnostic> {
        glitch_level_parser::validate::lint(level)
    }

    /// Canonical formatting of level text.
    pub fn format(&self, source: &str) -> Formatted {
        format::format(source)
    }

    /// Format level text and encode it as a shareable link.
    ///
    /// The result is the bare link token, or the token appended to the
    /// configured base URL.
    pub fn share(&self, source: &str) -> String {
        let formatted = self.format(source);
        let token = self.config.link().codec().compress(&formatted.text);
        info!(token_len = token.len(); "Level shared");

        match self.config.link().base_url() {
            Some(base) => format!("{base}{token}"),
            None => token,
        }
    }

    /// Decode a link and parse the level it holds.
    ///
    /// Accepts a bare token as well as a link starting with the configured
    /// base URL.
    ///
    /// # Errors
    ///
    /// Returns `GlitchLevelError::Codec` for a token that cannot be decoded
    /// and `GlitchLevelError::Parse` for a level that does not parse.
    pub fn open(&self, link: &str) -> Result<Level, GlitchLevelError> {
        let link = link.trim();
        let token = self
            .config
            .link()
            .base_url()
            .and_then(|base| link.strip_prefix(base))
            .unwrap_or(link);

        let text = self.config.link().codec().decompress(token)?;
        debug!(text_len = text.len(); "Link decoded");
        self.parse(&text)
    }
}
