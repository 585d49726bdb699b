//! Configuration types for level processing.
//!
//! This module provides configuration structures that control how levels are
//! validated and shared. All types implement [`serde::Deserialize`] for
//! flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining level and link settings.
//! - [`LevelConfig`] - Limits applied when validating a level.
//! - [`LinkConfig`] - Compression settings and base URL for shared links.
//!
//! # Example
//!
//! ```
//! # use glitch_level::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert_eq!(config.level().max_dimension(), 256);
//! assert!(config.link().base_url().is_none());
//! ```

use serde::Deserialize;

use glitch_level_parser::ValidationConfig;

use crate::link::LinkCodec;

/// Top-level application configuration combining level and link settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Level configuration section.
    #[serde(default)]
    level: LevelConfig,

    /// Link configuration section.
    #[serde(default)]
    link: LinkConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified level and link configurations.
    pub fn new(level: LevelConfig, link: LinkConfig) -> Self {
        Self { level, link }
    }

    /// Returns the level configuration.
    pub fn level(&self) -> &LevelConfig {
        &self.level
    }

    /// Returns the link configuration.
    pub fn link(&self) -> &LinkConfig {
        &self.link
    }
}

/// Limits applied when validating a level.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelConfig {
    /// Maximum width and height of a level, in cells.
    #[serde(default = "default_max_dimension")]
    max_dimension: usize,
}

fn default_max_dimension() -> usize {
    ValidationConfig::DEFAULT_MAX_DIMENSION
}

impl LevelConfig {
    pub fn new(max_dimension: usize) -> Self {
        Self { max_dimension }
    }

    pub fn max_dimension(&self) -> usize {
        self.max_dimension
    }

    /// The [`ValidationConfig`] these settings describe.
    pub fn validation(&self) -> ValidationConfig {
        ValidationConfig::new(self.max_dimension)
    }
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self::new(default_max_dimension())
    }
}

/// Settings for shared links.
///
/// `quality` and `window` tune Brotli compression and are clamped to the
/// ranges [`LinkCodec::new`] accepts.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkConfig {
    /// Prefix put in front of a token by `share`, e.g. `https://example.com/?level=`.
    #[serde(default)]
    base_url: Option<String>,

    #[serde(default = "default_quality")]
    quality: u32,

    #[serde(default = "default_window")]
    window: u32,
}

fn default_quality() -> u32 {
    LinkCodec::default().quality()
}

fn default_window() -> u32 {
    LinkCodec::default().window()
}

impl LinkConfig {
    pub fn new(base_url: Option<String>, quality: u32, window: u32) -> Self {
        Self {
            base_url,
            quality,
            window,
        }
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// The codec these settings describe.
    pub fn codec(&self) -> LinkCodec {
        LinkCodec::new(self.quality, self.window)
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self::new(None, default_quality(), default_window())
    }
}
