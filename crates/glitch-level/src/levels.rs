//! Built-in levels.

use glitch_level_core::level::Level;
use glitch_level_parser::{ValidationConfig, parse};

/// The level loaded when nothing else is available: an underground floor
/// with the player near the top left and a wall along the bottom edge.
pub const DEFAULT_LEVEL: &str = "\
_N _N _N _N _N _N _N _N _N _N _N _N _N
_N _N _N _N _N _N _N _N _N _N _N _N _N
_N _N _N+P _N _N _N _N _N _N _N _N _N _N
_N _N _N _N _N _N _N _N _N _N _N _N _N
_N _N _N _N _N _N _N _N _N _N _N _N _N
_N _N _N _N _N _N _N _N _N _N _N _N _N
_N+W _N+W _N+W _N+W _N+W _N+W _N+W _N+W _N+W _N+W _N+W _N+W _N+W
";

/// Parses [`DEFAULT_LEVEL`].
pub fn default_level() -> Level {
    parse(DEFAULT_LEVEL, &ValidationConfig::default()).expect("built-in level is valid")
}
