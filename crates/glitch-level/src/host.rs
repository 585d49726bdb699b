//! The boundary between the level language and the game that hosts it.
//!
//! The game supplies two things: somewhere to put a level ([`LevelSink`],
//! the simulation engine) and a way to find a shared link ([`LinkSource`],
//! usually a URL query parameter). [`boot`] wires them together.

use log::{info, warn};

use glitch_level_core::level::Level;
use glitch_level_parser::{ValidationConfig, parse};

use crate::{levels::default_level, link::LinkCodec};

/// Receives levels to simulate.
pub trait LevelSink {
    fn load_level(&mut self, level: &Level);
}

/// Provides the link token a level was shared with, if any.
pub trait LinkSource {
    fn shared_link(&self) -> Option<String>;
}

impl LinkSource for Option<String> {
    fn shared_link(&self) -> Option<String> {
        self.clone()
    }
}

/// Opens a shared level, falling back to the default level.
///
/// Decompression, parse and validation failures are logged and never
/// reach the caller.
pub fn load_shared(token: &str) -> Level {
    load_shared_with(token, &LinkCodec::default(), &ValidationConfig::default())
}

/// Like [`load_shared`], with explicit codec and limits.
pub fn load_shared_with(token: &str, codec: &LinkCodec, config: &ValidationConfig) -> Level {
    let text = match codec.decompress(token) {
        Ok(text) => text,
        Err(err) => {
            warn!(err:%; "Cannot decode shared level, loading the default level");
            return default_level();
        }
    };

    match parse(&text, config) {
        Ok(level) => level,
        Err(err) => {
            warn!(err:%; "Shared level is invalid, loading the default level");
            default_level()
        }
    }
}

/// Loads the shared level, or the default level when there is none, into
/// `sink`.
pub fn boot(source: &impl LinkSource, sink: &mut impl LevelSink) {
    let level = match source.shared_link() {
        Some(token) => {
            info!("Loading shared level");
            load_shared(&token)
        }
        None => {
            info!("No shared level, loading the default level");
            default_level()
        }
    };
    sink.load_level(&level);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{levels::DEFAULT_LEVEL, link};

    #[derive(Default)]
    struct Recorder {
        loaded: Vec<Level>,
    }

    impl LevelSink for Recorder {
        fn load_level(&mut self, level: &Level) {
            self.loaded.push(level.clone());
        }
    }

    #[test]
    fn test_load_shared_valid_token() {
        let token = link::compress("N N+P\nN+T(a) N+D(a)");
        let level = load_shared(&token);
        assert_eq!(level.dimensions(), (2, 2, 1));
    }

    #[test]
    fn test_malformed_token_falls_back() {
        assert_eq!(load_shared("1%%%"), default_level());
        assert_eq!(load_shared(""), default_level());
        assert_eq!(load_shared("9abc"), default_level());
    }

    #[test]
    fn test_invalid_level_falls_back() {
        let no_player = link::compress("N N N");
        assert_eq!(load_shared(&no_player), default_level());

        let bad_cell = link::compress("N+P Q");
        assert_eq!(load_shared(&bad_cell), default_level());
    }

    #[test]
    fn test_boot_without_link_loads_default() {
        let mut sink = Recorder::default();
        boot(&None::<String>, &mut sink);
        assert_eq!(sink.loaded, vec![default_level()]);
    }

    #[test]
    fn test_boot_with_link() {
        let mut sink = Recorder::default();
        let token = link::compress(DEFAULT_LEVEL.replace("_N+W", "_H").as_str());
        boot(&Some(token), &mut sink);

        assert_eq!(sink.loaded.len(), 1);
        assert_ne!(sink.loaded[0], default_level());
        assert_eq!(sink.loaded[0].dimensions(), (14, 7, 1));
    }
}
