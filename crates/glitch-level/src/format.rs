//! Canonical formatting of level text.
//!
//! The formatter works on raw text and never parses cells, so it also
//! normalises levels that do not parse. Every row's cell tokens are joined by
//! a single tab and surrounding whitespace is dropped. Line breaks are kept
//! exactly as they are, including `\r\n`, blank rows and a final newline.

use log::debug;

use glitch_level_parser::tokenizer;

/// Canonical text plus the tab width an editor should use to align it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatted {
    pub text: String,
    /// Widest token in characters plus one; `1` for text without tokens.
    pub tab_width: usize,
}

/// Formats level text canonically.
///
/// `format(&format(text).text) == format(text)` holds for any input.
pub fn format(text: &str) -> Formatted {
    let mut out = String::with_capacity(text.len());
    let mut widest = 0;

    for line in tokenizer::lines(text) {
        for token in line.tokens() {
            if token.col > 0 {
                out.push('\t');
            }
            out.push_str(token.text);
            widest = widest.max(token.text.chars().count());
        }
        // A token ending in a lone `\r` must not merge with the `\n` after it.
        if line.line_break == "\n" && out.ends_with('\r') {
            out.push('\t');
        }
        out.push_str(line.line_break);
    }

    let tab_width = widest + 1;
    debug!(bytes = out.len(), tab_width; "Level formatted");
    Formatted {
        text: out,
        tab_width,
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_tokens_are_tab_separated() {
        let formatted = format("  N   N+W\t H  \nX  _N");
        assert_eq!(formatted.text, "N\tN+W\tH\nX\t_N");
        assert_eq!(formatted.tab_width, 4);
    }

    #[test]
    fn test_line_breaks_are_preserved() {
        let formatted = format("N  N\r\n\n   \nN+P \r\n");
        assert_eq!(formatted.text, "N\tN\r\n\n\nN+P\r\n");
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(
            format(""),
            Formatted {
                text: String::new(),
                tab_width: 1
            }
        );
        assert_eq!(format(" \t \n").text, "\n");
        assert_eq!(format(" \t \n").tab_width, 1);
    }

    #[test]
    fn test_tab_width_counts_characters() {
        assert_eq!(format("N+T(abc) é").tab_width, 9);
        assert_eq!(format("ééé").tab_width, 4);
    }

    #[test]
    fn test_invalid_cells_are_formatted_anyway() {
        assert_eq!(format("Q   ???  N+").text, "Q\t???\tN+");
    }

    #[test]
    fn test_only_spaces_and_tabs_are_separators() {
        assert_eq!(format("N\u{a0}N+P  N\n").text, "N\u{a0}N+P\tN\n");
        assert_eq!(format("N\r  \n").text, "N\r\t\n");
        assert_eq!(format("N\r\t\n"), format("N\r  \n"));
    }

    proptest! {
        #[test]
        fn prop_format_is_idempotent(text in "[NXH_+PWTD()ab \t\r\n]{0,80}") {
            let once = format(&text);
            let twice = format(&once.text);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_format_keeps_line_count(text in "[NXH \t\n]{0,80}") {
            let formatted = format(&text);
            prop_assert_eq!(formatted.text.matches('\n').count(), text.matches('\n').count());
        }
    }
}
