// file: src/editor/metrics.rs
// description: word and character counts derived from a markup string
// reference: internal editor status bar metrics

use crate::parser::dom::{block_separated_text, plain_text};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TextMetrics {
    pub words: usize,
    pub chars: usize,
}

impl TextMetrics {
    pub fn describe(&self) -> String {
        format!(
            "{} {} · {} {}",
            self.words,
            if self.words == 1 { "word" } else { "words" },
            self.chars,
            if self.chars == 1 {
                "character"
            } else {
                "characters"
            }
        )
    }
}

/// Strips markup and trims. Characters are counted on the concatenated text
/// content; words are split on whitespace and on block boundaries.
pub fn count_metrics(markup: &str) -> TextMetrics {
    let text = plain_text(markup);

    TextMetrics {
        words: block_separated_text(markup).split_whitespace().count(),
        chars: text.trim().chars().count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_inputs() {
        assert_eq!(count_metrics(""), TextMetrics { words: 0, chars: 0 });
        assert_eq!(count_metrics("<p>  </p>"), TextMetrics { words: 0, chars: 0 });
        assert_eq!(count_metrics("<p><br></p>"), TextMetrics { words: 0, chars: 0 });
        assert_eq!(count_metrics("<br><hr/>"), TextMetrics { words: 0, chars: 0 });
    }

    #[test]
    fn test_simple_paragraph() {
        assert_eq!(
            count_metrics("<p>Hello world</p>"),
            TextMetrics {
                words: 2,
                chars: 11
            }
        );
    }

    #[test]
    fn test_block_boundaries_split_words_but_add_no_characters() {
        assert_eq!(count_metrics("<p>one</p><p>two</p>"), TextMetrics { words: 2, chars: 6 });
        assert_eq!(count_metrics("<p>one <b>t</b>wo</p>"), TextMetrics { words: 2, chars: 7 });
    }

    #[test]
    fn test_internal_whitespace_counts_as_characters() {
        let metrics = count_metrics("<p>  a \n b  </p>");
        assert_eq!(metrics.words, 2);
        assert_eq!(metrics.chars, 5);
    }

    #[test]
    fn test_idempotent() {
        let markup = "<h1>Title</h1><p>Some <strong>bold</strong> text.</p>";
        assert_eq!(count_metrics(markup), count_metrics(markup));
        assert_eq!(count_metrics(markup).words, 4);
    }

    #[test]
    fn test_describe() {
        assert_eq!(TextMetrics { words: 1, chars: 1 }.describe(), "1 word · 1 character");
        assert_eq!(TextMetrics { words: 0, chars: 2 }.describe(), "0 words · 2 characters");
    }
}
