//! Validity filter for native-script candidates.
//!
//! Admits or rejects; never rewrites a word. Applied to every candidate
//! source, including the remote runner and the conversion primitive.

use serde::Deserialize;

use crate::unicode::{is_tamil_text, is_vowel_sign};

/// Length caps, in chars, keyed on the length of the romanized input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FilterConfig {
    /// Inputs up to this many chars count as short.
    pub short_input_len: usize,
    pub short_max_chars: usize,
    pub long_max_chars: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            short_input_len: 2,
            short_max_chars: 3,
            long_max_chars: 6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Empty,
    AsciiAlphanumeric,
    StackedVowelSigns,
    TooLong { len: usize, max: usize },
    NotTamil,
}

impl FilterConfig {
    pub fn max_chars(&self, input_len: usize) -> usize {
        if input_len <= self.short_input_len {
            self.short_max_chars
        } else {
            self.long_max_chars
        }
    }

    /// Why `word` is rejected for an input of `input_len` chars, if it is.
    pub fn check(&self, word: &str, input_len: usize) -> Option<Rejection> {
        if word.is_empty() {
            return Some(Rejection::Empty);
        }
        if word.chars().any(|c| c.is_ascii_alphanumeric()) {
            return Some(Rejection::AsciiAlphanumeric);
        }
        let chars: Vec<char> = word.chars().collect();
        if chars
            .windows(2)
            .any(|w| is_vowel_sign(w[0]) && is_vowel_sign(w[1]))
        {
            return Some(Rejection::StackedVowelSigns);
        }
        let max = self.max_chars(input_len);
        if chars.len() > max {
            return Some(Rejection::TooLong {
                len: chars.len(),
                max,
            });
        }
        if !is_tamil_text(word) {
            return Some(Rejection::NotTamil);
        }
        None
    }

    pub fn is_valid(&self, word: &str, input_len: usize) -> bool {
        self.check(word, input_len).is_none()
    }
}
