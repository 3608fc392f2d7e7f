//! Alternative Latin spellings of a romanized token.
//!
//! Casual Tamil romanization is loose about vowel length and about the
//! t/th/d distinction, so the same word arrives in several spellings. Each
//! rule below runs independently on the original token and the results are
//! unioned.

use std::collections::HashSet;

/// Endings appended to the whole token, in order.
pub const COMMON_ENDINGS: &[&str] = &[
    "i", "ai", "a", "u", "oo", "ta", "tai", "tta", "ttai", "di", "ti",
];

const SHORT_VOWELS: &[char] = &['a', 'i', 'u', 'e', 'o'];

/// Generate spelling variants of `token`.
///
/// The token is trimmed and lowercased first; the result always starts with
/// that normalized token. Order is deterministic (original, vowel
/// lengthening by position, consonant rules, endings) and the list is
/// truncated to `max_variants`.
pub fn generate_variants(token: &str, max_variants: usize) -> Vec<String> {
    let token = token.trim().to_lowercase();
    if token.is_empty() || max_variants == 0 {
        return Vec::new();
    }

    let mut out = Vec::new();
    let mut seen = HashSet::new();
    let mut push = |s: String| {
        if seen.insert(s.clone()) {
            out.push(s);
        }
    };

    push(token.clone());

    // Vowel lengthening: one doubled occurrence per variant.
    for (i, c) in token.char_indices() {
        if SHORT_VOWELS.contains(&c) {
            let mut v = String::with_capacity(token.len() + 1);
            v.push_str(&token[..i]);
            v.push(c);
            v.push_str(&token[i..]);
            push(v);
        }
    }

    // Consonant normalization, each applied globally.
    push(token.replace('t', "tt"));
    push(token.replace("th", "t"));
    push(token.replace('d', "t"));

    for ending in COMMON_ENDINGS {
        push(format!("{token}{ending}"));
    }

    out.truncate(max_variants);
    out
}
