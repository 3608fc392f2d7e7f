//! Character-level Unicode classification for Tamil text.

/// The eleven dependent vowel signs (ா ி ீ ு ூ ெ ே ை ொ ோ ௌ).
pub const VOWEL_SIGNS: [char; 11] = [
    '\u{0BBE}', '\u{0BBF}', '\u{0BC0}', '\u{0BC1}', '\u{0BC2}', '\u{0BC6}', '\u{0BC7}',
    '\u{0BC8}', '\u{0BCA}', '\u{0BCB}', '\u{0BCC}',
];

/// Pulli (virama). Marks a consonant with its inherent vowel removed.
pub const PULLI: char = '\u{0BCD}';

/// Check the full Tamil block (U+0B80..U+0BFF). Includes unassigned
/// codepoints, which never come out of the conversion primitive.
pub fn is_tamil(c: char) -> bool {
    ('\u{0B80}'..='\u{0BFF}').contains(&c)
}

/// Independent vowels அ..ஔ (U+0B85..U+0B94).
pub fn is_independent_vowel(c: char) -> bool {
    ('\u{0B85}'..='\u{0B94}').contains(&c)
}

pub fn is_vowel_sign(c: char) -> bool {
    VOWEL_SIGNS.contains(&c)
}

/// True if the word ends in something a vowel sign must not follow.
pub fn ends_in_vowel(word: &str) -> bool {
    word.chars()
        .next_back()
        .is_some_and(|c| is_independent_vowel(c) || is_vowel_sign(c))
}

/// Output contract for suggestions: non-empty, Tamil block or whitespace only.
pub fn is_tamil_text(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| is_tamil(c) || c.is_whitespace())
}
