//! Script-form expansion: extra native-script forms made by adding a vowel
//! sign to a candidate. Over-generates; the validity filter decides what
//! survives.

use crate::unicode::{ends_in_vowel, PULLI};

/// Vowel signs tried on every consonant-final word (ு ா ி ை).
pub const SUFFIX_SIGNS: [char; 4] = ['\u{0BC1}', '\u{0BBE}', '\u{0BBF}', '\u{0BC8}'];

/// The cluster ட் that gets geminated forms.
const TT_CLUSTER: &str = "\u{0B9F}\u{0BCD}";

/// Geminated endings appended after ட் (டு, டா).
const TT_EXTENSIONS: [&str; 2] = ["\u{0B9F}\u{0BC1}", "\u{0B9F}\u{0BBE}"];

/// Expand `word` into itself plus its suffix forms. The original is always
/// the first element.
///
/// Rules:
/// - a word ending in a vowel or vowel sign is returned alone;
/// - a word ending in pulli has the pulli replaced by each sign, not
///   followed by it (கண் → கணு, கணா, ...). Sign after pulli is not a valid
///   syllable;
/// - any other consonant-final word gets each sign appended;
/// - a word ending in ட் also gets ட்டு and ட்டா appended.
pub fn expand_forms(word: &str) -> Vec<String> {
    if word.is_empty() {
        return Vec::new();
    }
    let mut forms = vec![word.to_string()];
    if ends_in_vowel(word) {
        return forms;
    }

    let stem = word.strip_suffix(PULLI).unwrap_or(word);
    for sign in SUFFIX_SIGNS {
        let mut form = String::with_capacity(stem.len() + sign.len_utf8());
        form.push_str(stem);
        form.push(sign);
        forms.push(form);
    }

    if word.ends_with(TT_CLUSTER) {
        for ext in TT_EXTENSIONS {
            forms.push(format!("{word}{ext}"));
        }
    }
    forms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vowel_final_unchanged() {
        assert_eq!(expand_forms("எனது"), vec!["எனது"]);
        assert_eq!(expand_forms("அ"), vec!["அ"]);
    }

    #[test]
    fn test_consonant_final_gets_four_signs() {
        let forms = expand_forms("மரம");
        assert_eq!(forms, vec!["மரம", "மரமு", "மரமா", "மரமி", "மரமை"]);
    }

    #[test]
    fn test_pulli_replaced_by_sign() {
        let forms = expand_forms("கண்");
        assert_eq!(forms, vec!["கண்", "கணு", "கணா", "கணி", "கணை"]);
        assert!(forms[1..].iter().all(|f| !f.contains('\u{0BCD}')));
    }

    #[test]
    fn test_tt_cluster_extensions() {
        let forms = expand_forms("வீட்");
        assert_eq!(forms.len(), 7);
        assert!(forms.contains(&"வீட்டு".to_string()));
        assert!(forms.contains(&"வீட்டா".to_string()));
    }

    #[test]
    fn test_empty() {
        assert!(expand_forms("").is_empty());
    }
}
