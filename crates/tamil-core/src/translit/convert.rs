use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::unicode::PULLI;

use super::config::{parse_scheme_toml, SchemeConfigError, SchemeTable};
use super::{ConvertError, ScriptConverter, DEFAULT_SCHEME_TOML};

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

const SOURCE_SCHEMES: &[&str] = &["iso", "latin", "roman"];

pub struct TableConverter {
    table: SchemeTable,
    /// Longest key across consonants and vowels, in bytes.
    max_key_len: usize,
}

impl TableConverter {
    pub fn new(table: SchemeTable) -> Self {
        let max_key_len = table
            .consonants
            .keys()
            .chain(table.vowels.keys())
            .map(|k| k.len())
            .max()
            .unwrap_or(1);
        Self { table, max_key_len }
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, SchemeConfigError> {
        Ok(Self::new(parse_scheme_toml(toml_str)?))
    }

    /// Set custom TOML before first `global()` call.
    pub fn init_custom(toml_content: String) -> Result<(), SchemeConfigError> {
        // Validate eagerly
        parse_scheme_toml(&toml_content)?;
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| SchemeConfigError::AlreadyInitialized)
    }

    /// Get or initialize the global singleton.
    pub fn global() -> &'static TableConverter {
        static INSTANCE: OnceLock<TableConverter> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let toml_str = CUSTOM_TOML
                .get()
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_SCHEME_TOML);
            TableConverter::from_toml(toml_str).expect("conversion TOML must be valid")
        })
    }

    /// Longest key of `map` that prefixes `rest`, with its byte length.
    fn longest<'a, V>(&self, map: &'a BTreeMap<String, V>, rest: &str) -> Option<(usize, &'a V)> {
        (1..=self.max_key_len.min(rest.len()))
            .rev()
            .find_map(|len| rest.get(..len).and_then(|k| map.get(k)).map(|v| (len, v)))
    }

    /// Convert lowercase romanized text. Characters outside the table pass
    /// through unchanged.
    pub fn transliterate(&self, text: &str) -> String {
        let text = text.to_lowercase();
        let mut out = String::with_capacity(text.len() * 3);
        let mut pos = 0;
        let mut word_start = true;

        while pos < text.len() {
            let rest = &text[pos..];

            if let Some((len, consonant)) = self.longest(&self.table.consonants, rest) {
                let key = &rest[..len];
                let consonant = if word_start {
                    self.table.initial.get(key).unwrap_or(consonant)
                } else {
                    consonant
                };
                out.push_str(consonant);
                pos += len;
                match self.longest(&self.table.vowels, &text[pos..]) {
                    Some((vlen, (_, sign))) => {
                        out.push_str(sign);
                        pos += vlen;
                    }
                    None => out.push(PULLI),
                }
                word_start = false;
                continue;
            }

            if let Some((len, (independent, _))) = self.longest(&self.table.vowels, rest) {
                out.push_str(independent);
                pos += len;
                word_start = false;
                continue;
            }

            // Not in the table.
            let Some(c) = rest.chars().next() else {
                break;
            };
            out.push(c);
            pos += c.len_utf8();
            word_start = c.is_whitespace();
        }
        out
    }
}

impl ScriptConverter for TableConverter {
    fn convert(
        &self,
        source_scheme: &str,
        target_script: &str,
        text: &str,
    ) -> Result<Vec<String>, ConvertError> {
        let source_ok = SOURCE_SCHEMES
            .iter()
            .any(|s| s.eq_ignore_ascii_case(source_scheme));
        if !source_ok || !target_script.eq_ignore_ascii_case("tamil") {
            return Err(ConvertError::Unsupported {
                source_scheme: source_scheme.to_string(),
                target_script: target_script.to_string(),
            });
        }
        let out = self.transliterate(text);
        if out.is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![out])
    }
}
