//! Candidate scoring.
//!
//! `score = w_f·frequency + w_p·phonetic + w_s·form + w_l·length`, rounded to
//! two decimals and clamped to `[0, 1]`. Runner-sourced candidates skip the
//! formula and get a fixed score.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::freq::FrequencyOracle;
use crate::unicode::PULLI;

/// Provenance of a candidate. Only matters while merging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Base,
    Variant,
    Suffix,
    Runner,
}

impl Tier {
    /// Stable tag, used in cache keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Base => "base",
            Tier::Variant => "variant",
            Tier::Suffix => "suffix",
            Tier::Runner => "runner",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ScorerWeights {
    pub frequency: f64,
    pub phonetic: f64,
    pub form: f64,
    pub length: f64,
    /// Fixed score for runner-sourced candidates.
    pub runner_score: f64,
}

impl Default for ScorerWeights {
    fn default() -> Self {
        Self {
            frequency: 0.45,
            phonetic: 0.30,
            form: 0.15,
            length: 0.10,
            runner_score: 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Scorer {
    oracle: Arc<FrequencyOracle>,
    weights: ScorerWeights,
}

impl Scorer {
    pub fn new(oracle: Arc<FrequencyOracle>, weights: ScorerWeights) -> Self {
        Self { oracle, weights }
    }

    pub fn score(&self, word: &str, source_token: &str, tier: Tier) -> f64 {
        if tier == Tier::Runner {
            return self.weights.runner_score.clamp(0.0, 1.0);
        }
        let w = &self.weights;
        let raw = w.frequency * self.oracle.score(word)
            + w.phonetic * phonetic_similarity(source_token, word)
            + w.form * self.form_score(word)
            + w.length * length_score(word);
        round2(raw).clamp(0.0, 1.0)
    }

    /// 0.6 for a pulli-final word the table doesn't know (likely truncated).
    fn form_score(&self, word: &str) -> f64 {
        if word.ends_with(PULLI) && !self.oracle.has_entry(word) {
            0.6
        } else {
            1.0
        }
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Penalizes fragments and runaway expansions.
pub fn length_score(word: &str) -> f64 {
    match word.chars().count() {
        0..=1 => 0.3,
        2..=6 => 1.0,
        7..=10 => 0.7,
        _ => 0.5,
    }
}

/// `1 − lev(a, b) / max(|a|, |b|)` over lowercased chars; 0.5 if either
/// side is empty. Symmetric in its arguments.
pub fn phonetic_similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0.5;
    }
    let dist = edit_distance(&a, &b);
    let max_len = a.len().max(b.len());
    (1.0 - dist as f64 / max_len as f64).clamp(0.0, 1.0)
}

/// Levenshtein distance, one DP row sized to the shorter input.
pub fn edit_distance(a: &[char], b: &[char]) -> usize {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut row: Vec<usize> = (0..=short.len()).collect();
    for (i, &lc) in long.iter().enumerate() {
        let mut diag = row[0];
        row[0] = i + 1;
        for (j, &sc) in short.iter().enumerate() {
            let above = row[j + 1];
            let cost = usize::from(lc != sc);
            row[j + 1] = (above + 1).min(row[j] + 1).min(diag + cost);
            diag = above;
        }
    }
    row[short.len()]
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use proptest::prelude::*;

    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn scorer(pairs: &[(&str, u64)]) -> Scorer {
        let counts: HashMap<String, u64> =
            pairs.iter().map(|&(w, c)| (w.to_string(), c)).collect();
        Scorer::new(
            Arc::new(FrequencyOracle::from_counts(counts)),
            ScorerWeights::default(),
        )
    }

    #[test]
    fn test_edit_distance_basics() {
        assert_eq!(edit_distance(&chars("kitten"), &chars("sitting")), 3);
        assert_eq!(edit_distance(&chars(""), &chars("abc")), 3);
        assert_eq!(edit_distance(&chars("abc"), &chars("abc")), 0);
        assert_eq!(edit_distance(&chars("அன்பு"), &chars("அன்பை")), 1);
    }

    #[test]
    fn test_phonetic_similarity() {
        assert_eq!(phonetic_similarity("", "x"), 0.5);
        assert_eq!(phonetic_similarity("ANBU", "anbu"), 1.0);
        assert!((phonetic_similarity("anbu", "anpu") - 0.75).abs() < 1e-12);
        assert_eq!(phonetic_similarity("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_length_score_bands() {
        assert_eq!(length_score("அ"), 0.3);
        assert_eq!(length_score("எனது"), 1.0);
        assert_eq!(length_score("எனதுக்கு"), 0.7);
        assert_eq!(length_score("அஅஅஅஅஅஅஅஅஅஅ"), 0.5);
    }

    #[test]
    fn test_runner_tier_is_fixed() {
        let s = scorer(&[]);
        assert_eq!(s.score("anything", "x", Tier::Runner), 1.0);
    }

    #[test]
    fn test_weighted_formula() {
        let s = scorer(&[("எனது", 100)]);
        // freq 1.0, phonetic 0 (disjoint scripts), form 1.0, length 1.0
        assert_eq!(s.score("எனது", "enathu", Tier::Base), 0.70);
        // unknown word: baseline 0.02 → 0.45·0.02 + 0.15 + 0.10 = 0.259
        assert_eq!(s.score("எனதை", "enathu", Tier::Suffix), 0.26);
    }

    #[test]
    fn test_form_penalty_for_unknown_pulli_word() {
        let s = scorer(&[("கண்", 10)]);
        let known = s.score("கண்", "kan", Tier::Base);
        let unknown = s.score("மண்", "kan", Tier::Base);
        assert!(known > unknown);
        // 0.45·0.02 + 0.15·0.6 + 0.10 = 0.199
        assert_eq!(unknown, 0.2);
    }

    proptest! {
        #[test]
        fn prop_phonetic_symmetric(a in "\\PC{0,12}", b in "\\PC{0,12}") {
            prop_assert_eq!(phonetic_similarity(&a, &b), phonetic_similarity(&b, &a));
        }

        #[test]
        fn prop_score_in_unit_range(word in "[\u{0B85}-\u{0BCD}]{0,12}", token in "[a-z]{0,10}") {
            let s = scorer(&[("அ", 3)]);
            let v = s.score(&word, &token, Tier::Variant);
            prop_assert!((0.0..=1.0).contains(&v));
        }
    }
}
