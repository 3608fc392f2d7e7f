//! Merge, filter, rank and cap. Pure functions over candidate lists.

use std::collections::HashMap;

use crate::types::{Candidate, Suggestion};

/// Fold candidates into one entry per word, keeping the highest score and the
/// position where the word was first seen. Candidates with an empty word or a
/// non-finite score are dropped.
pub fn merge_candidates(candidates: impl IntoIterator<Item = Candidate>) -> Vec<Candidate> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut merged: Vec<Candidate> = Vec::new();
    for c in candidates {
        if c.word.is_empty() || !c.score.is_finite() {
            continue;
        }
        match index.get(&c.word) {
            Some(&i) => {
                if c.score > merged[i].score {
                    merged[i].score = c.score;
                    merged[i].tier = c.tier;
                }
            }
            None => {
                index.insert(c.word.clone(), merged.len());
                merged.push(c);
            }
        }
    }
    merged
}

/// Merge, re-check validity, sort by score (ties keep first-seen order) and
/// keep the top `cap`.
pub fn rank_candidates(
    candidates: impl IntoIterator<Item = Candidate>,
    is_valid: impl Fn(&str) -> bool,
    cap: usize,
) -> Vec<Suggestion> {
    let mut merged = merge_candidates(candidates);
    merged.retain(|c| is_valid(&c.word));
    // `sort_by` is stable, which gives the first-seen tie break.
    merged.sort_by(|a, b| b.score.total_cmp(&a.score));
    merged
        .into_iter()
        .take(cap)
        .map(|c| Suggestion {
            word: c.word,
            score: c.score.clamp(0.0, 1.0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use tamil_core::scorer::Tier;

    use super::*;

    #[test]
    fn test_merge_keeps_max_score_at_first_position() {
        let merged = merge_candidates(vec![
            Candidate::new("அ", 0.2, Tier::Base),
            Candidate::new("ஆ", 0.5, Tier::Variant),
            Candidate::new("அ", 0.9, Tier::Suffix),
            Candidate::new("அ", 0.1, Tier::Variant),
        ]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].word, "அ");
        assert_eq!(merged[0].score, 0.9);
        assert_eq!(merged[0].tier, Tier::Suffix);
    }

    #[test]
    fn test_merge_drops_malformed() {
        let merged = merge_candidates(vec![
            Candidate::new("", 0.5, Tier::Runner),
            Candidate::new("அ", f64::NAN, Tier::Runner),
            Candidate::new("ஆ", 0.5, Tier::Runner),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].word, "ஆ");
    }

    #[test]
    fn test_rank_orders_and_breaks_ties_by_insertion() {
        let ranked = rank_candidates(
            vec![
                Candidate::new("இ", 0.5, Tier::Base),
                Candidate::new("அ", 0.9, Tier::Base),
                Candidate::new("உ", 0.5, Tier::Base),
            ],
            |_| true,
            10,
        );
        let words: Vec<&str> = ranked.iter().map(|s| s.word.as_str()).collect();
        assert_eq!(words, vec!["அ", "இ", "உ"]);
    }

    #[test]
    fn test_rank_applies_filter_and_cap() {
        let ranked = rank_candidates(
            vec![
                Candidate::new("bad", 1.0, Tier::Runner),
                Candidate::new("அ", 0.3, Tier::Base),
                Candidate::new("ஆ", 0.2, Tier::Base),
                Candidate::new("இ", 0.1, Tier::Base),
            ],
            |w| !w.is_ascii(),
            2,
        );
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].word, "அ");
        assert_eq!(ranked[1].word, "ஆ");
    }
}
