//! Static word-frequency table with log-scaled scoring.
//!
//! The table is built once (usually from a `word<TAB>count` TSV file) and is
//! read-only afterwards, so a single instance can be shared across threads
//! behind an `Arc`.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use tracing::{info, warn};

/// Score for words that are absent from the table (or when it is empty).
pub const BASELINE: f64 = 0.02;

#[derive(Debug, thiserror::Error)]
pub enum FreqError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Default)]
pub struct FrequencyOracle {
    counts: HashMap<String, u64>,
    max_count: u64,
}

impl FrequencyOracle {
    /// An oracle that scores every word at [`BASELINE`].
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_counts(counts: HashMap<String, u64>) -> Self {
        let max_count = counts.values().copied().max().unwrap_or(0);
        Self { counts, max_count }
    }

    /// Parse TSV content: `word<TAB>count` per line. Blank lines and `#`
    /// comments are skipped, as are lines without a tab or with a count that
    /// is not a non-negative integer. A repeated word keeps its last count.
    pub fn parse_tsv(content: &str) -> Self {
        let mut counts = HashMap::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((word, count)) = line.split_once('\t') else {
                continue;
            };
            let Ok(count) = count.trim().parse::<u64>() else {
                continue;
            };
            counts.insert(word.to_string(), count);
        }
        Self::from_counts(counts)
    }

    pub fn open(path: &Path) -> Result<Self, FreqError> {
        let content = fs::read_to_string(path)?;
        let oracle = Self::parse_tsv(&content);
        info!(
            path = %path.display(),
            words = oracle.len(),
            max_count = oracle.max_count,
            "frequency table loaded"
        );
        Ok(oracle)
    }

    /// Load `path`, degrading to an empty oracle when the file is missing or
    /// unreadable.
    pub fn open_or_empty(path: &Path) -> Self {
        match Self::open(path) {
            Ok(oracle) => oracle,
            Err(FreqError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "frequency file missing");
                Self::empty()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load frequency table");
                Self::empty()
            }
        }
    }

    /// Log-scaled popularity in `[BASELINE, 1]`:
    /// `min(1, ln(1 + count) / ln(1 + max_count))`.
    pub fn score(&self, word: &str) -> f64 {
        if self.max_count == 0 {
            return BASELINE;
        }
        match self.counts.get(word) {
            Some(&count) if count > 0 => {
                let s = (count as f64).ln_1p() / (self.max_count as f64).ln_1p();
                s.clamp(BASELINE, 1.0)
            }
            _ => BASELINE,
        }
    }

    pub fn has_entry(&self, word: &str) -> bool {
        self.counts.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn max_count(&self) -> u64 {
        self.max_count
    }
}
