use serde::{Deserialize, Serialize};

use tamil_core::cache::CacheStats;
use tamil_core::scorer::Tier;

/// One suggestion request. `limit == 0` means "use the configured default";
/// an empty `mode` means the configured default mode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub text: String,
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub limit: usize,
    /// Only used for log correlation.
    #[serde(skip)]
    pub request_id: Option<String>,
}

impl GenerationRequest {
    pub fn new(text: impl Into<String>, mode: impl Into<String>, limit: usize) -> Self {
        Self {
            text: text.into(),
            mode: mode.into(),
            limit,
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    pub fn request_id(&self) -> &str {
        self.request_id.as_deref().unwrap_or("n/a")
    }
}

/// Intermediate suggestion with a provisional score.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub word: String,
    pub score: f64,
    pub tier: Tier,
}

impl Candidate {
    pub fn new(word: impl Into<String>, score: f64, tier: Tier) -> Self {
        Self {
            word: word.into(),
            score,
            tier,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub word: String,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheStatus {
    Hit,
    Miss,
    /// The cache was not consulted (invalid input).
    None,
}

/// Which generation stages produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationPath {
    Runner,
    Local,
    /// Runner and local candidates were merged.
    Mixed,
    None,
}

impl GenerationPath {
    pub(crate) fn add(self, other: GenerationPath) -> GenerationPath {
        match (self, other) {
            (GenerationPath::None, p) | (p, GenerationPath::None) => p,
            (a, b) if a == b => a,
            _ => GenerationPath::Mixed,
        }
    }

    pub fn includes_runner(self) -> bool {
        matches!(self, GenerationPath::Runner | GenerationPath::Mixed)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineResult {
    pub suggestions: Vec<Suggestion>,
    /// True when the runner produced this answer. Always true on a cache hit,
    /// for compatibility; see `generated_by` for the actual provenance.
    pub used_runner: bool,
    pub cache_status: CacheStatus,
    pub generated_by: GenerationPath,
}

impl PipelineResult {
    pub(crate) fn empty(cache_status: CacheStatus) -> Self {
        Self {
            suggestions: Vec::new(),
            used_runner: false,
            cache_status,
            generated_by: GenerationPath::None,
        }
    }
}

/// Wire shape of a suggestion response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestResponse {
    pub success: bool,
    pub suggestions: Vec<Suggestion>,
    pub used_runner: bool,
    pub cache_status: CacheStatus,
    pub generated_by: GenerationPath,
}

impl From<PipelineResult> for SuggestResponse {
    fn from(r: PipelineResult) -> Self {
        Self {
            success: true,
            suggestions: r.suggestions,
            used_runner: r.used_runner,
            cache_status: r.cache_status,
            generated_by: r.generated_by,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CacheReport {
    pub response: CacheStats,
    pub token: CacheStats,
    pub general: CacheStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub ok: bool,
    pub cache_init: bool,
    pub runner_configured: bool,
    pub caches: CacheReport,
}

/// What the response cache stores per key.
#[derive(Debug, Clone)]
pub(crate) struct CachedAnswer {
    pub suggestions: Vec<Suggestion>,
    pub generated_by: GenerationPath,
}
