use tracing::debug;

use tamil_core::scorer::Tier;

use crate::types::{Candidate, GenerationPath};
use crate::{local, GenerationContext, Pipeline};

/// Result of one generation stage.
#[derive(Debug)]
pub enum StageOutcome {
    /// At least one candidate survived the validity filter.
    Produced(Vec<Candidate>),
    /// The stage ran but nothing survived, or it was cancelled.
    Empty,
    /// The stage could not run (runner error, conversion failure).
    Failed(String),
}

/// A candidate source, tried in order by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStrategy {
    Runner,
    Local,
}

impl GenerationStrategy {
    pub fn name(self) -> &'static str {
        match self {
            Self::Runner => "runner",
            Self::Local => "local",
        }
    }

    pub(crate) fn path(self) -> GenerationPath {
        match self {
            Self::Runner => GenerationPath::Runner,
            Self::Local => GenerationPath::Local,
        }
    }

    pub(crate) fn run(self, pipeline: &Pipeline, ctx: &GenerationContext<'_>) -> StageOutcome {
        match self {
            Self::Runner => run_runner(pipeline, ctx),
            Self::Local => local::generate(pipeline, ctx),
        }
    }
}

fn run_runner(pipeline: &Pipeline, ctx: &GenerationContext<'_>) -> StageOutcome {
    let Some(runner) = pipeline.runner.as_deref() else {
        return StageOutcome::Empty;
    };
    let items = match runner.suggest(ctx.text) {
        Ok(items) => items,
        Err(e) => return StageOutcome::Failed(e.to_string()),
    };
    let total = items.len();
    let candidates: Vec<Candidate> = items
        .into_iter()
        .filter(|item| pipeline.is_valid(&item.word, ctx.input_len))
        .map(|item| {
            let score = pipeline.scorer.score(&item.word, &ctx.token, Tier::Runner);
            Candidate::new(item.word, score, Tier::Runner)
        })
        .collect();
    debug!(total, kept = candidates.len(), "runner candidates filtered");
    if candidates.is_empty() {
        StageOutcome::Empty
    } else {
        StageOutcome::Produced(candidates)
    }
}
