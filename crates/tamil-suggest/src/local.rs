//! Local (in-process) generation: spelling variants → script conversion →
//! scoring → suffix expansion.

use tracing::{debug, warn};

use tamil_core::cache::cache_key;
use tamil_core::expand::expand_forms;
use tamil_core::scorer::Tier;
use tamil_core::translit::{ConvertError, SOURCE_SCHEME, TARGET_SCRIPT};
use tamil_core::variants::generate_variants;

use crate::strategy::StageOutcome;
use crate::types::Candidate;
use crate::{GenerationContext, Pipeline};

/// Convert `variant` through the primitive, memoized in the token cache
/// under `(tier, variant)`. Empty outputs are not cached.
fn convert_cached(
    pipeline: &Pipeline,
    tier: Tier,
    variant: &str,
) -> Result<Vec<String>, ConvertError> {
    let key = cache_key(&[tier.as_str(), variant]);
    if let Some(hit) = pipeline.caches.token.get(&key) {
        return Ok(hit);
    }
    let outputs = pipeline
        .converter
        .convert(SOURCE_SCHEME, TARGET_SCRIPT, variant)?;
    if !outputs.is_empty() {
        pipeline.caches.token.set(key, outputs.clone());
    }
    Ok(outputs)
}

pub(crate) fn generate(pipeline: &Pipeline, ctx: &GenerationContext<'_>) -> StageOutcome {
    let generation = &pipeline.settings.generation;
    let max_forms = generation.max_native_forms;
    let variants = generate_variants(&ctx.token, generation.max_variants);

    let mut candidates = Vec::new();
    let mut natives: Vec<String> = Vec::new();
    let mut failures = 0usize;
    let mut last_error = None;

    'convert: for variant in &variants {
        if ctx.cancel.is_cancelled() {
            debug!("local generation cancelled");
            return StageOutcome::Empty;
        }
        let tier = if *variant == ctx.token {
            Tier::Base
        } else {
            Tier::Variant
        };
        let outputs = match convert_cached(pipeline, tier, variant) {
            Ok(outputs) => outputs,
            Err(e) => {
                failures += 1;
                last_error = Some(e);
                continue;
            }
        };
        for word in outputs {
            if natives.len() >= max_forms {
                break 'convert;
            }
            let score = pipeline.scorer.score(&word, &ctx.token, tier);
            candidates.push(Candidate::new(word.clone(), score, tier));
            natives.push(word);
        }
    }

    if let Some(e) = &last_error {
        warn!(failures, variants = variants.len(), error = %e, "script conversion failed");
        if failures == variants.len() {
            return StageOutcome::Failed(e.to_string());
        }
    }

    let converted = natives.len();
    'expand: for native in natives.clone() {
        for form in expand_forms(&native).into_iter().skip(1) {
            if natives.len() >= max_forms {
                break 'expand;
            }
            let score = pipeline.scorer.score(&form, &ctx.token, Tier::Suffix);
            candidates.push(Candidate::new(form.clone(), score, Tier::Suffix));
            natives.push(form);
        }
    }

    let total = candidates.len();
    candidates.retain(|c| pipeline.is_valid(&c.word, ctx.input_len));
    debug!(
        variants = variants.len(),
        converted,
        expanded = natives.len() - converted,
        total,
        kept = candidates.len(),
        "local generation"
    );

    if candidates.is_empty() {
        StageOutcome::Empty
    } else {
        StageOutcome::Produced(candidates)
    }
}
