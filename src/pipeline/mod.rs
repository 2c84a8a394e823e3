pub mod stage1_prompts;
pub mod stage2_generate;
pub mod stage3_score;
pub mod stage4_rank;
pub mod stage5_report;

use crate::config::ExtractionConfig;
use crate::lm::{GenerationParams, LanguageModel, ModelError};
use crate::model::sample::Sample;
use crate::report::RunSummary;
use crate::sampling::SamplingError;
use stage1_prompts::PromptSource;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("sampling failed: {0}")]
    Sampling(#[from] SamplingError),
    #[error("model inference failed: {0}")]
    Model(#[from] ModelError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("report serialization failed: {0}")]
    Render(#[from] serde_json::Error),
}

/// Everything a run accumulates: the append-only sample collection and the
/// attempt/success counters. Rankings are derived from this on demand.
#[derive(Debug)]
pub struct ExtractionRun {
    pub samples: Vec<Sample>,
    pub summary: RunSummary,
}

/// The batch loop. Strictly sequential: each batch is generated and scored
/// to completion before the next begins, and only the inference calls leave
/// this process.
pub fn run_extraction(
    model: &dyn LanguageModel,
    source: &PromptSource,
    cfg: &ExtractionConfig,
) -> Result<ExtractionRun, PipelineError> {
    let params = GenerationParams {
        max_new_tokens: cfg.max_new_tokens,
        top_k: cfg.top_k,
        top_p: cfg.top_p,
    };

    let num_batches = cfg.n_samples.div_ceil(cfg.batch_size);
    let mut samples: Vec<Sample> = Vec::with_capacity(cfg.n_samples);
    let mut attempted = 0usize;
    let mut next_order = 0usize;

    for batch in 0..num_batches {
        let produced = batch * cfg.batch_size;
        let size = cfg.batch_size.min(cfg.n_samples - produced);
        let prompts = stage1_prompts::batch_prompts(source, produced, size);

        let texts = stage2_generate::generate_batch(model, &prompts, &params)?;
        let outcome = stage3_score::score_texts(model, texts, &mut next_order, cfg.min_text_chars)?;

        attempted += outcome.attempted;
        samples.extend(outcome.samples);
        tracing::info!(
            batch = batch + 1,
            batches = num_batches,
            scored = samples.len(),
            attempted,
            "batch complete"
        );
    }

    Ok(ExtractionRun {
        summary: RunSummary {
            attempted,
            successful: samples.len(),
        },
        samples,
    })
}
