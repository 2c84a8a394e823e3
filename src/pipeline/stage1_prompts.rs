use crate::config::ExtractionConfig;
use crate::sampling::{SamplingError, SkewedSampler};

/// Where generation prompts come from: a skew-sampled subset of the
/// candidate pool, or one fixed prompt repeated every batch.
#[derive(Debug, Clone)]
pub enum PromptSource {
    Fixed(String),
    Pool(Vec<String>),
}

impl PromptSource {
    pub fn label(&self) -> String {
        match self {
            PromptSource::Fixed(prompt) if prompt.is_empty() => "fixed:empty".to_string(),
            PromptSource::Fixed(prompt) => format!("fixed:{prompt}"),
            PromptSource::Pool(prompts) => format!("pool:{}", prompts.len()),
        }
    }
}

/// Builds the run's prompt subset. Sampling errors surface before any
/// inference call is made.
pub fn select_prompts(
    pool: Option<&[String]>,
    fixed_prompt: &str,
    cfg: &ExtractionConfig,
) -> Result<PromptSource, SamplingError> {
    match pool {
        None => Ok(PromptSource::Fixed(fixed_prompt.to_string())),
        Some(pool) => {
            let mut sampler = SkewedSampler::new(cfg.pool_scale, cfg.seed);
            let draws = cfg.prompt_draws.min(pool.len());
            if draws < cfg.prompt_draws {
                tracing::warn!(
                    requested = cfg.prompt_draws,
                    pool = pool.len(),
                    "prompt draw count capped at pool size"
                );
            }
            let prompts = sampler.sample(pool, draws)?;
            tracing::info!(drawn = prompts.len(), "selected prompt subset");
            Ok(PromptSource::Pool(prompts))
        }
    }
}

/// The prompts for one batch, cycling through the subset so every batch is
/// full-size regardless of how many prompts were drawn.
pub fn batch_prompts(source: &PromptSource, start: usize, size: usize) -> Vec<String> {
    match source {
        PromptSource::Fixed(prompt) => vec![prompt.clone(); size],
        PromptSource::Pool(prompts) => (0..size)
            .map(|i| prompts[(start + i) % prompts.len()].clone())
            .collect(),
    }
}
