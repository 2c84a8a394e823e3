pub mod http;

/// Sampling knobs forwarded to the generation capability.
#[derive(Debug, Clone, Copy)]
pub struct GenerationParams {
    pub max_new_tokens: usize,
    pub top_k: usize,
    pub top_p: f64,
}

/// The opaque causal-LM capability the pipeline runs against: batched text
/// generation plus teacher-forced scoring of a text under the model. Both
/// calls block; neither mutates model state (`&self` only).
pub trait LanguageModel {
    /// Generates one continuation per prompt.
    fn generate(
        &self,
        prompts: &[String],
        params: &GenerationParams,
    ) -> Result<Vec<String>, ModelError>;

    /// Average negative log-likelihood of the text's own tokens under the
    /// model, with the text as both input and target.
    fn avg_negative_log_likelihood(&self, text: &str) -> Result<f64, ModelError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("inference endpoint unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("inference endpoint returned malformed payload: {0}")]
    Malformed(String),
}
