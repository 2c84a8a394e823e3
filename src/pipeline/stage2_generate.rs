use crate::lm::{GenerationParams, LanguageModel, ModelError};

/// One generation round-trip. The capability already promises one text per
/// prompt; this is where that promise is enforced.
pub fn generate_batch(
    model: &dyn LanguageModel,
    prompts: &[String],
    params: &GenerationParams,
) -> Result<Vec<String>, ModelError> {
    tracing::debug!(prompts = prompts.len(), "requesting generation batch");
    let texts = model.generate(prompts, params)?;
    if texts.len() != prompts.len() {
        return Err(ModelError::Malformed(format!(
            "capability returned {} texts for {} prompts",
            texts.len(),
            prompts.len()
        )));
    }
    Ok(texts)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl LanguageModel for Echo {
        fn generate(
            &self,
            prompts: &[String],
            _params: &GenerationParams,
        ) -> Result<Vec<String>, ModelError> {
            Ok(prompts.iter().map(|p| format!("{p}!")).collect())
        }

        fn avg_negative_log_likelihood(&self, _text: &str) -> Result<f64, ModelError> {
            Ok(1.0)
        }
    }

    struct Short;

    impl LanguageModel for Short {
        fn generate(
            &self,
            _prompts: &[String],
            _params: &GenerationParams,
        ) -> Result<Vec<String>, ModelError> {
            Ok(vec!["only one".to_string()])
        }

        fn avg_negative_log_likelihood(&self, _text: &str) -> Result<f64, ModelError> {
            Ok(1.0)
        }
    }

    fn params() -> GenerationParams {
        GenerationParams {
            max_new_tokens: 8,
            top_k: 40,
            top_p: 1.0,
        }
    }

    #[test]
    fn test_one_text_per_prompt() {
        let prompts = vec!["a".to_string(), "b".to_string()];
        let texts = generate_batch(&Echo, &prompts, &params()).unwrap();
        assert_eq!(texts, vec!["a!", "b!"]);
    }

    #[test]
    fn test_count_mismatch_is_malformed() {
        let prompts = vec!["a".to_string(), "b".to_string()];
        let err = generate_batch(&Short, &prompts, &params()).unwrap_err();
        assert!(matches!(err, ModelError::Malformed(_)));
    }
}
