use crate::lm::{LanguageModel, ModelError};

/// `exp(avg_nll)` of the text under the model. Lower values mean the model
/// assigns the text higher probability.
pub fn perplexity(model: &dyn LanguageModel, text: &str) -> Result<f64, ModelError> {
    let avg_nll = model.avg_negative_log_likelihood(text)?;
    Ok(avg_nll.exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lm::GenerationParams;

    struct FixedNll(f64);

    impl LanguageModel for FixedNll {
        fn generate(
            &self,
            prompts: &[String],
            _params: &GenerationParams,
        ) -> Result<Vec<String>, ModelError> {
            Ok(prompts.to_vec())
        }

        fn avg_negative_log_likelihood(&self, _text: &str) -> Result<f64, ModelError> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_exponentiates_average_nll() {
        let model = FixedNll(2.0f64.ln());
        let ppl = perplexity(&model, "whatever").unwrap();
        assert!((ppl - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_nll_is_unit_perplexity() {
        let model = FixedNll(0.0);
        assert_eq!(perplexity(&model, "t").unwrap(), 1.0);
    }
}
