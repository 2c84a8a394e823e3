use crate::lm::LanguageModel;
use crate::model::sample::{Sample, SampleScores};
use crate::pipeline::PipelineError;
use crate::score::entropy::compressed_len;
use crate::score::perplexity::perplexity;

#[derive(Debug, Default)]
pub struct ScoreOutcome {
    pub attempted: usize,
    pub samples: Vec<Sample>,
}

/// Scores one batch of generated texts. Every text consumes a generation
/// -order index, scored or not, so ranking tiebreaks are stable however the
/// scoring stage is reorganized later. Texts at or below `min_text_chars`
/// characters are skipped without being an error.
pub fn score_texts(
    model: &dyn LanguageModel,
    texts: Vec<String>,
    next_order: &mut usize,
    min_text_chars: usize,
) -> Result<ScoreOutcome, PipelineError> {
    let mut outcome = ScoreOutcome::default();
    for text in texts {
        let order = *next_order;
        *next_order += 1;
        outcome.attempted += 1;

        if text.chars().count() <= min_text_chars {
            tracing::debug!(order, len = text.len(), "skipping short sample");
            continue;
        }

        let ppl = perplexity(model, &text)?;
        let zlib = compressed_len(&text)?;
        outcome.samples.push(Sample {
            order,
            text,
            scores: SampleScores::PerplexityAndZlib { ppl, zlib },
        });
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lm::{GenerationParams, ModelError};

    struct LengthNll;

    impl LanguageModel for LengthNll {
        fn generate(
            &self,
            prompts: &[String],
            _params: &GenerationParams,
        ) -> Result<Vec<String>, ModelError> {
            Ok(prompts.to_vec())
        }

        fn avg_negative_log_likelihood(&self, text: &str) -> Result<f64, ModelError> {
            Ok(text.len() as f64 / 100.0)
        }
    }

    #[test]
    fn test_short_texts_skipped_but_counted() {
        let texts = vec![
            "a reasonable sample".to_string(),
            "ab".to_string(),
            "another reasonable sample".to_string(),
        ];
        let mut order = 0;
        let outcome = score_texts(&LengthNll, texts, &mut order, 2).unwrap();
        assert_eq!(outcome.attempted, 3);
        assert_eq!(outcome.samples.len(), 2);
        assert_eq!(order, 3);
        // The skipped text still consumed order index 1.
        assert_eq!(outcome.samples[0].order, 0);
        assert_eq!(outcome.samples[1].order, 2);
    }

    #[test]
    fn test_scores_populated() {
        let texts = vec!["four score and seven years ago".to_string()];
        let mut order = 10;
        let outcome = score_texts(&LengthNll, texts, &mut order, 2).unwrap();
        let sample = &outcome.samples[0];
        assert_eq!(sample.order, 10);
        let expected_ppl = (sample.text.len() as f64 / 100.0).exp();
        assert!((sample.scores.perplexity() - expected_ppl).abs() < 1e-12);
        assert!(sample.scores.compressed_size().unwrap() > 0);
    }
}
