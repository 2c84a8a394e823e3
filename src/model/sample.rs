/// One generated text plus the signals computed for it. Created by the
/// scoring stage, appended to the run's results, never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Sample {
    /// Position in generation order; the only ranking tiebreak.
    pub order: usize,
    pub text: String,
    pub scores: SampleScores,
}

/// Closed record of per-sample signals. Each variant carries exactly the
/// fields its ranking formulas can consume, so a formula that needs a signal
/// the sample does not have is an explicit error rather than a missing-key
/// lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleScores {
    Perplexity { ppl: f64 },
    PerplexityAndZlib { ppl: f64, zlib: u64 },
}

impl SampleScores {
    pub fn perplexity(&self) -> f64 {
        match *self {
            SampleScores::Perplexity { ppl } => ppl,
            SampleScores::PerplexityAndZlib { ppl, .. } => ppl,
        }
    }

    pub fn compressed_size(&self) -> Option<u64> {
        match *self {
            SampleScores::Perplexity { .. } => None,
            SampleScores::PerplexityAndZlib { zlib, .. } => Some(zlib),
        }
    }
}
