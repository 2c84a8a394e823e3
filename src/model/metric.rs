use crate::model::sample::SampleScores;

/// The ranking formulas. Closed set; `from_name`/`ALL` form the registry a
/// new formula plugs into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricFormula {
    /// `-ln(ppl)`: higher means the model is more confident in the text.
    NegLogPerplexity,
    /// `zlib / ln(ppl)`: compression entropy against log-perplexity,
    /// separating repetitive low-information text from genuinely likely text.
    ZlibRatio,
}

impl MetricFormula {
    pub const ALL: [MetricFormula; 2] = [MetricFormula::NegLogPerplexity, MetricFormula::ZlibRatio];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "perplexity" => Some(MetricFormula::NegLogPerplexity),
            "zlib-ratio" => Some(MetricFormula::ZlibRatio),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MetricFormula::NegLogPerplexity => "perplexity",
            MetricFormula::ZlibRatio => "zlib-ratio",
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            MetricFormula::NegLogPerplexity => "negative log perplexity",
            MetricFormula::ZlibRatio => "ratio of zlib entropy and log perplexity",
        }
    }

    /// Evaluates the formula against one score record. Inputs that would put
    /// a non-positive value under a logarithm or a zero in a denominator are
    /// explicit errors; callers exclude the sample and keep going.
    pub fn evaluate(self, scores: &SampleScores) -> Result<f64, MetricError> {
        let ppl = scores.perplexity();
        if ppl <= 0.0 {
            return Err(MetricError::NonPositivePerplexity(ppl));
        }
        match self {
            MetricFormula::NegLogPerplexity => Ok(-ppl.ln()),
            MetricFormula::ZlibRatio => {
                let denom = ppl.ln();
                if denom <= 0.0 {
                    return Err(MetricError::NonPositiveLogPerplexity(ppl));
                }
                let zlib = scores
                    .compressed_size()
                    .ok_or(MetricError::MissingCompressedSize)?;
                if zlib == 0 {
                    return Err(MetricError::ZeroCompressedSize);
                }
                Ok(zlib as f64 / denom)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MetricError {
    #[error("perplexity {0} is not positive")]
    NonPositivePerplexity(f64),
    #[error("perplexity {0} has non-positive log; ratio is undefined")]
    NonPositiveLogPerplexity(f64),
    #[error("sample carries no compressed size")]
    MissingCompressedSize,
    #[error("compressed size is zero")]
    ZeroCompressedSize,
}
