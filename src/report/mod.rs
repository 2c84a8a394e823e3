pub mod json;
pub mod text;

/// Attempt/success counters for one run. The success predicate is the
/// caller's: scored samples for the extraction pipeline, non-empty result
/// lists for the search collaborator.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunSummary {
    pub attempted: usize,
    pub successful: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("run recorded no attempts; success percentage is undefined")]
pub struct EmptyRunSummary;

impl RunSummary {
    /// `100 * successful / attempted`. Never computed on an empty run.
    pub fn percentage(&self) -> Result<f64, EmptyRunSummary> {
        if self.attempted == 0 {
            return Err(EmptyRunSummary);
        }
        Ok(100.0 * self.successful as f64 / self.attempted as f64)
    }

    /// Human form for report trailers: a plain number with `%`, or `N/A`.
    pub fn percentage_label(&self) -> String {
        match self.percentage() {
            Ok(p) => format!("{p}%"),
            Err(EmptyRunSummary) => "N/A".to_string(),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct NamedStats {
    pub name: &'static str,
    pub median: f64,
    pub p90: f64,
    pub p99: f64,
}

impl NamedStats {
    pub fn from_values(name: &'static str, values: &[f64]) -> Self {
        Self {
            name,
            median: median(values),
            p90: p90(values),
            p99: p99(values),
        }
    }
}

pub fn format_score(v: f64) -> String {
    format!("{v:.3}")
}

pub fn quantile_indexed(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();
    let idx = ((n - 1) as f64 * p).ceil() as usize;
    sorted[idx]
}

pub fn median(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.5)
}

pub fn p90(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.90)
}

pub fn p99(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.99)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantiles() {
        let v = vec![1.0f64, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(median(&v), 3.0);
        assert_eq!(p90(&v), 5.0);
        assert_eq!(p99(&v), 5.0);
    }

    #[test]
    fn test_percentage_invariant() {
        let summary = RunSummary {
            attempted: 40,
            successful: 38,
        };
        let p = summary.percentage().unwrap();
        assert!((p - 100.0 * 38.0 / 40.0).abs() < 1e-9);
        assert_eq!(summary.percentage_label(), "95%");
    }

    #[test]
    fn test_empty_summary_never_divides() {
        let summary = RunSummary::default();
        assert_eq!(summary.percentage(), Err(EmptyRunSummary));
        assert_eq!(summary.percentage_label(), "N/A");
    }

    #[test]
    fn test_format_score_three_decimals() {
        assert_eq!(format_score(1.0), "1.000");
        assert_eq!(format_score(266.6666), "266.667");
        assert_eq!(format_score(-0.6931), "-0.693");
    }
}
