use crate::model::metric::{MetricError, MetricFormula};
use crate::model::sample::Sample;

#[derive(Debug, Clone, Copy)]
pub struct RankedEntry<'a> {
    pub sample: &'a Sample,
    pub metric: f64,
}

/// One formula evaluated over the whole results collection: entries sorted
/// by metric descending (ties keep generation order), plus the samples the
/// formula rejected, with why.
#[derive(Debug)]
pub struct Ranking<'a> {
    pub formula: MetricFormula,
    pub entries: Vec<RankedEntry<'a>>,
    pub excluded: Vec<(usize, MetricError)>,
}

pub fn rank<'a>(samples: &'a [Sample], formula: MetricFormula) -> Ranking<'a> {
    let mut entries = Vec::with_capacity(samples.len());
    let mut excluded = Vec::new();
    for sample in samples {
        match formula.evaluate(&sample.scores) {
            Ok(metric) => entries.push(RankedEntry { sample, metric }),
            Err(err) => {
                tracing::warn!(
                    order = sample.order,
                    formula = formula.name(),
                    %err,
                    "sample excluded from ranking"
                );
                excluded.push((sample.order, err));
            }
        }
    }
    // Stable sort: equal metrics keep the generation order they arrived in.
    entries.sort_by(|a, b| {
        b.metric
            .partial_cmp(&a.metric)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    Ranking {
        formula,
        entries,
        excluded,
    }
}

/// First `n` entries of an already-ranked list. Truncation only.
pub fn top<'r, 'a>(entries: &'r [RankedEntry<'a>], n: usize) -> &'r [RankedEntry<'a>] {
    &entries[..n.min(entries.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::sample::SampleScores;

    fn sample(order: usize, ppl: f64, zlib: u64) -> Sample {
        Sample {
            order,
            text: format!("text-{order}"),
            scores: SampleScores::PerplexityAndZlib { ppl, zlib },
        }
    }

    #[test]
    fn test_rank_descending_by_confidence() {
        let samples = vec![sample(0, 0.5, 10), sample(1, 0.01, 50)];
        let ranking = rank(&samples, MetricFormula::NegLogPerplexity);
        assert_eq!(ranking.entries.len(), 2);
        assert_eq!(ranking.entries[0].sample.order, 1);
        assert_eq!(ranking.entries[1].sample.order, 0);
        assert!(ranking.entries[0].metric > ranking.entries[1].metric);
    }

    #[test]
    fn test_ties_keep_generation_order() {
        let samples = vec![sample(0, 2.0, 30), sample(1, 2.0, 40), sample(2, 2.0, 50)];
        let ranking = rank(&samples, MetricFormula::NegLogPerplexity);
        let orders: Vec<usize> = ranking.entries.iter().map(|e| e.sample.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn test_top_truncates_and_is_idempotent() {
        let samples: Vec<Sample> = (0..4).map(|i| sample(i, 2.0 + i as f64, 10)).collect();
        let ranking = rank(&samples, MetricFormula::NegLogPerplexity);

        let all = top(&ranking.entries, 10);
        assert_eq!(all.len(), 4);
        for w in all.windows(2) {
            assert!(w[0].metric >= w[1].metric);
        }

        let first_two = top(&ranking.entries, 2);
        let again = top(first_two, 2);
        assert_eq!(again.len(), 2);
        assert_eq!(again[0].sample.order, first_two[0].sample.order);
        assert_eq!(top(again, 5).len(), 2);
    }

    #[test]
    fn test_invalid_samples_excluded_not_fatal() {
        let samples = vec![sample(0, 1.0, 10), sample(1, 3.0, 20)];
        let ranking = rank(&samples, MetricFormula::ZlibRatio);
        assert_eq!(ranking.entries.len(), 1);
        assert_eq!(ranking.entries[0].sample.order, 1);
        assert_eq!(ranking.excluded.len(), 1);
        assert_eq!(ranking.excluded[0].0, 0);

        // The same sample still ranks under the likelihood-only formula.
        let ranking = rank(&samples, MetricFormula::NegLogPerplexity);
        assert_eq!(ranking.entries.len(), 2);
    }
}
