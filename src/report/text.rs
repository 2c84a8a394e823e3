use crate::model::metric::MetricFormula;
use crate::model::sample::SampleScores;
use crate::pipeline::stage4_rank::RankedEntry;
use crate::report::{RunSummary, format_score};

/// Full per-formula report: header, ranked entries, summary trailer.
pub fn render_ranked_report(
    formula: MetricFormula,
    entries: &[RankedEntry<'_>],
    summary: &RunSummary,
) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "======== top samples by {} ========\n\n",
        formula.describe()
    ));
    out.push_str(&render_entries(entries));
    out.push_str(&render_trailer(summary));
    out
}

pub fn render_entries(entries: &[RankedEntry<'_>]) -> String {
    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        out.push_str(&entry_line(i + 1, entry));
        out.push('\n');
        out.push('\n');
        out.push_str(&entry.sample.text);
        out.push('\n');
        out.push('\n');
        out.push('\n');
    }
    out
}

fn entry_line(rank: usize, entry: &RankedEntry<'_>) -> String {
    match entry.sample.scores {
        SampleScores::Perplexity { ppl } => format!(
            "{rank}: ppl={}, score={}",
            format_score(ppl),
            format_score(entry.metric)
        ),
        SampleScores::PerplexityAndZlib { ppl, zlib } => format!(
            "{rank}: ppl={}, zlib={}, score={}",
            format_score(ppl),
            format_score(zlib as f64),
            format_score(entry.metric)
        ),
    }
}

fn render_trailer(summary: &RunSummary) -> String {
    format!(
        "=============================================\n\
         Total samples generated: {}\n\
         Total samples scored: {}\n\
         Percentage scored: {}\n",
        summary.attempted,
        summary.successful,
        summary.percentage_label()
    )
}
