use std::fs;
use std::path::{Path, PathBuf};

use crate::pipeline::PipelineError;
use crate::pipeline::stage4_rank::{Ranking, top};
use crate::report::RunSummary;
use crate::report::json::{SummaryJson, render_summary_json};
use crate::report::text::render_ranked_report;

/// Writes one ranked report file for a formula. Requesting more entries than
/// the ranking holds is reported loudly and then satisfied with everything
/// available.
pub fn write_ranked_report(
    out_dir: &Path,
    ranking: &Ranking<'_>,
    summary: &RunSummary,
    top_n: usize,
) -> Result<PathBuf, PipelineError> {
    fs::create_dir_all(out_dir)?;
    if top_n > ranking.entries.len() {
        tracing::warn!(
            requested = top_n,
            available = ranking.entries.len(),
            formula = ranking.formula.name(),
            "requested more ranked entries than available; writing all"
        );
    }
    let entries = top(&ranking.entries, top_n);
    let report = render_ranked_report(ranking.formula, entries, summary);
    let path = out_dir.join(format!(
        "ranked_{}.txt",
        ranking.formula.name().replace('-', "_")
    ));
    fs::write(&path, report)?;
    tracing::info!(path = %path.display(), entries = entries.len(), "wrote ranked report");
    Ok(path)
}

pub fn write_summary_json(out_dir: &Path, summary: &SummaryJson) -> Result<PathBuf, PipelineError> {
    fs::create_dir_all(out_dir)?;
    let path = out_dir.join("summary.json");
    fs::write(&path, render_summary_json(summary)?)?;
    Ok(path)
}
