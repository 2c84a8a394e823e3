use serde::Serialize;

use crate::report::NamedStats;

/// Machine-readable run summary written next to the text reports.
#[derive(Debug, Serialize)]
pub struct SummaryJson {
    pub tool: ToolMeta,
    pub run: RunBlock,
    pub distributions: Vec<NamedStats>,
    pub rankings: Vec<RankingStats>,
}

#[derive(Debug, Serialize)]
pub struct ToolMeta {
    pub name: &'static str,
    pub version: &'static str,
    pub git_hash: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RunBlock {
    pub samples_requested: usize,
    pub samples_generated: usize,
    pub samples_scored: usize,
    /// `null` when nothing was attempted; never a NaN.
    pub success_percentage: Option<f64>,
    pub batch_size: usize,
    pub seed: u64,
    pub prompt_source: String,
}

#[derive(Debug, Serialize)]
pub struct RankingStats {
    pub metric: &'static str,
    pub ranked: usize,
    pub excluded: usize,
}

pub fn render_summary_json(summary: &SummaryJson) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(summary)
}
