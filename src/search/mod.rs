use std::io::Write;

use serde::Deserialize;

use crate::config::SearchConfig;
use crate::report::RunSummary;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    pub title: String,
    pub link: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

/// Result of one query against the search API.
#[derive(Debug)]
pub struct SearchOutcome {
    pub query: String,
    pub items: Vec<SearchItem>,
}

impl SearchOutcome {
    /// The success predicate: the API returned at least one item.
    pub fn is_hit(&self) -> bool {
        !self.items.is_empty()
    }
}

/// One stateless GET per query against a fixed search endpoint.
#[derive(Debug)]
pub struct SearchClient {
    http: reqwest::blocking::Client,
    config: SearchConfig,
}

impl SearchClient {
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        Ok(Self {
            http: reqwest::blocking::Client::builder().build()?,
            config,
        })
    }

    pub fn lookup(&self, query: &str) -> Result<SearchOutcome, SearchError> {
        // The query goes out wrapped in literal quotes: these are verbatim
        // candidate strings and only exact-phrase hits are evidence.
        let quoted = format!("\"{query}\"");
        let response: SearchResponse = self
            .http
            .get(&self.config.endpoint)
            .query(&[
                ("key", self.config.api_key.as_str()),
                ("cx", self.config.engine_id.as_str()),
                ("q", quoted.as_str()),
            ])
            .send()?
            .error_for_status()?
            .json()?;
        Ok(SearchOutcome {
            query: query.to_string(),
            items: response.items,
        })
    }
}

/// Runs every query and streams per-query blocks to `out`, flushing as it
/// goes so an aborted run still leaves a readable report prefix. Returns the
/// hit/miss counters; the caller appends the trailer.
pub fn run_queries<W: Write>(
    client: &SearchClient,
    queries: &[String],
    out: &mut W,
) -> Result<RunSummary, SearchError> {
    let mut summary = RunSummary::default();
    for query in queries {
        let outcome = client.lookup(query)?;
        summary.attempted += 1;
        if outcome.is_hit() {
            summary.successful += 1;
        }
        write_query_block(out, &outcome)?;
        out.flush()?;
        tracing::info!(query = %outcome.query, hits = outcome.items.len(), "query complete");
    }
    Ok(summary)
}

pub fn write_query_block<W: Write>(out: &mut W, outcome: &SearchOutcome) -> std::io::Result<()> {
    writeln!(out, "=============================================")?;
    if outcome.is_hit() {
        writeln!(out, "Results found for: '{}'", outcome.query)?;
        for item in &outcome.items {
            writeln!(out, "Title: {}", item.title)?;
            writeln!(out, "Link: {}", item.link)?;
            writeln!(out)?;
        }
    } else {
        writeln!(out, "No results found for: '{}'", outcome.query)?;
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_trailer<W: Write>(out: &mut W, summary: &RunSummary) -> std::io::Result<()> {
    writeln!(out, "Total search terms: {}", summary.attempted)?;
    writeln!(out, "Total successful searches: {}", summary.successful)?;
    writeln!(
        out,
        "Percentage of successful searches: {}",
        summary.percentage_label()
    )?;
    Ok(())
}
