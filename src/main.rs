mod config;
mod input;
mod lm;
mod logging;
mod model;
mod pipeline;
mod report;
mod sampling;
mod score;
mod search;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::config::{ExtractionConfig, SearchConfig};
use crate::input::load_pool;
use crate::lm::http::HttpModelClient;
use crate::model::metric::MetricFormula;
use crate::pipeline::stage1_prompts::{PromptSource, select_prompts};
use crate::pipeline::stage4_rank::{rank, top};
use crate::pipeline::stage5_report::{write_ranked_report, write_summary_json};
use crate::pipeline::{ExtractionRun, run_extraction};
use crate::report::json::{RankingStats, RunBlock, SummaryJson, ToolMeta};
use crate::report::text::render_entries;
use crate::report::NamedStats;
use crate::sampling::SkewedSampler;
use crate::search::{SearchClient, run_queries, write_trailer};

#[derive(Parser, Debug)]
#[command(name = "memsieve", version)]
#[command(about = "Ranks LM-generated text samples by training-data memorization signals.")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate candidate texts, score them, and write ranked reports.
    Run(RunArgs),
    /// Probe a web-search API with sampled candidate strings.
    Search(SearchArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Base URL of the inference sidecar.
    #[arg(long)]
    model_url: String,
    /// Directory for ranked reports and summary.json.
    #[arg(long)]
    out: PathBuf,
    /// Candidate pool file; prompts are skew-sampled from it when present.
    #[arg(long)]
    pool: Option<PathBuf>,
    /// Fixed prompt used for every batch when no pool is given.
    #[arg(long, default_value = "")]
    prompt: String,
    /// Total number of texts to generate.
    #[arg(long, default_value_t = 1000)]
    samples: usize,
    #[arg(long, default_value_t = 10)]
    batch_size: usize,
    #[arg(long, default_value_t = 256)]
    max_new_tokens: usize,
    #[arg(long, default_value_t = 40)]
    top_k: usize,
    #[arg(long, default_value_t = 1.0)]
    top_p: f64,
    /// Generated texts at or below this many characters are discarded.
    #[arg(long, default_value_t = 2)]
    min_chars: usize,
    /// Number of prompts drawn from the pool.
    #[arg(long, default_value_t = 100)]
    draws: usize,
    /// Scale constant of the skewed index transform.
    #[arg(long, default_value_t = 1000)]
    scale: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Entries per ranked report file.
    #[arg(long, default_value_t = 1000)]
    top: usize,
    /// Ranking formula; repeatable. Defaults to every known formula.
    #[arg(long = "metric")]
    metrics: Vec<String>,
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Candidate pool file to sample queries from.
    #[arg(long)]
    pool: PathBuf,
    /// Output report file.
    #[arg(long)]
    out: PathBuf,
    /// Search engine identifier passed as the `cx` parameter.
    #[arg(long)]
    engine_id: String,
    #[arg(long, default_value = "https://www.googleapis.com/customsearch/v1")]
    endpoint: String,
    /// Name of the environment variable holding the API key.
    #[arg(long, default_value = "SEARCH_API_KEY")]
    api_key_env: String,
    /// Number of queries drawn from the pool.
    #[arg(long, default_value_t = 100)]
    draws: usize,
    /// Scale constant of the skewed index transform.
    #[arg(long, default_value_t = 1000)]
    scale: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() {
    logging::init();
    if let Err(err) = run(Cli::parse()) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Run(args) => run_pipeline(args),
        Command::Search(args) => run_search(args),
    }
}

fn run_pipeline(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = extraction_config(&args);
    cfg.validate()?;
    let formulas = resolve_formulas(&args.metrics)?;

    let pool = args.pool.as_deref().map(load_pool).transpose()?;
    let source = select_prompts(pool.as_deref(), &args.prompt, &cfg)?;
    let model = HttpModelClient::new(args.model_url.as_str())?;

    let run = run_extraction(&model, &source, &cfg)?;
    tracing::info!(
        attempted = run.summary.attempted,
        scored = run.summary.successful,
        "extraction complete"
    );

    let mut ranking_stats = Vec::with_capacity(formulas.len());
    for formula in &formulas {
        let ranking = rank(&run.samples, *formula);
        println!("======== top samples by {} ========", formula.describe());
        println!("{}", render_entries(top(&ranking.entries, cfg.print_top)));
        write_ranked_report(&args.out, &ranking, &run.summary, cfg.report_top)?;
        ranking_stats.push(RankingStats {
            metric: formula.name(),
            ranked: ranking.entries.len(),
            excluded: ranking.excluded.len(),
        });
    }

    let summary = build_summary_json(&run, &cfg, &source, ranking_stats);
    write_summary_json(&args.out, &summary)?;
    Ok(())
}

fn run_search(args: SearchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let api_key = std::env::var(&args.api_key_env)
        .map_err(|_| format!("environment variable {} is not set", args.api_key_env))?;

    let pool = load_pool(&args.pool)?;
    let draws = args.draws.min(pool.len());
    if draws < args.draws {
        tracing::warn!(
            requested = args.draws,
            pool = pool.len(),
            "query draw count capped at pool size"
        );
    }
    let mut sampler = SkewedSampler::new(args.scale, args.seed);
    let queries = sampler.sample(&pool, draws)?;

    let client = SearchClient::new(SearchConfig {
        endpoint: args.endpoint,
        api_key,
        engine_id: args.engine_id,
    })?;

    let mut out = BufWriter::new(File::create(&args.out)?);
    let summary = run_queries(&client, &queries, &mut out)?;
    write_trailer(&mut out, &summary)?;
    out.flush()?;

    println!("Total search terms: {}", summary.attempted);
    println!("Total successful searches: {}", summary.successful);
    println!(
        "Percentage of successful searches: {}",
        summary.percentage_label()
    );
    Ok(())
}

fn extraction_config(args: &RunArgs) -> ExtractionConfig {
    let mut cfg = ExtractionConfig::default_v1();
    cfg.n_samples = args.samples;
    cfg.batch_size = args.batch_size;
    cfg.max_new_tokens = args.max_new_tokens;
    cfg.top_k = args.top_k;
    cfg.top_p = args.top_p;
    cfg.min_text_chars = args.min_chars;
    cfg.prompt_draws = args.draws;
    cfg.pool_scale = args.scale;
    cfg.seed = args.seed;
    cfg.report_top = args.top;
    cfg
}

fn resolve_formulas(names: &[String]) -> Result<Vec<MetricFormula>, String> {
    if names.is_empty() {
        return Ok(MetricFormula::ALL.to_vec());
    }
    names
        .iter()
        .map(|name| {
            MetricFormula::from_name(name).ok_or_else(|| {
                let known: Vec<&str> = MetricFormula::ALL.iter().map(|f| f.name()).collect();
                format!("unknown metric '{}' (known: {})", name, known.join(", "))
            })
        })
        .collect()
}

fn build_summary_json(
    run: &ExtractionRun,
    cfg: &ExtractionConfig,
    source: &PromptSource,
    rankings: Vec<RankingStats>,
) -> SummaryJson {
    let ppl: Vec<f64> = run.samples.iter().map(|s| s.scores.perplexity()).collect();
    let zlib: Vec<f64> = run
        .samples
        .iter()
        .filter_map(|s| s.scores.compressed_size())
        .map(|z| z as f64)
        .collect();
    SummaryJson {
        tool: ToolMeta {
            name: "memsieve",
            version: env!("CARGO_PKG_VERSION"),
            git_hash: read_git_hash(Path::new(".")),
        },
        run: RunBlock {
            samples_requested: cfg.n_samples,
            samples_generated: run.summary.attempted,
            samples_scored: run.summary.successful,
            success_percentage: run.summary.percentage().ok(),
            batch_size: cfg.batch_size,
            seed: cfg.seed,
            prompt_source: source.label(),
        },
        distributions: vec![
            NamedStats::from_values("ppl", &ppl),
            NamedStats::from_values("zlib", &zlib),
        ],
        rankings,
    }
}

fn read_git_hash(repo_root: &Path) -> Option<String> {
    let head = repo_root.join(".git/HEAD");
    let content = std::fs::read_to_string(head).ok()?;
    if let Some(ref_line) = content.strip_prefix("ref: ") {
        let ref_path = repo_root.join(".git").join(ref_line.trim());
        return std::fs::read_to_string(ref_path)
            .ok()
            .map(|s| s.trim().to_string());
    }
    Some(content.trim().to_string())
}
