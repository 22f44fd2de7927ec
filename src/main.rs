use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use neardup::{
    read_corpus_file, write_retained, ConfigOverrides, DedupConfig, DedupFileConfig, DedupReport,
    Deduplicator,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "neardup",
    version,
    about = "Remove exact and near-duplicate documents from a JSONL corpus"
)]
struct Cli {
    /// Input corpus, one JSON record per line
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Where to write the retained records
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Where to write the JSON run report
    #[arg(long, value_name = "FILE", default_value = "reports/dedup_stats.json")]
    report: PathBuf,

    /// YAML configuration file; flags below override it
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Jaccard similarity threshold in (0, 1]
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Signature length
    #[arg(long)]
    num_perm: Option<usize>,

    /// Shingle width in tokens
    #[arg(short, long)]
    k: Option<usize>,

    /// Skip the exact content-hash filter
    #[arg(long)]
    no_exact_dedup: bool,

    /// Compute signatures on all cores
    #[arg(long)]
    parallel: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let config = build_config(&cli)?;
    let dedup = Deduplicator::new(config).context("invalid configuration")?;

    let corpus = read_corpus_file(&cli.input)
        .with_context(|| format!("failed to read corpus {}", cli.input.display()))?;
    let outcome = dedup.run(&corpus.documents)?;

    create_parent(&cli.output)?;
    let file = File::create(&cli.output)
        .with_context(|| format!("failed to create {}", cli.output.display()))?;
    let written = write_retained(file, &corpus, &outcome)?;

    let report = DedupReport::from_outcome(dedup.params(), &outcome, &corpus.input_errors);
    report
        .write_json(&cli.report)
        .with_context(|| format!("failed to write report {}", cli.report.display()))?;

    info!(
        output = %cli.output.display(),
        report = %cli.report.display(),
        written,
        "output_written"
    );
    println!(
        "{} documents: {} exact duplicates, {} near duplicates, {} retained ({:.2}% removed)",
        outcome.stats.total,
        outcome.stats.exact_duplicates,
        outcome.stats.near_duplicates,
        outcome.stats.retained,
        outcome.stats.removal_rate * 100.0
    );
    Ok(())
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            threshold: self.threshold,
            num_perm: self.num_perm,
            k: self.k,
            exact_dedup: self.no_exact_dedup.then_some(false),
            use_parallel: self.parallel.then_some(true),
        }
    }
}

/// File config (or defaults) with command-line flags applied on top.
fn build_config(cli: &Cli) -> Result<DedupConfig> {
    let config = match &cli.config {
        Some(path) => DedupFileConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?
            .to_dedup_config(),
        None => DedupConfig::default(),
    };
    Ok(config.with_overrides(&cli.overrides()))
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
