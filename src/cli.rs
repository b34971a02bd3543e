//! Command-line interface components.

use crate::config::MetafConfig;
use crate::decoder::GroupDecoder;
use crate::extract::{FeedKind, FeedParser};
use crate::models::ProcessingStats;
use crate::output::ReportLog;
use crate::processor::{ReportOutcome, ReportProcessor};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::*;
use std::future::Future;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, warn};

#[derive(Parser, Debug)]
#[command(name = "metaf-decoder")]
#[command(about = "Decode METAR and TAF reports from aviation weather CSV feeds")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// CSV feed files to decode
    #[arg(value_name = "CSV_FILES")]
    pub files: Vec<PathBuf>,

    /// Decode this report text directly (repeatable)
    #[arg(short, long = "report", value_name = "TEXT")]
    pub reports: Vec<String>,

    /// Column index holding the raw report text
    #[arg(long, value_name = "N")]
    pub column: Option<usize>,

    /// Header name expected at the report column
    #[arg(long, value_name = "NAME", conflicts_with = "no_column_name")]
    pub column_name: Option<String>,

    /// Do not check the report column's header name
    #[arg(long)]
    pub no_column_name: bool,

    /// Report family of the feed (auto reads the feed preamble)
    #[arg(long, value_enum, default_value_t = KindArg::Auto)]
    pub kind: KindArg,

    /// Append rendered reports to this text file
    #[arg(short, long, value_name = "PATH")]
    pub log: Option<PathBuf>,

    /// Configuration file (TOML)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Explain decoded fields next to each description
    #[arg(long)]
    pub detailed: bool,

    /// Print only the summary of reports that failed to decode
    #[arg(long)]
    pub skip_failed: bool,

    /// Number of reports decoded concurrently
    #[arg(short, long, value_name = "N")]
    pub workers: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum KindArg {
    Auto,
    Metar,
    Taf,
}

impl Args {
    /// Log level implied by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    /// Feed kind forced on the command line
    pub fn feed_kind(&self) -> Option<FeedKind> {
        match self.kind {
            KindArg::Auto => None,
            KindArg::Metar => Some(FeedKind::Metar),
            KindArg::Taf => Some(FeedKind::Taf),
        }
    }

    /// Override configuration values with the flags that were given
    pub fn apply_to(&self, config: &mut MetafConfig) {
        if let Some(column) = self.column {
            config.raw_text_column = column;
        }
        if self.no_column_name {
            config.check_raw_text_header = false;
        } else if let Some(name) = &self.column_name {
            config.raw_text_header = name.clone();
            config.check_raw_text_header = true;
        }
        if let Some(path) = &self.log {
            config.log_path = Some(path.clone());
        }
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if self.detailed {
            config.detailed = true;
        }
        if self.skip_failed {
            config.render_failed_reports = false;
        }
    }
}

/// Initialise tracing; logs go to stderr so stdout carries only reports
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("metaf_decoder={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .context("Failed to initialise logging")?;

    Ok(())
}

/// Resolves once `signal` delivers an interrupt.
///
/// If the listener cannot be installed this never resolves, so the run goes
/// on without interrupt handling instead of failing.
pub async fn interrupt_requested<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        warn!("Failed to listen for CTRL+C, continuing without it: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Decode every input named on the command line
pub async fn run(args: Args) -> Result<ProcessingStats> {
    if args.files.is_empty() && args.reports.is_empty() {
        anyhow::bail!("Nothing to decode: pass CSV files or --report TEXT");
    }

    let start_time = Instant::now();

    let mut config = MetafConfig::load(args.config.as_deref())?;
    args.apply_to(&mut config);
    config.validate()?;
    debug!("Effective configuration: {:?}", config);

    let mut processor = ReportProcessor::from_config(&config);
    if let Some(kind) = args.feed_kind() {
        processor = processor.with_parser(FeedParser::from_config(&config).with_kind(kind));
    }

    let mut log = match &config.log_path {
        Some(path) => Some(
            ReportLog::open(path)
                .with_context(|| format!("Failed to open report log {}", path.display()))?,
        ),
        None => None,
    };

    let mut stats = ProcessingStats::default();

    for text in &args.reports {
        let outcome = processor.process_text(text);
        stats.reports_decoded += 1;
        if !outcome.result.is_success() {
            stats.reports_with_errors += 1;
        }
        emit(&outcome, log.as_mut())?;
    }

    for file in &args.files {
        match process_one_file(&processor, file, log.as_mut()).await {
            Ok(file_stats) => stats.merge(&file_stats),
            Err(e) => {
                stats.files_failed += 1;
                eprintln!("{} {}: {:#}", "Failed".red().bold(), file.display(), e);
            }
        }
    }

    if let Some(log) = log.as_mut() {
        log.flush()?;
        stats.log_path = Some(log.path().to_path_buf());
    }
    stats.processing_time_ms = start_time.elapsed().as_millis();

    if !args.quiet {
        print_summary(&stats);
    }

    if args.reports.is_empty() && stats.files_failed == args.files.len() {
        anyhow::bail!("All {} input files failed", stats.files_failed);
    }

    Ok(stats)
}

async fn process_one_file(
    processor: &ReportProcessor<GroupDecoder>,
    file: &std::path::Path,
    mut log: Option<&mut ReportLog>,
) -> Result<ProcessingStats> {
    let outcome = processor.process_file(file).await?;

    println!(
        "{} {} ({} reports)",
        "Feed".bright_cyan().bold(),
        file.display(),
        outcome.reports.len()
    );
    for report in &outcome.reports {
        emit(report, log.as_deref_mut())?;
    }

    Ok(outcome.stats)
}

/// Print one report block and append it to the log
fn emit(outcome: &ReportOutcome, log: Option<&mut ReportLog>) -> Result<()> {
    for (index, line) in outcome.lines.iter().enumerate() {
        match index {
            0 => println!("{}", line.bold()),
            1 if !outcome.result.is_success() => println!("{}", line.red()),
            1 => println!("{}", line.green()),
            2 | 3 => println!("{}", line.dimmed()),
            _ => println!("  {}", line),
        }
    }
    println!();

    if let Some(log) = log {
        log.append_block(&outcome.lines)?;
    }
    Ok(())
}

fn print_summary(stats: &ProcessingStats) {
    eprintln!("{}", "Decoding complete".bright_green().bold());
    eprintln!("   • Files processed: {}", stats.files_processed);
    if stats.files_failed > 0 {
        eprintln!("   • Files failed: {}", stats.files_failed.to_string().red());
    }
    eprintln!("   • Reports decoded: {}", stats.reports_decoded);
    eprintln!("   • Reports with errors: {}", stats.reports_with_errors);
    if stats.records_skipped > 0 {
        eprintln!("   • Records skipped: {}", stats.records_skipped.to_string().yellow());
    }
    if let Some(path) = &stats.log_path {
        eprintln!("   • Report log: {}", path.display());
    }
    eprintln!("   • Processing time: {} ms", stats.processing_time_ms);
}
