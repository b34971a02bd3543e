//! Report processing pipeline.
//!
//! Feed file → extracted report text → decoded elements → rendered lines.
//! Reports are independent of each other, so decoding fans out over blocking
//! worker tasks; the returned outcomes keep feed order regardless of which
//! task finishes first.

use crate::config::MetafConfig;
use crate::decoder::{GroupDecoder, ReportDecoder};
use crate::describe::{RenderOptions, report_block};
use crate::error::{MetafError, Result};
use crate::extract::{ExtractedReport, FeedParser, FeedPreamble};
use crate::models::{DecodeResult, ProcessingStats};

use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::task;
use tracing::{debug, info};

/// One decoded and rendered report
#[derive(Debug, Clone)]
pub struct ReportOutcome {
    /// Source line in the feed, `None` for text given directly
    pub line_number: Option<usize>,
    pub text: String,
    pub result: DecodeResult,
    /// Rendered report block
    pub lines: Vec<String>,
}

/// Everything produced from one feed file
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub preamble: FeedPreamble,
    pub reports: Vec<ReportOutcome>,
    pub stats: ProcessingStats,
}

/// Decodes and renders reports with a shared decoder
pub struct ReportProcessor<D: ReportDecoder> {
    decoder: Arc<D>,
    parser: FeedParser,
    options: RenderOptions,
    workers: usize,
}

impl ReportProcessor<GroupDecoder> {
    /// Processor with the built-in decoder, set up from configuration
    pub fn from_config(config: &MetafConfig) -> Self {
        let decoder = GroupDecoder::new().with_max_groups(config.max_groups);
        let options = RenderOptions {
            render_failed_reports: config.render_failed_reports,
            detailed: config.detailed,
        };
        Self::new(decoder, FeedParser::from_config(config), options, config.workers)
    }
}

impl<D: ReportDecoder + 'static> ReportProcessor<D> {
    pub fn new(decoder: D, parser: FeedParser, options: RenderOptions, workers: usize) -> Self {
        Self {
            decoder: Arc::new(decoder),
            parser,
            options,
            workers: workers.max(1),
        }
    }

    /// Replace the feed parser, e.g. to force a feed kind
    pub fn with_parser(mut self, parser: FeedParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Decode and render one report on the current thread
    pub fn process_text(&self, text: &str) -> ReportOutcome {
        render_report(self.decoder.as_ref(), &self.options, text.to_string(), None)
    }

    /// Decode and render reports concurrently, returning them in input order
    pub async fn process_reports(&self, reports: Vec<ExtractedReport>) -> Result<Vec<ReportOutcome>> {
        let outcomes = stream::iter(reports)
            .map(|report| {
                let decoder = Arc::clone(&self.decoder);
                let options = self.options;
                async move {
                    task::spawn_blocking(move || {
                        render_report(
                            decoder.as_ref(),
                            &options,
                            report.text,
                            Some(report.line_number),
                        )
                    })
                    .await
                    .map_err(|e| MetafError::Interrupted {
                        reason: format!("decode task failed: {}", e),
                    })
                }
            })
            .buffered(self.workers)
            .collect::<Vec<_>>()
            .await;

        outcomes.into_iter().collect()
    }

    /// Extract, decode and render every report in one feed file
    pub async fn process_file(&self, file_path: &Path) -> Result<FileOutcome> {
        let start_time = Instant::now();

        let parser = self.parser.clone();
        let path = file_path.to_path_buf();
        let extracted = task::spawn_blocking(move || parser.parse_file(&path))
            .await
            .map_err(|e| MetafError::Interrupted {
                reason: format!("extraction task failed: {}", e),
            })??;

        let reports = self.process_reports(extracted.reports).await?;

        let reports_with_errors = reports.iter().filter(|r| !r.result.is_success()).count();
        let stats = ProcessingStats {
            files_processed: 1,
            files_failed: 0,
            records_skipped: extracted.stats.records_skipped,
            reports_decoded: reports.len(),
            reports_with_errors,
            log_path: None,
            processing_time_ms: start_time.elapsed().as_millis(),
        };

        info!(
            "Decoded {} reports from {} ({} with errors, {} records skipped)",
            stats.reports_decoded,
            file_path.display(),
            stats.reports_with_errors,
            stats.records_skipped
        );

        Ok(FileOutcome {
            path: file_path.to_path_buf(),
            preamble: extracted.preamble,
            reports,
            stats,
        })
    }
}

fn render_report<D: ReportDecoder + ?Sized>(
    decoder: &D,
    options: &RenderOptions,
    text: String,
    line_number: Option<usize>,
) -> ReportOutcome {
    let result = decoder.decode(&text);
    debug!(
        "Decoded '{}': {} ({}, {} elements)",
        text,
        result.metadata.error,
        result.metadata.report_type,
        result.elements.len()
    );
    let lines = report_block(&text, &result, options);

    ReportOutcome {
        line_number,
        text,
        result,
        lines,
    }
}
