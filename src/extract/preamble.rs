//! Feed preamble parsing
//!
//! The data service prefixes its CSV table with status lines:
//!
//! ```text
//! No errors
//! No warnings
//! 5 ms
//! data source=metars
//! 3 results
//! ```
//!
//! When something went wrong the first two lines become `Errors:` and
//! `Warnings:` blocks with one message per line. Anything unexpected is kept
//! as a warning instead of failing the feed.

use crate::constants::{NO_ERRORS_LINE, NO_WARNINGS_LINE};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static ELAPSED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)\s*ms$").unwrap());
static DATA_SOURCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^data source\s*=\s*(\S+)$").unwrap());
static RESULTS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)\s+results?$").unwrap());

/// Which report family a feed carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FeedKind {
    Metar,
    Taf,
    #[default]
    Unknown,
}

impl FeedKind {
    /// Kind named by a `data source=` preamble line
    pub fn from_data_source(source: &str) -> Self {
        match source.trim().to_ascii_lowercase().as_str() {
            "metars" | "metar" => FeedKind::Metar,
            "tafs" | "taf" => FeedKind::Taf,
            _ => FeedKind::Unknown,
        }
    }

    /// Report keyword that starts reports of this kind
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            FeedKind::Metar => Some(crate::constants::keywords::METAR),
            FeedKind::Taf => Some(crate::constants::keywords::TAF),
            FeedKind::Unknown => None,
        }
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedKind::Metar => write!(f, "METAR"),
            FeedKind::Taf => write!(f, "TAF"),
            FeedKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// Metadata carried by the lines preceding the CSV header row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedPreamble {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub elapsed_ms: Option<u64>,
    pub data_source: Option<String>,
    pub result_count: Option<usize>,
}

#[derive(Clone, Copy, PartialEq)]
enum Block {
    None,
    Errors,
    Warnings,
}

impl FeedPreamble {
    /// Parse the preamble lines; never fails
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut preamble = FeedPreamble::default();
        let mut block = Block::None;

        for line in lines {
            let line = line.as_ref().trim();
            if line.is_empty() || line == NO_ERRORS_LINE || line == NO_WARNINGS_LINE {
                block = Block::None;
                continue;
            }

            let lower = line.to_ascii_lowercase();
            if lower.starts_with("errors") {
                block = Block::Errors;
                continue;
            }
            if lower.starts_with("warnings") {
                block = Block::Warnings;
                continue;
            }

            if let Some(caps) = ELAPSED.captures(line) {
                preamble.elapsed_ms = caps[1].parse().ok();
                block = Block::None;
            } else if let Some(caps) = DATA_SOURCE.captures(line) {
                preamble.data_source = Some(caps[1].to_string());
                block = Block::None;
            } else if let Some(caps) = RESULTS.captures(line) {
                preamble.result_count = caps[1].parse().ok();
                block = Block::None;
            } else if block == Block::Errors {
                preamble.errors.push(line.to_string());
            } else {
                preamble.warnings.push(line.to_string());
            }
        }

        preamble
    }

    /// Feed kind from the `data source=` line
    pub fn kind(&self) -> FeedKind {
        self.data_source
            .as_deref()
            .map_or(FeedKind::Unknown, FeedKind::from_data_source)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
