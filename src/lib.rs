//! METAR/TAF Decoder Library
//!
//! Decodes aviation weather reports (METAR observations and TAF forecasts)
//! delivered as CSV feeds and renders every decoded element as a line of
//! human-readable text.
//!
//! This library provides tools for:
//! - Extracting the raw report column from data service CSV feeds
//! - Decoding report text into typed elements with a classified outcome
//! - Describing each element through an exhaustive dispatcher
//! - Running the whole pipeline concurrently over many reports
//!
//! ```rust
//! use metaf_decoder::{GroupDecoder, ReportDecoder, describe};
//!
//! let result = GroupDecoder::new().decode("UKOO 161200Z 24005MPS 9999 FEW020 19/14 Q1013 NOSIG");
//! let lines = describe::render(&result);
//! assert_eq!(lines[0], "ICAO location: UKOO");
//! assert_eq!(lines[1], "Report Release Time: 161200Z");
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod decoder;
pub mod describe;
pub mod element;
pub mod error;
pub mod extract;
pub mod models;
pub mod output;
pub mod processor;

// Re-export commonly used types
pub use config::MetafConfig;
pub use decoder::{GroupDecoder, ReportDecoder};
pub use describe::{describe, render};
pub use element::{Element, ElementKind};
pub use error::{MetafError, Result};
pub use models::{DecodeError, DecodeResult, ReportMetadata, ReportSection, ReportType};
pub use processor::ReportProcessor;
