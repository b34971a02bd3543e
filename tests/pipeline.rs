//! End-to-end tests: feed file → extraction → decoding → rendered text log

use metaf_decoder::describe::{RenderOptions, report_block};
use metaf_decoder::extract::{FeedKind, FeedParser};
use metaf_decoder::output::ReportLog;
use metaf_decoder::{
    DecodeError, GroupDecoder, MetafConfig, MetafError, ReportDecoder, ReportProcessor, ReportType,
};
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use tempfile::TempDir;

const METAR_FEED: &str = "No errors
No warnings
4 ms
data source=metars
3 results
raw_text,station_id,observation_time,latitude,longitude
UKOO 161200Z 24005MPS 9999 FEW020 19/14 Q1013 NOSIG,UKOO,2021-05-16T12:00:00Z,46.43,30.68
\"KJFK 161151Z 18010KT 10SM FEW250 22/12 A3001 RMK AO2 SLP162\",KJFK,2021-05-16T11:51:00Z,40.64,-73.76
\"EGLL 161150Z 25012KT,EGLL
";

const TAF_FEED: &str = "No errors
No warnings
6 ms
data source=tafs
1 results
raw_text,station_id,issue_time
UKOO 161100Z 1612/1712 24005MPS 9999 SCT030 BECMG 1618/1620 BKN015,UKOO,2021-05-16T11:00:00Z
";

fn write_feed(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn processor() -> ReportProcessor<GroupDecoder> {
    ReportProcessor::from_config(&MetafConfig {
        workers: 2,
        ..Default::default()
    })
}

#[test]
fn test_reference_observation() {
    let result = GroupDecoder::new().decode("UKOO 161200Z 24005MPS 9999 FEW020 19/14 Q1013 NOSIG");

    assert_eq!(result.metadata.report_type, ReportType::CurrentObservation);
    assert_eq!(result.metadata.error, DecodeError::None);

    let lines = metaf_decoder::render(&result);
    assert_eq!(lines[0], "ICAO location: UKOO");
    assert_eq!(lines[1], "Report Release Time: 161200Z");
}

#[test]
fn test_empty_report() {
    let result = GroupDecoder::new().decode("");
    assert_eq!(result.metadata.error, DecodeError::EmptyInput);
    assert!(result.elements.is_empty());
    assert!(metaf_decoder::render(&result).is_empty());
}

#[tokio::test]
async fn test_metar_feed_end_to_end() {
    let dir = TempDir::new().unwrap();
    let path = write_feed(&dir, "metars.csv", METAR_FEED);

    let outcome = processor().process_file(&path).await.unwrap();

    assert_eq!(outcome.preamble.kind(), FeedKind::Metar);
    assert_eq!(outcome.stats.records_skipped, 1);
    assert_eq!(outcome.reports.len(), 2);
    assert_eq!(outcome.reports[0].line_number, 7);
    assert_eq!(outcome.reports[1].line_number, 8);

    let ukoo = &outcome.reports[0];
    assert_eq!(ukoo.result.metadata.error, DecodeError::None);
    assert_eq!(
        &ukoo.lines[..6],
        &[
            "Parsing report: METAR UKOO 161200Z 24005MPS 9999 FEW020 19/14 Q1013 NOSIG".to_string(),
            "Parse error: no error, parsed successfully".to_string(),
            "Detected report type: METAR".to_string(),
            format!("{} groups parsed", ukoo.result.elements.len()),
            "Keyword: METAR".to_string(),
            "ICAO location: UKOO".to_string(),
        ]
    );

    let kjfk = &outcome.reports[1];
    assert_eq!(kjfk.result.metadata.report_type, ReportType::CurrentObservation);
    assert!(kjfk.lines.iter().any(|l| l == "Keyword: RMK"));
}

#[tokio::test]
async fn test_taf_feed_end_to_end() {
    let dir = TempDir::new().unwrap();
    let path = write_feed(&dir, "tafs.csv", TAF_FEED);

    let outcome = processor().process_file(&path).await.unwrap();

    assert_eq!(outcome.reports.len(), 1);
    let taf = &outcome.reports[0];
    assert_eq!(taf.result.metadata.report_type, ReportType::Forecast);
    assert_eq!(taf.result.metadata.error, DecodeError::None);
    assert!(taf.lines.iter().any(|l| l == "Trend Header: BECMG"));
    assert!(taf.lines.iter().any(|l| l == "Trend Header: 1618/1620"));
}

#[tokio::test]
async fn test_configured_column_must_match_header() {
    let dir = TempDir::new().unwrap();
    let path = write_feed(&dir, "metars.csv", METAR_FEED);

    let processor = processor().with_parser(FeedParser::new(1, Some("raw_text".to_string())));
    let err = processor.process_file(&path).await.unwrap_err();
    assert!(matches!(err, MetafError::ColumnMismatch { index: 1, .. }));
}

#[tokio::test]
async fn test_rendered_reports_are_logged() {
    let dir = TempDir::new().unwrap();
    let feed = write_feed(&dir, "metars.csv", METAR_FEED);
    let log_path = dir.path().join("metaf.txt");

    let outcome = processor().process_file(&feed).await.unwrap();
    let mut log = ReportLog::open(&log_path).unwrap();
    for report in &outcome.reports {
        log.append_block(&report.lines).unwrap();
    }
    log.flush().unwrap();

    let content = std::fs::read_to_string(&log_path).unwrap();
    assert_eq!(content.matches("Parsing report: ").count(), 2);
    assert!(content.contains("ICAO location: KJFK"));
}

#[test]
fn test_failed_reports_can_be_summarised_only() {
    let text = "METAR UKOO";
    let result = GroupDecoder::new().decode(text);
    assert!(!result.is_success());

    let options = RenderOptions {
        render_failed_reports: false,
        detailed: false,
    };
    let lines = report_block(text, &result, &options);
    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines[1],
        format!("Parse error: {}", result.metadata.error.message())
    );
}
