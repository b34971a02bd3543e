//! Tests for the feed parser

use super::*;
use crate::MetafError;
use crate::config::MetafConfig;
use crate::extract::{FeedKind, FeedParser};

#[test]
fn test_parse_metar_feed() {
    let parser = FeedParser::default();
    let result = parser.parse_str(&create_metar_feed()).unwrap();

    assert_eq!(result.preamble.kind(), FeedKind::Metar);
    assert_eq!(result.stats.total_records, 3);
    assert_eq!(result.stats.reports_extracted, 3);
    assert_eq!(result.stats.records_skipped, 0);

    assert_eq!(result.reports[0].line_number, 7);
    assert_eq!(
        result.reports[0].text,
        "UKOO 161200Z 24005MPS 9999 FEW020 19/14 Q1013 NOSIG"
    );
    assert_eq!(
        result.reports[2].text,
        "EGLL 161150Z AUTO 25012KT 9999 NCD 14/08 Q1016, DUPLICATE"
    );
}

#[test]
fn test_keyword_prefix_follows_feed_kind() {
    let parser = FeedParser::default().with_keyword_prefix(true);

    let metars = parser.parse_str(&create_metar_feed()).unwrap();
    assert!(metars.reports[0].text.starts_with("METAR UKOO "));

    let tafs = parser.parse_str(&create_taf_feed()).unwrap();
    assert_eq!(tafs.reports[0].text, "TAF UKOO 161100Z 1612/1712 24005MPS 9999 SCT030");
    // Already carries its keyword
    assert_eq!(tafs.reports[1].text, "TAF AMD EGLL 161300Z 1613/1718 25012KT CAVOK");
}

#[test]
fn test_kind_override_wins_over_preamble() {
    let parser = FeedParser::default()
        .with_keyword_prefix(true)
        .with_kind(FeedKind::Unknown);
    let result = parser.parse_str(&create_metar_feed()).unwrap();
    assert!(result.reports[0].text.starts_with("UKOO "));
}

#[test]
fn test_malformed_records_are_skipped() {
    let content = r#"raw_text,station_id
UKOO 161200Z 24005MPS,UKOO
"broken 161200Z,UKOO

,
KJFK 161151Z 18010KT,KJFK"#;
    let result = FeedParser::default().parse_str(content).unwrap();

    assert_eq!(result.stats.total_records, 4);
    assert_eq!(result.stats.records_skipped, 1);
    assert_eq!(result.stats.empty_reports, 1);
    assert_eq!(result.stats.reports_extracted, 2);
    assert_eq!(result.stats.errors.len(), 1);
    assert!(result.stats.errors[0].starts_with("Line 3:"));
    assert_eq!(result.reports[1].line_number, 6);
}

#[test]
fn test_wrong_column_is_rejected() {
    let parser = FeedParser::new(1, Some("raw_text".to_string()));
    let err = parser.parse_str(&create_metar_feed()).unwrap_err();
    assert!(matches!(
        err,
        MetafError::ColumnMismatch {
            index: 1,
            located_at: Some(0),
            ..
        }
    ));
}

#[test]
fn test_missing_header_row() {
    let err = FeedParser::default()
        .parse_str("No errors\nNo warnings\n0 results\n")
        .unwrap_err();
    assert!(matches!(err, MetafError::MissingHeaderRow { .. }));
}

#[test]
fn test_header_detection_without_name() {
    let parser = FeedParser::new(1, None);
    let result = parser.parse_str(&create_taf_feed()).unwrap();
    assert_eq!(result.preamble.result_count, Some(2));
    assert_eq!(result.reports[0].text, "UKOO");
}

#[test]
fn test_parse_file_and_config() {
    let temp_file = create_temp_file(&create_taf_feed());
    let parser = FeedParser::from_config(&MetafConfig::default());
    let result = parser.parse_file(temp_file.path()).unwrap();

    assert_eq!(result.stats.reports_extracted, 2);
    assert_eq!(result.stats.records_skipped, 0);
    assert!(result.reports[0].text.starts_with("TAF "));
}

#[test]
fn test_parse_missing_file() {
    let err = FeedParser::default()
        .parse_file(std::path::Path::new("/nonexistent/metars.csv"))
        .unwrap_err();
    assert!(matches!(err, MetafError::FileNotFound { .. }));
}
