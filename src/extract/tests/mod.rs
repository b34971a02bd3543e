//! Shared fixtures for feed extraction tests

use std::io::Write;
use tempfile::NamedTempFile;

mod parser_tests;

/// METAR feed as served by the data service
pub fn create_metar_feed() -> String {
    r#"No errors
No warnings
5 ms
data source=metars
3 results
raw_text,station_id,observation_time,latitude,longitude,temp_c
UKOO 161200Z 24005MPS 9999 FEW020 19/14 Q1013 NOSIG,UKOO,2021-05-16T12:00:00Z,46.43,30.68,19.0
KJFK 161151Z 18010KT 10SM FEW250 22/12 A3001 RMK AO2 SLP162 T02220122,KJFK,2021-05-16T11:51:00Z,40.64,-73.76,22.2
"EGLL 161150Z AUTO 25012KT 9999 NCD 14/08 Q1016, DUPLICATE",EGLL,2021-05-16T11:50:00Z,51.48,-0.45,14.0"#
        .to_string()
}

/// TAF feed whose reports start with the location
pub fn create_taf_feed() -> String {
    r#"No errors
No warnings
7 ms
data source=tafs
2 results
raw_text,station_id,issue_time
UKOO 161100Z 1612/1712 24005MPS 9999 SCT030,UKOO,2021-05-16T11:00:00Z
TAF AMD EGLL 161300Z 1613/1718 25012KT CAVOK,EGLL,2021-05-16T13:00:00Z"#
        .to_string()
}

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "{}", content).unwrap();
    temp_file
}
