//! Report decoding.
//!
//! [`ReportDecoder`] is the boundary the rest of the crate depends on: raw
//! report text in, [`DecodeResult`] out. Decoding never fails; problems are
//! reported through [`DecodeError`] in the result metadata, alongside
//! whatever elements were decoded before the problem was found.
//!
//! [`GroupDecoder`] is the built-in implementation. It splits the report into
//! whitespace-separated groups, walks the header (report type, location,
//! issue time, validity) and then classifies every remaining group against
//! the body or remarks grammar. Groups it cannot classify are kept as
//! [`ElementKind::Unrecognized`].

use crate::constants::{DEFAULT_MAX_GROUPS, keywords};
use crate::element::*;
use crate::models::{DecodeError, DecodeResult, ReportMetadata, ReportSection, ReportType};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

/// Turns raw report text into typed elements.
///
/// Implementations must be total (any input yields a result) and
/// deterministic (the same text always yields the same result).
pub trait ReportDecoder: Send + Sync {
    fn decode(&self, text: &str) -> DecodeResult;
}

impl<D: ReportDecoder + ?Sized> ReportDecoder for std::sync::Arc<D> {
    fn decode(&self, text: &str) -> DecodeResult {
        (**self).decode(text)
    }
}

// Pre-compiled group patterns
static LOCATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][A-Z0-9]{3}$").unwrap());
static REPORT_TIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2})(\d{2})(\d{2})Z$").unwrap());
static TIME_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2})(\d{2})/(\d{2})(\d{2})$").unwrap());
static TREND_FROM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^FM(\d{2})(\d{2})(\d{2})$").unwrap());
static TREND_UNTIL_AT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(TL|AT)(\d{2})?(\d{2})(\d{2})$").unwrap());
static TREND_PROB: Lazy<Regex> = Lazy::new(|| Regex::new(r"^PROB(\d{2})$").unwrap());

static WIND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{3}|VRB|///)(\d{2,3}|//)(?:G(\d{2,3}))?(KT|MPS|KMH)$").unwrap()
});
static WIND_SECTOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{3})V(\d{3})$").unwrap());
static WIND_SHEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^WS(\d{3})/(\d{3})(\d{2,3})(KT|MPS|KMH)$").unwrap());

static VIS_METERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})(NDV|NE|NW|SE|SW|N|E|S|W)?$").unwrap());
static VIS_MILES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([PM])?(?:(\d{1,2})|(\d)/(\d{1,2}))SM$").unwrap());
static VIS_WHOLE_MILES: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d$").unwrap());
static RVR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^R(\d{2}[LCR]?)/([PM])?(\d{4})(?:V([PM])?(\d{4}))?(FT)?(?:/?[UDN])?$").unwrap()
});
static RUNWAY_STATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^R(\d{2}[LCR]?)/(?:(CLRD)|([\d/])([\d/])([\d/]{2}))([\d/]{2})$").unwrap()
});
static RUNWAY_CLOSED_SNOW: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:R/)?SNOCLO$").unwrap());

static CLOUD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(FEW|SCT|BKN|OVC|VV)(\d{3}|///)(CB|TCU|///)?$").unwrap());
static WEATHER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(\+|-|VC|RE)?(MI|PR|BC|DR|BL|SH|TS|FZ)?((?:DZ|RA|SN|SG|IC|PL|GR|GS|UP|BR|FG|FU|VA|DU|SA|HZ|PY|PO|SQ|FC|SS|DS)*)$",
    )
    .unwrap()
});
static TEMPERATURE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(M?\d{2}|//)/(M?\d{2}|//)?$").unwrap());
static PRESSURE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([QA])(\d{4})$").unwrap());
static PRESSURE_FORECAST: Lazy<Regex> = Lazy::new(|| Regex::new(r"^QNH(\d{4})INS$").unwrap());
static SEA_SURFACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^W(M?\d{2}|//)/(?:S(\d|/)|H(\d{1,3}|///))$").unwrap());
static FORECAST_MIN_MAX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^T([XN])(M?\d{2})/(\d{2})(\d{2})Z$").unwrap());
static LAYER_FORECAST: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([56])(\d)(\d{3})(\d)$").unwrap());

// Remarks-only patterns
static SEA_LEVEL_PRESSURE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^SLP(\d{3})$").unwrap());
static PRECISE_TEMPERATURE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^T([01])(\d{3})(?:([01])(\d{3}))?$").unwrap());
static SIX_HOUR_MIN_MAX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([12])([01])(\d{3})$").unwrap());
static DAILY_MIN_MAX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^4([01])(\d{3})([01])(\d{3})$").unwrap());
static HOURLY_PRECIPITATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^P(\d{4})$").unwrap());
static PERIOD_PRECIPITATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([67])(\d{4}|////)$").unwrap());
static SNOW_DEPTH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^4/(\d{3})$").unwrap());
static PRESSURE_TENDENCY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^5([0-8])(\d{3})$").unwrap());
static CLOUD_TYPES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?:TCU|ACC|CB|CU|CF|SC|NS|ST|SF|AS|AC|CI|CS|CC)\d)+$").unwrap()
});
static CLOUD_TYPE_LAYER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(TCU|ACC|CB|CU|CF|SC|NS|ST|SF|AS|AC|CI|CS|CC)(\d)").unwrap()
});
static LOW_MID_HIGH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^8/([\d/])([\d/])([\d/])$").unwrap());
static LIGHTNING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^LTG((?:IC|CC|CG|CA)*)$").unwrap());
static VICINITY_PHENOMENON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(CB|TCU|CBMAM|ACC|ACSL|VIRGA|TS|SH|FG|BR)$").unwrap());
static DIRECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[NESW]{1,3}(?:-[NESW]{1,3})*$").unwrap());
static COLOUR_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(BLACK)?(BLU\+?|WHT|GRN|YLO1|YLO2|YLO|AMB|RED)$").unwrap());
static SUNSHINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^98(\d{3})$").unwrap());
static ICE_ACCRETION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^I([136])(\d{3})$").unwrap());

/// Built-in group-classifying decoder
#[derive(Debug, Clone)]
pub struct GroupDecoder {
    max_groups: usize,
}

impl GroupDecoder {
    pub fn new() -> Self {
        Self {
            max_groups: DEFAULT_MAX_GROUPS,
        }
    }

    /// Reject reports with more than `max_groups` groups
    pub fn with_max_groups(mut self, max_groups: usize) -> Self {
        self.max_groups = max_groups;
        self
    }
}

impl Default for GroupDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportDecoder for GroupDecoder {
    fn decode(&self, text: &str) -> DecodeResult {
        let groups: Vec<&str> = text
            .split_whitespace()
            .map(|group| group.trim_end_matches('='))
            .filter(|group| !group.is_empty())
            .collect();

        if groups.is_empty() {
            return DecodeResult::failed(ReportType::Unknown, DecodeError::EmptyInput);
        }
        if groups.len() > self.max_groups {
            debug!(
                "Rejecting report with {} groups (limit {})",
                groups.len(),
                self.max_groups
            );
            return DecodeResult::failed(ReportType::Unknown, DecodeError::TooManyGroups);
        }

        let mut decoding = Decoding::new(text, &groups);
        let error = match decoding.run() {
            Ok(()) => DecodeError::None,
            Err(error) => error,
        };
        debug!(
            "Decoded {} elements, type {:?}, outcome {:?}",
            decoding.elements.len(),
            decoding.report_type,
            error
        );

        DecodeResult::new(
            ReportMetadata {
                report_type: decoding.report_type,
                error,
            },
            decoding.elements,
        )
    }
}

/// Whether decoding continues past the header
enum HeaderEnd {
    Body,
    Finished,
}

/// Per-call decoding state
struct Decoding<'a> {
    /// Report text the groups were split from
    text: &'a str,
    groups: &'a [&'a str],
    pos: usize,
    report_type: ReportType,
    elements: Vec<Element>,
}

impl<'a> Decoding<'a> {
    fn new(text: &'a str, groups: &'a [&'a str]) -> Self {
        Self {
            text,
            groups,
            pos: 0,
            report_type: ReportType::Unknown,
            elements: Vec::with_capacity(groups.len()),
        }
    }

    fn peek(&self) -> Option<&'a str> {
        self.groups.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<&'a str> {
        self.groups.get(self.pos + offset).copied()
    }

    /// Source text covering `count` groups from the current position,
    /// with the original spacing between them
    fn source_span(&self, count: usize) -> &'a str {
        let base = self.text.as_ptr() as usize;
        let first = self.groups[self.pos];
        let last = self.groups[self.pos + count - 1];
        let start = first.as_ptr() as usize - base;
        let end = last.as_ptr() as usize - base + last.len();
        &self.text[start..end]
    }

    fn push(&mut self, kind: ElementKind, section: ReportSection, raw: impl Into<String>) {
        self.elements.push(Element::new(kind, section, raw));
    }

    fn push_keyword(&mut self, keyword: Keyword, section: ReportSection, raw: &str) {
        self.push(ElementKind::Keyword(keyword), section, raw);
    }

    fn run(&mut self) -> Result<(), DecodeError> {
        match self.header()? {
            HeaderEnd::Finished => Ok(()),
            HeaderEnd::Body => self.body(),
        }
    }

    fn header(&mut self) -> Result<HeaderEnd, DecodeError> {
        use ReportSection::Header;

        let mut type_keyword = false;
        if let Some(group) = self.peek() {
            let report_type = match group {
                keywords::METAR | keywords::SPECI => Some(ReportType::CurrentObservation),
                keywords::TAF => Some(ReportType::Forecast),
                _ => None,
            };
            if let Some(report_type) = report_type {
                self.report_type = report_type;
                if let Some(keyword) = Keyword::from_token(group) {
                    self.push_keyword(keyword, Header, group);
                }
                self.pos += 1;
                type_keyword = true;
            }
        }

        // Modifiers between report type and location
        while let Some(group) = self.peek() {
            match group {
                keywords::AMENDED => {
                    if self.report_type == ReportType::CurrentObservation {
                        return Err(DecodeError::AmendmentMarkerNotAllowedOutsideForecast);
                    }
                    self.report_type = ReportType::Forecast;
                    self.push_keyword(Keyword::Amended, Header, group);
                    type_keyword = true;
                }
                keywords::CORRECTED => self.push_keyword(Keyword::Corrected, Header, group),
                _ => break,
            }
            self.pos += 1;
        }

        let location = self.peek().ok_or(DecodeError::UnexpectedEnd)?;
        if !LOCATION.is_match(location) || Keyword::from_token(location).is_some() {
            return Err(if type_keyword {
                DecodeError::ExpectedLocation
            } else {
                DecodeError::ExpectedReportTypeOrLocation
            });
        }
        self.push(
            ElementKind::Location(Location {
                icao: location.to_string(),
            }),
            Header,
            location,
        );
        self.pos += 1;

        let group = self.peek().ok_or(DecodeError::UnexpectedEnd)?;
        if group == keywords::NIL {
            return self.nil();
        }
        let mut has_time = false;
        if let Some(time) = parse_report_time(group) {
            self.push(ElementKind::ReportTimestamp(time), Header, group);
            self.pos += 1;
            has_time = true;
        } else if self.report_type != ReportType::Forecast {
            return Err(DecodeError::ExpectedReportTime);
        }

        let group = self.peek().ok_or(DecodeError::UnexpectedEnd)?;
        if group == keywords::NIL {
            return self.nil();
        }

        match self.report_type {
            ReportType::Forecast => {
                let span = parse_time_span(group).ok_or(DecodeError::ExpectedTimeSpan)?;
                self.push(ElementKind::TrendHeader(span), Header, group);
                self.pos += 1;
            }
            ReportType::Unknown => {
                if let Some(span) = parse_time_span(group).filter(|_| has_time) {
                    self.report_type = ReportType::Forecast;
                    self.push(ElementKind::TrendHeader(span), Header, group);
                    self.pos += 1;
                } else {
                    self.report_type = ReportType::CurrentObservation;
                }
            }
            ReportType::CurrentObservation => {}
        }

        if self.peek() == Some(keywords::CANCELLED) {
            if self.report_type != ReportType::Forecast {
                return Err(DecodeError::CancellationMarkerNotAllowedOutsideForecast);
            }
            self.push_keyword(Keyword::Cancelled, Header, keywords::CANCELLED);
            self.pos += 1;
            if self.peek().is_some() {
                return Err(DecodeError::UnexpectedGroupAfterCancellation);
            }
            return Ok(HeaderEnd::Finished);
        }

        if self.peek().is_none() && self.report_type == ReportType::Forecast {
            return Err(DecodeError::UnexpectedEnd);
        }
        Ok(HeaderEnd::Body)
    }

    /// `NIL` ends the report; nothing may follow it
    fn nil(&mut self) -> Result<HeaderEnd, DecodeError> {
        self.push_keyword(Keyword::Nil, ReportSection::Header, keywords::NIL);
        self.pos += 1;
        if self.peek().is_some() {
            return Err(DecodeError::UnexpectedGroupAfterNil);
        }
        Ok(HeaderEnd::Finished)
    }

    fn body(&mut self) -> Result<(), DecodeError> {
        let mut section = ReportSection::Body;

        while let Some(group) = self.peek() {
            match group {
                keywords::REMARKS => {
                    section = ReportSection::Remarks;
                    self.push_keyword(Keyword::Remarks, section, group);
                    self.pos += 1;
                    continue;
                }
                keywords::NIL => return Err(DecodeError::UnexpectedCancellationMarkerInBody),
                keywords::CANCELLED => {
                    return Err(if self.report_type == ReportType::Forecast {
                        DecodeError::UnexpectedCancellationMarkerInBody
                    } else {
                        DecodeError::CancellationMarkerNotAllowedOutsideForecast
                    });
                }
                keywords::AMENDED if self.report_type != ReportType::Forecast => {
                    return Err(DecodeError::AmendmentMarkerNotAllowedOutsideForecast);
                }
                keywords::MAINTENANCE if self.report_type == ReportType::Forecast => {
                    return Err(DecodeError::MaintenanceIndicatorNotAllowedOutsideObservation);
                }
                _ => {}
            }

            if let Some(consumed) = self.combined(section) {
                self.pos += consumed;
                continue;
            }

            let kind = match section {
                ReportSection::Remarks => {
                    classify_remark(group).or_else(|| classify_body(group, self.report_type))
                }
                _ => classify_body(group, self.report_type),
            }
            .unwrap_or(ElementKind::Unrecognized);

            self.push(kind, section, group);
            self.pos += 1;
        }

        Ok(())
    }

    /// Elements spanning several groups. Returns the number of groups used.
    fn combined(&mut self, section: ReportSection) -> Option<usize> {
        let group = self.peek()?;

        // "1 1/2SM"
        if VIS_WHOLE_MILES.is_match(group) {
            let fraction = self.peek_at(1)?;
            let mut visibility = parse_visibility(fraction)?;
            let distance = visibility.distance.as_mut()?;
            if distance.unit != DistanceUnit::StatuteMiles || distance.value >= 1.0 {
                return None;
            }
            distance.value += group.parse::<f32>().ok()?;
            let raw = self.source_span(2);
            self.push(ElementKind::Visibility(visibility), section, raw);
            return Some(2);
        }

        if section != ReportSection::Remarks {
            return None;
        }

        // "OCNL LTGICCG DSNT NE-SE", "LTG OHD"
        let (frequency, lightning_group, start) = match group {
            "OCNL" | "FRQ" | "CONS" => (Some(group.to_string()), self.peek_at(1)?, 1),
            _ => (None, group, 0),
        };
        if let Some(caps) = LIGHTNING.captures(lightning_group) {
            let types = split_pairs(caps.get(1).map_or("", |m| m.as_str()));
            let mut lightning = Lightning {
                frequency,
                types,
                ..Default::default()
            };
            let mut used = start + 1;
            while let Some(next) = self.peek_at(used) {
                match next {
                    "DSNT" => lightning.distant = true,
                    "VC" | "VCNTY" | "OHD" | "ALQDS" | "ALQS" | "AND" => {
                        lightning.directions.push(next.to_string())
                    }
                    _ if DIRECTION.is_match(next) => lightning.directions.push(next.to_string()),
                    _ => break,
                }
                used += 1;
            }
            let raw = self.source_span(used);
            self.push(ElementKind::Lightning(lightning), section, raw);
            return Some(used);
        }

        // "CB DSNT N MOV E", "VIRGA SW"
        if VICINITY_PHENOMENON.is_match(group) {
            let mut vicinity = Vicinity {
                phenomenon: group.to_string(),
                ..Default::default()
            };
            let mut used = 1;
            while let Some(next) = self.peek_at(used) {
                match next {
                    "DSNT" => vicinity.distant = true,
                    "MOV" => {
                        let towards = self.peek_at(used + 1).filter(|d| DIRECTION.is_match(d));
                        match towards {
                            Some(direction) => {
                                vicinity.moving = Some(direction.to_string());
                                used += 1;
                            }
                            None => break,
                        }
                    }
                    "VC" | "VCNTY" | "OHD" | "ALQDS" | "ALQS" | "AND" => {
                        vicinity.directions.push(next.to_string())
                    }
                    _ if DIRECTION.is_match(next) => vicinity.directions.push(next.to_string()),
                    _ => break,
                }
                used += 1;
            }
            if used == 1 {
                return None;
            }
            let raw = self.source_span(used);
            self.push(ElementKind::Vicinity(vicinity), section, raw);
            return Some(used);
        }

        None
    }
}

/// Classify a group using the main-body grammar
fn classify_body(group: &str, report_type: ReportType) -> Option<ElementKind> {
    if let Some(keyword) = Keyword::from_token(group) {
        return Some(ElementKind::Keyword(keyword));
    }
    if let Some(trend) = parse_trend(group) {
        return Some(ElementKind::TrendHeader(trend));
    }
    if let Some(wind) = parse_wind(group) {
        return Some(ElementKind::Wind(wind));
    }
    if let Some(visibility) = parse_visibility(group).or_else(|| parse_rvr(group)) {
        return Some(ElementKind::Visibility(visibility));
    }
    if let Some(state) = parse_runway_state(group) {
        return Some(ElementKind::RunwayState(state));
    }
    if let Some(cloud) = parse_cloud(group) {
        return Some(ElementKind::Cloud(cloud));
    }
    if let Some(temperature) = parse_temperature(group) {
        return Some(ElementKind::Temperature(temperature));
    }
    if let Some(pressure) = parse_pressure(group) {
        return Some(ElementKind::Pressure(pressure));
    }
    if let Some(sea) = parse_sea_surface(group) {
        return Some(ElementKind::SeaSurface(sea));
    }
    if let Some(extreme) = parse_forecast_min_max(group) {
        return Some(ElementKind::MinMaxTemperature(extreme));
    }
    if report_type == ReportType::Forecast {
        if let Some(layer) = parse_layer_forecast(group) {
            return Some(ElementKind::LayerForecast(layer));
        }
    }
    parse_weather(group).map(ElementKind::WeatherPhenomenon)
}

/// Classify a group using the remarks grammar
fn classify_remark(group: &str) -> Option<ElementKind> {
    if let Some(caps) = SEA_LEVEL_PRESSURE.captures(group) {
        let tenths = capture_num::<u16>(&caps, 1)?;
        let base = if tenths >= 500 { 900.0 } else { 1000.0 };
        return Some(ElementKind::Pressure(Pressure {
            value: base + f32::from(tenths) / 10.0,
            unit: PressureUnit::Hectopascal,
            kind: PressureKind::SeaLevel,
        }));
    }
    if let Some(caps) = PRECISE_TEMPERATURE.captures(group) {
        return Some(ElementKind::Temperature(Temperature {
            air: signed_tenths(&caps, 1, 2),
            dew_point: signed_tenths(&caps, 3, 4),
        }));
    }
    if let Some(caps) = SIX_HOUR_MIN_MAX.captures(group) {
        let value = signed_tenths(&caps, 2, 3);
        let maximum = &caps[1] == "1";
        return Some(ElementKind::MinMaxTemperature(MinMaxTemperature {
            maximum: value.filter(|_| maximum),
            minimum: value.filter(|_| !maximum),
            at: None,
            period_hours: Some(6),
        }));
    }
    if let Some(caps) = DAILY_MIN_MAX.captures(group) {
        return Some(ElementKind::MinMaxTemperature(MinMaxTemperature {
            maximum: signed_tenths(&caps, 1, 2),
            minimum: signed_tenths(&caps, 3, 4),
            at: None,
            period_hours: Some(24),
        }));
    }
    if let Some(caps) = HOURLY_PRECIPITATION.captures(group) {
        return Some(ElementKind::Precipitation(Precipitation {
            kind: PrecipitationKind::LastHour,
            amount: capture_num::<u16>(&caps, 1).map(|v| f32::from(v) / 100.0),
        }));
    }
    if let Some(caps) = PERIOD_PRECIPITATION.captures(group) {
        let kind = if &caps[1] == "6" {
            PrecipitationKind::ThreeOrSixHours
        } else {
            PrecipitationKind::TwentyFourHours
        };
        return Some(ElementKind::Precipitation(Precipitation {
            kind,
            amount: capture_num::<u16>(&caps, 2).map(|v| f32::from(v) / 100.0),
        }));
    }
    if let Some(caps) = SNOW_DEPTH.captures(group) {
        return Some(ElementKind::Precipitation(Precipitation {
            kind: PrecipitationKind::SnowDepth,
            amount: capture_num::<u16>(&caps, 1).map(f32::from),
        }));
    }
    if let Some(caps) = PRESSURE_TENDENCY.captures(group) {
        return Some(ElementKind::PressureTendency(PressureTendency {
            code: capture_num(&caps, 1),
            change_hpa: capture_num::<u16>(&caps, 2).map(|v| f32::from(v) / 10.0),
            rapid: None,
        }));
    }
    if let Some(rapid) = match group {
        "PRESRR" => Some(RapidChange::Rising),
        "PRESFR" => Some(RapidChange::Falling),
        _ => None,
    } {
        return Some(ElementKind::PressureTendency(PressureTendency {
            rapid: Some(rapid),
            ..Default::default()
        }));
    }
    if CLOUD_TYPES.is_match(group) {
        let layers = CLOUD_TYPE_LAYER
            .captures_iter(group)
            .filter_map(|caps| Some((caps[1].to_string(), capture_num::<u8>(&caps, 2)?)))
            .collect();
        return Some(ElementKind::CloudTypes(CloudTypes { layers }));
    }
    if let Some(caps) = LOW_MID_HIGH.captures(group) {
        return Some(ElementKind::LowMidHighCloud(LowMidHighCloud {
            low: capture_num(&caps, 1),
            mid: capture_num(&caps, 2),
            high: capture_num(&caps, 3),
        }));
    }
    if let Some(caps) = LIGHTNING.captures(group) {
        return Some(ElementKind::Lightning(Lightning {
            types: split_pairs(caps.get(1).map_or("", |m| m.as_str())),
            ..Default::default()
        }));
    }
    parse_miscellaneous(group).map(ElementKind::Miscellaneous)
}

fn capture_num<T: std::str::FromStr>(caps: &Captures<'_>, index: usize) -> Option<T> {
    caps.get(index).and_then(|m| m.as_str().parse().ok())
}

/// Temperature with an `M` prefix for negative values; `//` is unreported
fn signed_whole(text: &str) -> Option<f32> {
    match text.strip_prefix('M') {
        Some(digits) => digits.parse::<f32>().ok().map(|v| -v),
        None => text.parse().ok(),
    }
}

/// Remarks temperature: sign digit (1 = negative) then tenths of a degree
fn signed_tenths(caps: &Captures<'_>, sign: usize, digits: usize) -> Option<f32> {
    let value = capture_num::<u16>(caps, digits)? as f32 / 10.0;
    let negative = caps.get(sign)?.as_str() == "1";
    Some(if negative { -value } else { value })
}

fn split_pairs(text: &str) -> Vec<String> {
    text.as_bytes()
        .chunks(2)
        .filter_map(|pair| std::str::from_utf8(pair).ok())
        .map(str::to_string)
        .collect()
}

fn speed_unit(text: &str) -> Option<SpeedUnit> {
    match text {
        "KT" => Some(SpeedUnit::Knots),
        "MPS" => Some(SpeedUnit::MetersPerSecond),
        "KMH" => Some(SpeedUnit::KilometersPerHour),
        _ => None,
    }
}

fn parse_report_time(group: &str) -> Option<ReportTime> {
    let caps = REPORT_TIME.captures(group)?;
    Some(ReportTime {
        day: capture_num(&caps, 1)?,
        hour: capture_num(&caps, 2)?,
        minute: capture_num(&caps, 3)?,
    })
}

fn parse_time_span(group: &str) -> Option<Trend> {
    let caps = TIME_SPAN.captures(group)?;
    Some(Trend {
        kind: TrendKind::TimeSpan,
        probability: None,
        from: Some(TrendTime {
            day: capture_num(&caps, 1),
            hour: capture_num(&caps, 2)?,
            minute: None,
        }),
        until: Some(TrendTime {
            day: capture_num(&caps, 3),
            hour: capture_num(&caps, 4)?,
            minute: None,
        }),
    })
}

fn parse_trend(group: &str) -> Option<Trend> {
    let simple = |kind| Trend {
        kind,
        probability: None,
        from: None,
        until: None,
    };
    match group {
        "BECMG" => return Some(simple(TrendKind::Becoming)),
        "TEMPO" => return Some(simple(TrendKind::Temporary)),
        "INTER" => return Some(simple(TrendKind::Intermittent)),
        _ => {}
    }
    if let Some(span) = parse_time_span(group) {
        return Some(span);
    }
    if let Some(caps) = TREND_FROM.captures(group) {
        return Some(Trend {
            from: Some(TrendTime {
                day: capture_num(&caps, 1),
                hour: capture_num(&caps, 2)?,
                minute: capture_num(&caps, 3),
            }),
            ..simple(TrendKind::From)
        });
    }
    if let Some(caps) = TREND_UNTIL_AT.captures(group) {
        let time = TrendTime {
            day: capture_num(&caps, 2),
            hour: capture_num(&caps, 3)?,
            minute: capture_num(&caps, 4),
        };
        return Some(if &caps[1] == "TL" {
            Trend {
                until: Some(time),
                ..simple(TrendKind::Until)
            }
        } else {
            Trend {
                from: Some(time),
                ..simple(TrendKind::At)
            }
        });
    }
    if let Some(caps) = TREND_PROB.captures(group) {
        return Some(Trend {
            probability: capture_num(&caps, 1),
            ..simple(TrendKind::Probability)
        });
    }
    None
}

fn parse_wind(group: &str) -> Option<Wind> {
    if let Some(caps) = WIND.captures(group) {
        let direction = &caps[1];
        return Some(Wind {
            direction: direction.parse().ok(),
            variable: direction == "VRB",
            speed: capture_num(&caps, 2),
            gust: capture_num(&caps, 3),
            unit: speed_unit(&caps[4]),
            ..Default::default()
        });
    }
    if let Some(caps) = WIND_SECTOR.captures(group) {
        return Some(Wind {
            variable_sector: Some((capture_num(&caps, 1)?, capture_num(&caps, 2)?)),
            ..Default::default()
        });
    }
    if let Some(caps) = WIND_SHEAR.captures(group) {
        return Some(Wind {
            shear_height_ft: capture_num::<u32>(&caps, 1).map(|h| h * 100),
            direction: capture_num(&caps, 2),
            speed: capture_num(&caps, 3),
            unit: speed_unit(&caps[4]),
            ..Default::default()
        });
    }
    None
}

fn parse_visibility(group: &str) -> Option<Visibility> {
    if let Some(caps) = VIS_METERS.captures(group) {
        let meters: u16 = capture_num(&caps, 1)?;
        let (value, bound) = if meters == 9999 {
            (10_000.0, Some(Bound::MoreThan))
        } else {
            (f32::from(meters), None)
        };
        return Some(Visibility {
            distance: Some(Distance {
                value,
                unit: DistanceUnit::Meters,
                bound,
            }),
            direction: caps.get(2).map(|m| m.as_str().to_string()),
            ..Default::default()
        });
    }
    if let Some(caps) = VIS_MILES.captures(group) {
        let value = match caps.get(2) {
            Some(whole) => whole.as_str().parse::<f32>().ok()?,
            None => {
                let numerator: f32 = capture_num(&caps, 3)?;
                let denominator: f32 = capture_num(&caps, 4)?;
                if denominator == 0.0 {
                    return None;
                }
                numerator / denominator
            }
        };
        return Some(Visibility {
            distance: Some(Distance {
                value,
                unit: DistanceUnit::StatuteMiles,
                bound: caps.get(1).and_then(|m| bound(m.as_str())),
            }),
            ..Default::default()
        });
    }
    None
}

fn bound(prefix: &str) -> Option<Bound> {
    match prefix {
        "P" => Some(Bound::MoreThan),
        "M" => Some(Bound::LessThan),
        _ => None,
    }
}

fn parse_rvr(group: &str) -> Option<Visibility> {
    let caps = RVR.captures(group)?;
    let unit = if caps.get(6).is_some() {
        DistanceUnit::Feet
    } else {
        DistanceUnit::Meters
    };
    let distance = |bound_index: usize, value_index: usize| -> Option<Distance> {
        Some(Distance {
            value: capture_num(&caps, value_index)?,
            unit,
            bound: caps.get(bound_index).and_then(|m| bound(m.as_str())),
        })
    };
    Some(Visibility {
        distance: distance(2, 3),
        max_distance: distance(4, 5),
        direction: None,
        runway: Some(caps[1].to_string()),
    })
}

fn parse_runway_state(group: &str) -> Option<RunwayState> {
    if RUNWAY_CLOSED_SNOW.is_match(group) {
        return Some(RunwayState {
            runway: "all".to_string(),
            cleared: false,
            deposits: None,
            extent: None,
            depth: None,
            friction: Some("closed due to snow".to_string()),
        });
    }
    let caps = RUNWAY_STATE.captures(group)?;
    Some(RunwayState {
        runway: caps[1].to_string(),
        cleared: caps.get(2).is_some(),
        deposits: capture_num(&caps, 3),
        extent: capture_num(&caps, 4),
        depth: caps.get(5).map(|m| m.as_str().to_string()),
        friction: caps.get(6).map(|m| m.as_str().to_string()),
    })
}

fn parse_cloud(group: &str) -> Option<Cloud> {
    let no_cloud = match group {
        "SKC" => Some(CloudAmount::SkyClear),
        "CLR" => Some(CloudAmount::Clear),
        "NSC" => Some(CloudAmount::NoSignificantCloud),
        "NCD" => Some(CloudAmount::NoCloudDetected),
        _ => None,
    };
    if let Some(amount) = no_cloud {
        return Some(Cloud {
            amount,
            height_ft: None,
            convective: None,
        });
    }

    let caps = CLOUD.captures(group)?;
    let amount = match &caps[1] {
        "FEW" => CloudAmount::Few,
        "SCT" => CloudAmount::Scattered,
        "BKN" => CloudAmount::Broken,
        "OVC" => CloudAmount::Overcast,
        _ => CloudAmount::VerticalVisibility,
    };
    let convective = match caps.get(3).map(|m| m.as_str()) {
        Some("CB") => Some(ConvectiveType::Cumulonimbus),
        Some("TCU") => Some(ConvectiveType::ToweringCumulus),
        _ => None,
    };
    Some(Cloud {
        amount,
        height_ft: capture_num::<u32>(&caps, 2).map(|h| h * 100),
        convective,
    })
}

fn parse_weather(group: &str) -> Option<Weather> {
    if group == "NSW" {
        return Some(Weather::default());
    }
    let caps = WEATHER.captures(group)?;
    let descriptor = caps.get(2).map(|m| m.as_str().to_string());
    let phenomena = split_pairs(caps.get(3).map_or("", |m| m.as_str()));
    if descriptor.is_none() && phenomena.is_empty() {
        return None;
    }
    let prefix = caps.get(1).map(|m| m.as_str());
    Some(Weather {
        intensity: match prefix {
            Some("-") => Some(Intensity::Light),
            Some("+") => Some(Intensity::Heavy),
            _ => None,
        },
        recent: prefix == Some("RE"),
        vicinity: prefix == Some("VC"),
        descriptor,
        phenomena,
    })
}

fn parse_temperature(group: &str) -> Option<Temperature> {
    let caps = TEMPERATURE.captures(group)?;
    Some(Temperature {
        air: signed_whole(&caps[1]),
        dew_point: caps.get(2).and_then(|m| signed_whole(m.as_str())),
    })
}

fn parse_pressure(group: &str) -> Option<Pressure> {
    if let Some(caps) = PRESSURE.captures(group) {
        let value: f32 = capture_num(&caps, 2)?;
        return Some(if &caps[1] == "Q" {
            Pressure {
                value,
                unit: PressureUnit::Hectopascal,
                kind: PressureKind::Observed,
            }
        } else {
            Pressure {
                value: value / 100.0,
                unit: PressureUnit::InchesOfMercury,
                kind: PressureKind::Observed,
            }
        });
    }
    let caps = PRESSURE_FORECAST.captures(group)?;
    Some(Pressure {
        value: capture_num::<f32>(&caps, 1)? / 100.0,
        unit: PressureUnit::InchesOfMercury,
        kind: PressureKind::ForecastLowest,
    })
}

fn parse_sea_surface(group: &str) -> Option<SeaSurface> {
    let caps = SEA_SURFACE.captures(group)?;
    Some(SeaSurface {
        temperature: signed_whole(&caps[1]).map(|t| t as i8),
        state: capture_num(&caps, 2),
        wave_height_dm: capture_num(&caps, 3),
    })
}

fn parse_forecast_min_max(group: &str) -> Option<MinMaxTemperature> {
    let caps = FORECAST_MIN_MAX.captures(group)?;
    let value = signed_whole(&caps[2]);
    let maximum = &caps[1] == "X";
    Some(MinMaxTemperature {
        maximum: value.filter(|_| maximum),
        minimum: value.filter(|_| !maximum),
        at: Some(TrendTime {
            day: capture_num(&caps, 3),
            hour: capture_num(&caps, 4)?,
            minute: None,
        }),
        period_hours: None,
    })
}

fn parse_layer_forecast(group: &str) -> Option<LayerForecast> {
    let caps = LAYER_FORECAST.captures(group)?;
    Some(LayerForecast {
        kind: if &caps[1] == "6" {
            LayerKind::Icing
        } else {
            LayerKind::Turbulence
        },
        intensity: capture_num(&caps, 2)?,
        base_ft: capture_num::<u32>(&caps, 3)? * 100,
        thickness_ft: capture_num::<u32>(&caps, 4)? * 1000,
    })
}

fn parse_miscellaneous(group: &str) -> Option<Miscellaneous> {
    if let Some(caps) = COLOUR_CODE.captures(group) {
        return Some(Miscellaneous::ColourCode {
            code: caps[2].to_string(),
            black: caps.get(1).is_some(),
        });
    }
    if let Some(caps) = SUNSHINE.captures(group) {
        return Some(Miscellaneous::SunshineDuration {
            minutes: capture_num(&caps, 1)?,
        });
    }
    let caps = ICE_ACCRETION.captures(group)?;
    Some(Miscellaneous::IceAccretion {
        hours: capture_num(&caps, 1)?,
        hundredths_inch: capture_num(&caps, 2)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decode(text: &str) -> DecodeResult {
        GroupDecoder::new().decode(text)
    }

    fn raw(result: &DecodeResult) -> Vec<&str> {
        result.elements.iter().map(|e| e.raw.as_str()).collect()
    }

    #[test]
    fn test_metar_without_keyword() {
        let result = decode("UKOO 161200Z 24005MPS 9999 FEW020 19/14 Q1013 NOSIG");

        assert_eq!(result.metadata.error, DecodeError::None);
        assert_eq!(result.metadata.report_type, ReportType::CurrentObservation);
        assert_eq!(
            raw(&result),
            vec!["UKOO", "161200Z", "24005MPS", "9999", "FEW020", "19/14", "Q1013", "NOSIG"]
        );
        assert!(matches!(result.elements[0].kind, ElementKind::Location(_)));
        assert!(matches!(result.elements[1].kind, ElementKind::ReportTimestamp(_)));
        assert!(matches!(result.elements[2].kind, ElementKind::Wind(_)));
        assert!(matches!(result.elements[3].kind, ElementKind::Visibility(_)));
        assert!(matches!(result.elements[4].kind, ElementKind::Cloud(_)));
        assert!(matches!(result.elements[5].kind, ElementKind::Temperature(_)));
        assert!(matches!(result.elements[6].kind, ElementKind::Pressure(_)));
        assert_eq!(
            result.elements[7].kind,
            ElementKind::Keyword(Keyword::NoSignificantChange)
        );
        assert_eq!(result.elements[0].section, ReportSection::Header);
        assert_eq!(result.elements[2].section, ReportSection::Body);
    }

    #[test]
    fn test_taf_header_and_trends() {
        let result = decode(
            "TAF UKOO 161100Z 1612/1712 24005MPS 9999 SCT030 TEMPO 1612/1618 -SHRA BKN020CB=",
        );

        assert_eq!(result.metadata.error, DecodeError::None);
        assert_eq!(result.metadata.report_type, ReportType::Forecast);
        assert_eq!(result.elements[0].kind, ElementKind::Keyword(Keyword::Taf));
        assert_eq!(result.elements[3].section, ReportSection::Header);
        assert!(matches!(
            result.elements[3].kind,
            ElementKind::TrendHeader(Trend {
                kind: TrendKind::TimeSpan,
                ..
            })
        ));
        assert_eq!(result.elements.last().map(|e| e.raw.as_str()), Some("BKN020CB"));
        let weather = result
            .elements
            .iter()
            .find_map(|e| match &e.kind {
                ElementKind::WeatherPhenomenon(w) => Some(w.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(weather.intensity, Some(Intensity::Light));
        assert_eq!(weather.descriptor.as_deref(), Some("SH"));
        assert_eq!(weather.phenomena, vec!["RA".to_string()]);
    }

    #[test]
    fn test_taf_without_keyword_detected_from_time_span() {
        let result = decode("UKBB 161100Z 1612/1712 VRB02KT CAVOK");
        assert_eq!(result.metadata.report_type, ReportType::Forecast);
        assert_eq!(result.metadata.error, DecodeError::None);
    }

    #[test]
    fn test_empty_input() {
        for text in ["", "   ", "\n\t", "="] {
            let result = decode(text);
            assert_eq!(result.metadata.error, DecodeError::EmptyInput);
            assert!(result.elements.is_empty());
        }
    }

    #[test]
    fn test_header_errors() {
        let cases = [
            ("161200Z UKOO", DecodeError::ExpectedReportTypeOrLocation),
            ("METAR 161200Z", DecodeError::ExpectedLocation),
            ("COR 161200Z", DecodeError::ExpectedReportTypeOrLocation),
            ("METAR COR 161200Z", DecodeError::ExpectedLocation),
            ("AMD 161200Z", DecodeError::ExpectedLocation),
            ("METAR UKOO 24005MPS", DecodeError::ExpectedReportTime),
            ("TAF UKOO 161100Z 9999", DecodeError::ExpectedTimeSpan),
            ("METAR UKOO", DecodeError::UnexpectedEnd),
            ("TAF UKOO 161100Z", DecodeError::UnexpectedEnd),
            ("METAR AMD UKOO 161200Z", DecodeError::AmendmentMarkerNotAllowedOutsideForecast),
            ("METAR UKOO 161200Z CNL", DecodeError::CancellationMarkerNotAllowedOutsideForecast),
            ("METAR UKOO 161200Z NIL 9999", DecodeError::UnexpectedGroupAfterNil),
            ("TAF UKOO 161100Z 1612/1712 CNL 9999", DecodeError::UnexpectedGroupAfterCancellation),
        ];
        for (text, expected) in cases {
            assert_eq!(decode(text).metadata.error, expected, "decoding '{text}'");
        }
    }

    #[test]
    fn test_multi_group_raw_keeps_source_spacing() {
        let text = "METAR KJFK 161151Z 18010KT 1  1/2SM BR";
        let result = decode(text);
        assert_eq!(result.metadata.error, DecodeError::None);
        assert!(raw(&result).contains(&"1  1/2SM"));
        for element in &result.elements {
            assert!(text.contains(&element.raw), "'{}' not in '{text}'", element.raw);
        }

        let text = "METAR KJFK 161151Z 18010KT 9999 RMK OCNL\tLTGICCG DSNT  NE=";
        let result = decode(text);
        assert!(raw(&result).contains(&"OCNL\tLTGICCG DSNT  NE"));
        for element in &result.elements {
            assert!(text.contains(&element.raw), "'{}' not in '{text}'", element.raw);
        }

        let text = "METAR KJFK 161151Z 18010KT 9999 RMK CB\nDSNT N";
        let result = decode(text);
        assert!(raw(&result).contains(&"CB\nDSNT N"));
    }

    #[test]
    fn test_body_errors() {
        assert_eq!(
            decode("TAF UKOO 161100Z 1612/1712 9999 CNL").metadata.error,
            DecodeError::UnexpectedCancellationMarkerInBody
        );
        assert_eq!(
            decode("METAR UKOO 161200Z 9999 NIL").metadata.error,
            DecodeError::UnexpectedCancellationMarkerInBody
        );
        assert_eq!(
            decode("TAF UKOO 161100Z 1612/1712 9999 $").metadata.error,
            DecodeError::MaintenanceIndicatorNotAllowedOutsideObservation
        );
        assert_eq!(
            decode("METAR UKOO 161200Z 9999 $").metadata.error,
            DecodeError::None
        );
    }

    #[test]
    fn test_partial_elements_kept_on_error() {
        let result = decode("METAR UKOO 161200Z 9999 FEW020 NIL");
        assert_eq!(result.metadata.error, DecodeError::UnexpectedCancellationMarkerInBody);
        assert_eq!(raw(&result), vec!["METAR", "UKOO", "161200Z", "9999", "FEW020"]);
    }

    #[test]
    fn test_valid_nil_and_cancelled_reports() {
        let nil = decode("METAR UKOO 161200Z NIL=");
        assert_eq!(nil.metadata.error, DecodeError::None);
        assert_eq!(nil.elements.last().map(|e| &e.kind), Some(&ElementKind::Keyword(Keyword::Nil)));

        let cancelled = decode("TAF AMD UKOO 161130Z 1612/1712 CNL");
        assert_eq!(cancelled.metadata.error, DecodeError::None);
        assert_eq!(cancelled.metadata.report_type, ReportType::Forecast);
    }

    #[test]
    fn test_too_many_groups() {
        let text = format!("METAR UKOO 161200Z {}", vec!["9999"; 200].join(" "));
        let result = decode(&text);
        assert_eq!(result.metadata.error, DecodeError::TooManyGroups);
        assert!(result.elements.is_empty());

        let small = GroupDecoder::new().with_max_groups(3);
        assert_eq!(
            small.decode("METAR UKOO 161200Z 9999").metadata.error,
            DecodeError::TooManyGroups
        );
    }

    #[test]
    fn test_unrecognized_groups_are_kept() {
        let result = decode("METAR UKOO 161200Z 9999 XYZZY12 Q1013");
        assert_eq!(result.metadata.error, DecodeError::None);
        assert_eq!(result.elements[4].kind, ElementKind::Unrecognized);
        assert_eq!(result.elements[4].raw, "XYZZY12");
    }

    #[test]
    fn test_wind_groups() {
        assert_eq!(
            parse_wind("24015G25KT"),
            Some(Wind {
                direction: Some(240),
                speed: Some(15),
                gust: Some(25),
                unit: Some(SpeedUnit::Knots),
                ..Default::default()
            })
        );
        let variable = parse_wind("VRB02MPS").unwrap();
        assert!(variable.variable);
        assert_eq!(variable.direction, None);
        assert_eq!(parse_wind("180V240").unwrap().variable_sector, Some((180, 240)));
        let shear = parse_wind("WS020/24045KT").unwrap();
        assert_eq!(shear.shear_height_ft, Some(2000));
        assert_eq!(shear.speed, Some(45));
        assert_eq!(parse_wind("9999"), None);
    }

    #[test]
    fn test_visibility_groups() {
        let vis = parse_visibility("9999").unwrap().distance.unwrap();
        assert_eq!(vis.bound, Some(Bound::MoreThan));

        let directional = parse_visibility("1500SW").unwrap();
        assert_eq!(directional.direction.as_deref(), Some("SW"));

        let miles = parse_visibility("P6SM").unwrap().distance.unwrap();
        assert_eq!(miles.value, 6.0);
        assert_eq!(miles.unit, DistanceUnit::StatuteMiles);

        let result = decode("METAR KJFK 161151Z 18010KT 1 1/2SM BR OVC005 12/11 A2992");
        assert_eq!(result.elements[4].raw, "1 1/2SM");
        match &result.elements[4].kind {
            ElementKind::Visibility(v) => assert_eq!(v.distance.unwrap().value, 1.5),
            other => panic!("unexpected {other:?}"),
        }

        let rvr = parse_rvr("R24/P1500VP2000FT").unwrap();
        assert_eq!(rvr.runway.as_deref(), Some("24"));
        assert_eq!(rvr.distance.unwrap().unit, DistanceUnit::Feet);
        assert_eq!(rvr.max_distance.unwrap().value, 2000.0);
    }

    #[test]
    fn test_cloud_and_weather() {
        let cloud = parse_cloud("BKN020CB").unwrap();
        assert_eq!(cloud.amount, CloudAmount::Broken);
        assert_eq!(cloud.height_ft, Some(2000));
        assert_eq!(cloud.convective, Some(ConvectiveType::Cumulonimbus));
        assert_eq!(parse_cloud("NSC").unwrap().amount, CloudAmount::NoSignificantCloud);

        let weather = parse_weather("+TSRAGR").unwrap();
        assert_eq!(weather.intensity, Some(Intensity::Heavy));
        assert_eq!(weather.phenomena, vec!["RA".to_string(), "GR".to_string()]);
        assert!(parse_weather("RESN").unwrap().recent);
        assert!(parse_weather("VCSH").unwrap().vicinity);
        assert_eq!(parse_weather("NSW"), Some(Weather::default()));
        assert_eq!(parse_weather("-"), None);
        assert_eq!(parse_weather("UKOO"), None);
    }

    #[test]
    fn test_temperature_and_pressure() {
        let temperature = parse_temperature("M05/M10").unwrap();
        assert_eq!(temperature.air, Some(-5.0));
        assert_eq!(temperature.dew_point, Some(-10.0));
        assert_eq!(parse_temperature("19/").unwrap().dew_point, None);

        let qnh = parse_pressure("Q1013").unwrap();
        assert_eq!(qnh.value, 1013.0);
        assert_eq!(qnh.unit, PressureUnit::Hectopascal);
        let altimeter = parse_pressure("A2992").unwrap();
        assert_eq!(altimeter.unit, PressureUnit::InchesOfMercury);
        assert!((altimeter.value - 29.92).abs() < 1e-4);
        assert_eq!(parse_pressure("QNH2979INS").unwrap().kind, PressureKind::ForecastLowest);
    }

    #[test]
    fn test_runway_and_sea_groups() {
        let state = parse_runway_state("R24/290050").unwrap();
        assert_eq!(state.runway, "24");
        assert_eq!(state.deposits, Some(2));
        assert_eq!(state.extent, Some(9));
        assert_eq!(state.depth.as_deref(), Some("00"));
        assert_eq!(state.friction.as_deref(), Some("50"));
        assert!(parse_runway_state("R88/CLRD70").unwrap().cleared);

        let sea = parse_sea_surface("W15/S3").unwrap();
        assert_eq!(sea.temperature, Some(15));
        assert_eq!(sea.state, Some(3));
        assert_eq!(parse_sea_surface("WM01/H25").unwrap().wave_height_dm, Some(25));
    }

    #[test]
    fn test_forecast_specific_groups() {
        let result = decode("TAF UKOO 161100Z 1612/1712 24005MPS 9999 620304 TX25/1614Z TNM02/1704Z");
        assert_eq!(result.metadata.error, DecodeError::None);
        assert!(matches!(
            result.elements[6].kind,
            ElementKind::LayerForecast(LayerForecast {
                kind: LayerKind::Icing,
                base_ft: 3000,
                thickness_ft: 4000,
                ..
            })
        ));
        match &result.elements[8].kind {
            ElementKind::MinMaxTemperature(t) => assert_eq!(t.minimum, Some(-2.0)),
            other => panic!("unexpected {other:?}"),
        }

        // Six-digit groups are not layer forecasts in observations
        let metar = decode("METAR UKOO 161200Z 620304");
        assert_eq!(metar.elements[3].kind, ElementKind::Unrecognized);
    }

    #[test]
    fn test_remarks_section() {
        let result = decode(
            "METAR KBOS 161154Z 27010KT 10SM FEW250 21/09 A3001 RMK AO2 SLP162 T02110094 10217 20150 53012 P0001 60012 8/57/ SC1AC2 OCNL LTGICCG DSNT NE-SE CB DSNT N MOV E 98120 $",
        );
        assert_eq!(result.metadata.error, DecodeError::None);

        let remarks: Vec<_> = result
            .elements
            .iter()
            .skip_while(|e| e.kind != ElementKind::Keyword(Keyword::Remarks))
            .collect();
        assert!(remarks.iter().all(|e| e.section == ReportSection::Remarks));

        let by_raw = |raw: &str| {
            result
                .elements
                .iter()
                .find(|e| e.raw == raw)
                .map(|e| e.kind.clone())
                .unwrap()
        };
        assert_eq!(by_raw("AO2"), ElementKind::Unrecognized);
        match by_raw("SLP162") {
            ElementKind::Pressure(p) => {
                assert_eq!(p.kind, PressureKind::SeaLevel);
                assert!((p.value - 1016.2).abs() < 1e-3);
            }
            other => panic!("unexpected {other:?}"),
        }
        match by_raw("T02110094") {
            ElementKind::Temperature(t) => {
                assert_eq!(t.air, Some(21.1));
                assert_eq!(t.dew_point, Some(9.4));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(by_raw("10217"), ElementKind::MinMaxTemperature(_)));
        assert!(matches!(by_raw("53012"), ElementKind::PressureTendency(_)));
        assert!(matches!(by_raw("P0001"), ElementKind::Precipitation(_)));
        assert!(matches!(by_raw("60012"), ElementKind::Precipitation(_)));
        assert!(matches!(by_raw("8/57/"), ElementKind::LowMidHighCloud(_)));
        match by_raw("SC1AC2") {
            ElementKind::CloudTypes(c) => assert_eq!(
                c.layers,
                vec![("SC".to_string(), 1), ("AC".to_string(), 2)]
            ),
            other => panic!("unexpected {other:?}"),
        }
        match by_raw("OCNL LTGICCG DSNT NE-SE") {
            ElementKind::Lightning(l) => {
                assert_eq!(l.frequency.as_deref(), Some("OCNL"));
                assert_eq!(l.types, vec!["IC".to_string(), "CG".to_string()]);
                assert!(l.distant);
            }
            other => panic!("unexpected {other:?}"),
        }
        match by_raw("CB DSNT N MOV E") {
            ElementKind::Vicinity(v) => {
                assert_eq!(v.phenomenon, "CB");
                assert_eq!(v.directions, vec!["N".to_string()]);
                assert_eq!(v.moving.as_deref(), Some("E"));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            by_raw("98120"),
            ElementKind::Miscellaneous(Miscellaneous::SunshineDuration { minutes: 120 })
        ));
        assert_eq!(by_raw("$"), ElementKind::Keyword(Keyword::Maintenance));
    }

    #[test]
    fn test_decoding_is_deterministic() {
        let text = "TAF UKOO 161100Z 1612/1712 24005MPS 9999 SCT030 BECMG 1614/1616 BKN015";
        let decoder = GroupDecoder::new();
        assert_eq!(decoder.decode(text), decoder.decode(text));
    }
}
