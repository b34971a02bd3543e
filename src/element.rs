//! Typed report elements.
//!
//! [`ElementKind`] is the closed set of things a decoded report can contain.
//! Each [`Element`] pairs its kind with the section it came from and the
//! verbatim text it was decoded from, so a report can always be displayed
//! as written even when the typed fields are partial.

use crate::constants::keywords;
use crate::models::ReportSection;
use serde::{Deserialize, Serialize};

/// One decoded piece of a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub kind: ElementKind,
    pub section: ReportSection,
    /// Source text the element was decoded from, space-joined when the
    /// element spans several groups
    pub raw: String,
}

impl Element {
    pub fn new(kind: ElementKind, section: ReportSection, raw: impl Into<String>) -> Self {
        Self {
            kind,
            section,
            raw: raw.into(),
        }
    }
}

/// Closed variant set of report content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElementKind {
    Keyword(Keyword),
    Location(Location),
    ReportTimestamp(ReportTime),
    TrendHeader(Trend),
    Wind(Wind),
    Visibility(Visibility),
    Cloud(Cloud),
    WeatherPhenomenon(Weather),
    Temperature(Temperature),
    Pressure(Pressure),
    RunwayState(RunwayState),
    SeaSurface(SeaSurface),
    MinMaxTemperature(MinMaxTemperature),
    Precipitation(Precipitation),
    LayerForecast(LayerForecast),
    PressureTendency(PressureTendency),
    CloudTypes(CloudTypes),
    LowMidHighCloud(LowMidHighCloud),
    Lightning(Lightning),
    Vicinity(Vicinity),
    Miscellaneous(Miscellaneous),
    Unrecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Keyword {
    Metar,
    Speci,
    Taf,
    Amended,
    Corrected,
    Nil,
    Cancelled,
    Auto,
    Cavok,
    NoSignificantChange,
    Remarks,
    Maintenance,
}

impl Keyword {
    pub fn from_token(token: &str) -> Option<Self> {
        let keyword = match token {
            keywords::METAR => Keyword::Metar,
            keywords::SPECI => Keyword::Speci,
            keywords::TAF => Keyword::Taf,
            keywords::AMENDED => Keyword::Amended,
            keywords::CORRECTED => Keyword::Corrected,
            keywords::NIL => Keyword::Nil,
            keywords::CANCELLED => Keyword::Cancelled,
            keywords::AUTO => Keyword::Auto,
            keywords::CAVOK => Keyword::Cavok,
            keywords::NOSIG => Keyword::NoSignificantChange,
            keywords::REMARKS => Keyword::Remarks,
            keywords::MAINTENANCE => Keyword::Maintenance,
            _ => return None,
        };
        Some(keyword)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub icao: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTime {
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
}

/// Day/hour/minute reference used by trends; day and minute are often omitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendTime {
    pub day: Option<u8>,
    pub hour: u8,
    pub minute: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendKind {
    /// Forecast validity period (`DDHH/DDHH`)
    TimeSpan,
    Becoming,
    Temporary,
    Intermittent,
    From,
    Until,
    At,
    Probability,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trend {
    pub kind: TrendKind,
    pub probability: Option<u8>,
    pub from: Option<TrendTime>,
    pub until: Option<TrendTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedUnit {
    Knots,
    MetersPerSecond,
    KilometersPerHour,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Wind {
    /// Degrees true; `None` for variable or unreported direction
    pub direction: Option<u16>,
    pub variable: bool,
    pub speed: Option<u16>,
    pub gust: Option<u16>,
    pub unit: Option<SpeedUnit>,
    pub variable_sector: Option<(u16, u16)>,
    /// Height of the wind shear layer for `WS` groups
    pub shear_height_ft: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceUnit {
    Meters,
    StatuteMiles,
    Feet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bound {
    MoreThan,
    LessThan,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distance {
    pub value: f32,
    pub unit: DistanceUnit,
    pub bound: Option<Bound>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Visibility {
    pub distance: Option<Distance>,
    /// Upper value of a variable runway visual range
    pub max_distance: Option<Distance>,
    pub direction: Option<String>,
    /// Set for runway visual range groups
    pub runway: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloudAmount {
    Few,
    Scattered,
    Broken,
    Overcast,
    VerticalVisibility,
    SkyClear,
    Clear,
    NoSignificantCloud,
    NoCloudDetected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConvectiveType {
    Cumulonimbus,
    ToweringCumulus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cloud {
    pub amount: CloudAmount,
    pub height_ft: Option<u32>,
    pub convective: Option<ConvectiveType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intensity {
    Light,
    Heavy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Weather {
    pub intensity: Option<Intensity>,
    pub recent: bool,
    pub vicinity: bool,
    pub descriptor: Option<String>,
    /// Two-letter phenomenon codes; empty for `NSW`
    pub phenomena: Vec<String>,
}

/// Degrees Celsius, tenths when decoded from remarks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub air: Option<f32>,
    pub dew_point: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PressureUnit {
    Hectopascal,
    InchesOfMercury,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PressureKind {
    Observed,
    SeaLevel,
    ForecastLowest,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pressure {
    pub value: f32,
    pub unit: PressureUnit,
    pub kind: PressureKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunwayState {
    pub runway: String,
    pub cleared: bool,
    pub deposits: Option<u8>,
    pub extent: Option<u8>,
    pub depth: Option<String>,
    pub friction: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeaSurface {
    pub temperature: Option<i8>,
    pub state: Option<u8>,
    pub wave_height_dm: Option<u16>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct MinMaxTemperature {
    pub maximum: Option<f32>,
    pub minimum: Option<f32>,
    /// Forecast time of the extreme (TAF `TX`/`TN` groups)
    pub at: Option<TrendTime>,
    /// Observation period for remark groups
    pub period_hours: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrecipitationKind {
    LastHour,
    ThreeOrSixHours,
    TwentyFourHours,
    SnowDepth,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Precipitation {
    pub kind: PrecipitationKind,
    /// Inches; `None` when the amount is not reported
    pub amount: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerKind {
    Icing,
    Turbulence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerForecast {
    pub kind: LayerKind,
    pub intensity: u8,
    pub base_ft: u32,
    pub thickness_ft: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RapidChange {
    Rising,
    Falling,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PressureTendency {
    /// WMO code 0-8 for the shape of the tendency
    pub code: Option<u8>,
    pub change_hpa: Option<f32>,
    pub rapid: Option<RapidChange>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudTypes {
    /// Cloud type abbreviation with its coverage in oktas
    pub layers: Vec<(String, u8)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowMidHighCloud {
    pub low: Option<u8>,
    pub mid: Option<u8>,
    pub high: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Lightning {
    pub frequency: Option<String>,
    pub types: Vec<String>,
    pub distant: bool,
    pub directions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Vicinity {
    pub phenomenon: String,
    pub distant: bool,
    pub directions: Vec<String>,
    pub moving: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Miscellaneous {
    ColourCode { code: String, black: bool },
    SunshineDuration { minutes: u16 },
    IceAccretion { hours: u8, hundredths_inch: u16 },
}
