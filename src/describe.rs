//! Human-readable descriptions of decoded elements.
//!
//! [`describe`] maps every element to `"<Label>: <raw text>"`. The label is
//! chosen by an exhaustive match over [`ElementKind`], so a new variant does
//! not compile until it has a label of its own. [`explain`] is the optional
//! detailed form built from the typed fields.

use crate::element::*;
use crate::models::DecodeResult;

/// Label used for groups the decoder could not classify
pub const UNRECOGNIZED_LABEL: &str = "Not recognized by the parser";

/// Display label for an element kind
pub fn label(kind: &ElementKind) -> &'static str {
    match kind {
        ElementKind::Keyword(_) => "Keyword",
        ElementKind::Location(_) => "ICAO location",
        ElementKind::ReportTimestamp(_) => "Report Release Time",
        ElementKind::TrendHeader(_) => "Trend Header",
        ElementKind::Wind(_) => "Wind",
        ElementKind::Visibility(_) => "Visibility",
        ElementKind::Cloud(_) => "Cloud Data",
        ElementKind::WeatherPhenomenon(_) => "Weather Phenomena",
        ElementKind::Temperature(_) => "Temperature and Dew Point",
        ElementKind::Pressure(_) => "Pressure",
        ElementKind::RunwayState(_) => "State of Runway",
        ElementKind::SeaSurface(_) => "Sea Surface",
        ElementKind::MinMaxTemperature(_) => "Minimum/Maximum Temperature",
        ElementKind::Precipitation(_) => "Precipitation",
        ElementKind::LayerForecast(_) => "Atmospheric Layer Forecast",
        ElementKind::PressureTendency(_) => "Pressure Tendency",
        ElementKind::CloudTypes(_) => "Cloud Types",
        ElementKind::LowMidHighCloud(_) => "Low, middle, and high cloud layers",
        ElementKind::Lightning(_) => "Lightning data",
        ElementKind::Vicinity(_) => "Events in vicinity",
        ElementKind::Miscellaneous(_) => "Miscellaneous Data",
        ElementKind::Unrecognized => UNRECOGNIZED_LABEL,
    }
}

/// `"<Label>: <raw>"` for one element
pub fn describe(element: &Element) -> String {
    format!("{}: {}", label(&element.kind), element.raw)
}

/// Descriptions for every element, in decode order
pub fn render(result: &DecodeResult) -> Vec<String> {
    result.elements.iter().map(describe).collect()
}

/// Description followed by the decoded meaning when one is available
pub fn describe_detailed(element: &Element) -> String {
    match explain(&element.kind) {
        Some(detail) => format!("{} ({})", describe(element), detail),
        None => describe(element),
    }
}

/// Plain-language reading of the typed fields
pub fn explain(kind: &ElementKind) -> Option<String> {
    match kind {
        ElementKind::Keyword(keyword) => Some(explain_keyword(*keyword).to_string()),
        ElementKind::Location(location) => Some(format!("aerodrome {}", location.icao)),
        ElementKind::ReportTimestamp(time) => Some(format!(
            "day {}, {:02}:{:02} UTC",
            time.day, time.hour, time.minute
        )),
        ElementKind::TrendHeader(trend) => Some(explain_trend(trend)),
        ElementKind::Wind(wind) => explain_wind(wind),
        ElementKind::Visibility(visibility) => explain_visibility(visibility),
        ElementKind::Cloud(cloud) => Some(explain_cloud(cloud)),
        ElementKind::WeatherPhenomenon(weather) => Some(explain_weather(weather)),
        ElementKind::Temperature(temperature) => {
            let air = temperature.air.map(|t| format!("temperature {t:.1} C"));
            let dew = temperature.dew_point.map(|t| format!("dew point {t:.1} C"));
            join_parts([air, dew])
        }
        ElementKind::Pressure(pressure) => Some(explain_pressure(pressure)),
        ElementKind::RunwayState(state) => Some(explain_runway_state(state)),
        ElementKind::SeaSurface(sea) => {
            let temperature = sea.temperature.map(|t| format!("sea temperature {t} C"));
            let state = sea.state.map(|s| format!("state of sea code {s}"));
            let waves = sea
                .wave_height_dm
                .map(|h| format!("wave height {:.1} m", f32::from(h) / 10.0));
            join_parts([temperature, state, waves])
        }
        ElementKind::MinMaxTemperature(extreme) => {
            let maximum = extreme.maximum.map(|t| format!("maximum {t:.1} C"));
            let minimum = extreme.minimum.map(|t| format!("minimum {t:.1} C"));
            let period = extreme.period_hours.map(|h| format!("over {h} hours"));
            let at = extreme.at.map(|t| format!("at {}", format_trend_time(&t)));
            join_parts([maximum, minimum, period, at])
        }
        ElementKind::Precipitation(precipitation) => Some(explain_precipitation(precipitation)),
        ElementKind::LayerForecast(layer) => Some(format!(
            "{} intensity {} from {} ft, {} ft thick",
            match layer.kind {
                LayerKind::Icing => "icing",
                LayerKind::Turbulence => "turbulence",
            },
            layer.intensity,
            layer.base_ft,
            layer.thickness_ft
        )),
        ElementKind::PressureTendency(tendency) => {
            let rapid = tendency.rapid.map(|r| match r {
                RapidChange::Rising => "pressure rising rapidly".to_string(),
                RapidChange::Falling => "pressure falling rapidly".to_string(),
            });
            let code = tendency.code.map(|c| format!("tendency code {c}"));
            let change = tendency
                .change_hpa
                .map(|c| format!("change {c:.1} hPa in 3 hours"));
            join_parts([rapid, code, change])
        }
        ElementKind::CloudTypes(types) => join_parts(
            types
                .layers
                .iter()
                .map(|(cloud, oktas)| Some(format!("{cloud} {oktas}/8"))),
        ),
        ElementKind::LowMidHighCloud(layers) => {
            let code = |value: Option<u8>| value.map_or("?".to_string(), |v| v.to_string());
            Some(format!(
                "low {}, middle {}, high {}",
                code(layers.low),
                code(layers.mid),
                code(layers.high)
            ))
        }
        ElementKind::Lightning(lightning) => {
            let frequency = lightning.frequency.clone();
            let types = (!lightning.types.is_empty())
                .then(|| format!("types {}", lightning.types.join(", ")));
            let distant = lightning.distant.then(|| "distant".to_string());
            let directions = (!lightning.directions.is_empty())
                .then(|| lightning.directions.join(" "));
            join_parts([frequency, Some("lightning".to_string()), types, distant, directions])
        }
        ElementKind::Vicinity(vicinity) => {
            let distant = vicinity.distant.then(|| "distant".to_string());
            let directions = (!vicinity.directions.is_empty())
                .then(|| vicinity.directions.join(" "));
            let moving = vicinity.moving.as_ref().map(|d| format!("moving {d}"));
            join_parts([Some(vicinity.phenomenon.clone()), distant, directions, moving])
        }
        ElementKind::Miscellaneous(misc) => Some(match misc {
            Miscellaneous::ColourCode { code, black } => {
                if *black {
                    format!("colour state {code}, airfield closed")
                } else {
                    format!("colour state {code}")
                }
            }
            Miscellaneous::SunshineDuration { minutes } => {
                format!("{minutes} minutes of sunshine")
            }
            Miscellaneous::IceAccretion {
                hours,
                hundredths_inch,
            } => format!(
                "{:.2} in of ice in the last {hours} hours",
                f32::from(*hundredths_inch) / 100.0
            ),
        }),
        ElementKind::Unrecognized => None,
    }
}

fn join_parts(parts: impl IntoIterator<Item = Option<String>>) -> Option<String> {
    let parts: Vec<String> = parts.into_iter().flatten().collect();
    (!parts.is_empty()).then(|| parts.join(", "))
}

fn explain_keyword(keyword: Keyword) -> &'static str {
    match keyword {
        Keyword::Metar => "routine observation",
        Keyword::Speci => "special observation",
        Keyword::Taf => "aerodrome forecast",
        Keyword::Amended => "amended report",
        Keyword::Corrected => "corrected report",
        Keyword::Nil => "missing report",
        Keyword::Cancelled => "forecast cancelled",
        Keyword::Auto => "fully automated report",
        Keyword::Cavok => "ceiling and visibility OK",
        Keyword::NoSignificantChange => "no significant change expected",
        Keyword::Remarks => "remarks follow",
        Keyword::Maintenance => "station requires maintenance",
    }
}

fn format_trend_time(time: &TrendTime) -> String {
    let mut text = String::new();
    if let Some(day) = time.day {
        text.push_str(&format!("day {day} "));
    }
    text.push_str(&format!("{:02}:{:02}", time.hour, time.minute.unwrap_or(0)));
    text
}

fn explain_trend(trend: &Trend) -> String {
    let kind = match trend.kind {
        TrendKind::TimeSpan => "valid",
        TrendKind::Becoming => "becoming",
        TrendKind::Temporary => "temporarily",
        TrendKind::Intermittent => "intermittently",
        TrendKind::From => "from",
        TrendKind::Until => "until",
        TrendKind::At => "at",
        TrendKind::Probability => "probability",
    };
    let mut text = kind.to_string();
    if let Some(probability) = trend.probability {
        text.push_str(&format!(" {probability}%"));
    }
    match (trend.kind, trend.from, trend.until) {
        (TrendKind::TimeSpan, Some(from), Some(until)) => text.push_str(&format!(
            " from {} until {}",
            format_trend_time(&from),
            format_trend_time(&until)
        )),
        (_, Some(from), _) => text.push_str(&format!(" {}", format_trend_time(&from))),
        (_, None, Some(until)) => text.push_str(&format!(" {}", format_trend_time(&until))),
        _ => {}
    }
    text
}

fn speed_unit_name(unit: Option<SpeedUnit>) -> &'static str {
    match unit {
        Some(SpeedUnit::Knots) => "kt",
        Some(SpeedUnit::MetersPerSecond) => "m/s",
        Some(SpeedUnit::KilometersPerHour) => "km/h",
        None => "",
    }
}

fn explain_wind(wind: &Wind) -> Option<String> {
    if let Some((from, to)) = wind.variable_sector {
        return Some(format!("direction varying between {from} and {to} degrees"));
    }
    let unit = speed_unit_name(wind.unit);
    let direction = match (wind.direction, wind.variable) {
        (_, true) => "variable direction".to_string(),
        (Some(degrees), false) => format!("from {degrees} degrees"),
        (None, false) => "direction not reported".to_string(),
    };
    let speed = wind.speed.map(|s| format!("{s} {unit}"));
    let gust = wind.gust.map(|g| format!("gusting {g} {unit}"));
    let shear = wind
        .shear_height_ft
        .map(|h| format!("wind shear at {h} ft"));
    if wind.speed == Some(0) && wind.direction == Some(0) {
        return Some("calm".to_string());
    }
    join_parts([shear, Some(direction), speed, gust])
}

fn format_distance(distance: &Distance) -> String {
    let bound = match distance.bound {
        Some(Bound::MoreThan) => "more than ",
        Some(Bound::LessThan) => "less than ",
        None => "",
    };
    let unit = match distance.unit {
        DistanceUnit::Meters => "m",
        DistanceUnit::StatuteMiles => "SM",
        DistanceUnit::Feet => "ft",
    };
    format!("{bound}{} {unit}", distance.value)
}

fn explain_visibility(visibility: &Visibility) -> Option<String> {
    let runway = visibility
        .runway
        .as_ref()
        .map(|r| format!("runway {r} visual range"));
    let distance = visibility.distance.as_ref().map(format_distance);
    let max = visibility
        .max_distance
        .as_ref()
        .map(|d| format!("varying to {}", format_distance(d)));
    let direction = visibility
        .direction
        .as_ref()
        .map(|d| format!("towards {d}"));
    join_parts([runway, distance, max, direction])
}

fn explain_cloud(cloud: &Cloud) -> String {
    let amount = match cloud.amount {
        CloudAmount::Few => "few",
        CloudAmount::Scattered => "scattered",
        CloudAmount::Broken => "broken",
        CloudAmount::Overcast => "overcast",
        CloudAmount::VerticalVisibility => "sky obscured, vertical visibility",
        CloudAmount::SkyClear => "sky clear",
        CloudAmount::Clear => "no cloud below 12000 ft",
        CloudAmount::NoSignificantCloud => "no significant cloud",
        CloudAmount::NoCloudDetected => "no cloud detected",
    };
    let mut text = amount.to_string();
    if let Some(height) = cloud.height_ft {
        text.push_str(&format!(" at {height} ft"));
    }
    match cloud.convective {
        Some(ConvectiveType::Cumulonimbus) => text.push_str(", cumulonimbus"),
        Some(ConvectiveType::ToweringCumulus) => text.push_str(", towering cumulus"),
        None => {}
    }
    text
}

fn explain_weather(weather: &Weather) -> String {
    if weather.descriptor.is_none() && weather.phenomena.is_empty() {
        return "no significant weather".to_string();
    }
    let mut parts = Vec::new();
    match weather.intensity {
        Some(Intensity::Light) => parts.push("light".to_string()),
        Some(Intensity::Heavy) => parts.push("heavy".to_string()),
        None => {}
    }
    if weather.recent {
        parts.push("recent".to_string());
    }
    if let Some(descriptor) = &weather.descriptor {
        parts.push(descriptor.clone());
    }
    parts.extend(weather.phenomena.iter().cloned());
    if weather.vicinity {
        parts.push("in vicinity".to_string());
    }
    parts.join(" ")
}

fn explain_pressure(pressure: &Pressure) -> String {
    let kind = match pressure.kind {
        PressureKind::Observed => "QNH",
        PressureKind::SeaLevel => "sea level pressure",
        PressureKind::ForecastLowest => "forecast lowest pressure",
    };
    match pressure.unit {
        PressureUnit::Hectopascal => format!("{kind} {:.1} hPa", pressure.value),
        PressureUnit::InchesOfMercury => format!("{kind} {:.2} inHg", pressure.value),
    }
}

fn explain_runway_state(state: &RunwayState) -> String {
    let mut text = format!("runway {}", state.runway);
    if state.cleared {
        text.push_str(" cleared");
    }
    if let Some(deposits) = state.deposits {
        text.push_str(&format!(", deposits code {deposits}"));
    }
    if let Some(extent) = state.extent {
        text.push_str(&format!(", extent code {extent}"));
    }
    if let Some(depth) = &state.depth {
        text.push_str(&format!(", depth code {depth}"));
    }
    if let Some(friction) = &state.friction {
        text.push_str(&format!(", friction {friction}"));
    }
    text
}

fn explain_precipitation(precipitation: &Precipitation) -> String {
    let period = match precipitation.kind {
        PrecipitationKind::LastHour => "last hour",
        PrecipitationKind::ThreeOrSixHours => "last 3 or 6 hours",
        PrecipitationKind::TwentyFourHours => "last 24 hours",
        PrecipitationKind::SnowDepth => "snow depth",
    };
    match (precipitation.kind, precipitation.amount) {
        (PrecipitationKind::SnowDepth, Some(inches)) => format!("{period} {inches} in"),
        (_, Some(inches)) => format!("{inches:.2} in over the {period}"),
        (_, None) => format!("{period}, amount not reported"),
    }
}

/// How a decoded report is turned into text
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Render the partial element list of reports that failed to decode
    pub render_failed_reports: bool,
    /// Append decoded field explanations
    pub detailed: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            render_failed_reports: true,
            detailed: false,
        }
    }
}

/// Full text block for one report: summary lines then one line per element
pub fn report_block(text: &str, result: &DecodeResult, options: &RenderOptions) -> Vec<String> {
    let mut lines = vec![
        format!("Parsing report: {text}"),
        format!("Parse error: {}", result.metadata.error.message()),
        format!("Detected report type: {}", result.metadata.report_type.message()),
        format!("{} groups parsed", result.elements.len()),
    ];

    if !result.is_success() && !options.render_failed_reports {
        return lines;
    }

    let describe_one: fn(&Element) -> String = if options.detailed {
        describe_detailed
    } else {
        describe
    };
    lines.extend(result.elements.iter().map(describe_one));
    lines
}
