//! Interpretation of raw weather readings
//!
//! Static lookup tables keyed by the WMO condition code, AQI banding and
//! precipitation classification. These tables are fixed contracts with the
//! presentation layer; band boundaries are inclusive on the lower band.

use crate::models::Precipitation;

/// Label and emoji for one WMO condition code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionInfo {
    pub label: &'static str,
    pub emoji: &'static str,
}

/// Map a WMO weather code to a displayable label and emoji
pub fn condition_info(code: u8) -> ConditionInfo {
    let (label, emoji) = match code {
        0 => ("Clear sky", "☀️"),
        1 => ("Mainly clear", "🌤️"),
        2 => ("Partly cloudy", "⛅"),
        3 => ("Overcast", "☁️"),
        45 => ("Fog", "🌫️"),
        48 => ("Depositing rime fog", "🌫️"),
        51 => ("Light drizzle", "🌦️"),
        53 => ("Moderate drizzle", "🌦️"),
        55 => ("Dense drizzle", "🌦️"),
        56 => ("Light freezing drizzle", "🌨️"),
        57 => ("Dense freezing drizzle", "🌨️"),
        61 => ("Slight rain", "🌧️"),
        63 => ("Moderate rain", "🌧️"),
        65 => ("Heavy rain", "⛈️"),
        66 => ("Light freezing rain", "🌨️"),
        67 => ("Heavy freezing rain", "🌨️"),
        71 => ("Slight snow fall", "❄️"),
        73 => ("Moderate snow fall", "❄️"),
        75 => ("Heavy snow fall", "❄️"),
        77 => ("Snow grains", "🌨️"),
        80 => ("Slight rain showers", "🌦️"),
        81 => ("Moderate rain showers", "🌧️"),
        82 => ("Violent rain showers", "⛈️"),
        85 => ("Slight snow showers", "❄️"),
        86 => ("Heavy snow showers", "❄️"),
        95 => ("Thunderstorm", "⛈️"),
        96 => ("Thunderstorm with slight hail", "⛈️"),
        99 => ("Thunderstorm with heavy hail", "⛈️"),
        _ => ("Unknown", "❓"),
    };
    ConditionInfo { label, emoji }
}

/// Thunderstorm flag for the special phenomena banner
pub fn is_thunderstorm(code: u8) -> bool {
    (95..=99).contains(&code)
}

/// Fog flag for the special phenomena banner
pub fn is_fog(code: u8) -> bool {
    code == 45 || code == 48
}

/// Hail flag for the special phenomena banner
pub fn is_hail(code: u8) -> bool {
    code == 96 || code == 99
}

/// US AQI severity band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AqiCategory {
    Good,
    Fair,
    Moderate,
    Poor,
    VeryPoor,
}

impl AqiCategory {
    /// Band an AQI value; boundaries are inclusive on the lower band
    pub fn from_aqi(aqi: f32) -> Self {
        if aqi <= 50.0 {
            AqiCategory::Good
        } else if aqi <= 100.0 {
            AqiCategory::Fair
        } else if aqi <= 150.0 {
            AqiCategory::Moderate
        } else if aqi <= 200.0 {
            AqiCategory::Poor
        } else {
            AqiCategory::VeryPoor
        }
    }
}

/// Kind of precipitation currently falling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrecipitationKind {
    None,
    Rain,
    Snow,
}

/// Intensity band of the effective precipitation value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrecipitationIntensity {
    None,
    Light,
    Moderate,
    Heavy,
}

/// Classified precipitation reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrecipitationSummary {
    pub kind: PrecipitationKind,
    pub intensity: PrecipitationIntensity,
    /// Effective value in mm the bands were applied to
    pub value: f32,
}

/// Classify a precipitation reading.
///
/// The effective value is rain when rain is falling, else snow, else the raw
/// combined amount. Bands: 0 none, under 0.5 light, under 2.0 moderate,
/// 2.0 and above heavy.
pub fn classify_precipitation(p: &Precipitation) -> PrecipitationSummary {
    let value = if p.rain > 0.0 {
        p.rain
    } else if p.snow > 0.0 {
        p.snow
    } else if p.amount > 0.0 {
        p.amount
    } else {
        0.0
    };

    if value == 0.0 {
        return PrecipitationSummary {
            kind: PrecipitationKind::None,
            intensity: PrecipitationIntensity::None,
            value: 0.0,
        };
    }

    let kind = if p.snow > 0.0 {
        PrecipitationKind::Snow
    } else {
        PrecipitationKind::Rain
    };

    let intensity = if value < 0.5 {
        PrecipitationIntensity::Light
    } else if value < 2.0 {
        PrecipitationIntensity::Moderate
    } else {
        PrecipitationIntensity::Heavy
    };

    PrecipitationSummary {
        kind,
        intensity,
        value,
    }
}

/// Convert wind direction from degrees to a 16-point cardinal direction
pub fn wind_direction_to_cardinal(degrees: u16) -> &'static str {
    match degrees {
        0..=11 | 349..=360 => "N",
        12..=33 => "NNE",
        34..=56 => "NE",
        57..=78 => "ENE",
        79..=101 => "E",
        102..=123 => "ESE",
        124..=146 => "SE",
        147..=168 => "SSE",
        169..=191 => "S",
        192..=213 => "SSW",
        214..=236 => "SW",
        237..=258 => "WSW",
        259..=281 => "W",
        282..=303 => "WNW",
        304..=326 => "NW",
        327..=348 => "NNW",
        _ => "Unknown",
    }
}
