//! Data models for the dashboard core
//!
//! This module contains the domain structures shared by the orchestrator and
//! the adapters, plus the external API response types they are decoded from.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair identifying the point of interest
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Round both coordinates to the given number of decimal places
    pub fn rounded(&self, precision: u32) -> Self {
        let multiplier = 10_f64.powi(precision as i32);
        Self {
            latitude: (self.latitude * multiplier).round() / multiplier,
            longitude: (self.longitude * multiplier).round() / multiplier,
        }
    }

    /// Label of last resort when every geocoding fallback is exhausted
    pub fn fallback_label(&self) -> String {
        format!("Lat: {:.4}, Lon: {:.4}", self.latitude, self.longitude)
    }
}

/// Display language for labels and localized condition text.
///
/// The upstream APIs localize place names server-side, so changing the
/// language re-triggers a full fetch cycle.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum DisplayLanguage {
    #[default]
    Fr,
    En,
    Es,
}

impl DisplayLanguage {
    /// Two-letter code sent to the upstream APIs and stored on disk
    pub fn code(&self) -> &'static str {
        match self {
            DisplayLanguage::Fr => "fr",
            DisplayLanguage::En => "en",
            DisplayLanguage::Es => "es",
        }
    }

    /// Parse a stored two-letter code; unknown codes are treated as absent
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "fr" => Some(DisplayLanguage::Fr),
            "en" => Some(DisplayLanguage::En),
            "es" => Some(DisplayLanguage::Es),
            _ => None,
        }
    }
}

/// A ranked forward-geocoding candidate
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlaceCandidate {
    /// Provider-assigned place id
    pub id: u64,
    /// Primary place name
    pub name: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Country name, empty when the provider omits it
    pub country: String,
    /// State/region/province, empty when the provider omits it
    pub region: String,
}

/// Rain/snow split of a precipitation reading, in mm
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct Precipitation {
    pub rain: f32,
    pub snow: f32,
    /// Raw combined precipitation as reported
    pub amount: f32,
}

/// Current conditions at the selected location, replaced wholesale on every
/// successful fetch
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CurrentConditions {
    /// Temperature in Celsius
    pub temperature: f32,
    /// Relative humidity percentage (0-100)
    pub humidity: f32,
    /// Wind speed in km/h
    pub wind_speed: f32,
    /// Wind direction in degrees (0-360, where 0/360 is North)
    pub wind_direction: u16,
    /// Surface pressure in hPa
    pub pressure: f32,
    /// Precipitation breakdown in mm
    pub precipitation: Precipitation,
    /// Visibility in kilometers
    pub visibility: f32,
    /// WMO condition code
    pub condition_code: u8,
    /// Observation time, local to the location
    pub observed_at: NaiveDateTime,
}

/// One day of the multi-day forecast
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DailyForecast {
    /// Calendar date, local to the location
    pub date: NaiveDate,
    /// WMO condition code
    pub condition_code: u8,
    /// Maximum temperature in Celsius
    pub temp_max: f32,
    /// Minimum temperature in Celsius
    pub temp_min: f32,
    /// Total precipitation in mm
    pub precipitation_sum: f32,
    /// Maximum wind speed in km/h
    pub wind_max: f32,
    /// Dominant wind direction in degrees
    pub wind_dir_dominant: u16,
}

/// Ordered multi-day forecast; index 0 is "today" in the location's timezone
/// as reported by the data source
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastSeries {
    pub latitude: f64,
    pub longitude: f64,
    pub days: Vec<DailyForecast>,
}

impl ForecastSeries {
    pub fn today(&self) -> Option<&DailyForecast> {
        self.days.first()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Air quality reading. Absence is a valid, expected state: the UI renders
/// "no data" instead of failing.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AirQualitySnapshot {
    /// US Air Quality Index
    pub us_aqi: f32,
    /// PM2.5 concentration in µg/m³
    pub pm2_5: f32,
    /// PM10 concentration in µg/m³
    pub pm10: f32,
    /// NO₂ concentration in µg/m³
    pub no2: f32,
    /// O₃ concentration in µg/m³
    pub o3: f32,
    /// Observation time, local to the location
    pub observed_at: NaiveDateTime,
}

/// Last-viewed location as persisted between sessions
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SavedLocation {
    pub lat: f64,
    pub lon: f64,
    pub name: String,
}

impl SavedLocation {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lon)
    }
}

/// OpenMeteo API response structures
pub mod open_meteo {
    use super::*;

    /// Timestamps come back location-local without an offset
    const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

    fn parse_local_time(raw: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(raw, TIME_FORMAT)
            .unwrap_or_else(|_| Utc::now().naive_utc())
    }

    /// Current conditions response from OpenMeteo
    #[derive(Debug, Deserialize)]
    pub struct CurrentResponse {
        pub latitude: f64,
        pub longitude: f64,
        pub current: Option<CurrentData>,
    }

    /// Current weather block from OpenMeteo
    #[derive(Debug, Deserialize)]
    pub struct CurrentData {
        pub time: String,
        #[serde(rename = "temperature_2m")]
        pub temperature: Option<f32>,
        #[serde(rename = "relative_humidity_2m")]
        pub humidity: Option<f32>,
        #[serde(rename = "weather_code")]
        pub weather_code: Option<u8>,
        #[serde(rename = "wind_speed_10m")]
        pub wind_speed: Option<f32>,
        #[serde(rename = "wind_direction_10m")]
        pub wind_direction: Option<u16>,
        #[serde(rename = "surface_pressure")]
        pub pressure: Option<f32>,
        pub precipitation: Option<f32>,
        pub rain: Option<f32>,
        pub snowfall: Option<f32>,
        pub visibility: Option<f32>,
    }

    /// Daily forecast response from OpenMeteo
    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub latitude: f64,
        pub longitude: f64,
        pub daily: Option<DailyData>,
    }

    /// Daily forecast block from OpenMeteo
    #[derive(Debug, Deserialize)]
    pub struct DailyData {
        pub time: Vec<String>,
        #[serde(rename = "weather_code")]
        pub weather_code: Option<Vec<Option<u8>>>,
        #[serde(rename = "temperature_2m_max")]
        pub temperature_max: Option<Vec<Option<f32>>>,
        #[serde(rename = "temperature_2m_min")]
        pub temperature_min: Option<Vec<Option<f32>>>,
        #[serde(rename = "precipitation_sum")]
        pub precipitation: Option<Vec<Option<f32>>>,
        #[serde(rename = "wind_speed_10m_max")]
        pub wind_speed_max: Option<Vec<Option<f32>>>,
        #[serde(rename = "wind_direction_10m_dominant")]
        pub wind_direction: Option<Vec<Option<u16>>>,
    }

    /// Air quality response from OpenMeteo; hourly series, most recent first
    /// index consumed
    #[derive(Debug, Deserialize)]
    pub struct AirQualityResponse {
        pub latitude: f64,
        pub longitude: f64,
        pub hourly: Option<AirQualityHourly>,
    }

    /// Hourly air quality block; the API uses the long pollutant names
    #[derive(Debug, Deserialize)]
    pub struct AirQualityHourly {
        pub time: Vec<String>,
        pub us_aqi: Option<Vec<Option<f32>>>,
        pub pm2_5: Option<Vec<Option<f32>>>,
        pub pm10: Option<Vec<Option<f32>>>,
        pub nitrogen_dioxide: Option<Vec<Option<f32>>>,
        pub ozone: Option<Vec<Option<f32>>>,
    }

    impl CurrentConditions {
        /// Extract current conditions from an OpenMeteo response
        pub fn from_open_meteo(response: &CurrentResponse) -> Option<Self> {
            let current = response.current.as_ref()?;

            Some(Self {
                temperature: current.temperature.unwrap_or(0.0),
                humidity: current.humidity.unwrap_or(0.0),
                wind_speed: current.wind_speed.unwrap_or(0.0),
                wind_direction: current.wind_direction.unwrap_or(0),
                pressure: current.pressure.unwrap_or(1013.0),
                precipitation: Precipitation {
                    rain: current.rain.unwrap_or(0.0),
                    snow: current.snowfall.unwrap_or(0.0),
                    amount: current.precipitation.unwrap_or(0.0),
                },
                // Reported in meters
                visibility: current.visibility.unwrap_or(0.0) / 1000.0,
                condition_code: current.weather_code.unwrap_or(0),
                observed_at: parse_local_time(&current.time),
            })
        }
    }

    impl ForecastSeries {
        /// Build the daily series from an OpenMeteo response.
        /// Returns `None` when the daily block is missing or empty.
        pub fn from_open_meteo(response: &ForecastResponse) -> Option<Self> {
            let daily = response.daily.as_ref()?;
            if daily.time.is_empty() {
                return None;
            }

            let days = daily
                .time
                .iter()
                .enumerate()
                .filter_map(|(i, raw_date)| {
                    let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d").ok()?;

                    let at = |series: &Option<Vec<Option<f32>>>| {
                        series
                            .as_ref()
                            .and_then(|values| values.get(i).copied().flatten())
                            .unwrap_or(0.0)
                    };

                    Some(DailyForecast {
                        date,
                        condition_code: daily
                            .weather_code
                            .as_ref()
                            .and_then(|codes| codes.get(i).copied().flatten())
                            .unwrap_or(0),
                        temp_max: at(&daily.temperature_max),
                        temp_min: at(&daily.temperature_min),
                        precipitation_sum: at(&daily.precipitation),
                        wind_max: at(&daily.wind_speed_max),
                        wind_dir_dominant: daily
                            .wind_direction
                            .as_ref()
                            .and_then(|dirs| dirs.get(i).copied().flatten())
                            .unwrap_or(0),
                    })
                })
                .collect::<Vec<_>>();

            if days.is_empty() {
                return None;
            }

            Some(Self {
                latitude: response.latitude,
                longitude: response.longitude,
                days,
            })
        }
    }

    impl AirQualitySnapshot {
        /// Take the first hourly reading from an OpenMeteo air quality
        /// response. A missing or null AQI means "no data", not an error.
        pub fn from_open_meteo(response: &AirQualityResponse) -> Option<Self> {
            let hourly = response.hourly.as_ref()?;
            let observed_at = parse_local_time(hourly.time.first()?);

            let first = |series: &Option<Vec<Option<f32>>>| {
                series.as_ref().and_then(|values| values.first().copied().flatten())
            };

            // Without a usable AQI the whole reading is treated as absent
            let us_aqi = first(&hourly.us_aqi)?;

            Some(Self {
                us_aqi,
                pm2_5: first(&hourly.pm2_5).unwrap_or(0.0),
                pm10: first(&hourly.pm10).unwrap_or(0.0),
                no2: first(&hourly.nitrogen_dioxide).unwrap_or(0.0),
                o3: first(&hourly.ozone).unwrap_or(0.0),
                observed_at,
            })
        }
    }
}
