//! Pure text renderers for the dashboard state
//!
//! Presentation only: every function maps a state snapshot to a string and
//! holds no logic beyond lookups into the interpretation tables. A missing
//! data section renders as its "no data" placeholder, never as an error.

use crate::conditions::{
    self, AqiCategory, PrecipitationIntensity, PrecipitationKind, classify_precipitation,
    condition_info,
};
use crate::dashboard::DashboardState;
use crate::i18n::{Translations, translations};

/// Current conditions panel
pub fn current_panel(state: &DashboardState) -> String {
    let t = translations(state.language);

    if state.is_loading {
        return t.loading.to_string();
    }

    let Some(weather) = &state.weather else {
        return t.select_location.to_string();
    };

    let info = condition_info(weather.condition_code);
    let mut lines = Vec::new();

    lines.push(format!("{} — {} {}", state.location_label, info.emoji, info.label));
    lines.push(format!("{:.1}°C", weather.temperature));
    lines.push(format!("{}: {:.0}%", t.humidity, weather.humidity));
    lines.push(format!(
        "{}: {:.0} km/h {}",
        t.wind,
        weather.wind_speed,
        conditions::wind_direction_to_cardinal(weather.wind_direction)
    ));
    lines.push(format!("{}: {:.0} hPa", t.pressure, weather.pressure));
    lines.push(format!("{}: {:.1} km", t.visibility, weather.visibility));

    let precipitation = classify_precipitation(&weather.precipitation);
    if precipitation.kind != PrecipitationKind::None {
        let kind = match precipitation.kind {
            PrecipitationKind::Snow => t.snow,
            _ => t.rain,
        };
        let intensity = match precipitation.intensity {
            PrecipitationIntensity::Light => t.intensity_light,
            PrecipitationIntensity::Moderate => t.intensity_moderate,
            PrecipitationIntensity::Heavy => t.intensity_heavy,
            PrecipitationIntensity::None => t.intensity_light,
        };
        lines.push(format!(
            "{}: {} ({}, {:.1} mm)",
            t.precipitation, kind, intensity, precipitation.value
        ));
    }

    if let Some(banner) = phenomena_banner(weather.condition_code, t) {
        lines.push(banner);
    }

    lines.join("\n")
}

/// Warning line for fog, hail and thunderstorms
fn phenomena_banner(code: u8, t: &Translations) -> Option<String> {
    let mut phenomena = Vec::new();
    if conditions::is_thunderstorm(code) {
        phenomena.push(t.thunderstorm);
    }
    if conditions::is_fog(code) {
        phenomena.push(t.fog);
    }
    if conditions::is_hail(code) {
        phenomena.push(t.hail);
    }

    if phenomena.is_empty() {
        None
    } else {
        Some(format!("⚠️ {}", phenomena.join(", ")))
    }
}

/// Multi-day forecast panel; empty when no forecast was fetched
pub fn forecast_panel(state: &DashboardState) -> String {
    let t = translations(state.language);

    let Some(forecast) = &state.forecast else {
        return String::new();
    };

    let mut lines = vec![t.forecast_title.to_string()];
    for (index, day) in forecast.days.iter().enumerate() {
        let info = condition_info(day.condition_code);
        let label = if index == 0 {
            t.today.to_string()
        } else {
            day.date.format("%a %d/%m").to_string()
        };
        lines.push(format!(
            "{label}: {} {:.0}°/{:.0}° — {:.1} mm, {:.0} km/h {}",
            info.emoji,
            day.temp_min,
            day.temp_max,
            day.precipitation_sum,
            day.wind_max,
            conditions::wind_direction_to_cardinal(day.wind_dir_dominant)
        ));
    }

    lines.join("\n")
}

/// Air quality panel; absence is an expected state with its own placeholder
pub fn air_quality_panel(state: &DashboardState) -> String {
    let t = translations(state.language);

    let Some(air) = &state.air_quality else {
        return format!("{}: {}", t.air_quality, t.no_data);
    };

    let category = AqiCategory::from_aqi(air.us_aqi);
    let (label, description) = aqi_texts(category, t);

    let mut lines = Vec::new();
    lines.push(format!("{}: {:.0} ({label})", t.air_quality, air.us_aqi));
    lines.push(description.to_string());
    lines.push(format!(
        "PM2.5 {:.1} | PM10 {:.1} | NO₂ {:.1} | O₃ {:.1}",
        air.pm2_5, air.pm10, air.no2, air.o3
    ));

    lines.join("\n")
}

/// Localized label and severity description for an AQI band
pub fn aqi_texts(category: AqiCategory, t: &Translations) -> (&'static str, &'static str) {
    match category {
        AqiCategory::Good => (t.aqi_good, t.aqi_excellent_desc),
        AqiCategory::Fair => (t.aqi_fair, t.aqi_acceptable_desc),
        AqiCategory::Moderate => (t.aqi_moderate, t.aqi_sensitive_desc),
        AqiCategory::Poor => (t.aqi_poor, t.aqi_unhealthy_desc),
        AqiCategory::VeryPoor => (t.aqi_very_poor, t.aqi_dangerous_desc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AirQualitySnapshot, Coordinates, CurrentConditions, DailyForecast, DisplayLanguage,
        ForecastSeries, Precipitation,
    };
    use chrono::NaiveDate;

    fn base_state() -> DashboardState {
        DashboardState {
            selected: Some(Coordinates::new(48.8566, 2.3522)),
            location_label: "Paris, France".to_string(),
            weather: None,
            forecast: None,
            air_quality: None,
            is_loading: false,
            is_geolocating: false,
            language: DisplayLanguage::En,
        }
    }

    fn sample_weather(code: u8) -> CurrentConditions {
        CurrentConditions {
            temperature: 12.5,
            humidity: 71.0,
            wind_speed: 18.0,
            wind_direction: 230,
            pressure: 1008.0,
            precipitation: Precipitation {
                rain: 0.6,
                snow: 0.0,
                amount: 0.6,
            },
            visibility: 24.1,
            condition_code: code,
            observed_at: NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(14, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_current_panel_placeholder_and_loading() {
        let mut state = base_state();
        assert_eq!(current_panel(&state), "Select a location on the map");

        state.is_loading = true;
        assert_eq!(current_panel(&state), "Loading...");
    }

    #[test]
    fn test_current_panel_renders_conditions() {
        let mut state = base_state();
        state.weather = Some(sample_weather(61));

        let panel = current_panel(&state);
        assert!(panel.contains("Paris, France"));
        assert!(panel.contains("Slight rain"));
        assert!(panel.contains("12.5°C"));
        assert!(panel.contains("Humidity: 71%"));
        assert!(panel.contains("SW"));
        assert!(panel.contains("Precipitation: Rain (Moderate, 0.6 mm)"));
        assert!(!panel.contains("⚠️"));
    }

    #[test]
    fn test_current_panel_phenomena_banner() {
        let mut state = base_state();
        state.weather = Some(sample_weather(96));

        let panel = current_panel(&state);
        assert!(panel.contains("⚠️ Thunderstorm, Hail"));

        state.weather = Some(sample_weather(45));
        assert!(current_panel(&state).contains("⚠️ Fog"));
    }

    #[test]
    fn test_forecast_panel_lists_days() {
        let mut state = base_state();
        state.forecast = Some(ForecastSeries {
            latitude: 48.86,
            longitude: 2.35,
            days: vec![
                DailyForecast {
                    date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                    condition_code: 3,
                    temp_max: 11.0,
                    temp_min: 4.0,
                    precipitation_sum: 0.0,
                    wind_max: 22.0,
                    wind_dir_dominant: 210,
                },
                DailyForecast {
                    date: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
                    condition_code: 61,
                    temp_max: 9.0,
                    temp_min: 3.0,
                    precipitation_sum: 5.2,
                    wind_max: 31.0,
                    wind_dir_dominant: 245,
                },
            ],
        });

        let panel = forecast_panel(&state);
        assert!(panel.contains("7-day forecast"));
        assert!(panel.contains("Today:"));
        assert!(panel.contains("5.2 mm"));

        state.forecast = None;
        assert!(forecast_panel(&state).is_empty());
    }

    #[test]
    fn test_air_quality_panel_absence_is_no_data() {
        let state = base_state();
        assert_eq!(air_quality_panel(&state), "Air Quality: No data available");
    }

    #[test]
    fn test_air_quality_panel_banded() {
        let mut state = base_state();
        state.air_quality = Some(AirQualitySnapshot {
            us_aqi: 42.0,
            pm2_5: 8.1,
            pm10: 14.2,
            no2: 21.0,
            o3: 55.3,
            observed_at: NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(14, 0, 0)
                .unwrap(),
        });

        let panel = air_quality_panel(&state);
        assert!(panel.contains("Air Quality: 42 (Good)"));
        assert!(panel.contains("Excellent air quality"));
        assert!(panel.contains("PM2.5 8.1"));
    }

    #[test]
    fn test_localized_panels() {
        let mut state = base_state();
        state.language = DisplayLanguage::Fr;
        assert_eq!(current_panel(&state), "Sélectionnez un lieu sur la carte");
        assert!(air_quality_panel(&state).contains("Aucune donnée disponible"));
    }
}
