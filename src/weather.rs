//! Weather data adapter for the OpenMeteo APIs
//!
//! Three independent query functions behind one HTTP client: current
//! conditions, multi-day forecast and air quality. Every query degrades to
//! `None` on network, status or parse failure so that one failing source
//! never blocks rendering of the others.

use crate::config::{AetheriaConfig, ApiConfig};
use crate::models::{
    AirQualitySnapshot, Coordinates, CurrentConditions, DisplayLanguage, ForecastSeries, open_meteo,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Weather queries as consumed by the orchestrator
#[async_trait]
pub trait WeatherFeed: Send + Sync {
    async fn current_conditions(
        &self,
        coords: Coordinates,
        lang: DisplayLanguage,
    ) -> Option<CurrentConditions>;

    async fn forecast(
        &self,
        coords: Coordinates,
        days: u32,
        lang: DisplayLanguage,
    ) -> Option<ForecastSeries>;

    async fn air_quality(&self, coords: Coordinates) -> Option<AirQualitySnapshot>;
}

/// HTTP client for the OpenMeteo weather and air quality APIs
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    config: ApiConfig,
}

impl WeatherClient {
    /// Create a new weather API client
    pub fn new(config: &AetheriaConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_seconds.into()))
            .user_agent(config.api.user_agent.clone())
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            config: config.api.clone(),
        })
    }

    fn current_url(&self, coords: Coordinates, lang: DisplayLanguage) -> String {
        format!(
            "{}/forecast?latitude={}&longitude={}&current=temperature_2m,relative_humidity_2m,weather_code,wind_speed_10m,wind_direction_10m,surface_pressure,precipitation,rain,snowfall,visibility&timezone=auto&language={}",
            self.config.weather_base_url,
            coords.latitude,
            coords.longitude,
            lang.code()
        )
    }

    fn forecast_url(&self, coords: Coordinates, days: u32, lang: DisplayLanguage) -> String {
        format!(
            "{}/forecast?latitude={}&longitude={}&daily=weather_code,temperature_2m_max,temperature_2m_min,precipitation_sum,wind_speed_10m_max,wind_direction_10m_dominant&timezone=auto&forecast_days={}&language={}",
            self.config.weather_base_url,
            coords.latitude,
            coords.longitude,
            days,
            lang.code()
        )
    }

    fn air_quality_url(&self, coords: Coordinates) -> String {
        // Coordinate precision beyond 4 decimals is meaningless to the air
        // quality source and has caused request errors
        let rounded = coords.rounded(4);
        format!(
            "{}/air-quality?latitude={}&longitude={}&hourly=pm10,pm2_5,nitrogen_dioxide,ozone,us_aqi&timezone=auto",
            self.config.air_quality_base_url, rounded.latitude, rounded.longitude
        )
    }

    /// Fetch and decode one endpoint, collapsing every failure mode into `None`
    async fn fetch_json<T: DeserializeOwned>(&self, url: &str, what: &str) -> Option<T> {
        debug!("Requesting {what}: {url}");

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("{what} request failed: {e}");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!("{what} request returned status {status}");
            return None;
        }

        match response.json::<T>().await {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!("Failed to decode {what} response: {e}");
                None
            }
        }
    }
}

#[async_trait]
impl WeatherFeed for WeatherClient {
    #[instrument(skip(self), fields(lat = coords.latitude, lon = coords.longitude))]
    async fn current_conditions(
        &self,
        coords: Coordinates,
        lang: DisplayLanguage,
    ) -> Option<CurrentConditions> {
        let url = self.current_url(coords, lang);
        let response: open_meteo::CurrentResponse =
            self.fetch_json(&url, "current conditions").await?;
        CurrentConditions::from_open_meteo(&response)
    }

    #[instrument(skip(self), fields(lat = coords.latitude, lon = coords.longitude))]
    async fn forecast(
        &self,
        coords: Coordinates,
        days: u32,
        lang: DisplayLanguage,
    ) -> Option<ForecastSeries> {
        let url = self.forecast_url(coords, days, lang);
        let response: open_meteo::ForecastResponse = self.fetch_json(&url, "forecast").await?;
        ForecastSeries::from_open_meteo(&response)
    }

    #[instrument(skip(self), fields(lat = coords.latitude, lon = coords.longitude))]
    async fn air_quality(&self, coords: Coordinates) -> Option<AirQualitySnapshot> {
        let url = self.air_quality_url(coords);
        let response: open_meteo::AirQualityResponse = self.fetch_json(&url, "air quality").await?;
        AirQualitySnapshot::from_open_meteo(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> WeatherClient {
        WeatherClient::new(&AetheriaConfig::default()).unwrap()
    }

    #[test]
    fn test_air_quality_url_rounds_to_four_decimals() {
        let url = client().air_quality_url(Coordinates::new(48.85661234, 2.35221987));
        assert!(url.contains("latitude=48.8566"), "url was {url}");
        assert!(url.contains("longitude=2.3522"), "url was {url}");
        assert!(!url.contains("48.85661234"));
        assert!(!url.contains("2.35221987"));
    }

    #[test]
    fn test_air_quality_url_keeps_short_coordinates() {
        let url = client().air_quality_url(Coordinates::new(48.0, 2.5));
        assert!(url.contains("latitude=48"), "url was {url}");
        assert!(url.contains("longitude=2.5"), "url was {url}");
    }

    #[test]
    fn test_current_url_carries_language_and_timezone() {
        let url = client().current_url(Coordinates::new(48.8566, 2.3522), DisplayLanguage::Es);
        assert!(url.contains("language=es"));
        assert!(url.contains("timezone=auto"));
        assert!(url.contains("relative_humidity_2m"));
        assert!(url.contains("snowfall"));
    }

    #[test]
    fn test_forecast_url_carries_day_count() {
        let url = client().forecast_url(Coordinates::new(48.8566, 2.3522), 7, DisplayLanguage::En);
        assert!(url.contains("forecast_days=7"));
        assert!(url.contains("wind_direction_10m_dominant"));
        assert!(url.contains("language=en"));
    }

    #[tokio::test]
    #[ignore] // Live network test: cargo test -- --ignored
    async fn test_live_current_conditions() {
        let conditions = client()
            .current_conditions(Coordinates::new(48.8566, 2.3522), DisplayLanguage::Fr)
            .await;
        assert!(conditions.is_some());
    }
}
