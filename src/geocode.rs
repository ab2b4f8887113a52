//! Geocoding adapter backed by Nominatim (OpenStreetMap)
//!
//! Forward search returns ranked place candidates and degrades to an empty
//! list on any failure; an empty list is indistinguishable from "no matches"
//! by design. Reverse lookup never fails outward: it walks a fallback chain
//! and bottoms out at a formatted coordinate string.
//!
//! Nominatim rate-limits anonymous traffic, so every request carries the
//! configured client identifier as User-Agent.

use crate::config::{AetheriaConfig, ApiConfig};
use crate::models::{Coordinates, DisplayLanguage, PlaceCandidate};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Forward search seam consumed by the search debouncer
#[async_trait]
pub trait ForwardGeocoder: Send + Sync {
    /// Free-text search; empty on failure as well as on no matches
    async fn search(&self, query: &str, lang: DisplayLanguage) -> Vec<PlaceCandidate>;
}

/// Reverse lookup seam consumed by the orchestrator
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// Best available label for the coordinates; always returns some string
    async fn reverse(&self, coords: Coordinates, lang: DisplayLanguage) -> String;
}

/// HTTP client for the Nominatim geocoding API
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    client: Client,
    config: ApiConfig,
}

impl GeocodeClient {
    /// Create a new geocoding client
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

    fn search_url(&self, query: &str, lang: DisplayLanguage) -> String {
        format!(
            "{}/search?format=json&q={}&addressdetails=1&limit={}&accept-language={}",
            self.config.geocoding_base_url,
            urlencoding::encode(query),
            self.config.max_candidates,
            lang.code()
        )
    }

    fn reverse_url(&self, coords: Coordinates, lang: DisplayLanguage) -> String {
        format!(
            "{}/reverse?format=json&lat={}&lon={}&zoom=10&addressdetails=1&accept-language={}",
            self.config.geocoding_base_url,
            coords.latitude,
            coords.longitude,
            lang.code()
        )
    }
}

#[async_trait]
impl ForwardGeocoder for GeocodeClient {
    #[instrument(skip(self), fields(query = query))]
    async fn search(&self, query: &str, lang: DisplayLanguage) -> Vec<PlaceCandidate> {
        if query.is_empty() {
            return Vec::new();
        }

        let url = self.search_url(query, lang);
        debug!("Forward geocoding request: {url}");

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("Forward geocoding request failed: {e}");
                return Vec::new();
            }
        };

        if !response.status().is_success() {
            warn!("Forward geocoding returned status {}", response.status());
            return Vec::new();
        }

        let items: Vec<SearchItem> = match response.json().await {
            Ok(items) => items,
            Err(e) => {
                warn!("Failed to decode forward geocoding response: {e}");
                return Vec::new();
            }
        };

        items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| candidate_from_item(item, index))
            .collect()
    }
}

#[async_trait]
impl ReverseGeocoder for GeocodeClient {
    #[instrument(skip(self), fields(lat = coords.latitude, lon = coords.longitude))]
    async fn reverse(&self, coords: Coordinates, lang: DisplayLanguage) -> String {
        let url = self.reverse_url(coords, lang);
        debug!("Reverse geocoding request: {url}");

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                debug!("Reverse geocoding request failed: {e}");
                return coords.fallback_label();
            }
        };

        if !response.status().is_success() {
            debug!("Reverse geocoding returned status {}", response.status());
            return coords.fallback_label();
        }

        match response.json::<ReverseResponse>().await {
            Ok(body) => reverse_label(&body, coords),
            Err(e) => {
                debug!("Failed to decode reverse geocoding response: {e}");
                coords.fallback_label()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    place_id: Option<u64>,
    name: Option<String>,
    display_name: Option<String>,
    lat: String,
    lon: String,
    address: Option<SearchAddress>,
}

#[derive(Debug, Deserialize, Default)]
struct SearchAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    municipality: Option<String>,
    state: Option<String>,
    region: Option<String>,
    province: Option<String>,
    county: Option<String>,
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    display_name: Option<String>,
    address: Option<ReverseAddress>,
}

#[derive(Debug, Deserialize, Default)]
struct ReverseAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    municipality: Option<String>,
    county: Option<String>,
    state: Option<String>,
    country: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Map one raw search result to a candidate; results without parseable
/// coordinates are dropped
fn candidate_from_item(item: SearchItem, index: usize) -> Option<PlaceCandidate> {
    let latitude: f64 = item.lat.parse().ok()?;
    let longitude: f64 = item.lon.parse().ok()?;

    let address = item.address.unwrap_or_default();

    // Prefer the primary name, then address parts, then the display name head
    let name = non_empty(item.name)
        .or_else(|| non_empty(address.city))
        .or_else(|| non_empty(address.town))
        .or_else(|| non_empty(address.village))
        .or_else(|| non_empty(address.municipality))
        .or_else(|| {
            item.display_name
                .as_deref()
                .and_then(|d| d.split(',').next())
                .map(|head| head.trim().to_string())
                .filter(|head| !head.is_empty())
        })?;

    let region = non_empty(address.state)
        .or_else(|| non_empty(address.region))
        .or_else(|| non_empty(address.province))
        .or_else(|| non_empty(address.county))
        .unwrap_or_default();

    Some(PlaceCandidate {
        id: item.place_id.unwrap_or(index as u64),
        name,
        latitude,
        longitude,
        country: address.country.unwrap_or_default(),
        region,
    })
}

/// Build the reverse-lookup label. Fallback order: settlement field, then
/// county/state, then the first two segments of the display name, then the
/// coordinate string. Never empty.
fn reverse_label(body: &ReverseResponse, coords: Coordinates) -> String {
    if let Some(address) = &body.address {
        let place = non_empty(address.city.clone())
            .or_else(|| non_empty(address.town.clone()))
            .or_else(|| non_empty(address.village.clone()))
            .or_else(|| non_empty(address.municipality.clone()))
            .or_else(|| non_empty(address.county.clone()))
            .or_else(|| non_empty(address.state.clone()));

        if let Some(place) = place {
            return match non_empty(address.country.clone()) {
                Some(country) => format!("{place}, {country}"),
                None => place,
            };
        }
    }

    if let Some(display_name) = &body.display_name {
        let head = display_name
            .split(',')
            .take(2)
            .map(str::trim)
            .collect::<Vec<_>>()
            .join(", ");
        if !head.is_empty() {
            return head;
        }
    }

    coords.fallback_label()
}
