//! Aetheria - map-first weather dashboard core
//!
//! This library provides the client-side orchestration for a map-based
//! weather dashboard: location selection, forward/reverse geocoding,
//! concurrent weather/forecast/air-quality fetching and periodic refresh.
//! The map widget, the position provider and the UI shell are external
//! collaborators behind small capability surfaces.

pub mod conditions;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod geocode;
pub mod geolocate;
pub mod i18n;
pub mod map;
pub mod models;
pub mod render;
pub mod search;
pub mod store;
pub mod weather;

// Re-export core types for public API
pub use config::AetheriaConfig;
pub use dashboard::{Dashboard, DashboardEvent, DashboardState};
pub use error::AetheriaError;
pub use geocode::{ForwardGeocoder, GeocodeClient, ReverseGeocoder};
pub use geolocate::{PositionRequest, PositionSource};
pub use models::{
    AirQualitySnapshot, Coordinates, CurrentConditions, DisplayLanguage, ForecastSeries,
    PlaceCandidate, SavedLocation,
};
pub use search::SearchDebouncer;
pub use store::PreferenceStore;
pub use weather::{WeatherClient, WeatherFeed};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, AetheriaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
