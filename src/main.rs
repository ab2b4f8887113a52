use std::sync::Arc;

use aetheria::geolocate::UnsupportedPositionSource;
use aetheria::{
    AetheriaConfig, Dashboard, DashboardEvent, GeocodeClient, PreferenceStore, WeatherClient,
    geocode::ForwardGeocoder, map, render,
};
use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Headless demo: geocode the query given on the command line, select the
/// best candidate and print the rendered dashboard panels.
#[tokio::main]
async fn main() -> Result<()> {
    let config = AetheriaConfig::load(None)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .init();

    let weather = Arc::new(WeatherClient::new(&config)?);
    let geocoder = Arc::new(GeocodeClient::new(&config)?);
    let store = Arc::new(PreferenceStore::open(config.storage.path.clone()));

    // No widget in a terminal, so the surface is ready immediately
    let (map_handle, _map_events, map_driver) = map::channel();
    map_driver.mark_ready();

    let dashboard = Dashboard::new(
        weather,
        geocoder.clone(),
        store,
        map_handle,
        Arc::new(UnsupportedPositionSource),
        &config,
    );

    let query = std::env::args().nth(1).unwrap_or_else(|| "Paris".to_string());
    let language = dashboard.snapshot().language;

    let candidates = geocoder.search(&query, language).await;
    let Some(candidate) = candidates.into_iter().next() else {
        println!("No place found for '{query}'");
        return Ok(());
    };

    if let Some(cycle) = dashboard
        .dispatch(DashboardEvent::SearchSelect(candidate))
        .await
    {
        cycle.await?;
    }

    let state = dashboard.snapshot();
    println!("{}", render::current_panel(&state));
    println!();
    println!("{}", render::air_quality_panel(&state));

    let forecast = render::forecast_panel(&state);
    if !forecast.is_empty() {
        println!();
        println!("{forecast}");
    }

    Ok(())
}
