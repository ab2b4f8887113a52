//! Location/refresh orchestration
//!
//! Owns the currently selected location and drives every select-and-fetch
//! cycle: user clicks, search selections, geolocation, language changes and
//! the periodic background refresh. Presentation components only ever read
//! snapshots of [`DashboardState`]; all mutation happens here.
//!
//! Cycles triggered while another is in flight are not cancelled or
//! sequenced: each runs to completion and commits, so the last completion
//! wins. This mirrors the product behavior the dashboard shipped with; see
//! DESIGN.md before changing it.

use crate::config::{AetheriaConfig, RefreshConfig};
use crate::geocode::ReverseGeocoder;
use crate::geolocate::{PositionRequest, PositionSource};
use crate::map::{CameraMove, MapEvents, MapHandle};
use crate::models::{
    AirQualitySnapshot, Coordinates, CurrentConditions, DisplayLanguage, ForecastSeries,
    PlaceCandidate, SavedLocation,
};
use crate::store::PreferenceStore;
use crate::weather::WeatherFeed;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Interval};
use tracing::{debug, info, warn};

/// Camera zoom used when jumping to a searched place
const SEARCH_FLY_ZOOM: f64 = 10.0;
/// Camera zoom used after a device position fix or a recenter
const GEOLOCATE_FLY_ZOOM: f64 = 12.0;

/// Everything the presentation layer needs to render the dashboard.
///
/// The weather, forecast, air quality and label fields are consistent with
/// the same location and language *as of their last successful commit*; an
/// in-flight refresh may still be working against older inputs.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// Currently selected location, at most one at a time
    pub selected: Option<Coordinates>,
    /// Localized label for the selected location
    pub location_label: String,
    pub weather: Option<CurrentConditions>,
    pub forecast: Option<ForecastSeries>,
    pub air_quality: Option<AirQualitySnapshot>,
    /// Visible loading indicator, toggled only by user-initiated cycles
    pub is_loading: bool,
    /// True while a device position fix is pending
    pub is_geolocating: bool,
    pub language: DisplayLanguage,
}

impl DashboardState {
    fn new(language: DisplayLanguage) -> Self {
        Self {
            selected: None,
            location_label: String::new(),
            weather: None,
            forecast: None,
            air_quality: None,
            is_loading: false,
            is_geolocating: false,
            language,
        }
    }
}

/// Events accepted by the orchestrator
#[derive(Debug, Clone)]
pub enum DashboardEvent {
    /// User clicked raw coordinates on the map; no camera movement
    MapClick(Coordinates),
    /// User picked a search candidate; the camera flies to it
    SearchSelect(PlaceCandidate),
    /// User asked for their device position
    Geolocate,
    /// Fly back to the selected location, or geolocate when none is selected
    Recenter,
    /// Switch the display language and silently refresh
    LanguageChange(DisplayLanguage),
    /// Periodic background refresh
    Refresh,
}

/// Where the cycle gets its location label from
enum LabelSource {
    /// The trigger already carries a name (search selection, restored state)
    Given(String),
    /// Resolve via reverse lookup in the cycle's language
    Reverse,
}

/// Per-trigger parameters of one select-and-fetch cycle
struct CyclePlan {
    label: LabelSource,
    fly_zoom: Option<f64>,
    /// Persist location + label afterwards (explicit user selections only)
    persist: bool,
    /// Whether the cycle toggles the visible loading indicator
    visible: bool,
}

/// The orchestrator. Construct with [`Dashboard::new`], feed it through
/// [`Dashboard::dispatch`] or hand it to [`Dashboard::run`].
pub struct Dashboard {
    state: RwLock<DashboardState>,
    weather: Arc<dyn WeatherFeed>,
    geocoder: Arc<dyn ReverseGeocoder>,
    store: Arc<PreferenceStore>,
    map: MapHandle,
    position: Arc<dyn PositionSource>,
    refresh: RefreshConfig,
}

/// Clears the visible loading flag on every exit path of a cycle
struct LoadingGuard<'a> {
    state: &'a RwLock<DashboardState>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.is_loading = false;
    }
}

impl Dashboard {
    pub fn new(
        weather: Arc<dyn WeatherFeed>,
        geocoder: Arc<dyn ReverseGeocoder>,
        store: Arc<PreferenceStore>,
        map: MapHandle,
        position: Arc<dyn PositionSource>,
        config: &AetheriaConfig,
    ) -> Arc<Self> {
        let language = store
            .language()
            .or_else(|| DisplayLanguage::from_code(&config.defaults.language))
            .unwrap_or_default();

        Arc::new(Self {
            state: RwLock::new(DashboardState::new(language)),
            weather,
            geocoder,
            store,
            map,
            position,
            refresh: config.refresh.clone(),
        })
    }

    /// Current state for the presentation layer
    pub fn snapshot(&self) -> DashboardState {
        self.read_state().clone()
    }

    fn read_state(&self) -> RwLockReadGuard<'_, DashboardState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, DashboardState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Restore the last session's location, or fall back to geolocation.
    /// Returns the spawned cycle, if any.
    pub async fn startup(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        if let Some(saved) = self.store.last_location() {
            info!("Restoring last location: {}", saved.name);
            // The stored label is trusted as-is; no reverse lookup, no camera
            // movement
            return Some(self.spawn_cycle(
                saved.coordinates(),
                CyclePlan {
                    label: LabelSource::Given(saved.name),
                    fly_zoom: None,
                    persist: true,
                    visible: true,
                },
            ));
        }

        self.geolocate().await
    }

    /// Handle one event. Fetch work runs on a spawned task, returned so
    /// callers that need completion (tests, one-shot tools) can await it;
    /// the run loop detaches it.
    pub async fn dispatch(self: &Arc<Self>, event: DashboardEvent) -> Option<JoinHandle<()>> {
        match event {
            DashboardEvent::MapClick(coords) => Some(self.spawn_cycle(
                coords,
                CyclePlan {
                    label: LabelSource::Reverse,
                    fly_zoom: None,
                    persist: true,
                    visible: true,
                },
            )),
            DashboardEvent::SearchSelect(candidate) => {
                let coords = Coordinates::new(candidate.latitude, candidate.longitude);
                Some(self.spawn_cycle(
                    coords,
                    CyclePlan {
                        label: LabelSource::Given(candidate.name),
                        fly_zoom: Some(SEARCH_FLY_ZOOM),
                        persist: true,
                        visible: true,
                    },
                ))
            }
            DashboardEvent::Geolocate => self.geolocate().await,
            DashboardEvent::Recenter => {
                let selected = self.read_state().selected;
                match selected {
                    Some(coords) => {
                        self.fly(coords, GEOLOCATE_FLY_ZOOM);
                        None
                    }
                    None => self.geolocate().await,
                }
            }
            DashboardEvent::LanguageChange(language) => {
                let selected = {
                    let mut state = self.write_state();
                    state.language = language;
                    state.selected
                };
                self.store.set_language(language);

                // Labels and condition text are localized upstream, so the
                // same coordinates are fetched again in the new language
                selected.map(|coords| {
                    self.spawn_cycle(
                        coords,
                        CyclePlan {
                            label: LabelSource::Reverse,
                            fly_zoom: None,
                            persist: false,
                            visible: false,
                        },
                    )
                })
            }
            DashboardEvent::Refresh => {
                let selected = self.read_state().selected;
                selected.map(|coords| {
                    debug!("Background refresh");
                    self.spawn_cycle(
                        coords,
                        CyclePlan {
                            label: LabelSource::Reverse,
                            fly_zoom: None,
                            persist: false,
                            visible: false,
                        },
                    )
                })
            }
        }
    }

    /// Commit the selection synchronously, then run the fetch half of the
    /// cycle on its own task. Overlapping cycles race by design.
    fn spawn_cycle(self: &Arc<Self>, coords: Coordinates, plan: CyclePlan) -> JoinHandle<()> {
        {
            let mut state = self.write_state();
            state.selected = Some(coords);
            if plan.visible {
                state.is_loading = true;
            }
            if let LabelSource::Given(name) = &plan.label {
                state.location_label = name.clone();
            }
        }

        if let Some(zoom) = plan.fly_zoom {
            self.fly(coords, zoom);
        }

        let dashboard = Arc::clone(self);
        tokio::spawn(async move { dashboard.fetch_and_commit(coords, plan).await })
    }

    async fn fetch_and_commit(&self, coords: Coordinates, plan: CyclePlan) {
        let _guard = plan.visible.then(|| LoadingGuard { state: &self.state });

        let language = self.read_state().language;

        let label = match plan.label {
            LabelSource::Given(name) => name,
            LabelSource::Reverse => self.geocoder.reverse(coords, language).await,
        };

        let (weather, forecast, air_quality) = tokio::join!(
            self.weather.current_conditions(coords, language),
            self.weather.forecast(coords, self.refresh.forecast_days, language),
            self.weather.air_quality(coords),
        );

        {
            let mut state = self.write_state();
            state.location_label = label.clone();
            // The freshest attempt wins wholesale, explicit absence included
            state.weather = weather;
            state.forecast = forecast;
            state.air_quality = air_quality;
        }

        if plan.persist {
            self.store.set_last_location(&SavedLocation {
                lat: coords.latitude,
                lon: coords.longitude,
                name: label,
            });
        }
    }

    /// One-shot device position fix, then a full select cycle plus a camera
    /// fly. Failure is logged and otherwise invisible: prior state stays.
    async fn geolocate(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        self.write_state().is_geolocating = true;

        let request = PositionRequest {
            timeout: Duration::from_secs(self.refresh.geolocation_timeout_seconds),
            ..PositionRequest::default()
        };
        let fix = time::timeout(request.timeout, self.position.current_position(&request)).await;

        self.write_state().is_geolocating = false;

        match fix {
            Ok(Ok(coords)) => {
                info!(
                    "Device position: {:.4}, {:.4}",
                    coords.latitude, coords.longitude
                );
                Some(self.spawn_cycle(
                    coords,
                    CyclePlan {
                        label: LabelSource::Reverse,
                        fly_zoom: Some(GEOLOCATE_FLY_ZOOM),
                        persist: true,
                        visible: true,
                    },
                ))
            }
            Ok(Err(e)) => {
                warn!("Geolocation unavailable: {e}");
                None
            }
            Err(_) => {
                warn!(
                    "Geolocation timed out after {}s",
                    self.refresh.geolocation_timeout_seconds
                );
                None
            }
        }
    }

    fn fly(&self, coords: Coordinates, zoom: f64) {
        let map = self.map.clone();
        tokio::spawn(async move { map.fly_to(CameraMove::new(coords, zoom)).await });
    }

    /// Event loop: consumes UI events and map clicks, and keeps the periodic
    /// refresh armed while a location is selected. The timer is owned by the
    /// `(location, language)` pair and re-armed whenever either changes.
    pub async fn run(self: Arc<Self>, mut events: mpsc::Receiver<DashboardEvent>, mut clicks: MapEvents) {
        self.startup().await;

        let mut ticker: Option<Interval> = None;
        let mut armed_for: Option<(Coordinates, DisplayLanguage)> = None;
        let mut clicks_open = true;

        loop {
            tokio::select! {
                maybe_event = events.recv() => {
                    match maybe_event {
                        Some(event) => {
                            self.dispatch(event).await;
                        }
                        None => break,
                    }
                }
                maybe_click = clicks.next_click(), if clicks_open => {
                    match maybe_click {
                        Some(coords) => {
                            self.dispatch(DashboardEvent::MapClick(coords)).await;
                        }
                        None => clicks_open = false,
                    }
                }
                _ = Self::next_tick(&mut ticker), if ticker.is_some() => {
                    self.dispatch(DashboardEvent::Refresh).await;
                }
            }

            let key = {
                let state = self.read_state();
                state.selected.map(|coords| (coords, state.language))
            };
            if key != armed_for {
                ticker = key.map(|_| {
                    let period = Duration::from_secs(self.refresh.interval_seconds);
                    time::interval_at(time::Instant::now() + period, period)
                });
                armed_for = key;
            }
        }
    }

    async fn next_tick(ticker: &mut Option<Interval>) {
        match ticker {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geolocate::UnsupportedPositionSource;
    use async_trait::async_trait;
    use tempfile::tempdir;

    struct NullFeed;

    #[async_trait]
    impl WeatherFeed for NullFeed {
        async fn current_conditions(
            &self,
            _coords: Coordinates,
            _lang: DisplayLanguage,
        ) -> Option<CurrentConditions> {
            None
        }

        async fn forecast(
            &self,
            _coords: Coordinates,
            _days: u32,
            _lang: DisplayLanguage,
        ) -> Option<ForecastSeries> {
            None
        }

        async fn air_quality(&self, _coords: Coordinates) -> Option<AirQualitySnapshot> {
            None
        }
    }

    struct FixedLabel;

    #[async_trait]
    impl ReverseGeocoder for FixedLabel {
        async fn reverse(&self, _coords: Coordinates, _lang: DisplayLanguage) -> String {
            "Testville".to_string()
        }
    }

    fn dashboard(store: Arc<PreferenceStore>) -> (Arc<Dashboard>, crate::map::MapDriver) {
        let (handle, _events, driver) = crate::map::channel();
        let dashboard = Dashboard::new(
            Arc::new(NullFeed),
            Arc::new(FixedLabel),
            store,
            handle,
            Arc::new(UnsupportedPositionSource),
            &AetheriaConfig::default(),
        );
        (dashboard, driver)
    }

    #[tokio::test]
    async fn test_initial_state_is_empty() {
        let dir = tempdir().unwrap();
        let store = Arc::new(PreferenceStore::open(Some(dir.path().join("p.json"))));

        let (dashboard, _driver) = dashboard(store);
        let state = dashboard.snapshot();
        assert!(state.selected.is_none());
        assert!(state.weather.is_none());
        assert!(!state.is_loading);
        assert_eq!(state.language, DisplayLanguage::Fr);
    }

    #[tokio::test]
    async fn test_language_seeded_from_store() {
        let dir = tempdir().unwrap();
        let store = Arc::new(PreferenceStore::open(Some(dir.path().join("p.json"))));
        store.set_language(DisplayLanguage::Es);

        let (dashboard, _driver) = dashboard(store);
        assert_eq!(dashboard.snapshot().language, DisplayLanguage::Es);
    }

    #[tokio::test]
    async fn test_map_click_selects_and_labels() {
        let dir = tempdir().unwrap();
        let store = Arc::new(PreferenceStore::open(Some(dir.path().join("p.json"))));
        let (dashboard, _driver) = dashboard(store.clone());

        let coords = Coordinates::new(48.8566, 2.3522);
        let cycle = dashboard
            .dispatch(DashboardEvent::MapClick(coords))
            .await
            .unwrap();
        cycle.await.unwrap();

        let state = dashboard.snapshot();
        assert_eq!(state.selected, Some(coords));
        assert_eq!(state.location_label, "Testville");
        assert!(!state.is_loading);

        // Explicit selections persist location and resolved label
        let saved = store.last_location().unwrap();
        assert_eq!(saved.name, "Testville");
    }

    #[tokio::test]
    async fn test_language_change_without_selection_only_switches() {
        let dir = tempdir().unwrap();
        let store = Arc::new(PreferenceStore::open(Some(dir.path().join("p.json"))));
        let (dashboard, _driver) = dashboard(store.clone());

        let cycle = dashboard
            .dispatch(DashboardEvent::LanguageChange(DisplayLanguage::En))
            .await;
        assert!(cycle.is_none());
        assert_eq!(dashboard.snapshot().language, DisplayLanguage::En);
        assert_eq!(store.language(), Some(DisplayLanguage::En));
    }

    #[tokio::test]
    async fn test_refresh_without_selection_is_a_no_op() {
        let dir = tempdir().unwrap();
        let store = Arc::new(PreferenceStore::open(Some(dir.path().join("p.json"))));
        let (dashboard, _driver) = dashboard(store);

        assert!(dashboard.dispatch(DashboardEvent::Refresh).await.is_none());
        assert!(dashboard.snapshot().selected.is_none());
    }

    #[tokio::test]
    async fn test_geolocate_failure_leaves_state_untouched() {
        let dir = tempdir().unwrap();
        let store = Arc::new(PreferenceStore::open(Some(dir.path().join("p.json"))));
        let (dashboard, _driver) = dashboard(store);

        let cycle = dashboard.dispatch(DashboardEvent::Geolocate).await;
        assert!(cycle.is_none());

        let state = dashboard.snapshot();
        assert!(state.selected.is_none());
        assert!(!state.is_geolocating);
        assert!(!state.is_loading);
    }
}
