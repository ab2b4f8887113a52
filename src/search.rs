//! Debounced city search
//!
//! Keystrokes restart a fixed quiescence window before the geocoding service
//! is queried, so fast typing produces a single request. Cancelling the stale
//! timer is the only cancellation primitive in the crate.

use crate::geocode::ForwardGeocoder;
use crate::models::{DisplayLanguage, PlaceCandidate};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Debouncer between the search box and the forward geocoder. Result batches
/// are delivered on the channel returned by [`SearchDebouncer::new`]; a batch
/// replaces whatever the UI showed before.
pub struct SearchDebouncer {
    geocoder: Arc<dyn ForwardGeocoder>,
    window: Duration,
    results: mpsc::UnboundedSender<Vec<PlaceCandidate>>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl SearchDebouncer {
    /// Create a debouncer with the given quiescence window and the receiver
    /// for candidate batches
    pub fn new(
        geocoder: Arc<dyn ForwardGeocoder>,
        window: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<Vec<PlaceCandidate>>) {
        let (results, receiver) = mpsc::unbounded_channel();
        (
            Self {
                geocoder,
                window,
                results,
                pending: Mutex::new(None),
            },
            receiver,
        )
    }

    /// Feed the current content of the search box. Cancels any pending probe
    /// and restarts the quiescence window. An empty query clears the
    /// candidate list immediately without touching the network.
    pub fn input(&self, query: &str, lang: DisplayLanguage) {
        if let Ok(mut pending) = self.pending.lock() {
            if let Some(stale) = pending.take() {
                stale.abort();
            }
        }

        if query.is_empty() {
            let _ = self.results.send(Vec::new());
            return;
        }

        let geocoder = Arc::clone(&self.geocoder);
        let results = self.results.clone();
        let window = self.window;
        let query = query.to_string();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(window).await;
            debug!("Search window settled, querying candidates for '{query}'");
            let candidates = geocoder.search(&query, lang).await;
            let _ = results.send(candidates);
        });

        if let Ok(mut pending) = self.pending.lock() {
            *pending = Some(handle);
        }
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        if let Ok(mut pending) = self.pending.lock() {
            if let Some(stale) = pending.take() {
                stale.abort();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct RecordingGeocoder {
        queries: Mutex<Vec<String>>,
    }

    impl RecordingGeocoder {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                queries: Mutex::new(Vec::new()),
            })
        }

        fn queries(&self) -> Vec<String> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ForwardGeocoder for RecordingGeocoder {
        async fn search(&self, query: &str, _lang: DisplayLanguage) -> Vec<PlaceCandidate> {
            self.queries.lock().unwrap().push(query.to_string());
            vec![PlaceCandidate {
                id: 1,
                name: query.to_string(),
                latitude: 0.0,
                longitude: 0.0,
                country: String::new(),
                region: String::new(),
            }]
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_keystrokes_collapse_to_one_request() {
        let geocoder = RecordingGeocoder::new();
        let (debouncer, mut results) =
            SearchDebouncer::new(geocoder.clone(), Duration::from_millis(300));

        // No awaits between keystrokes: each input cancels the previous probe
        debouncer.input("p", DisplayLanguage::Fr);
        debouncer.input("pa", DisplayLanguage::Fr);
        debouncer.input("par", DisplayLanguage::Fr);

        let batch = results.recv().await.unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].name, "par");
        assert_eq!(geocoder.queries(), vec!["par".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_query_clears_without_network() {
        let geocoder = RecordingGeocoder::new();
        let (debouncer, mut results) =
            SearchDebouncer::new(geocoder.clone(), Duration::from_millis(300));

        debouncer.input("", DisplayLanguage::Fr);

        let batch = results.recv().await.unwrap();
        assert!(batch.is_empty());
        assert!(geocoder.queries().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_settled_queries_each_fire() {
        let geocoder = RecordingGeocoder::new();
        let (debouncer, mut results) =
            SearchDebouncer::new(geocoder.clone(), Duration::from_millis(300));

        debouncer.input("paris", DisplayLanguage::Fr);
        let first = results.recv().await.unwrap();
        assert_eq!(first[0].name, "paris");

        debouncer.input("lyon", DisplayLanguage::Fr);
        let second = results.recv().await.unwrap();
        assert_eq!(second[0].name, "lyon");

        assert_eq!(geocoder.queries().len(), 2);
    }
}
