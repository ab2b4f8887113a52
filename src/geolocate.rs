//! Device geolocation capability
//!
//! One-shot "where am I" lookups. The actual position provider is platform
//! glue injected at construction time; the orchestrator only depends on the
//! trait and applies its own timeout around the call.

use crate::models::Coordinates;
use async_trait::async_trait;
use std::time::Duration;

/// Hints passed to the position provider for a single fix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionRequest {
    /// Ask the provider for its most accurate fix
    pub high_accuracy: bool,
    /// How long the provider may take before giving up
    pub timeout: Duration,
    /// Maximum acceptable age of a cached fix; zero forbids cached fixes
    pub maximum_age: Duration,
}

impl Default for PositionRequest {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::ZERO,
        }
    }
}

/// One-shot device position source
#[async_trait]
pub trait PositionSource: Send + Sync {
    /// Current device position. Errors cover denial, unavailability and
    /// provider-side timeouts; the caller treats all of them as "no location".
    async fn current_position(&self, request: &PositionRequest) -> crate::Result<Coordinates>;
}

/// Position source for environments without any location capability
#[derive(Debug, Default)]
pub struct UnsupportedPositionSource;

#[async_trait]
impl PositionSource for UnsupportedPositionSource {
    async fn current_position(&self, _request: &PositionRequest) -> crate::Result<Coordinates> {
        Err(crate::AetheriaError::geolocation(
            "geolocation not supported on this platform",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_request_hints() {
        let request = PositionRequest::default();
        assert!(request.high_accuracy);
        assert_eq!(request.timeout, Duration::from_secs(10));
        assert_eq!(request.maximum_age, Duration::ZERO);
    }

    #[tokio::test]
    async fn test_unsupported_source_always_errors() {
        let source = UnsupportedPositionSource;
        let result = source.current_position(&PositionRequest::default()).await;
        assert!(result.is_err());
    }
}
