use crate::{Config, Coordinate, WeatherSnapshot, provider::open_meteo::OpenMeteoProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod open_meteo;

/// Source of forecast snapshots for a coordinate.
///
/// Implementations do a single request per call: no retries, no caching.
/// Reuse decisions belong to [`crate::store::SnapshotStore`].
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch(&self, location: Coordinate) -> anyhow::Result<WeatherSnapshot>;
}

/// Construct the forecast provider, honoring a base URL override from config.
pub fn provider_from_config(config: &Config) -> Box<dyn WeatherProvider> {
    Box::new(OpenMeteoProvider::new(config.forecast_url()))
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_body_is_kept() {
        assert_eq!(truncate_body("bad request"), "bad request");
    }

    #[test]
    fn long_body_is_cut_on_char_boundary() {
        let body = "ä".repeat(300);
        let cut = truncate_body(&body);

        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);
    }

    #[tokio::test]
    async fn provider_from_config_uses_override() {
        let server = wiremock::MockServer::start().await;
        let mut cfg = Config::default();
        cfg.forecast_base_url = Some(server.uri());

        let provider = provider_from_config(&cfg);
        // No mock mounted: the mock server answers 404, proving the override was used.
        let err = provider.fetch(Coordinate::new(0.0, 0.0)).await.unwrap_err();
        assert!(err.to_string().contains("404"));
    }
}
