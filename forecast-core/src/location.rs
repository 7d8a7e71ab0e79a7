//! Resolving where to fetch the forecast for.
//!
//! A location comes either from the device or from a typed city name. Both
//! paths answer `Ok(None)` when no location is available so the caller can
//! fall back (for example, ask for a city); only transport failures are errors.

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::model::Coordinate;
use crate::provider::truncate_body;

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com";

/// A named, resolved location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub country: Option<String>,
    pub coordinate: Coordinate,
}

impl std::fmt::Display for Place {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.country {
            Some(country) => write!(f, "{}, {}", self.name, country),
            None => f.write_str(&self.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationRequest {
    /// The device's own position.
    Device,
    /// A city name typed by the user.
    City(String),
}

#[async_trait]
pub trait LocationResolver: Send + Sync + Debug {
    async fn resolve(&self, request: &LocationRequest) -> Result<Option<Place>>;
}

/// City-name lookup against the Open-Meteo geocoding API.
#[derive(Debug, Clone)]
pub struct CityGeocoder {
    base_url: String,
    language: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    #[serde(default)]
    results: Vec<GeoResult>,
}

#[derive(Debug, Deserialize)]
struct GeoResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
}

impl CityGeocoder {
    pub fn new(base_url: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            language: language.into(),
            http: Client::new(),
        }
    }

    /// Best match for `city`, or `None` for a blank name or no match.
    pub async fn search(&self, city: &str) -> Result<Option<Place>> {
        let city = city.trim();
        if city.is_empty() {
            return Ok(None);
        }

        let url = format!("{}/v1/search", self.base_url);
        let res = self
            .http
            .get(&url)
            .query(&[
                ("name", city),
                ("count", "1"),
                ("language", self.language.as_str()),
                ("format", "json"),
            ])
            .send()
            .await
            .context("Failed to send request to Open-Meteo (geocoding)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read Open-Meteo geocoding response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Open-Meteo geocoding request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: GeoResponse =
            serde_json::from_str(&body).context("Failed to parse Open-Meteo geocoding JSON")?;

        let place = parsed.results.into_iter().next().map(|r| Place {
            name: r.name,
            country: r.country,
            coordinate: Coordinate::new(r.latitude, r.longitude),
        });

        if place.is_none() {
            tracing::debug!(city, "No geocoding match");
        }
        Ok(place)
    }
}

/// Resolves device requests to a fixed, previously saved place and city
/// requests through the geocoder. A desktop has no position sensor, so the
/// saved home location stands in for it.
#[derive(Debug, Clone)]
pub struct Locator {
    geocoder: CityGeocoder,
    device: Option<Place>,
}

impl Locator {
    pub fn new(geocoder: CityGeocoder, device: Option<Place>) -> Self {
        Self { geocoder, device }
    }
}

#[async_trait]
impl LocationResolver for Locator {
    async fn resolve(&self, request: &LocationRequest) -> Result<Option<Place>> {
        match request {
            LocationRequest::Device => {
                if self.device.is_none() {
                    tracing::debug!("Device location unavailable");
                }
                Ok(self.device.clone())
            }
            LocationRequest::City(name) => self.geocoder.search(name).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn tampere() -> serde_json::Value {
        serde_json::json!({
            "results": [{
                "id": 634964,
                "name": "Tampere",
                "latitude": 61.49911,
                "longitude": 23.78712,
                "country": "Finland",
                "admin1": "Pirkanmaa"
            }],
            "generationtime_ms": 0.5
        })
    }

    #[tokio::test]
    async fn search_returns_first_match() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(query_param("name", "Tampere"))
            .and(query_param("count", "1"))
            .and(query_param("language", "fi"))
            .respond_with(ResponseTemplate::new(200).set_body_json(tampere()))
            .mount(&server)
            .await;

        let geocoder = CityGeocoder::new(server.uri(), "fi");
        let place = geocoder.search("  Tampere ").await.unwrap().expect("match");

        assert_eq!(place.name, "Tampere");
        assert_eq!(place.coordinate, Coordinate::new(61.49911, 23.78712));
        assert_eq!(place.to_string(), "Tampere, Finland");
    }

    #[tokio::test]
    async fn search_without_results_is_none() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"generationtime_ms": 0.2})),
            )
            .mount(&server)
            .await;

        let geocoder = CityGeocoder::new(server.uri(), "en");
        assert!(geocoder.search("Atlantis").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn blank_city_is_none_without_request() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let geocoder = CityGeocoder::new(server.uri(), "en");
        assert!(geocoder.search("   ").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn server_error_propagates() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let geocoder = CityGeocoder::new(server.uri(), "en");
        let err = geocoder.search("Oulu").await.unwrap_err();
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn device_request_without_saved_place_is_unavailable() {
        let locator = Locator::new(CityGeocoder::new("http://127.0.0.1:9", "en"), None);
        assert!(locator.resolve(&LocationRequest::Device).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn device_request_uses_saved_place() {
        let home = Place {
            name: "Helsinki".into(),
            country: Some("Finland".into()),
            coordinate: Coordinate::new(60.17, 24.94),
        };
        let geocoder = CityGeocoder::new("http://127.0.0.1:9", "en");
        let locator = Locator::new(geocoder, Some(home.clone()));

        assert_eq!(locator.resolve(&LocationRequest::Device).await.unwrap(), Some(home));
    }
}
