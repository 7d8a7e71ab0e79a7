use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;

use crate::model::{Coordinate, WeatherSnapshot};

use super::{WeatherProvider, truncate_body};

pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com";

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,\
precipitation,weather_code,wind_speed_10m,surface_pressure";
const HOURLY_FIELDS: &str = "temperature_2m,apparent_temperature,weather_code";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min,sunrise,sunset,\
uv_index_max,precipitation_sum,precipitation_probability_max,wind_speed_10m_max";
/// One past day keeps the hourly window populated right after midnight.
const PAST_DAYS: &str = "1";
const FORECAST_DAYS: &str = "14";

#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    base_url: String,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }
}

impl Default for OpenMeteoProvider {
    fn default() -> Self {
        Self::new(DEFAULT_FORECAST_URL)
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn fetch(&self, location: Coordinate) -> Result<WeatherSnapshot> {
        let url = format!("{}/v1/forecast", self.base_url);
        tracing::debug!(%location, "Fetching forecast");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("latitude", location.latitude.to_string().as_str()),
                ("longitude", location.longitude.to_string().as_str()),
                ("current", CURRENT_FIELDS),
                ("hourly", HOURLY_FIELDS),
                ("daily", DAILY_FIELDS),
                ("timezone", "auto"),
                ("past_days", PAST_DAYS),
                ("forecast_days", FORECAST_DAYS),
            ])
            .send()
            .await
            .context("Failed to send request to Open-Meteo (forecast)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read Open-Meteo forecast response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Open-Meteo forecast request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let snapshot =
            WeatherSnapshot::from_json(&body).context("Failed to parse Open-Meteo forecast JSON")?;

        tracing::debug!(
            observed = %snapshot.current.timestamp,
            hours = snapshot.hourly.len(),
            days = snapshot.daily.len(),
            "Forecast received"
        );
        Ok(snapshot)
    }
}
