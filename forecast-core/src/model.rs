use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;

/// A geographic point the forecast is fetched for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// One fetched forecast payload for a single location.
///
/// Field layout mirrors the Open-Meteo `/v1/forecast` response: the
/// top-level `current`, `hourly` and `daily` objects, with hourly and
/// daily readings stored as parallel arrays. A snapshot is never edited in
/// place; a refetch produces a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Offset of the location's local time from UTC. All timestamps below are
    /// in that local time.
    #[serde(default)]
    pub utc_offset_seconds: i32,
    pub daily: Daily,
    pub current: Current,
    pub hourly: Hourly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Current {
    /// Observation time in the location's local time. Freshness is measured from here.
    #[serde(rename = "time", with = "wire_time")]
    pub timestamp: NaiveDateTime,
    #[serde(rename = "temperature_2m")]
    pub temperature_c: f64,
    #[serde(rename = "relative_humidity_2m")]
    pub humidity_pct: u8,
    #[serde(rename = "apparent_temperature")]
    pub feels_like_c: f64,
    #[serde(rename = "precipitation")]
    pub precipitation_mm: f64,
    #[serde(rename = "weather_code")]
    pub condition_code: i32,
    #[serde(rename = "wind_speed_10m")]
    pub wind_speed_kmh: f64,
    #[serde(rename = "surface_pressure")]
    pub pressure_hpa: f64,
}

/// Hourly series. One past day plus the forecast days, one entry per hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hourly {
    #[serde(rename = "time", with = "wire_time::seq")]
    pub timestamps: Vec<NaiveDateTime>,
    #[serde(rename = "temperature_2m")]
    pub temperatures_c: Vec<f64>,
    #[serde(rename = "apparent_temperature")]
    pub feels_like_c: Vec<f64>,
    #[serde(rename = "weather_code")]
    pub condition_codes: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Daily {
    #[serde(rename = "time")]
    pub timestamps: Vec<NaiveDate>,
    #[serde(rename = "weather_code")]
    pub condition_codes: Vec<i32>,
    #[serde(rename = "temperature_2m_max")]
    pub max_temps_c: Vec<f64>,
    #[serde(rename = "temperature_2m_min")]
    pub min_temps_c: Vec<f64>,
    #[serde(with = "wire_time::seq")]
    pub sunrise: Vec<NaiveDateTime>,
    #[serde(with = "wire_time::seq")]
    pub sunset: Vec<NaiveDateTime>,
    pub uv_index_max: Vec<f64>,
    #[serde(rename = "precipitation_sum")]
    pub rain_amount_mm: Vec<f64>,
    #[serde(rename = "precipitation_probability_max")]
    pub rain_chance_pct: Vec<u8>,
    #[serde(rename = "wind_speed_10m_max")]
    pub wind_speed_max_kmh: Vec<f64>,
}

/// A single row of the hourly series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyPoint {
    pub time: NaiveDateTime,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub condition_code: i32,
}

/// A single row of the daily series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub condition_code: i32,
    pub max_temp_c: f64,
    pub min_temp_c: f64,
    pub sunrise: NaiveDateTime,
    pub sunset: NaiveDateTime,
    pub uv_index_max: f64,
    pub rain_amount_mm: f64,
    pub rain_chance_pct: u8,
    pub wind_speed_max_kmh: f64,
}

impl WeatherSnapshot {
    /// Parse an Open-Meteo forecast body and check its structural invariants.
    pub fn from_json(body: &str) -> Result<Self, SnapshotError> {
        let snapshot: WeatherSnapshot = serde_json::from_str(body)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// The wall-clock time at the snapshot's location for `utc_now`. Freshness
    /// and windowing must be evaluated against this, not the machine's clock.
    pub fn local_time(&self, utc_now: DateTime<Utc>) -> NaiveDateTime {
        utc_now.naive_utc() + Duration::seconds(i64::from(self.utc_offset_seconds))
    }

    pub fn validate(&self) -> Result<(), SnapshotError> {
        self.current.validate()?;
        self.hourly.validate()?;
        self.daily.validate()
    }
}

impl Current {
    fn validate(&self) -> Result<(), SnapshotError> {
        check_percent("current.relative_humidity_2m", self.humidity_pct)?;
        check_non_negative("current.precipitation", self.precipitation_mm)?;
        check_non_negative("current.wind_speed_10m", self.wind_speed_kmh)
    }
}

impl Hourly {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn point(&self, index: usize) -> Option<HourlyPoint> {
        Some(HourlyPoint {
            time: *self.timestamps.get(index)?,
            temperature_c: *self.temperatures_c.get(index)?,
            feels_like_c: *self.feels_like_c.get(index)?,
            condition_code: *self.condition_codes.get(index)?,
        })
    }

    fn validate(&self) -> Result<(), SnapshotError> {
        let n = self.len();
        check_len("hourly", "temperature_2m", n, self.temperatures_c.len())?;
        check_len("hourly", "apparent_temperature", n, self.feels_like_c.len())?;
        check_len("hourly", "weather_code", n, self.condition_codes.len())?;
        check_increasing("hourly.time", &self.timestamps)
    }
}

impl Daily {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn day(&self, index: usize) -> Option<DailyPoint> {
        Some(DailyPoint {
            date: *self.timestamps.get(index)?,
            condition_code: *self.condition_codes.get(index)?,
            max_temp_c: *self.max_temps_c.get(index)?,
            min_temp_c: *self.min_temps_c.get(index)?,
            sunrise: *self.sunrise.get(index)?,
            sunset: *self.sunset.get(index)?,
            uv_index_max: *self.uv_index_max.get(index)?,
            rain_amount_mm: *self.rain_amount_mm.get(index)?,
            rain_chance_pct: *self.rain_chance_pct.get(index)?,
            wind_speed_max_kmh: *self.wind_speed_max_kmh.get(index)?,
        })
    }

    pub fn days(&self) -> impl Iterator<Item = DailyPoint> + '_ {
        (0..self.len()).map_while(|i| self.day(i))
    }

    fn validate(&self) -> Result<(), SnapshotError> {
        let n = self.len();
        check_len("daily", "weather_code", n, self.condition_codes.len())?;
        check_len("daily", "temperature_2m_max", n, self.max_temps_c.len())?;
        check_len("daily", "temperature_2m_min", n, self.min_temps_c.len())?;
        check_len("daily", "sunrise", n, self.sunrise.len())?;
        check_len("daily", "sunset", n, self.sunset.len())?;
        check_len("daily", "uv_index_max", n, self.uv_index_max.len())?;
        check_len("daily", "precipitation_sum", n, self.rain_amount_mm.len())?;
        check_len("daily", "precipitation_probability_max", n, self.rain_chance_pct.len())?;
        check_len("daily", "wind_speed_10m_max", n, self.wind_speed_max_kmh.len())?;
        check_increasing("daily.time", &self.timestamps)?;

        for &pct in &self.rain_chance_pct {
            check_percent("daily.precipitation_probability_max", pct)?;
        }
        for &mm in &self.rain_amount_mm {
            check_non_negative("daily.precipitation_sum", mm)?;
        }
        for &kmh in &self.wind_speed_max_kmh {
            check_non_negative("daily.wind_speed_10m_max", kmh)?;
        }
        Ok(())
    }
}

fn check_len(
    series: &'static str,
    field: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), SnapshotError> {
    if expected == actual {
        Ok(())
    } else {
        Err(SnapshotError::LengthMismatch { series, field, expected, actual })
    }
}

fn check_increasing<T: PartialOrd>(
    series: &'static str,
    values: &[T],
) -> Result<(), SnapshotError> {
    match values.windows(2).position(|pair| pair[1] <= pair[0]) {
        Some(i) => Err(SnapshotError::NotIncreasing { series, index: i + 1 }),
        None => Ok(()),
    }
}

fn check_percent(field: &'static str, value: u8) -> Result<(), SnapshotError> {
    if value <= 100 {
        Ok(())
    } else {
        Err(SnapshotError::OutOfRange { field, value: f64::from(value) })
    }
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), SnapshotError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(SnapshotError::OutOfRange { field, value })
    }
}

/// Open-Meteo local date-times: `2024-01-01T10:00`, minutes precision.
pub(crate) mod wire_time {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%dT%H:%M";

    pub fn parse(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
        NaiveDateTime::parse_from_str(raw, FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
    }

    pub fn serialize<S: Serializer>(
        value: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(|e| serde::de::Error::custom(format!("invalid timestamp '{raw}': {e}")))
    }

    pub mod seq {
        use chrono::NaiveDateTime;
        use serde::ser::SerializeSeq;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            values: &[NaiveDateTime],
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            let mut seq = serializer.serialize_seq(Some(values.len()))?;
            for value in values {
                seq.serialize_element(&value.format(super::FORMAT).to_string())?;
            }
            seq.end()
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Vec<NaiveDateTime>, D::Error> {
            let raw = Vec::<String>::deserialize(deserializer)?;
            raw.iter()
                .map(|s| {
                    super::parse(s).map_err(|e| {
                        serde::de::Error::custom(format!("invalid timestamp '{s}': {e}"))
                    })
                })
                .collect()
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    use super::*;

    pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, 0))
            .expect("valid test timestamp")
    }

    /// `hours` consecutive hourly points starting at `start`; temperature equals the index.
    pub fn hourly_from(start: NaiveDateTime, hours: usize) -> Hourly {
        let timestamps: Vec<_> = (0..hours).map(|i| start + Duration::hours(i as i64)).collect();
        Hourly {
            temperatures_c: (0..hours).map(|i| i as f64).collect(),
            feels_like_c: (0..hours).map(|i| i as f64 - 1.0).collect(),
            condition_codes: (0..hours).map(|i| if i % 2 == 0 { 0 } else { 61 }).collect(),
            timestamps,
        }
    }

    pub fn daily_from(first: NaiveDate, days: usize) -> Daily {
        let timestamps: Vec<_> = (0..days).map(|i| first + Duration::days(i as i64)).collect();
        let sunrise = timestamps
            .iter()
            .map(|d| d.and_hms_opt(8, 15, 0).expect("valid sunrise"))
            .collect();
        let sunset = timestamps
            .iter()
            .map(|d| d.and_hms_opt(16, 40, 0).expect("valid sunset"))
            .collect();
        Daily {
            condition_codes: vec![3; days],
            max_temps_c: vec![5.0; days],
            min_temps_c: vec![-2.0; days],
            sunrise,
            sunset,
            uv_index_max: vec![1.5; days],
            rain_amount_mm: vec![2.4; days],
            rain_chance_pct: vec![40; days],
            wind_speed_max_kmh: vec![20.0; days],
            timestamps,
        }
    }

    pub fn snapshot_at(observed: NaiveDateTime) -> WeatherSnapshot {
        let day = observed.date();
        WeatherSnapshot {
            utc_offset_seconds: 0,
            current: Current {
                timestamp: observed,
                temperature_c: 1.5,
                humidity_pct: 87,
                feels_like_c: -2.0,
                precipitation_mm: 0.2,
                condition_code: 71,
                wind_speed_kmh: 14.4,
                pressure_hpa: 1003.2,
            },
            hourly: hourly_from(at_midnight(day - Duration::days(1)), 72),
            daily: daily_from(day - Duration::days(1), 3),
        }
    }

    /// Like [`snapshot_at`], for a location `offset_hours` away from UTC.
    pub fn snapshot_with_offset(observed: NaiveDateTime, offset_hours: i32) -> WeatherSnapshot {
        WeatherSnapshot { utc_offset_seconds: offset_hours * 3600, ..snapshot_at(observed) }
    }

    fn at_midnight(day: NaiveDate) -> NaiveDateTime {
        day.and_hms_opt(0, 0, 0).expect("valid midnight")
    }

    pub const SAMPLE_BODY: &str = r#"{
        "latitude": 61.5,
        "longitude": 23.75,
        "timezone": "Europe/Helsinki",
        "utc_offset_seconds": 7200,
        "current_units": { "temperature_2m": "°C" },
        "current": {
            "time": "2024-01-01T10:00",
            "interval": 900,
            "temperature_2m": -4.2,
            "relative_humidity_2m": 91,
            "apparent_temperature": -8.9,
            "precipitation": 0.0,
            "weather_code": 3,
            "wind_speed_10m": 11.2,
            "surface_pressure": 1012.4
        },
        "hourly": {
            "time": ["2024-01-01T09:00", "2024-01-01T10:00", "2024-01-01T11:00"],
            "temperature_2m": [-4.5, -4.2, -3.9],
            "apparent_temperature": [-9.1, -8.9, -8.4],
            "weather_code": [2, 3, 71]
        },
        "daily": {
            "time": ["2024-01-01", "2024-01-02"],
            "weather_code": [3, 73],
            "temperature_2m_max": [-2.1, -0.5],
            "temperature_2m_min": [-9.0, -6.3],
            "sunrise": ["2024-01-01T09:24", "2024-01-02T09:23"],
            "sunset": ["2024-01-01T15:20", "2024-01-02T15:22"],
            "uv_index_max": [0.1, 0.2],
            "precipitation_sum": [0.0, 3.1],
            "precipitation_probability_max": [5, 80],
            "wind_speed_10m_max": [15.3, 22.7]
        }
    }"#;
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn parses_open_meteo_payload() {
        let snapshot = WeatherSnapshot::from_json(SAMPLE_BODY).expect("sample should parse");

        assert_eq!(snapshot.current.timestamp, at(2024, 1, 1, 10, 0));
        assert_eq!(snapshot.current.humidity_pct, 91);
        assert_eq!(snapshot.current.condition_code, 3);
        assert_eq!(snapshot.utc_offset_seconds, 7200);
        assert_eq!(snapshot.hourly.len(), 3);
        assert_eq!(snapshot.hourly.condition_codes, vec![2, 3, 71]);

        let tomorrow = snapshot.daily.day(1).expect("second day present");
        assert_eq!(tomorrow.date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(tomorrow.rain_chance_pct, 80);
        assert_eq!(tomorrow.sunset, at(2024, 1, 2, 15, 22));
        assert!(snapshot.daily.day(2).is_none());
    }

    #[test]
    fn malformed_timestamp_fails_fast() {
        let body = SAMPLE_BODY.replace("\"time\": \"2024-01-01T10:00\"", "\"time\": \"yesterday\"");
        let err = WeatherSnapshot::from_json(&body).unwrap_err();

        assert!(matches!(err, SnapshotError::Json(_)));
        assert!(err.to_string().contains("invalid timestamp 'yesterday'"));
    }

    #[test]
    fn mismatched_hourly_lengths_are_rejected() {
        let mut snapshot = snapshot_at(at(2024, 1, 1, 10, 0));
        snapshot.hourly.temperatures_c.pop();

        let err = snapshot.validate().unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::LengthMismatch { series: "hourly", field: "temperature_2m", .. }
        ));
    }

    #[test]
    fn mismatched_daily_lengths_are_rejected() {
        let mut snapshot = snapshot_at(at(2024, 1, 1, 10, 0));
        snapshot.daily.sunset.pop();

        let err = snapshot.validate().unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::LengthMismatch { series: "daily", field: "sunset", .. }
        ));
    }

    #[test]
    fn repeated_timestamp_is_rejected() {
        let mut snapshot = snapshot_at(at(2024, 1, 1, 10, 0));
        snapshot.hourly.timestamps[5] = snapshot.hourly.timestamps[4];

        let err = snapshot.validate().unwrap_err();
        assert!(matches!(err, SnapshotError::NotIncreasing { series: "hourly.time", index: 5 }));
    }

    #[test]
    fn humidity_above_hundred_is_rejected() {
        let mut snapshot = snapshot_at(at(2024, 1, 1, 10, 0));
        snapshot.current.humidity_pct = 140;

        assert!(matches!(snapshot.validate(), Err(SnapshotError::OutOfRange { .. })));
    }

    #[test]
    fn serialized_snapshot_reads_back_identically() {
        let snapshot = WeatherSnapshot::from_json(SAMPLE_BODY).unwrap();
        let json = serde_json::to_string(&snapshot).unwrap();

        assert!(json.contains("\"time\":\"2024-01-01T10:00\""));
        assert_eq!(WeatherSnapshot::from_json(&json).unwrap(), snapshot);
    }

    #[test]
    fn missing_utc_offset_defaults_to_zero() {
        let body = SAMPLE_BODY.replace("\"utc_offset_seconds\": 7200,", "");
        let snapshot = WeatherSnapshot::from_json(&body).unwrap();

        assert_eq!(snapshot.utc_offset_seconds, 0);
    }

    #[test]
    fn local_time_applies_location_offset() {
        let utc_now = at(2024, 1, 1, 8, 30).and_utc();

        let tokyo = snapshot_with_offset(at(2024, 1, 1, 17, 0), 9);
        assert_eq!(tokyo.local_time(utc_now), at(2024, 1, 1, 17, 30));

        let honolulu = snapshot_with_offset(at(2023, 12, 31, 22, 0), -10);
        assert_eq!(honolulu.local_time(utc_now), at(2023, 12, 31, 22, 30));
    }

    #[test]
    fn hourly_point_reads_parallel_arrays() {
        let hourly = hourly_from(at(2024, 1, 1, 0, 0), 4);
        let point = hourly.point(2).unwrap();

        assert_eq!(point.time, at(2024, 1, 1, 2, 0));
        assert_eq!(point.temperature_c, 2.0);
        assert_eq!(point.condition_code, 0);
        assert!(hourly.point(4).is_none());
    }
}
