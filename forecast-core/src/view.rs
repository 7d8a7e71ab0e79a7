//! Display-ready view of a snapshot.
//!
//! Derived on demand from the snapshot, the unit preferences and the clock;
//! rebuild it whenever any of those change. The clock is the location's local
//! time, see [`WeatherSnapshot::local_time`].

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::condition::{IconKey, classify_with_icon, icon_key_for};
use crate::freshness::{clock_label, last_updated_label};
use crate::i18n::Strings;
use crate::model::WeatherSnapshot;
use crate::units::{UserUnitPreference, format_precip, format_speed, format_temp};
use crate::window::next_day_window;

/// Index 0 of the daily series is yesterday; 1 is today.
pub const DEFAULT_SELECTED_DAY: usize = 1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherView {
    pub current: CurrentCard,
    pub hourly: Vec<HourlyCard>,
    pub daily: Vec<DailyRow>,
    /// `None` when the selected day is outside the daily series.
    pub details: Option<DetailsCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentCard {
    pub condition: String,
    pub icon: IconKey,
    pub temperature: String,
    pub feels_like: String,
    pub last_updated: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyCard {
    pub label: String,
    pub temperature: String,
    pub icon: IconKey,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRow {
    pub date: NaiveDate,
    pub condition: String,
    pub icon: IconKey,
    pub max_temp: String,
    pub min_temp: String,
    pub rain_chance_pct: u8,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailsCard {
    pub date: NaiveDate,
    pub rain_amount: String,
    pub rain_chance_pct: u8,
    pub humidity_pct: u8,
    pub uv_index: String,
    pub sunrise: String,
    pub sunset: String,
    pub wind_speed: String,
    pub pressure: String,
}

impl WeatherView {
    pub fn build(
        snapshot: &WeatherSnapshot,
        prefs: &UserUnitPreference,
        strings: &dyn Strings,
        now: NaiveDateTime,
        selected_day: usize,
    ) -> Self {
        let current = &snapshot.current;
        let (kind, icon) = classify_with_icon(current.condition_code);
        let current_card = CurrentCard {
            condition: strings.condition(kind).to_string(),
            icon,
            temperature: format_temp(current.temperature_c, prefs),
            feels_like: format_temp(current.feels_like_c, prefs),
            last_updated: last_updated_label(snapshot),
        };

        let hourly = next_day_window(&snapshot.hourly, now)
            .map(|point| HourlyCard {
                label: clock_label(point.time, now, strings),
                temperature: format_temp(point.temperature_c, prefs),
                icon: icon_key_for(point.condition_code),
            })
            .collect();

        let daily = snapshot
            .daily
            .days()
            .enumerate()
            .map(|(i, day)| {
                let (kind, icon) = classify_with_icon(day.condition_code);
                DailyRow {
                    date: day.date,
                    condition: strings.condition(kind).to_string(),
                    icon,
                    max_temp: format_temp(day.max_temp_c, prefs),
                    min_temp: format_temp(day.min_temp_c, prefs),
                    rain_chance_pct: day.rain_chance_pct,
                    selected: i == selected_day,
                }
            })
            .collect();

        let details = snapshot.daily.day(selected_day).map(|day| DetailsCard {
            date: day.date,
            rain_amount: format_precip(day.rain_amount_mm, prefs),
            rain_chance_pct: day.rain_chance_pct,
            humidity_pct: current.humidity_pct,
            uv_index: format!("{:.1}", day.uv_index_max),
            sunrise: clock_label(day.sunrise, now, strings),
            sunset: clock_label(day.sunset, now, strings),
            wind_speed: format_speed(day.wind_speed_max_kmh, prefs),
            pressure: format!("{:.0} hPa", current.pressure_hpa),
        });

        Self { current: current_card, hourly, daily, details }
    }
}
