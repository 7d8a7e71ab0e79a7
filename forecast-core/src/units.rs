use serde::{Deserialize, Serialize};

use crate::i18n::Locale;

const MPH_PER_KMH: f64 = 0.621371;
const INCHES_PER_MM: f64 = 0.0393701;

/// Display units and language chosen by the user.
///
/// Loaded once from the config file at startup and passed explicitly to
/// every conversion and formatting call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct UserUnitPreference {
    pub use_fahrenheit: bool,
    pub use_miles: bool,
    pub use_inches: bool,
    pub locale: Locale,
}

pub fn to_display_temp(celsius: f64, prefs: &UserUnitPreference) -> (f64, &'static str) {
    if prefs.use_fahrenheit {
        (celsius * 9.0 / 5.0 + 32.0, "°F")
    } else {
        (celsius, "°C")
    }
}

pub fn to_display_speed(kmh: f64, prefs: &UserUnitPreference) -> (f64, &'static str) {
    if prefs.use_miles {
        (kmh * MPH_PER_KMH, "mph")
    } else {
        (kmh, "km/h")
    }
}

pub fn to_display_precip(mm: f64, prefs: &UserUnitPreference) -> (f64, &'static str) {
    if prefs.use_inches {
        (mm * INCHES_PER_MM, "in")
    } else {
        (mm, "mm")
    }
}

/// Temperature rounded to one decimal, e.g. `-3.5°C`.
pub fn format_temp(celsius: f64, prefs: &UserUnitPreference) -> String {
    let (value, unit) = to_display_temp(celsius, prefs);
    format!("{value:.1}{unit}")
}

pub fn format_speed(kmh: f64, prefs: &UserUnitPreference) -> String {
    let (value, unit) = to_display_speed(kmh, prefs);
    format!("{value:.1} {unit}")
}

/// Inches get two decimals since typical amounts are well below one inch.
pub fn format_precip(mm: f64, prefs: &UserUnitPreference) -> String {
    let (value, unit) = to_display_precip(mm, prefs);
    if prefs.use_inches {
        format!("{value:.2} {unit}")
    } else {
        format!("{value:.1} {unit}")
    }
}
