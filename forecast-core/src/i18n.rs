//! Localized display strings.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::condition::ConditionKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "fi")]
    Finnish,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::Finnish => "fi",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Locale::English => "English",
            Locale::Finnish => "Suomi",
        }
    }

    pub const fn all() -> &'static [Locale] {
        &[Locale::English, Locale::Finnish]
    }

    pub fn strings(&self) -> &'static dyn Strings {
        match self {
            Locale::English => &ENGLISH,
            Locale::Finnish => &FINNISH,
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "en" | "english" => Ok(Locale::English),
            "fi" | "finnish" | "suomi" => Ok(Locale::Finnish),
            _ => Err(anyhow::anyhow!("Unknown language '{value}'. Supported languages: en, fi.")),
        }
    }
}

/// Fixed labels used by the weather view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiLabel {
    FeelsLike,
    LastUpdated,
    HourlyForecast,
    DailyForecast,
    Details,
    RainAmount,
    RainChance,
    Humidity,
    UvIndex,
    Sunrise,
    Sunset,
    WindSpeed,
    AirPressure,
}

/// Text lookup for one locale.
pub trait Strings: Send + Sync {
    fn condition(&self, kind: ConditionKind) -> &str;
    /// Sentinel shown instead of a clock time for the current hour.
    fn now(&self) -> &str;
    fn label(&self, label: UiLabel) -> &str;
}

struct English;
struct Finnish;

static ENGLISH: English = English;
static FINNISH: Finnish = Finnish;

impl Strings for English {
    fn condition(&self, kind: ConditionKind) -> &str {
        match kind {
            ConditionKind::ClearSky => "Clear sky",
            ConditionKind::PartlyCloudy => "Partly cloudy",
            ConditionKind::Fog => "Fog",
            ConditionKind::Drizzle => "Drizzle",
            ConditionKind::FreezingDrizzle => "Freezing drizzle",
            ConditionKind::Rain => "Rain",
            ConditionKind::FreezingRain => "Freezing rain",
            ConditionKind::Snow => "Snow",
            ConditionKind::SnowGrains => "Snow grains",
            ConditionKind::RainShowers => "Rain showers",
            ConditionKind::SnowShowers => "Snow showers",
            ConditionKind::Thunderstorm => "Thunderstorm",
            ConditionKind::HeavyHail => "Heavy hail",
            ConditionKind::Unknown => "Unknown",
        }
    }

    fn now(&self) -> &str {
        "Now"
    }

    fn label(&self, label: UiLabel) -> &str {
        match label {
            UiLabel::FeelsLike => "Feels like",
            UiLabel::LastUpdated => "Last updated",
            UiLabel::HourlyForecast => "Hourly forecast",
            UiLabel::DailyForecast => "Daily forecast",
            UiLabel::Details => "Details",
            UiLabel::RainAmount => "Rain amount",
            UiLabel::RainChance => "Chance of rain",
            UiLabel::Humidity => "Humidity",
            UiLabel::UvIndex => "UV index",
            UiLabel::Sunrise => "Sunrise",
            UiLabel::Sunset => "Sunset",
            UiLabel::WindSpeed => "Wind speed",
            UiLabel::AirPressure => "Air pressure",
        }
    }
}

impl Strings for Finnish {
    fn condition(&self, kind: ConditionKind) -> &str {
        match kind {
            ConditionKind::ClearSky => "Selkeää",
            ConditionKind::PartlyCloudy => "Puolipilvistä",
            ConditionKind::Fog => "Sumua",
            ConditionKind::Drizzle => "Tihkusadetta",
            ConditionKind::FreezingDrizzle => "Jäätävää tihkua",
            ConditionKind::Rain => "Sadetta",
            ConditionKind::FreezingRain => "Jäätävää sadetta",
            ConditionKind::Snow => "Lumisadetta",
            ConditionKind::SnowGrains => "Lumijyväsiä",
            ConditionKind::RainShowers => "Sadekuuroja",
            ConditionKind::SnowShowers => "Lumikuuroja",
            ConditionKind::Thunderstorm => "Ukkosta",
            ConditionKind::HeavyHail => "Voimakasta raekuuroa",
            ConditionKind::Unknown => "Tuntematon",
        }
    }

    fn now(&self) -> &str {
        "Nyt"
    }

    fn label(&self, label: UiLabel) -> &str {
        match label {
            UiLabel::FeelsLike => "Tuntuu kuin",
            UiLabel::LastUpdated => "Päivitetty",
            UiLabel::HourlyForecast => "Tuntiennuste",
            UiLabel::DailyForecast => "Päiväennuste",
            UiLabel::Details => "Lisätiedot",
            UiLabel::RainAmount => "Sademäärä",
            UiLabel::RainChance => "Sateen todennäköisyys",
            UiLabel::Humidity => "Kosteus",
            UiLabel::UvIndex => "UV-indeksi",
            UiLabel::Sunrise => "Auringonnousu",
            UiLabel::Sunset => "Auringonlasku",
            UiLabel::WindSpeed => "Tuulen nopeus",
            UiLabel::AirPressure => "Ilmanpaine",
        }
    }
}
