//! WMO weather code classification.
//!
//! [`classify`], [`icon_key_for`] and [`classify_with_icon`] all read
//! [`CONDITION_TABLE`], so the display text and the icon for a code can
//! never disagree.
//! See: https://open-meteo.com/en/docs#weathervariables

use serde::{Deserialize, Serialize};

/// Semantic sky/precipitation state for a weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionKind {
    ClearSky,
    PartlyCloudy,
    Fog,
    Drizzle,
    FreezingDrizzle,
    Rain,
    FreezingRain,
    Snow,
    SnowGrains,
    RainShowers,
    SnowShowers,
    Thunderstorm,
    HeavyHail,
    Unknown,
}

impl ConditionKind {
    pub const ALL: [ConditionKind; 14] = [
        Self::ClearSky,
        Self::PartlyCloudy,
        Self::Fog,
        Self::Drizzle,
        Self::FreezingDrizzle,
        Self::Rain,
        Self::FreezingRain,
        Self::Snow,
        Self::SnowGrains,
        Self::RainShowers,
        Self::SnowShowers,
        Self::Thunderstorm,
        Self::HeavyHail,
        Self::Unknown,
    ];

    /// Stable string-resource key for localized condition text.
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::ClearSky => "condition_clear_sky",
            Self::PartlyCloudy => "condition_partly_cloudy",
            Self::Fog => "condition_fog",
            Self::Drizzle => "condition_drizzle",
            Self::FreezingDrizzle => "condition_freezing_drizzle",
            Self::Rain => "condition_rain",
            Self::FreezingRain => "condition_freezing_rain",
            Self::Snow => "condition_snow",
            Self::SnowGrains => "condition_snow_grains",
            Self::RainShowers => "condition_rain_showers",
            Self::SnowShowers => "condition_snow_showers",
            Self::Thunderstorm => "condition_thunderstorm",
            Self::HeavyHail => "condition_heavy_hail",
            Self::Unknown => "condition_unknown",
        }
    }
}

/// Icon identifier for a weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconKey {
    Sun,
    CloudSun,
    CloudFog,
    CloudDrizzle,
    CloudSleet,
    CloudRain,
    CloudSnow,
    SnowGrains,
    CloudSunRain,
    CloudSunSnow,
    CloudLightning,
    CloudHail,
    Unknown,
}

impl IconKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sun => "sun",
            Self::CloudSun => "cloud_sun",
            Self::CloudFog => "cloud_fog",
            Self::CloudDrizzle => "cloud_drizzle",
            Self::CloudSleet => "cloud_sleet",
            Self::CloudRain => "cloud_rain",
            Self::CloudSnow => "cloud_snow",
            Self::SnowGrains => "snow_grains",
            Self::CloudSunRain => "cloud_sun_rain",
            Self::CloudSunSnow => "cloud_sun_snow",
            Self::CloudLightning => "cloud_lightning",
            Self::CloudHail => "cloud_hail",
            Self::Unknown => "unknown",
        }
    }

    /// Terminal symbol for the icon.
    pub fn glyph(&self) -> &'static str {
        // Code points, by Unicode name: BLACK SUN WITH RAYS, SUN BEHIND CLOUD, FOG,
        // CLOUD WITH RAIN, ICE, SNOWFLAKE, SUN BEHIND CLOUD WITH RAIN,
        // CLOUD WITH SNOW, THUNDER CLOUD AND RAIN.
        match self {
            Self::Sun => "\u{2600}",
            Self::CloudSun => "\u{26C5}",
            Self::CloudFog => "\u{1F32B}",
            Self::CloudDrizzle | Self::CloudRain => "\u{1F327}",
            Self::CloudSleet | Self::CloudHail => "\u{1F9CA}",
            Self::CloudSnow | Self::SnowGrains => "\u{2744}",
            Self::CloudSunRain => "\u{1F326}",
            Self::CloudSunSnow => "\u{1F328}",
            Self::CloudLightning => "\u{26C8}",
            Self::Unknown => "?",
        }
    }
}

impl std::fmt::Display for IconKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One inclusive range of weather codes.
#[derive(Debug, Clone, Copy)]
pub struct ConditionRange {
    pub first: i32,
    pub last: i32,
    pub kind: ConditionKind,
    pub icon: IconKey,
}

impl ConditionRange {
    const fn new(first: i32, last: i32, kind: ConditionKind, icon: IconKey) -> Self {
        Self { first, last, kind, icon }
    }

    fn contains(&self, code: i32) -> bool {
        (self.first..=self.last).contains(&code)
    }
}

/// Ranges are inclusive and checked in order; the first match wins.
pub static CONDITION_TABLE: [ConditionRange; 13] = [
    ConditionRange::new(0, 0, ConditionKind::ClearSky, IconKey::Sun),
    ConditionRange::new(1, 3, ConditionKind::PartlyCloudy, IconKey::CloudSun),
    ConditionRange::new(45, 48, ConditionKind::Fog, IconKey::CloudFog),
    ConditionRange::new(51, 55, ConditionKind::Drizzle, IconKey::CloudDrizzle),
    ConditionRange::new(56, 57, ConditionKind::FreezingDrizzle, IconKey::CloudSleet),
    ConditionRange::new(61, 65, ConditionKind::Rain, IconKey::CloudRain),
    ConditionRange::new(66, 67, ConditionKind::FreezingRain, IconKey::CloudSleet),
    ConditionRange::new(71, 75, ConditionKind::Snow, IconKey::CloudSnow),
    ConditionRange::new(77, 77, ConditionKind::SnowGrains, IconKey::SnowGrains),
    ConditionRange::new(80, 82, ConditionKind::RainShowers, IconKey::CloudSunRain),
    ConditionRange::new(85, 86, ConditionKind::SnowShowers, IconKey::CloudSunSnow),
    ConditionRange::new(95, 96, ConditionKind::Thunderstorm, IconKey::CloudLightning),
    ConditionRange::new(99, 99, ConditionKind::HeavyHail, IconKey::CloudHail),
];

fn lookup(code: i32) -> Option<&'static ConditionRange> {
    let entry = CONDITION_TABLE.iter().find(|range| range.contains(code));
    if entry.is_none() {
        tracing::warn!(code, "Unrecognized weather code");
    }
    entry
}

/// Map a raw weather code to its condition. Never fails.
pub fn classify(code: i32) -> ConditionKind {
    lookup(code).map_or(ConditionKind::Unknown, |range| range.kind)
}

/// Map a raw weather code to its icon. Never fails.
pub fn icon_key_for(code: i32) -> IconKey {
    lookup(code).map_or(IconKey::Unknown, |range| range.icon)
}

/// Condition and icon from a single table lookup, so an unknown code is
/// reported once.
pub fn classify_with_icon(code: i32) -> (ConditionKind, IconKey) {
    lookup(code).map_or((ConditionKind::Unknown, IconKey::Unknown), |range| {
        (range.kind, range.icon)
    })
}
