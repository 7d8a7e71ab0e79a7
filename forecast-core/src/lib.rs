//! Core library for the `forecast` weather app.
//!
//! This crate defines:
//! - The forecast snapshot model, mirroring the Open-Meteo payload
//! - Weather code classification into conditions and icons
//! - Freshness checks, the next-24-hours window and unit conversion
//! - Collaborators around them: forecast fetch, location lookup,
//!   persisted preferences and the single-snapshot store
//!
//! The domain functions are pure; I/O lives in `provider`, `location`,
//! `config` and `store`.

pub mod condition;
pub mod config;
pub mod error;
pub mod freshness;
pub mod i18n;
pub mod location;
pub mod model;
pub mod provider;
pub mod store;
pub mod units;
pub mod view;
pub mod window;

pub use condition::{ConditionKind, IconKey, classify, classify_with_icon, icon_key_for};
pub use config::Config;
pub use error::SnapshotError;
pub use freshness::{clock_label, default_cooldown, is_stale, last_updated_label};
pub use i18n::{Locale, Strings};
pub use location::{CityGeocoder, LocationRequest, LocationResolver, Locator, Place};
pub use model::{Coordinate, HourlyPoint, WeatherSnapshot};
pub use provider::{WeatherProvider, provider_from_config};
pub use store::{SnapshotCache, SnapshotStore};
pub use units::{UserUnitPreference, to_display_precip, to_display_speed, to_display_temp};
pub use view::WeatherView;
pub use window::next_day_window;
