use chrono::{Duration, NaiveDateTime, Timelike};

use crate::i18n::Strings;
use crate::model::WeatherSnapshot;

/// How long a snapshot is reused before a refetch is due, in minutes.
pub const DEFAULT_COOLDOWN_MINUTES: i64 = 15;

const CLOCK_FORMAT: &str = "%H:%M";

pub fn default_cooldown() -> Duration {
    Duration::minutes(DEFAULT_COOLDOWN_MINUTES)
}

/// True once more than `cooldown` has passed since the snapshot's observation time.
/// Exactly `cooldown` is still fresh.
pub fn is_stale(snapshot: &WeatherSnapshot, now: NaiveDateTime, cooldown: Duration) -> bool {
    now > snapshot.current.timestamp + cooldown
}

/// Observation time as `HH:MM`.
pub fn last_updated_label(snapshot: &WeatherSnapshot) -> String {
    snapshot.current.timestamp.format(CLOCK_FORMAT).to_string()
}

/// `HH:MM` for `timestamp`, or the localized "Now" when it falls in the same
/// hour of the day as `now`. Only the hour is compared, not the date or the
/// distance between the two instants.
pub fn clock_label(timestamp: NaiveDateTime, now: NaiveDateTime, strings: &dyn Strings) -> String {
    if timestamp.hour() == now.hour() {
        strings.now().to_string()
    } else {
        timestamp.format(CLOCK_FORMAT).to_string()
    }
}
