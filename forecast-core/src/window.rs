use chrono::{Duration, NaiveDateTime};

use crate::model::{Hourly, HourlyPoint};

/// Lazy view over the hourly points strictly between `now - 1h` and
/// `now - 1h + 24h`, in series order. Cloning restarts iteration.
#[derive(Debug, Clone)]
pub struct NextDayWindow<'a> {
    hourly: &'a Hourly,
    start: NaiveDateTime,
    end: NaiveDateTime,
    index: usize,
}

impl NextDayWindow<'_> {
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }
}

pub fn next_day_window(hourly: &Hourly, now: NaiveDateTime) -> NextDayWindow<'_> {
    let start = now - Duration::hours(1);
    NextDayWindow {
        hourly,
        start,
        end: start + Duration::hours(24),
        index: 0,
    }
}

impl Iterator for NextDayWindow<'_> {
    type Item = HourlyPoint;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(point) = self.hourly.point(self.index) {
            self.index += 1;
            if point.time >= self.end {
                // Timestamps are increasing, nothing later can qualify.
                self.index = self.hourly.len();
                return None;
            }
            if point.time > self.start {
                return Some(point);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.hourly.len().saturating_sub(self.index)))
    }
}

impl std::iter::FusedIterator for NextDayWindow<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{at, hourly_from};

    #[test]
    fn yields_twenty_four_points_around_now() {
        let now = at(2024, 1, 1, 10, 30);
        let hourly = hourly_from(at(2024, 1, 1, 5, 0), 48);

        let window: Vec<_> = next_day_window(&hourly, now).collect();

        assert_eq!(window.len(), 24);
        assert_eq!(window[0].time, at(2024, 1, 1, 10, 0));
        assert_eq!(window[23].time, at(2024, 1, 2, 9, 0));
        // Temperatures in the fixture equal the source index: 10:00 is index 5.
        let temps: Vec<_> = window.iter().map(|p| p.temperature_c).collect();
        let expected: Vec<_> = (5..29).map(|i| i as f64).collect();
        assert_eq!(temps, expected);
    }

    #[test]
    fn both_bounds_are_exclusive() {
        let now = at(2024, 1, 1, 10, 0);
        let hourly = hourly_from(at(2024, 1, 1, 5, 0), 48);

        let window: Vec<_> = next_day_window(&hourly, now).collect();

        // 09:00 (start) and next-day 09:00 (end) are both excluded.
        assert_eq!(window.len(), 23);
        assert_eq!(window.first().map(|p| p.time), Some(at(2024, 1, 1, 10, 0)));
        assert_eq!(window.last().map(|p| p.time), Some(at(2024, 1, 2, 8, 0)));
    }

    #[test]
    fn series_entirely_in_the_past_is_empty() {
        let now = at(2024, 1, 3, 12, 0);
        let hourly = hourly_from(at(2024, 1, 1, 0, 0), 24);

        assert_eq!(next_day_window(&hourly, now).count(), 0);
    }

    #[test]
    fn series_entirely_in_the_future_is_empty() {
        let now = at(2024, 1, 1, 0, 0);
        let hourly = hourly_from(at(2024, 1, 5, 0, 0), 24);

        assert!(next_day_window(&hourly, now).next().is_none());
    }

    #[test]
    fn clone_restarts_and_input_is_untouched() {
        let now = at(2024, 1, 1, 10, 30);
        let hourly = hourly_from(at(2024, 1, 1, 5, 0), 48);
        let before = hourly.clone();

        let window = next_day_window(&hourly, now);
        let first: Vec<_> = window.clone().collect();
        let second: Vec<_> = window.collect();

        assert_eq!(first, second);
        assert_eq!(hourly, before);
    }

    #[test]
    fn empty_series_is_empty() {
        let hourly = hourly_from(at(2024, 1, 1, 0, 0), 0);
        assert_eq!(next_day_window(&hourly, at(2024, 1, 1, 0, 0)).count(), 0);
    }
}
