use std::fmt;

use forecast_core::{Place, Strings, WeatherView, i18n::UiLabel};

/// Plain-text rendering of a [`WeatherView`].
pub struct Report<'a> {
    place: &'a Place,
    view: &'a WeatherView,
    strings: &'a dyn Strings,
}

impl<'a> Report<'a> {
    pub fn new(place: &'a Place, view: &'a WeatherView, strings: &'a dyn Strings) -> Self {
        Self { place, view, strings }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.strings;
        let current = &self.view.current;

        writeln!(f, "{}", self.place)?;
        writeln!(
            f,
            "{} {}  {}  ({} {})",
            current.icon.glyph(),
            current.temperature,
            current.condition,
            s.label(UiLabel::FeelsLike),
            current.feels_like,
        )?;
        writeln!(f, "{}: {}", s.label(UiLabel::LastUpdated), current.last_updated)?;

        if !self.view.hourly.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", s.label(UiLabel::HourlyForecast))?;
            for card in &self.view.hourly {
                writeln!(f, "  {:>5}  {}  {:>8}", card.label, card.icon.glyph(), card.temperature)?;
            }
        }

        if !self.view.daily.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", s.label(UiLabel::DailyForecast))?;
            for row in &self.view.daily {
                let marker = if row.selected { '>' } else { ' ' };
                writeln!(
                    f,
                    "{} {}  {}  {:>8} / {:<8} {:>3}%  {}",
                    marker,
                    row.date.format("%a %d.%m."),
                    row.icon.glyph(),
                    row.max_temp,
                    row.min_temp,
                    row.rain_chance_pct,
                    row.condition,
                )?;
            }
        }

        if let Some(details) = &self.view.details {
            writeln!(f)?;
            writeln!(f, "{} {}", s.label(UiLabel::Details), details.date.format("%d.%m.%Y"))?;
            let rows = [
                (UiLabel::RainAmount, details.rain_amount.clone()),
                (UiLabel::RainChance, format!("{}%", details.rain_chance_pct)),
                (UiLabel::Humidity, format!("{}%", details.humidity_pct)),
                (UiLabel::UvIndex, details.uv_index.clone()),
                (UiLabel::WindSpeed, details.wind_speed.clone()),
                (UiLabel::AirPressure, details.pressure.clone()),
                (UiLabel::Sunrise, details.sunrise.clone()),
                (UiLabel::Sunset, details.sunset.clone()),
            ];
            for (label, value) in rows {
                writeln!(f, "  {:<24}{}", s.label(label), value)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forecast_core::{Coordinate, IconKey, Locale, view::CurrentCard};

    fn place() -> Place {
        Place {
            name: "Tampere".into(),
            country: Some("Finland".into()),
            coordinate: Coordinate::new(61.5, 23.75),
        }
    }

    fn bare_view() -> WeatherView {
        WeatherView {
            current: CurrentCard {
                condition: "Snow".into(),
                icon: IconKey::CloudSnow,
                temperature: "-3.0°C".into(),
                feels_like: "-7.5°C".into(),
                last_updated: "10:00".into(),
            },
            hourly: vec![],
            daily: vec![],
            details: None,
        }
    }

    #[test]
    fn renders_header_and_current() {
        let place = place();
        let view = bare_view();
        let out = Report::new(&place, &view, Locale::English.strings()).to_string();

        assert!(out.starts_with("Tampere, Finland\n"));
        assert!(out.contains("-3.0°C  Snow  (Feels like -7.5°C)"));
        assert!(out.contains("Last updated: 10:00"));
        assert!(!out.contains("Hourly forecast"));
    }

    #[test]
    fn labels_follow_locale() {
        let place = place();
        let view = bare_view();
        let out = Report::new(&place, &view, Locale::Finnish.strings()).to_string();

        assert!(out.contains("Päivitetty: 10:00"));
    }
}
