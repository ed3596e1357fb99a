//! # Theme Selection
//!
//! Picks one [`ThemeLabel`] from the wall-clock time, the moon phase and the
//! weather. Rules are tried in a fixed order and the first match wins:
//!
//! ```text
//! 06:00-07:59             -> morning
//! 18:00-19:59             -> evening
//! moon phase ~ "full"     -> full-moon
//! temp > 30°C             -> heat-wave
//! temp < 0°C              -> cold-wave
//! condition ~ rain|storm  -> rainy-day
//! otherwise               -> season of the month
//! ```
//!
//! Missing weather or astronomy data skips that tier. Selection is pure: the
//! caller supplies the time, which keeps every branch testable.

use crate::conditions::{AstroSnapshot, WeatherSnapshot};
use crate::theme::ThemeLabel;
use chrono::{Datelike, NaiveDateTime, Timelike};
use log::debug;
use std::fmt;

const MORNING_HOURS: std::ops::Range<u32> = 6..8;
const EVENING_HOURS: std::ops::Range<u32> = 18..20;
const HEAT_WAVE_ABOVE: f64 = 30.0;
const COLD_WAVE_BELOW: f64 = 0.0;

/// Which rule tier produced a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    TimeOfDay,
    MoonPhase,
    Weather,
    Season,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Rule::TimeOfDay => "time of day",
            Rule::MoonPhase => "moon phase",
            Rule::Weather => "weather",
            Rule::Season => "season",
        })
    }
}

/// A chosen theme and the rule that chose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub theme: ThemeLabel,
    pub rule: Rule,
}

impl Selection {
    const fn new(theme: ThemeLabel, rule: Rule) -> Self {
        Self { theme, rule }
    }
}

/// Choose the theme for `now`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use skymuse::selector::select_theme;
/// use skymuse::theme::ThemeLabel;
///
/// let noon_in_july = NaiveDate::from_ymd_opt(2026, 7, 14)
///     .unwrap()
///     .and_hms_opt(12, 0, 0)
///     .unwrap();
/// assert_eq!(select_theme(noon_in_july, None, None), ThemeLabel::Summer);
/// ```
#[must_use]
pub fn select_theme(
    now: NaiveDateTime,
    weather: Option<&WeatherSnapshot>,
    astro: Option<&AstroSnapshot>,
) -> ThemeLabel {
    select(now, weather, astro).theme
}

/// Like [`select_theme`], also reporting which rule matched.
#[must_use]
pub fn select(
    now: NaiveDateTime,
    weather: Option<&WeatherSnapshot>,
    astro: Option<&AstroSnapshot>,
) -> Selection {
    let selection = by_time_of_day(now.hour())
        .or_else(|| astro.and_then(by_moon_phase))
        .or_else(|| weather.and_then(by_weather))
        .unwrap_or_else(|| Selection::new(season_for_month(now.month()), Rule::Season));

    debug!(
        "Selected {} by {} (hour {}, month {})",
        selection.theme,
        selection.rule,
        now.hour(),
        now.month()
    );
    selection
}

/// Season for a calendar month. Anything outside March-November is winter.
#[must_use]
pub const fn season_for_month(month: u32) -> ThemeLabel {
    match month {
        3..=5 => ThemeLabel::Spring,
        6..=8 => ThemeLabel::Summer,
        9..=11 => ThemeLabel::Autumn,
        _ => ThemeLabel::Winter,
    }
}

fn by_time_of_day(hour: u32) -> Option<Selection> {
    match hour {
        h if MORNING_HOURS.contains(&h) => Some(Selection::new(ThemeLabel::Morning, Rule::TimeOfDay)),
        h if EVENING_HOURS.contains(&h) => Some(Selection::new(ThemeLabel::Evening, Rule::TimeOfDay)),
        _ => None,
    }
}

fn by_moon_phase(astro: &AstroSnapshot) -> Option<Selection> {
    astro
        .moon_phase
        .to_lowercase()
        .contains("full")
        .then_some(Selection::new(ThemeLabel::FullMoon, Rule::MoonPhase))
}

fn by_weather(weather: &WeatherSnapshot) -> Option<Selection> {
    let condition = weather.condition_main.to_lowercase();
    let theme = if weather.temperature_celsius > HEAT_WAVE_ABOVE {
        ThemeLabel::HeatWave
    } else if weather.temperature_celsius < COLD_WAVE_BELOW {
        ThemeLabel::ColdWave
    } else if condition.contains("rain") || condition.contains("storm") {
        ThemeLabel::RainyDay
    } else {
        return None;
    };
    Some(Selection::new(theme, Rule::Weather))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(month: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, month, 15)
            .unwrap()
            .and_hms_opt(hour, 30, 0)
            .unwrap()
    }

    fn weather(temp: f64, condition: &str) -> WeatherSnapshot {
        WeatherSnapshot {
            temperature_celsius: temp,
            condition_main: condition.to_string(),
        }
    }

    fn moon(phase: &str) -> AstroSnapshot {
        AstroSnapshot {
            moon_phase: phase.to_string(),
        }
    }

    #[test]
    fn test_morning_wins_over_everything() {
        let hot = weather(40.0, "Thunderstorm");
        let full = moon("FULL_MOON");
        for hour in 6..8 {
            assert_eq!(select_theme(at(7, hour), Some(&hot), Some(&full)), ThemeLabel::Morning);
            assert_eq!(select_theme(at(1, hour), None, None), ThemeLabel::Morning);
        }
    }

    #[test]
    fn test_evening_wins_over_everything() {
        let cold = weather(-12.0, "Snow");
        let full = moon("full moon");
        for hour in 18..20 {
            assert_eq!(select_theme(at(12, hour), Some(&cold), Some(&full)), ThemeLabel::Evening);
            assert_eq!(select_theme(at(4, hour), None, None), ThemeLabel::Evening);
        }
    }

    #[test]
    fn test_window_edges_are_half_open() {
        assert_eq!(select_theme(at(7, 5), None, None), ThemeLabel::Summer);
        assert_eq!(select_theme(at(7, 8), None, None), ThemeLabel::Summer);
        assert_eq!(select_theme(at(7, 17), None, None), ThemeLabel::Summer);
        assert_eq!(select_theme(at(7, 20), None, None), ThemeLabel::Summer);
    }

    #[test]
    fn test_full_moon_is_case_insensitive() {
        for phase in ["FULL_MOON", "Full Moon", "fullmoon"] {
            let selection = select(at(3, 23), Some(&weather(35.0, "Clear")), Some(&moon(phase)));
            assert_eq!(selection, Selection::new(ThemeLabel::FullMoon, Rule::MoonPhase));
        }
    }

    #[test]
    fn test_weather_tier() {
        let new_moon = moon("NEW_MOON");
        assert_eq!(select_theme(at(5, 12), Some(&weather(35.0, "Clear")), Some(&new_moon)), ThemeLabel::HeatWave);
        assert_eq!(select_theme(at(5, 12), Some(&weather(-5.0, "Clear")), Some(&new_moon)), ThemeLabel::ColdWave);
        assert_eq!(select_theme(at(5, 12), Some(&weather(15.0, "Thunderstorm")), Some(&new_moon)), ThemeLabel::RainyDay);
        assert_eq!(select_theme(at(5, 12), Some(&weather(15.0, "rain")), None), ThemeLabel::RainyDay);
    }

    #[test]
    fn test_temperature_thresholds_are_strict() {
        assert_eq!(select_theme(at(5, 12), Some(&weather(30.0, "Clear")), None), ThemeLabel::Spring);
        assert_eq!(select_theme(at(5, 12), Some(&weather(0.0, "Clear")), None), ThemeLabel::Spring);
    }

    #[test]
    fn test_temperature_checked_before_condition() {
        assert_eq!(select_theme(at(9, 14), Some(&weather(31.0, "Rain")), None), ThemeLabel::HeatWave);
        assert_eq!(select_theme(at(9, 14), Some(&weather(-1.0, "Rain")), None), ThemeLabel::ColdWave);
    }

    #[test]
    fn test_mild_weather_falls_through_to_season() {
        let selection = select(at(10, 14), Some(&weather(12.0, "Clouds")), Some(&moon("WANING_GIBBOUS")));
        assert_eq!(selection, Selection::new(ThemeLabel::Autumn, Rule::Season));
    }

    #[test]
    fn test_no_data_uses_season() {
        assert_eq!(select_theme(at(7, 12), None, None), ThemeLabel::Summer);
        assert_eq!(select_theme(at(1, 12), None, None), ThemeLabel::Winter);
    }

    #[test]
    fn test_season_for_month_partitions_the_year() {
        let seasons: Vec<ThemeLabel> = (1..=12).map(season_for_month).collect();
        assert_eq!(
            seasons,
            vec![
                ThemeLabel::Winter,
                ThemeLabel::Winter,
                ThemeLabel::Spring,
                ThemeLabel::Spring,
                ThemeLabel::Spring,
                ThemeLabel::Summer,
                ThemeLabel::Summer,
                ThemeLabel::Summer,
                ThemeLabel::Autumn,
                ThemeLabel::Autumn,
                ThemeLabel::Autumn,
                ThemeLabel::Winter,
            ]
        );
        for season in [ThemeLabel::Spring, ThemeLabel::Summer, ThemeLabel::Autumn, ThemeLabel::Winter] {
            assert_eq!(seasons.iter().filter(|s| **s == season).count(), 3);
        }
    }

    #[test]
    fn test_every_hour_yields_a_theme_without_data() {
        for month in 1..=12 {
            for hour in 0..24 {
                let theme = select_theme(at(month, hour), None, None);
                assert!(ThemeLabel::ALL.contains(&theme));
            }
        }
    }
}
