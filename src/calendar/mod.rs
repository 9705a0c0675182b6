//! Calendar domain — the heartbeat of the simulation.
//!
//! Responsible for:
//! - Tracking the global day counter and current season
//! - Rolling a new day's weather
//! - Season rollover every `DAYS_PER_SEASON` days
//!
//! The calendar never mutates plots or the player; the scheduler consumes it.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::shared::{Season, Weather, DAYS_PER_SEASON};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calendar {
    /// Global day counter, starting at 1.
    pub day: u32,
    pub season: Season,
    /// Weather of the current day, rolled at day start.
    pub weather: Weather,
}

impl Default for Calendar {
    fn default() -> Self {
        Self {
            day: 1,
            season: Season::Spring,
            weather: Weather::Sunny,
        }
    }
}

impl Calendar {
    /// Advance to the next day: bump the counter, roll the season over at
    /// each `DAYS_PER_SEASON` boundary, and roll new weather.
    pub fn advance_day(&mut self) {
        self.day += 1;

        if self.day % DAYS_PER_SEASON == 1 {
            let old_season = self.season;
            self.season = self.season.next();
            info!(
                "[Calendar] Season changed: {:?} -> {:?} (day {})",
                old_season, self.season, self.day
            );
        }

        self.weather = roll_weather(self.season);
        info!(
            "[Calendar] Day {} begins — {:?}, weather {:?}",
            self.day, self.season, self.weather
        );
    }

    /// Day offset within the current season, 1-based.
    pub fn day_of_season(&self) -> u32 {
        (self.day - 1) % DAYS_PER_SEASON + 1
    }
}

/// Rolls a weather result for the given season using weighted probabilities.
///
/// Spring:  60% Sunny, 30% Rainy, 10% Stormy
/// Summer:  70% Sunny, 20% Rainy, 10% Stormy
/// Fall:    50% Sunny, 35% Rainy, 15% Stormy
/// Winter:  40% Sunny, 10% Rainy, 10% Stormy, 40% Snowy
pub fn roll_weather(season: Season) -> Weather {
    let mut rng = rand::thread_rng();
    let roll: f32 = rng.gen(); // 0.0 ..< 1.0

    match season {
        Season::Spring => {
            if roll < 0.60 {
                Weather::Sunny
            } else if roll < 0.90 {
                Weather::Rainy
            } else {
                Weather::Stormy
            }
        }
        Season::Summer => {
            if roll < 0.70 {
                Weather::Sunny
            } else if roll < 0.90 {
                Weather::Rainy
            } else {
                Weather::Stormy
            }
        }
        Season::Fall => {
            if roll < 0.50 {
                Weather::Sunny
            } else if roll < 0.85 {
                Weather::Rainy
            } else {
                Weather::Stormy
            }
        }
        Season::Winter => {
            if roll < 0.40 {
                Weather::Sunny
            } else if roll < 0.50 {
                Weather::Rainy
            } else if roll < 0.60 {
                Weather::Stormy
            } else {
                Weather::Snowy
            }
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calendar_default() {
        let cal = Calendar::default();
        assert_eq!(cal.day, 1);
        assert_eq!(cal.season, Season::Spring);
        assert_eq!(cal.day_of_season(), 1);
    }

    #[test]
    fn test_day_advancement_within_season() {
        let mut cal = Calendar::default();
        cal.advance_day();
        assert_eq!(cal.day, 2);
        assert_eq!(cal.season, Season::Spring);
    }

    #[test]
    fn test_season_rolls_over_every_ten_days() {
        let mut cal = Calendar::default();
        for _ in 0..DAYS_PER_SEASON {
            cal.advance_day();
        }
        assert_eq!(cal.day, 11);
        assert_eq!(cal.season, Season::Summer);
        assert_eq!(cal.day_of_season(), 1);
    }

    #[test]
    fn test_full_year_returns_to_spring() {
        let mut cal = Calendar::default();
        for _ in 0..(DAYS_PER_SEASON * 4) {
            cal.advance_day();
        }
        assert_eq!(cal.season, Season::Spring);
        assert_eq!(cal.day, DAYS_PER_SEASON * 4 + 1);
    }

    #[test]
    fn test_weather_roll_spring_distribution() {
        // Run many samples; with high probability all spring weathers appear
        let mut sunny = 0u32;
        let mut rainy = 0u32;
        let mut stormy = 0u32;
        let mut snowy = 0u32;

        for _ in 0..10_000 {
            match roll_weather(Season::Spring) {
                Weather::Sunny => sunny += 1,
                Weather::Rainy => rainy += 1,
                Weather::Stormy => stormy += 1,
                Weather::Snowy => snowy += 1,
            }
        }

        // Spring should never produce snow
        assert_eq!(snowy, 0, "Spring should never produce Snowy weather");
        // Very rough sanity checks (loose tolerances for probabilistic tests)
        assert!(sunny > 5000, "Sunny should be ~60%");
        assert!(rainy > 2000, "Rainy should be ~30%");
        assert!(stormy > 500, "Stormy should be ~10%");
    }

    #[test]
    fn test_weather_roll_winter_has_snow() {
        let mut snowy = 0u32;
        for _ in 0..10_000 {
            if matches!(roll_weather(Season::Winter), Weather::Snowy) {
                snowy += 1;
            }
        }
        assert!(snowy > 3000, "Winter should produce ~40% Snowy weather");
    }

    #[test]
    fn test_summer_no_snow() {
        for _ in 0..5000 {
            let w = roll_weather(Season::Summer);
            assert_ne!(w, Weather::Snowy, "Summer should never produce snow");
        }
    }

    #[test]
    fn test_storms_count_as_rain() {
        assert!(Weather::Rainy.is_rainy());
        assert!(Weather::Stormy.is_rainy());
        assert!(!Weather::Sunny.is_rainy());
        assert!(!Weather::Snowy.is_rainy());
    }
}
