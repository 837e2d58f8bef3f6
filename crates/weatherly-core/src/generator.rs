//! Mock weather generation.
//!
//! [`WeatherGenerator`] turns a [`SearchQuery`] into a [`QueryResult`] using
//! an injected random source and weekday formatter. Everything is drawn in
//! metric units and converted as the last step, so two generators fed the
//! same seed produce the same weather in either unit system.
//!
//! # Draw order
//!
//! For reproducibility with a seeded random source, samples are drawn in a
//! fixed order:
//!
//! 1. current profile (only without a condition filter)
//! 2. current temperature, low offset, high offset, wind, humidity
//! 3. per forecast day: profile, high, low offset

use std::f64::consts::PI;
use std::sync::Arc;

use rand::Rng;
use time::{Date, Duration};
use tracing::debug;

use weatherly_types::{
    CurrentConditions, ForecastDay, HourlyRecord, QueryResult, SearchQuery, Units, WeatherReport,
};

use crate::error::{Error, Result};
use crate::locale::{BuiltinWeekdays, WeekdayFormatter};
use crate::profiles::{WeatherProfile, is_implausible, profile_for, random_profile};
use crate::units::{round_half_up, speed_in, temperature_in};

/// Forecast length when the query has no end date.
pub const DEFAULT_FORECAST_DAYS: u32 = 5;

/// Longest forecast a single query may ask for.
pub const MAX_FORECAST_DAYS: u32 = 366;

/// Hours in a generated day.
pub const HOURS_PER_DAY: usize = 24;

/// Hour at which the daily temperature curve crosses its average on the way up.
const CURVE_PHASE_HOUR: f64 = 8.0;

/// Produces mock weather for search queries.
#[derive(Clone)]
pub struct WeatherGenerator {
    formatter: Arc<dyn WeekdayFormatter>,
}

impl std::fmt::Debug for WeatherGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherGenerator").finish_non_exhaustive()
    }
}

impl Default for WeatherGenerator {
    fn default() -> Self {
        Self::new(Arc::new(BuiltinWeekdays))
    }
}

impl WeatherGenerator {
    /// Create a generator that labels days with the given formatter.
    pub fn new(formatter: Arc<dyn WeekdayFormatter>) -> Self {
        Self { formatter }
    }

    /// Generate a result for a query.
    ///
    /// Returns [`QueryResult::NotFound`] for implausible queries. Fails when
    /// the range is longer than [`MAX_FORECAST_DAYS`] or the forecast would
    /// run past the representable date range.
    pub fn generate<R: Rng + ?Sized>(&self, query: &SearchQuery, rng: &mut R) -> Result<QueryResult> {
        if is_implausible(query) {
            debug!(location = query.location(), "Implausible query, reporting not found");
            return Ok(QueryResult::NotFound);
        }

        let days = forecast_length(query.start_date(), query.end_date());
        if days > MAX_FORECAST_DAYS {
            return Err(Error::generation(format!(
                "{days}-day forecast exceeds the {MAX_FORECAST_DAYS}-day limit"
            )));
        }

        let current_conditions = self.current_conditions(query, rng);

        let mut forecast = Vec::with_capacity(days as usize);
        for offset in 1..=days {
            forecast.push(self.forecast_day(query, offset, rng)?);
        }

        // Current conditions are deliberately not filtered here
        if let Some(wanted) = query.condition() {
            forecast.retain(|day| day.condition == wanted);
        }

        debug!(
            location = %current_conditions.location,
            generated = days,
            kept = forecast.len(),
            "Generated mock weather"
        );

        Ok(QueryResult::Found(WeatherReport {
            current_conditions,
            forecast,
        }))
    }

    fn current_conditions<R: Rng + ?Sized>(
        &self,
        query: &SearchQuery,
        rng: &mut R,
    ) -> CurrentConditions {
        let profile: &WeatherProfile = match query.condition() {
            Some(condition) => profile_for(condition),
            None => random_profile(rng),
        };

        let temperature = rng.random_range(profile.temperature.clone());
        let low = temperature - rng.random_range(3..=8);
        let high = temperature + rng.random_range(3..=8);
        let wind = rng.random_range(profile.wind.clone());
        let humidity = rng.random_range(profile.humidity.clone());

        let units = query.units();
        CurrentConditions {
            location: display_name(query.location()),
            temperature: temperature_in(temperature, units),
            condition: profile.condition,
            humidity,
            wind_speed: speed_in(wind, units),
            high: temperature_in(high, units),
            low: temperature_in(low, units),
        }
    }

    fn forecast_day<R: Rng + ?Sized>(
        &self,
        query: &SearchQuery,
        offset: u32,
        rng: &mut R,
    ) -> Result<ForecastDay> {
        let date = forecast_date(query.start_date(), offset)?;

        // Independent of the filter; filtering happens afterwards
        let profile = random_profile(rng);
        let high = rng.random_range(profile.temperature.clone());
        let low = high - rng.random_range(8..=15);

        let units = query.units();
        Ok(ForecastDay {
            day: self.formatter.short_weekday(date, query.language()),
            date,
            high: temperature_in(high, units),
            low: temperature_in(low, units),
            condition: profile.condition,
            hourly: Some(hourly_records(high, low, profile, units)),
        })
    }
}

/// Number of forecast days for a date range.
///
/// The whole-day distance between start and end, or
/// [`DEFAULT_FORECAST_DAYS`] without an end date.
pub fn forecast_length(start: Date, end: Option<Date>) -> u32 {
    match end {
        Some(end) => u32::try_from((end - start).whole_days().unsigned_abs()).unwrap_or(u32::MAX),
        None => DEFAULT_FORECAST_DAYS,
    }
}

/// Date of the forecast day `offset` days after `start`.
pub fn forecast_date(start: Date, offset: u32) -> Result<Date> {
    start
        .checked_add(Duration::days(i64::from(offset)))
        .ok_or_else(|| Error::generation(format!("{start} + {offset} days is out of range")))
}

/// Location label shown to users: the text before the first comma, trimmed,
/// with the first letter of every word capitalized.
///
/// # Example
///
/// ```
/// use weatherly_core::generator::display_name;
///
/// assert_eq!(display_name("new york, usa"), "New York");
/// assert_eq!(display_name("  saint-denis "), "Saint-Denis");
/// ```
pub fn display_name(location: &str) -> String {
    let first = location.split(',').next().unwrap_or_default().trim();

    let mut name = String::with_capacity(first.len());
    let mut in_word = false;
    for c in first.chars() {
        let is_word = c.is_alphanumeric() || c == '_';
        if is_word && !in_word {
            name.extend(c.to_uppercase());
        } else {
            name.push(c);
        }
        in_word = is_word;
    }
    name
}

/// Metric hourly temperatures for a day with the given high and low.
///
/// A single sine cycle: the average at hour 8, the high at hour 14, back to
/// the average at hour 20 and the low at hour 2.
pub fn hourly_temperatures(high: i32, low: i32) -> [i32; HOURS_PER_DAY] {
    let amplitude = f64::from(high - low) / 2.0;
    let average = f64::from(low) + amplitude;

    std::array::from_fn(|hour| {
        let phase = (hour as f64 - CURVE_PHASE_HOUR) * (PI / 12.0);
        round_half_up(average + phase.sin() * amplitude)
    })
}

fn hourly_records(
    high: i32,
    low: i32,
    profile: &WeatherProfile,
    units: Units,
) -> Vec<HourlyRecord> {
    hourly_temperatures(high, low)
        .into_iter()
        .enumerate()
        .map(|(hour, celsius)| HourlyRecord {
            time: format!("{hour:02}:00"),
            temperature: temperature_in(celsius, units),
            condition: profile.condition,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use time::macros::date;
    use weatherly_types::Condition;

    fn generate(query: &SearchQuery, seed: u64) -> QueryResult {
        let mut rng = StdRng::seed_from_u64(seed);
        WeatherGenerator::default().generate(query, &mut rng).unwrap()
    }

    #[test]
    fn test_forecast_length() {
        let start = date!(2025 - 06 - 01);
        assert_eq!(forecast_length(start, None), 5);
        assert_eq!(forecast_length(start, Some(start)), 0);
        assert_eq!(forecast_length(start, Some(date!(2025 - 06 - 03))), 2);
        // Reversed ranges use the absolute distance
        assert_eq!(forecast_length(date!(2025 - 06 - 03), Some(start)), 2);
        assert_eq!(forecast_length(date!(2024 - 12 - 30), Some(date!(2025 - 01 - 02))), 3);
    }

    #[test]
    fn test_forecast_date_crosses_month_and_year() {
        assert_eq!(forecast_date(date!(2025 - 12 - 31), 1).unwrap(), date!(2026 - 01 - 01));
        assert_eq!(forecast_date(date!(2024 - 02 - 28), 1).unwrap(), date!(2024 - 02 - 29));
    }

    #[test]
    fn test_forecast_date_overflow_is_generation_error() {
        let err = forecast_date(Date::MAX, 1).unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
    }

    #[test]
    fn test_forecast_longer_than_limit_is_rejected() {
        let start = date!(2025 - 01 - 01);
        let longest = SearchQuery::builder("Lima", start)
            .end_date(start + Duration::days(i64::from(MAX_FORECAST_DAYS)))
            .build()
            .unwrap();
        let report = generate(&longest, 4).into_report().unwrap();
        assert_eq!(report.forecast.len(), MAX_FORECAST_DAYS as usize);

        let too_long = SearchQuery::builder("Lima", date!(1000 - 01 - 01))
            .end_date(date!(2000 - 01 - 01))
            .build()
            .unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        let err = WeatherGenerator::default()
            .generate(&too_long, &mut rng)
            .unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("paris"), "Paris");
        assert_eq!(display_name("cairo, egypt"), "Cairo");
        assert_eq!(display_name("rio de janeiro"), "Rio De Janeiro");
        assert_eq!(display_name("LONDON"), "LONDON");
        assert_eq!(display_name(", nowhere"), "");
    }

    #[test]
    fn test_hourly_curve_shape() {
        let temps = hourly_temperatures(30, 18);
        assert_eq!(temps[14], 30);
        assert_eq!(temps[2], 18);
        assert_eq!(temps[8], 24);
        assert_eq!(temps[20], 24);
        assert_eq!(temps.iter().max(), Some(&30));
        assert_eq!(temps.iter().min(), Some(&18));
    }

    #[test]
    fn test_hourly_curve_rounds_half_up_below_zero() {
        // average -7.5: hour 8 sits exactly on a tie
        let temps = hourly_temperatures(-1, -14);
        assert_eq!(temps[8], -7);
        assert_eq!(temps[14], -1);
        assert_eq!(temps[2], -14);
    }

    #[test]
    fn test_flat_day_is_constant() {
        assert!(hourly_temperatures(12, 12).iter().all(|&t| t == 12));
    }

    #[test]
    fn test_paris_two_day_range() {
        let query = SearchQuery::builder("Paris", date!(2025 - 06 - 01))
            .end_date(date!(2025 - 06 - 03))
            .build()
            .unwrap();
        let report = generate(&query, 1).into_report().unwrap();

        let dates: Vec<_> = report.forecast.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![date!(2025 - 06 - 02), date!(2025 - 06 - 03)]);
        assert_eq!(report.forecast[0].day, "Mon");
        assert_eq!(report.forecast[1].day, "Tue");
        assert_eq!(report.current_conditions.location, "Paris");
    }

    #[test]
    fn test_same_seed_same_weather() {
        let query = SearchQuery::builder("Oslo", date!(2025 - 01 - 10))
            .build()
            .unwrap();
        assert_eq!(generate(&query, 42), generate(&query, 42));
    }

    #[test]
    fn test_current_conditions_within_profile() {
        let query = SearchQuery::builder("Oslo", date!(2025 - 01 - 10))
            .condition(Condition::Snow)
            .build()
            .unwrap();
        for seed in 0..50 {
            let report = generate(&query, seed).into_report().unwrap();
            let current = &report.current_conditions;
            assert_eq!(current.condition, Condition::Snow);
            assert!((-5..=2).contains(&current.temperature));
            assert!((80..=100).contains(&current.humidity));
            assert!((15..=25).contains(&current.wind_speed));
            assert!((3..=8).contains(&(current.temperature - current.low)));
            assert!((3..=8).contains(&(current.high - current.temperature)));
        }
    }

    #[test]
    fn test_forecast_days_within_profile() {
        let query = SearchQuery::builder("Lima", date!(2025 - 03 - 01))
            .end_date(date!(2025 - 03 - 31))
            .build()
            .unwrap();
        let report = generate(&query, 9).into_report().unwrap();
        assert_eq!(report.forecast.len(), 30);

        for day in &report.forecast {
            let profile = profile_for(day.condition);
            assert!(profile.temperature.contains(&day.high));
            assert!((8..=15).contains(&(day.high - day.low)));

            let hourly = day.hourly.as_ref().unwrap();
            assert_eq!(hourly.len(), HOURS_PER_DAY);
            assert!(hourly.iter().all(|h| h.condition == day.condition));
        }
    }

    #[test]
    fn test_snow_in_cairo_not_found() {
        let query = SearchQuery::builder("Cairo, Egypt", date!(2025 - 06 - 01))
            .condition(Condition::Snow)
            .build()
            .unwrap();
        assert!(generate(&query, 3).is_not_found());
    }

    /// Current conditions follow the filter's profile while forecast days are
    /// re-rolled and filtered afterwards. This mirrors the established
    /// behaviour and may not be what a filter user expects.
    #[test]
    fn test_filter_applies_to_current_profile_but_filters_forecast_post_hoc() {
        let query = SearchQuery::builder("Berlin", date!(2025 - 06 - 01))
            .end_date(date!(2025 - 06 - 15))
            .condition(Condition::Rain)
            .build()
            .unwrap();

        let mut kept_counts = Vec::new();
        for seed in 0..20 {
            let report = generate(&query, seed).into_report().unwrap();
            assert_eq!(report.current_conditions.condition, Condition::Rain);
            assert!(report.forecast.iter().all(|d| d.condition == Condition::Rain));
            kept_counts.push(report.forecast.len());
        }
        // Post-hoc filtering keeps only some of the 14 days
        assert!(kept_counts.iter().any(|&n| n < 14));
    }

    #[test]
    fn test_imperial_matches_metric_draw() {
        let metric = SearchQuery::builder("Denver", date!(2025 - 06 - 01))
            .build()
            .unwrap();
        let imperial = metric.with_units(Units::Fahrenheit);

        let m = generate(&metric, 11).into_report().unwrap();
        let i = generate(&imperial, 11).into_report().unwrap();

        let (mc, ic) = (&m.current_conditions, &i.current_conditions);
        assert_eq!(ic.temperature, crate::units::celsius_to_fahrenheit(mc.temperature));
        assert_eq!(ic.wind_speed, crate::units::kmh_to_mph(mc.wind_speed));
        assert_eq!(ic.humidity, mc.humidity);

        for (md, id) in m.forecast.iter().zip(&i.forecast) {
            assert_eq!(id.high, crate::units::celsius_to_fahrenheit(md.high));
            assert_eq!(id.low, crate::units::celsius_to_fahrenheit(md.low));
        }
    }
}
