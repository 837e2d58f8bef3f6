//! Platform-agnostic types for the Weatherly forecast engine.
//!
//! This crate provides the query and report model shared by the engine
//! (weatherly-core), the session store (weatherly-store), and front ends.
//!
//! # Features
//!
//! - Validated, immutable [`SearchQuery`] values built with [`SearchQueryBuilder`]
//! - Report types: [`CurrentConditions`], [`ForecastDay`], [`HourlyRecord`]
//! - [`QueryResult`] with a first-class "not found" outcome
//! - JSON shape compatible with the browser front end (behind the `serde` feature)
//!
//! # Example
//!
//! ```
//! use weatherly_types::{Condition, SearchQuery, Units, parse_iso_date};
//!
//! let query = SearchQuery::builder("Paris", parse_iso_date("2025-06-01").unwrap())
//!     .end_date(parse_iso_date("2025-06-03").unwrap())
//!     .condition(Condition::Rain)
//!     .units(Units::Fahrenheit)
//!     .build()
//!     .unwrap();
//! assert_eq!(query.normalized_location(), "paris");
//! ```

pub mod error;
pub mod query;
pub mod types;

pub use error::{ParseError, ParseResult, QueryError};
pub use query::{DEFAULT_LANGUAGE, SearchQuery, SearchQueryBuilder, parse_iso_date};
pub use types::{
    Condition, CurrentConditions, ForecastDay, HourlyRecord, QueryResult, Units, WeatherReport,
};


/// Property-based tests for the serialized form of reports.
///
/// # Running Tests
///
/// ```bash
/// cargo test -p weatherly-types proptests
/// ```
#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use time::Date;

    fn condition() -> impl Strategy<Value = Condition> {
        proptest::sample::select(Condition::ALL.to_vec())
    }

    fn forecast_day() -> impl Strategy<Value = ForecastDay> {
        (
            2_400_000i32..2_500_000,
            -30i32..50,
            0i32..20,
            condition(),
            any::<bool>(),
        )
            .prop_map(|(julian, high, spread, condition, with_hourly)| {
                let hourly = with_hourly.then(|| {
                    (0..24)
                        .map(|h| HourlyRecord {
                            time: format!("{h:02}:00"),
                            temperature: high - spread,
                            condition,
                        })
                        .collect()
                });
                ForecastDay {
                    day: "Tue".to_string(),
                    date: Date::from_julian_day(julian).unwrap(),
                    high,
                    low: high - spread,
                    condition,
                    hourly,
                }
            })
    }

    proptest! {
        /// Serializing then deserializing any result reproduces it.
        #[test]
        fn query_result_round_trips(
            found in any::<bool>(),
            temperature in -40i32..60,
            humidity in 0u8..=100,
            wind_speed in 0u16..100,
            condition in condition(),
            forecast in proptest::collection::vec(forecast_day(), 0..8),
        ) {
            let result = if found {
                QueryResult::Found(WeatherReport {
                    current_conditions: CurrentConditions {
                        location: "Somewhere".to_string(),
                        temperature,
                        condition,
                        humidity,
                        wind_speed,
                        high: temperature + 5,
                        low: temperature - 5,
                    },
                    forecast,
                })
            } else {
                QueryResult::NotFound
            };

            let json = serde_json::to_string(&result).unwrap();
            let back: QueryResult = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(back, result);
        }
    }
}
