//! Weather profile pool and plausibility rules.
//!
//! A profile ties a condition to the metric ranges its samples are drawn
//! from. All ranges are inclusive.
//!
//! | Condition | Temperature (°C) | Humidity (%) | Wind (km/h) |
//! |-----------|------------------|--------------|-------------|
//! | Sunny | 25..=35 | 40..=60 | 5..=15 |
//! | Partly Cloudy | 22..=30 | 50..=70 | 10..=20 |
//! | Cloudy | 18..=25 | 60..=80 | 15..=25 |
//! | Rain | 15..=22 | 75..=95 | 20..=30 |
//! | Thunderstorm | 20..=28 | 80..=100 | 25..=40 |
//! | Snow | -5..=2 | 80..=100 | 15..=25 |
//! | Foggy | 10..=18 | 90..=100 | 0..=10 |

use std::ops::RangeInclusive;

use rand::Rng;
use weatherly_types::{Condition, SearchQuery};

/// Sampling ranges for one condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherProfile {
    /// Condition this profile produces.
    pub condition: Condition,
    /// Temperature range in °C.
    pub temperature: RangeInclusive<i32>,
    /// Relative humidity range in percent.
    pub humidity: RangeInclusive<u8>,
    /// Wind speed range in km/h.
    pub wind: RangeInclusive<u16>,
}

/// The fixed profile pool, in [`Condition::ALL`] order.
pub static PROFILES: [WeatherProfile; 7] = [
    WeatherProfile {
        condition: Condition::Sunny,
        temperature: 25..=35,
        humidity: 40..=60,
        wind: 5..=15,
    },
    WeatherProfile {
        condition: Condition::PartlyCloudy,
        temperature: 22..=30,
        humidity: 50..=70,
        wind: 10..=20,
    },
    WeatherProfile {
        condition: Condition::Cloudy,
        temperature: 18..=25,
        humidity: 60..=80,
        wind: 15..=25,
    },
    WeatherProfile {
        condition: Condition::Rain,
        temperature: 15..=22,
        humidity: 75..=95,
        wind: 20..=30,
    },
    WeatherProfile {
        condition: Condition::Thunderstorm,
        temperature: 20..=28,
        humidity: 80..=100,
        wind: 25..=40,
    },
    WeatherProfile {
        condition: Condition::Snow,
        temperature: -5..=2,
        humidity: 80..=100,
        wind: 15..=25,
    },
    WeatherProfile {
        condition: Condition::Foggy,
        temperature: 10..=18,
        humidity: 90..=100,
        wind: 0..=10,
    },
];

/// Place names where snow is never reported (matched as lowercase substrings).
pub const SNOWLESS_LOCATIONS: [&str; 7] = [
    "cairo",
    "dubai",
    "sahara",
    "bangkok",
    "singapore",
    "riyadh",
    "miami",
];

/// Look up the profile for a condition.
pub fn profile_for(condition: Condition) -> &'static WeatherProfile {
    match condition {
        Condition::Sunny => &PROFILES[0],
        Condition::PartlyCloudy => &PROFILES[1],
        Condition::Cloudy => &PROFILES[2],
        Condition::Rain => &PROFILES[3],
        Condition::Thunderstorm => &PROFILES[4],
        Condition::Snow => &PROFILES[5],
        Condition::Foggy => &PROFILES[6],
    }
}

/// Pick a profile uniformly from the pool.
pub fn random_profile<R: Rng + ?Sized>(rng: &mut R) -> &'static WeatherProfile {
    &PROFILES[rng.random_range(0..PROFILES.len())]
}

/// Whether a query asks for weather that cannot plausibly occur.
///
/// Currently the only rule: snow in a hot-climate location.
///
/// # Example
///
/// ```
/// use weatherly_core::profiles::is_implausible;
/// use weatherly_types::{Condition, SearchQuery, parse_iso_date};
///
/// let query = SearchQuery::builder("Cairo, Egypt", parse_iso_date("2025-06-01").unwrap())
///     .condition(Condition::Snow)
///     .build()
///     .unwrap();
/// assert!(is_implausible(&query));
/// ```
pub fn is_implausible(query: &SearchQuery) -> bool {
    if query.condition() != Some(Condition::Snow) {
        return false;
    }
    let location = query.location().to_lowercase();
    SNOWLESS_LOCATIONS
        .iter()
        .any(|place| location.contains(place))
}
