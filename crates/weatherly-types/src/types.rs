//! Core types for generated weather reports.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use time::Date;

use crate::error::ParseError;

#[cfg(feature = "serde")]
time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Unit system for temperatures and wind speed.
///
/// Humidity is unit-independent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Units {
    /// Degrees Celsius and km/h.
    #[default]
    Celsius,
    /// Degrees Fahrenheit and mph.
    Fahrenheit,
}

impl Units {
    /// Canonical lowercase name, as used in cache keys.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Celsius => "celsius",
            Units::Fahrenheit => "fahrenheit",
        }
    }

    /// Temperature unit suffix for display.
    #[must_use]
    pub fn temperature_symbol(&self) -> &'static str {
        match self {
            Units::Celsius => "°C",
            Units::Fahrenheit => "°F",
        }
    }

    /// Wind speed unit suffix for display.
    #[must_use]
    pub fn speed_symbol(&self) -> &'static str {
        match self {
            Units::Celsius => "km/h",
            Units::Fahrenheit => "mph",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Units {
    type Err = ParseError;

    /// Parse a unit system name.
    ///
    /// # Examples
    ///
    /// ```
    /// use weatherly_types::Units;
    ///
    /// assert_eq!("metric".parse::<Units>(), Ok(Units::Celsius));
    /// assert_eq!("Fahrenheit".parse::<Units>(), Ok(Units::Fahrenheit));
    /// assert!("kelvin".parse::<Units>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "celsius" | "metric" | "c" => Ok(Units::Celsius),
            "fahrenheit" | "imperial" | "f" => Ok(Units::Fahrenheit),
            _ => Err(ParseError::UnknownUnits(s.to_string())),
        }
    }
}

/// Weather condition, one per entry of the profile pool.
///
/// Serializes as its display name (`"Partly Cloudy"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Condition {
    Sunny,
    #[cfg_attr(feature = "serde", serde(rename = "Partly Cloudy"))]
    PartlyCloudy,
    Cloudy,
    Rain,
    Thunderstorm,
    Snow,
    Foggy,
}

impl Condition {
    /// Every condition, in profile pool order.
    pub const ALL: [Condition; 7] = [
        Condition::Sunny,
        Condition::PartlyCloudy,
        Condition::Cloudy,
        Condition::Rain,
        Condition::Thunderstorm,
        Condition::Snow,
        Condition::Foggy,
    ];

    /// Display name of the condition.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Condition::Sunny => "Sunny",
            Condition::PartlyCloudy => "Partly Cloudy",
            Condition::Cloudy => "Cloudy",
            Condition::Rain => "Rain",
            Condition::Thunderstorm => "Thunderstorm",
            Condition::Snow => "Snow",
            Condition::Foggy => "Foggy",
        }
    }

    /// Parse an optional condition filter.
    ///
    /// An empty string or `"any"` means no filter.
    ///
    /// # Examples
    ///
    /// ```
    /// use weatherly_types::Condition;
    ///
    /// assert_eq!(Condition::parse_filter("any"), Ok(None));
    /// assert_eq!(Condition::parse_filter("SNOW"), Ok(Some(Condition::Snow)));
    /// assert!(Condition::parse_filter("hail").is_err());
    /// ```
    pub fn parse_filter(s: &str) -> Result<Option<Self>, ParseError> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("any") {
            return Ok(None);
        }
        trimmed.parse().map(Some)
    }

    fn squash(s: &str) -> String {
        s.chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect()
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Condition {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = Self::squash(s);
        Condition::ALL
            .into_iter()
            .find(|c| Self::squash(c.name()) == wanted)
            .ok_or_else(|| ParseError::UnknownCondition(s.trim().to_string()))
    }
}

/// One hour of a forecast day.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HourlyRecord {
    /// Hour label in `HH:00` format.
    pub time: String,
    /// Temperature in the query's unit system.
    pub temperature: i32,
    /// Condition, always the owning day's.
    pub condition: Condition,
}

/// A single forecast day.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ForecastDay {
    /// Short localized weekday label ("Mon", "lun.", "月").
    pub day: String,
    /// Calendar date of this day.
    #[cfg_attr(feature = "serde", serde(with = "iso_date"))]
    pub date: Date,
    /// Daily high.
    pub high: i32,
    /// Daily low.
    pub low: i32,
    /// Condition for the whole day.
    pub condition: Condition,
    /// Hour-by-hour breakdown (24 entries when present).
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub hourly: Option<Vec<HourlyRecord>>,
}

/// Current conditions at the queried location.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CurrentConditions {
    /// Title-cased display name of the location.
    pub location: String,
    /// Current temperature.
    pub temperature: i32,
    /// Current condition.
    pub condition: Condition,
    /// Relative humidity percentage.
    pub humidity: u8,
    /// Wind speed (km/h or mph).
    pub wind_speed: u16,
    /// Today's high.
    pub high: i32,
    /// Today's low.
    pub low: i32,
}

/// A fully populated query answer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct WeatherReport {
    /// Current conditions.
    #[cfg_attr(feature = "serde", serde(rename = "currentWeather"))]
    pub current_conditions: CurrentConditions,
    /// Chronological forecast, possibly empty after filtering.
    pub forecast: Vec<ForecastDay>,
}

/// Outcome of a weather query.
///
/// "Not found" is a legitimate answer, not an error. It serializes as JSON
/// `null`, so a stored result round-trips through its serialized form.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "Option<WeatherReport>", into = "Option<WeatherReport>")
)]
pub enum QueryResult {
    /// Weather data was produced.
    Found(WeatherReport),
    /// No plausible data exists for the query.
    NotFound,
}

impl QueryResult {
    /// Returns `true` for the "not found" outcome.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, QueryResult::NotFound)
    }

    /// Borrow the report, if any.
    #[must_use]
    pub fn report(&self) -> Option<&WeatherReport> {
        match self {
            QueryResult::Found(report) => Some(report),
            QueryResult::NotFound => None,
        }
    }

    /// Take the report, if any.
    #[must_use]
    pub fn into_report(self) -> Option<WeatherReport> {
        self.into()
    }
}

impl From<Option<WeatherReport>> for QueryResult {
    fn from(value: Option<WeatherReport>) -> Self {
        value.map_or(QueryResult::NotFound, QueryResult::Found)
    }
}

impl From<QueryResult> for Option<WeatherReport> {
    fn from(value: QueryResult) -> Self {
        match value {
            QueryResult::Found(report) => Some(report),
            QueryResult::NotFound => None,
        }
    }
}

impl From<WeatherReport> for QueryResult {
    fn from(report: WeatherReport) -> Self {
        QueryResult::Found(report)
    }
}
