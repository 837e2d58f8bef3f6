//! Unit conversion helpers.
//!
//! The engine draws every sample in metric units and converts at the end.
//! Rounding is half-up (`2.5 -> 3`, `-2.5 -> -2`), matching the front end's
//! `Math.round`, so metric and imperial reports of the same draw agree.

use weatherly_types::Units;

/// km/h per mph, as used by the conversion.
pub const KMH_PER_MPH: f64 = 1.609;

/// Round to the nearest integer, ties towards positive infinity.
///
/// # Example
///
/// ```
/// use weatherly_core::units::round_half_up;
///
/// assert_eq!(round_half_up(2.5), 3);
/// assert_eq!(round_half_up(-2.5), -2);
/// assert_eq!(round_half_up(-2.6), -3);
/// ```
pub fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Convert degrees Celsius to whole degrees Fahrenheit.
pub fn celsius_to_fahrenheit(celsius: i32) -> i32 {
    round_half_up(f64::from(celsius) * 9.0 / 5.0 + 32.0)
}

/// Convert km/h to whole mph.
pub fn kmh_to_mph(kmh: u16) -> u16 {
    round_half_up(f64::from(kmh) / KMH_PER_MPH).max(0) as u16
}

/// Express a Celsius temperature in the requested unit system.
pub fn temperature_in(celsius: i32, units: Units) -> i32 {
    match units {
        Units::Celsius => celsius,
        Units::Fahrenheit => celsius_to_fahrenheit(celsius),
    }
}

/// Express a km/h wind speed in the requested unit system.
pub fn speed_in(kmh: u16, units: Units) -> u16 {
    match units {
        Units::Celsius => kmh,
        Units::Fahrenheit => kmh_to_mph(kmh),
    }
}
