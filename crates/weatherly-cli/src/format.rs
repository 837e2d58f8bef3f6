//! Output formatting utilities for text and JSON output.

use anyhow::Result;
use owo_colors::OwoColorize;
use weatherly_core::locale::{TranslationKey, translate};
use weatherly_types::{Condition, ForecastDay, Units, WeatherReport};

/// Formatting options for output.
#[derive(Debug, Clone, Default)]
pub struct FormatOptions {
    /// Disable colored output.
    pub no_color: bool,
    /// Use compact JSON output (no pretty-printing).
    pub compact: bool,
    /// Include hourly temperatures in text output.
    pub hourly: bool,
    /// Unit system the report was generated in.
    pub units: Units,
    /// Language tag for labels.
    pub language: String,
}

impl FormatOptions {
    pub fn new(no_color: bool, units: Units, language: impl Into<String>) -> Self {
        Self {
            no_color,
            units,
            language: language.into(),
            ..Default::default()
        }
    }

    /// Create with compact JSON option.
    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Create with hourly text option.
    pub fn with_hourly(mut self, hourly: bool) -> Self {
        self.hourly = hourly;
        self
    }

    /// Serialize to JSON, pretty unless compact.
    pub fn as_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        let json = if self.compact {
            serde_json::to_string(value)?
        } else {
            serde_json::to_string_pretty(value)?
        };
        Ok(json + "\n")
    }

    #[must_use]
    pub fn format_temp(&self, value: i32) -> String {
        format!("{}{}", value, self.units.temperature_symbol())
    }

    #[must_use]
    pub fn format_speed(&self, value: u16) -> String {
        format!("{} {}", value, self.units.speed_symbol())
    }

    fn label(&self, key: TranslationKey) -> &'static str {
        translate(key, &self.language)
    }

    fn condition(&self, condition: Condition) -> String {
        let label = self.label(TranslationKey::Condition(condition));
        if self.no_color {
            return label.to_string();
        }
        match condition {
            Condition::Sunny => label.yellow().to_string(),
            Condition::PartlyCloudy => label.bright_yellow().to_string(),
            Condition::Cloudy => label.bright_black().to_string(),
            Condition::Rain => label.blue().to_string(),
            Condition::Thunderstorm => label.magenta().to_string(),
            Condition::Snow => label.cyan().to_string(),
            Condition::Foggy => label.dimmed().to_string(),
        }
    }
}

/// Human-readable report.
#[must_use]
pub fn format_report_text(report: &WeatherReport, opts: &FormatOptions) -> String {
    let current = &report.current_conditions;
    let mut out = String::new();

    let location = if opts.no_color {
        current.location.clone()
    } else {
        current.location.bold().to_string()
    };
    out.push_str(&format!(
        "{}  {}  {}\n",
        location,
        opts.format_temp(current.temperature),
        opts.condition(current.condition)
    ));
    out.push_str(&format!(
        "  H {}  L {}  {} {}%  {} {}\n",
        opts.format_temp(current.high),
        opts.format_temp(current.low),
        opts.label(TranslationKey::Humidity),
        current.humidity,
        opts.label(TranslationKey::Wind),
        opts.format_speed(current.wind_speed)
    ));

    if !report.forecast.is_empty() {
        out.push('\n');
    }
    for day in &report.forecast {
        out.push_str(&format_day_text(day, opts));
    }
    out
}

fn format_day_text(day: &ForecastDay, opts: &FormatOptions) -> String {
    let mut out = format!(
        "{:<6} {}  {:>6} / {:<6} {}\n",
        day.day,
        day.date,
        opts.format_temp(day.high),
        opts.format_temp(day.low),
        opts.condition(day.condition)
    );

    if opts.hourly
        && let Some(hourly) = &day.hourly
    {
        for row in hourly.chunks(6) {
            let cells: Vec<String> = row
                .iter()
                .map(|h| format!("{} {:>5}", h.time, opts.format_temp(h.temperature)))
                .collect();
            out.push_str(&format!("    {}\n", cells.join("  ")));
        }
    }
    out
}

/// Localized message for a query with no plausible answer.
#[must_use]
pub fn format_not_found_text(opts: &FormatOptions) -> String {
    let message = opts.label(TranslationKey::NotFound);
    if opts.no_color {
        format!("{message}\n")
    } else {
        format!("{}\n", message.yellow())
    }
}
