//! Query command implementation.

use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::debug;
use weatherly_types::{Condition, DEFAULT_LANGUAGE, QueryResult, SearchQuery};

use super::build_engine;
use crate::cli::{OutputFormat, QueryArgs};
use crate::config::Config;
use crate::format::{FormatOptions, format_not_found_text, format_report_text};

pub async fn cmd_query(args: QueryArgs, config: &Config, no_color: bool) -> Result<()> {
    let units = config.resolve_units(args.units)?;
    let format = config.resolve_format(args.format);
    let language = config
        .resolve_language(args.lang)
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
    let condition = match args.condition.as_deref() {
        Some(value) => Condition::parse_filter(value)?,
        None => None,
    };

    let query = SearchQuery::builder(args.location, args.start)
        .maybe_end_date(args.end)
        .maybe_condition(condition)
        .language(language)
        .units(units)
        .build()
        .context("Invalid query")?;
    debug!(?query, "Running query");

    let engine = build_engine(&args.engine, config, None)?;
    let result = engine
        .query(&query)
        .await
        .context("Failed to generate weather")?;

    let opts = FormatOptions::new(no_color || config.no_color, units, query.language())
        .with_compact(args.compact)
        .with_hourly(args.hourly);
    let content = render_result(&result, format, &opts)?;

    print!("{}", content);
    io::stdout().flush()?;
    Ok(())
}

/// Render a result in the chosen format.
///
/// JSON output of a not-found result is the literal `null`.
pub fn render_result(
    result: &QueryResult,
    format: OutputFormat,
    opts: &FormatOptions,
) -> Result<String> {
    Ok(match (format, result) {
        (OutputFormat::Json, _) => opts.as_json(result)?,
        (OutputFormat::Text, QueryResult::Found(report)) => format_report_text(report, opts),
        (OutputFormat::Text, QueryResult::NotFound) => format_not_found_text(opts),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use weatherly_core::WeatherEngine;
    use weatherly_types::Units;

    fn plain() -> FormatOptions {
        FormatOptions::new(true, Units::Celsius, "en").with_compact(true)
    }

    #[test]
    fn test_render_not_found() {
        let json = render_result(&QueryResult::NotFound, OutputFormat::Json, &plain()).unwrap();
        assert_eq!(json, "null\n");

        let text = render_result(&QueryResult::NotFound, OutputFormat::Text, &plain()).unwrap();
        assert!(text.starts_with("Could not find weather data"));
    }

    #[tokio::test]
    async fn test_render_report_json_shape() {
        let engine = WeatherEngine::builder().seed(8).no_latency().build();
        let query = SearchQuery::builder("Paris", date!(2025 - 06 - 01))
            .build()
            .unwrap();
        let result = engine.query(&query).await.unwrap();

        let json = render_result(&result, OutputFormat::Json, &plain()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["currentWeather"]["location"], "Paris");
        assert_eq!(value["forecast"].as_array().unwrap().len(), 5);
        assert_eq!(value["forecast"][0]["date"], "2025-06-02");
        assert_eq!(value["forecast"][0]["hourly"].as_array().unwrap().len(), 24);
    }
}
