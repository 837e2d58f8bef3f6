//! Integration tests for weatherly-core.
//!
//! Exercises the public engine API end to end: caching, the not-found path,
//! unit conversion across seeds, and the forecast invariants.
//!
//! Run with: `cargo test -p weatherly-core --test integration`

use std::sync::Arc;

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use time::macros::date;
use time::{Date, Duration};

use weatherly_core::cache::{NOT_FOUND_SENTINEL, cache_key};
use weatherly_core::units::{celsius_to_fahrenheit, kmh_to_mph};
use weatherly_core::{
    Condition, MemoryCache, MockCache, QueryResult, SearchQuery, SessionCache, SharedEngine, Units,
    WeatherEngine, WeatherGenerator, WeatherReport, WeatherService,
};

fn engine_with(cache: Arc<dyn SessionCache>, seed: u64) -> WeatherEngine {
    WeatherEngine::builder()
        .cache(cache)
        .seed(seed)
        .no_latency()
        .build()
}

fn report(result: QueryResult) -> WeatherReport {
    result.into_report().expect("expected a report")
}

#[tokio::test]
async fn test_paris_two_day_range() {
    let engine = WeatherEngine::builder().seed(11).no_latency().build();
    let query = SearchQuery::builder("paris, france", date!(2025 - 06 - 01))
        .end_date(date!(2025 - 06 - 03))
        .build()
        .unwrap();

    let report = report(engine.query(&query).await.unwrap());
    assert_eq!(report.current_conditions.location, "Paris");

    let dates: Vec<Date> = report.forecast.iter().map(|d| d.date).collect();
    assert_eq!(dates, vec![date!(2025 - 06 - 02), date!(2025 - 06 - 03)]);
    assert_eq!(report.forecast[0].day, "Mon");
    assert_eq!(report.forecast[1].day, "Tue");
}

#[tokio::test]
async fn test_cairo_snow_not_found_and_cached() {
    let cache = Arc::new(MockCache::new());
    let engine = engine_with(cache.clone(), 1);
    let query = SearchQuery::builder("Cairo, Egypt", date!(2025 - 01 - 15))
        .condition(Condition::Snow)
        .build()
        .unwrap();

    assert_eq!(engine.query(&query).await.unwrap(), QueryResult::NotFound);
    assert_eq!(
        cache.get(&cache_key(&query)).unwrap().as_deref(),
        Some(NOT_FOUND_SENTINEL)
    );

    let generated = engine.generation_count();
    assert_eq!(engine.query(&query).await.unwrap(), QueryResult::NotFound);
    assert_eq!(engine.generation_count(), generated);
    assert_eq!(engine.stats().hits, 1);
}

#[tokio::test]
async fn test_snow_elsewhere_is_found() {
    let engine = WeatherEngine::builder().seed(5).no_latency().build();
    let query = SearchQuery::builder("Helsinki", date!(2025 - 01 - 15))
        .end_date(date!(2025 - 02 - 15))
        .condition(Condition::Snow)
        .build()
        .unwrap();

    let report = report(engine.query(&query).await.unwrap());
    assert_eq!(report.current_conditions.condition, Condition::Snow);
    assert!(report.forecast.iter().all(|d| d.condition == Condition::Snow));
}

#[tokio::test]
async fn test_engines_share_a_session_cache() {
    let cache: Arc<dyn SessionCache> = Arc::new(MemoryCache::new());
    let query = SearchQuery::builder("Nairobi", date!(2025 - 04 - 01))
        .build()
        .unwrap();

    let first = engine_with(cache.clone(), 1);
    let second = engine_with(cache.clone(), 2);

    let a = first.query(&query).await.unwrap();
    let b = second.query(&query).await.unwrap();
    assert_eq!(a, b);
    assert_eq!(second.generation_count(), 0);
}

#[tokio::test]
async fn test_cleared_cache_regenerates() {
    let cache = Arc::new(MemoryCache::new());
    let engine = engine_with(cache.clone(), 1);
    let query = SearchQuery::builder("Nairobi", date!(2025 - 04 - 01))
        .build()
        .unwrap();

    engine.query(&query).await.unwrap();
    cache.clear().unwrap();
    engine.query(&query).await.unwrap();
    assert_eq!(engine.generation_count(), 2);
}

#[tokio::test]
async fn test_transient_cache_failures_recover() {
    let cache = Arc::new(MockCache::new());
    // The first lookup and the first store both fail
    cache.set_transient_failures(2);
    let engine = engine_with(cache.clone(), 1);
    let query = SearchQuery::builder("Nairobi", date!(2025 - 04 - 01))
        .build()
        .unwrap();

    engine.query(&query).await.unwrap();
    engine.query(&query).await.unwrap();
    engine.query(&query).await.unwrap();

    assert_eq!(engine.generation_count(), 2);
    assert_eq!(engine.stats().hits, 1);
}

#[tokio::test]
async fn test_concurrent_queries() {
    let engine: SharedEngine = Arc::new(WeatherEngine::builder().seed(3).no_latency().build());
    let mut handles = Vec::new();
    for i in 0..8 {
        let engine = Arc::clone(&engine);
        handles.push(tokio::spawn(async move {
            let query = SearchQuery::builder(format!("City {i}"), date!(2025 - 09 - 01))
                .build()
                .unwrap();
            engine.query(&query).await.unwrap()
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap().report().is_some());
    }
    assert_eq!(engine.generation_count(), 8);
    assert_eq!(engine.cache().len().unwrap(), 8);
}

#[tokio::test]
async fn test_service_trait_object() {
    let service: Box<dyn WeatherService> =
        Box::new(WeatherEngine::builder().seed(2).no_latency().build());
    let query = SearchQuery::builder("Lagos", date!(2025 - 07 - 07))
        .build()
        .unwrap();
    assert!(service.query(&query).await.unwrap().report().is_some());
}

fn location() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z ]{0,15}"
}

fn start_date() -> impl Strategy<Value = Date> {
    (0i64..20_000).prop_map(|offset| date!(1990 - 01 - 01) + Duration::days(offset))
}

fn generate(query: &SearchQuery, seed: u64) -> QueryResult {
    let mut rng = StdRng::seed_from_u64(seed);
    WeatherGenerator::default()
        .generate(query, &mut rng)
        .expect("generation within the date range succeeds")
}

proptest! {
    /// A condition filter leaves only matching forecast days.
    #[test]
    fn filtered_forecast_matches_condition(
        location in location(),
        start in start_date(),
        span in 0i64..20,
        condition in proptest::sample::select(Condition::ALL.to_vec()),
        seed in any::<u64>(),
    ) {
        let query = SearchQuery::builder(location, start)
            .end_date(start + Duration::days(span))
            .condition(condition)
            .build()
            .unwrap();

        let Some(report) = generate(&query, seed).into_report() else {
            prop_assert_eq!(condition, Condition::Snow);
            return Ok(());
        };
        prop_assert!(report.forecast.iter().all(|d| d.condition == condition));
        prop_assert_eq!(report.current_conditions.condition, condition);
    }

    /// Forecast dates step by one day from the day after the start.
    #[test]
    fn forecast_dates_are_consecutive(
        location in location(),
        start in start_date(),
        span in proptest::option::of(0i64..30),
        seed in any::<u64>(),
    ) {
        let end = span.map(|days| start + Duration::days(days));
        let query = SearchQuery::builder(location, start)
            .maybe_end_date(end)
            .build()
            .unwrap();

        let report = generate(&query, seed).into_report().unwrap();
        let expected = span.unwrap_or(5);
        prop_assert_eq!(report.forecast.len() as i64, expected);
        for (i, day) in report.forecast.iter().enumerate() {
            prop_assert_eq!(day.date, start + Duration::days(i as i64 + 1));
        }
    }

    /// Every day carries 24 hourly records and the afternoon is warmest.
    #[test]
    fn hourly_cycle_shape(
        location in location(),
        start in start_date(),
        seed in any::<u64>(),
    ) {
        let query = SearchQuery::builder(location, start).build().unwrap();
        let report = generate(&query, seed).into_report().unwrap();

        for day in &report.forecast {
            let hourly = day.hourly.as_ref().unwrap();
            prop_assert_eq!(hourly.len(), 24);
            for (hour, record) in hourly.iter().enumerate() {
                prop_assert_eq!(&record.time, &format!("{hour:02}:00"));
                prop_assert_eq!(record.condition, day.condition);
            }
            prop_assert!(day.high > day.low);
            prop_assert!(hourly[14].temperature >= hourly[2].temperature);
            prop_assert_eq!(hourly[14].temperature, day.high);
            prop_assert_eq!(hourly[2].temperature, day.low);
        }
    }

    /// Imperial output is the converted metric output for the same seed.
    #[test]
    fn imperial_matches_converted_metric(
        location in location(),
        start in start_date(),
        seed in any::<u64>(),
    ) {
        let metric = SearchQuery::builder(location, start).build().unwrap();
        let imperial = metric.with_units(Units::Fahrenheit);

        let m = generate(&metric, seed).into_report().unwrap();
        let f = generate(&imperial, seed).into_report().unwrap();

        let (mc, fc) = (&m.current_conditions, &f.current_conditions);
        prop_assert_eq!(fc.temperature, celsius_to_fahrenheit(mc.temperature));
        prop_assert_eq!(fc.high, celsius_to_fahrenheit(mc.high));
        prop_assert_eq!(fc.low, celsius_to_fahrenheit(mc.low));
        prop_assert_eq!(fc.wind_speed, kmh_to_mph(mc.wind_speed));
        prop_assert_eq!(fc.humidity, mc.humidity);

        for (md, fd) in m.forecast.iter().zip(&f.forecast) {
            prop_assert_eq!(fd.high, celsius_to_fahrenheit(md.high));
            prop_assert_eq!(fd.low, celsius_to_fahrenheit(md.low));
            let hours = md.hourly.as_ref().unwrap().iter().zip(fd.hourly.as_ref().unwrap());
            for (mh, fh) in hours {
                prop_assert_eq!(fh.temperature, celsius_to_fahrenheit(mh.temperature));
            }
        }
    }

    /// Cached results decode to exactly what was generated.
    #[test]
    fn cached_result_is_identical(
        location in location(),
        start in start_date(),
        condition in proptest::option::of(proptest::sample::select(Condition::ALL.to_vec())),
        seed in any::<u64>(),
    ) {
        let query = SearchQuery::builder(location, start)
            .maybe_condition(condition)
            .build()
            .unwrap();

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        let engine = WeatherEngine::builder().seed(seed).no_latency().build();
        let (first, second) = runtime.block_on(async {
            (engine.query(&query).await.unwrap(), engine.query(&query).await.unwrap())
        });

        prop_assert_eq!(first, second);
        prop_assert_eq!(engine.generation_count(), 1);
    }
}
