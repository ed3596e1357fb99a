//! # Skymuse Benchmarks
//!
//! Selection runs once per invocation, so these mostly guard against
//! accidental allocation-heavy changes in the rule chain and the parsers.
//!
//! ```bash
//! cargo bench
//! cargo bench selection
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use skymuse::conditions::{self, AstroSnapshot, WeatherSnapshot};
use skymuse::selector;
use std::hint::black_box;

fn at(month: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, month, 10)
        .expect("valid date")
        .and_hms_opt(hour, 0, 0)
        .expect("valid time")
}

fn bench_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection");
    let weather = WeatherSnapshot {
        temperature_celsius: 14.0,
        condition_main: "Clouds".to_string(),
    };
    let astro = AstroSnapshot {
        moon_phase: "WAXING_CRESCENT".to_string(),
    };

    // Hours chosen so each case stops at a different tier.
    for (name, hour) in [("time_of_day", 7), ("season_fallthrough", 14)] {
        group.bench_with_input(BenchmarkId::new("select", name), &hour, |b, &hour| {
            b.iter(|| selector::select(black_box(at(10, hour)), Some(&weather), Some(&astro)))
        });
    }

    group.bench_function("no_data", |b| {
        b.iter(|| selector::select_theme(black_box(at(2, 23)), None, None))
    });

    group.bench_function("season_for_month", |b| {
        b.iter(|| (1..=12).map(|m| selector::season_for_month(black_box(m))).count())
    });

    group.finish();
}

fn bench_parsing(c: &mut Criterion) {
    let weather_body = r#"{"weather":[{"id":211,"main":"Thunderstorm"}],"main":{"temp":24.6,"humidity":71}}"#;
    let astro_body = r#"{"date":"2026-10-19","moon_phase":"FULL_MOON","moonrise":"18:02"}"#;

    c.bench_function("parse_weather", |b| {
        b.iter(|| conditions::parse_weather("weather", black_box(weather_body)))
    });
    c.bench_function("parse_astronomy", |b| {
        b.iter(|| conditions::parse_astronomy("astronomy", black_box(astro_body)))
    });
}

criterion_group!(benches, bench_selection, bench_parsing);
criterion_main!(benches);
