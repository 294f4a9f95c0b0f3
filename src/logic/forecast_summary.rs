use crate::models::{DaySummary, ForecastSample, Language};
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::HashSet;

/// Number of distinct days shown on the forecast screen
pub const FORECAST_DAYS: usize = 3;

/// Collapse provider samples into per-day summaries.
///
/// Days appear in the order their first sample appears. Every sample sharing
/// a date contributes to that day no matter where it sits in the feed.
/// Samples with unparseable timestamps are skipped.
pub fn summarize_days(
    samples: &[ForecastSample],
    language: Language,
    max_days: usize,
) -> Vec<DaySummary> {
    let mut processed: HashSet<NaiveDate> = HashSet::new();
    let mut days = Vec::new();

    for sample in samples {
        if days.len() >= max_days {
            break;
        }

        let Some(date) = sample.date() else {
            tracing::warn!("Skipping forecast sample with bad timestamp {:?}", sample.timestamp);
            continue;
        };

        if !processed.insert(date) {
            continue;
        }

        let same_day: Vec<&ForecastSample> = samples
            .iter()
            .filter(|s| s.date() == Some(date))
            .collect();

        days.push(aggregate_day(date, &same_day, language));
    }

    days
}

fn aggregate_day(date: NaiveDate, samples: &[&ForecastSample], language: Language) -> DaySummary {
    let min_temp_c = samples
        .iter()
        .map(|s| s.temp_min_c)
        .fold(f64::INFINITY, f64::min);

    let max_temp_c = samples
        .iter()
        .map(|s| s.temp_max_c)
        .fold(f64::NEG_INFINITY, f64::max);

    DaySummary {
        date,
        min_temp_c,
        max_temp_c,
        dominant_condition: dominant_condition(samples),
        label: day_label(date, language),
    }
}

/// Most frequent description; ties go to the one seen first
fn dominant_condition(samples: &[&ForecastSample]) -> String {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for sample in samples {
        match counts.iter_mut().find(|(d, _)| *d == sample.description) {
            Some((_, count)) => *count += 1,
            None => counts.push((&sample.description, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (description, count) in counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((description, count));
        }
    }

    best.map(|(d, _)| d.to_string()).unwrap_or_default()
}

pub fn day_label(date: NaiveDate, language: Language) -> String {
    match language {
        Language::English => date.format("%a, %b %d").to_string(),
        Language::Luo => format!("{}, {}", luo_weekday(date.weekday()), date.format("%b %d")),
    }
}

fn luo_weekday(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Wuok Tich",
        Weekday::Tue => "Tich Ariyo",
        Weekday::Wed => "Tich Adek",
        Weekday::Thu => "Tich Angwen",
        Weekday::Fri => "Tich Abich",
        Weekday::Sat => "Ngeso",
        Weekday::Sun => "Jumapil",
    }
}

/// One forecast screen line, e.g. `Wed, May 01: Temp: 18°C-27°C, Light rain`
pub fn format_day_line(day: &DaySummary, language: Language) -> String {
    let temp_label = match language {
        Language::English => "Temp",
        Language::Luo => "Liet",
    };

    format!(
        "{}: {}: {:.0}°C-{:.0}°C, {}",
        day.label,
        temp_label,
        day.min_temp_c,
        day.max_temp_c,
        capitalize(&day.dominant_condition)
    )
}

/// Upper-case the first letter and lower-case the rest
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
