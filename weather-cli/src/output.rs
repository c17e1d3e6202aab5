use std::fmt::Write as _;

use chrono::NaiveDateTime;
use weather_core::{HistoryEntry, WeatherReading, WeatherResult};

const PROVIDER_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn render_result(result: &WeatherResult) -> String {
    let current = &result.current;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} ({})",
        current.city_name,
        display_time(&current.date_time, "%a %d %b %H:%M")
    );
    let _ = writeln!(out, "  {}", reading_line(current));

    if !result.forecast.is_empty() {
        let _ = writeln!(out, "\nForecast:");
        for day in &result.forecast {
            let _ = writeln!(
                out,
                "  {:<10} {}",
                display_time(&day.date_time, "%a %d %b"),
                reading_line(day)
            );
        }
    }

    out
}

pub fn render_history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "No cities in search history.\n".to_string();
    }

    entries
        .iter()
        .map(|entry| format!("{}  {}\n", entry.id, entry.city))
        .collect()
}

fn reading_line(reading: &WeatherReading) -> String {
    format!(
        "{}°F, {} [{}], humidity {}%, wind {} m/s",
        reading.temperature, reading.description, reading.icon, reading.humidity, reading.wind_speed
    )
}

/// Provider timestamps are rendered with `format`; anything unparsable is
/// shown as-is.
fn display_time(raw: &str, format: &str) -> String {
    NaiveDateTime::parse_from_str(raw, PROVIDER_TIME_FORMAT)
        .map(|dt| dt.format(format).to_string())
        .unwrap_or_else(|_| raw.to_string())
}
