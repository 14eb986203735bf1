//! Output formatting for trip reports.
//!
//! Supports human-readable text, pretty-printed debug logging, and JSON.

use std::io::{self, Write};

use anyhow::Result;
use tracing::debug;

use crate::analyzers::types::{
    CategoryCount, CityReport, DurationStats, Hms, Section, StationStats, TimeStats, UserStats,
};
use crate::filter::month_name;
use crate::trips::Trip;

/// Printed after every report section.
pub fn separator() -> String {
    "-".repeat(40)
}

/// Capitalizes the first letter of every word ("new york city" -> "New York City").
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Hours are only shown when there is at least one.
pub fn format_hms(hms: &Hms) -> String {
    if hms.hours > 0 {
        format!(
            "{} hours, {} minutes and {} seconds",
            hms.hours, hms.minutes, hms.seconds
        )
    } else {
        format!("{} minutes and {} seconds", hms.minutes, hms.seconds)
    }
}

/// One line per trip for the raw data viewer.
pub fn render_trip(trip: &Trip) -> String {
    let mut line = format!(
        "{} | {:>8.0}s | {} -> {} | {}",
        trip.start_time.format("%Y-%m-%d %H:%M:%S"),
        trip.trip_duration,
        trip.start_station,
        trip.end_station,
        trip.user_type.as_deref().unwrap_or("-"),
    );
    if let Some(gender) = &trip.gender {
        line.push_str(&format!(" | {gender}"));
    }
    if let Some(year) = trip.birth_year {
        line.push_str(&format!(" | {year}"));
    }
    line
}

pub fn render_time_stats(stats: &TimeStats, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\nMost frequent times of travel\n")?;
    writeln!(
        out,
        "The most popular month is: {} ({})",
        month_name(stats.popular_month).unwrap_or("Unknown"),
        stats.popular_month
    )?;
    writeln!(out, "The most popular day is: {}", stats.popular_day)?;
    writeln!(out, "The most popular start hour is: {}", stats.popular_hour)
}

pub fn render_station_stats(stats: &StationStats, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\nMost popular stations and trip\n")?;
    writeln!(out, "The most commonly used start station is: {}", stats.common_start)?;
    writeln!(out, "The most commonly used end station is: {}", stats.common_end)?;
    writeln!(out, "The most frequent trip is from {}", stats.common_trip)
}

pub fn render_duration_stats(stats: &DurationStats, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\nTrip duration\n")?;
    writeln!(out, "The total trip duration is {}", format_hms(&stats.total))?;
    writeln!(out, "The average trip duration is {}", format_hms(&stats.average))
}

pub fn render_user_stats(stats: &UserStats, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\nUser stats\n")?;
    writeln!(out, "Users by type:")?;
    render_counts(&stats.user_types, out)?;

    match &stats.genders {
        Some(genders) => {
            writeln!(out, "Users by gender:")?;
            render_counts(genders, out)?;
        }
        None => writeln!(out, "Gender: not available for this dataset")?,
    }

    match &stats.birth_years {
        Some(years) => {
            writeln!(out, "The earliest birth year is: {}", years.earliest)?;
            writeln!(out, "The most recent birth year is: {}", years.latest)?;
            writeln!(out, "The most common birth year is: {}", years.common)
        }
        None => writeln!(out, "Birth year: not available for this dataset"),
    }
}

fn render_counts(counts: &[CategoryCount], out: &mut impl Write) -> io::Result<()> {
    if counts.is_empty() {
        return writeln!(out, "  (none recorded)");
    }
    for c in counts {
        writeln!(out, "  {}: {}", c.value, c.count)?;
    }
    Ok(())
}

fn render_section<T, W: Write>(
    section: &Section<T>,
    out: &mut W,
    render: impl FnOnce(&T, &mut W) -> io::Result<()>,
) -> io::Result<()> {
    render(&section.stats, out)?;
    writeln!(out, "\nThis took {:.6} seconds to complete!", section.elapsed_secs)?;
    writeln!(out, "{}", separator())
}

/// Writes every section of `report` as text.
pub fn render_report(report: &CityReport, out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "\n{}: {} trips for month/s: {}, day/s: {}",
        title_case(&report.city),
        report.trips,
        report.month,
        report.day
    )?;
    writeln!(out, "{}", separator())?;
    render_section(&report.time, out, |s, w| render_time_stats(s, w))?;
    render_section(&report.stations, out, |s, w| render_station_stats(s, w))?;
    render_section(&report.durations, out, |s, w| render_duration_stats(s, w))?;
    render_section(&report.users, out, |s, w| render_user_stats(s, w))
}

/// Logs a report using Rust's debug pretty-print format.
pub fn print_pretty(report: &CityReport) {
    debug!("{:#?}", report);
}

/// Writes a report as pretty-printed JSON.
pub fn print_json(report: &CityReport, out: &mut impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::BirthYearStats;
    use chrono::NaiveDate;

    fn render<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("new york city"), "New York City");
        assert_eq!(title_case("chicago"), "Chicago");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_format_hms_shows_hours_only_when_present() {
        assert_eq!(format_hms(&Hms::from_seconds(184)), "3 minutes and 4 seconds");
        assert_eq!(
            format_hms(&Hms::from_seconds(6739)),
            "1 hours, 52 minutes and 19 seconds"
        );
        assert_eq!(format_hms(&Hms::from_seconds(0)), "0 minutes and 0 seconds");
    }

    #[test]
    fn test_render_user_stats_unavailable() {
        let stats = UserStats {
            user_types: vec![CategoryCount::new("Subscriber", 3)],
            genders: None,
            birth_years: None,
        };
        let text = render(|w| render_user_stats(&stats, w));
        assert!(text.contains("  Subscriber: 3"));
        assert!(text.contains("Gender: not available for this dataset"));
        assert!(text.contains("Birth year: not available for this dataset"));
    }

    #[test]
    fn test_render_user_stats_available() {
        let stats = UserStats {
            user_types: vec![],
            genders: Some(vec![CategoryCount::new("Female", 2)]),
            birth_years: Some(BirthYearStats {
                earliest: 1962,
                latest: 2001,
                common: 1985,
            }),
        };
        let text = render(|w| render_user_stats(&stats, w));
        assert!(text.contains("  (none recorded)"));
        assert!(text.contains("  Female: 2"));
        assert!(text.contains("The most common birth year is: 1985"));
    }

    #[test]
    fn test_render_time_stats() {
        let stats = TimeStats {
            popular_month: 3,
            popular_day: "Friday".to_string(),
            popular_hour: 17,
        };
        let text = render(|w| render_time_stats(&stats, w));
        assert!(text.contains("The most popular month is: March (3)"));
        assert!(text.contains("The most popular day is: Friday"));
        assert!(text.contains("The most popular start hour is: 17"));
    }

    #[test]
    fn test_render_trip_line() {
        let t = NaiveDate::from_ymd_opt(2017, 1, 2)
            .unwrap()
            .and_hms_opt(8, 15, 0)
            .unwrap();
        let trip = Trip::new(t, 125.0, "Canal St", "Clinton St").with_rider(
            Some("Subscriber"),
            Some("Male"),
            Some(1985),
        );
        assert_eq!(
            render_trip(&trip),
            "2017-01-02 08:15:00 |      125s | Canal St -> Clinton St | Subscriber | Male | 1985"
        );

        let bare = Trip::new(t, 60.0, "A", "B");
        assert!(render_trip(&bare).ends_with("| A -> B | -"));
    }

    #[test]
    fn test_separator_width() {
        assert_eq!(separator().len(), 40);
    }
}
