//! Terminal rendering: threshold colors, progress bars, and countdowns.

use crate::types::{LimitUsage, UsageSnapshot};
use chrono::{DateTime, NaiveDateTime, Utc};

// ANSI codes
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

// Nerd font icons (Material Design via nerd-fonts)
const ICON_CLAUDE: &str = "󰧱"; // nf-md-robot
const ICON_TIMER: &str = "󰔟"; // nf-md-timer_sand
const ICON_CALENDAR: &str = "󰸗"; // nf-md-calendar_week
const ICON_REFRESH: &str = "󰑓"; // nf-md-restore

const BAR_WIDTH: usize = 20;

/// Multi-line view: title plus one row per window.
pub fn render_detailed(usage: &UsageSnapshot, org_name: Option<&str>) -> String {
    let title = match org_name {
        Some(name) => format!("Claude Pro — {name}"),
        None => "Claude Pro Usage".to_string(),
    };

    let mut out = format!("\n  {BOLD}{CYAN}{ICON_CLAUDE} {title}{RESET}\n\n");
    out.push_str(&render_row(ICON_TIMER, "5-Hour", &usage.five_hour));
    out.push('\n');
    out.push_str(&render_row(ICON_CALENDAR, "7-Day", &usage.seven_day));
    out.push('\n');
    out
}

/// One-line view: both windows' icon, percentage, and time to reset.
pub fn render_compact(usage: &UsageSnapshot) -> String {
    let five = usage.five_hour.utilization.clamp(0.0, 100.0);
    let seven = usage.seven_day.utilization.clamp(0.0, 100.0);
    format!(
        "{}{ICON_TIMER}{RESET} {five:.1}% {}   {}{ICON_CALENDAR}{RESET} {seven:.1}% {}\n",
        utilization_color(five),
        format_time_left(usage.five_hour.resets_at.as_deref()),
        utilization_color(seven),
        format_time_left(usage.seven_day.resets_at.as_deref()),
    )
}

fn render_row(icon: &str, label: &str, usage: &LimitUsage) -> String {
    let pct = usage.utilization.clamp(0.0, 100.0);
    let color = utilization_color(pct);
    let bar = progress_bar(pct, BAR_WIDTH);
    let time_left = format_time_left(usage.resets_at.as_deref());
    format!(
        "  {icon}  {label:<10} {color}{bar}{RESET}  {BOLD}{pct:5.1}%{RESET}   \
         {DIM}{ICON_REFRESH} {time_left}{RESET}\n"
    )
}

/// Fill proportional to utilization, rounded to the nearest cell.
fn progress_bar(utilization: f64, width: usize) -> String {
    let clamped = utilization.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0 * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Threshold colors; 60 and 85 belong to the higher tier.
fn utilization_color(utilization: f64) -> &'static str {
    if utilization >= 85.0 {
        RED
    } else if utilization >= 60.0 {
        YELLOW
    } else {
        GREEN
    }
}

fn format_time_left(resets_at: Option<&str>) -> String {
    format_time_left_at(resets_at, Utc::now())
}

fn format_time_left_at(resets_at: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(raw) = resets_at else {
        return "—".to_string();
    };
    let Some(reset) = parse_reset_timestamp(raw) else {
        return "unknown".to_string();
    };

    let left = reset.signed_duration_since(now);
    if left <= chrono::Duration::zero() {
        // The boundary has passed but the snapshot predates the reset.
        return "resetting…".to_string();
    }

    let days = left.num_days();
    let hours = left.num_hours() % 24;
    let minutes = left.num_minutes() % 60;

    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// RFC 3339 (fractional seconds included) first, then a bare date-time
/// taken as UTC.
fn parse_reset_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap()
    }

    fn window(utilization: f64, resets_at: Option<&str>) -> LimitUsage {
        LimitUsage {
            utilization,
            resets_at: resets_at.map(String::from),
        }
    }

    fn filled_cells(bar: &str) -> usize {
        bar.chars().filter(|c| *c == '█').count()
    }

    #[test]
    fn test_utilization_color_thresholds() {
        assert_eq!(utilization_color(0.0), GREEN);
        assert_eq!(utilization_color(59.9), GREEN);
        assert_eq!(utilization_color(60.0), YELLOW);
        assert_eq!(utilization_color(84.9), YELLOW);
        assert_eq!(utilization_color(85.0), RED);
        assert_eq!(utilization_color(100.0), RED);
    }

    #[test]
    fn test_progress_bar_bounds() {
        let empty = progress_bar(0.0, 20);
        assert_eq!(filled_cells(&empty), 0);
        assert_eq!(empty.chars().count(), 20);

        let full = progress_bar(100.0, 20);
        assert_eq!(filled_cells(&full), 20);
        assert_eq!(full.chars().count(), 20);
    }

    #[test]
    fn test_progress_bar_rounds_to_nearest_cell() {
        assert_eq!(filled_cells(&progress_bar(50.0, 20)), 10);
        assert_eq!(filled_cells(&progress_bar(92.4, 20)), 18);
        // 2.5% of 20 cells is half a cell, rounds up
        assert_eq!(filled_cells(&progress_bar(2.5, 20)), 1);
    }

    #[test]
    fn test_progress_bar_clamps_out_of_range() {
        assert_eq!(filled_cells(&progress_bar(-5.0, 20)), 0);
        assert_eq!(filled_cells(&progress_bar(150.0, 20)), 20);
    }

    #[test]
    fn test_progress_bar_monotone() {
        let mut previous = 0;
        for tenth in 0..=1000 {
            let filled = filled_cells(&progress_bar(tenth as f64 / 10.0, 20));
            assert!(filled >= previous);
            assert!(filled <= 20);
            previous = filled;
        }
    }

    #[test]
    fn test_format_time_left_missing() {
        assert_eq!(format_time_left_at(None, fixed_now()), "—");
    }

    #[test]
    fn test_format_time_left_unparsable() {
        assert_eq!(format_time_left_at(Some("soon"), fixed_now()), "unknown");
    }

    #[test]
    fn test_format_time_left_past() {
        assert_eq!(
            format_time_left_at(Some("2026-08-06T11:00:00Z"), fixed_now()),
            "resetting…"
        );
    }

    #[test]
    fn test_format_time_left_exactly_now() {
        assert_eq!(
            format_time_left_at(Some("2026-08-06T12:00:00Z"), fixed_now()),
            "resetting…"
        );
    }

    #[test]
    fn test_format_time_left_minutes_only() {
        assert_eq!(
            format_time_left_at(Some("2026-08-06T12:45:00Z"), fixed_now()),
            "45m"
        );
    }

    #[test]
    fn test_format_time_left_hours_and_minutes() {
        assert_eq!(
            format_time_left_at(Some("2026-08-06T13:30:00Z"), fixed_now()),
            "1h 30m"
        );
    }

    #[test]
    fn test_format_time_left_days() {
        assert_eq!(
            format_time_left_at(Some("2026-08-08T15:00:00Z"), fixed_now()),
            "2d 3h 0m"
        );
    }

    #[test]
    fn test_format_time_left_fractional_seconds() {
        assert_eq!(
            format_time_left_at(Some("2026-08-06T12:30:00.000Z"), fixed_now()),
            "30m"
        );
    }

    #[test]
    fn test_format_time_left_numeric_offset() {
        // 14:00 at +01:00 is 13:00 UTC
        assert_eq!(
            format_time_left_at(Some("2026-08-06T14:00:00+01:00"), fixed_now()),
            "1h 0m"
        );
    }

    #[test]
    fn test_format_time_left_bare_datetime_is_utc() {
        assert_eq!(
            format_time_left_at(Some("2026-08-06T12:30:00"), fixed_now()),
            "30m"
        );
    }

    #[test]
    fn test_render_detailed_title() {
        let usage = UsageSnapshot {
            five_hour: window(10.0, None),
            seven_day: window(20.0, None),
        };
        assert!(render_detailed(&usage, Some("Acme")).contains("Claude Pro — Acme"));
        assert!(render_detailed(&usage, None).contains("Claude Pro Usage"));
    }

    #[test]
    fn test_render_detailed_rows() {
        let usage = UsageSnapshot {
            five_hour: window(92.4, None),
            seven_day: window(40.0, None),
        };
        let out = render_detailed(&usage, None);
        assert!(out.contains("5-Hour"));
        assert!(out.contains("7-Day"));
        assert!(out.contains(" 92.4%"));
        assert!(out.contains(" 40.0%"));
        assert!(out.contains(RED));
        assert!(out.contains(GREEN));
        assert!(out.contains(&progress_bar(92.4, BAR_WIDTH)));
    }

    #[test]
    fn test_render_detailed_clamps_utilization() {
        let usage = UsageSnapshot {
            five_hour: window(120.0, None),
            seven_day: window(-3.0, None),
        };
        let out = render_detailed(&usage, None);
        assert!(out.contains("100.0%"));
        assert!(out.contains("  0.0%"));
    }

    #[test]
    fn test_render_compact_mixed_windows() {
        // 30m45s out keeps the countdown at "30m" even if the test runs slow
        let resets = (Utc::now() + chrono::Duration::seconds(30 * 60 + 45)).to_rfc3339();
        let usage = UsageSnapshot {
            five_hour: window(92.4, Some(&resets)),
            seven_day: window(40.0, None),
        };
        let out = render_compact(&usage);

        assert!(!out.contains('█'));
        assert!(out.contains(&format!("{RED}{ICON_TIMER}{RESET} 92.4% 30m")));
        assert!(out.contains(&format!("{GREEN}{ICON_CALENDAR}{RESET} 40.0% —")));
    }
}
