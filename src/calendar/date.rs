/// Calendar-day semantics for the whole app.
///
/// Scheduled items carry local wall-clock instants; every predicate here
/// first projects them to the local calendar date, so "today" and "overdue"
/// never depend on the time of day.
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate};

pub const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

pub const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

// ─── Clock ────────────────────────────────────────────────────────────────────

/// Local calendar date of the current instant.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

// ─── Predicates ───────────────────────────────────────────────────────────────

pub fn is_same_calendar_day(a: DateTime<Local>, b: DateTime<Local>) -> bool {
    a.date_naive() == b.date_naive()
}

pub fn is_today(d: DateTime<Local>) -> bool {
    d.date_naive() == today()
}

pub fn is_tomorrow(d: DateTime<Local>) -> bool {
    d.date_naive() == today() + Duration::days(1)
}

/// Strictly before today's calendar date. Time of day is ignored: an item
/// due today at 23:59 is not overdue.
pub fn is_overdue(d: DateTime<Local>) -> bool {
    d.date_naive() < today()
}

/// Month index match only; the year is not compared.
pub fn is_same_month(date: Option<NaiveDate>, month0: u32) -> bool {
    date.is_some_and(|d| d.month0() == month0)
}

// ─── Week / month arithmetic ──────────────────────────────────────────────────

/// Sunday of the week containing `d`.
pub fn week_start(d: NaiveDate) -> NaiveDate {
    d - Duration::days(d.weekday().num_days_from_sunday() as i64)
}

/// The seven days (Sunday through Saturday) of the week containing `d`.
pub fn week_dates(d: NaiveDate) -> [NaiveDate; 7] {
    let start = week_start(d);
    std::array::from_fn(|i| start + Duration::days(i as i64))
}

/// Day count of the month, leap-aware. `month0` is zero-based (0 = January).
pub fn days_in_month(year: i32, month0: u32) -> u32 {
    debug_assert!(month0 < 12, "month index out of range: {month0}");
    let first = NaiveDate::from_ymd_opt(year, month0 + 1, 1).unwrap();
    let next = if month0 == 11 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month0 + 2, 1)
    };
    (next.unwrap() - first).num_days() as u32
}

// ─── Formatting ───────────────────────────────────────────────────────────────

pub fn month_name(month0: u32) -> &'static str {
    debug_assert!(month0 < 12, "month index out of range: {month0}");
    MONTH_NAMES[month0 as usize % 12]
}

pub fn short_month_name(month0: u32) -> &'static str {
    &month_name(month0)[..3]
}

/// "Jan 5, 2026"
pub fn format_date(d: NaiveDate) -> String {
    d.format("%b %-d, %Y").to_string()
}

/// "08:30"
pub fn format_time(t: DateTime<Local>) -> String {
    t.format("%H:%M").to_string()
}

/// "Jan 5, 2026 08:30"
pub fn format_date_time(t: DateTime<Local>) -> String {
    format!("{} {}", format_date(t.date_naive()), format_time(t))
}

/// Timeline hour label: 0 → "12 AM", 12 → "12 PM", 15 → "3 PM".
pub fn format_hour(hour: u32) -> String {
    match hour {
        0 | 24 => "12 AM".to_owned(),
        12 => "12 PM".to_owned(),
        h if h < 12 => format!("{h} AM"),
        h => format!("{} PM", h - 12),
    }
}
