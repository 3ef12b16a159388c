/// Long-range activity grid: one column per week, Sunday-aligned, from a
/// fixed start date (account creation) through today. Rendered like a
/// contribution graph with per-day intensity buckets.
use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use crate::calendar::date::short_month_name;
use crate::calendar::grid::days_between;

#[derive(Debug, Clone)]
pub struct ActivityGrid {
    /// Week columns of seven slots; `None` marks the leading alignment
    /// padding and the tail of the final partial week.
    pub weeks: Vec<[Option<NaiveDate>; 7]>,
}

impl ActivityGrid {
    /// Layout covering `start` through `end` inclusive.
    pub fn span(start: NaiveDate, end: NaiveDate) -> Self {
        let leading = start.weekday().num_days_from_sunday() as usize;
        let mut days: Vec<Option<NaiveDate>> = vec![None; leading];
        days.extend(days_between(start, end).map(Some));

        let weeks = days
            .chunks(7)
            .map(|chunk| {
                let mut week = [None; 7];
                week[..chunk.len()].copy_from_slice(chunk);
                week
            })
            .collect();
        Self { weeks }
    }

    pub fn week_count(&self) -> usize {
        self.weeks.len()
    }

    /// Short month labels keyed by the week column where that month first
    /// appears; the start month labels column 0.
    pub fn month_labels(&self) -> Vec<(usize, &'static str)> {
        let mut labels = Vec::new();
        let mut last: Option<(i32, u32)> = None;
        for (i, week) in self.weeks.iter().enumerate() {
            let Some(d) = week.iter().flatten().next() else { continue };
            let key = (d.year(), d.month0());
            if last != Some(key) {
                labels.push((i, short_month_name(d.month0())));
                last = Some(key);
            }
        }
        labels
    }
}

/// Occurrences per calendar day.
pub fn daily_counts(days: impl IntoIterator<Item = NaiveDate>) -> HashMap<NaiveDate, u32> {
    let mut counts = HashMap::new();
    for day in days {
        *counts.entry(day).or_insert(0) += 1;
    }
    counts
}

/// Bucket a per-day count into one of five display intensities.
pub fn intensity(count: u32) -> u8 {
    match count {
        0 => 0,
        1..=2 => 1,
        3..=4 => 2,
        5..=6 => 3,
        _ => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_span_aligns_start_to_its_weekday() {
        // 2025-06-18 is a Wednesday: three leading empty slots.
        let grid = ActivityGrid::span(ymd(2025, 6, 18), ymd(2025, 6, 28));
        assert_eq!(grid.weeks[0][..3], [None, None, None]);
        assert_eq!(grid.weeks[0][3], Some(ymd(2025, 6, 18)));
        assert_eq!(grid.week_count(), 2);
        assert_eq!(grid.weeks[1][6], Some(ymd(2025, 6, 28)));
    }

    #[test]
    fn test_span_single_day() {
        let grid = ActivityGrid::span(ymd(2025, 6, 15), ymd(2025, 6, 15));
        // A Sunday: no padding, one column, one filled slot.
        assert_eq!(grid.week_count(), 1);
        assert_eq!(grid.weeks[0][0], Some(ymd(2025, 6, 15)));
        assert!(grid.weeks[0][1..].iter().all(Option::is_none));
    }

    #[test]
    fn test_month_labels_mark_month_starts() {
        let grid = ActivityGrid::span(ymd(2025, 1, 20), ymd(2025, 3, 10));
        let labels = grid.month_labels();
        assert_eq!(labels.first(), Some(&(0, "Jan")));
        assert!(labels.contains(&(2, "Feb")));
        let months: Vec<&str> = labels.iter().map(|(_, m)| *m).collect();
        assert_eq!(months, ["Jan", "Feb", "Mar"]);
    }

    #[test]
    fn test_daily_counts_accumulate() {
        let d = ymd(2025, 5, 5);
        let counts = daily_counts([d, d, ymd(2025, 5, 6)]);
        assert_eq!(counts[&d], 2);
        assert_eq!(counts[&ymd(2025, 5, 6)], 1);
        assert!(!counts.contains_key(&ymd(2025, 5, 7)));
    }

    #[test]
    fn test_intensity_buckets() {
        assert_eq!(intensity(0), 0);
        assert_eq!(intensity(1), 1);
        assert_eq!(intensity(2), 1);
        assert_eq!(intensity(3), 2);
        assert_eq!(intensity(5), 3);
        assert_eq!(intensity(7), 4);
        assert_eq!(intensity(100), 4);
    }
}
