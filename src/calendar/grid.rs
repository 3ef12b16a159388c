/// Month grid layouts.
///
/// Two variants share the Sunday-first week shape: the full grid fills its
/// padding positions with real adjacent-month dates, the mini grid leaves
/// leading slots empty and has no trailing padding at all.
use chrono::{Datelike, Duration, NaiveDate};

use super::date::{self, days_in_month};

// ─── Cells and grids ──────────────────────────────────────────────────────────

/// One cell of a rendered month grid. `date` is `None` only for mini-grid
/// leading padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date:             Option<NaiveDate>,
    pub in_current_month: bool,
}

impl DayCell {
    /// Whether this cell is the current local calendar day. Evaluated on
    /// read, so cached grids stay correct across midnight.
    pub fn is_today(&self) -> bool {
        self.date == Some(date::today())
    }
}

/// Week-partitioned layout of one month, Sunday-first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year:   i32,
    pub month0: u32,
    pub weeks:  Vec<Vec<DayCell>>,
}

impl MonthGrid {
    /// All cells in row order.
    pub fn cells(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks.iter().flatten()
    }

    pub fn week_count(&self) -> usize {
        self.weeks.len()
    }

    /// Count of cells that belong to the target month.
    pub fn days_in_target_month(&self) -> usize {
        self.cells().filter(|c| c.in_current_month).count()
    }
}

// ─── Builders ─────────────────────────────────────────────────────────────────

/// Full month layout: every week has exactly 7 cells; positions before day 1
/// hold the trailing days of the previous month and positions after the last
/// day hold the leading days of the next month, wrapping the year at the
/// December/January boundary.
pub fn compute_month_grid(year: i32, month0: u32) -> MonthGrid {
    debug_assert!(month0 < 12, "month index out of range: {month0}");
    let first   = NaiveDate::from_ymd_opt(year, month0 + 1, 1).unwrap();
    let leading = first.weekday().num_days_from_sunday() as i64;
    let days    = days_in_month(year, month0) as i64;
    let total   = ((leading + days) as u64).div_ceil(7) as i64 * 7;

    let start = first - Duration::days(leading);
    let mut weeks: Vec<Vec<DayCell>> = Vec::with_capacity(total as usize / 7);
    let mut week = Vec::with_capacity(7);
    for i in 0..total {
        let d = start + Duration::days(i);
        week.push(DayCell {
            date:             Some(d),
            in_current_month: d.month0() == month0,
        });
        if week.len() == 7 {
            weeks.push(std::mem::take(&mut week));
        }
    }
    MonthGrid { year, month0, weeks }
}

/// Mini month layout: leading slots before day 1 are empty cells and the
/// final week is left short rather than padded.
pub fn compute_mini_grid(year: i32, month0: u32) -> MonthGrid {
    debug_assert!(month0 < 12, "month index out of range: {month0}");
    let first   = NaiveDate::from_ymd_opt(year, month0 + 1, 1).unwrap();
    let leading = first.weekday().num_days_from_sunday();

    let mut weeks: Vec<Vec<DayCell>> = Vec::new();
    let mut week = Vec::with_capacity(7);
    for _ in 0..leading {
        week.push(DayCell { date: None, in_current_month: false });
    }
    for day in 1..=days_in_month(year, month0) {
        week.push(DayCell {
            date:             NaiveDate::from_ymd_opt(year, month0 + 1, day),
            in_current_month: true,
        });
        if week.len() == 7 {
            weeks.push(std::mem::take(&mut week));
        }
    }
    if !week.is_empty() {
        weeks.push(week);
    }
    MonthGrid { year, month0, weeks }
}

// ─── Day ranges ───────────────────────────────────────────────────────────────

/// Every calendar day from `start` through `end` inclusive. Steps by
/// calendar day, never by fixed 24-hour blocks, so DST transitions cannot
/// skip or repeat a date. Empty when `start > end`.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> DayRange {
    DayRange { next: Some(start).filter(|d| *d <= end), end }
}

#[derive(Debug, Clone)]
pub struct DayRange {
    next: Option<NaiveDate>,
    end:  NaiveDate,
}

impl Iterator for DayRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let d = self.next?;
        self.next = d.succ_opt().filter(|n| *n <= self.end);
        Some(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_leap_year_february_counts() {
        assert_eq!(compute_month_grid(2024, 1).days_in_target_month(), 29);
        assert_eq!(compute_month_grid(2023, 1).days_in_target_month(), 28);
    }

    #[test]
    fn test_january_leading_cells_come_from_previous_december() {
        // Jan 1, 2025 is a Wednesday; three leading cells from Dec 2024.
        let grid = compute_month_grid(2025, 0);
        let first = grid.weeks[0][0];
        assert_eq!(first.date, Some(ymd(2024, 12, 29)));
        assert!(!first.in_current_month);
        assert_eq!(grid.weeks[0][3].date, Some(ymd(2025, 1, 1)));
        assert!(grid.weeks[0][3].in_current_month);
    }

    #[test]
    fn test_december_trailing_cells_come_from_next_january() {
        // Dec 1, 2024 is a Sunday; 31 days → 4 trailing cells from Jan 2025.
        let grid = compute_month_grid(2024, 11);
        let last_week = grid.weeks.last().unwrap();
        let last = last_week.last().unwrap();
        assert_eq!(last.date, Some(ymd(2025, 1, 4)));
        assert!(!last.in_current_month);
    }

    #[test]
    fn test_mini_grid_has_no_trailing_padding() {
        // Jun 1, 2025 is a Sunday and June has 30 days: the last week holds
        // exactly two real cells and nothing else.
        let grid = compute_mini_grid(2025, 5);
        assert_eq!(grid.weeks[0][0].date, Some(ymd(2025, 6, 1)));
        let last_week = grid.weeks.last().unwrap();
        assert_eq!(last_week.len(), 2);
        assert!(last_week.iter().all(|c| c.date.is_some()));
    }

    #[test]
    fn test_days_between_crosses_month_boundary() {
        let days: Vec<NaiveDate> =
            days_between(ymd(2024, 1, 30), ymd(2024, 2, 2)).collect();
        assert_eq!(
            days,
            vec![ymd(2024, 1, 30), ymd(2024, 1, 31), ymd(2024, 2, 1), ymd(2024, 2, 2)]
        );
    }

    #[test]
    fn test_days_between_is_restartable_and_bounded() {
        let range = days_between(ymd(2024, 12, 30), ymd(2025, 1, 2));
        assert_eq!(range.clone().count(), 4);
        assert_eq!(range.count(), 4);
        assert_eq!(days_between(ymd(2025, 1, 2), ymd(2025, 1, 1)).count(), 0);
        assert_eq!(days_between(ymd(2025, 1, 1), ymd(2025, 1, 1)).count(), 1);
    }

    proptest! {
        #[test]
        fn full_grid_weeks_are_exactly_seven(year in 1900i32..2200, month0 in 0u32..12) {
            let grid = compute_month_grid(year, month0);
            prop_assert!(grid.weeks.iter().all(|w| w.len() == 7));
            prop_assert_eq!(
                grid.days_in_target_month() as u32,
                days_in_month(year, month0)
            );
            prop_assert!(grid.cells().all(|c| c.date.is_some()));
        }

        #[test]
        fn first_in_month_cell_sits_at_its_weekday(year in 1900i32..2200, month0 in 0u32..12) {
            let grid = compute_month_grid(year, month0);
            let first = NaiveDate::from_ymd_opt(year, month0 + 1, 1).unwrap();
            let idx = grid.cells().position(|c| c.in_current_month).unwrap();
            prop_assert_eq!(idx as u32, first.weekday().num_days_from_sunday());
        }

        #[test]
        fn grid_cells_are_consecutive_days(year in 1900i32..2200, month0 in 0u32..12) {
            let grid = compute_month_grid(year, month0);
            let dates: Vec<NaiveDate> = grid.cells().filter_map(|c| c.date).collect();
            prop_assert!(dates.windows(2).all(|w| w[1] == w[0].succ_opt().unwrap()));
        }

        #[test]
        fn mini_grid_pads_only_the_front(year in 1900i32..2200, month0 in 0u32..12) {
            let grid = compute_mini_grid(year, month0);
            let cells: Vec<&DayCell> = grid.cells().collect();
            let first = NaiveDate::from_ymd_opt(year, month0 + 1, 1).unwrap();
            let leading = cells.iter().take_while(|c| c.date.is_none()).count();
            prop_assert_eq!(leading as u32, first.weekday().num_days_from_sunday());
            prop_assert!(cells[leading..].iter().all(|c| c.date.is_some()));
            prop_assert_eq!(
                (cells.len() - leading) as u32,
                days_in_month(year, month0)
            );
        }
    }
}
