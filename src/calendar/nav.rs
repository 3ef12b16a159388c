/// Hierarchical year→month→week→day navigation.
///
/// Drilling into a finer level pushes the departed (date, level) frame onto
/// the history stack; lateral motion (month paging, day stepping) does not.
use chrono::{Datelike, Duration, NaiveDate};

use super::date::{self, days_in_month, week_start};

/// Granularity of the calendar view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewLevel {
    Year,
    Month,
    Week,
    Day,
}

/// A saved (date, level) pair for back navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavFrame {
    pub date:  NaiveDate,
    pub level: ViewLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    /// A month cell was chosen in the year view.
    SelectMonth { year: i32, month0: u32 },
    /// A day cell was chosen in the month view.
    SelectDay(NaiveDate),
    /// A week row was chosen; focus snaps to the week's Sunday.
    SelectWeek(NaiveDate),
    /// Lateral month paging within the month view; keeps year, clamps day.
    PageMonth(u32),
    Back,
    JumpToToday,
}

#[derive(Debug, Clone)]
pub struct Navigator {
    current_date: NaiveDate,
    level:        ViewLevel,
    history:      Vec<NavFrame>,
}

impl Navigator {
    /// Starts at the year level, focused on `initial` or today.
    pub fn new(initial: Option<NaiveDate>) -> Self {
        Self {
            current_date: initial.unwrap_or_else(date::today),
            level:        ViewLevel::Year,
            history:      Vec::new(),
        }
    }

    pub fn current_date(&self) -> NaiveDate {
        self.current_date
    }

    pub fn level(&self) -> ViewLevel {
        self.level
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn history(&self) -> &[NavFrame] {
        &self.history
    }

    pub fn dispatch(&mut self, event: NavEvent) {
        match event {
            NavEvent::SelectMonth { year, month0 } => {
                debug_assert!(month0 < 12, "month index out of range: {month0}");
                self.push_frame();
                self.current_date = NaiveDate::from_ymd_opt(year, month0 + 1, 1).unwrap();
                self.level = ViewLevel::Month;
            }
            NavEvent::SelectDay(d) => {
                self.push_frame();
                self.current_date = d;
                self.level = ViewLevel::Day;
            }
            NavEvent::SelectWeek(d) => {
                self.push_frame();
                self.current_date = week_start(d);
                self.level = ViewLevel::Week;
            }
            NavEvent::PageMonth(month0) => {
                debug_assert!(month0 < 12, "month index out of range: {month0}");
                let year = self.current_date.year();
                let day = self.current_date.day().min(days_in_month(year, month0));
                self.current_date = NaiveDate::from_ymd_opt(year, month0 + 1, day).unwrap();
            }
            NavEvent::Back => {
                // Empty history: stay put.
                if let Some(frame) = self.history.pop() {
                    self.current_date = frame.date;
                    self.level = frame.level;
                }
            }
            NavEvent::JumpToToday => {
                // The pre-jump state is kept as a single year-level frame so
                // one back press leaves the jump entirely.
                self.history = vec![NavFrame {
                    date:  self.current_date,
                    level: ViewLevel::Year,
                }];
                self.current_date = date::today();
                self.level = ViewLevel::Month;
            }
        }
    }

    /// Lateral day stepping for cursor movement; keeps level and history.
    pub fn move_focus(&mut self, days: i64) {
        self.current_date += Duration::days(days);
    }

    /// Direct focus change without a level change or history push (header
    /// date taps, year paging).
    pub fn set_focus(&mut self, date: NaiveDate) {
        self.current_date = date;
    }

    fn push_frame(&mut self) {
        self.history.push(NavFrame {
            date:  self.current_date,
            level: self.level,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_select_month_then_back_round_trips() {
        let initial = ymd(2024, 3, 15);
        let mut nav = Navigator::new(Some(initial));
        assert_eq!(nav.level(), ViewLevel::Year);
        assert!(!nav.can_go_back());

        nav.dispatch(NavEvent::SelectMonth { year: 2025, month0: 5 });
        assert_eq!(nav.current_date(), ymd(2025, 6, 1));
        assert_eq!(nav.level(), ViewLevel::Month);
        assert_eq!(nav.history(), [NavFrame { date: initial, level: ViewLevel::Year }]);

        nav.dispatch(NavEvent::Back);
        assert_eq!(nav.current_date(), initial);
        assert_eq!(nav.level(), ViewLevel::Year);
        assert!(!nav.can_go_back());
    }

    #[test]
    fn test_back_on_empty_history_is_a_no_op() {
        let initial = ymd(2024, 3, 15);
        let mut nav = Navigator::new(Some(initial));
        nav.dispatch(NavEvent::Back);
        nav.dispatch(NavEvent::Back);
        assert_eq!(nav.current_date(), initial);
        assert_eq!(nav.level(), ViewLevel::Year);
        assert!(!nav.can_go_back());
    }

    #[test]
    fn test_drill_to_day_stacks_two_frames() {
        let mut nav = Navigator::new(Some(ymd(2025, 1, 1)));
        nav.dispatch(NavEvent::SelectMonth { year: 2025, month0: 0 });
        nav.dispatch(NavEvent::SelectDay(ymd(2025, 1, 20)));
        assert_eq!(nav.level(), ViewLevel::Day);
        assert_eq!(nav.current_date(), ymd(2025, 1, 20));
        assert_eq!(nav.history().len(), 2);

        nav.dispatch(NavEvent::Back);
        assert_eq!(nav.level(), ViewLevel::Month);
        nav.dispatch(NavEvent::Back);
        assert_eq!(nav.level(), ViewLevel::Year);
    }

    #[test]
    fn test_select_week_snaps_to_sunday() {
        let mut nav = Navigator::new(Some(ymd(2025, 6, 1)));
        // 2025-06-18 is a Wednesday.
        nav.dispatch(NavEvent::SelectWeek(ymd(2025, 6, 18)));
        assert_eq!(nav.level(), ViewLevel::Week);
        assert_eq!(nav.current_date(), ymd(2025, 6, 15));
    }

    #[test]
    fn test_page_month_clamps_day_and_skips_history() {
        let mut nav = Navigator::new(Some(ymd(2025, 1, 31)));
        nav.dispatch(NavEvent::SelectMonth { year: 2025, month0: 0 });
        let depth = nav.history().len();

        nav.dispatch(NavEvent::PageMonth(1));
        assert_eq!(nav.current_date(), ymd(2025, 2, 1));
        assert_eq!(nav.history().len(), depth);
    }

    #[test]
    fn test_page_month_clamps_to_month_length() {
        let mut nav = Navigator::new(Some(ymd(2025, 1, 31)));
        nav.dispatch(NavEvent::SelectDay(ymd(2025, 1, 31)));
        nav.dispatch(NavEvent::PageMonth(3));
        // April has 30 days; the 31st clamps down.
        assert_eq!(nav.current_date(), ymd(2025, 4, 30));
    }

    #[test]
    fn test_jump_to_today_replaces_history_with_year_frame() {
        let initial = ymd(2020, 2, 2);
        let mut nav = Navigator::new(Some(initial));
        nav.dispatch(NavEvent::SelectMonth { year: 2020, month0: 1 });
        nav.dispatch(NavEvent::SelectDay(ymd(2020, 2, 10)));
        let pre_jump = nav.current_date();

        nav.dispatch(NavEvent::JumpToToday);
        assert_eq!(nav.current_date(), date::today());
        assert_eq!(nav.level(), ViewLevel::Month);
        assert_eq!(
            nav.history(),
            [NavFrame { date: pre_jump, level: ViewLevel::Year }]
        );

        nav.dispatch(NavEvent::Back);
        assert_eq!(nav.current_date(), pre_jump);
        assert_eq!(nav.level(), ViewLevel::Year);
    }

    #[test]
    fn test_move_focus_is_lateral() {
        let mut nav = Navigator::new(Some(ymd(2025, 2, 27)));
        nav.dispatch(NavEvent::SelectDay(ymd(2025, 2, 27)));
        let depth = nav.history().len();
        nav.move_focus(2);
        assert_eq!(nav.current_date(), ymd(2025, 3, 1));
        nav.move_focus(-2);
        assert_eq!(nav.current_date(), ymd(2025, 2, 27));
        assert_eq!(nav.history().len(), depth);
    }
}
