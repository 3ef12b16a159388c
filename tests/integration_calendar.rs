use chrono::{Datelike, NaiveDate};
use onestep::calendar::scroll::{self, ScrollKind};
use onestep::{AutoScroll, GridCache, GridVariant, NavEvent, Navigator, ViewLevel};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_full_navigation_and_grid_workflow() {
    let mut nav = Navigator::new(Some(ymd(2025, 6, 18)));
    let mut cache = GridCache::default();
    let mut auto_scroll = AutoScroll::default();

    // 1. Year view shows mini grids for the focused year
    assert_eq!(nav.level(), ViewLevel::Year);
    let mini = cache.get(2025, 5, GridVariant::Mini).clone();
    assert_eq!(mini.days_in_target_month(), 30);

    // 2. Drill into June, then into a day
    nav.dispatch(NavEvent::SelectMonth { year: 2025, month0: 5 });
    assert_eq!(nav.current_date(), ymd(2025, 6, 1));
    assert_eq!(nav.level(), ViewLevel::Month);

    let grid = cache.get(2025, 5, GridVariant::Full).clone();
    assert_eq!(grid.cells().count() % 7, 0);
    assert!(grid
        .cells()
        .any(|c| c.date == Some(ymd(2025, 6, 18)) && c.in_current_month));

    nav.dispatch(NavEvent::SelectDay(ymd(2025, 6, 18)));
    assert_eq!(nav.level(), ViewLevel::Day);

    // 3. The day timeline scrolls to a 9 AM target, centered in the viewport
    auto_scroll.request_initial();
    assert_eq!(auto_scroll.pending(), Some(ScrollKind::Initial));
    let raw = scroll::time_of_day_offset(9, 0, 2.0);
    let target = scroll::center_offset(raw, 30.0, 0.25);
    assert_eq!(target, 10.5);
    auto_scroll.complete();
    assert_eq!(auto_scroll.pending(), None);

    // 4. Back pops all the way to the year level
    nav.dispatch(NavEvent::Back);
    assert_eq!(nav.level(), ViewLevel::Month);
    nav.dispatch(NavEvent::Back);
    assert_eq!(nav.level(), ViewLevel::Year);
    assert_eq!(nav.current_date(), ymd(2025, 6, 18));
    assert!(!nav.can_go_back());
}

#[test]
fn test_jump_to_today_resets_and_signals_once() {
    let mut nav = Navigator::new(Some(ymd(2019, 3, 9)));
    let mut auto_scroll = AutoScroll::default();

    nav.dispatch(NavEvent::SelectMonth { year: 2019, month0: 2 });
    nav.dispatch(NavEvent::SelectDay(ymd(2019, 3, 14)));
    assert_eq!(nav.history().len(), 2);

    nav.dispatch(NavEvent::JumpToToday);
    auto_scroll.request_today();

    assert_eq!(nav.level(), ViewLevel::Month);
    assert_eq!(nav.history().len(), 1);
    assert_eq!(nav.history()[0].level, ViewLevel::Year);

    // The view layer consumes the signal exactly once.
    assert_eq!(auto_scroll.pending(), Some(ScrollKind::Today));
    auto_scroll.complete();
    assert_eq!(auto_scroll.pending(), None);

    // One back press leaves the jump entirely.
    nav.dispatch(NavEvent::Back);
    assert_eq!(nav.level(), ViewLevel::Year);
    assert_eq!(nav.current_date(), ymd(2019, 3, 14));
}

#[test]
fn test_month_grids_are_cache_coherent_across_navigation() {
    let mut cache = GridCache::default();
    let first = cache.get(2024, 11, GridVariant::Full).clone();

    // Navigating away and back must serve identical content.
    for month0 in 0..12 {
        cache.get(2025, month0, GridVariant::Full);
    }
    let again = cache.get(2024, 11, GridVariant::Full).clone();
    assert_eq!(first, again);

    // December 2024 spills into January 2025 at the tail.
    let last = *again.weeks.last().unwrap().last().unwrap();
    assert_eq!(last.date.map(|d| d.month0()), Some(0));
    assert!(!last.in_current_month);
}
