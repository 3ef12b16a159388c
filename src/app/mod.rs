use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate, Timelike};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::{
    calendar::{
        date, scroll,
        scroll::ScrollKind,
        AutoScroll, GridCache, NavEvent, Navigator, ViewLevel,
    },
    config::AppConfig,
    store::Store,
    tasks::{self, Priority, ScheduledItem, Todo},
    ui::{draw, FormStep, InputMode, TimeField, UiState},
};

// ─── Panel focus model ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    Calendar,
    ScheduleList,
    TodoList,
    ScheduleForm,
    TodoForm,
    Help,
}

// ─── App state ────────────────────────────────────────────────────────────────

pub struct App {
    pub store:         Store,
    pub config:        AppConfig,
    pub nav:           Navigator,
    pub cache:         GridCache,
    pub auto_scroll:   AutoScroll,
    pub active_panel:  Panel,
    pub todos:         Vec<Todo>,
    pub schedule:      Vec<ScheduledItem>,
    pub todo_cursor:   usize,
    pub item_cursor:   usize,
    pub ui:            UiState,
    pub running:       bool,
    pub show_activity: bool,
    // Scroll state for the month pager and the day/week timelines
    pub zoom:          f32,
    pub month_scroll:  f32,
    pub day_scroll:    f32,
    pub viewport_rows: u16,
}

impl App {
    pub fn new(store: Store, config: AppConfig) -> Result<Self> {
        let todos    = store.load_todos()?;
        let schedule = store.load_schedule()?;
        let cache    = GridCache::with_capacity(config.cache_capacity());

        let mut auto_scroll = AutoScroll::default();
        auto_scroll.request_initial();

        Ok(Self {
            store,
            config,
            nav: Navigator::new(None),
            cache,
            auto_scroll,
            active_panel: Panel::Calendar,
            todos,
            schedule,
            todo_cursor: 0,
            item_cursor: 0,
            ui: UiState::default(),
            running: true,
            show_activity: false,
            zoom: 1.0,
            month_scroll: 0.0,
            day_scroll: 0.0,
            viewport_rows: 0,
        })
    }

    // ── TUI loop ──────────────────────────────────────────────────────────────

    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend  = CrosstermBackend::new(stdout);
        let mut term = Terminal::new(backend)?;

        let result = self.event_loop(&mut term);

        disable_raw_mode()?;
        execute!(term.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        term.show_cursor()?;
        result
    }

    fn event_loop(
        &mut self,
        term: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        let tick = std::time::Duration::from_millis(50);
        while self.running {
            self.viewport_rows = term.size()?.height;
            self.apply_auto_scroll();
            term.draw(|f| draw(f, self))?;

            if event::poll(tick)? {
                if let Event::Key(key) = event::read()? {
                    self.on_key(key)?;
                }
            }
        }
        Ok(())
    }

    /// Consume a pending auto-scroll signal for the current view. One shot:
    /// once the offsets are applied the signal is acknowledged, so later
    /// frames render without jumping.
    fn apply_auto_scroll(&mut self) {
        let Some(kind) = self.auto_scroll.pending() else { return };
        match self.nav.level() {
            ViewLevel::Month => {
                let month0 = match kind {
                    ScrollKind::Today   => date::today().month0(),
                    ScrollKind::Initial => self.nav.current_date().month0(),
                };
                self.month_scroll = scroll::month_offset(month0, self.month_page_rows());
            }
            ViewLevel::Day | ViewLevel::Week => {
                // Land on the current time for today, 9 AM otherwise.
                let focus = self.nav.current_date();
                let (hour, minute) = if focus == date::today() {
                    let now = Local::now();
                    (now.hour(), now.minute())
                } else {
                    (9, 0)
                };
                let raw = scroll::time_of_day_offset(hour, minute, self.hour_rows());
                self.day_scroll = scroll::center_offset(
                    raw,
                    f32::from(self.timeline_rows()),
                    self.config.center_fraction(),
                );
            }
            ViewLevel::Year => {}
        }
        self.auto_scroll.complete();
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    fn on_key(&mut self, key: crossterm::event::KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') if self.ui.input_mode != InputMode::Insert => {
                self.running = false;
                return Ok(());
            }
            KeyCode::Char('?') if self.ui.input_mode != InputMode::Insert => {
                self.active_panel = Panel::Help;
                return Ok(());
            }
            KeyCode::Esc => {
                self.active_panel  = Panel::Calendar;
                self.ui.input_mode = InputMode::Normal;
                self.ui.form_step  = FormStep::Title;
                self.show_activity = false;
                return Ok(());
            }
            _ => {}
        }

        let panel = self.active_panel.clone();
        match panel {
            Panel::Calendar     => self.key_calendar(key)?,
            Panel::ScheduleList => self.key_schedule(key)?,
            Panel::TodoList     => self.key_todos(key)?,
            Panel::ScheduleForm
            | Panel::TodoForm   => self.key_form(key)?,
            Panel::Help         => self.active_panel = Panel::Calendar,
        }
        Ok(())
    }

    fn key_calendar(&mut self, key: crossterm::event::KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Enter     => self.drill_in(),
            KeyCode::Backspace => {
                self.nav.dispatch(NavEvent::Back);
                self.sync_month_scroll();
            }
            KeyCode::Char('w') if self.nav.level() == ViewLevel::Month => {
                self.nav.dispatch(NavEvent::SelectWeek(self.nav.current_date()));
                self.auto_scroll.request_initial();
            }
            KeyCode::Char('t') => {
                self.nav.dispatch(NavEvent::JumpToToday);
                self.auto_scroll.request_today();
            }
            KeyCode::Right | KeyCode::Char('l') => self.step_focus(1),
            KeyCode::Left  | KeyCode::Char('h') => self.step_focus(-1),
            KeyCode::Down  | KeyCode::Char('j') => self.step_focus_row(1),
            KeyCode::Up    | KeyCode::Char('k') => self.step_focus_row(-1),
            KeyCode::Char(']') => self.page(1),
            KeyCode::Char('[') => self.page(-1),
            KeyCode::Char('+') | KeyCode::Char('=') => self.adjust_zoom(0.25),
            KeyCode::Char('-') => self.adjust_zoom(-0.25),
            KeyCode::Char('a') => self.show_activity = !self.show_activity,
            KeyCode::Tab => self.active_panel = Panel::ScheduleList,
            KeyCode::Char('n') => {
                self.ui.new_item_title.clear();
                self.ui.form_step  = FormStep::Title;
                self.ui.start_h    = 9;
                self.ui.start_m    = 0;
                self.ui.end_h      = 10;
                self.ui.end_m      = 0;
                self.ui.time_field = TimeField::Hour;
                self.ui.input_mode = InputMode::Insert;
                self.active_panel  = Panel::ScheduleForm;
            }
            KeyCode::Char('N') => {
                self.ui.new_todo_title.clear();
                self.ui.todo_priority = Priority::Medium;
                self.ui.input_mode    = InputMode::Insert;
                self.active_panel     = Panel::TodoForm;
            }
            _ => {}
        }
        Ok(())
    }

    fn drill_in(&mut self) {
        match self.nav.level() {
            ViewLevel::Year => {
                let d = self.nav.current_date();
                self.nav.dispatch(NavEvent::SelectMonth {
                    year:   d.year(),
                    month0: d.month0(),
                });
                self.auto_scroll.request_initial();
            }
            ViewLevel::Month | ViewLevel::Week => {
                self.nav.dispatch(NavEvent::SelectDay(self.nav.current_date()));
                self.auto_scroll.request_initial();
            }
            ViewLevel::Day => self.active_panel = Panel::ScheduleList,
        }
    }

    /// Horizontal step: one month in the year view, one day elsewhere.
    fn step_focus(&mut self, delta: i32) {
        match self.nav.level() {
            ViewLevel::Year => self.shift_month_focus(delta),
            _ => {
                self.nav.move_focus(delta as i64);
                self.sync_month_scroll();
            }
        }
    }

    /// Vertical step: one grid row in year/month views, one scroll row on
    /// the timelines.
    fn step_focus_row(&mut self, delta: i32) {
        match self.nav.level() {
            ViewLevel::Year  => self.shift_month_focus(delta * 3),
            ViewLevel::Month => {
                self.nav.move_focus(delta as i64 * 7);
                self.sync_month_scroll();
            }
            ViewLevel::Week | ViewLevel::Day => {
                self.day_scroll = (self.day_scroll + delta as f32).max(0.0);
            }
        }
    }

    /// Lateral paging: year in the year view, month elsewhere.
    fn page(&mut self, delta: i32) {
        match self.nav.level() {
            ViewLevel::Year => self.shift_month_focus(delta * 12),
            _ => {
                let month0 = (self.nav.current_date().month0() as i32 + delta).rem_euclid(12);
                self.nav.dispatch(NavEvent::PageMonth(month0 as u32));
                self.month_scroll =
                    scroll::month_offset(month0 as u32, self.month_page_rows());
            }
        }
    }

    /// Move the focus date by whole months, snapping to day 1, no history.
    fn shift_month_focus(&mut self, delta: i32) {
        let d = self.nav.current_date();
        let total = d.year() * 12 + d.month0() as i32 + delta;
        let (year, month0) = (total.div_euclid(12), total.rem_euclid(12) as u32);
        self.nav
            .set_focus(NaiveDate::from_ymd_opt(year, month0 + 1, 1).unwrap());
    }

    fn adjust_zoom(&mut self, delta: f32) {
        if matches!(self.nav.level(), ViewLevel::Day | ViewLevel::Week) {
            self.zoom = scroll::clamp_zoom(self.zoom + delta);
        }
    }

    /// Keep the month pager parked on the focused month after lateral moves.
    fn sync_month_scroll(&mut self) {
        if self.nav.level() == ViewLevel::Month {
            self.month_scroll = scroll::month_offset(
                self.nav.current_date().month0(),
                self.month_page_rows(),
            );
        }
    }

    // ── Schedule / todo list panels ───────────────────────────────────────────

    fn key_schedule(&mut self, key: crossterm::event::KeyEvent) -> Result<()> {
        let day_count = tasks::items_on(&self.schedule, self.nav.current_date()).len();
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                if self.item_cursor + 1 < day_count {
                    self.item_cursor += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.item_cursor = self.item_cursor.saturating_sub(1);
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                let id = tasks::items_on(&self.schedule, self.nav.current_date())
                    .get(self.item_cursor)
                    .map(|i| i.id.clone());
                if let Some(id) = id {
                    self.schedule.retain(|i| i.id != id);
                    self.store.save_schedule(&self.schedule)?;
                    self.item_cursor = 0;
                }
            }
            KeyCode::Tab => self.active_panel = Panel::TodoList,
            _            => self.active_panel = Panel::Calendar,
        }
        Ok(())
    }

    fn key_todos(&mut self, key: crossterm::event::KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                if self.todo_cursor + 1 < self.todos.len() {
                    self.todo_cursor += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.todo_cursor = self.todo_cursor.saturating_sub(1);
            }
            KeyCode::Char(' ') => {
                if let Some(todo) = self.todos.get_mut(self.todo_cursor) {
                    todo.completed  = !todo.completed;
                    todo.updated_at = Local::now();
                    self.store.save_todos(&self.todos)?;
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(todo) = self.todos.get(self.todo_cursor) {
                    let id = todo.id.clone();
                    self.todos.retain(|t| t.id != id);
                    self.store.save_todos(&self.todos)?;
                    self.todo_cursor = 0;
                }
            }
            KeyCode::Tab => self.active_panel = Panel::Calendar,
            _            => self.active_panel = Panel::Calendar,
        }
        Ok(())
    }

    // ── Multi-step schedule form ──────────────────────────────────────────────

    fn key_form(&mut self, key: crossterm::event::KeyEvent) -> Result<()> {
        if self.ui.input_mode != InputMode::Insert {
            self.active_panel = Panel::Calendar;
            return Ok(());
        }

        match self.active_panel {
            Panel::TodoForm => match key.code {
                KeyCode::Char(c)   => self.ui.new_todo_title.push(c),
                KeyCode::Backspace => { self.ui.new_todo_title.pop(); }
                KeyCode::Up   => self.ui.todo_priority = next_priority(self.ui.todo_priority, 1),
                KeyCode::Down => self.ui.todo_priority = next_priority(self.ui.todo_priority, -1),
                KeyCode::Enter     => self.commit_form()?,
                _ => {}
            },
            Panel::ScheduleForm => match self.ui.form_step {
                FormStep::Title => match key.code {
                    KeyCode::Char(c)   => self.ui.new_item_title.push(c),
                    KeyCode::Backspace => { self.ui.new_item_title.pop(); }
                    KeyCode::Enter => {
                        if !self.ui.new_item_title.trim().is_empty() {
                            self.ui.form_step  = FormStep::StartTime;
                            self.ui.time_field = TimeField::Hour;
                        }
                    }
                    _ => {}
                },
                FormStep::StartTime => match key.code {
                    KeyCode::Up    | KeyCode::Char('k') => self.adjust_start_time(1),
                    KeyCode::Down  | KeyCode::Char('j') => self.adjust_start_time(-1),
                    KeyCode::Left  | KeyCode::Char('h') => self.ui.time_field = TimeField::Hour,
                    KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => {
                        self.ui.time_field = TimeField::Minute;
                    }
                    KeyCode::Enter => {
                        self.ui.form_step  = FormStep::EndTime;
                        self.ui.time_field = TimeField::Hour;
                    }
                    _ => {}
                },
                FormStep::EndTime => match key.code {
                    KeyCode::Up    | KeyCode::Char('k') => self.adjust_end_time(1),
                    KeyCode::Down  | KeyCode::Char('j') => self.adjust_end_time(-1),
                    KeyCode::Left  | KeyCode::Char('h') => self.ui.time_field = TimeField::Hour,
                    KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => {
                        self.ui.time_field = TimeField::Minute;
                    }
                    KeyCode::Enter => self.commit_form()?,
                    _ => {}
                },
            },
            _ => {}
        }
        Ok(())
    }

    fn adjust_start_time(&mut self, delta: i32) {
        match self.ui.time_field {
            TimeField::Hour => {
                self.ui.start_h = ((self.ui.start_h as i32 + delta).rem_euclid(24)) as u32;
            }
            TimeField::Minute => {
                self.ui.start_m = ((self.ui.start_m as i32 + delta * 15).rem_euclid(60)) as u32;
            }
        }
    }

    fn adjust_end_time(&mut self, delta: i32) {
        match self.ui.time_field {
            TimeField::Hour => {
                self.ui.end_h = ((self.ui.end_h as i32 + delta).rem_euclid(24)) as u32;
            }
            TimeField::Minute => {
                self.ui.end_m = ((self.ui.end_m as i32 + delta * 15).rem_euclid(60)) as u32;
            }
        }
    }

    fn commit_form(&mut self) -> Result<()> {
        match self.active_panel {
            Panel::ScheduleForm => {
                let title = self.ui.new_item_title.trim().to_owned();
                if !title.is_empty() {
                    let day   = self.nav.current_date();
                    let start = local_at(day, self.ui.start_h, self.ui.start_m);
                    let end   = local_at(day, self.ui.end_h, self.ui.end_m);
                    self.schedule.push(ScheduledItem::new(&title, start, end));
                    self.store.save_schedule(&self.schedule)?;
                    tracing::debug!(%title, "scheduled item added");
                }
                self.ui.form_step = FormStep::Title;
            }
            Panel::TodoForm => {
                let title = self.ui.new_todo_title.trim().to_owned();
                if !title.is_empty() {
                    self.todos.push(Todo::new(&title, self.ui.todo_priority));
                    self.store.save_todos(&self.todos)?;
                    tracing::debug!(%title, "todo added");
                }
            }
            _ => {}
        }
        self.ui.input_mode = InputMode::Normal;
        self.active_panel  = Panel::Calendar;
        Ok(())
    }

    // ── Derived metrics ───────────────────────────────────────────────────────

    /// Rows of one month page in the month pager.
    pub fn month_page_rows(&self) -> f32 {
        f32::from(self.timeline_rows())
    }

    /// Rendered rows per hour on the day/week timeline at the current zoom.
    pub fn hour_rows(&self) -> f32 {
        self.config.hour_height() * self.zoom
    }

    /// Rows available to the calendar panel body.
    pub fn timeline_rows(&self) -> u16 {
        self.viewport_rows.saturating_sub(5).max(1)
    }
}

fn local_at(day: NaiveDate, hour: u32, minute: u32) -> chrono::DateTime<Local> {
    use chrono::TimeZone;
    Local
        .from_local_datetime(&day.and_hms_opt(hour, minute, 0).unwrap())
        .earliest()
        .unwrap_or_else(Local::now)
}

fn next_priority(p: Priority, delta: i32) -> Priority {
    const ORDER: [Priority; 4] =
        [Priority::Low, Priority::Medium, Priority::High, Priority::Urgent];
    let idx = ORDER.iter().position(|q| *q == p).unwrap_or(1) as i32;
    ORDER[(idx + delta).rem_euclid(4) as usize]
}
