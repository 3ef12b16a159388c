use chrono::{Datelike, Local, NaiveDate, Timelike};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{block::Title, Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::activity::{self, ActivityGrid};
use crate::app::{App, Panel};
use crate::calendar::{date, scroll, GridVariant, ViewLevel};
use crate::tasks::{self, Priority};

// ─── UI enums / state ─────────────────────────────────────────────────────────

#[derive(Debug, Default, Clone, PartialEq)]
pub enum InputMode { #[default] Normal, Insert }

/// Which step of the multi-step schedule form we're on.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum FormStep {
    #[default]
    Title,
    StartTime,
    EndTime,
}

/// Which time field (hour or minute) is focused in the time picker.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum TimeField { #[default] Hour, Minute }

#[derive(Debug, Clone)]
pub struct UiState {
    pub input_mode:     InputMode,
    pub new_item_title: String,
    pub new_todo_title: String,
    pub todo_priority:  Priority,
    // Time-picker state (schedule form steps 2 & 3)
    pub form_step:  FormStep,
    pub start_h:    u32,
    pub start_m:    u32,
    pub end_h:      u32,
    pub end_m:      u32,
    pub time_field: TimeField,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            input_mode:     InputMode::Normal,
            new_item_title: String::new(),
            new_todo_title: String::new(),
            todo_priority:  Priority::Medium,
            form_step:      FormStep::Title,
            start_h:        9,
            start_m:        0,
            end_h:          10,
            end_m:          0,
            time_field:     TimeField::Hour,
        }
    }
}

// ─── Palette ──────────────────────────────────────────────────────────────────

const ACCENT:   Color = Color::Cyan;
const DIM:      Color = Color::DarkGray;
const TODAY_BG: Color = Color::Blue;
const DONE:     Color = Color::Green;
const ALERT:    Color = Color::Red;

fn accent() -> Style { Style::default().fg(ACCENT).add_modifier(Modifier::BOLD) }
fn dim()    -> Style { Style::default().fg(DIM) }
fn today()  -> Style { Style::default().bg(TODAY_BG).fg(Color::White).add_modifier(Modifier::BOLD) }
fn focus()  -> Style { Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD) }

// ─── Root draw ────────────────────────────────────────────────────────────────

pub fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // Layout: [ header(2) | content | status_bar(1) ]
    let root = Layout::default().direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    // Content: [ calendar | right_panel(36) ]
    let cols = Layout::default().direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(36)]).split(root[1]);

    // Right: [ schedule(50%) | todos(50%) ]
    let rows = Layout::default().direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(cols[1]);

    draw_header(f, app, root[0]);
    match app.nav.level() {
        ViewLevel::Year  => draw_year(f, app, cols[0]),
        ViewLevel::Month => draw_month(f, app, cols[0]),
        ViewLevel::Week  => draw_week(f, app, cols[0]),
        ViewLevel::Day   => draw_day(f, app, cols[0]),
    }
    draw_schedule_list(f, app, rows[0]);
    draw_todo_list(f, app, rows[1]);
    draw_statusbar(f, app, root[2]);

    // Overlays
    match app.active_panel {
        Panel::ScheduleForm => draw_schedule_form(f, area, app),
        Panel::TodoForm     => draw_todo_form(f, area, app),
        Panel::Help         => draw_help(f, area),
        _ => {}
    }
    if app.show_activity {
        draw_activity(f, area, app);
    }
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let d = app.nav.current_date();
    let title = match app.nav.level() {
        ViewLevel::Year  => format!("{}", d.year()),
        ViewLevel::Month => format!("{} {}", date::month_name(d.month0()), d.year()),
        ViewLevel::Week  => {
            let week = date::week_dates(d);
            format!(
                "{} – {}",
                week[0].format("%b %-d"),
                week[6].format("%b %-d, %Y"),
            )
        }
        ViewLevel::Day => d.format("%A, %B %-d, %Y").to_string(),
    };

    let back = if app.nav.can_go_back() {
        Span::styled("‹ back ", dim())
    } else {
        Span::raw("       ")
    };
    let line = Line::from(vec![
        back,
        Span::styled(title, accent()),
        Span::styled("   t:today", dim()),
    ]);
    f.render_widget(Paragraph::new(line).alignment(Alignment::Left), area);
}

// ─── Year view ────────────────────────────────────────────────────────────────

fn draw_year(f: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.active_panel == Panel::Calendar;
    let block = panel_block(" Year ", focused);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let year  = app.nav.current_date().year();
    let focus_month = app.nav.current_date().month0();

    let quarter_rows = Layout::default().direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 4); 4]).split(inner);

    for (row, row_area) in quarter_rows.iter().enumerate() {
        let month_cols = Layout::default().direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3); 3]).split(*row_area);
        for (col, cell) in month_cols.iter().enumerate() {
            let month0 = (row * 3 + col) as u32;
            draw_mini_month(f, app, *cell, year, month0, month0 == focus_month);
        }
    }
}

fn draw_mini_month(
    f: &mut Frame,
    app: &mut App,
    area: Rect,
    year: i32,
    month0: u32,
    focused: bool,
) {
    let grid = app.cache.get(year, month0, GridVariant::Mini).clone();

    let title_style = if focused { accent() } else { dim() };
    let mut lines = vec![
        Line::styled(format!(" {}", date::short_month_name(month0)), title_style),
        Line::styled(" Su Mo Tu We Th Fr Sa", dim()),
    ];
    for week in &grid.weeks {
        let mut spans = vec![Span::raw(" ")];
        for cell in week {
            match cell.date {
                Some(d) => {
                    let style = if cell.is_today() {
                        today()
                    } else {
                        Style::default()
                    };
                    spans.push(Span::styled(format!("{:>2}", d.day()), style));
                    spans.push(Span::raw(" "));
                }
                None => spans.push(Span::raw("   ")),
            }
        }
        lines.push(Line::from(spans));
    }

    let block = if focused {
        Block::default().borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ACCENT))
    } else {
        Block::default().borders(Borders::NONE)
    };
    f.render_widget(Paragraph::new(lines).block(block), area);
}

// ─── Month view ───────────────────────────────────────────────────────────────

fn draw_month(f: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.active_panel == Panel::Calendar;

    // The pager offset decides which month page is on screen.
    let page = app.month_page_rows().max(1.0);
    let month0 = ((app.month_scroll / page).round() as i32).clamp(0, 11) as u32;
    let year = app.nav.current_date().year();

    let title = format!(" {} {} ", date::month_name(month0), year);
    let block = panel_block(&title, focused);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let grid     = app.cache.get(year, month0, GridVariant::Full).clone();
    let selected = app.nav.current_date();
    let cell_w   = (inner.width / 7).max(4) as usize;

    let mut lines: Vec<Line> = Vec::new();
    let hdr: Vec<Span> = date::WEEKDAY_NAMES
        .iter()
        .map(|name| Span::styled(format!("{name:^cell_w$}"), dim().add_modifier(Modifier::BOLD)))
        .collect();
    lines.push(Line::from(hdr));
    lines.push(Line::styled("─".repeat(inner.width as usize), dim()));

    // Blank rows between week rows so the grid fills the panel.
    let body_rows = inner.height.saturating_sub(2) as usize;
    let pad = body_rows.saturating_sub(grid.week_count()) / grid.week_count().max(1);

    for week in &grid.weeks {
        let spans: Vec<Span> = week
            .iter()
            .map(|cell| {
                let Some(d) = cell.date else {
                    return Span::raw(" ".repeat(cell_w));
                };
                let marker = if tasks::items_on(&app.schedule, d).is_empty() { ' ' } else { '•' };
                let label  = format!("{:>2}{marker}", d.day());
                let style = if d == selected && focused {
                    focus()
                } else if cell.is_today() {
                    today()
                } else if !date::is_same_month(cell.date, grid.month0) {
                    dim()
                } else {
                    Style::default()
                };
                Span::styled(format!("{label:^cell_w$}"), style)
            })
            .collect();
        lines.push(Line::from(spans));
        for _ in 0..pad {
            lines.push(Line::from(""));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}

// ─── Week view ────────────────────────────────────────────────────────────────

fn draw_week(f: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.active_panel == Panel::Calendar;
    let block = panel_block(" Week ", focused);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let week      = date::week_dates(app.nav.current_date());
    let selected  = app.nav.current_date();
    let col_w     = ((inner.width.saturating_sub(6)) / 7).max(3) as usize;
    let hour_rows = app.hour_rows().max(0.5);

    let mut lines: Vec<Line> = Vec::new();

    // Day header row
    let mut hdr = vec![Span::raw("      ")];
    for d in &week {
        let label = format!("{} {}", date::WEEKDAY_NAMES[d.weekday().num_days_from_sunday() as usize], d.day());
        let style = if *d == date::today() {
            today()
        } else if *d == selected {
            accent()
        } else {
            dim()
        };
        hdr.push(Span::styled(format!("{label:^col_w$.col_w$}"), style));
    }
    lines.push(Line::from(hdr));

    for row in 0..inner.height.saturating_sub(1) {
        let pos  = app.day_scroll + f32::from(row);
        let hour = (pos / hour_rows) as u32;
        if hour > 23 {
            break;
        }
        let hour_of_prev = ((pos - 1.0).max(0.0) / hour_rows) as u32;
        let label = if row == 0 || hour != hour_of_prev {
            format!("{:>5} ", date::format_hour(hour))
        } else {
            "      ".to_owned()
        };

        let mut spans = vec![Span::styled(label, dim())];
        for d in &week {
            spans.push(timeline_cell(app, *d, pos, hour_rows, col_w));
        }
        lines.push(Line::from(spans));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

// ─── Day view ─────────────────────────────────────────────────────────────────

fn draw_day(f: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.active_panel == Panel::Calendar;
    let day     = app.nav.current_date();
    let title   = format!(" {} ", date::format_date(day));
    let block   = panel_block(&title, focused);
    let inner   = block.inner(area);
    f.render_widget(block, area);

    let hour_rows = app.hour_rows().max(0.5);
    let body_w    = inner.width.saturating_sub(7) as usize;
    let is_today  = day == date::today();
    let now       = Local::now();
    let now_pos   = scroll::time_of_day_offset(now.hour(), now.minute(), hour_rows);

    let mut lines: Vec<Line> = Vec::new();
    for row in 0..inner.height {
        let pos  = app.day_scroll + f32::from(row);
        let hour = (pos / hour_rows) as u32;
        if hour > 24 {
            break;
        }
        let hour_of_prev = ((pos - 1.0).max(0.0) / hour_rows) as u32;
        let label = if row == 0 || hour != hour_of_prev {
            format!("{:>5} ─", date::format_hour(hour))
        } else {
            "      │".to_owned()
        };

        // Current-time line wins over everything on its row.
        if is_today && pos as u32 == now_pos as u32 && (pos - now_pos).abs() < 1.0 {
            lines.push(Line::from(vec![
                Span::styled(format!("{:>5} ", now.format("%H:%M")), Style::default().fg(ALERT).add_modifier(Modifier::BOLD)),
                Span::styled("●".to_owned() + &"─".repeat(body_w), Style::default().fg(ALERT)),
            ]));
            continue;
        }

        let mut spans = vec![Span::styled(label, dim())];
        spans.push(timeline_cell(app, day, pos, hour_rows, body_w));
        lines.push(Line::from(spans));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

/// One timeline row for one day column: the item covering `pos`, its title
/// on the item's first row, a solid bar on the rest, blank otherwise.
fn timeline_cell(app: &App, day: NaiveDate, pos: f32, hour_rows: f32, width: usize) -> Span<'static> {
    let minutes_per_row = 60.0 / hour_rows;
    let row_start_min = pos * minutes_per_row;
    let row_end_min   = row_start_min + minutes_per_row;

    for item in tasks::items_on(&app.schedule, day) {
        let start = f32::from(item.start_time.hour() as u16) * 60.0
            + f32::from(item.start_time.minute() as u16);
        let end = (start + item.duration_minutes() as f32).max(start + minutes_per_row);
        if start < row_end_min && end > row_start_min {
            let style = Style::default().fg(Color::Black).bg(ACCENT);
            return if start >= row_start_min {
                let text = format!(
                    "▎{} {}",
                    item.start_time.format("%H:%M"),
                    item.title,
                );
                Span::styled(format!("{text:<width$.width$}"), style)
            } else {
                Span::styled(format!("{:<width$.width$}", "▎"), style)
            };
        }
    }
    Span::raw(" ".repeat(width))
}

// ─── Schedule panel ───────────────────────────────────────────────────────────

fn draw_schedule_list(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.active_panel == Panel::ScheduleList;
    let date_s  = app.nav.current_date().format("%A, %B %-d").to_string();
    let block   = panel_block(&format!(" ● Schedule — {date_s} "), focused);

    let day_items = tasks::items_on(&app.schedule, app.nav.current_date());
    if day_items.is_empty() {
        f.render_widget(
            Paragraph::new("  Nothing scheduled").block(block).style(dim()),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = day_items
        .iter()
        .map(|item| {
            ListItem::new(Line::from(vec![
                Span::styled(" ● ", Style::default().fg(ACCENT)),
                Span::styled(
                    format!(
                        "{}–{} ",
                        item.start_time.format("%H:%M"),
                        item.end_time.format("%H:%M"),
                    ),
                    dim(),
                ),
                Span::raw(item.title.clone()),
            ]))
        })
        .collect();

    let mut state = ListState::default();
    state.select(if focused { Some(app.item_cursor) } else { None });
    f.render_stateful_widget(
        List::new(items).block(block).highlight_style(focus()).highlight_symbol("▶ "),
        area,
        &mut state,
    );
}

// ─── Todo panel ───────────────────────────────────────────────────────────────

fn draw_todo_list(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.active_panel == Panel::TodoList;
    let open    = app.todos.iter().filter(|t| !t.completed).count();
    let block   = panel_block(&format!(" ○ Todos ({open} open) "), focused);

    if app.todos.is_empty() {
        f.render_widget(
            Paragraph::new("  No todos").block(block).style(dim()),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = app.todos
        .iter()
        .map(|todo| {
            let check = if todo.completed { " ✔ " } else { " ○ " };
            let cs = if todo.completed {
                Style::default().fg(DONE)
            } else {
                dim()
            };
            let ts = if todo.completed {
                dim().add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default()
            };
            let mut spans = vec![
                Span::styled(check, cs),
                Span::styled(priority_tag(todo.priority), priority_style(todo.priority)),
                Span::styled(todo.title.clone(), ts),
            ];
            if todo.is_overdue() {
                spans.push(Span::styled("  overdue", Style::default().fg(ALERT)));
            } else if todo.is_due_today() {
                spans.push(Span::styled("  today", Style::default().fg(ACCENT)));
            } else if todo.is_due_tomorrow() {
                spans.push(Span::styled("  tomorrow", dim()));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let mut state = ListState::default();
    state.select(if focused { Some(app.todo_cursor) } else { None });
    f.render_stateful_widget(List::new(items).block(block).highlight_style(focus()), area, &mut state);
}

fn priority_tag(p: Priority) -> &'static str {
    match p {
        Priority::Low    => "·  ",
        Priority::Medium => "-  ",
        Priority::High   => "!  ",
        Priority::Urgent => "!! ",
    }
}

fn priority_style(p: Priority) -> Style {
    match p {
        Priority::Low    => dim(),
        Priority::Medium => Style::default(),
        Priority::High   => Style::default().fg(Color::Yellow),
        Priority::Urgent => Style::default().fg(ALERT).add_modifier(Modifier::BOLD),
    }
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_statusbar(f: &mut Frame, app: &App, area: Rect) {
    let (mode_str, mode_style) = match app.ui.input_mode {
        InputMode::Normal => (" NORMAL ", Style::default().bg(ACCENT).fg(Color::Black).add_modifier(Modifier::BOLD)),
        InputMode::Insert => (" INSERT ", Style::default().bg(DONE).fg(Color::Black).add_modifier(Modifier::BOLD)),
    };
    let hints = match app.nav.level() {
        ViewLevel::Year =>
            "  hjkl:month  [ ]:year  Enter:open month  t:today  a:activity  n:item  N:todo  ?:help  q:quit",
        ViewLevel::Month =>
            "  hjkl:day  [ ]:month  Enter:open day  w:week  Bksp:back  t:today  n:item  N:todo  ?:help  q:quit",
        ViewLevel::Week | ViewLevel::Day =>
            "  h l:day  j k:scroll  + -:zoom  Enter:schedule  Bksp:back  t:today  ?:help  q:quit",
    };
    let bar = Paragraph::new(Line::from(vec![
        Span::styled(mode_str, mode_style),
        Span::styled(hints, dim()),
    ]));
    f.render_widget(bar, area);
}

// ─── Schedule form (multi-step) ───────────────────────────────────────────────

fn draw_schedule_form(f: &mut Frame, area: Rect, app: &App) {
    let rect = centered(60, 50, area);
    f.render_widget(Clear, rect);

    let block = popup_block(" New Scheduled Item ");
    let inner = block.inner(rect);
    f.render_widget(block, rect);

    let step = &app.ui.form_step;
    let fg   = Style::default();
    let sel  = focus();

    let title_active = *step == FormStep::Title;
    let start_active = *step == FormStep::StartTime;
    let end_active   = *step == FormStep::EndTime;
    let hour_focus   = app.ui.time_field == TimeField::Hour;

    let title_prefix = if title_active { "▶ Title  " } else { "  Title  " };
    let title_val = format!(
        "{}{}",
        app.ui.new_item_title,
        if title_active { "█" } else { "" }
    );
    let title_line = Line::from(vec![
        Span::styled(title_prefix, if title_active { accent() } else { dim() }),
        Span::styled(title_val,    if title_active { fg } else { dim() }),
    ]);

    let time_line = |prefix: &str, active: bool, h: u32, m: u32| -> Line<'static> {
        if active {
            Line::from(vec![
                Span::styled(prefix.to_owned(), accent()),
                Span::styled(format!("{h:02}"), if hour_focus { sel } else { fg }),
                Span::styled(" : ", dim()),
                Span::styled(format!("{m:02}"), if !hour_focus { sel } else { fg }),
            ])
        } else {
            Line::from(vec![
                Span::styled(prefix.to_owned(), dim()),
                Span::styled(format!("{h:02} : {m:02}"), dim()),
            ])
        }
    };
    let start_line = time_line(
        if start_active { "▶ Start  " } else { "  Start  " },
        start_active,
        app.ui.start_h,
        app.ui.start_m,
    );
    let end_line = time_line(
        if end_active { "▶ End    " } else { "  End    " },
        end_active,
        app.ui.end_h,
        app.ui.end_m,
    );

    let hint: Line = match step {
        FormStep::Title =>
            Line::from(Span::styled("  Enter: set time   Esc: cancel", dim())),
        FormStep::StartTime =>
            Line::from(Span::styled("  ↑↓ adjust   ←→ hour/min   Enter: set end", dim())),
        FormStep::EndTime =>
            Line::from(Span::styled("  ↑↓ adjust   ←→ hour/min   Enter: save", dim())),
    };

    let step_num = match step {
        FormStep::Title     => "Step 1 / 3 — Title",
        FormStep::StartTime => "Step 2 / 3 — Start time",
        FormStep::EndTime   => "Step 3 / 3 — End time",
    };
    let on = format!("  On {}", date::format_date(app.nav.current_date()));

    let lines: Vec<Line> = vec![
        Line::from(""),
        Line::from(Span::styled(format!("  {step_num}"), dim())),
        Line::from(Span::styled(on, dim())),
        Line::from(""),
        title_line,
        Line::from(""),
        start_line,
        Line::from(""),
        end_line,
        Line::from(""),
        hint,
    ];

    f.render_widget(Paragraph::new(lines), inner);
}

// ─── Todo form ────────────────────────────────────────────────────────────────

fn draw_todo_form(f: &mut Frame, area: Rect, app: &App) {
    let rect = centered(60, 30, area);
    f.render_widget(Clear, rect);

    let block = popup_block(" New Todo ");
    let inner = block.inner(rect);
    f.render_widget(block, rect);

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Title     ", accent()),
            Span::raw(format!("{}█", app.ui.new_todo_title)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Priority  ", dim()),
            Span::styled(
                format!("{:?}", app.ui.todo_priority),
                priority_style(app.ui.todo_priority),
            ),
            Span::styled("  (↑↓ to change)", dim()),
        ]),
        Line::from(""),
        Line::from(Span::styled("  Enter: save   Esc: cancel", dim())),
    ];
    f.render_widget(Paragraph::new(lines), inner);
}

// ─── Activity overlay ─────────────────────────────────────────────────────────

fn draw_activity(f: &mut Frame, area: Rect, app: &App) {
    let rect = centered(70, 50, area);
    f.render_widget(Clear, rect);

    let block = popup_block(" Activity ");
    let inner = block.inner(rect);
    f.render_widget(block, rect);

    let start = app.todos
        .iter()
        .map(|t| t.created_at.date_naive())
        .min()
        .unwrap_or_else(date::today);
    let grid   = ActivityGrid::span(start, date::today());
    let counts = activity::daily_counts(
        app.todos
            .iter()
            .filter(|t| t.completed)
            .map(|t| t.updated_at.date_naive()),
    );

    // Last N week columns that fit (2 cells per column, 5 for day labels).
    let max_cols = ((inner.width.saturating_sub(6)) / 2) as usize;
    let skip = grid.week_count().saturating_sub(max_cols);

    let shades = [" ", "░", "▒", "▓", "█"];
    let mut lines: Vec<Line> = Vec::new();

    let mut label_row = " ".repeat(5);
    for (week_idx, name) in grid.month_labels() {
        if week_idx < skip { continue; }
        let col = 5 + (week_idx - skip) * 2;
        if col >= label_row.len() {
            while label_row.len() < col { label_row.push(' '); }
            label_row.push_str(name);
        }
    }
    lines.push(Line::styled(label_row, dim()));

    for weekday in 0..7 {
        let mut spans = vec![Span::styled(
            format!("{:>4} ", date::WEEKDAY_NAMES[weekday]),
            dim(),
        )];
        for week in grid.weeks.iter().skip(skip) {
            let span = match week[weekday] {
                Some(d) => {
                    let count = counts.get(&d).copied().unwrap_or(0);
                    let level = activity::intensity(count) as usize;
                    Span::styled(
                        format!("{} ", shades[level]),
                        Style::default().fg(DONE),
                    )
                }
                None => Span::raw("  "),
            };
            spans.push(span);
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  Less ", dim()),
        Span::styled("░ ▒ ▓ █", Style::default().fg(DONE)),
        Span::styled(" More    Esc: close", dim()),
    ]));

    f.render_widget(Paragraph::new(lines), inner);
}

// ─── Help overlay ─────────────────────────────────────────────────────────────

fn draw_help(f: &mut Frame, area: Rect) {
    let rect = centered(68, 80, area);
    f.render_widget(Clear, rect);

    let block = popup_block(" Keyboard Shortcuts ");

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("  Calendar", accent())),
        Line::from(Span::styled("  h/j/k/l  ←↓↑→     Move focus (month / day / scroll)", dim())),
        Line::from(Span::styled("  Enter              Drill in: year → month → day", dim())),
        Line::from(Span::styled("  w                  Week view (from month)", dim())),
        Line::from(Span::styled("  Backspace          Back to the previous view", dim())),
        Line::from(Span::styled("  [ / ]              Prev / Next month (year in year view)", dim())),
        Line::from(Span::styled("  t                  Jump to today", dim())),
        Line::from(Span::styled("  + / -              Zoom the day timeline", dim())),
        Line::from(Span::styled("  a                  Activity graph", dim())),
        Line::from(Span::styled("  Tab                Cycle panels", dim())),
        Line::from(""),
        Line::from(Span::styled("  Schedule", accent())),
        Line::from(Span::styled("  n                  New item (3-step: title → start → end)", dim())),
        Line::from(Span::styled("    Enter              Advance to next step", dim())),
        Line::from(Span::styled("    ↑ / ↓              Adjust hour or minute", dim())),
        Line::from(Span::styled("    ← / →              Switch hour / minute field", dim())),
        Line::from(Span::styled("  d / Del            Delete item", dim())),
        Line::from(""),
        Line::from(Span::styled("  Todos", accent())),
        Line::from(Span::styled("  N                  New todo (↑↓ sets priority)", dim())),
        Line::from(Span::styled("  Space              Toggle complete", dim())),
        Line::from(Span::styled("  d / Del            Delete todo", dim())),
        Line::from(""),
        Line::from(Span::styled("  General", accent())),
        Line::from(Span::styled("  ?                  Toggle help", dim())),
        Line::from(Span::styled("  Esc                Cancel / close", dim())),
        Line::from(Span::styled("  q                  Quit", dim())),
    ];

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        rect,
    );
}

// ─── Utilities ────────────────────────────────────────────────────────────────

fn panel_block(title: &str, focused: bool) -> Block<'static> {
    let bs = Style::default().fg(if focused { ACCENT } else { DIM });
    Block::default()
        .title(Title::from(Line::from(Span::styled(title.to_owned(), accent()))))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(bs)
}

fn popup_block(title: &str) -> Block<'static> {
    Block::default()
        .title(Title::from(Line::from(Span::styled(title.to_owned(), accent()))))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT))
}

fn centered(pct_x: u16, pct_y: u16, r: Rect) -> Rect {
    let vert = Layout::default().direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - pct_y) / 2),
            Constraint::Percentage(pct_y),
            Constraint::Percentage((100 - pct_y) / 2),
        ]).split(r);
    Layout::default().direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - pct_x) / 2),
            Constraint::Percentage(pct_x),
            Constraint::Percentage((100 - pct_x) / 2),
        ]).split(vert[1])[1]
}
