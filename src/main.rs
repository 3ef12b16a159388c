use anyhow::Result;
use onestep::app::App;
use onestep::calendar::date;
use onestep::config::AppConfig;
use onestep::store::Store;
use onestep::tasks;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    // ── step agenda ───────────────────────────────────────────────────────────
    if args.get(1).map(|s| s.as_str()) == Some("agenda") {
        return cmd_agenda();
    }

    // ── step (TUI) ────────────────────────────────────────────────────────────
    run_tui()
}

// ─── Agenda command ───────────────────────────────────────────────────────────

/// Print today's schedule and open todos without entering the TUI.
fn cmd_agenda() -> Result<()> {
    // Logging to stderr so it doesn't interfere with terminal output
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let store = Store::open_default()?;
    let schedule = store.load_schedule()?;
    let mut todos = store.load_todos()?;

    let today = date::today();
    println!("\n{}", date::format_date(today));

    let items = tasks::items_on(&schedule, today);
    if items.is_empty() {
        println!("  Nothing scheduled.");
    }
    for item in items {
        println!(
            "  {}–{}  {}",
            item.start_time.format("%H:%M"),
            item.end_time.format("%H:%M"),
            item.title,
        );
    }

    tasks::sort_todos(&mut todos);
    let open: Vec<&tasks::Todo> = todos.iter().filter(|t| !t.completed).collect();
    if !open.is_empty() {
        println!("\nTodos:");
        for todo in open {
            let due = if todo.is_overdue() {
                "  (overdue)"
            } else if todo.is_due_today() {
                "  (today)"
            } else if todo.is_due_tomorrow() {
                "  (tomorrow)"
            } else {
                ""
            };
            println!("  [ ] {}{due}", todo.title);
        }
    }
    println!();
    Ok(())
}

// ─── TUI ──────────────────────────────────────────────────────────────────────

fn run_tui() -> Result<()> {
    let log_dir = dirs::data_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("onestep");
    std::fs::create_dir_all(&log_dir)?;
    let file_appender = tracing_appender::rolling::daily(&log_dir, "onestep.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    tracing::info!("Starting OneStep");

    let cfg   = AppConfig::load().unwrap_or_default();
    let store = Store::open_default()?;

    let mut app = App::new(store, cfg)?;
    app.run()?;
    Ok(())
}
