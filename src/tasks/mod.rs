use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::date;

// ─── Domain models ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub due_date: Option<DateTime<Local>>,
    pub priority: Priority,
    pub category: Option<String>,
    pub created_at: DateTime<Local>,
    pub updated_at: DateTime<Local>,
}

impl Todo {
    pub fn new(title: &str, priority: Priority) -> Self {
        let now = Local::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.to_owned(),
            description: None,
            completed: false,
            due_date: None,
            priority,
            category: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Open and past its due day.
    pub fn is_overdue(&self) -> bool {
        !self.completed && self.due_date.map(date::is_overdue).unwrap_or(false)
    }

    pub fn is_due_today(&self) -> bool {
        self.due_date.map(date::is_today).unwrap_or(false)
    }

    pub fn is_due_tomorrow(&self) -> bool {
        self.due_date.map(date::is_tomorrow).unwrap_or(false)
    }
}

/// One block on the schedule timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledItem {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Local>,
    pub end_time: DateTime<Local>,
    pub all_day: bool,
    pub category: Option<String>,
}

impl ScheduledItem {
    pub fn new(title: &str, start_time: DateTime<Local>, end_time: DateTime<Local>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.to_owned(),
            description: None,
            start_time,
            end_time,
            all_day: false,
            category: None,
        }
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    /// Whether the item starts on the given calendar day.
    pub fn starts_on(&self, day: NaiveDate) -> bool {
        self.start_time.date_naive() == day
    }
}

// ─── List helpers ─────────────────────────────────────────────────────────────

/// Urgent first, then nearest due date, then title.
pub fn sort_todos(todos: &mut [Todo]) {
    todos.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then(a.due_date.cmp(&b.due_date))
            .then(a.title.cmp(&b.title))
    });
}

/// Items starting on the given day, earliest first.
pub fn items_on(items: &[ScheduledItem], day: NaiveDate) -> Vec<&ScheduledItem> {
    let mut on_day: Vec<&ScheduledItem> = items.iter().filter(|i| i.starts_on(day)).collect();
    on_day.sort_by_key(|i| i.start_time);
    on_day
}
