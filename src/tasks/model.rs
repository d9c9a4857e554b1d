//! Task Model
//!
//! The stored task record and the view serialized into cached task pages.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Wire format for due dates.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

// == User Record ==
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: u64,
    pub username: String,
}

// == Task ==
/// A task as held by the system of record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: u64,
    pub user_id: u64,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

// == Urgency ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Overdue,
    Urgent,
    Warning,
    Normal,
}

impl Urgency {
    /// Classifies a task by whole days until it is due.
    pub fn from_days_left(days: i64) -> Self {
        match days {
            d if d < 0 => Urgency::Overdue,
            0 => Urgency::Urgent,
            1..=2 => Urgency::Warning,
            _ => Urgency::Normal,
        }
    }

    fn time_left_label(self, days: i64) -> String {
        match self {
            Urgency::Overdue => "Overdue".to_string(),
            Urgency::Urgent => "Due today".to_string(),
            Urgency::Warning | Urgency::Normal => format!("{}d left", days),
        }
    }
}

// == Task View ==
/// Serialized task as cached and returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskView {
    pub id: u64,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Description")]
    pub description: String,
    /// `YYYY-MM-DD`
    pub due_date: String,
    pub is_completed: bool,
    /// e.g. `1st Jan 2025`
    pub due_date_pretty: String,
    pub time_left: String,
    pub urgency: Urgency,
}

impl TaskView {
    /// Builds the view relative to `today`.
    pub fn from_task(task: &Task, today: NaiveDate) -> Self {
        let days_left = (task.due_date - today).num_days();
        let urgency = Urgency::from_days_left(days_left);

        Self {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: task.due_date.format(DUE_DATE_FORMAT).to_string(),
            is_completed: task.is_completed,
            due_date_pretty: pretty_date(task.due_date),
            time_left: urgency.time_left_label(days_left),
            urgency,
        }
    }
}

/// English ordinal suffix for a day of month.
fn ordinal_suffix(day: u32) -> &'static str {
    if (11..=13).contains(&day) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

fn pretty_date(date: NaiveDate) -> String {
    let day = date.day();
    format!("{}{} {}", day, ordinal_suffix(day), date.format("%b %Y"))
}
