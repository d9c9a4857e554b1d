//! Request DTOs for the task API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

use crate::tasks::TaskInput;

/// Default page size for task listings.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Request body for POST /api/users and POST /api/login
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for creating or editing a task.
///
/// Field names are accepted in either the `title`/`due_date` or the
/// `Title`/`dueDate` spelling.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskRequest {
    #[serde(default, alias = "Title")]
    pub title: Option<String>,
    #[serde(default, alias = "Description")]
    pub description: Option<String>,
    #[serde(default, alias = "dueDate")]
    pub due_date: Option<String>,
}

impl From<TaskRequest> for TaskInput {
    fn from(req: TaskRequest) -> Self {
        TaskInput {
            title: req.title,
            description: req.description,
            due_date: req.due_date,
        }
    }
}

/// Query string for GET /api/users/:username/tasks
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ListQuery {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_PAGE_LIMIT)
    }
}
