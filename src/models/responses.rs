//! Response DTOs for the task API
//!
//! Every body carries a `success` flag.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::tasks::{TaskPage, TaskView, UserRecord};
use crate::telemetry::TelemetryEvent;

/// Cache figures as shown by GET /api/cache_stats
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsBody {
    pub size: usize,
    pub hits: u64,
    pub misses: u64,
    /// One decimal with a percent sign, e.g. `"66.7%"`
    pub hit_rate: String,
}

impl From<CacheStats> for CacheStatsBody {
    fn from(stats: CacheStats) -> Self {
        Self {
            size: stats.size,
            hits: stats.hits,
            misses: stats.misses,
            hit_rate: stats.hit_rate_label(),
        }
    }
}

/// Response body for GET /api/cache_stats
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsResponse {
    pub success: bool,
    pub cache_stats: CacheStatsBody,
}

impl CacheStatsResponse {
    pub fn new(stats: CacheStats) -> Self {
        Self {
            success: true,
            cache_stats: stats.into(),
        }
    }
}

/// Response body for GET /api/telemetry
#[derive(Debug, Clone, Serialize)]
pub struct TelemetryResponse {
    pub success: bool,
    pub telemetry: Vec<TelemetryEvent>,
}

impl TelemetryResponse {
    pub fn new(telemetry: Vec<TelemetryEvent>) -> Self {
        Self {
            success: true,
            telemetry,
        }
    }
}

/// Response body for POST /api/users
#[derive(Debug, Clone, Serialize)]
pub struct UserCreatedResponse {
    pub success: bool,
    pub message: String,
    pub username: String,
}

impl UserCreatedResponse {
    pub fn new(user: UserRecord) -> Self {
        Self {
            success: true,
            message: "Signup successful.".to_string(),
            username: user.username,
        }
    }
}

/// Response body for POST /api/login
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub username: String,
}

impl LoginResponse {
    pub fn new(user: UserRecord) -> Self {
        Self {
            success: true,
            message: "Login successful.".to_string(),
            username: user.username,
        }
    }
}

/// Response body for GET /api/users/:username/tasks
#[derive(Debug, Clone, Serialize)]
pub struct TaskListResponse {
    pub success: bool,
    #[serde(flatten)]
    pub page: TaskPage,
}

impl TaskListResponse {
    pub fn new(page: TaskPage) -> Self {
        Self {
            success: true,
            page,
        }
    }
}

/// Response body for POST /api/users/:username/tasks
#[derive(Debug, Clone, Serialize)]
pub struct TaskCreatedResponse {
    pub success: bool,
    pub message: String,
    pub task_id: u64,
}

impl TaskCreatedResponse {
    pub fn new(task_id: u64) -> Self {
        Self {
            success: true,
            message: "Task Created Successfully".to_string(),
            task_id,
        }
    }
}

/// Response body for PUT /api/users/:username/tasks/:id
#[derive(Debug, Clone, Serialize)]
pub struct TaskResponse {
    pub success: bool,
    pub task: TaskView,
}

impl TaskResponse {
    pub fn new(task: TaskView) -> Self {
        Self {
            success: true,
            task,
        }
    }
}

/// Response body for POST /api/users/:username/tasks/:id/toggle
#[derive(Debug, Clone, Serialize)]
pub struct ToggleResponse {
    pub success: bool,
    pub is_completed: bool,
}

impl ToggleResponse {
    pub fn new(is_completed: bool) -> Self {
        Self {
            success: true,
            is_completed,
        }
    }
}

/// Bare acknowledgement, used by DELETE
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}
