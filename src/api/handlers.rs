//! API Handlers
//!
//! HTTP request handlers for the task and diagnostics endpoints.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use super::extract::{AppJson, AppPath, AppQuery};
use crate::config::Config;
use crate::error::Result;
use crate::models::{
    CacheStatsResponse, CredentialsRequest, HealthResponse, ListQuery, LoginResponse,
    SuccessResponse, TaskCreatedResponse, TaskListResponse, TaskRequest, TaskResponse,
    TelemetryResponse, ToggleResponse, UserCreatedResponse,
};
use crate::tasks::TaskService;

/// Application state shared across all handlers.
///
/// The service owns the single cache instance; handlers only hold an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TaskService>,
}

impl AppState {
    pub fn new(service: TaskService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Builds the cache, task store and telemetry log from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(TaskService::from_config(config))
    }
}

/// Handler for POST /api/users
pub async fn create_user_handler(
    State(state): State<AppState>,
    AppJson(req): AppJson<CredentialsRequest>,
) -> Result<(StatusCode, Json<UserCreatedResponse>)> {
    let user = state.service.register_user(&req.username, &req.password)?;
    Ok((StatusCode::CREATED, Json(UserCreatedResponse::new(user))))
}

/// Handler for POST /api/login
pub async fn login_handler(
    State(state): State<AppState>,
    AppJson(req): AppJson<CredentialsRequest>,
) -> Result<Json<LoginResponse>> {
    let user = state.service.login(&req.username, &req.password)?;
    Ok(Json(LoginResponse::new(user)))
}

/// Handler for GET /api/users/:username/tasks
pub async fn list_tasks_handler(
    State(state): State<AppState>,
    AppPath(username): AppPath<String>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<TaskListResponse>> {
    let page = state
        .service
        .list_tasks(&username, query.page(), query.limit())?;
    Ok(Json(TaskListResponse::new(page)))
}

/// Handler for POST /api/users/:username/tasks
pub async fn add_task_handler(
    State(state): State<AppState>,
    AppPath(username): AppPath<String>,
    AppJson(req): AppJson<TaskRequest>,
) -> Result<(StatusCode, Json<TaskCreatedResponse>)> {
    let task = state.service.add_task(&username, req.into())?;
    Ok((StatusCode::CREATED, Json(TaskCreatedResponse::new(task.id))))
}

/// Handler for PUT /api/users/:username/tasks/:id
pub async fn edit_task_handler(
    State(state): State<AppState>,
    AppPath((username, task_id)): AppPath<(String, u64)>,
    AppJson(req): AppJson<TaskRequest>,
) -> Result<Json<TaskResponse>> {
    let task = state.service.edit_task(&username, task_id, req.into())?;
    Ok(Json(TaskResponse::new(task)))
}

/// Handler for DELETE /api/users/:username/tasks/:id
pub async fn delete_task_handler(
    State(state): State<AppState>,
    AppPath((username, task_id)): AppPath<(String, u64)>,
) -> Result<Json<SuccessResponse>> {
    state.service.delete_task(&username, task_id)?;
    Ok(Json(SuccessResponse::ok()))
}

/// Handler for POST /api/users/:username/tasks/:id/toggle
pub async fn toggle_task_handler(
    State(state): State<AppState>,
    AppPath((username, task_id)): AppPath<(String, u64)>,
) -> Result<Json<ToggleResponse>> {
    let is_completed = state.service.toggle_task(&username, task_id)?;
    Ok(Json(ToggleResponse::new(is_completed)))
}

/// Handler for GET /api/cache_stats
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    Json(CacheStatsResponse::new(state.service.cache_stats()))
}

/// Handler for GET /api/telemetry
pub async fn telemetry_handler(State(state): State<AppState>) -> Json<TelemetryResponse> {
    Json(TelemetryResponse::new(state.service.telemetry()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
