//! Request and Response models for the task API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{CredentialsRequest, ListQuery, TaskRequest};
pub use responses::{
    CacheStatsResponse, ErrorResponse, HealthResponse, LoginResponse, SuccessResponse,
    TaskCreatedResponse, TaskListResponse, TaskResponse, TelemetryResponse, ToggleResponse,
    UserCreatedResponse,
};
