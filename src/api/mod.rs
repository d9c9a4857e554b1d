//! API Module
//!
//! HTTP handlers and routing for the task service.
//!
//! # Endpoints
//! - `GET /health` - Health check
//! - `GET /api/cache_stats` - Cache size, hits, misses and hit rate
//! - `GET /api/telemetry` - Recent mutation events
//! - `POST /api/users` - Sign up with username and password
//! - `POST /api/login` - Check a username and password
//! - `GET|POST /api/users/:username/tasks` - List (paged, cached) or add tasks
//! - `PUT|DELETE /api/users/:username/tasks/:id` - Edit or delete a task
//! - `POST /api/users/:username/tasks/:id/toggle` - Flip completion

pub mod extract;
pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
