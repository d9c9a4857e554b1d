//! Tasks Module
//!
//! To-do task records, the in-memory system of record, and the service
//! that reads through and invalidates the cache.

pub mod model;
pub mod service;
pub mod store;

pub use model::{Task, TaskView, Urgency, UserRecord};
pub use service::{TaskInput, TaskPage, TaskService};
pub use store::TaskStore;
