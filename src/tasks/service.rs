//! Task Service
//!
//! Read-through listing over the cache and mutations that invalidate a
//! user's cached pages.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, info, warn};

use crate::cache::{task_list_key, task_prefix, user_key, CacheStats, CacheStore};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::tasks::model::{TaskView, UserRecord, DUE_DATE_FORMAT};
use crate::tasks::store::{page_count, TaskFields, TaskStore};
use crate::telemetry::{TelemetryEvent, TelemetryLog};

/// Payload stored under a task list key.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedTaskPage {
    tasks: Vec<TaskView>,
    total_count: usize,
}

// == Task Page ==
/// One page of a user's tasks as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskPage {
    pub tasks: Vec<TaskView>,
    pub page: u32,
    pub limit: u32,
    pub total_count: usize,
    pub pages: usize,
    pub cache_hit: bool,
}

// == Task Input ==
/// Unvalidated create/edit input.
#[derive(Debug, Clone, Default)]
pub struct TaskInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
}

impl TaskInput {
    fn into_fields(self) -> Result<TaskFields> {
        let title = self.title.filter(|t| !t.is_empty());
        let due_date = self.due_date.filter(|d| !d.is_empty());
        let (Some(title), Some(due_date)) = (title, due_date) else {
            return Err(AppError::InvalidRequest(
                "Title and due date required.".to_string(),
            ));
        };
        let due_date = NaiveDate::parse_from_str(&due_date, DUE_DATE_FORMAT).map_err(|_| {
            AppError::InvalidRequest(format!("Invalid due date '{}', expected YYYY-MM-DD", due_date))
        })?;

        Ok(TaskFields {
            title,
            description: self.description.unwrap_or_default(),
            due_date,
        })
    }
}

fn require_credentials(username: &str, password: &str) -> Result<()> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(AppError::InvalidRequest(
            "Username and password are required.".to_string(),
        ));
    }
    Ok(())
}

// == Task Service ==
/// Consumer of the shared cache: caches task pages and user lookups, and
/// clears a user's task prefix after every mutation.
#[derive(Debug)]
pub struct TaskService {
    cache: Arc<CacheStore>,
    store: Arc<TaskStore>,
    telemetry: Arc<TelemetryLog>,
    page_ttl: Duration,
    user_ttl: Duration,
    /// bcrypt work factor for new passwords
    bcrypt_cost: u32,
}

impl TaskService {
    pub fn new(
        cache: Arc<CacheStore>,
        store: Arc<TaskStore>,
        telemetry: Arc<TelemetryLog>,
        page_ttl: Duration,
        user_ttl: Duration,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            cache,
            store,
            telemetry,
            page_ttl,
            user_ttl,
            bcrypt_cost,
        }
    }

    /// Wires a service with fresh collaborators sized from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(CacheStore::new(config.default_ttl())),
            Arc::new(TaskStore::new()),
            Arc::new(TelemetryLog::new(config.telemetry_capacity)),
            config.task_page_ttl(),
            config.user_ttl(),
            config.bcrypt_cost,
        )
    }

    pub fn cache(&self) -> &Arc<CacheStore> {
        &self.cache
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn telemetry(&self) -> Vec<TelemetryEvent> {
        self.telemetry.recent()
    }

    // == Users ==
    /// Creates an account, storing a bcrypt hash of the password.
    pub fn register_user(&self, username: &str, password: &str) -> Result<UserRecord> {
        require_credentials(username, password)?;
        let password_hash = bcrypt::hash(password, self.bcrypt_cost).map_err(|e| {
            error!("Password hashing failed for {}: {}", username, e);
            AppError::Internal("password hashing failed".to_string())
        })?;

        let user = self
            .store
            .create_user(username, password_hash)
            .inspect_err(|_| {
                warn!("Signup failed: username {} already exists", username);
            })?;
        info!("User {} signed up", username);
        Ok(user)
    }

    /// Checks a password against the stored hash.
    ///
    /// Unknown users and wrong passwords fail identically.
    pub fn login(&self, username: &str, password: &str) -> Result<UserRecord> {
        require_credentials(username, password)?;
        let invalid = || AppError::Unauthorized("Invalid username or password.".to_string());

        let Some((user, password_hash)) = self.store.credentials(username) else {
            warn!("Failed login attempt for username: {}", username);
            return Err(invalid());
        };
        let matches = bcrypt::verify(password, &password_hash).map_err(|e| {
            error!("Password verification failed for {}: {}", username, e);
            AppError::Internal("password verification failed".to_string())
        })?;
        if !matches {
            warn!("Failed login attempt for username: {}", username);
            return Err(invalid());
        }

        info!("User {} logged in", username);
        Ok(user)
    }

    /// Resolves a user through the `user:` cache entry.
    pub fn find_user(&self, username: &str) -> Result<UserRecord> {
        let key = user_key(username);
        if let Some(cached) = self.cache.get(&key) {
            if let Ok(user) = serde_json::from_value::<UserRecord>(cached) {
                return Ok(user);
            }
            warn!("Discarding malformed cache entry {}", key);
        }

        let user = self.store.find_user(username).ok_or_else(|| {
            warn!("User {} not found", username);
            AppError::NotFound("User not found".to_string())
        })?;
        self.cache.set(key, json!(user), Some(self.user_ttl));
        Ok(user)
    }

    // == List ==
    /// Returns a page of the user's tasks, served from cache when possible.
    pub fn list_tasks(&self, username: &str, page: u32, limit: u32) -> Result<TaskPage> {
        if limit == 0 {
            return Err(AppError::InvalidRequest(
                "limit must be at least 1".to_string(),
            ));
        }
        let user = self.find_user(username)?;
        let key = task_list_key(username, page, limit);

        if let Some(cached) = self.cached_page(&key) {
            return Ok(TaskPage {
                pages: page_count(cached.total_count, limit),
                tasks: cached.tasks,
                page,
                limit,
                total_count: cached.total_count,
                cache_hit: true,
            });
        }

        let total_count = self.store.count_for(user.user_id);
        let today = Local::now().date_naive();
        let tasks: Vec<TaskView> = self
            .store
            .page_for(user.user_id, page, limit)
            .iter()
            .map(|task| TaskView::from_task(task, today))
            .collect();

        let payload = CachedTaskPage {
            tasks: tasks.clone(),
            total_count,
        };
        self.cache.set(key.clone(), json!(payload), Some(self.page_ttl));
        info!(
            "Cache set for {} with {} tasks, total: {}",
            key,
            tasks.len(),
            total_count
        );

        Ok(TaskPage {
            tasks,
            page,
            limit,
            total_count,
            pages: page_count(total_count, limit),
            cache_hit: false,
        })
    }

    fn cached_page(&self, key: &str) -> Option<CachedTaskPage> {
        let cached = self.cache.get(key);
        let stats = self.cache.stats();
        match cached {
            Some(value) => {
                info!(
                    "Cache hit for {} - size={} hits={} misses={} hit_rate={}",
                    key,
                    stats.size,
                    stats.hits,
                    stats.misses,
                    stats.hit_rate_label()
                );
                serde_json::from_value(value)
                    .inspect_err(|e| warn!("Discarding malformed cache entry {}: {}", key, e))
                    .ok()
            }
            None => {
                info!(
                    "Cache miss for {} - size={} hits={} misses={} hit_rate={}",
                    key,
                    stats.size,
                    stats.hits,
                    stats.misses,
                    stats.hit_rate_label()
                );
                None
            }
        }
    }

    // == Mutations ==
    pub fn add_task(&self, username: &str, input: TaskInput) -> Result<TaskView> {
        let fields = input.into_fields()?;
        let user = self.find_user(username)?;
        let task = self.store.insert_task(user.user_id, fields);

        self.after_mutation(
            username,
            "add_task",
            json!({
                "title": task.title,
                "due_date": task.due_date.format(DUE_DATE_FORMAT).to_string(),
            }),
        );
        Ok(TaskView::from_task(&task, Local::now().date_naive()))
    }

    pub fn edit_task(&self, username: &str, task_id: u64, input: TaskInput) -> Result<TaskView> {
        let fields = input.into_fields()?;
        let user = self.find_user(username)?;
        let task = self.store.update_task(user.user_id, task_id, fields)?;

        self.after_mutation(
            username,
            "edit_task",
            json!({
                "task_id": task_id,
                "new_title": task.title,
                "due_date": task.due_date.format(DUE_DATE_FORMAT).to_string(),
            }),
        );
        Ok(TaskView::from_task(&task, Local::now().date_naive()))
    }

    pub fn delete_task(&self, username: &str, task_id: u64) -> Result<()> {
        let user = self.find_user(username)?;
        self.store.remove_task(user.user_id, task_id)?;

        self.after_mutation(username, "delete_task", json!({ "task_id": task_id }));
        info!("Task {} deleted for user {}", task_id, username);
        Ok(())
    }

    /// Flips completion and returns the new state.
    pub fn toggle_task(&self, username: &str, task_id: u64) -> Result<bool> {
        let user = self.find_user(username)?;
        let is_completed = self.store.toggle_task(user.user_id, task_id)?;

        self.after_mutation(
            username,
            "toggle_complete",
            json!({ "task_id": task_id, "is_completed": is_completed }),
        );
        Ok(is_completed)
    }

    /// Drops the user's cached pages and records the event.
    fn after_mutation(&self, username: &str, event: &str, details: Value) {
        let cleared = self.cache.clear_prefix(&task_prefix(username));
        info!("Cleared {} cache entries for user {}", cleared, username);
        self.telemetry.record(event, Some(username), Some(details));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TaskService {
        TaskService::from_config(&Config {
            bcrypt_cost: 4,
            ..Config::default()
        })
    }

    fn input(title: &str, due: &str) -> TaskInput {
        TaskInput {
            title: Some(title.to_string()),
            description: None,
            due_date: Some(due.to_string()),
        }
    }

    #[test]
    fn test_list_unknown_user() {
        let service = service();
        let result = service.list_tasks("ghost", 1, 10);
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_list_rejects_zero_limit() {
        let service = service();
        service.register_user("alice", "secret").unwrap();
        let result = service.list_tasks("alice", 1, 0);
        assert!(matches!(result, Err(AppError::InvalidRequest(_))));
    }

    #[test]
    fn test_list_read_through() {
        let service = service();
        service.register_user("alice", "secret").unwrap();
        service.add_task("alice", input("a", "2030-01-01")).unwrap();
        service.add_task("alice", input("b", "2030-01-02")).unwrap();

        let first = service.list_tasks("alice", 1, 10).unwrap();
        assert!(!first.cache_hit);
        assert_eq!(first.total_count, 2);
        assert_eq!(first.pages, 1);
        assert_eq!(first.tasks[0].title, "b");

        let second = service.list_tasks("alice", 1, 10).unwrap();
        assert!(second.cache_hit);
        assert_eq!(second.tasks, first.tasks);
        assert!(service.cache().get("tasks:alice:1:10").is_some());
    }

    #[test]
    fn test_mutations_invalidate_user_pages_only() {
        let service = service();
        service.register_user("alice", "secret").unwrap();
        service.register_user("bob", "hunter2").unwrap();
        let task = service.add_task("alice", input("a", "2030-01-01")).unwrap();
        service.add_task("bob", input("b", "2030-01-01")).unwrap();

        service.list_tasks("alice", 1, 10).unwrap();
        service.list_tasks("alice", 1, 5).unwrap();
        service.list_tasks("bob", 1, 10).unwrap();

        assert!(service.toggle_task("alice", task.id).unwrap());

        let alice = service.list_tasks("alice", 1, 10).unwrap();
        assert!(!alice.cache_hit);
        assert!(alice.tasks[0].is_completed);
        assert!(service.list_tasks("bob", 1, 10).unwrap().cache_hit);
    }

    #[test]
    fn test_user_lookup_is_cached() {
        let service = service();
        service.register_user("alice", "secret").unwrap();

        service.find_user("alice").unwrap();
        let before = service.cache_stats();
        service.find_user("alice").unwrap();
        let after = service.cache_stats();

        assert_eq!(after.hits, before.hits + 1);
        assert!(service.cache().get("user:alice").is_some());
    }

    #[test]
    fn test_add_task_validation() {
        let service = service();
        service.register_user("alice", "secret").unwrap();

        let missing = TaskInput {
            title: Some("x".to_string()),
            ..TaskInput::default()
        };
        assert!(matches!(
            service.add_task("alice", missing),
            Err(AppError::InvalidRequest(_))
        ));
        assert!(matches!(
            service.add_task("alice", input("x", "01/02/2030")),
            Err(AppError::InvalidRequest(_))
        ));
        assert!(matches!(
            service.add_task("alice", input("", "2030-01-01")),
            Err(AppError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_edit_and_delete_unknown_task() {
        let service = service();
        service.register_user("alice", "secret").unwrap();

        assert!(matches!(
            service.edit_task("alice", 42, input("x", "2030-01-01")),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.delete_task("alice", 42),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_mutations_record_telemetry() {
        let service = service();
        service.register_user("alice", "secret").unwrap();
        let task = service.add_task("alice", input("a", "2030-01-01")).unwrap();
        service
            .edit_task("alice", task.id, input("renamed", "2030-02-01"))
            .unwrap();
        service.toggle_task("alice", task.id).unwrap();
        service.delete_task("alice", task.id).unwrap();

        let events: Vec<String> = service
            .telemetry()
            .into_iter()
            .map(|event| event.event)
            .collect();
        assert_eq!(
            events,
            vec!["add_task", "edit_task", "toggle_complete", "delete_task"]
        );
    }

    #[test]
    fn test_register_user_rules() {
        let service = service();
        assert!(matches!(
            service.register_user("", "secret"),
            Err(AppError::InvalidRequest(_))
        ));
        assert!(matches!(
            service.register_user("alice", ""),
            Err(AppError::InvalidRequest(_))
        ));
        service.register_user("alice", "secret").unwrap();
        assert!(matches!(
            service.register_user("alice", "other"),
            Err(AppError::Conflict(_))
        ));
    }

    #[test]
    fn test_login_checks_password() {
        let service = service();
        service.register_user("alice", "secret").unwrap();

        let user = service.login("alice", "secret").unwrap();
        assert_eq!(user.username, "alice");
        assert!(matches!(
            service.login("alice", "wrong"),
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            service.login("ghost", "secret"),
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            service.login("alice", ""),
            Err(AppError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_cached_user_has_no_password_hash() {
        let service = service();
        service.register_user("alice", "secret").unwrap();
        service.find_user("alice").unwrap();

        let cached = service.cache().get("user:alice").unwrap();
        assert_eq!(cached["username"], "alice");
        assert!(cached.get("password_hash").is_none());
        assert!(!cached.to_string().contains("$2"));
    }

    #[test]
    fn test_hashing_failure_is_internal() {
        let service = TaskService::from_config(&Config {
            bcrypt_cost: 3,
            ..Config::default()
        });

        let result = service.register_user("alice", "secret");
        assert!(matches!(result, Err(AppError::Internal(_))));
        assert!(matches!(
            service.find_user("alice"),
            Err(AppError::NotFound(_))
        ));
    }
}
