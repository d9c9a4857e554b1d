//! Task Store
//!
//! In-memory system of record for users and their tasks.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use parking_lot::RwLock;

use crate::error::{AppError, Result};
use crate::tasks::model::{Task, UserRecord};

#[derive(Debug)]
struct StoredUser {
    record: UserRecord,
    password_hash: String,
}

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<String, StoredUser>,
    tasks: HashMap<u64, Task>,
    next_user_id: u64,
    next_task_id: u64,
}

/// Fields written by create and edit.
#[derive(Debug, Clone)]
pub struct TaskFields {
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
}

// == Task Store ==
#[derive(Debug, Default)]
pub struct TaskStore {
    tables: RwLock<Tables>,
}

/// Number of pages for `total` items, never less than one.
pub fn page_count(total: usize, limit: u32) -> usize {
    let limit = limit.max(1) as usize;
    total.div_ceil(limit).max(1)
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    // == Users ==
    /// Registers a username with an already hashed password.
    ///
    /// Fails with `Conflict` if the username is taken.
    pub fn create_user(&self, username: &str, password_hash: String) -> Result<UserRecord> {
        let mut tables = self.tables.write();
        if tables.users.contains_key(username) {
            return Err(AppError::Conflict("Username already exists.".to_string()));
        }
        tables.next_user_id += 1;
        let user = UserRecord {
            user_id: tables.next_user_id,
            username: username.to_string(),
        };
        tables.users.insert(
            username.to_string(),
            StoredUser {
                record: user.clone(),
                password_hash,
            },
        );
        Ok(user)
    }

    pub fn find_user(&self, username: &str) -> Option<UserRecord> {
        self.tables
            .read()
            .users
            .get(username)
            .map(|stored| stored.record.clone())
    }

    /// Returns the user together with the stored password hash.
    pub fn credentials(&self, username: &str) -> Option<(UserRecord, String)> {
        self.tables
            .read()
            .users
            .get(username)
            .map(|stored| (stored.record.clone(), stored.password_hash.clone()))
    }

    // == Tasks ==
    pub fn insert_task(&self, user_id: u64, fields: TaskFields) -> Task {
        let mut tables = self.tables.write();
        tables.next_task_id += 1;
        let task = Task {
            id: tables.next_task_id,
            user_id,
            title: fields.title,
            description: fields.description,
            due_date: fields.due_date,
            is_completed: false,
            created_at: Utc::now(),
        };
        tables.tasks.insert(task.id, task.clone());
        task
    }

    /// Overwrites title, description and due date of a user's task.
    pub fn update_task(&self, user_id: u64, task_id: u64, fields: TaskFields) -> Result<Task> {
        let mut tables = self.tables.write();
        let task = owned_task_mut(&mut tables, user_id, task_id)?;
        task.title = fields.title;
        task.description = fields.description;
        task.due_date = fields.due_date;
        Ok(task.clone())
    }

    pub fn remove_task(&self, user_id: u64, task_id: u64) -> Result<Task> {
        let mut tables = self.tables.write();
        owned_task_mut(&mut tables, user_id, task_id)?;
        tables
            .tasks
            .remove(&task_id)
            .ok_or_else(task_not_found)
    }

    /// Flips completion and returns the new state.
    pub fn toggle_task(&self, user_id: u64, task_id: u64) -> Result<bool> {
        let mut tables = self.tables.write();
        let task = owned_task_mut(&mut tables, user_id, task_id)?;
        task.is_completed = !task.is_completed;
        Ok(task.is_completed)
    }

    pub fn count_for(&self, user_id: u64) -> usize {
        self.tables
            .read()
            .tasks
            .values()
            .filter(|task| task.user_id == user_id)
            .count()
    }

    // == Page ==
    /// Returns one page of a user's tasks, latest due date first.
    ///
    /// A page of 0 or past the end resolves to the last page.
    pub fn page_for(&self, user_id: u64, page: u32, limit: u32) -> Vec<Task> {
        let tables = self.tables.read();
        let mut tasks: Vec<&Task> = tables
            .tasks
            .values()
            .filter(|task| task.user_id == user_id)
            .collect();
        tasks.sort_by(|a, b| b.due_date.cmp(&a.due_date).then(a.id.cmp(&b.id)));

        let limit = limit.max(1) as usize;
        let pages = page_count(tasks.len(), limit as u32);
        let page = match page as usize {
            p if p == 0 || p > pages => pages,
            p => p,
        };

        tasks
            .into_iter()
            .skip((page - 1) * limit)
            .take(limit)
            .cloned()
            .collect()
    }
}

fn task_not_found() -> AppError {
    AppError::NotFound("Task not found".to_string())
}

fn owned_task_mut(tables: &mut Tables, user_id: u64, task_id: u64) -> Result<&mut Task> {
    tables
        .tasks
        .get_mut(&task_id)
        .filter(|task| task.user_id == user_id)
        .ok_or_else(task_not_found)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(title: &str, due: (i32, u32, u32)) -> TaskFields {
        TaskFields {
            title: title.to_string(),
            description: String::new(),
            due_date: NaiveDate::from_ymd_opt(due.0, due.1, due.2).unwrap(),
        }
    }

    #[test]
    fn test_create_user_conflict() {
        let store = TaskStore::new();

        let alice = store.create_user("alice", "hash".to_string()).unwrap();
        assert_eq!(alice.user_id, 1);
        assert!(matches!(
            store.create_user("alice", "other".to_string()),
            Err(AppError::Conflict(_))
        ));
        assert_eq!(store.find_user("alice"), Some(alice.clone()));
        assert_eq!(store.find_user("bob"), None);
        assert_eq!(store.credentials("alice"), Some((alice, "hash".to_string())));
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(25, 5), 5);
    }

    #[test]
    fn test_page_for_orders_by_due_date_desc() {
        let store = TaskStore::new();
        let user = store.create_user("alice", String::new()).unwrap();

        store.insert_task(user.user_id, fields("early", (2025, 1, 1)));
        store.insert_task(user.user_id, fields("late", (2025, 3, 1)));
        store.insert_task(user.user_id, fields("middle", (2025, 2, 1)));

        let titles: Vec<String> = store
            .page_for(user.user_id, 1, 10)
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["late", "middle", "early"]);
    }

    #[test]
    fn test_page_for_out_of_range_uses_last_page() {
        let store = TaskStore::new();
        let user = store.create_user("alice", String::new()).unwrap();
        for day in 1..=5 {
            store.insert_task(user.user_id, fields("t", (2025, 1, day)));
        }

        assert_eq!(store.page_for(user.user_id, 1, 2).len(), 2);
        assert_eq!(store.page_for(user.user_id, 3, 2).len(), 1);
        assert_eq!(store.page_for(user.user_id, 9, 2).len(), 1);
        assert_eq!(store.page_for(user.user_id, 0, 2).len(), 1);
    }

    #[test]
    fn test_tasks_are_scoped_to_owner() {
        let store = TaskStore::new();
        let alice = store.create_user("alice", String::new()).unwrap();
        let bob = store.create_user("bob", String::new()).unwrap();
        let task = store.insert_task(alice.user_id, fields("mine", (2025, 1, 1)));

        assert_eq!(store.count_for(alice.user_id), 1);
        assert_eq!(store.count_for(bob.user_id), 0);
        assert!(matches!(
            store.toggle_task(bob.user_id, task.id),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            store.remove_task(bob.user_id, task.id),
            Err(AppError::NotFound(_))
        ));
        assert_eq!(store.count_for(alice.user_id), 1);
    }

    #[test]
    fn test_update_toggle_remove() {
        let store = TaskStore::new();
        let user = store.create_user("alice", String::new()).unwrap();
        let task = store.insert_task(user.user_id, fields("draft", (2025, 1, 1)));

        let updated = store
            .update_task(user.user_id, task.id, fields("final", (2025, 2, 2)))
            .unwrap();
        assert_eq!(updated.title, "final");

        assert!(store.toggle_task(user.user_id, task.id).unwrap());
        assert!(!store.toggle_task(user.user_id, task.id).unwrap());

        store.remove_task(user.user_id, task.id).unwrap();
        assert_eq!(store.count_for(user.user_id), 0);
    }
}
