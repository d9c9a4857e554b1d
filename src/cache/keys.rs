//! Cache Key Builders
//!
//! Callers depend on these exact formats; task pages for one user share the
//! `tasks:{username}:` prefix so a single prefix clear drops all of them.

/// Key for one page of a user's task list.
pub fn task_list_key(username: &str, page: u32, limit: u32) -> String {
    format!("tasks:{}:{}:{}", username, page, limit)
}

/// Key for a cached user lookup.
pub fn user_key(username: &str) -> String {
    format!("user:{}", username)
}

/// Prefix covering every cached task page of a user.
pub fn task_prefix(username: &str) -> String {
    format!("tasks:{}:", username)
}
