use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A single to-do item.
///
/// An empty `id` marks an item the remote authority has never seen. Once
/// the server assigns one it never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "TodoRecord")]
pub struct Todo {
    pub id: String,
    pub item: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Wire shape of a todo. Servers may send `id`, `_id` or both.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TodoRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "_id")]
    legacy_id: Option<String>,
    item: String,
    #[serde(default)]
    completed: bool,
    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    updated_at: DateTime<Utc>,
}

impl From<TodoRecord> for Todo {
    fn from(record: TodoRecord) -> Self {
        let id = record
            .id
            .filter(|id| !id.is_empty())
            .or(record.legacy_id)
            .unwrap_or_default();
        Todo {
            id,
            item: record.item,
            completed: record.completed,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

impl Todo {
    /// A local, unpersisted item.
    pub fn new(item: &str) -> Self {
        let now = Utc::now();
        Todo {
            id: String::new(),
            item: item.to_string(),
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_persisted(&self) -> bool {
        !self.id.is_empty()
    }
}

/// Body of a create request.
#[derive(Debug, Serialize)]
pub struct NewTodo<'a> {
    pub item: &'a str,
}

/// Open items first, then by text ignoring case.
pub fn compare(a: &Todo, b: &Todo) -> Ordering {
    a.completed
        .cmp(&b.completed)
        .then_with(|| a.item.to_lowercase().cmp(&b.item.to_lowercase()))
}

/// Sorts in place. Stable, so items with equal keys keep their order.
pub fn sort_todos(todos: &mut [Todo]) {
    todos.sort_by(compare);
}

pub fn count_open(todos: &[Todo]) -> usize {
    todos.iter().filter(|todo| !todo.completed).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(id: &str, item: &str, completed: bool) -> Todo {
        Todo {
            id: id.to_string(),
            completed,
            ..Todo::new(item)
        }
    }

    fn items(todos: &[Todo]) -> Vec<&str> {
        todos.iter().map(|t| t.item.as_str()).collect()
    }

    #[test]
    fn test_open_items_sort_first() {
        let mut todos = vec![todo("1", "b", false), todo("2", "a", true)];
        sort_todos(&mut todos);
        assert_eq!(items(&todos), vec!["b", "a"]);
    }

    #[test]
    fn test_sort_ignores_case() {
        let mut todos = vec![
            todo("1", "banana", false),
            todo("2", "Apple", false),
            todo("3", "cherry", true),
            todo("4", "Avocado", true),
        ];
        sort_todos(&mut todos);
        assert_eq!(items(&todos), vec!["Apple", "banana", "Avocado", "cherry"]);
    }

    #[test]
    fn test_sort_is_stable_and_idempotent() {
        let mut todos = vec![todo("1", "Milk", false), todo("2", "milk", false), todo("3", "MILK", false)];
        sort_todos(&mut todos);
        let ids: Vec<&str> = todos.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);

        let once = todos.clone();
        sort_todos(&mut todos);
        assert_eq!(todos, once);
    }

    #[test]
    fn test_count_open() {
        let todos = vec![todo("1", "a", false), todo("2", "b", true), todo("3", "c", false)];
        assert_eq!(count_open(&todos), 2);
        assert_eq!(count_open(&[]), 0);
    }

    #[test]
    fn test_new_todo_is_unpersisted() {
        let todo = Todo::new("write tests");
        assert!(!todo.is_persisted());
        assert!(!todo.completed);
        assert_eq!(todo.created_at, todo.updated_at);
    }

    #[test]
    fn test_deserialize_server_record() {
        let todo: Todo = serde_json::from_str(
            r#"{"id":"42","item":"Buy milk","completed":true,"createdAt":"2024-01-02T03:04:05Z","updatedAt":"2024-01-03T03:04:05Z"}"#,
        )
        .unwrap();
        assert_eq!(todo.id, "42");
        assert!(todo.completed);
        assert_eq!(todo.created_at.to_rfc3339(), "2024-01-02T03:04:05+00:00");
    }

    #[test]
    fn test_deserialize_defaults() {
        let todo: Todo = serde_json::from_str(r#"{"_id":"7","item":"Call mom"}"#).unwrap();
        assert_eq!(todo.id, "7");
        assert!(!todo.completed);
    }

    #[test]
    fn test_deserialize_with_both_id_keys() {
        let todo: Todo = serde_json::from_str(r#"{"_id":"1","id":"1","item":"abc"}"#).unwrap();
        assert_eq!(todo.id, "1");

        let todo: Todo = serde_json::from_str(r#"{"id":"","_id":"9","item":"abc"}"#).unwrap();
        assert_eq!(todo.id, "9");

        let todos: Vec<Todo> =
            serde_json::from_str(r#"[{"_id":"1","id":"1","item":"abc"},{"id":"2","item":"def"}]"#).unwrap();
        assert_eq!(todos.len(), 2);
    }

    #[test]
    fn test_serialize_camel_case() {
        let value = serde_json::to_value(todo("1", "x", false)).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
    }
}
