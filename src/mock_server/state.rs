//! Mock server state management.
//!
//! Provides the in-memory data store for the mock ClickUp API server.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use tokio::sync::RwLock;

/// Resource tables held by the mock server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Table {
    Teams,
    Spaces,
    Lists,
    Tasks,
    Comments,
}

/// A stored resource and the id of the resource it lives under.
#[derive(Debug, Clone)]
pub struct Record {
    pub parent: Option<String>,
    pub data: Map<String, Value>,
}

/// Shared state for the mock server.
///
/// Every table is keyed by resource id. It's wrapped in `Arc<RwLock<_>>`
/// for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// The user owning the token.
    pub user: Option<Value>,

    tables: BTreeMap<Table, BTreeMap<String, Record>>,

    /// Every request seen, as `"METHOD /path?query"`.
    pub requests: Vec<String>,

    /// Optional authentication token. If set, requests must include this token.
    pub required_token: Option<String>,

    next_id: u64,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self {
            next_id: 1000,
            ..Self::default()
        }
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    pub fn with_user(mut self, user: Value) -> Self {
        self.user = Some(user);
        self
    }

    pub fn with_team(mut self, team: Value) -> Self {
        self.put(Table::Teams, None, team);
        self
    }

    pub fn with_space(mut self, team_id: &str, space: Value) -> Self {
        self.put(Table::Spaces, Some(team_id), space);
        self
    }

    pub fn with_list(mut self, space_id: &str, list: Value) -> Self {
        self.put(Table::Lists, Some(space_id), list);
        self
    }

    pub fn with_task(mut self, list_id: &str, task: Value) -> Self {
        self.put(Table::Tasks, Some(list_id), task);
        self
    }

    pub fn with_comment(mut self, task_id: &str, comment: Value) -> Self {
        self.put(Table::Comments, Some(task_id), comment);
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    /// Store an object under its `id`. Non-objects are ignored.
    pub fn put(&mut self, table: Table, parent: Option<&str>, value: Value) {
        let Value::Object(data) = value else {
            return;
        };
        let id = data.get("id").map(id_string).unwrap_or_default();

        self.tables.entry(table).or_default().insert(
            id,
            Record {
                parent: parent.map(str::to_string),
                data,
            },
        );
    }

    pub fn get(&self, table: Table, id: &str) -> Option<&Record> {
        self.tables.get(&table)?.get(id)
    }

    /// Records living under `parent`, in id order.
    pub fn children(&self, table: Table, parent: &str) -> Vec<&Record> {
        self.all(table)
            .into_iter()
            .filter(|record| record.parent.as_deref() == Some(parent))
            .collect()
    }

    pub fn all(&self, table: Table) -> Vec<&Record> {
        self.tables
            .get(&table)
            .map(|records| records.values().collect())
            .unwrap_or_default()
    }

    /// Create a record with a fresh id and return it.
    pub fn insert(&mut self, table: Table, parent: &str, mut data: Map<String, Value>) -> Map<String, Value> {
        self.next_id += 1;
        let id = match table {
            // Task ids are strings, everything else numeric
            Table::Tasks => Value::String(format!("t{}", self.next_id)),
            _ => Value::from(self.next_id),
        };
        data.insert("id".to_string(), id);

        self.put(table, Some(parent), Value::Object(data.clone()));
        data
    }

    /// Merge `patch` into a record and return the result.
    pub fn update(&mut self, table: Table, id: &str, patch: Map<String, Value>) -> Option<&Map<String, Value>> {
        let record = self.tables.get_mut(&table)?.get_mut(id)?;
        for (key, value) in patch {
            if key != "id" {
                record.data.insert(key, value);
            }
        }
        Some(&record.data)
    }

    pub fn remove(&mut self, table: Table, id: &str) -> bool {
        self.tables
            .get_mut(&table)
            .and_then(|records| records.remove(id))
            .is_some()
    }

    /// Number of recorded requests matching `"METHOD /path"`, query ignored.
    pub fn request_count(&self, request: &str) -> usize {
        self.requests
            .iter()
            .filter(|seen| seen.split('?').next() == Some(request))
            .count()
    }
}

fn id_string(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_state_put_and_get() {
        let state = MockState::new()
            .with_team(json!({"id": "1", "name": "Team"}))
            .with_space("1", json!({"id": "10", "name": "Space"}));

        assert!(state.get(Table::Teams, "1").is_some());
        assert_eq!(state.children(Table::Spaces, "1").len(), 1);
        assert!(state.children(Table::Spaces, "2").is_empty());
    }

    #[test]
    fn test_numeric_ids_are_keyed_as_strings() {
        let state = MockState::new().with_list("10", json!({"id": 100}));
        assert!(state.get(Table::Lists, "100").is_some());
    }

    #[test]
    fn test_insert_assigns_ids() {
        let mut state = MockState::new();
        let task = state.insert(Table::Tasks, "100", json!({"name": "New"}).as_object().cloned().unwrap());
        let id = task["id"].as_str().unwrap().to_string();

        assert!(id.starts_with('t'));
        assert_eq!(state.get(Table::Tasks, &id).unwrap().parent.as_deref(), Some("100"));
    }

    #[test]
    fn test_update_merges_but_keeps_id() {
        let mut state = MockState::new().with_task("100", json!({"id": "abc", "name": "Old"}));
        let updated = state
            .update(Table::Tasks, "abc", json!({"id": "zzz", "name": "New"}).as_object().cloned().unwrap())
            .unwrap();

        assert_eq!(updated["name"], json!("New"));
        assert_eq!(updated["id"], json!("abc"));
    }

    #[test]
    fn test_remove() {
        let mut state = MockState::new().with_task("100", json!({"id": "abc"}));
        assert!(state.remove(Table::Tasks, "abc"));
        assert!(!state.remove(Table::Tasks, "abc"));
    }

    #[test]
    fn test_request_count_ignores_query() {
        let mut state = MockState::new();
        state.requests.push("GET /list/100/task?archived=1".into());
        state.requests.push("GET /list/100/task".into());
        state.requests.push("GET /task/abc".into());

        assert_eq!(state.request_count("GET /list/100/task"), 2);
        assert_eq!(state.request_count("GET /task/abc"), 1);
    }
}
