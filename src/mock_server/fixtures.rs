//! Test data fixtures for the mock server.
//!
//! Provides factory functions for realistic ClickUp payloads.

use serde_json::{json, Value};

use super::state::MockState;

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // Hierarchy Fixtures
    // =========================================================================

    pub fn user(id: u64, username: &str) -> Value {
        json!({
            "id": id,
            "username": username,
            "email": format!("{}@example.com", username.to_lowercase().replace(' ', ".")),
            "color": "#827718",
            "profilePicture": null,
            "initials": username.chars().next().map(String::from).unwrap_or_default(),
            "week_start_day": 0,
            "global_font_support": false,
            "timezone": "America/New_York"
        })
    }

    pub fn team(id: &str, name: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "color": "#000000",
            "avatar": null,
            "members": [
                {"user": {"id": 183, "username": "John Doe", "role": 1}}
            ]
        })
    }

    pub fn space(id: &str, name: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "private": false,
            "multiple_assignees": true,
            "archived": false,
            "statuses": [
                {"status": "to do", "type": "open", "orderindex": 0, "color": "#d3d3d3"},
                {"status": "complete", "type": "closed", "orderindex": 1, "color": "#6bc950"}
            ]
        })
    }

    pub fn list(id: &str, name: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "orderindex": 0,
            "archived": false,
            "override_statuses": false,
            "task_count": "2",
            "due_date": null,
            "start_date": null
        })
    }

    // =========================================================================
    // Task Fixtures
    // =========================================================================

    pub fn task(id: &str, name: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "text_content": "",
            "archived": false,
            "orderindex": "1.00000000000000000000000000000000",
            "date_created": "1567780450202",
            "date_updated": "1567780450202",
            "date_closed": null,
            "due_date": null,
            "creator": {"id": 183, "username": "John Doe", "color": "#827718"},
            "assignees": [],
            "tags": [],
            "status": {"status": "to do", "type": "open", "orderindex": 0, "color": "#d3d3d3"},
            "priority": null
        })
    }

    pub fn archived_task(id: &str, name: &str) -> Value {
        let mut task = Self::task(id, name);
        task["archived"] = json!(true);
        task
    }

    pub fn comment(id: u64, text: &str) -> Value {
        json!({
            "id": id.to_string(),
            "comment": [{"text": text}],
            "comment_text": text,
            "user": {"id": 183, "username": "John Doe"},
            "resolved": false,
            "assignee": null,
            "assigned_by": null,
            "date": "1568036964079"
        })
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    /// One user, one team with one space, one list, two tasks (one
    /// archived) and comments on the first task.
    pub fn default_scenario() -> MockState {
        MockState::new()
            .with_user(Self::user(183, "John Doe"))
            .with_team(Self::team("1", "Test Team"))
            .with_space("1", Self::space("10", "Engineering"))
            .with_list("10", Self::list("100", "Backlog"))
            .with_task("100", Self::task("abc1", "Write docs"))
            .with_task("100", Self::archived_task("abc2", "Old work"))
            .with_comment("abc1", Self::comment(1, "First!"))
            .with_comment("abc1", Self::comment(2, "Looks good"))
    }
}
