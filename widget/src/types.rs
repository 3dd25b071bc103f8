//! Domain types for the todo widget.
//!
//! The list is the single source of truth. "Ready" and "Completed" are not
//! stored anywhere: they are recomputed from the `completed` flag each time
//! they are asked for, so they can never disagree with the list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a todo item
///
/// Opaque to callers. Assigned once at creation and never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TodoId(Uuid);

impl TodoId {
    /// Creates a `TodoId` from raw generator output
    #[must_use]
    pub const fn from_u128(raw: u128) -> Self {
        Self(Uuid::from_u128(raw))
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TodoId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Unique identifier
    pub id: TodoId,
    /// What needs doing, exactly as typed
    pub description: String,
    /// Whether the item sits in the completed list
    pub completed: bool,
    /// When the item was submitted
    pub created_at: DateTime<Utc>,
}

impl TodoItem {
    /// Creates a new, active todo item
    #[must_use]
    pub const fn new(id: TodoId, description: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            description,
            completed: false,
            created_at,
        }
    }

    /// Flips the completed flag
    pub const fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

/// State of one mounted widget
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoState {
    /// All items, newest first
    pub items: Vec<TodoItem>,
    /// Text currently in the input, not yet submitted
    pub draft: String,
}

impl TodoState {
    /// Creates an empty widget state
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            draft: String::new(),
        }
    }

    /// Whether the draft may be submitted
    ///
    /// Whitespace-only drafts are treated as empty.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.draft.trim().is_empty()
    }

    /// Items still to do, newest first
    pub fn active_items(&self) -> impl Iterator<Item = &TodoItem> {
        self.items.iter().filter(|item| !item.completed)
    }

    /// Completed items, newest first
    pub fn completed_items(&self) -> impl Iterator<Item = &TodoItem> {
        self.items.iter().filter(|item| item.completed)
    }

    /// Returns the number of items
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Returns the number of completed items
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed_items().count()
    }

    /// Returns an item by ID
    #[must_use]
    pub fn get(&self, id: &TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == *id)
    }

    /// Returns a mutable item by ID
    pub fn get_mut(&mut self, id: &TodoId) -> Option<&mut TodoItem> {
        self.items.iter_mut().find(|item| item.id == *id)
    }

    /// Checks if an item exists
    #[must_use]
    pub fn exists(&self, id: &TodoId) -> bool {
        self.get(id).is_some()
    }
}

/// Everything a user can do to the widget
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoAction {
    /// The input's text changed
    DraftChanged {
        /// Full new contents of the input
        text: String,
    },

    /// The form was submitted with whatever is in the draft
    Submit,

    /// "done" on a ready item or "move back" on a completed one
    ToggleComplete {
        /// Item to toggle
        id: TodoId,
    },

    /// "remove" on a completed item
    Remove {
        /// Item to remove
        id: TodoId,
    },

    /// Items present at mount, listed top to bottom
    Seed {
        /// Descriptions in display order
        descriptions: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(raw: u128, description: &str, completed: bool) -> TodoItem {
        let mut item = TodoItem::new(TodoId::from_u128(raw), description.to_string(), Utc::now());
        item.completed = completed;
        item
    }

    #[test]
    fn todo_id_round_trips_through_display() {
        let id = TodoId::from_u128(42);
        let parsed: TodoId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("not-an-id".parse::<TodoId>().is_err());
    }

    #[test]
    fn toggle_flips_flag() {
        let mut todo = item(1, "Buy milk", false);
        todo.toggle();
        assert!(todo.completed);
        todo.toggle();
        assert!(!todo.completed);
    }

    #[test]
    fn can_submit_ignores_whitespace() {
        let mut state = TodoState::new();
        assert!(!state.can_submit());
        state.draft = " \t ".to_string();
        assert!(!state.can_submit());
        state.draft = " a ".to_string();
        assert!(state.can_submit());
    }

    #[test]
    fn views_partition_items_in_list_order() {
        let state = TodoState {
            items: vec![
                item(3, "c", true),
                item(2, "b", false),
                item(1, "a", true),
            ],
            draft: String::new(),
        };

        let active: Vec<_> = state.active_items().map(|i| i.description.as_str()).collect();
        let completed: Vec<_> = state.completed_items().map(|i| i.description.as_str()).collect();

        assert_eq!(active, ["b"]);
        assert_eq!(completed, ["c", "a"]);
        assert_eq!(state.count(), 3);
        assert_eq!(state.completed_count(), 2);
    }

    #[test]
    fn lookup_by_id() {
        let state = TodoState {
            items: vec![item(7, "x", false)],
            draft: String::new(),
        };
        assert!(state.exists(&TodoId::from_u128(7)));
        assert!(state.get(&TodoId::from_u128(8)).is_none());
    }
}
