//! Task Entity

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title given to a freshly created task
pub const DEFAULT_TASK_TITLE: &str = "New Task";

/// A single card on the board
///
/// Tasks are value snapshots as far as the store layer is concerned: the
/// remote array remove matches by full structural equality, so the exact
/// record read out of a column must be the exact record sent back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Task {
    /// Opaque unique identifier
    pub id: String,
    /// Card title
    pub title: String,
}

impl Task {
    /// Create a task with a fresh generated id and the placeholder title
    pub fn new() -> Self {
        Self {
            id: format!("task-{}", Uuid::new_v4()),
            title: DEFAULT_TASK_TITLE.to_string(),
        }
    }

    /// Build a task from known parts (fixtures, store decoding)
    pub fn with_title(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }

    /// Copy of this task with a different title and the same id
    pub fn renamed(&self, title: &str) -> Self {
        Self {
            id: self.id.clone(),
            title: title.to_string(),
        }
    }
}

impl Default for Task {
    fn default() -> Self {
        Self::new()
    }
}
