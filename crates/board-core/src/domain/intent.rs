//! Move Intent

use serde::{Deserialize, Serialize};

use super::column::ColumnId;

/// A requested task relocation between two columns
///
/// Emitted by the drag tracker on drop; consumed by the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveIntent {
    pub task_id: String,
    pub source: ColumnId,
    pub destination: ColumnId,
}

impl MoveIntent {
    pub fn new(task_id: impl Into<String>, source: ColumnId, destination: ColumnId) -> Self {
        Self {
            task_id: task_id.into(),
            source,
            destination,
        }
    }

    /// A drop on the card's own column moves nothing
    pub fn is_noop(&self) -> bool {
        self.source == self.destination
    }
}
