//! Column Entity

use serde::{Deserialize, Serialize};

use super::task::Task;

/// The fixed column set, in board display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnId {
    Todo,
    InProgress,
    Done,
}

impl ColumnId {
    /// All columns in display order
    pub const ALL: [ColumnId; 3] = [ColumnId::Todo, ColumnId::InProgress, ColumnId::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnId::Todo => "todo",
            ColumnId::InProgress => "in-progress",
            ColumnId::Done => "done",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "todo" => Some(ColumnId::Todo),
            "in-progress" => Some(ColumnId::InProgress),
            "done" => Some(ColumnId::Done),
            _ => None,
        }
    }

    /// Column header shown on the board
    pub fn title(&self) -> &'static str {
        match self {
            ColumnId::Todo => "To Do",
            ColumnId::InProgress => "In Progress",
            ColumnId::Done => "Done",
        }
    }

    /// Position in the fixed display order
    pub fn display_index(&self) -> usize {
        match self {
            ColumnId::Todo => 0,
            ColumnId::InProgress => 1,
            ColumnId::Done => 2,
        }
    }
}

/// A named, ordered bucket of tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    pub tasks: Vec<Task>,
}

impl Column {
    /// Empty column with its standard title
    pub fn empty(id: ColumnId) -> Self {
        Self {
            id,
            title: id.title().to_string(),
            tasks: Vec::new(),
        }
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn task_index(&self, task_id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == task_id)
    }
}

/// The default board created for a new owner, in display order
pub fn default_board() -> Vec<Column> {
    ColumnId::ALL.iter().map(|id| Column::empty(*id)).collect()
}
