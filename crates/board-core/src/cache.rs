//! Board State Cache
//!
//! In-memory representation of the board: the single source of truth for
//! rendering. Pure data and mutation ops; all remote reconciliation lives
//! in the controller.

use crate::domain::{Column, ColumnId, MoveIntent, Task};

/// Ordered columns for one owner
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardCache {
    columns: Vec<Column>,
}

impl BoardCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically swap the entire cached state.
    ///
    /// Columns are re-sorted into the fixed display order; the remote
    /// store does not guarantee ordering across documents.
    pub fn replace(&mut self, mut columns: Vec<Column>) {
        columns.sort_by_key(|c| c.id.display_index());
        self.columns = columns;
    }

    pub fn clear(&mut self) {
        self.columns.clear();
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, id: ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    fn column_mut(&mut self, id: ColumnId) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.id == id)
    }

    /// Find a task and the column currently holding it
    pub fn locate(&self, task_id: &str) -> Option<(ColumnId, &Task)> {
        self.columns
            .iter()
            .find_map(|c| c.task(task_id).map(|t| (c.id, t)))
    }

    /// Total number of tasks across all columns
    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }

    /// Apply a move intent: remove from the source column, append to the
    /// destination column.
    ///
    /// Returns the moved snapshot, or None when the intent is stale (same
    /// column, unknown source or destination, task not present). Callers
    /// treat None as a no-op, not an error.
    pub fn move_task(&mut self, intent: &MoveIntent) -> Option<Task> {
        if intent.is_noop() {
            return None;
        }
        // check the destination before touching the source so a stale
        // intent can never drop the task on the floor
        self.column(intent.destination)?;
        let source = self.column_mut(intent.source)?;
        let idx = source.task_index(&intent.task_id)?;
        let task = source.tasks.remove(idx);
        if let Some(dest) = self.column_mut(intent.destination) {
            dest.tasks.push(task.clone());
        }
        Some(task)
    }

    /// Append a task to the end of a column's list
    pub fn append_task(&mut self, column: ColumnId, task: Task) -> bool {
        match self.column_mut(column) {
            Some(col) => {
                col.tasks.push(task);
                true
            }
            None => false,
        }
    }

    /// Replace a task's title in place; its position is untouched.
    ///
    /// Returns the (old, new) snapshots needed for the remove/add
    /// reconciliation against the store.
    pub fn rename_task(
        &mut self,
        column: ColumnId,
        task_id: &str,
        title: &str,
    ) -> Option<(Task, Task)> {
        let col = self.column_mut(column)?;
        let task = col.tasks.iter_mut().find(|t| t.id == task_id)?;
        let old = task.clone();
        task.title = title.to_string();
        Some((old, task.clone()))
    }

    /// Remove a task from a column, returning the removed snapshot
    pub fn remove_task(&mut self, column: ColumnId, task_id: &str) -> Option<Task> {
        let col = self.column_mut(column)?;
        let idx = col.task_index(task_id)?;
        Some(col.tasks.remove(idx))
    }
}
