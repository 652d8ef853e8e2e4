//! In-Memory Board Store
//!
//! Mirrors the remote store's value-based array semantics so tests
//! exercise the real contract: add is a union, remove matches by
//! structural equality and silently matches nothing when the value
//! changed underneath.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{Column, ColumnId, DomainError, DomainResult, Task};

use super::BoardStore;

type Boards = HashMap<String, Vec<Column>>;

#[derive(Default)]
pub struct MemoryBoardStore {
    boards: Mutex<Boards>,
    mutations: AtomicUsize,
}

impl MemoryBoardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of write operations issued so far
    pub fn mutation_count(&self) -> usize {
        self.mutations.load(Ordering::SeqCst)
    }

    /// Snapshot of one owner's stored columns, in storage order
    pub fn stored_columns(&self, owner: &str) -> Vec<Column> {
        self.boards
            .lock()
            .map(|boards| boards.get(owner).cloned().unwrap_or_default())
            .unwrap_or_default()
    }

    fn with_boards<T>(&self, f: impl FnOnce(&mut Boards) -> DomainResult<T>) -> DomainResult<T> {
        let mut boards = self
            .boards
            .lock()
            .map_err(|_| DomainError::Internal("board store lock poisoned".into()))?;
        f(&mut boards)
    }

    fn with_column<T>(
        &self,
        owner: &str,
        column: ColumnId,
        f: impl FnOnce(&mut Column) -> T,
    ) -> DomainResult<T> {
        self.with_boards(|boards| {
            boards
                .get_mut(owner)
                .and_then(|cols| cols.iter_mut().find(|c| c.id == column))
                .map(f)
                .ok_or_else(|| {
                    DomainError::NotFound(format!("column document {}/{}", owner, column.as_str()))
                })
        })
    }
}

#[async_trait]
impl BoardStore for MemoryBoardStore {
    async fn load_columns(&self, owner: &str) -> DomainResult<Vec<Column>> {
        self.with_boards(|boards| Ok(boards.get(owner).cloned().unwrap_or_default()))
    }

    async fn put_column(&self, owner: &str, column: &Column) -> DomainResult<()> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        self.with_boards(|boards| {
            let columns = boards.entry(owner.to_string()).or_default();
            match columns.iter_mut().find(|c| c.id == column.id) {
                Some(existing) => *existing = column.clone(),
                None => columns.push(column.clone()),
            }
            Ok(())
        })
    }

    async fn add_task(&self, owner: &str, column: ColumnId, task: &Task) -> DomainResult<()> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        self.with_column(owner, column, |col| {
            if !col.tasks.contains(task) {
                col.tasks.push(task.clone());
            }
        })
    }

    async fn remove_task(&self, owner: &str, column: ColumnId, task: &Task) -> DomainResult<()> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        self.with_column(owner, column, |col| {
            col.tasks.retain(|t| t != task);
        })
    }
}
