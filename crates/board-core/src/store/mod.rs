//! Remote Board Store
//!
//! Abstraction over the per-owner, per-column document store, plus the
//! implementations: an in-process store for tests and offline use, and a
//! Firestore REST client.

mod firestore;
mod memory;

pub use firestore::FirestoreBoardStore;
pub use memory::MemoryBoardStore;

use async_trait::async_trait;

use crate::domain::{Column, ColumnId, DomainResult, Task};

/// Remote document store holding one document per column.
///
/// Array mutations are value-based: `remove_task` deletes elements that
/// structurally equal the given record (matching nothing is a silent
/// no-op, not an error), and `add_task` appends unless a structurally
/// identical element is already present.
#[async_trait]
pub trait BoardStore: Send + Sync {
    /// Read every column document stored for this owner
    async fn load_columns(&self, owner: &str) -> DomainResult<Vec<Column>>;

    /// Create or overwrite a column document
    async fn put_column(&self, owner: &str, column: &Column) -> DomainResult<()>;

    /// Atomically add a task record to a column document's array
    async fn add_task(&self, owner: &str, column: ColumnId, task: &Task) -> DomainResult<()>;

    /// Atomically remove a task record from a column document's array,
    /// matching by full value equality
    async fn remove_task(&self, owner: &str, column: ColumnId, task: &Task) -> DomainResult<()>;
}
