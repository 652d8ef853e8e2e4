//! Board Controller
//!
//! Owns the board cache and reconciles every mutation against the remote
//! store: apply locally first, then push the corresponding remote writes.
//!
//! Remote failures are logged and the optimistic local state is kept
//! until the next full load, so the board can run ahead of the store. A
//! stricter design would revert the local change (or retry) and surface
//! the error; the current behavior trades that for simplicity, and every
//! failure path below says so in the log.
//!
//! Because the store removes array elements by structural equality, a
//! move always re-sends the exact snapshot it removed. A concurrent
//! rename from another session can still change the stored value between
//! our read and the remove, in which case the remove matches nothing and
//! the task is duplicated until the next load; see DESIGN.md.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::cache::BoardCache;
use crate::domain::{default_board, Column, ColumnId, DomainError, DomainResult, MoveIntent, Task};
use crate::store::BoardStore;

type ChangeHook = Arc<dyn Fn() + Send + Sync>;

struct ControllerState {
    owner: Option<String>,
    cache: BoardCache,
}

/// Facade over the board: cache, store handle, and auth reaction.
///
/// All methods take `&self`; handles are cheap clones sharing one state.
/// The internal lock is only ever held for the synchronous cache step,
/// never across an await.
pub struct BoardController<S> {
    store: Arc<S>,
    state: Arc<Mutex<ControllerState>>,
    on_change: ChangeHook,
}

impl<S> Clone for BoardController<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            state: Arc::clone(&self.state),
            on_change: Arc::clone(&self.on_change),
        }
    }
}

impl<S: BoardStore> BoardController<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            state: Arc::new(Mutex::new(ControllerState {
                owner: None,
                cache: BoardCache::new(),
            })),
            on_change: Arc::new(|| {}),
        }
    }

    /// Invoke `hook` after every local cache change, optimistic updates
    /// included, so the UI can re-read `columns`
    pub fn with_on_change(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_change = Arc::new(hook);
        self
    }

    /// Snapshot of the columns in display order, for rendering
    pub fn columns(&self) -> Vec<Column> {
        self.lock().cache.columns().to_vec()
    }

    pub fn owner(&self) -> Option<String> {
        self.lock().owner.clone()
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        // a poisoned lock means a panic mid-update on this same thread;
        // the cache is still structurally valid
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn notify(&self) {
        (self.on_change)();
    }

    /// React to an identity change: load for a new owner, clear on
    /// sign-out
    pub async fn handle_auth_change(&self, owner: Option<String>) -> DomainResult<()> {
        match owner {
            Some(owner) => self.load(&owner).await,
            None => {
                {
                    let mut st = self.lock();
                    st.owner = None;
                    st.cache.clear();
                }
                self.notify();
                log::debug!("board cleared on sign-out");
                Ok(())
            }
        }
    }

    /// Fetch the owner's board, creating the default columns on first
    /// access. Errors surface to the caller; there is no local fallback.
    pub async fn load(&self, owner: &str) -> DomainResult<()> {
        let mut columns = self.store.load_columns(owner).await?;
        if columns.is_empty() {
            columns = default_board();
            for column in &columns {
                self.store.put_column(owner, column).await?;
            }
        }
        {
            let mut st = self.lock();
            st.owner = Some(owner.to_string());
            st.cache.replace(columns);
        }
        self.notify();
        log::info!("board loaded for {}", owner);
        Ok(())
    }

    /// Move a task between columns: optimistic cache move, then
    /// remove-by-value from the source document and add-by-value of the
    /// same snapshot to the destination document, strictly in that order.
    ///
    /// Stale intents (unknown task or column, source == destination) are
    /// silent no-ops with zero store calls. Returns whether a move was
    /// applied locally.
    pub async fn move_card(&self, intent: MoveIntent) -> DomainResult<bool> {
        let (owner, snapshot) = {
            let mut st = self.lock();
            let Some(owner) = st.owner.clone() else {
                return Ok(false);
            };
            match st.cache.move_task(&intent) {
                Some(task) => (owner, task),
                None => return Ok(false),
            }
        };
        self.notify();

        if let Err(e) = self
            .store
            .remove_task(&owner, intent.source, &snapshot)
            .await
        {
            log::error!(
                "move {}: remove from {} failed, board is ahead of the store: {}",
                snapshot.id,
                intent.source.as_str(),
                e
            );
            return Ok(true);
        }
        if let Err(e) = self
            .store
            .add_task(&owner, intent.destination, &snapshot)
            .await
        {
            log::error!(
                "move {}: add to {} failed, board is ahead of the store: {}",
                snapshot.id,
                intent.destination.as_str(),
                e
            );
        }
        Ok(true)
    }

    /// Create a card with a generated id and placeholder title. Returns
    /// the new id so the UI can put the card straight into edit mode.
    pub async fn add_card(&self, column: ColumnId) -> DomainResult<String> {
        let task = Task::new();
        let owner = {
            let mut st = self.lock();
            let Some(owner) = st.owner.clone() else {
                return Err(DomainError::Unauthenticated("no signed-in owner".into()));
            };
            if !st.cache.append_task(column, task.clone()) {
                return Err(DomainError::NotFound(format!("column {}", column.as_str())));
            }
            owner
        };
        self.notify();

        if let Err(e) = self.store.add_task(&owner, column, &task).await {
            log::error!(
                "add {}: remote add to {} failed: {}",
                task.id,
                column.as_str(),
                e
            );
        }
        Ok(task.id)
    }

    /// Rename a card in place. The store has no field-level update for
    /// array elements, so the old record is removed by value and the new
    /// one added. Returns whether the card was found.
    pub async fn edit_card(
        &self,
        column: ColumnId,
        task_id: &str,
        new_title: &str,
    ) -> DomainResult<bool> {
        let (owner, old, new) = {
            let mut st = self.lock();
            let Some(owner) = st.owner.clone() else {
                return Ok(false);
            };
            match st.cache.rename_task(column, task_id, new_title) {
                Some((old, new)) => (owner, old, new),
                None => return Ok(false),
            }
        };
        self.notify();

        if let Err(e) = self.store.remove_task(&owner, column, &old).await {
            log::error!("edit {}: remove of old record failed: {}", task_id, e);
            return Ok(true);
        }
        if let Err(e) = self.store.add_task(&owner, column, &new).await {
            log::error!("edit {}: add of new record failed: {}", task_id, e);
        }
        Ok(true)
    }

    /// Delete a card. No undo. Returns whether the card was found.
    pub async fn delete_card(&self, column: ColumnId, task_id: &str) -> DomainResult<bool> {
        let (owner, removed) = {
            let mut st = self.lock();
            let Some(owner) = st.owner.clone() else {
                return Ok(false);
            };
            match st.cache.remove_task(column, task_id) {
                Some(task) => (owner, task),
                None => return Ok(false),
            }
        };
        self.notify();

        if let Err(e) = self.store.remove_task(&owner, column, &removed).await {
            log::error!("delete {}: remote remove failed: {}", task_id, e);
        }
        Ok(true)
    }
}
