//! Controller Integration Tests
//!
//! Exercises the board controller against the in-memory store.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::controller::BoardController;
use crate::domain::{
    Column, ColumnId, DomainError, DomainResult, MoveIntent, Task, DEFAULT_TASK_TITLE,
};
use crate::store::{BoardStore, MemoryBoardStore};

async fn setup_board(owner: &str) -> (Arc<MemoryBoardStore>, BoardController<MemoryBoardStore>) {
    let store = Arc::new(MemoryBoardStore::new());
    let controller = BoardController::new(store.clone());
    controller.load(owner).await.expect("Failed to load board");
    (store, controller)
}

fn column<'a>(columns: &'a [Column], id: ColumnId) -> &'a Column {
    columns
        .iter()
        .find(|c| c.id == id)
        .expect("column should exist")
}

/// Store wrapper that fails removals on demand
struct FailingStore {
    inner: MemoryBoardStore,
    fail_removes: AtomicBool,
}

impl FailingStore {
    fn new() -> Self {
        Self {
            inner: MemoryBoardStore::new(),
            fail_removes: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl BoardStore for FailingStore {
    async fn load_columns(&self, owner: &str) -> DomainResult<Vec<Column>> {
        self.inner.load_columns(owner).await
    }

    async fn put_column(&self, owner: &str, column: &Column) -> DomainResult<()> {
        self.inner.put_column(owner, column).await
    }

    async fn add_task(&self, owner: &str, column: ColumnId, task: &Task) -> DomainResult<()> {
        self.inner.add_task(owner, column, task).await
    }

    async fn remove_task(&self, owner: &str, column: ColumnId, task: &Task) -> DomainResult<()> {
        if self.fail_removes.load(Ordering::SeqCst) {
            return Err(DomainError::Remote("injected remove failure".into()));
        }
        self.inner.remove_task(owner, column, task).await
    }
}

#[tokio::test]
async fn test_first_load_initializes_default_columns() {
    let (store, controller) = setup_board("u1").await;

    let columns = controller.columns();
    assert_eq!(columns.len(), 3);
    assert_eq!(
        columns.iter().map(|c| c.id).collect::<Vec<_>>(),
        ColumnId::ALL.to_vec()
    );
    assert!(columns.iter().all(|c| c.tasks.is_empty()));

    // defaults were written through to the store, in display order
    let stored = store.stored_columns("u1");
    assert_eq!(
        stored.iter().map(|c| c.id).collect::<Vec<_>>(),
        ColumnId::ALL.to_vec()
    );
}

#[tokio::test]
async fn test_load_sorts_columns_into_display_order() {
    let store = Arc::new(MemoryBoardStore::new());
    // pre-populate out of display order
    store
        .put_column("u1", &Column::empty(ColumnId::Done))
        .await
        .unwrap();
    store
        .put_column("u1", &Column::empty(ColumnId::Todo))
        .await
        .unwrap();
    store
        .put_column("u1", &Column::empty(ColumnId::InProgress))
        .await
        .unwrap();

    let controller = BoardController::new(store);
    controller.load("u1").await.expect("Failed to load board");

    assert_eq!(
        controller.columns().iter().map(|c| c.id).collect::<Vec<_>>(),
        ColumnId::ALL.to_vec()
    );
}

#[tokio::test]
async fn test_add_card_appends_with_generated_id() {
    let (store, controller) = setup_board("u1").await;

    let id = controller
        .add_card(ColumnId::Todo)
        .await
        .expect("Failed to add card");
    assert!(!id.is_empty());

    let columns = controller.columns();
    let todo = column(&columns, ColumnId::Todo);
    assert_eq!(todo.tasks.len(), 1);
    assert_eq!(todo.tasks[0].id, id);
    assert_eq!(todo.tasks[0].title, DEFAULT_TASK_TITLE);

    // written through to the remote document
    let stored = store.stored_columns("u1");
    assert_eq!(column(&stored, ColumnId::Todo).tasks, todo.tasks);
}

#[tokio::test]
async fn test_new_cards_append_at_the_end() {
    let (_, controller) = setup_board("u1").await;

    let first = controller.add_card(ColumnId::Todo).await.unwrap();
    let second = controller.add_card(ColumnId::Todo).await.unwrap();

    let columns = controller.columns();
    let todo = column(&columns, ColumnId::Todo);
    assert_eq!(todo.tasks[0].id, first);
    assert_eq!(todo.tasks[1].id, second);
}

#[tokio::test]
async fn test_add_card_requires_owner() {
    let store = Arc::new(MemoryBoardStore::new());
    let controller = BoardController::new(store);
    assert!(controller.add_card(ColumnId::Todo).await.is_err());
}

#[tokio::test]
async fn test_move_card_relocates_task() {
    let (store, controller) = setup_board("u1").await;
    let id = controller.add_card(ColumnId::Todo).await.unwrap();
    controller
        .edit_card(ColumnId::Todo, &id, "Write spec")
        .await
        .unwrap();

    let applied = controller
        .move_card(MoveIntent::new(id.clone(), ColumnId::Todo, ColumnId::InProgress))
        .await
        .expect("Failed to move card");
    assert!(applied);

    let columns = controller.columns();
    assert!(column(&columns, ColumnId::Todo).tasks.is_empty());
    assert_eq!(
        column(&columns, ColumnId::InProgress).tasks,
        vec![Task::with_title(id.clone(), "Write spec")]
    );
    assert!(column(&columns, ColumnId::Done).tasks.is_empty());

    // remote store converged to the same placement
    let stored = store.stored_columns("u1");
    assert!(column(&stored, ColumnId::Todo).tasks.is_empty());
    assert_eq!(
        column(&stored, ColumnId::InProgress).tasks,
        vec![Task::with_title(id, "Write spec")]
    );
}

#[tokio::test]
async fn test_move_to_same_column_is_noop() {
    let (store, controller) = setup_board("u1").await;
    let id = controller.add_card(ColumnId::Todo).await.unwrap();

    let before = controller.columns();
    let writes_before = store.mutation_count();

    let applied = controller
        .move_card(MoveIntent::new(id, ColumnId::Todo, ColumnId::Todo))
        .await
        .unwrap();

    assert!(!applied);
    assert_eq!(controller.columns(), before);
    assert_eq!(store.mutation_count(), writes_before);
}

#[tokio::test]
async fn test_move_unknown_task_is_noop() {
    let (store, controller) = setup_board("u1").await;

    let before = controller.columns();
    let writes_before = store.mutation_count();

    let applied = controller
        .move_card(MoveIntent::new("tX", ColumnId::Todo, ColumnId::Done))
        .await
        .unwrap();

    assert!(!applied);
    assert_eq!(controller.columns(), before);
    assert_eq!(store.mutation_count(), writes_before);
}

#[tokio::test]
async fn test_edit_card_renames_in_place() {
    let (store, controller) = setup_board("u1").await;
    let first = controller.add_card(ColumnId::Todo).await.unwrap();
    let second = controller.add_card(ColumnId::Todo).await.unwrap();

    let found = controller
        .edit_card(ColumnId::Todo, &first, "Write final spec")
        .await
        .expect("Failed to edit card");
    assert!(found);

    let columns = controller.columns();
    let todo = column(&columns, ColumnId::Todo);
    assert_eq!(todo.task_index(&first), Some(0));
    assert_eq!(todo.tasks[0].title, "Write final spec");
    assert_eq!(todo.task_index(&second), Some(1));

    // remote document holds the renamed record
    let stored = store.stored_columns("u1");
    let stored_todo = column(&stored, ColumnId::Todo);
    assert!(stored_todo
        .tasks
        .contains(&Task::with_title(first, "Write final spec")));
}

#[tokio::test]
async fn test_edit_unknown_card_is_noop() {
    let (_, controller) = setup_board("u1").await;
    let found = controller
        .edit_card(ColumnId::Todo, "tX", "anything")
        .await
        .unwrap();
    assert!(!found);
}

#[tokio::test]
async fn test_delete_card_removes_task() {
    let (store, controller) = setup_board("u1").await;
    let id = controller.add_card(ColumnId::Done).await.unwrap();
    controller
        .edit_card(ColumnId::Done, &id, "Ship it")
        .await
        .unwrap();

    let found = controller
        .delete_card(ColumnId::Done, &id)
        .await
        .expect("Failed to delete card");
    assert!(found);

    let columns = controller.columns();
    assert!(column(&columns, ColumnId::Done).tasks.is_empty());
    let stored = store.stored_columns("u1");
    assert!(column(&stored, ColumnId::Done).tasks.is_empty());
}

#[tokio::test]
async fn test_task_ids_stay_unique_across_mutations() {
    let (_, controller) = setup_board("u1").await;
    let a = controller.add_card(ColumnId::Todo).await.unwrap();
    let b = controller.add_card(ColumnId::Todo).await.unwrap();
    let c = controller.add_card(ColumnId::InProgress).await.unwrap();

    controller
        .move_card(MoveIntent::new(a.clone(), ColumnId::Todo, ColumnId::Done))
        .await
        .unwrap();
    controller
        .move_card(MoveIntent::new(c, ColumnId::InProgress, ColumnId::Todo))
        .await
        .unwrap();
    controller
        .move_card(MoveIntent::new(a, ColumnId::Done, ColumnId::InProgress))
        .await
        .unwrap();
    controller.delete_card(ColumnId::Todo, &b).await.unwrap();

    let columns = controller.columns();
    let mut ids: Vec<String> = columns
        .iter()
        .flat_map(|c| c.tasks.iter().map(|t| t.id.clone()))
        .collect();
    let total = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), total, "a task id appeared in more than one place");
    assert_eq!(total, 2);
}

#[tokio::test]
async fn test_remote_failure_keeps_optimistic_state() {
    let store = Arc::new(FailingStore::new());
    let controller = BoardController::new(store.clone());
    controller.load("u1").await.expect("Failed to load board");
    let id = controller.add_card(ColumnId::Todo).await.unwrap();

    store.fail_removes.store(true, Ordering::SeqCst);
    let applied = controller
        .move_card(MoveIntent::new(id.clone(), ColumnId::Todo, ColumnId::Done))
        .await
        .expect("move itself does not error");
    assert!(applied);

    // local board shows the move even though the store never applied it
    let columns = controller.columns();
    assert!(column(&columns, ColumnId::Todo).tasks.is_empty());
    assert_eq!(column(&columns, ColumnId::Done).tasks.len(), 1);

    let stored = store.inner.stored_columns("u1");
    assert_eq!(column(&stored, ColumnId::Todo).tasks.len(), 1);
    assert!(column(&stored, ColumnId::Done).tasks.is_empty());

    // the next full load converges back to the store's view
    store.fail_removes.store(false, Ordering::SeqCst);
    controller.load("u1").await.unwrap();
    let columns = controller.columns();
    assert_eq!(column(&columns, ColumnId::Todo).tasks.len(), 1);
    assert_eq!(columns.iter().map(|c| c.tasks.len()).sum::<usize>(), 1);
}

#[tokio::test]
async fn test_auth_change_loads_and_clears() {
    let store = Arc::new(MemoryBoardStore::new());
    let controller = BoardController::new(store);

    controller
        .handle_auth_change(Some("u1".to_string()))
        .await
        .expect("Failed to react to sign-in");
    assert_eq!(controller.owner(), Some("u1".to_string()));
    assert_eq!(controller.columns().len(), 3);

    controller
        .handle_auth_change(None)
        .await
        .expect("Failed to react to sign-out");
    assert!(controller.owner().is_none());
    assert!(controller.columns().is_empty());
}

#[tokio::test]
async fn test_switching_owners_swaps_boards() {
    let store = Arc::new(MemoryBoardStore::new());
    let controller = BoardController::new(store);
    controller
        .handle_auth_change(Some("u1".to_string()))
        .await
        .unwrap();
    controller.add_card(ColumnId::Todo).await.unwrap();

    controller
        .handle_auth_change(Some("u2".to_string()))
        .await
        .unwrap();
    assert_eq!(controller.owner(), Some("u2".to_string()));
    assert!(controller.columns().iter().all(|c| c.tasks.is_empty()));
}

#[tokio::test]
async fn test_change_hook_fires_on_optimistic_updates() {
    let store = Arc::new(MemoryBoardStore::new());
    let changes = Arc::new(AtomicUsize::new(0));
    let counter = changes.clone();
    let controller =
        BoardController::new(store).with_on_change(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

    controller.load("u1").await.unwrap();
    let after_load = changes.load(Ordering::SeqCst);
    assert!(after_load >= 1);

    let id = controller.add_card(ColumnId::Todo).await.unwrap();
    controller
        .move_card(MoveIntent::new(id, ColumnId::Todo, ColumnId::Done))
        .await
        .unwrap();
    assert!(changes.load(Ordering::SeqCst) >= after_load + 2);
}
