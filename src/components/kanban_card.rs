//! Kanban Card Component
//!
//! Card title with inline edit, delete button, and the drag handle
//! behavior (mousedown starts a pending drag; inputs and buttons are
//! exempt).

use board_core::domain::{ColumnId, Task};
use board_dnd::{make_on_mousedown, DndContext};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;

#[component]
pub fn KanbanCard(
    task: Task,
    column: ColumnId,
    dnd: DndContext,
    /// Id of the card currently in edit mode, shared across the board
    editing: ReadSignal<Option<String>>,
    set_editing: WriteSignal<Option<String>>,
) -> impl IntoView {
    let ctx = use_app_context();
    let task_id = task.id.clone();
    let title = task.title.clone();

    // In-flight editor value; the card is rebuilt after every board
    // change, so this always starts from the current title
    let (edit_value, set_edit_value) = signal(title.clone());

    let is_editing = {
        let task_id = task_id.clone();
        move || editing.get().as_deref() == Some(task_id.as_str())
    };

    let is_dragged = {
        let task_id = task_id.clone();
        move || {
            dnd.active_task()
                .map(|(id, _)| id == task_id)
                .unwrap_or(false)
        }
    };

    // Click opens the inline editor, unless it is the tail end of a drag
    let on_click = {
        let task_id = task_id.clone();
        move |_| {
            if !dnd.just_ended() {
                set_editing.set(Some(task_id.clone()));
            }
        }
    };

    // Commit once per edit session: Enter and the following blur both
    // land here
    let save_title = {
        let controller = ctx.controller.clone();
        let task_id = task_id.clone();
        let original = title.clone();
        move || {
            if editing.get_untracked().as_deref() != Some(task_id.as_str()) {
                return;
            }
            set_editing.set(None);
            let new_title = edit_value.get_untracked().trim().to_string();
            if new_title.is_empty() || new_title == original {
                return;
            }
            let controller = controller.clone();
            let task_id = task_id.clone();
            spawn_local(async move {
                if let Err(e) = controller.edit_card(column, &task_id, &new_title).await {
                    web_sys::console::error_1(&format!("[BOARD] edit failed: {}", e).into());
                }
            });
        }
    };

    let on_delete = {
        let controller = ctx.controller.clone();
        let task_id = task_id.clone();
        move |_| {
            let controller = controller.clone();
            let task_id = task_id.clone();
            spawn_local(async move {
                if let Err(e) = controller.delete_card(column, &task_id).await {
                    web_sys::console::error_1(&format!("[BOARD] delete failed: {}", e).into());
                }
            });
        }
    };

    view! {
        <div
            class=move || if is_dragged() { "kanban-card dragging" } else { "kanban-card" }
            on:mousedown=make_on_mousedown(dnd, task_id.clone(), column)
            on:click=on_click
        >
            {move || {
                if is_editing() {
                    let save_on_blur = save_title.clone();
                    let save_on_enter = save_title.clone();
                    view! {
                        <input
                            type="text"
                            class="card-title-input"
                            autofocus=true
                            prop:value=move || edit_value.get()
                            on:input=move |ev| set_edit_value.set(event_target_value(&ev))
                            on:blur=move |_| save_on_blur()
                            on:keydown=move |ev: web_sys::KeyboardEvent| {
                                if ev.key() == "Enter" {
                                    ev.prevent_default();
                                    save_on_enter();
                                } else if ev.key() == "Escape" {
                                    set_editing.set(None);
                                }
                            }
                        />
                    }
                        .into_any()
                } else {
                    let on_delete = on_delete.clone();
                    view! {
                        <span class="card-title">{title.clone()}</span>
                        <button class="delete-btn" on:click=on_delete>"×"</button>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}
