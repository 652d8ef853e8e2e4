//! Kanban Column Component
//!
//! Column header, ordered card list, add button, and drop-target
//! handlers for the drag layer.

use board_core::domain::Column;
use board_dnd::{make_on_column_mouseenter, make_on_column_mouseleave, DndContext};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::KanbanCard;
use crate::context::use_app_context;

#[component]
pub fn KanbanColumn(
    column: Column,
    dnd: DndContext,
    /// Id of the card currently in edit mode, shared across the board
    editing: ReadSignal<Option<String>>,
    set_editing: WriteSignal<Option<String>>,
) -> impl IntoView {
    let ctx = use_app_context();
    let column_id = column.id;

    let add_controller = ctx.controller.clone();
    let on_add = move |_| {
        let controller = add_controller.clone();
        spawn_local(async move {
            match controller.add_card(column_id).await {
                Ok(task_id) => set_editing.set(Some(task_id)),
                Err(e) => {
                    web_sys::console::error_1(&format!("[BOARD] add card failed: {}", e).into())
                }
            }
        });
    };

    let is_drop_target = move || dnd.is_dragging() && dnd.hovered_column() == Some(column_id);

    view! {
        <div
            class=move || {
                if is_drop_target() { "kanban-column drop-target" } else { "kanban-column" }
            }
            on:mouseenter=make_on_column_mouseenter(dnd, column_id)
            on:mouseleave=make_on_column_mouseleave(dnd)
        >
            <h2 class="column-title">{column.title.clone()}</h2>
            <div class="column-cards">
                {column
                    .tasks
                    .iter()
                    .map(|task| {
                        view! {
                            <KanbanCard
                                task=task.clone()
                                column=column_id
                                dnd=dnd
                                editing=editing
                                set_editing=set_editing
                            />
                        }
                    })
                    .collect_view()}
            </div>
            <button class="add-card-btn" on:click=on_add>"+ Add card"</button>
        </div>
    }
}
