//! Kanban Board Component
//!
//! Columns in display order plus a floating overlay for the dragged
//! card. Move intents from the drag layer feed straight into the
//! controller.

use board_core::domain::Task;
use board_dnd::{bind_global_listeners, DndContext};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::KanbanColumn;
use crate::context::use_app_context;

#[component]
pub fn KanbanBoard() -> impl IntoView {
    let ctx = use_app_context();
    let version = ctx.board_version;

    let snapshot_controller = ctx.controller.clone();
    let columns = Memo::new(move |_| {
        version.get();
        snapshot_controller.columns()
    });

    // Card fresh out of add_card opens straight in edit mode
    let (editing, set_editing) = signal::<Option<String>>(None);

    let dnd = DndContext::new();
    let move_controller = ctx.controller.clone();
    bind_global_listeners(dnd, move |intent| {
        let controller = move_controller.clone();
        spawn_local(async move {
            if let Err(e) = controller.move_card(intent).await {
                web_sys::console::error_1(&format!("[BOARD] move failed: {}", e).into());
            }
        });
    });

    // Floating representation of the dragged card
    let active_card = move || -> Option<Task> {
        let (task_id, source) = dnd.active_task()?;
        columns
            .get()
            .iter()
            .find(|c| c.id == source)
            .and_then(|c| c.task(&task_id))
            .cloned()
    };

    view! {
        <div class="kanban-board">
            {move || {
                columns
                    .get()
                    .into_iter()
                    .map(|column| {
                        view! {
                            <KanbanColumn
                                column=column
                                dnd=dnd
                                editing=editing
                                set_editing=set_editing
                            />
                        }
                    })
                    .collect_view()
            }}
            {move || {
                active_card()
                    .map(|task| view! { <div class="drag-overlay">{task.title.clone()}</div> })
            }}
        </div>
    }
}
