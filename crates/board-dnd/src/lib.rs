//! Board DragDrop
//!
//! Drag-and-drop for board cards using mouse events. Uses a movement
//! threshold to distinguish click from drag. The state machine lives in
//! `tracker`; this layer binds it to Leptos signals and document events.

mod tracker;

pub use tracker::{DragTracker, DRAG_THRESHOLD_PX};

use board_core::domain::{ColumnId, MoveIntent};
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// DnD state shared by the board components
#[derive(Clone, Copy)]
pub struct DndContext {
    tracker: RwSignal<DragTracker>,
    just_ended: RwSignal<bool>,
}

impl DndContext {
    pub fn new() -> Self {
        Self {
            tracker: RwSignal::new(DragTracker::new()),
            just_ended: RwSignal::new(false),
        }
    }

    /// Id and source column of the card being dragged
    pub fn active_task(&self) -> Option<(String, ColumnId)> {
        self.tracker
            .with(|t| t.active().map(|(id, col)| (id.to_string(), col)))
    }

    pub fn is_dragging(&self) -> bool {
        self.tracker.with(|t| t.is_dragging())
    }

    pub fn hovered_column(&self) -> Option<ColumnId> {
        self.tracker.with(|t| t.hovered())
    }

    /// True briefly after a drop, so the click that follows a drag can be
    /// ignored
    pub fn just_ended(&self) -> bool {
        self.just_ended.get()
    }
}

impl Default for DndContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Raise the short-lived `just_ended` flag after a drop
fn flag_drag_end(dnd: &DndContext) {
    dnd.just_ended.set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.just_ended;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            clear.set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            100,
        );
        cb.forget();
    }
}

/// Mousedown handler for a card: records a pending drag with start
/// position
pub fn make_on_mousedown(
    dnd: DndContext,
    task_id: String,
    source: ColumnId,
) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() == 0 {
            // Ignore if target is input or button
            if let Some(target) = ev.target() {
                if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() {
                    return;
                }
                if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() {
                    return;
                }
            }
            let task_id = task_id.clone();
            dnd.tracker
                .update(|t| t.pointer_down(task_id, source, ev.client_x(), ev.client_y()));
        }
    }
}

/// Mouseenter handler for a column drop target
pub fn make_on_column_mouseenter(
    dnd: DndContext,
    column: ColumnId,
) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.tracker.with_untracked(|t| t.is_dragging()) {
            dnd.tracker.update(|t| t.enter_column(column));
        }
    }
}

/// Mouseleave handler for a column drop target
pub fn make_on_column_mouseleave(dnd: DndContext) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.tracker.with_untracked(|t| t.is_dragging()) {
            dnd.tracker.update(|t| t.leave_column());
        }
    }
}

/// Bind document-level mousemove (drag threshold) and mouseup (drop)
/// handlers. `on_intent` fires for every emitted move intent.
pub fn bind_global_listeners<F>(dnd: DndContext, on_intent: F)
where
    F: Fn(MoveIntent) + Clone + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        // only a pending drag cares about movement; hovering is driven by
        // the column enter/leave handlers
        if dnd.tracker.with_untracked(|t| t.is_pending()) {
            dnd.tracker.update(|t| {
                t.pointer_move(ev.client_x(), ev.client_y());
            });
        }
    });

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        if dnd.tracker.with_untracked(|t| t.is_idle()) {
            return;
        }
        let was_dragging = dnd.tracker.with_untracked(|t| t.is_dragging());
        let intent = dnd.tracker.try_update(|t| t.release()).flatten();
        if was_dragging {
            flag_drag_end(&dnd);
        }
        if let Some(intent) = intent {
            on_intent(intent);
        }
    });

    if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
        let _ = doc.add_event_listener_with_callback(
            "mousemove",
            on_mousemove.as_ref().unchecked_ref(),
        );
        let _ =
            doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
    }
    on_mousemove.forget();
    on_mouseup.forget();
}
