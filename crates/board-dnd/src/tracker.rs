//! Drag Tracker State Machine
//!
//! Turns pointer gestures into move intents, with a movement threshold to
//! distinguish click from drag. Pure state; the signal/event layer in
//! `lib.rs` feeds it.

use board_core::domain::{ColumnId, MoveIntent};

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: i32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum State {
    #[default]
    Idle,
    /// Pointer down on a card, not yet past the threshold
    Pending {
        task_id: String,
        source: ColumnId,
        start_x: i32,
        start_y: i32,
    },
    /// Actively dragging; `over` is the column currently hovered
    Dragging {
        task_id: String,
        source: ColumnId,
        over: Option<ColumnId>,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    state: State,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer pressed on a card. Ignored while a drag is in flight
    /// (single-pointer interaction).
    pub fn pointer_down(&mut self, task_id: impl Into<String>, source: ColumnId, x: i32, y: i32) {
        if matches!(self.state, State::Dragging { .. }) {
            return;
        }
        self.state = State::Pending {
            task_id: task_id.into(),
            source,
            start_x: x,
            start_y: y,
        };
    }

    /// Pointer moved; returns true when this crossed into Dragging
    pub fn pointer_move(&mut self, x: i32, y: i32) -> bool {
        if let State::Pending {
            task_id,
            source,
            start_x,
            start_y,
        } = &self.state
        {
            if (x - start_x).abs() > DRAG_THRESHOLD_PX || (y - start_y).abs() > DRAG_THRESHOLD_PX {
                self.state = State::Dragging {
                    task_id: task_id.clone(),
                    source: *source,
                    over: None,
                };
                return true;
            }
        }
        false
    }

    /// Hovered drop target changed
    pub fn enter_column(&mut self, column: ColumnId) {
        if let State::Dragging { over, .. } = &mut self.state {
            *over = Some(column);
        }
    }

    pub fn leave_column(&mut self) {
        if let State::Dragging { over, .. } = &mut self.state {
            *over = None;
        }
    }

    /// Pointer released. Emits an intent only for a drop on a column
    /// other than the card's own; always returns to Idle.
    pub fn release(&mut self) -> Option<MoveIntent> {
        match std::mem::take(&mut self.state) {
            State::Dragging {
                task_id,
                source,
                over: Some(dest),
            } if dest != source => Some(MoveIntent::new(task_id, source, dest)),
            _ => None,
        }
    }

    /// Task currently dragged, with its source column
    pub fn active(&self) -> Option<(&str, ColumnId)> {
        match &self.state {
            State::Dragging { task_id, source, .. } => Some((task_id.as_str(), *source)),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state == State::Idle
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, State::Pending { .. })
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, State::Dragging { .. })
    }

    pub fn hovered(&self) -> Option<ColumnId> {
        match &self.state {
            State::Dragging { over, .. } => *over,
            _ => None,
        }
    }
}
