//! Board Components

mod kanban_board;
mod kanban_card;
mod kanban_column;
mod sign_in_bar;

pub use kanban_board::KanbanBoard;
pub use kanban_card::KanbanCard;
pub use kanban_column::KanbanColumn;
pub use sign_in_bar::SignInBar;
