//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use std::sync::Arc;

use board_core::auth::FirebaseAuth;
use board_core::controller::BoardController;
use board_core::store::FirestoreBoardStore;
use leptos::prelude::*;

pub type Controller = BoardController<FirestoreBoardStore>;

/// App-wide handles provided via context
#[derive(Clone)]
pub struct AppContext {
    pub controller: Controller,
    pub auth: Arc<FirebaseAuth>,
    /// Bumped by the controller after every board change
    pub board_version: ReadSignal<u32>,
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
