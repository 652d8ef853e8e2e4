//! Kanban Board App
//!
//! Wires the auth identity signal to the board controller and renders
//! the board. The board itself stays mounted; it simply renders empty
//! when the cache is cleared on sign-out.

use std::sync::Arc;

use board_core::auth::{AuthProvider, AuthUser, FirebaseAuth};
use board_core::controller::BoardController;
use board_core::store::FirestoreBoardStore;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{KanbanBoard, SignInBar};
use crate::config::FirebaseConfig;
use crate::context::AppContext;

#[component]
pub fn App() -> impl IntoView {
    let config = FirebaseConfig::from_build_env();
    let store = Arc::new(FirestoreBoardStore::new(&config.project_id));
    let auth = Arc::new(FirebaseAuth::new(&config.api_key));

    let (board_version, set_board_version) = signal(0u32);
    let controller = BoardController::new(store.clone())
        .with_on_change(move || set_board_version.update(|v| *v += 1));

    // Identity changes land in a signal; the effect below reacts to them
    let (auth_user, set_auth_user) = signal::<Option<AuthUser>>(None);
    auth.subscribe(Box::new(move |user| set_auth_user.set(user)));

    provide_context(AppContext {
        controller: controller.clone(),
        auth: auth.clone(),
        board_version,
    });

    // Load the board when the identity changes, clear it on sign-out
    Effect::new(move |_| {
        let user = auth_user.get();
        let controller = controller.clone();
        let store = store.clone();
        spawn_local(async move {
            store.set_token(user.as_ref().map(|u| u.id_token.clone()));
            let owner = user.map(|u| u.uid);
            if let Err(e) = controller.handle_auth_change(owner).await {
                web_sys::console::error_1(&format!("[APP] board load failed: {}", e).into());
            }
        });
    });

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>"Kanban Board"</h1>
                <SignInBar auth_user=auth_user />
            </header>
            <main class="main-content">
                {move || {
                    auth_user.get().is_none().then(|| {
                        view! { <p class="signed-out-hint">"Sign in to see your board."</p> }
                    })
                }}
                <KanbanBoard />
            </main>
        </div>
    }
}
