//! Authentication Provider
//!
//! The board lifecycle is a pure reaction to the identity signal: a
//! provider accepts listeners and invokes each with the current identity
//! at subscription time and again on every change.

mod firebase;

pub use firebase::FirebaseAuth;

use std::sync::Mutex;

/// Signed-in identity as seen by the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub uid: String,
    pub email: Option<String>,
    /// Bearer token for the document store
    pub id_token: String,
}

/// Listener invoked with the current identity, or None when signed out
pub type AuthListener = Box<dyn Fn(Option<AuthUser>) + Send + Sync>;

pub trait AuthProvider {
    /// Identity currently signed in, if any
    fn current_user(&self) -> Option<AuthUser>;

    /// Register a listener; it fires immediately with the current state
    fn subscribe(&self, listener: AuthListener);
}

/// In-process provider: tests and local tooling push identities directly
#[derive(Default)]
pub struct MemoryAuth {
    state: Mutex<Option<AuthUser>>,
    listeners: Mutex<Vec<AuthListener>>,
}

impl MemoryAuth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sign_in(&self, user: AuthUser) {
        if let Ok(mut state) = self.state.lock() {
            *state = Some(user);
        }
        self.notify();
    }

    pub fn sign_out(&self) {
        if let Ok(mut state) = self.state.lock() {
            *state = None;
        }
        self.notify();
    }

    fn notify(&self) {
        let current = self.current_user();
        if let Ok(listeners) = self.listeners.lock() {
            for listener in listeners.iter() {
                listener(current.clone());
            }
        }
    }
}

impl AuthProvider for MemoryAuth {
    fn current_user(&self) -> Option<AuthUser> {
        self.state.lock().ok().and_then(|state| state.clone())
    }

    fn subscribe(&self, listener: AuthListener) {
        listener(self.current_user());
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.push(listener);
        }
    }
}
