//! Firebase Authentication
//!
//! Minimal Identity Toolkit REST client: password sign-in, sign-out, and
//! identity-change notification. The board only consumes the identity
//! signal; fuller auth flows live outside this crate.

use std::sync::Mutex;

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::domain::{DomainError, DomainResult};

use super::{AuthListener, AuthProvider, AuthUser};

const IDENTITY_TOOLKIT_BASE: &str = "https://identitytoolkit.googleapis.com/v1";

pub struct FirebaseAuth {
    http: Client,
    api_key: String,
    state: Mutex<Option<AuthUser>>,
    listeners: Mutex<Vec<AuthListener>>,
}

#[derive(Deserialize)]
struct SignInResponse {
    #[serde(rename = "localId")]
    local_id: String,
    #[serde(rename = "idToken")]
    id_token: String,
    email: Option<String>,
}

impl FirebaseAuth {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_key: api_key.into(),
            state: Mutex::new(None),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Exchange email/password for an identity; listeners are notified
    /// on success
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> DomainResult<AuthUser> {
        let url = format!(
            "{}/accounts:signInWithPassword?key={}",
            IDENTITY_TOOLKIT_BASE, self.api_key
        );
        let resp = self
            .http
            .post(&url)
            .json(&json!({
                "email": email,
                "password": password,
                "returnSecureToken": true,
            }))
            .send()
            .await
            .map_err(|e| DomainError::Remote(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::Unauthenticated(format!(
                "sign-in failed ({}): {}",
                status, body
            )));
        }

        let signin: SignInResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Remote(e.to_string()))?;
        let user = AuthUser {
            uid: signin.local_id,
            email: signin.email,
            id_token: signin.id_token,
        };

        if let Ok(mut state) = self.state.lock() {
            *state = Some(user.clone());
        }
        self.notify();
        Ok(user)
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

impl AuthProvider for FirebaseAuth {
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
