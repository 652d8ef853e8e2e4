//! Firebase Project Configuration

use serde::{Deserialize, Serialize};

/// Connection settings for the Firebase project backing the board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirebaseConfig {
    pub api_key: String,
    pub project_id: String,
}

impl FirebaseConfig {
    /// Build-time configuration via `FIREBASE_API_KEY` /
    /// `FIREBASE_PROJECT_ID`, with placeholder defaults for local
    /// development
    pub fn from_build_env() -> Self {
        Self {
            api_key: option_env!("FIREBASE_API_KEY")
                .unwrap_or("demo-api-key")
                .to_string(),
            project_id: option_env!("FIREBASE_PROJECT_ID")
                .unwrap_or("demo-project")
                .to_string(),
        }
    }
}
