//! Board Core
//!
//! Layered board engine, UI-framework free:
//! - domain: entities and core types
//! - cache: in-memory board state, the single source of truth for rendering
//! - store: remote board store abstraction and implementations
//! - auth: authentication provider abstraction
//! - controller: optimistic mutations reconciled against the store

pub mod auth;
pub mod cache;
pub mod controller;
pub mod domain;
pub mod store;

#[cfg(test)]
mod tests;

pub use cache::BoardCache;
pub use controller::BoardController;
