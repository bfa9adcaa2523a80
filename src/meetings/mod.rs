//! # Meetings Module
//!
//! Ephemeral meeting room presence tracking backed by a key-value store:
//! - implicit room creation on first join
//! - idempotent join/leave membership semantics
//! - empty rooms reaped after the last member leaves

pub mod handlers;
pub mod models;
pub mod routes;
pub mod store;


pub use routes::meetings_routes;
pub use store::PresenceStore;
