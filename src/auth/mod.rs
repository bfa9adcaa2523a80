//! # Auth Module
//!
//! This module handles all authentication-related functionality including:
//! - Access token issuance and validation (HS256, fixed 30-day TTL)
//! - Cookie-based session resolution
//! - Google login/signup flow
//! - AuthedUser extractor for protected routes

pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod token;

#[cfg(test)]
mod tests;

pub use extractors::AuthedUser;
pub use models::User;
pub use routes::auth_routes;
