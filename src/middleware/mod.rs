//! Middleware for the Lendist API

pub mod auth;

pub use auth::{AuthVerifier, AuthenticatedUser};
