//! # Users Module
//!
//! Account functionality:
//! - public and own profile lookup with recipe summaries
//! - partial profile updates
//! - password change and password-gated account deletion

pub mod handlers;
pub mod models;
pub mod routes;
pub mod validators;

#[cfg(test)]
mod tests;

pub use routes::users_routes;
