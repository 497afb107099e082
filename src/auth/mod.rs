//! # Auth Module
//!
//! Registration, login, and session handling:
//! - signed session tokens with distinct registration/login lifetimes
//! - AuthedUser extractor for protected routes
//! - bcrypt password hashing

pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod tokens;
pub mod validators;

#[cfg(test)]
mod tests;

pub use extractors::AuthedUser;
pub use models::User;
pub use routes::auth_routes;
