//! # Recipes Module
//!
//! Recipe catalog functionality:
//! - public lookup and filtered search
//! - authenticated creation with image upload
//! - creator-only deletion

pub mod duration;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod search;
pub mod validators;

#[cfg(test)]
mod tests;

pub use routes::recipes_routes;
