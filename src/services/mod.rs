// Services module - clients for external collaborators

pub mod storage;

pub use storage::{RecipeStorage, StorageConfig};
