// src/lib.rs
pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod features;
pub mod middleware;
pub mod repository;
pub mod utils;

// Re-export commonly used types
pub use api::dto::common::ApiResponse;
pub use error::{AppError, AppResult};
