// amoura-backend/src/features/gdpr/services/mod.rs

pub mod collector;
pub mod consent;
pub mod deletion;
pub mod export;
pub mod gdpr;
pub mod sanitizer;

pub use gdpr::GdprService;
