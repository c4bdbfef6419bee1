// amoura-backend/src/features/gdpr/dto/responses/mod.rs

pub mod consent;
pub mod data_deletion;
pub mod data_export;

pub use consent::*;
pub use data_deletion::*;
pub use data_export::*;
