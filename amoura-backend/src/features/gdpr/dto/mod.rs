// amoura-backend/src/features/gdpr/dto/mod.rs

pub mod requests;
pub mod responses;

pub use requests::*;
pub use responses::*;
