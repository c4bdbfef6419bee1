// amoura-backend/src/api/dto/mod.rs

pub mod common;
