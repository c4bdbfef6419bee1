// src/features/mod.rs

pub mod gdpr;
