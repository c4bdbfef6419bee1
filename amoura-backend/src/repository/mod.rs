// src/repository/mod.rs

pub mod consent_repository;
pub mod daily_selection_repository;
pub mod deletion_request_repository;
pub mod export_request_repository;
pub mod match_repository;
pub mod message_repository;
pub mod notification_repository;
pub mod profile_repository;
pub mod push_token_repository;
pub mod report_repository;
pub mod subscription_repository;
pub mod user_repository;
