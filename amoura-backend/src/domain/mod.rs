// src/domain/mod.rs

pub mod consent_record_model;
pub mod daily_selection_model;
pub mod deletion_request_model;
pub mod export_request_model;
pub mod match_model;
pub mod message_model;
pub mod notification_model;
pub mod profile_model;
pub mod push_token_model;
pub mod report_model;
pub mod subscription_model;
pub mod user_model;
