// amoura-backend/src/features/gdpr/mod.rs

pub mod dto;
pub mod handler;
pub mod services;
pub mod worker;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Who triggered an operation and when, threaded explicitly through the
/// engine instead of read from ambient state.
#[derive(Debug, Clone, Copy)]
pub struct AuditContext {
    pub actor_id: Uuid,
    pub requested_at: DateTime<Utc>,
}

impl AuditContext {
    pub fn new(actor_id: Uuid) -> Self {
        Self {
            actor_id,
            requested_at: Utc::now(),
        }
    }
}
