// amoura-backend/src/features/gdpr/dto/responses/data_deletion.rs

use crate::domain::deletion_request_model::{self, DeletionMetadata};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletionRequestResponse {
    pub request_id: Uuid,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub requested_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DeletionMetadata>,
}

impl From<deletion_request_model::Model> for DeletionRequestResponse {
    fn from(request: deletion_request_model::Model) -> Self {
        let metadata = request.metadata();
        Self {
            request_id: request.id,
            status: request.status,
            reason: request.reason,
            requested_at: request.requested_at,
            completed_at: request.completed_at,
            error_message: request.error_message,
            metadata,
        }
    }
}
