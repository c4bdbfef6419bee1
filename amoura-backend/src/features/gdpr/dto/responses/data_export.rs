// amoura-backend/src/features/gdpr/dto/responses/data_export.rs

use crate::domain::export_request_model;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequestResponse {
    pub request_id: Uuid,
    pub status: String,
    pub format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<export_request_model::Model> for ExportRequestResponse {
    fn from(request: export_request_model::Model) -> Self {
        Self {
            request_id: request.id,
            status: request.status,
            format: request.format,
            file_url: request.file_url,
            error_message: request.error_message,
            completed_at: request.completed_at,
            expires_at: request.expires_at,
            created_at: request.created_at,
        }
    }
}
