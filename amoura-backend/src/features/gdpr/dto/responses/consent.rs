// amoura-backend/src/features/gdpr/dto/responses/consent.rs

use crate::domain::consent_record_model;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentResponse {
    pub id: Uuid,
    pub data_processing: bool,
    pub marketing: bool,
    pub analytics: bool,
    pub consented_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revoked_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<consent_record_model::Model> for ConsentResponse {
    fn from(record: consent_record_model::Model) -> Self {
        Self {
            id: record.id,
            data_processing: record.data_processing,
            marketing: record.marketing,
            analytics: record.analytics,
            consented_at: record.consented_at,
            revoked_at: record.revoked_at,
            is_active: record.is_active,
            created_at: record.created_at,
        }
    }
}
