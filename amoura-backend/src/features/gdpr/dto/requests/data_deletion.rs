// amoura-backend/src/features/gdpr/dto/requests/data_deletion.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Start account erasure. The target account is always the caller's own;
/// only an optional reason is accepted from the body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAccountRequest {
    #[validate(length(max = 500, message = "Reason must be at most 500 characters"))]
    pub reason: Option<String>,
}
