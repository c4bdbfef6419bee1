// amoura-backend/src/domain/deletion_request_model.rs

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Deletion request lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeletionStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl From<DeletionStatus> for String {
    fn from(status: DeletionStatus) -> Self {
        match status {
            DeletionStatus::Pending => "pending".to_string(),
            DeletionStatus::Processing => "processing".to_string(),
            DeletionStatus::Completed => "completed".to_string(),
            DeletionStatus::Failed => "failed".to_string(),
        }
    }
}

impl TryFrom<String> for DeletionStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "pending" => Ok(DeletionStatus::Pending),
            "processing" => Ok(DeletionStatus::Processing),
            "completed" => Ok(DeletionStatus::Completed),
            "failed" => Ok(DeletionStatus::Failed),
            _ => Err(format!("Invalid deletion status: {}", value)),
        }
    }
}

impl DeletionStatus {
    /// Status only moves forward; `completed` is irreversible.
    pub fn can_transition_to(&self, next: DeletionStatus) -> bool {
        matches!(
            (self, next),
            (DeletionStatus::Pending, DeletionStatus::Processing)
                | (DeletionStatus::Processing, DeletionStatus::Completed)
                | (DeletionStatus::Processing, DeletionStatus::Failed)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, DeletionStatus::Completed | DeletionStatus::Failed)
    }
}

/// Summary of what an account erasure touched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletionMetadata {
    pub messages_anonymized: u64,
    pub matches_anonymized: u64,
    pub reports_anonymized: u64,
    pub data_exported: bool,
}

/// Account deletion request entity.
///
/// Once completed, the user row no longer exists; this row (with the email
/// snapshotted at request time) is the only durable evidence the account
/// ever existed.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "deletion_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub user_id: Uuid,

    pub user_email: String,

    pub status: String,

    #[sea_orm(nullable)]
    pub reason: Option<String>,

    #[sea_orm(nullable)]
    pub messages_anonymized: Option<i64>,

    #[sea_orm(nullable)]
    pub matches_anonymized: Option<i64>,

    #[sea_orm(nullable)]
    pub reports_anonymized: Option<i64>,

    pub data_exported: bool,

    pub requested_at: DateTime<Utc>,

    #[sea_orm(nullable)]
    pub completed_at: Option<DateTime<Utc>>,

    #[sea_orm(nullable)]
    pub error_message: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn new(user_id: Uuid, user_email: String, reason: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            user_email,
            status: DeletionStatus::Pending.into(),
            reason,
            messages_anonymized: None,
            matches_anonymized: None,
            reports_anonymized: None,
            data_exported: false,
            requested_at: Utc::now(),
            completed_at: None,
            error_message: None,
        }
    }

    pub fn get_status(&self) -> Result<DeletionStatus, String> {
        self.status.clone().try_into()
    }

    /// Metadata summary, present only once the request has completed.
    pub fn metadata(&self) -> Option<DeletionMetadata> {
        match (
            self.messages_anonymized,
            self.matches_anonymized,
            self.reports_anonymized,
        ) {
            (Some(messages), Some(matches), Some(reports)) => Some(DeletionMetadata {
                messages_anonymized: messages as u64,
                matches_anonymized: matches as u64,
                reports_anonymized: reports as u64,
                data_exported: self.data_exported,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_request_snapshots_email() {
        let request = Model::new(
            Uuid::new_v4(),
            "alice@example.com".to_string(),
            Some("no longer needed".to_string()),
        );

        assert_eq!(request.user_email, "alice@example.com");
        assert_eq!(request.get_status().unwrap(), DeletionStatus::Pending);
        assert!(request.metadata().is_none());
    }

    #[test]
    fn test_status_moves_forward_only() {
        assert!(DeletionStatus::Pending.can_transition_to(DeletionStatus::Processing));
        assert!(DeletionStatus::Processing.can_transition_to(DeletionStatus::Completed));
        assert!(DeletionStatus::Processing.can_transition_to(DeletionStatus::Failed));

        assert!(!DeletionStatus::Completed.can_transition_to(DeletionStatus::Processing));
        assert!(!DeletionStatus::Failed.can_transition_to(DeletionStatus::Processing));
        assert!(!DeletionStatus::Pending.can_transition_to(DeletionStatus::Completed));
    }

    #[test]
    fn test_metadata_requires_all_counts() {
        let mut request = Model::new(Uuid::new_v4(), "bob@example.com".to_string(), None);
        request.messages_anonymized = Some(3);
        request.matches_anonymized = Some(1);
        assert!(request.metadata().is_none());

        request.reports_anonymized = Some(0);
        let metadata = request.metadata().unwrap();
        assert_eq!(metadata.messages_anonymized, 3);
        assert_eq!(metadata.matches_anonymized, 1);
        assert_eq!(metadata.reports_anonymized, 0);
        assert!(!metadata.data_exported);
    }
}
