// amoura-backend/src/domain/export_request_model.rs

use chrono::{DateTime, Duration, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Artifact availability window, counted from request creation.
pub const EXPORT_EXPIRY_DAYS: i64 = 7;

/// Requested artifact format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Pdf,
}

impl From<ExportFormat> for String {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Json => "json".to_string(),
            ExportFormat::Pdf => "pdf".to_string(),
        }
    }
}

impl TryFrom<String> for ExportFormat {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "json" => Ok(ExportFormat::Json),
            "pdf" => Ok(ExportFormat::Pdf),
            _ => Err(format!("Invalid export format: {}", value)),
        }
    }
}

/// Export request lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl From<ExportStatus> for String {
    fn from(status: ExportStatus) -> Self {
        match status {
            ExportStatus::Pending => "pending".to_string(),
            ExportStatus::Processing => "processing".to_string(),
            ExportStatus::Completed => "completed".to_string(),
            ExportStatus::Failed => "failed".to_string(),
        }
    }
}

impl TryFrom<String> for ExportStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "pending" => Ok(ExportStatus::Pending),
            "processing" => Ok(ExportStatus::Processing),
            "completed" => Ok(ExportStatus::Completed),
            "failed" => Ok(ExportStatus::Failed),
            _ => Err(format!("Invalid export status: {}", value)),
        }
    }
}

impl ExportStatus {
    /// Status only moves forward: pending -> processing -> {completed, failed}.
    pub fn can_transition_to(&self, next: ExportStatus) -> bool {
        matches!(
            (self, next),
            (ExportStatus::Pending, ExportStatus::Processing)
                | (ExportStatus::Processing, ExportStatus::Completed)
                | (ExportStatus::Processing, ExportStatus::Failed)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ExportStatus::Completed | ExportStatus::Failed)
    }
}

/// Data export request entity
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "export_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub user_id: Uuid,

    pub format: String,

    pub status: String,

    #[sea_orm(nullable)]
    pub file_url: Option<String>,

    #[sea_orm(nullable)]
    pub error_message: Option<String>,

    #[sea_orm(nullable)]
    pub completed_at: Option<DateTime<Utc>>,

    pub expires_at: DateTime<Utc>,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Create a new pending request. `expires_at` is fixed at creation time
    /// and governs artifact availability regardless of when processing
    /// completes.
    pub fn new(user_id: Uuid, format: ExportFormat) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            format: format.into(),
            status: ExportStatus::Pending.into(),
            file_url: None,
            error_message: None,
            completed_at: None,
            expires_at: now + Duration::days(EXPORT_EXPIRY_DAYS),
            created_at: now,
        }
    }

    pub fn get_status(&self) -> Result<ExportStatus, String> {
        self.status.clone().try_into()
    }

    pub fn get_format(&self) -> Result<ExportFormat, String> {
        self.format.clone().try_into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_request_expiry_window() {
        let request = Model::new(Uuid::new_v4(), ExportFormat::Json);

        assert_eq!(request.get_status().unwrap(), ExportStatus::Pending);
        assert_eq!(
            request.expires_at - request.created_at,
            Duration::days(EXPORT_EXPIRY_DAYS)
        );
    }

    #[test]
    fn test_status_moves_forward_only() {
        assert!(ExportStatus::Pending.can_transition_to(ExportStatus::Processing));
        assert!(ExportStatus::Processing.can_transition_to(ExportStatus::Completed));
        assert!(ExportStatus::Processing.can_transition_to(ExportStatus::Failed));

        assert!(!ExportStatus::Pending.can_transition_to(ExportStatus::Completed));
        assert!(!ExportStatus::Completed.can_transition_to(ExportStatus::Processing));
        assert!(!ExportStatus::Failed.can_transition_to(ExportStatus::Pending));
        assert!(!ExportStatus::Processing.can_transition_to(ExportStatus::Pending));
    }

    #[test]
    fn test_format_roundtrip() {
        assert_eq!(
            ExportFormat::try_from(String::from(ExportFormat::Pdf)).unwrap(),
            ExportFormat::Pdf
        );
        assert!(ExportFormat::try_from("xml".to_string()).is_err());
    }
}
