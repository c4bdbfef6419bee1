// amoura-backend/src/features/gdpr/services/export.rs

use crate::db::DbPool;
use crate::domain::export_request_model::{self, ExportFormat};
use crate::error::{AppError, AppResult};
use crate::features::gdpr::services::collector::DataCollector;
use crate::features::gdpr::worker::{GdprJob, JobSender};
use crate::features::gdpr::AuditContext;
use crate::repository::export_request_repository::ExportRequestRepository;
use chrono::Utc;
use std::path::PathBuf;
use tracing::{info, warn};
use uuid::Uuid;

/// Errors raised while producing an export artifact. The message becomes the
/// request's `error_message`, so it must be something a user can act on.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("PDF export is not implemented yet; request the JSON format instead")]
    PdfNotImplemented,

    #[error("Invalid export format: {0}")]
    InvalidFormat(String),

    #[error("Database error: {0}")]
    Db(#[from] sea_orm::DbErr),

    #[error("Failed to serialize export data: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write export artifact: {0}")]
    Io(#[from] std::io::Error),
}

/// Export job engine. Requests are persisted as `pending` rows, the worker is
/// woken through `jobs`, and the row itself carries the lifecycle state.
pub struct ExportService {
    repo: ExportRequestRepository,
    collector: DataCollector,
    jobs: JobSender,
    export_dir: PathBuf,
    export_base_url: String,
}

impl ExportService {
    pub fn new(db: DbPool, jobs: JobSender, export_dir: PathBuf, export_base_url: String) -> Self {
        Self {
            repo: ExportRequestRepository::new(db.clone()),
            collector: DataCollector::new(db),
            jobs,
            export_dir,
            export_base_url,
        }
    }

    /// Persist a new pending request and wake the worker. Returns immediately;
    /// the artifact is produced in the background.
    pub async fn create_export_request(
        &self,
        ctx: &AuditContext,
        format: ExportFormat,
    ) -> AppResult<export_request_model::Model> {
        let request = self
            .repo
            .create(export_request_model::Model::new(ctx.actor_id, format))
            .await?;

        info!(
            user_id = %ctx.actor_id,
            request_id = %request.id,
            format = %request.format,
            "Created export request"
        );

        self.jobs.enqueue(GdprJob::ExportData(request.id));
        Ok(request)
    }

    pub async fn get_export_request(
        &self,
        user_id: Uuid,
        request_id: Uuid,
    ) -> AppResult<Option<export_request_model::Model>> {
        Ok(self.repo.find_by_id_for_user(user_id, request_id).await?)
    }

    pub async fn list_export_requests(
        &self,
        user_id: Uuid,
    ) -> AppResult<Vec<export_request_model::Model>> {
        Ok(self.repo.find_by_user_id(user_id).await?)
    }

    /// Worker entry point. Safe to call more than once for the same request:
    /// the conditional pending -> processing transition makes duplicate
    /// deliveries no-ops.
    pub async fn process_export_request(&self, request_id: Uuid) -> AppResult<()> {
        let Some(request) = self.repo.find_by_id(request_id).await? else {
            warn!(%request_id, "Export request not found, skipping");
            return Ok(());
        };

        if !self.repo.mark_processing(request_id).await? {
            info!(%request_id, status = %request.status, "Export request already picked up or terminal, skipping");
            return Ok(());
        }

        match self.produce_artifact(&request).await {
            Ok(file_url) => {
                self.repo
                    .mark_completed(request_id, file_url, Utc::now())
                    .await?;
                info!(%request_id, user_id = %request.user_id, "Export request completed");
            }
            Err(e) => {
                self.repo.mark_failed(request_id, e.to_string()).await?;
                warn!(%request_id, user_id = %request.user_id, error = %e, "Export request failed");
            }
        }

        Ok(())
    }

    /// Collect, sanitize and write the artifact, returning its download URL.
    async fn produce_artifact(
        &self,
        request: &export_request_model::Model,
    ) -> Result<String, ExportError> {
        let format = request
            .get_format()
            .map_err(ExportError::InvalidFormat)?;

        match format {
            ExportFormat::Json => {
                let snapshot = self.collector.collect(request.user_id).await?;
                let bytes = serde_json::to_vec_pretty(&snapshot)?;

                let file_name = format!("{}.json", request.id);
                tokio::fs::create_dir_all(&self.export_dir).await?;
                tokio::fs::write(self.export_dir.join(&file_name), bytes).await?;

                Ok(format!(
                    "{}/{}",
                    self.export_base_url.trim_end_matches('/'),
                    file_name
                ))
            }
            ExportFormat::Pdf => Err(ExportError::PdfNotImplemented),
        }
    }

    /// Delete artifacts whose availability window has closed and drop their
    /// URLs. The request rows stay `completed` for audit history.
    pub async fn purge_expired(&self) -> AppResult<usize> {
        let expired = self.repo.find_expired(Utc::now()).await?;
        let mut purged = 0;

        for request in expired {
            let path = self.export_dir.join(format!("{}.json", request.id));
            match tokio::fs::remove_file(&path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(AppError::InternalServerError(format!(
                        "Failed to remove expired export artifact {}: {}",
                        path.display(),
                        e
                    )))
                }
            }
            self.repo.clear_file_url(request.id).await?;
            purged += 1;
            info!(request_id = %request.id, "Purged expired export artifact");
        }

        Ok(purged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::export_request_model::ExportStatus;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn empty<M: sea_orm::ModelTrait>() -> Vec<M> {
        Vec::new()
    }

    fn service_with(db: DatabaseConnection, dir: &std::path::Path) -> ExportService {
        let (jobs, _rx) = crate::features::gdpr::worker::job_channel();
        ExportService::new(
            Arc::new(db),
            jobs,
            dir.to_path_buf(),
            "https://api.amoura.example/exports".to_string(),
        )
    }

    fn test_user(id: Uuid) -> crate::domain::user_model::Model {
        crate::domain::user_model::Model {
            id,
            email: "alice@example.com".to_string(),
            password_hash: "hash".to_string(),
            is_active: true,
            email_verified: true,
            last_login_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_process_json_export_writes_artifact_and_completes() {
        let user_id = Uuid::new_v4();
        let request = export_request_model::Model::new(user_id, ExportFormat::Json);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![request.clone()]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .append_query_results([vec![test_user(user_id)]])
            .append_query_results([empty::<crate::domain::profile_model::Model>()])
            .append_query_results([empty::<crate::domain::match_model::Model>()])
            .append_query_results([empty::<crate::domain::message_model::Model>()])
            .append_query_results([empty::<crate::domain::subscription_model::Model>()])
            .append_query_results([empty::<crate::domain::daily_selection_model::Model>()])
            .append_query_results([empty::<crate::domain::consent_record_model::Model>()])
            .append_query_results([empty::<crate::domain::push_token_model::Model>()])
            .append_query_results([empty::<crate::domain::notification_model::Model>()])
            .append_query_results([empty::<crate::domain::report_model::Model>()])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let dir = tempfile::tempdir().unwrap();
        let service = service_with(db, dir.path());

        service.process_export_request(request.id).await.unwrap();

        let artifact = dir.path().join(format!("{}.json", request.id));
        let contents = std::fs::read_to_string(&artifact).unwrap();
        let snapshot: serde_json::Value = serde_json::from_str(&contents).unwrap();

        assert_eq!(
            snapshot["exportMetadata"]["userId"],
            serde_json::json!(user_id)
        );
        assert_eq!(snapshot["user"]["email"], "alice@example.com");
        assert!(snapshot["messages"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_process_pdf_export_fails_with_documented_message() {
        let request = export_request_model::Model::new(Uuid::new_v4(), ExportFormat::Pdf);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![request.clone()]])
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
            .into_connection();

        let dir = tempfile::tempdir().unwrap();
        let service = service_with(db, dir.path());

        // Completes without error; the request row ends as failed with the
        // PDF message via mark_failed.
        service.process_export_request(request.id).await.unwrap();
        assert_eq!(
            ExportError::PdfNotImplemented.to_string(),
            "PDF export is not implemented yet; request the JSON format instead"
        );
    }

    #[tokio::test]
    async fn test_process_terminal_request_is_noop() {
        let mut request = export_request_model::Model::new(Uuid::new_v4(), ExportFormat::Json);
        request.status = ExportStatus::Completed.into();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![request.clone()]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let dir = tempfile::tempdir().unwrap();
        let service = service_with(db, dir.path());

        // mark_processing affects zero rows, so no artifact is produced and
        // no further statement runs.
        service.process_export_request(request.id).await.unwrap();
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }

    #[tokio::test]
    async fn test_process_missing_request_is_noop() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([empty::<export_request_model::Model>()])
            .into_connection();

        let dir = tempfile::tempdir().unwrap();
        let service = service_with(db, dir.path());

        service.process_export_request(Uuid::new_v4()).await.unwrap();
    }

    #[tokio::test]
    async fn test_purge_expired_removes_artifact_and_clears_url() {
        let mut request = export_request_model::Model::new(Uuid::new_v4(), ExportFormat::Json);
        request.status = ExportStatus::Completed.into();
        request.file_url = Some("https://api.amoura.example/exports/x.json".to_string());

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![request.clone()]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let dir = tempfile::tempdir().unwrap();
        let artifact = dir.path().join(format!("{}.json", request.id));
        std::fs::write(&artifact, b"{}").unwrap();

        let service = service_with(db, dir.path());
        let purged = service.purge_expired().await.unwrap();

        assert_eq!(purged, 1);
        assert!(!artifact.exists());
    }
}
