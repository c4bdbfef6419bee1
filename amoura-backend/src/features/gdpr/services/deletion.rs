// amoura-backend/src/features/gdpr/services/deletion.rs

use crate::db::DbPool;
use crate::domain::deletion_request_model::{self, DeletionMetadata, DeletionStatus};
use crate::domain::export_request_model::{self, ExportStatus};
use crate::domain::user_model::DELETED_USER_ID;
use crate::domain::{
    consent_record_model, daily_selection_model, match_model, message_model, notification_model,
    profile_model, push_token_model, report_model, user_model,
};
use crate::error::{AppError, AppResult};
use crate::features::gdpr::worker::{GdprJob, JobSender};
use crate::features::gdpr::AuditContext;
use crate::repository::deletion_request_repository::DeletionRequestRepository;
use crate::repository::user_repository::UserRepository;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DbErr, EntityTrait, QueryFilter, TransactionError, TransactionTrait,
};
use std::path::PathBuf;
use tracing::{info, warn};
use uuid::Uuid;

fn unwrap_transaction_error(e: TransactionError<DbErr>) -> DbErr {
    match e {
        TransactionError::Connection(e) => e,
        TransactionError::Transaction(e) => e,
    }
}

/// Account deletion job engine.
///
/// Erasure runs as a single database transaction: shared conversation data is
/// anonymized to the sentinel user, owned data is deleted, and the user row
/// goes last. Either everything is applied or nothing is, and a failed run
/// leaves the account fully intact.
pub struct DeletionService {
    db: DbPool,
    user_repo: UserRepository,
    repo: DeletionRequestRepository,
    jobs: JobSender,
    export_dir: PathBuf,
}

impl DeletionService {
    pub fn new(db: DbPool, jobs: JobSender, export_dir: PathBuf) -> Self {
        Self {
            user_repo: UserRepository::new(db.clone()),
            repo: DeletionRequestRepository::new(db.clone()),
            db,
            jobs,
            export_dir,
        }
    }

    /// Persist a new pending request and wake the worker. The email is
    /// snapshotted now because the user row will not survive processing.
    pub async fn request_account_deletion(
        &self,
        ctx: &AuditContext,
        reason: Option<String>,
    ) -> AppResult<deletion_request_model::Model> {
        if ctx.actor_id == DELETED_USER_ID {
            return Err(AppError::BadRequest(
                "This account cannot be deleted".to_string(),
            ));
        }

        let user = self
            .user_repo
            .find_by_id(ctx.actor_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let request = self
            .repo
            .create(deletion_request_model::Model::new(
                user.id, user.email, reason,
            ))
            .await?;

        info!(
            user_id = %ctx.actor_id,
            request_id = %request.id,
            "Created account deletion request"
        );

        self.jobs.enqueue(GdprJob::DeleteAccount(request.id));
        Ok(request)
    }

    pub async fn get_deletion_request(
        &self,
        user_id: Uuid,
        request_id: Uuid,
    ) -> AppResult<Option<deletion_request_model::Model>> {
        Ok(self.repo.find_by_id_for_user(user_id, request_id).await?)
    }

    /// Worker entry point, idempotent under duplicate delivery.
    pub async fn process_deletion_request(&self, request_id: Uuid) -> AppResult<()> {
        let Some(request) = self.repo.find_by_id(request_id).await? else {
            warn!(%request_id, "Deletion request not found, skipping");
            return Ok(());
        };

        if !self.repo.mark_processing(request_id).await? {
            info!(%request_id, status = %request.status, "Deletion request already picked up or terminal, skipping");
            return Ok(());
        }

        match self.erase_user_data(request_id, request.user_id).await {
            Ok((metadata, export_artifacts)) => {
                self.remove_export_artifacts(&export_artifacts).await;
                info!(
                    %request_id,
                    user_id = %request.user_id,
                    messages_anonymized = metadata.messages_anonymized,
                    matches_anonymized = metadata.matches_anonymized,
                    reports_anonymized = metadata.reports_anonymized,
                    "Account deletion completed"
                );
            }
            Err(e) => {
                self.repo.mark_failed(request_id, e.to_string()).await?;
                warn!(%request_id, user_id = %request.user_id, error = %e, "Account deletion failed, no data was removed");
            }
        }

        Ok(())
    }

    /// Erase everything held about `user_id` in one transaction.
    ///
    /// Order matters: anonymization first so shared rows never reference a
    /// missing user, then owned rows, then the user row itself. The request
    /// row is stamped `completed` with the counts inside the same
    /// transaction, so the completion record and the erasure are inseparable.
    ///
    /// Also returns the ids of the user's completed export requests that
    /// still have an artifact on disk. Their rows are removed with the user
    /// (foreign-key cascade), so the caller must unlink the files after the
    /// commit; the purge sweep cannot find them anymore.
    async fn erase_user_data(
        &self,
        request_id: Uuid,
        user_id: Uuid,
    ) -> Result<(DeletionMetadata, Vec<Uuid>), DbErr> {
        self.db
            .transaction::<_, (DeletionMetadata, Vec<Uuid>), DbErr>(move |txn| {
                Box::pin(async move {
                    let completed_exports = export_request_model::Entity::find()
                        .filter(export_request_model::Column::UserId.eq(user_id))
                        .filter(
                            export_request_model::Column::Status
                                .eq(String::from(ExportStatus::Completed)),
                        )
                        .all(txn)
                        .await?;
                    let data_exported = !completed_exports.is_empty();
                    let export_artifacts: Vec<Uuid> = completed_exports
                        .iter()
                        .filter(|r| r.file_url.is_some())
                        .map(|r| r.id)
                        .collect();

                    let messages_anonymized = message_model::Entity::update_many()
                        .col_expr(
                            message_model::Column::SenderId,
                            Expr::value(DELETED_USER_ID),
                        )
                        .filter(message_model::Column::SenderId.eq(user_id))
                        .exec(txn)
                        .await?
                        .rows_affected;

                    let matches_as_user1 = match_model::Entity::update_many()
                        .col_expr(match_model::Column::User1Id, Expr::value(DELETED_USER_ID))
                        .filter(match_model::Column::User1Id.eq(user_id))
                        .exec(txn)
                        .await?
                        .rows_affected;
                    let matches_as_user2 = match_model::Entity::update_many()
                        .col_expr(match_model::Column::User2Id, Expr::value(DELETED_USER_ID))
                        .filter(match_model::Column::User2Id.eq(user_id))
                        .exec(txn)
                        .await?
                        .rows_affected;

                    let reports_anonymized = report_model::Entity::update_many()
                        .col_expr(
                            report_model::Column::ReportedUserId,
                            Expr::value(DELETED_USER_ID),
                        )
                        .filter(report_model::Column::ReportedUserId.eq(user_id))
                        .exec(txn)
                        .await?
                        .rows_affected;

                    push_token_model::Entity::delete_many()
                        .filter(push_token_model::Column::UserId.eq(user_id))
                        .exec(txn)
                        .await?;
                    consent_record_model::Entity::delete_many()
                        .filter(consent_record_model::Column::UserId.eq(user_id))
                        .exec(txn)
                        .await?;
                    notification_model::Entity::delete_many()
                        .filter(notification_model::Column::UserId.eq(user_id))
                        .exec(txn)
                        .await?;
                    daily_selection_model::Entity::delete_many()
                        .filter(daily_selection_model::Column::UserId.eq(user_id))
                        .exec(txn)
                        .await?;
                    report_model::Entity::delete_many()
                        .filter(report_model::Column::ReporterId.eq(user_id))
                        .exec(txn)
                        .await?;
                    crate::domain::subscription_model::Entity::delete_many()
                        .filter(crate::domain::subscription_model::Column::UserId.eq(user_id))
                        .exec(txn)
                        .await?;
                    profile_model::Entity::delete_many()
                        .filter(profile_model::Column::UserId.eq(user_id))
                        .exec(txn)
                        .await?;

                    // The user row goes last, once nothing references it.
                    user_model::Entity::delete_many()
                        .filter(user_model::Column::Id.eq(user_id))
                        .exec(txn)
                        .await?;

                    let metadata = DeletionMetadata {
                        messages_anonymized,
                        matches_anonymized: matches_as_user1 + matches_as_user2,
                        reports_anonymized,
                        data_exported,
                    };

                    let stamped = deletion_request_model::Entity::update_many()
                        .col_expr(
                            deletion_request_model::Column::Status,
                            Expr::value(String::from(DeletionStatus::Completed)),
                        )
                        .col_expr(
                            deletion_request_model::Column::MessagesAnonymized,
                            Expr::value(Some(metadata.messages_anonymized as i64)),
                        )
                        .col_expr(
                            deletion_request_model::Column::MatchesAnonymized,
                            Expr::value(Some(metadata.matches_anonymized as i64)),
                        )
                        .col_expr(
                            deletion_request_model::Column::ReportsAnonymized,
                            Expr::value(Some(metadata.reports_anonymized as i64)),
                        )
                        .col_expr(
                            deletion_request_model::Column::DataExported,
                            Expr::value(metadata.data_exported),
                        )
                        .col_expr(
                            deletion_request_model::Column::CompletedAt,
                            Expr::value(Some(Utc::now())),
                        )
                        .filter(deletion_request_model::Column::Id.eq(request_id))
                        .filter(
                            deletion_request_model::Column::Status
                                .eq(String::from(DeletionStatus::Processing)),
                        )
                        .exec(txn)
                        .await?;

                    if stamped.rows_affected == 0 {
                        return Err(DbErr::Custom(
                            "deletion request is no longer in processing state".to_string(),
                        ));
                    }

                    Ok((metadata, export_artifacts))
                })
            })
            .await
            .map_err(unwrap_transaction_error)
    }

    /// Unlink the deleted account's export artifacts. Runs after the erase
    /// transaction committed; failures are logged, not propagated, because
    /// the erasure itself already succeeded.
    async fn remove_export_artifacts(&self, request_ids: &[Uuid]) {
        for id in request_ids {
            let path = self.export_dir.join(format!("{id}.json"));
            match tokio::fs::remove_file(&path).await {
                Ok(()) => {
                    info!(request_id = %id, "Removed export artifact of deleted account")
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => warn!(
                    request_id = %id,
                    path = %path.display(),
                    error = %e,
                    "Failed to remove export artifact of deleted account"
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::export_request_model::ExportFormat;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn exec(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    fn service_with(db: DatabaseConnection, dir: &std::path::Path) -> DeletionService {
        let (jobs, _rx) = crate::features::gdpr::worker::job_channel();
        DeletionService::new(Arc::new(db), jobs, dir.to_path_buf())
    }

    fn completed_export(user_id: Uuid) -> export_request_model::Model {
        let mut export = export_request_model::Model::new(user_id, ExportFormat::Json);
        export.status = ExportStatus::Completed.into();
        export.file_url = Some(format!("https://api.amoura.example/exports/{}.json", export.id));
        export
    }

    fn test_user(id: Uuid) -> user_model::Model {
        user_model::Model {
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
    async fn test_request_deletion_snapshots_email_and_enqueues() {
        let user_id = Uuid::new_v4();
        let created = deletion_request_model::Model::new(
            user_id,
            "alice@example.com".to_string(),
            Some("leaving".to_string()),
        );

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![test_user(user_id)]])
            .append_query_results([vec![created.clone()]])
            .into_connection();

        let dir = tempfile::tempdir().unwrap();
        let (jobs, mut rx) = crate::features::gdpr::worker::job_channel();
        let service = DeletionService::new(Arc::new(db), jobs, dir.path().to_path_buf());
        let ctx = AuditContext::new(user_id);

        let request = service
            .request_account_deletion(&ctx, Some("leaving".to_string()))
            .await
            .unwrap();

        assert_eq!(request.user_email, "alice@example.com");
        assert_eq!(rx.try_recv().unwrap(), GdprJob::DeleteAccount(created.id));
    }

    #[tokio::test]
    async fn test_request_deletion_for_unknown_user_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user_model::Model>::new()])
            .into_connection();

        let dir = tempfile::tempdir().unwrap();
        let service = service_with(db, dir.path());
        let ctx = AuditContext::new(Uuid::new_v4());
        let result = service.request_account_deletion(&ctx, None).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_sentinel_account_cannot_be_deleted() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let dir = tempfile::tempdir().unwrap();
        let service = service_with(db, dir.path());
        let ctx = AuditContext::new(DELETED_USER_ID);
        let result = service.request_account_deletion(&ctx, None).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_erase_user_data_counts_anonymized_rows() {
        let user_id = Uuid::new_v4();
        let request_id = Uuid::new_v4();
        let export = completed_export(user_id);

        // Statement order inside the transaction: completed-export lookup,
        // then 4 anonymization updates (messages 3, matches 1 + 0,
        // reports 0), 8 owned-row deletes, and the completion stamp.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![export.clone()]])
            .append_exec_results([
                exec(3), // messages
                exec(1), // matches as user1
                exec(0), // matches as user2
                exec(0), // reports against the user
                exec(2), // push tokens
                exec(1), // consents
                exec(4), // notifications
                exec(7), // daily selections
                exec(0), // reports by the user
                exec(1), // subscriptions
                exec(1), // profile
                exec(1), // user row
                exec(1), // completion stamp
            ])
            .into_connection();

        let dir = tempfile::tempdir().unwrap();
        let service = service_with(db, dir.path());
        let (metadata, artifacts) = service.erase_user_data(request_id, user_id).await.unwrap();

        assert_eq!(metadata.messages_anonymized, 3);
        assert_eq!(metadata.matches_anonymized, 1);
        assert_eq!(metadata.reports_anonymized, 0);
        assert!(metadata.data_exported);
        assert_eq!(artifacts, vec![export.id]);
    }

    #[tokio::test]
    async fn test_erase_user_data_fails_when_stamp_misses() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<export_request_model::Model>::new()])
            .append_exec_results([
                exec(0),
                exec(0),
                exec(0),
                exec(0),
                exec(0),
                exec(0),
                exec(0),
                exec(0),
                exec(0),
                exec(0),
                exec(0),
                exec(1),
                exec(0), // stamp races with another transition
            ])
            .into_connection();

        let dir = tempfile::tempdir().unwrap();
        let service = service_with(db, dir.path());
        let result = service
            .erase_user_data(Uuid::new_v4(), Uuid::new_v4())
            .await;

        assert!(matches!(result, Err(DbErr::Custom(_))));
    }

    #[tokio::test]
    async fn test_process_deletion_removes_export_artifacts() {
        let user_id = Uuid::new_v4();
        let request = deletion_request_model::Model::new(
            user_id,
            "alice@example.com".to_string(),
            None,
        );
        let export = completed_export(user_id);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![request.clone()]])
            .append_exec_results([exec(1)]) // pending -> processing
            .append_query_results([vec![export.clone()]])
            .append_exec_results([
                exec(0), // messages
                exec(0), // matches as user1
                exec(0), // matches as user2
                exec(0), // reports against the user
                exec(0), // push tokens
                exec(0), // consents
                exec(0), // notifications
                exec(0), // daily selections
                exec(0), // reports by the user
                exec(0), // subscriptions
                exec(1), // profile
                exec(1), // user row
                exec(1), // completion stamp
            ])
            .into_connection();

        let dir = tempfile::tempdir().unwrap();
        let artifact = dir.path().join(format!("{}.json", export.id));
        std::fs::write(&artifact, b"{}").unwrap();

        let service = service_with(db, dir.path());
        service.process_deletion_request(request.id).await.unwrap();

        // The export rows vanish with the user, so the artifact must be
        // unlinked here rather than by the expiry sweep.
        assert!(!artifact.exists());
    }
}
