// amoura-backend/src/features/gdpr/services/consent.rs

use crate::db::DbPool;
use crate::domain::consent_record_model;
use crate::error::{AppError, AppResult};
use crate::features::gdpr::dto::ConsentRequest;
use crate::features::gdpr::AuditContext;
use crate::repository::consent_repository::ConsentRepository;
use crate::repository::user_repository::UserRepository;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Versioned consent store. History is append-only; exactly one record per
/// user is active at a time, and no record at all means full opt-out.
pub struct ConsentService {
    user_repo: Arc<UserRepository>,
    consent_repo: Arc<ConsentRepository>,
}

impl ConsentService {
    pub fn new(db: DbPool) -> Self {
        Self {
            user_repo: Arc::new(UserRepository::new(db.clone())),
            consent_repo: Arc::new(ConsentRepository::new(db)),
        }
    }

    /// Record a new consent statement, atomically deactivating the previous
    /// active record.
    pub async fn record_consent(
        &self,
        ctx: &AuditContext,
        request: ConsentRequest,
    ) -> AppResult<consent_record_model::Model> {
        self.user_repo
            .find_by_id(ctx.actor_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let record = consent_record_model::Model::new(
            ctx.actor_id,
            request.data_processing,
            request.marketing,
            request.analytics,
            request.consented_at,
        );
        let record = self.consent_repo.record(record).await?;

        info!(
            user_id = %ctx.actor_id,
            consent_id = %record.id,
            data_processing = record.data_processing,
            marketing = record.marketing,
            analytics = record.analytics,
            "Recorded consent"
        );

        Ok(record)
    }

    /// Active record, or `None` when the user never consented or revoked.
    pub async fn current_consent(
        &self,
        user_id: Uuid,
    ) -> AppResult<Option<consent_record_model::Model>> {
        Ok(self.consent_repo.find_active_by_user_id(user_id).await?)
    }

    /// All records, newest first.
    pub async fn consent_history(
        &self,
        user_id: Uuid,
    ) -> AppResult<Vec<consent_record_model::Model>> {
        Ok(self.consent_repo.find_all_by_user_id(user_id).await?)
    }

    /// Deactivate the active record without inserting a new one. A user with
    /// no active consent is a no-op, not an error.
    pub async fn revoke_consent(&self, ctx: &AuditContext) -> AppResult<bool> {
        let revoked = self
            .consent_repo
            .revoke_active(ctx.actor_id, ctx.requested_at)
            .await?
            > 0;

        if revoked {
            info!(user_id = %ctx.actor_id, "Revoked active consent");
        }

        Ok(revoked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn test_user(id: Uuid) -> crate::domain::user_model::Model {
        crate::domain::user_model::Model {
            id,
            email: "alice@example.com".to_string(),
            password_hash: "hash".to_string(),
            is_active: true,
            email_verified: true,
            last_login_at: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_record_consent_deactivates_then_inserts() {
        let user_id = Uuid::new_v4();
        let inserted = consent_record_model::Model::new(user_id, true, Some(true), None, None);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![test_user(user_id)]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .append_query_results([vec![inserted.clone()]])
            .into_connection();

        let service = ConsentService::new(Arc::new(db));
        let ctx = AuditContext::new(user_id);
        let record = service
            .record_consent(
                &ctx,
                ConsentRequest {
                    data_processing: true,
                    marketing: Some(true),
                    analytics: None,
                    consented_at: None,
                },
            )
            .await
            .unwrap();

        assert!(record.is_active);
        assert!(record.data_processing);
        assert!(record.marketing);
        assert!(!record.analytics);
    }

    #[tokio::test]
    async fn test_record_consent_for_unknown_user_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<crate::domain::user_model::Model>::new()])
            .into_connection();

        let service = ConsentService::new(Arc::new(db));
        let ctx = AuditContext::new(Uuid::new_v4());
        let result = service
            .record_consent(
                &ctx,
                ConsentRequest {
                    data_processing: true,
                    marketing: None,
                    analytics: None,
                    consented_at: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_revoke_without_active_consent_is_noop() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let service = ConsentService::new(Arc::new(db));
        let ctx = AuditContext::new(Uuid::new_v4());
        let revoked = service.revoke_consent(&ctx).await.unwrap();

        assert!(!revoked);
    }

    #[tokio::test]
    async fn test_current_consent_none_when_no_record() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<consent_record_model::Model>::new()])
            .into_connection();

        let service = ConsentService::new(Arc::new(db));
        let consent = service.current_consent(Uuid::new_v4()).await.unwrap();

        assert!(consent.is_none());
    }
}
