// amoura-backend/src/features/gdpr/services/gdpr.rs

use crate::db::DbPool;
use crate::domain::export_request_model::ExportFormat;
use crate::error::{AppError, AppResult};
use crate::features::gdpr::dto::{
    ConsentRequest, ConsentResponse, DeletionRequestResponse, ExportRequestResponse,
};
use crate::features::gdpr::services::consent::ConsentService;
use crate::features::gdpr::services::deletion::DeletionService;
use crate::features::gdpr::services::export::ExportService;
use crate::features::gdpr::AuditContext;
use std::sync::Arc;
use uuid::Uuid;

/// Facade over the consent store and the export/deletion job engines. The
/// HTTP layer talks only to this type.
pub struct GdprService {
    consent_service: ConsentService,
    export_service: Arc<ExportService>,
    deletion_service: Arc<DeletionService>,
}

impl GdprService {
    pub fn new(
        db: DbPool,
        export_service: Arc<ExportService>,
        deletion_service: Arc<DeletionService>,
    ) -> Self {
        Self {
            consent_service: ConsentService::new(db),
            export_service,
            deletion_service,
        }
    }

    // --- Consent ---

    pub async fn record_consent(
        &self,
        ctx: &AuditContext,
        request: ConsentRequest,
    ) -> AppResult<ConsentResponse> {
        let record = self.consent_service.record_consent(ctx, request).await?;
        Ok(record.into())
    }

    /// `None` when the user never consented or revoked; that is a normal
    /// state (full opt-out), not an error.
    pub async fn get_current_consent(&self, user_id: Uuid) -> AppResult<Option<ConsentResponse>> {
        Ok(self
            .consent_service
            .current_consent(user_id)
            .await?
            .map(Into::into))
    }

    pub async fn get_consent_history(&self, user_id: Uuid) -> AppResult<Vec<ConsentResponse>> {
        let history = self.consent_service.consent_history(user_id).await?;
        Ok(history.into_iter().map(Into::into).collect())
    }

    /// Returns whether an active record was actually revoked.
    pub async fn revoke_consent(&self, ctx: &AuditContext) -> AppResult<bool> {
        self.consent_service.revoke_consent(ctx).await
    }

    // --- Data export ---

    pub async fn request_data_export(
        &self,
        ctx: &AuditContext,
        format: ExportFormat,
    ) -> AppResult<ExportRequestResponse> {
        let request = self.export_service.create_export_request(ctx, format).await?;
        Ok(request.into())
    }

    pub async fn get_export_request(
        &self,
        user_id: Uuid,
        request_id: Uuid,
    ) -> AppResult<ExportRequestResponse> {
        self.export_service
            .get_export_request(user_id, request_id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("Export request not found".to_string()))
    }

    pub async fn list_export_requests(
        &self,
        user_id: Uuid,
    ) -> AppResult<Vec<ExportRequestResponse>> {
        let requests = self.export_service.list_export_requests(user_id).await?;
        Ok(requests.into_iter().map(Into::into).collect())
    }

    // --- Account deletion ---

    pub async fn request_account_deletion(
        &self,
        ctx: &AuditContext,
        reason: Option<String>,
    ) -> AppResult<DeletionRequestResponse> {
        let request = self
            .deletion_service
            .request_account_deletion(ctx, reason)
            .await?;
        Ok(request.into())
    }

    pub async fn get_deletion_request(
        &self,
        user_id: Uuid,
        request_id: Uuid,
    ) -> AppResult<DeletionRequestResponse> {
        self.deletion_service
            .get_deletion_request(user_id, request_id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("Deletion request not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::consent_record_model;
    use crate::features::gdpr::worker::job_channel;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
    use std::path::PathBuf;

    fn facade_with(consent_db: DatabaseConnection) -> GdprService {
        let (jobs, _rx) = job_channel();
        let export_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let deletion_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let export_service = Arc::new(ExportService::new(
            export_db,
            jobs.clone(),
            PathBuf::from("/tmp/amoura-exports"),
            "http://localhost:3000/exports".to_string(),
        ));
        let deletion_service = Arc::new(DeletionService::new(
            deletion_db,
            jobs,
            PathBuf::from("/tmp/amoura-exports"),
        ));
        GdprService::new(Arc::new(consent_db), export_service, deletion_service)
    }

    #[tokio::test]
    async fn test_current_consent_without_record_is_none_not_an_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<consent_record_model::Model>::new()])
            .into_connection();

        let consent = facade_with(db)
            .get_current_consent(Uuid::new_v4())
            .await
            .unwrap();

        assert!(consent.is_none());
    }
}
