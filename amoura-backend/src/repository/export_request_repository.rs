// src/repository/export_request_repository.rs

use crate::db::DbPool;
use crate::domain::export_request_model::{self, Entity as ExportRequestEntity, ExportStatus};
use chrono::{DateTime, Utc};
use sea_orm::entity::*;
use sea_orm::sea_query::Expr;
use sea_orm::{DbErr, IntoActiveModel, Order, QueryFilter, QueryOrder};
use uuid::Uuid;

pub struct ExportRequestRepository {
    db: DbPool,
}

impl ExportRequestRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        request: export_request_model::Model,
    ) -> Result<export_request_model::Model, DbErr> {
        request.into_active_model().insert(self.db.as_ref()).await
    }

    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<export_request_model::Model>, DbErr> {
        ExportRequestEntity::find_by_id(id).one(self.db.as_ref()).await
    }

    /// Owner-scoped lookup so one user's request is never visible to another.
    pub async fn find_by_id_for_user(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<export_request_model::Model>, DbErr> {
        ExportRequestEntity::find_by_id(id)
            .filter(export_request_model::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await
    }

    pub async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<export_request_model::Model>, DbErr> {
        ExportRequestEntity::find()
            .filter(export_request_model::Column::UserId.eq(user_id))
            .order_by(export_request_model::Column::CreatedAt, Order::Desc)
            .all(self.db.as_ref())
            .await
    }

    /// Conditional pending -> processing transition. Zero rows affected means
    /// the request was already picked up or is terminal, and the caller must
    /// not process it again.
    pub async fn mark_processing(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = ExportRequestEntity::update_many()
            .col_expr(
                export_request_model::Column::Status,
                Expr::value(String::from(ExportStatus::Processing)),
            )
            .filter(export_request_model::Column::Id.eq(id))
            .filter(
                export_request_model::Column::Status
                    .eq(String::from(ExportStatus::Pending)),
            )
            .exec(self.db.as_ref())
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn mark_completed(
        &self,
        id: Uuid,
        file_url: String,
        completed_at: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let result = ExportRequestEntity::update_many()
            .col_expr(
                export_request_model::Column::Status,
                Expr::value(String::from(ExportStatus::Completed)),
            )
            .col_expr(
                export_request_model::Column::FileUrl,
                Expr::value(Some(file_url)),
            )
            .col_expr(
                export_request_model::Column::CompletedAt,
                Expr::value(Some(completed_at)),
            )
            .filter(export_request_model::Column::Id.eq(id))
            .filter(
                export_request_model::Column::Status
                    .eq(String::from(ExportStatus::Processing)),
            )
            .exec(self.db.as_ref())
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn mark_failed(&self, id: Uuid, error_message: String) -> Result<bool, DbErr> {
        let result = ExportRequestEntity::update_many()
            .col_expr(
                export_request_model::Column::Status,
                Expr::value(String::from(ExportStatus::Failed)),
            )
            .col_expr(
                export_request_model::Column::ErrorMessage,
                Expr::value(Some(error_message)),
            )
            .filter(export_request_model::Column::Id.eq(id))
            .filter(
                export_request_model::Column::Status
                    .eq(String::from(ExportStatus::Processing)),
            )
            .exec(self.db.as_ref())
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Terminate a request stranded in `processing` by a crash. Affects
    /// zero rows (and returns false) when the request is still `pending`.
    pub async fn mark_processing_interrupted(&self, id: Uuid) -> Result<bool, DbErr> {
        self.mark_failed(id, "processing interrupted by service restart".to_string())
            .await
    }

    /// Requests a restarted worker must pick up again.
    pub async fn find_unfinished(&self) -> Result<Vec<export_request_model::Model>, DbErr> {
        ExportRequestEntity::find()
            .filter(
                export_request_model::Column::Status.is_in([
                    String::from(ExportStatus::Pending),
                    String::from(ExportStatus::Processing),
                ]),
            )
            .order_by(export_request_model::Column::CreatedAt, Order::Asc)
            .all(self.db.as_ref())
            .await
    }

    /// Completed requests whose artifact window has closed.
    pub async fn find_expired(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<export_request_model::Model>, DbErr> {
        ExportRequestEntity::find()
            .filter(
                export_request_model::Column::Status
                    .eq(String::from(ExportStatus::Completed)),
            )
            .filter(export_request_model::Column::FileUrl.is_not_null())
            .filter(export_request_model::Column::ExpiresAt.lt(now))
            .all(self.db.as_ref())
            .await
    }

    /// Drop the artifact URL once the file has been purged.
    pub async fn clear_file_url(&self, id: Uuid) -> Result<(), DbErr> {
        ExportRequestEntity::update_many()
            .col_expr(
                export_request_model::Column::FileUrl,
                Expr::value(Option::<String>::None),
            )
            .filter(export_request_model::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await?;
        Ok(())
    }
}
