// src/repository/deletion_request_repository.rs

use crate::db::DbPool;
use crate::domain::deletion_request_model::{
    self, DeletionStatus, Entity as DeletionRequestEntity,
};
use sea_orm::entity::*;
use sea_orm::sea_query::Expr;
use sea_orm::{DbErr, IntoActiveModel, Order, QueryFilter, QueryOrder};
use uuid::Uuid;

pub struct DeletionRequestRepository {
    db: DbPool,
}

impl DeletionRequestRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        request: deletion_request_model::Model,
    ) -> Result<deletion_request_model::Model, DbErr> {
        request.into_active_model().insert(self.db.as_ref()).await
    }

    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<deletion_request_model::Model>, DbErr> {
        DeletionRequestEntity::find_by_id(id).one(self.db.as_ref()).await
    }

    /// Owner-scoped lookup. The row survives the user's deletion, so a
    /// completed request remains pollable by request id.
    pub async fn find_by_id_for_user(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<deletion_request_model::Model>, DbErr> {
        DeletionRequestEntity::find_by_id(id)
            .filter(deletion_request_model::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await
    }

    /// Conditional pending -> processing transition; zero rows affected
    /// means another pickup won or the request is terminal.
    pub async fn mark_processing(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = DeletionRequestEntity::update_many()
            .col_expr(
                deletion_request_model::Column::Status,
                Expr::value(String::from(DeletionStatus::Processing)),
            )
            .filter(deletion_request_model::Column::Id.eq(id))
            .filter(
                deletion_request_model::Column::Status
                    .eq(String::from(DeletionStatus::Pending)),
            )
            .exec(self.db.as_ref())
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn mark_failed(&self, id: Uuid, error_message: String) -> Result<bool, DbErr> {
        let result = DeletionRequestEntity::update_many()
            .col_expr(
                deletion_request_model::Column::Status,
                Expr::value(String::from(DeletionStatus::Failed)),
            )
            .col_expr(
                deletion_request_model::Column::ErrorMessage,
                Expr::value(Some(error_message)),
            )
            .filter(deletion_request_model::Column::Id.eq(id))
            .filter(
                deletion_request_model::Column::Status
                    .eq(String::from(DeletionStatus::Processing)),
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
    pub async fn find_unfinished(&self) -> Result<Vec<deletion_request_model::Model>, DbErr> {
        DeletionRequestEntity::find()
            .filter(
                deletion_request_model::Column::Status.is_in([
                    String::from(DeletionStatus::Pending),
                    String::from(DeletionStatus::Processing),
                ]),
            )
            .order_by(deletion_request_model::Column::RequestedAt, Order::Asc)
            .all(self.db.as_ref())
            .await
    }
}
