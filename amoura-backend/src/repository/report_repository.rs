// src/repository/report_repository.rs

use crate::db::DbPool;
use crate::domain::report_model::{self, Entity as ReportEntity};
use sea_orm::entity::*;
use sea_orm::{Condition, DbErr, Order, QueryFilter, QueryOrder, QuerySelect};
use uuid::Uuid;

pub struct ReportRepository {
    db: DbPool,
}

impl ReportRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// Reports the user filed or was the subject of, newest first.
    pub async fn find_involving_user(
        &self,
        user_id: Uuid,
        limit: u64,
    ) -> Result<Vec<report_model::Model>, DbErr> {
        ReportEntity::find()
            .filter(
                Condition::any()
                    .add(report_model::Column::ReporterId.eq(user_id))
                    .add(report_model::Column::ReportedUserId.eq(user_id)),
            )
            .order_by(report_model::Column::CreatedAt, Order::Desc)
            .limit(limit)
            .all(self.db.as_ref())
            .await
    }
}
