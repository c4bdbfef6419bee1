// src/repository/daily_selection_repository.rs

use crate::db::DbPool;
use crate::domain::daily_selection_model::{self, Entity as DailySelectionEntity};
use sea_orm::entity::*;
use sea_orm::{DbErr, Order, QueryFilter, QueryOrder, QuerySelect};
use uuid::Uuid;

pub struct DailySelectionRepository {
    db: DbPool,
}

impl DailySelectionRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn find_recent_by_user_id(
        &self,
        user_id: Uuid,
        limit: u64,
    ) -> Result<Vec<daily_selection_model::Model>, DbErr> {
        DailySelectionEntity::find()
            .filter(daily_selection_model::Column::UserId.eq(user_id))
            .order_by(daily_selection_model::Column::SelectionDate, Order::Desc)
            .limit(limit)
            .all(self.db.as_ref())
            .await
    }
}
