// src/repository/notification_repository.rs

use crate::db::DbPool;
use crate::domain::notification_model::{self, Entity as NotificationEntity};
use sea_orm::entity::*;
use sea_orm::{DbErr, Order, QueryFilter, QueryOrder, QuerySelect};
use uuid::Uuid;

pub struct NotificationRepository {
    db: DbPool,
}

impl NotificationRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn find_recent_by_user_id(
        &self,
        user_id: Uuid,
        limit: u64,
    ) -> Result<Vec<notification_model::Model>, DbErr> {
        NotificationEntity::find()
            .filter(notification_model::Column::UserId.eq(user_id))
            .order_by(notification_model::Column::SentAt, Order::Desc)
            .limit(limit)
            .all(self.db.as_ref())
            .await
    }
}
