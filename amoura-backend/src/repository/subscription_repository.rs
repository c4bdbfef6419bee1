// src/repository/subscription_repository.rs

use crate::db::DbPool;
use crate::domain::subscription_model::{self, Entity as SubscriptionEntity};
use sea_orm::entity::*;
use sea_orm::{DbErr, Order, QueryFilter, QueryOrder, QuerySelect};
use uuid::Uuid;

pub struct SubscriptionRepository {
    db: DbPool,
}

impl SubscriptionRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn find_by_user_id(
        &self,
        user_id: Uuid,
        limit: u64,
    ) -> Result<Vec<subscription_model::Model>, DbErr> {
        SubscriptionEntity::find()
            .filter(subscription_model::Column::UserId.eq(user_id))
            .order_by(subscription_model::Column::StartedAt, Order::Desc)
            .limit(limit)
            .all(self.db.as_ref())
            .await
    }
}
