// src/repository/push_token_repository.rs

use crate::db::DbPool;
use crate::domain::push_token_model::{self, Entity as PushTokenEntity};
use sea_orm::entity::*;
use sea_orm::{DbErr, Order, QueryFilter, QueryOrder, QuerySelect};
use uuid::Uuid;

pub struct PushTokenRepository {
    db: DbPool,
}

impl PushTokenRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn find_by_user_id(
        &self,
        user_id: Uuid,
        limit: u64,
    ) -> Result<Vec<push_token_model::Model>, DbErr> {
        PushTokenEntity::find()
            .filter(push_token_model::Column::UserId.eq(user_id))
            .order_by(push_token_model::Column::CreatedAt, Order::Desc)
            .limit(limit)
            .all(self.db.as_ref())
            .await
    }
}
