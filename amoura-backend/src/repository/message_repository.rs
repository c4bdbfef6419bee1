// src/repository/message_repository.rs

use crate::db::DbPool;
use crate::domain::message_model::{self, Entity as MessageEntity};
use sea_orm::entity::*;
use sea_orm::{DbErr, Order, QueryFilter, QueryOrder, QuerySelect};
use uuid::Uuid;

pub struct MessageRepository {
    db: DbPool,
}

impl MessageRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// Messages authored by the user, newest first.
    pub async fn find_by_sender_id(
        &self,
        sender_id: Uuid,
        limit: u64,
    ) -> Result<Vec<message_model::Model>, DbErr> {
        MessageEntity::find()
            .filter(message_model::Column::SenderId.eq(sender_id))
            .order_by(message_model::Column::SentAt, Order::Desc)
            .limit(limit)
            .all(self.db.as_ref())
            .await
    }
}
