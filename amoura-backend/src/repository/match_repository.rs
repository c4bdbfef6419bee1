// src/repository/match_repository.rs

use crate::db::DbPool;
use crate::domain::match_model::{self, Entity as MatchEntity};
use sea_orm::entity::*;
use sea_orm::{Condition, DbErr, Order, QueryFilter, QueryOrder, QuerySelect};
use uuid::Uuid;

pub struct MatchRepository {
    db: DbPool,
}

impl MatchRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// Matches involving the user on either side, newest first.
    pub async fn find_by_user_id(
        &self,
        user_id: Uuid,
        limit: u64,
    ) -> Result<Vec<match_model::Model>, DbErr> {
        MatchEntity::find()
            .filter(
                Condition::any()
                    .add(match_model::Column::User1Id.eq(user_id))
                    .add(match_model::Column::User2Id.eq(user_id)),
            )
            .order_by(match_model::Column::MatchedAt, Order::Desc)
            .limit(limit)
            .all(self.db.as_ref())
            .await
    }
}
