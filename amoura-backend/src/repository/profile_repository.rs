// src/repository/profile_repository.rs

use crate::db::DbPool;
use crate::domain::profile_model::{self, Entity as ProfileEntity};
use sea_orm::entity::*;
use sea_orm::{DbErr, QueryFilter};
use uuid::Uuid;

pub struct ProfileRepository {
    db: DbPool,
}

impl ProfileRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<profile_model::Model>, DbErr> {
        ProfileEntity::find()
            .filter(profile_model::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await
    }
}
