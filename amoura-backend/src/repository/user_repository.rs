// src/repository/user_repository.rs

use crate::db::DbPool;
use crate::domain::user_model::{self, Entity as UserEntity};
use sea_orm::entity::*;
use sea_orm::DbErr;
use uuid::Uuid;

pub struct UserRepository {
    db: DbPool,
}

impl UserRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<user_model::Model>, DbErr> {
        UserEntity::find_by_id(id).one(self.db.as_ref()).await
    }
}
