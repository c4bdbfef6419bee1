// amoura-backend/src/domain/match_model.rs

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Match between two users
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "matches")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub user1_id: Uuid,

    pub user2_id: Uuid,

    pub matched_at: DateTime<Utc>,

    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user_model::Entity",
        from = "Column::User1Id",
        to = "super::user_model::Column::Id"
    )]
    User1,
    #[sea_orm(
        belongs_to = "super::user_model::Entity",
        from = "Column::User2Id",
        to = "super::user_model::Column::Id"
    )]
    User2,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// The counterpart of `user_id` in this match, if they are part of it.
    pub fn other_side(&self, user_id: Uuid) -> Option<Uuid> {
        if self.user1_id == user_id {
            Some(self.user2_id)
        } else if self.user2_id == user_id {
            Some(self.user1_id)
        } else {
            None
        }
    }
}
