// amoura-backend/src/domain/message_model.rs

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Chat message within a match
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "messages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub match_id: Uuid,

    pub sender_id: Uuid,

    pub content: String,

    pub sent_at: DateTime<Utc>,

    #[sea_orm(nullable)]
    pub read_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::match_model::Entity",
        from = "Column::MatchId",
        to = "super::match_model::Column::Id",
        on_delete = "Cascade"
    )]
    Match,
    #[sea_orm(
        belongs_to = "super::user_model::Entity",
        from = "Column::SenderId",
        to = "super::user_model::Column::Id"
    )]
    Sender,
}

impl Related<super::match_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Match.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
