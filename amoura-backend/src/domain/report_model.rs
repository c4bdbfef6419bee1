// amoura-backend/src/domain/report_model.rs

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Abuse report filed by one user against another
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "reports")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub reporter_id: Uuid,

    pub reported_user_id: Uuid,

    pub reason: String,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user_model::Entity",
        from = "Column::ReporterId",
        to = "super::user_model::Column::Id"
    )]
    Reporter,
    #[sea_orm(
        belongs_to = "super::user_model::Entity",
        from = "Column::ReportedUserId",
        to = "super::user_model::Column::Id"
    )]
    ReportedUser,
}

impl ActiveModelBehavior for ActiveModel {}
