// amoura-backend/src/domain/user_model.rs

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Shared sentinel identity that anonymized foreign keys are repointed to.
/// The matching row is seeded by migration and must never be deleted.
pub const DELETED_USER_ID: Uuid = Uuid::nil();

/// User account entity
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub email: String,

    pub password_hash: String,

    pub is_active: bool,

    pub email_verified: bool,

    #[sea_orm(nullable)]
    pub last_login_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    #[allow(clippy::new_ret_no_self)]
    pub fn new(email: String, password_hash: String) -> ActiveModel {
        let now = Utc::now();
        ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email),
            password_hash: Set(password_hash),
            is_active: Set(true),
            email_verified: Set(false),
            last_login_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    pub fn is_deleted_sentinel(&self) -> bool {
        self.id == DELETED_USER_ID
    }
}

/// Claims embedded in access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub user_id: Uuid,
    pub email: String,
    pub is_active: bool,
}

impl From<Model> for UserClaims {
    fn from(user: Model) -> Self {
        Self {
            user_id: user.id,
            email: user.email,
            is_active: user.is_active,
        }
    }
}
