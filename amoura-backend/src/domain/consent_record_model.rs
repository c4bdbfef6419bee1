// amoura-backend/src/domain/consent_record_model.rs

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Versioned consent record.
///
/// History is append-only; for a given user at most one record has
/// `is_active = true`. Recording new consent deactivates the previous
/// active record and inserts a fresh one.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "user_consents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub user_id: Uuid,

    pub data_processing: bool,

    pub marketing: bool,

    pub analytics: bool,

    pub consented_at: DateTime<Utc>,

    #[sea_orm(nullable)]
    pub revoked_at: Option<DateTime<Utc>>,

    pub is_active: bool,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user_model::Entity",
        from = "Column::UserId",
        to = "super::user_model::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Create a new active consent record.
    ///
    /// `marketing` and `analytics` are opt-out by default.
    pub fn new(
        user_id: Uuid,
        data_processing: bool,
        marketing: Option<bool>,
        analytics: Option<bool>,
        consented_at: Option<DateTime<Utc>>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            data_processing,
            marketing: marketing.unwrap_or(false),
            analytics: analytics.unwrap_or(false),
            consented_at: consented_at.unwrap_or(now),
            revoked_at: None,
            is_active: true,
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_consent_is_active() {
        let user_id = Uuid::new_v4();
        let consent = Model::new(user_id, true, None, None, None);

        assert_eq!(consent.user_id, user_id);
        assert!(consent.data_processing);
        assert!(!consent.marketing);
        assert!(!consent.analytics);
        assert!(consent.is_active);
        assert!(consent.revoked_at.is_none());
    }

    #[test]
    fn test_new_consent_honors_explicit_flags() {
        let consented_at = Utc::now() - chrono::Duration::minutes(5);
        let consent = Model::new(Uuid::new_v4(), true, Some(true), Some(false), Some(consented_at));

        assert!(consent.marketing);
        assert!(!consent.analytics);
        assert_eq!(consent.consented_at, consented_at);
    }
}
