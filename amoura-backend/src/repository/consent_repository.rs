// src/repository/consent_repository.rs

use crate::db::DbPool;
use crate::domain::consent_record_model::{self, Entity as ConsentEntity};
use chrono::{DateTime, Utc};
use sea_orm::entity::*;
use sea_orm::sea_query::Expr;
use sea_orm::{
    DbErr, IntoActiveModel, Order, QueryFilter, QueryOrder, TransactionError,
    TransactionTrait,
};
use uuid::Uuid;

pub struct ConsentRepository {
    db: DbPool,
}

impl ConsentRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn find_active_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<consent_record_model::Model>, DbErr> {
        ConsentEntity::find()
            .filter(consent_record_model::Column::UserId.eq(user_id))
            .filter(consent_record_model::Column::IsActive.eq(true))
            .one(self.db.as_ref())
            .await
    }

    /// Full consent history, newest first.
    pub async fn find_all_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<consent_record_model::Model>, DbErr> {
        ConsentEntity::find()
            .filter(consent_record_model::Column::UserId.eq(user_id))
            .order_by(consent_record_model::Column::CreatedAt, Order::Desc)
            .all(self.db.as_ref())
            .await
    }

    /// Persist a new active record, deactivating any previously active one
    /// in the same transaction. Two concurrent calls for the same user
    /// serialize on the row update, so the single-active invariant holds.
    pub async fn record(
        &self,
        record: consent_record_model::Model,
    ) -> Result<consent_record_model::Model, DbErr> {
        let now = Utc::now();
        self.db
            .transaction::<_, consent_record_model::Model, DbErr>(|txn| {
                Box::pin(async move {
                    ConsentEntity::update_many()
                        .col_expr(consent_record_model::Column::IsActive, Expr::value(false))
                        .col_expr(
                            consent_record_model::Column::RevokedAt,
                            Expr::value(Some(now)),
                        )
                        .filter(consent_record_model::Column::UserId.eq(record.user_id))
                        .filter(consent_record_model::Column::IsActive.eq(true))
                        .exec(txn)
                        .await?;

                    record.into_active_model().insert(txn).await
                })
            })
            .await
            .map_err(unwrap_transaction_error)
    }

    /// Deactivate the active record without inserting a new one. Returns the
    /// number of rows touched; zero means there was nothing to revoke.
    pub async fn revoke_active(
        &self,
        user_id: Uuid,
        revoked_at: DateTime<Utc>,
    ) -> Result<u64, DbErr> {
        let result = ConsentEntity::update_many()
            .col_expr(consent_record_model::Column::IsActive, Expr::value(false))
            .col_expr(
                consent_record_model::Column::RevokedAt,
                Expr::value(Some(revoked_at)),
            )
            .filter(consent_record_model::Column::UserId.eq(user_id))
            .filter(consent_record_model::Column::IsActive.eq(true))
            .exec(self.db.as_ref())
            .await?;

        Ok(result.rows_affected)
    }
}

fn unwrap_transaction_error(err: TransactionError<DbErr>) -> DbErr {
    match err {
        TransactionError::Connection(e) => e,
        TransactionError::Transaction(e) => e,
    }
}
