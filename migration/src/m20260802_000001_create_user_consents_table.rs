use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserConsents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserConsents::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserConsents::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(UserConsents::DataProcessing)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(UserConsents::Marketing)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(UserConsents::Analytics)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(UserConsents::ConsentedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(UserConsents::RevokedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(UserConsents::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(UserConsents::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_consents_user")
                            .from(UserConsents::Table, UserConsents::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_consents_user_id")
                    .table(UserConsents::Table)
                    .col(UserConsents::UserId)
                    .to_owned(),
            )
            .await?;

        // Database-level backstop for the single-active-record rule.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX idx_user_consents_single_active \
                 ON user_consents (user_id) WHERE is_active",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserConsents::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum UserConsents {
    Table,
    Id,
    UserId,
    DataProcessing,
    Marketing,
    Analytics,
    ConsentedAt,
    RevokedAt,
    IsActive,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
