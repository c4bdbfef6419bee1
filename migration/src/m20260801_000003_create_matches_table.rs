use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // No Cascade here: account erasure anonymizes match sides to the
        // sentinel user instead of deleting the rows.
        manager
            .create_table(
                Table::create()
                    .table(Matches::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Matches::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Matches::User1Id).uuid().not_null())
                    .col(ColumnDef::new(Matches::User2Id).uuid().not_null())
                    .col(
                        ColumnDef::new(Matches::MatchedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Matches::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matches_user1")
                            .from(Matches::Table, Matches::User1Id)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matches_user2")
                            .from(Matches::Table, Matches::User2Id)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_matches_user1_id")
                    .table(Matches::Table)
                    .col(Matches::User1Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_matches_user2_id")
                    .table(Matches::Table)
                    .col(Matches::User2Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Matches::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Matches {
    Table,
    Id,
    User1Id,
    User2Id,
    MatchedAt,
    IsActive,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
