use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DailySelections::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DailySelections::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DailySelections::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(DailySelections::SelectedUserIds)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DailySelections::SelectionDate)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DailySelections::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_daily_selections_user")
                            .from(DailySelections::Table, DailySelections::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_daily_selections_user_date")
                    .table(DailySelections::Table)
                    .col(DailySelections::UserId)
                    .col(DailySelections::SelectionDate)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DailySelections::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum DailySelections {
    Table,
    Id,
    UserId,
    SelectedUserIds,
    SelectionDate,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
