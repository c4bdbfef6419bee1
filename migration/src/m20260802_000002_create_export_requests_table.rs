use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ExportRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExportRequests::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ExportRequests::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(ExportRequests::Format)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExportRequests::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(ExportRequests::FileUrl).text())
                    .col(ColumnDef::new(ExportRequests::ErrorMessage).text())
                    .col(ColumnDef::new(ExportRequests::CompletedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(ExportRequests::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExportRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_export_requests_user")
                            .from(ExportRequests::Table, ExportRequests::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_export_requests_user_id")
                    .table(ExportRequests::Table)
                    .col(ExportRequests::UserId)
                    .to_owned(),
            )
            .await?;

        // The worker re-scan filters on status at startup.
        manager
            .create_index(
                Index::create()
                    .name("idx_export_requests_status")
                    .table(ExportRequests::Table)
                    .col(ExportRequests::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ExportRequests::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ExportRequests {
    Table,
    Id,
    UserId,
    Format,
    Status,
    FileUrl,
    ErrorMessage,
    CompletedAt,
    ExpiresAt,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
