use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Deliberately no foreign key on user_id: this row must outlive the
        // user it describes.
        manager
            .create_table(
                Table::create()
                    .table(DeletionRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DeletionRequests::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DeletionRequests::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(DeletionRequests::UserEmail)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DeletionRequests::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(DeletionRequests::Reason).text())
                    .col(ColumnDef::new(DeletionRequests::MessagesAnonymized).big_integer())
                    .col(ColumnDef::new(DeletionRequests::MatchesAnonymized).big_integer())
                    .col(ColumnDef::new(DeletionRequests::ReportsAnonymized).big_integer())
                    .col(
                        ColumnDef::new(DeletionRequests::DataExported)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(DeletionRequests::RequestedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DeletionRequests::CompletedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(DeletionRequests::ErrorMessage).text())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_deletion_requests_user_id")
                    .table(DeletionRequests::Table)
                    .col(DeletionRequests::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_deletion_requests_status")
                    .table(DeletionRequests::Table)
                    .col(DeletionRequests::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DeletionRequests::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum DeletionRequests {
    Table,
    Id,
    UserId,
    UserEmail,
    Status,
    Reason,
    MessagesAnonymized,
    MatchesAnonymized,
    ReportsAnonymized,
    DataExported,
    RequestedAt,
    CompletedAt,
    ErrorMessage,
}
