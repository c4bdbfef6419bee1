use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Inactive placeholder account that anonymized messages, matches and
        // reports are re-pointed at when the original account is erased. The
        // nil UUID matches the constant used by the application.
        manager
            .exec_stmt(
                Query::insert()
                    .into_table(Users::Table)
                    .columns([
                        Users::Id,
                        Users::Email,
                        Users::PasswordHash,
                        Users::IsActive,
                        Users::EmailVerified,
                        Users::CreatedAt,
                        Users::UpdatedAt,
                    ])
                    .values_panic([
                        Expr::cust("'00000000-0000-0000-0000-000000000000'::uuid"),
                        "deleted-user@system.invalid".into(),
                        // Not a valid hash for any password, so no one can
                        // ever log in as this account.
                        "!".into(),
                        false.into(),
                        false.into(),
                        Expr::cust("now()"),
                        Expr::cust("now()"),
                    ])
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .exec_stmt(
                Query::delete()
                    .from_table(Users::Table)
                    .and_where(
                        Expr::col(Users::Id)
                            .eq(Expr::cust("'00000000-0000-0000-0000-000000000000'::uuid")),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Email,
    PasswordHash,
    IsActive,
    EmailVerified,
    CreatedAt,
    UpdatedAt,
}
