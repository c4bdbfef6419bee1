// migration/src/lib.rs
pub use sea_orm_migration::prelude::*;

// Core tables
mod m20260801_000001_create_users_table;
mod m20260801_000002_create_profiles_table;
mod m20260801_000003_create_matches_table;
mod m20260801_000004_create_messages_table;
mod m20260801_000005_create_subscriptions_table;
mod m20260801_000006_create_daily_selections_table;
mod m20260801_000007_create_push_tokens_table;
mod m20260801_000008_create_notifications_table;
mod m20260801_000009_create_reports_table;

// GDPR tables
mod m20260802_000001_create_user_consents_table;
mod m20260802_000002_create_export_requests_table;
mod m20260802_000003_create_deletion_requests_table;
mod m20260802_000004_create_deleted_user_sentinel;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            // 1. Base table (no dependencies)
            Box::new(m20260801_000001_create_users_table::Migration),
            // 2. Tables referencing users
            Box::new(m20260801_000002_create_profiles_table::Migration),
            Box::new(m20260801_000003_create_matches_table::Migration),
            Box::new(m20260801_000004_create_messages_table::Migration),
            Box::new(m20260801_000005_create_subscriptions_table::Migration),
            Box::new(m20260801_000006_create_daily_selections_table::Migration),
            Box::new(m20260801_000007_create_push_tokens_table::Migration),
            Box::new(m20260801_000008_create_notifications_table::Migration),
            Box::new(m20260801_000009_create_reports_table::Migration),
            // 3. GDPR lifecycle tables
            Box::new(m20260802_000001_create_user_consents_table::Migration),
            Box::new(m20260802_000002_create_export_requests_table::Migration),
            Box::new(m20260802_000003_create_deletion_requests_table::Migration),
            // 4. Anonymization target for erased accounts
            Box::new(m20260802_000004_create_deleted_user_sentinel::Migration),
        ]
    }
}
