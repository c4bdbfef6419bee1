// src/db.rs
use crate::config::Config;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::sync::Arc;
use std::time::Duration;

// Shared behind Arc so handles stay cloneable regardless of which sea-orm
// features are enabled (the mock backend's connection is not Clone).
pub type DbPool = Arc<DatabaseConnection>;

pub async fn create_db_pool(config: &Config) -> Result<DbPool, DbErr> {
    let mut opt = ConnectOptions::new(config.database_url.clone());

    opt.max_connections(100)
        .min_connections(5)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(8))
        .max_lifetime(Duration::from_secs(8 * 60));

    Ok(Arc::new(Database::connect(opt).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[test]
    fn test_pool_handles_are_cloneable_over_the_mock_backend() {
        let pool: DbPool = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
        );
        let handle = pool.clone();
        assert!(Arc::ptr_eq(&pool, &handle));
    }
}
