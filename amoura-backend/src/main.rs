// src/main.rs
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use amoura_backend::api::AppState;
use amoura_backend::config::Config;
use amoura_backend::db::create_db_pool;
use amoura_backend::features::gdpr::handler::gdpr_router;
use amoura_backend::features::gdpr::services::deletion::DeletionService;
use amoura_backend::features::gdpr::services::export::ExportService;
use amoura_backend::features::gdpr::services::GdprService;
use amoura_backend::features::gdpr::worker::{job_channel, GdprWorker};
use amoura_backend::utils::jwt::{JwtConfig, JwtManager};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "amoura_backend=info,tower_http=info".into()),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("Starting Amoura backend server...");

    let config = Config::from_env().expect("Failed to load configuration");

    let db_pool = create_db_pool(&config)
        .await
        .expect("Failed to create database pool");
    tracing::info!("Database pool created successfully.");

    let jwt_manager = Arc::new(
        JwtManager::new(JwtConfig {
            secret_key: config.jwt_secret.clone(),
            access_token_expiry_minutes: config.jwt_expiry_minutes,
            issuer: "amoura-backend".to_string(),
            audience: "amoura-users".to_string(),
        })
        .expect("Invalid JWT configuration"),
    );

    let (jobs, rx) = job_channel();
    let export_service = Arc::new(ExportService::new(
        db_pool.clone(),
        jobs.clone(),
        PathBuf::from(&config.export_dir),
        config.export_base_url.clone(),
    ));
    let deletion_service = Arc::new(DeletionService::new(
        db_pool.clone(),
        jobs.clone(),
        PathBuf::from(&config.export_dir),
    ));
    let gdpr_service = Arc::new(GdprService::new(
        db_pool.clone(),
        export_service.clone(),
        deletion_service.clone(),
    ));

    GdprWorker::new(db_pool, rx, jobs, export_service, deletion_service).spawn();
    tracing::info!("GDPR worker started.");

    let app_state = AppState::new(gdpr_service, jwt_manager);
    let app_router = gdpr_router(app_state).layer(TraceLayer::new_for_http());

    tracing::info!(
        "Router configured. Server listening on {}",
        config.server_addr
    );

    let listener = TcpListener::bind(&config.server_addr).await?;
    axum::serve(listener, app_router.into_make_service()).await?;

    Ok(())
}
