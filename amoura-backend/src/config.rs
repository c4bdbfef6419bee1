// src/config.rs
use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,
    /// Directory where export artifacts are written.
    pub export_dir: String,
    /// Public base URL under which export artifacts are served.
    pub export_base_url: String,
    pub jwt_secret: String,
    pub jwt_expiry_minutes: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv().ok(); // .env ファイルを読み込む (存在しなくてもエラーにしない)

        let database_url = env::var("DATABASE_URL")?;
        let server_addr = env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let export_dir = env::var("EXPORT_DIR").unwrap_or_else(|_| "./exports".to_string());
        let export_base_url = env::var("EXPORT_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000/exports".to_string());
        let jwt_secret = env::var("JWT_SECRET")?;
        let jwt_expiry_minutes = env::var("JWT_EXPIRY_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(15);

        Ok(Config {
            database_url,
            server_addr,
            export_dir,
            export_base_url,
            jwt_secret,
            jwt_expiry_minutes,
        })
    }
}
