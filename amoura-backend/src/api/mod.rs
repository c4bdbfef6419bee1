// amoura-backend/src/api/mod.rs

use crate::features::gdpr::services::GdprService;
use crate::utils::jwt::JwtManager;
use std::sync::Arc;

pub mod dto;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub gdpr_service: Arc<GdprService>,
    pub jwt_manager: Arc<JwtManager>,
}

impl AppState {
    pub fn new(gdpr_service: Arc<GdprService>, jwt_manager: Arc<JwtManager>) -> Self {
        Self {
            gdpr_service,
            jwt_manager,
        }
    }
}
