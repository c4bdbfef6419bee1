// amoura-backend/src/features/gdpr/handler.rs

use crate::api::dto::common::ApiResponse;
use crate::api::AppState;
use crate::error::{AppError, AppResult};
use crate::features::gdpr::dto::{
    ConsentRequest, ConsentResponse, CreateExportRequest, DeleteAccountRequest,
    DeletionRequestResponse, ExportRequestResponse,
};
use crate::features::gdpr::AuditContext;
use crate::middleware::auth::AuthenticatedUser;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use uuid::Uuid;
use validator::Validate;

/// Request an export of everything the system holds about the caller. A body
/// that does not deserialize (unknown format, malformed JSON) is answered
/// with the unified 400 validation envelope, not axum's plain-text rejection.
pub async fn request_data_export_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    request: Result<Json<CreateExportRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<ExportRequestResponse>>> {
    let Json(request) = request.map_err(|e| AppError::ValidationError(e.body_text()))?;
    let ctx = AuditContext::new(user.user_id());
    let response = app_state
        .gdpr_service
        .request_data_export(&ctx, request.format)
        .await?;

    Ok(Json(ApiResponse::success(
        "Data export requested successfully",
        response,
    )))
}

/// List the caller's export requests, newest first.
pub async fn list_export_requests_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<Json<ApiResponse<Vec<ExportRequestResponse>>>> {
    let responses = app_state
        .gdpr_service
        .list_export_requests(user.user_id())
        .await?;

    Ok(Json(ApiResponse::success(
        "Export requests retrieved successfully",
        responses,
    )))
}

/// Poll one export request by id.
pub async fn get_export_request_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(request_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ExportRequestResponse>>> {
    let response = app_state
        .gdpr_service
        .get_export_request(user.user_id(), request_id)
        .await?;

    Ok(Json(ApiResponse::success(
        "Export request retrieved successfully",
        response,
    )))
}

/// Request deletion of the caller's account. The body is optional; a reason
/// may be supplied for the audit record.
pub async fn request_account_deletion_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    request: Option<Json<DeleteAccountRequest>>,
) -> AppResult<Json<ApiResponse<DeletionRequestResponse>>> {
    let reason = match request {
        Some(Json(request)) => {
            request.validate().map_err(AppError::ValidationFailure)?;
            request.reason
        }
        None => None,
    };

    let ctx = AuditContext::new(user.user_id());
    let response = app_state
        .gdpr_service
        .request_account_deletion(&ctx, reason)
        .await?;

    Ok(Json(ApiResponse::success(
        "Account deletion requested successfully",
        response,
    )))
}

/// Poll one deletion request by id. This stays answerable after the account
/// itself is gone, because the request row outlives the user.
pub async fn get_deletion_request_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(request_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<DeletionRequestResponse>>> {
    let response = app_state
        .gdpr_service
        .get_deletion_request(user.user_id(), request_id)
        .await?;

    Ok(Json(ApiResponse::success(
        "Deletion request retrieved successfully",
        response,
    )))
}

/// Record a new consent statement for the caller.
pub async fn record_consent_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<ConsentRequest>,
) -> AppResult<Json<ApiResponse<ConsentResponse>>> {
    let ctx = AuditContext::new(user.user_id());
    let response = app_state.gdpr_service.record_consent(&ctx, request).await?;

    Ok(Json(ApiResponse::success(
        "Consent recorded successfully",
        response,
    )))
}

/// Current active consent for the caller. `data` is `null` when no record is
/// active; absence means full opt-out and is not an error.
pub async fn get_current_consent_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<Json<ApiResponse<Option<ConsentResponse>>>> {
    let response = app_state
        .gdpr_service
        .get_current_consent(user.user_id())
        .await?;

    Ok(Json(ApiResponse::success(
        "Consent retrieved successfully",
        response,
    )))
}

/// Revoke the caller's active consent. Revoking with nothing active is not
/// an error.
pub async fn revoke_consent_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<Json<ApiResponse<()>>> {
    let ctx = AuditContext::new(user.user_id());
    let revoked = app_state.gdpr_service.revoke_consent(&ctx).await?;

    let message = if revoked {
        "Consent revoked successfully"
    } else {
        "No active consent to revoke"
    };
    Ok(Json(ApiResponse::<()>::success_message(message)))
}

/// Full consent history for the caller, newest first.
pub async fn get_consent_history_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<Json<ApiResponse<Vec<ConsentResponse>>>> {
    let responses = app_state
        .gdpr_service
        .get_consent_history(user.user_id())
        .await?;

    Ok(Json(ApiResponse::success(
        "Consent history retrieved successfully",
        responses,
    )))
}

/// GDPR router
pub fn gdpr_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/gdpr/export-data",
            post(request_data_export_handler).get(list_export_requests_handler),
        )
        .route("/gdpr/export-data/{request_id}", get(get_export_request_handler))
        .route(
            "/gdpr/delete-account",
            delete(request_account_deletion_handler),
        )
        .route(
            "/gdpr/delete-account/{request_id}",
            get(get_deletion_request_handler),
        )
        .route(
            "/gdpr/consent",
            post(record_consent_handler)
                .get(get_current_consent_handler)
                .delete(revoke_consent_handler),
        )
        .route("/gdpr/consent/history", get(get_consent_history_handler))
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user_model::UserClaims;
    use crate::features::gdpr::services::deletion::DeletionService;
    use crate::features::gdpr::services::export::ExportService;
    use crate::features::gdpr::services::GdprService;
    use crate::features::gdpr::worker::job_channel;
    use crate::utils::jwt::{JwtConfig, JwtManager};
    use axum::handler::Handler;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::path::PathBuf;
    use std::sync::Arc;

    fn mock_db() -> crate::db::DbPool {
        Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
    }

    fn test_state() -> (AppState, String) {
        let (jobs, _rx) = job_channel();
        let export_service = Arc::new(ExportService::new(
            mock_db(),
            jobs.clone(),
            PathBuf::from("/tmp/amoura-exports"),
            "http://localhost:3000/exports".to_string(),
        ));
        let deletion_service = Arc::new(DeletionService::new(
            mock_db(),
            jobs,
            PathBuf::from("/tmp/amoura-exports"),
        ));
        let gdpr_service = Arc::new(GdprService::new(mock_db(), export_service, deletion_service));
        let jwt_manager = Arc::new(
            JwtManager::new(JwtConfig {
                secret_key: "0123456789abcdef0123456789abcdef".to_string(),
                access_token_expiry_minutes: 15,
                issuer: "amoura-backend".to_string(),
                audience: "amoura-users".to_string(),
            })
            .unwrap(),
        );
        let token = jwt_manager
            .generate_access_token(UserClaims {
                user_id: Uuid::new_v4(),
                email: "alice@example.com".to_string(),
                is_active: true,
            })
            .unwrap();

        (AppState::new(gdpr_service, jwt_manager), token)
    }

    #[tokio::test]
    async fn test_unknown_export_format_yields_validation_envelope() {
        let (state, token) = test_state();
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/gdpr/export-data")
            .header("authorization", format!("Bearer {token}"))
            .header("content-type", "application/json")
            .body(axum::body::Body::from(r#"{"format":"xml"}"#))
            .unwrap();

        let response = request_data_export_handler.call(request, state).await;

        assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error_type"], "validation_error");
    }
}
