use crate::{error::ApiError, state::AppState};
use axum::{
    extract::{rejection::JsonRejection, OriginalUri, State},
    http::StatusCode,
    response::Json,
};
use serde_json::Value;
use tracing::{debug, info};
use userapi_core::{ApiResponse, HealthStatus, MemoryUsage, NewUser, ServiceInfo, User};

pub const USER_CREATED_MESSAGE: &str = "User created successfully";

pub async fn root(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(ServiceInfo::current(state.config.environment.clone()))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus::healthy(state.uptime(), MemoryUsage::sample()))
}

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<User>>>, ApiError> {
    let users = state
        .users
        .list()
        .await
        .map_err(|e| ApiError::from_core(e, state.diagnostics()))?;

    Ok(Json(ApiResponse::list(users)))
}

/// Bodies that are absent or not JSON are validated as an empty object.
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), ApiError> {
    let body = match body {
        Ok(Json(value)) => value,
        Err(rejection) => {
            debug!("Unreadable create-user body: {}", rejection);
            Value::Object(Default::default())
        }
    };

    let new_user =
        NewUser::from_json(&body).map_err(|e| ApiError::from_core(e, state.diagnostics()))?;

    let user = state
        .users
        .create(new_user)
        .await
        .map_err(|e| ApiError::from_core(e, state.diagnostics()))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(user).with_message(USER_CREATED_MESSAGE)),
    ))
}

pub async fn not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    info!("No route for {}", path);
    ApiError::NotFound { path }
}
