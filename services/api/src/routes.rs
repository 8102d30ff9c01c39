//! API service routes

use axum::{
    Extension, Json, Router,
    extract::{State, rejection::JsonRejection},
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::{
    error::{ApiError, ApiResult},
    middleware::{Principal, auth_middleware},
    models::{OnboardRequest, OnboardResponse},
    state::AppState,
    validation::validate_interest_ids,
};

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/api/users/onboard", post(onboard))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/interests", get(list_interests))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "onboarding-api"
    }))
}

/// List every interest, sorted by name
pub async fn list_interests(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let interests = state
        .interest_repository
        .list_by_name()
        .await
        .map_err(|e| {
            error!("Failed to fetch interests: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(interests))
}

/// Record the interests picked during onboarding and mark the user onboarded
pub async fn onboard(
    State(state): State<AppState>,
    principal: Option<Extension<Principal>>,
    payload: Result<Json<OnboardRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Some(Extension(principal)) = principal else {
        warn!("Onboarding request without an authenticated principal");
        return Err(ApiError::Unauthorized);
    };

    let Json(payload) = payload.map_err(|e| {
        warn!(
            "Rejected onboarding payload from {}: {}",
            principal.id(),
            e.body_text()
        );
        ApiError::BadRequest("interestIds must be a non-empty array of strings".to_string())
    })?;

    let interest_ids = validate_interest_ids(&payload.interest_ids).map_err(|msg| {
        warn!("Rejected onboarding payload from {}: {}", principal.id(), msg);
        ApiError::BadRequest(msg)
    })?;

    let outcome = state
        .user_repository
        .complete_onboarding(principal.id(), &interest_ids)
        .await
        .map_err(|e| {
            error!("Onboarding failed for {}: {}", principal.id(), e);
            ApiError::from(e)
        })?;

    info!(
        "Onboarded {} as {} (user created: {}, new interests: {})",
        principal.id(),
        outcome.user.username,
        outcome.user_created,
        outcome.interests_linked
    );

    Ok(Json(OnboardResponse { success: true }))
}
