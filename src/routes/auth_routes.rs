use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::post,
    Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::middleware::rate_limit::strict_rate_limit_middleware;
use crate::models::response::ApiResponse;
use crate::models::user::{LoginRequest, LoginResponse, RegisterRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_auth_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/register",
            post(register).layer(axum::middleware::from_fn_with_state(
                state.clone(),
                strict_rate_limit_middleware,
            )),
        )
        .route("/login", post(login))
}

async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<()>>), AppError> {
    let controller = AuthController::new(state.pool.clone(), state.config.clone());
    let response = controller.register(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let controller = AuthController::new(state.pool.clone(), state.config.clone());
    let response = controller.login(request).await?;
    Ok(Json(response))
}
