use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::maintenance_controller::MaintenanceController;
use crate::controllers::vehicle_controller::VehicleController;
use crate::middleware::auth::{auth_middleware, AuthenticatedUser};
use crate::middleware::rate_limit::strict_rate_limit_middleware;
use crate::models::maintenance::{CreateMaintenanceRequest, MaintenanceResponse};
use crate::models::response::ApiResponse;
use crate::models::vehicle::{
    CreateVehicleRequest, ShareVehicleRequest, UnshareVehicleRequest, VehicleResponse,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router(state: &AppState) -> Router<AppState> {
    // Los endpoints de creación llevan además el límite estricto
    let creation = Router::new()
        .route("/", post(create_vehicle))
        .route("/:id/share", post(share_vehicle))
        .route("/:id/maintenance", post(create_maintenance))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            strict_rate_limit_middleware,
        ));

    Router::new()
        .route("/", get(list_vehicles))
        .route("/:id", delete(delete_vehicle))
        .route("/:id/unshare", post(unshare_vehicle))
        .route("/:id/maintenance", get(list_maintenance))
        .merge(creation)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VehicleResponse>>), AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.create(&user, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_vehicles(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.list(user.user_id).await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    controller.delete(user.user_id, id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Vehículo eliminado exitosamente"
    })))
}

async fn share_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<ShareVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.share(user.user_id, id, request).await?;
    Ok(Json(response))
}

async fn unshare_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UnshareVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.unshare(user.user_id, id, request).await?;
    Ok(Json(response))
}

async fn create_maintenance(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<CreateMaintenanceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MaintenanceResponse>>), AppError> {
    let controller = MaintenanceController::new(state.pool.clone());
    let response = controller.create(user.user_id, id, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_maintenance(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<MaintenanceResponse>>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone());
    let response = controller.list(user.user_id, id).await?;
    Ok(Json(response))
}
