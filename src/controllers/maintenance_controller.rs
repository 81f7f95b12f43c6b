use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::models::maintenance::{CreateMaintenanceRequest, MaintenanceResponse};
use crate::models::response::ApiResponse;
use crate::repositories::maintenance_repository::MaintenanceRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::authorization_service;
use crate::utils::errors::AppError;
use crate::utils::validation::validate_non_negative;

pub struct MaintenanceController {
    vehicles: VehicleRepository,
    maintenance: MaintenanceRepository,
}

impl MaintenanceController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            vehicles: VehicleRepository::new(pool.clone()),
            maintenance: MaintenanceRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        caller_id: Uuid,
        vehicle_id: Uuid,
        request: CreateMaintenanceRequest,
    ) -> Result<ApiResponse<MaintenanceResponse>, AppError> {
        request.validate().map_err(AppError::Validation)?;

        validate_non_negative(request.cost)
            .map_err(|_| AppError::ValidationError("El costo no puede ser negativo".to_string()))?;

        if let Some(odometer) = request.odometer {
            validate_non_negative(odometer).map_err(|_| {
                AppError::ValidationError("El kilometraje no puede ser negativo".to_string())
            })?;
        }

        let vehicle = self
            .vehicles
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        // Solo el propietario; los usuarios compartidos no tienen acceso
        // al historial de mantenimiento
        authorization_service::ensure_owner(&vehicle, caller_id, "registrar mantenimientos")?;

        let record = self
            .maintenance
            .create(
                vehicle_id,
                request.description,
                request.date.unwrap_or_else(Utc::now),
                request.cost,
                request.odometer,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            record.into(),
            "Mantenimiento registrado exitosamente".to_string(),
        ))
    }

    pub async fn list(
        &self,
        caller_id: Uuid,
        vehicle_id: Uuid,
    ) -> Result<Vec<MaintenanceResponse>, AppError> {
        let vehicle = self
            .vehicles
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        authorization_service::ensure_owner(&vehicle, caller_id, "ver el historial de mantenimiento")?;

        let records = self.maintenance.find_by_vehicle(vehicle_id).await?;

        Ok(records.into_iter().map(Into::into).collect())
    }
}
