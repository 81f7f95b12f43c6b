use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::middleware::auth::AuthenticatedUser;
use crate::models::response::ApiResponse;
use crate::models::user::UserSummary;
use crate::models::vehicle::{
    CreateVehicleRequest, ShareVehicleRequest, UnshareVehicleRequest, Vehicle, VehicleResponse,
};
use crate::repositories::maintenance_repository::MaintenanceRepository;
use crate::repositories::user_repository::UserRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::authorization_service;
use crate::utils::errors::AppError;

pub struct VehicleController {
    vehicles: VehicleRepository,
    users: UserRepository,
    maintenance: MaintenanceRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            vehicles: VehicleRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            maintenance: MaintenanceRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        caller: &AuthenticatedUser,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate().map_err(AppError::Validation)?;

        if self.vehicles.plate_exists(&request.plate).await? {
            return Err(AppError::Conflict(
                "Ya existe un vehículo con esa matrícula".to_string(),
            ));
        }

        let vehicle = self
            .vehicles
            .create(
                caller.user_id,
                request.plate,
                request.make,
                request.model,
                request.year,
                request.color,
            )
            .await?;

        let owner = UserSummary {
            id: caller.user_id,
            email: caller.email.clone(),
        };
        let response = VehicleResponse::from_parts(vehicle, owner, vec![]);

        Ok(ApiResponse::success_with_message(
            response,
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    /// Vehículos visibles para el caller (propios + compartidos), con las
    /// identidades de owner/shared_with resueltas a email
    pub async fn list(&self, caller_id: Uuid) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self.vehicles.find_visible_to(caller_id).await?;

        // Resolver todos los emails en una sola query
        let mut ids: Vec<Uuid> = Vec::new();
        for vehicle in &vehicles {
            ids.push(vehicle.owner_id);
            ids.extend(&vehicle.shared_with);
        }
        ids.sort();
        ids.dedup();
        let emails = self.resolve_emails(&ids).await?;

        let responses = vehicles
            .into_iter()
            .map(|v| Self::build_response(v, &emails))
            .collect();

        Ok(responses)
    }

    pub async fn delete(&self, caller_id: Uuid, vehicle_id: Uuid) -> Result<(), AppError> {
        let vehicle = self
            .vehicles
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        authorization_service::ensure_owner(&vehicle, caller_id, "eliminar el vehículo")?;

        // Los registros de mantenimiento se van junto con el vehículo
        let removed = self.maintenance.delete_by_vehicle(vehicle_id).await?;
        self.vehicles.delete(vehicle_id).await?;
        tracing::info!(
            "🗑️  Vehículo {} eliminado ({} registros de mantenimiento)",
            vehicle.plate,
            removed
        );

        Ok(())
    }

    pub async fn share(
        &self,
        caller_id: Uuid,
        vehicle_id: Uuid,
        request: ShareVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate().map_err(AppError::Validation)?;

        let vehicle = self
            .vehicles
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        authorization_service::ensure_owner(&vehicle, caller_id, "compartir el vehículo")?;

        let target = self
            .users
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::NotFound("No existe ningún usuario con ese email".to_string()))?;

        authorization_service::ensure_shareable(&vehicle, &target)?;

        // El update es atómico; None significa que otra request compartió antes
        let updated = self
            .vehicles
            .share(vehicle_id, target.id)
            .await?
            .ok_or_else(|| {
                AppError::Conflict("El vehículo ya está compartido con este usuario".to_string())
            })?;

        let response = self.resolve_single(updated).await?;
        Ok(ApiResponse::success_with_message(
            response,
            format!("Vehículo compartido con {}", target.email),
        ))
    }

    pub async fn unshare(
        &self,
        caller_id: Uuid,
        vehicle_id: Uuid,
        request: UnshareVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        let vehicle = self
            .vehicles
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        authorization_service::ensure_owner(&vehicle, caller_id, "dejar de compartir el vehículo")?;

        // Idempotente: quitar un usuario no compartido no es un error
        let updated = self.vehicles.unshare(vehicle_id, request.user_id).await?;

        let response = self.resolve_single(updated).await?;
        Ok(ApiResponse::success_with_message(
            response,
            "Vehículo dejado de compartir".to_string(),
        ))
    }

    async fn resolve_single(&self, vehicle: Vehicle) -> Result<VehicleResponse, AppError> {
        let mut ids = vec![vehicle.owner_id];
        ids.extend(&vehicle.shared_with);
        let emails = self.resolve_emails(&ids).await?;
        Ok(Self::build_response(vehicle, &emails))
    }

    async fn resolve_emails(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, String>, AppError> {
        let users = self.users.find_by_ids(ids).await?;
        Ok(users.into_iter().map(|u| (u.id, u.email)).collect())
    }

    fn build_response(vehicle: Vehicle, emails: &HashMap<Uuid, String>) -> VehicleResponse {
        let owner = UserSummary {
            id: vehicle.owner_id,
            email: emails.get(&vehicle.owner_id).cloned().unwrap_or_default(),
        };
        // Ids sin usuario correspondiente se omiten de la lista resuelta
        let shared_with = vehicle
            .shared_with
            .iter()
            .filter_map(|id| {
                emails.get(id).map(|email| UserSummary {
                    id: *id,
                    email: email.clone(),
                })
            })
            .collect();

        VehicleResponse::from_parts(vehicle, owner, shared_with)
    }
}
