//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y sus DTOs para CRUD operations
//! y para compartir vehículos entre usuarios. Mapea exactamente al schema
//! PostgreSQL (shared_with como uuid[]).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::user::UserSummary;

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub plate: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub color: Option<String>,
    pub owner_id: Uuid,
    pub shared_with: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Request para crear un nuevo vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(custom = "crate::utils::validation::validate_license_plate")]
    pub plate: String,

    #[validate(length(min = 1, max = 100))]
    pub make: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,

    #[validate(length(min = 1, max = 50))]
    pub color: Option<String>,
}

/// Request para compartir un vehículo con otro usuario por email
#[derive(Debug, Deserialize, Validate)]
pub struct ShareVehicleRequest {
    #[validate(email)]
    pub email: String,
}

/// Request para dejar de compartir un vehículo
#[derive(Debug, Deserialize)]
pub struct UnshareVehicleRequest {
    pub user_id: Uuid,
}

/// Response de vehículo con las identidades resueltas a email
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub plate: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub color: Option<String>,
    pub owner: UserSummary,
    pub shared_with: Vec<UserSummary>,
    pub created_at: DateTime<Utc>,
}

impl VehicleResponse {
    /// Construir la response a partir del documento y las identidades resueltas
    pub fn from_parts(vehicle: Vehicle, owner: UserSummary, shared_with: Vec<UserSummary>) -> Self {
        Self {
            id: vehicle.id,
            plate: vehicle.plate,
            make: vehicle.make,
            model: vehicle.model,
            year: vehicle.year,
            color: vehicle.color,
            owner,
            shared_with,
            created_at: vehicle.created_at,
        }
    }
}
