//! Modelo de MaintenanceRecord
//!
//! Registros de mantenimiento asociados a un vehículo. No existen endpoints
//! de update ni delete individual; los registros se eliminan junto con el
//! vehículo.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// MaintenanceRecord - mapea exactamente a la tabla maintenance_records
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MaintenanceRecord {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub description: String,
    pub date: DateTime<Utc>,
    pub cost: Decimal,
    pub odometer: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

/// Request para registrar un mantenimiento
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMaintenanceRequest {
    #[validate(length(min = 1, max = 500))]
    pub description: String,

    /// Si no se informa, se usa la fecha actual
    pub date: Option<DateTime<Utc>>,

    pub cost: Decimal,

    pub odometer: Option<Decimal>,
}

/// Response de registro de mantenimiento
#[derive(Debug, Serialize)]
pub struct MaintenanceResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub description: String,
    pub date: DateTime<Utc>,
    pub cost: Decimal,
    pub odometer: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

impl From<MaintenanceRecord> for MaintenanceResponse {
    fn from(record: MaintenanceRecord) -> Self {
        Self {
            id: record.id,
            vehicle_id: record.vehicle_id,
            description: record.description,
            date: record.date,
            cost: record.cost,
            odometer: record.odometer,
            created_at: record.created_at,
        }
    }
}
