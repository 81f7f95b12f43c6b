use crate::models::maintenance::MaintenanceRecord;
use crate::utils::errors::AppError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

pub struct MaintenanceRepository {
    pool: PgPool,
}

impl MaintenanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        vehicle_id: Uuid,
        description: String,
        date: DateTime<Utc>,
        cost: Decimal,
        odometer: Option<Decimal>,
    ) -> Result<MaintenanceRecord, AppError> {
        let record = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            INSERT INTO maintenance_records (id, vehicle_id, description, date, cost, odometer, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(vehicle_id)
        .bind(description)
        .bind(date)
        .bind(cost)
        .bind(odometer)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    /// Historial de un vehículo, más reciente primero
    pub async fn find_by_vehicle(&self, vehicle_id: Uuid) -> Result<Vec<MaintenanceRecord>, AppError> {
        let records = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            SELECT * FROM maintenance_records
            WHERE vehicle_id = $1
            ORDER BY date DESC
            "#,
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Eliminar los registros de un vehículo (se usa al eliminar el vehículo)
    pub async fn delete_by_vehicle(&self, vehicle_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM maintenance_records WHERE vehicle_id = $1")
            .bind(vehicle_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
