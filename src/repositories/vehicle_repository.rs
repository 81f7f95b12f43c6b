use crate::models::vehicle::Vehicle;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        owner_id: Uuid,
        plate: String,
        make: String,
        model: String,
        year: i32,
        color: Option<String>,
    ) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, plate, make, model, year, color, owner_id, shared_with, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, '{}', NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(plate)
        .bind(make)
        .bind(model)
        .bind(year)
        .bind(color)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    /// Vehículos visibles para un usuario: propios o compartidos con él
    pub async fn find_visible_to(&self, user_id: Uuid) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT * FROM vehicles
            WHERE owner_id = $1 OR $1 = ANY(shared_with)
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    pub async fn plate_exists(&self, plate: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehicles WHERE plate = $1)")
                .bind(plate)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    /// Añadir un usuario a shared_with de forma atómica.
    ///
    /// El append y el chequeo de duplicado van en un único statement
    /// (array_append condicionado), sin ventana read-then-write entre
    /// requests concurrentes sobre el mismo vehículo. Devuelve None si el
    /// usuario ya estaba en shared_with.
    pub async fn share(&self, vehicle_id: Uuid, user_id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET shared_with = array_append(shared_with, $2)
            WHERE id = $1 AND NOT ($2 = ANY(shared_with))
            RETURNING *
            "#,
        )
        .bind(vehicle_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    /// Quitar un usuario de shared_with. Idempotente: si el usuario no
    /// estaba compartido, el update no cambia nada y no es un error.
    pub async fn unshare(&self, vehicle_id: Uuid, user_id: Uuid) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET shared_with = array_remove(shared_with, $2)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(vehicle_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        Ok(vehicle)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
