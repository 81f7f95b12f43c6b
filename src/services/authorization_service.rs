//! Reglas de autorización sobre vehículos
//!
//! Decide, por request, si la identidad autenticada puede leer o mutar un
//! vehículo o sus registros de mantenimiento. Las decisiones se calculan
//! siempre sobre el estado actual de los documentos; no hay caching.
//!
//! Reglas:
//! - Listar/ver: propietario o usuario compartido.
//! - Eliminar, compartir, dejar de compartir, mantenimiento: solo propietario.
//! - Compartir: el target no puede ser el propietario (self-share) ni estar
//!   ya en shared_with.

use uuid::Uuid;

use crate::models::user::User;
use crate::models::vehicle::Vehicle;
use crate::utils::errors::{AppError, AppResult};

/// Visibilidad de un vehículo: propietario o compartido
pub fn can_view(vehicle: &Vehicle, caller_id: Uuid) -> bool {
    vehicle.owner_id == caller_id || vehicle.shared_with.contains(&caller_id)
}

/// Verificar que el caller es el propietario del vehículo
pub fn ensure_owner(vehicle: &Vehicle, caller_id: Uuid, action: &str) -> AppResult<()> {
    if vehicle.owner_id != caller_id {
        return Err(AppError::Forbidden(format!(
            "Solo el propietario puede {}",
            action
        )));
    }
    Ok(())
}

/// Verificar que el target es válido para compartir el vehículo
pub fn ensure_shareable(vehicle: &Vehicle, target: &User) -> AppResult<()> {
    if target.id == vehicle.owner_id {
        return Err(AppError::BadRequest(
            "No puedes compartir un vehículo contigo mismo".to_string(),
        ));
    }
    if vehicle.shared_with.contains(&target.id) {
        return Err(AppError::Conflict(
            "El vehículo ya está compartido con este usuario".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn vehicle(owner_id: Uuid, shared_with: Vec<Uuid>) -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            plate: "ABC123".to_string(),
            make: "Fiat".to_string(),
            model: "Uno".to_string(),
            year: 2018,
            color: Some("rojo".to_string()),
            owner_id,
            shared_with,
            created_at: Utc::now(),
        }
    }

    fn user(id: Uuid, email: &str) -> User {
        User {
            id,
            email: email.to_string(),
            password_hash: "$2b$12$hash".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_can_view_owner_and_shared() {
        let owner = Uuid::new_v4();
        let shared = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let v = vehicle(owner, vec![shared]);

        // visible sii owner o compartido
        assert!(can_view(&v, owner));
        assert!(can_view(&v, shared));
        assert!(!can_view(&v, stranger));
    }

    #[test]
    fn test_ensure_owner_rejects_shared_user() {
        let owner = Uuid::new_v4();
        let shared = Uuid::new_v4();
        let v = vehicle(owner, vec![shared]);

        assert!(ensure_owner(&v, owner, "eliminar el vehículo").is_ok());

        // un usuario compartido NO puede mutar
        let err = ensure_owner(&v, shared, "eliminar el vehículo").unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn test_ensure_shareable_rejects_self_share() {
        let owner = Uuid::new_v4();
        let v = vehicle(owner, vec![]);
        let target = user(owner, "a@x.com");

        let err = ensure_shareable(&v, &target).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_ensure_shareable_rejects_duplicate() {
        let owner = Uuid::new_v4();
        let target_id = Uuid::new_v4();
        let v = vehicle(owner, vec![target_id]);
        let target = user(target_id, "b@x.com");

        let err = ensure_shareable(&v, &target).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn test_ensure_shareable_accepts_new_target() {
        let owner = Uuid::new_v4();
        let v = vehicle(owner, vec![Uuid::new_v4()]);
        let target = user(Uuid::new_v4(), "c@x.com");

        assert!(ensure_shareable(&v, &target).is_ok());
    }
}
