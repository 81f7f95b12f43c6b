//! Vehículo simulado con variantes etiquetadas
//!
//! Las variantes llevan capability flags (turbo, carga) en lugar de
//! herencia. Las transiciones de estado validan las mismas reglas que el
//! simulador original: encendido antes de acelerar, parar antes de apagar,
//! capacidad de carga, turbo solo en deportivos.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::schedule::ServiceEntry;

/// Velocidad máxima por defecto (km/h)
pub const DEFAULT_MAX_SPEED: u32 = 200;
/// Por debajo de esta velocidad el turbo se desengancha al frenar
pub const TURBO_MIN_SPEED: u32 = 50;

/// Errores del simulador
#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    #[error("el vehículo ya está encendido")]
    AlreadyOn,
    #[error("el vehículo ya está apagado")]
    AlreadyOff,
    #[error("detén el vehículo antes de apagarlo")]
    StillMoving,
    #[error("el vehículo debe estar encendido")]
    EngineOff,
    #[error("este vehículo no tiene turbo")]
    NoTurbo,
    #[error("el turbo ya está activado")]
    TurboAlreadyOn,
    #[error("el turbo no está activado")]
    TurboNotOn,
    #[error("este vehículo no transporta carga")]
    NoCargoBay,
    #[error("la carga excede la capacidad ({capacity} kg)")]
    CargoOverflow { capacity: u32 },
    #[error("carga insuficiente ({available} kg disponibles)")]
    CargoUnderflow { available: u32 },
    #[error("cantidad inválida")]
    InvalidQuantity,
    #[error("vehículo no encontrado en el garaje")]
    VehicleNotFound,
    #[error("selecciona un vehículo primero")]
    NoSelection,
    #[error("la descripción del servicio es obligatoria")]
    EmptyServiceKind,
    #[error("el costo no puede ser negativo")]
    NegativeCost,
}

/// Tipo de vehículo con sus capacidades
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VehicleKind {
    Car,
    Sports { turbo_on: bool },
    Truck { cargo_capacity: u32, cargo_load: u32 },
}

/// Estado de un vehículo simulado
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimVehicle {
    pub id: String,
    pub model: String,
    pub color: String,
    pub speed: u32,
    pub max_speed: u32,
    pub engine_on: bool,
    #[serde(flatten)]
    pub kind: VehicleKind,
    #[serde(default)]
    pub history: Vec<ServiceEntry>,
}

impl SimVehicle {
    fn new(model: &str, color: &str, max_speed: u32, kind: VehicleKind) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            model: model.to_string(),
            color: color.to_string(),
            speed: 0,
            max_speed,
            engine_on: false,
            kind,
            history: Vec::new(),
        }
    }

    pub fn new_car(model: &str, color: &str) -> Self {
        Self::new(model, color, DEFAULT_MAX_SPEED, VehicleKind::Car)
    }

    pub fn new_sports(model: &str, color: &str) -> Self {
        Self::new(
            model,
            color,
            250,
            VehicleKind::Sports { turbo_on: false },
        )
    }

    pub fn new_truck(model: &str, color: &str, cargo_capacity: u32) -> Self {
        Self::new(
            model,
            color,
            120,
            VehicleKind::Truck {
                cargo_capacity,
                cargo_load: 0,
            },
        )
    }

    pub fn ignite(&mut self) -> Result<(), SimError> {
        if self.engine_on {
            return Err(SimError::AlreadyOn);
        }
        self.engine_on = true;
        self.speed = 0;
        Ok(())
    }

    pub fn shutdown(&mut self) -> Result<(), SimError> {
        if !self.engine_on {
            return Err(SimError::AlreadyOff);
        }
        if self.speed > 0 {
            return Err(SimError::StillMoving);
        }
        self.engine_on = false;
        // El turbo se apaga junto con el motor
        if let VehicleKind::Sports { turbo_on } = &mut self.kind {
            *turbo_on = false;
        }
        Ok(())
    }

    /// Acelerar; la velocidad queda limitada a max_speed
    pub fn accelerate(&mut self, delta: u32) -> Result<u32, SimError> {
        if !self.engine_on {
            return Err(SimError::EngineOff);
        }
        self.speed = (self.speed + delta).min(self.max_speed);
        Ok(self.speed)
    }

    /// Frenar; por debajo de TURBO_MIN_SPEED el turbo se desengancha
    pub fn brake(&mut self, delta: u32) -> u32 {
        self.speed = self.speed.saturating_sub(delta);
        if self.speed < TURBO_MIN_SPEED {
            if let VehicleKind::Sports { turbo_on } = &mut self.kind {
                *turbo_on = false;
            }
        }
        self.speed
    }

    pub fn has_turbo(&self) -> bool {
        matches!(self.kind, VehicleKind::Sports { .. })
    }

    pub fn activate_turbo(&mut self) -> Result<(), SimError> {
        match &mut self.kind {
            VehicleKind::Sports { turbo_on } => {
                if !self.engine_on {
                    return Err(SimError::EngineOff);
                }
                if *turbo_on {
                    return Err(SimError::TurboAlreadyOn);
                }
                *turbo_on = true;
                Ok(())
            }
            _ => Err(SimError::NoTurbo),
        }
    }

    pub fn deactivate_turbo(&mut self) -> Result<(), SimError> {
        match &mut self.kind {
            VehicleKind::Sports { turbo_on } => {
                if !*turbo_on {
                    return Err(SimError::TurboNotOn);
                }
                *turbo_on = false;
                Ok(())
            }
            _ => Err(SimError::NoTurbo),
        }
    }

    pub fn cargo_load(&self) -> Option<u32> {
        match self.kind {
            VehicleKind::Truck { cargo_load, .. } => Some(cargo_load),
            _ => None,
        }
    }

    pub fn load(&mut self, kg: u32) -> Result<u32, SimError> {
        if kg == 0 {
            return Err(SimError::InvalidQuantity);
        }
        match &mut self.kind {
            VehicleKind::Truck {
                cargo_capacity,
                cargo_load,
            } => {
                if *cargo_load + kg > *cargo_capacity {
                    return Err(SimError::CargoOverflow {
                        capacity: *cargo_capacity,
                    });
                }
                *cargo_load += kg;
                Ok(*cargo_load)
            }
            _ => Err(SimError::NoCargoBay),
        }
    }

    pub fn unload(&mut self, kg: u32) -> Result<u32, SimError> {
        if kg == 0 {
            return Err(SimError::InvalidQuantity);
        }
        match &mut self.kind {
            VehicleKind::Truck { cargo_load, .. } => {
                if kg > *cargo_load {
                    return Err(SimError::CargoUnderflow {
                        available: *cargo_load,
                    });
                }
                *cargo_load -= kg;
                Ok(*cargo_load)
            }
            _ => Err(SimError::NoCargoBay),
        }
    }

    /// Añadir un servicio al historial, manteniéndolo ordenado por fecha
    pub fn add_service(&mut self, entry: ServiceEntry) {
        self.history.push(entry);
        self.history.sort_by_key(|e| e.date);
    }

    /// Servicios agendados a partir de hoy
    pub fn upcoming_services(&self, now: DateTime<Utc>) -> impl Iterator<Item = &ServiceEntry> {
        self.history.iter().filter(move |e| e.is_upcoming(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_ignite_and_shutdown() {
        let mut car = SimVehicle::new_car("Uno", "rojo");

        assert_eq!(car.ignite(), Ok(()));
        assert!(car.engine_on);
        assert_eq!(car.ignite(), Err(SimError::AlreadyOn));

        assert_eq!(car.shutdown(), Ok(()));
        assert_eq!(car.shutdown(), Err(SimError::AlreadyOff));
    }

    #[test]
    fn test_cannot_shutdown_while_moving() {
        let mut car = SimVehicle::new_car("Uno", "rojo");
        car.ignite().unwrap();
        car.accelerate(30).unwrap();

        assert_eq!(car.shutdown(), Err(SimError::StillMoving));

        car.brake(30);
        assert_eq!(car.shutdown(), Ok(()));
    }

    #[test]
    fn test_accelerate_requires_engine_and_clamps() {
        let mut car = SimVehicle::new_car("Uno", "rojo");

        assert_eq!(car.accelerate(10), Err(SimError::EngineOff));

        car.ignite().unwrap();
        assert_eq!(car.accelerate(150), Ok(150));
        // No pasa de max_speed
        assert_eq!(car.accelerate(100), Ok(DEFAULT_MAX_SPEED));
    }

    #[test]
    fn test_brake_saturates_at_zero() {
        let mut car = SimVehicle::new_car("Uno", "rojo");
        car.ignite().unwrap();
        car.accelerate(20).unwrap();

        assert_eq!(car.brake(50), 0);
    }

    #[test]
    fn test_turbo_only_on_sports() {
        let mut car = SimVehicle::new_car("Uno", "rojo");
        assert_eq!(car.activate_turbo(), Err(SimError::NoTurbo));

        let mut sports = SimVehicle::new_sports("F40", "rojo");
        assert_eq!(sports.activate_turbo(), Err(SimError::EngineOff));

        sports.ignite().unwrap();
        assert_eq!(sports.activate_turbo(), Ok(()));
        assert_eq!(sports.activate_turbo(), Err(SimError::TurboAlreadyOn));
        assert_eq!(sports.deactivate_turbo(), Ok(()));
        assert_eq!(sports.deactivate_turbo(), Err(SimError::TurboNotOn));
    }

    #[test]
    fn test_turbo_disengages_when_braking_slow() {
        let mut sports = SimVehicle::new_sports("F40", "rojo");
        sports.ignite().unwrap();
        sports.accelerate(100).unwrap();
        sports.activate_turbo().unwrap();

        sports.brake(30); // 70 km/h, sigue activado
        assert_eq!(sports.kind, VehicleKind::Sports { turbo_on: true });

        sports.brake(30); // 40 km/h, se desengancha
        assert_eq!(sports.kind, VehicleKind::Sports { turbo_on: false });
    }

    #[test]
    fn test_turbo_off_on_shutdown() {
        let mut sports = SimVehicle::new_sports("F40", "rojo");
        sports.ignite().unwrap();
        sports.activate_turbo().unwrap();
        sports.shutdown().unwrap();

        assert_eq!(sports.kind, VehicleKind::Sports { turbo_on: false });
    }

    #[test]
    fn test_truck_cargo_limits() {
        let mut truck = SimVehicle::new_truck("Actros", "blanco", 1000);

        assert_eq!(truck.load(0), Err(SimError::InvalidQuantity));
        assert_eq!(truck.load(600), Ok(600));
        assert_eq!(
            truck.load(500),
            Err(SimError::CargoOverflow { capacity: 1000 })
        );
        assert_eq!(truck.unload(200), Ok(400));
        assert_eq!(
            truck.unload(500),
            Err(SimError::CargoUnderflow { available: 400 })
        );

        let mut car = SimVehicle::new_car("Uno", "rojo");
        assert_eq!(car.load(10), Err(SimError::NoCargoBay));
    }

    #[test]
    fn test_history_sorted_by_date() {
        let mut car = SimVehicle::new_car("Uno", "rojo");
        let now = Utc::now();

        let later = ServiceEntry::new(now + Duration::days(30), "revisión", 80.0, "").unwrap();
        let earlier = ServiceEntry::new(now - Duration::days(10), "aceite", 40.0, "").unwrap();
        car.add_service(later);
        car.add_service(earlier);

        assert_eq!(car.history[0].kind, "aceite");
        assert_eq!(car.history[1].kind, "revisión");
        assert_eq!(car.upcoming_services(now).count(), 1);
    }
}
