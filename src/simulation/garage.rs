//! Estado del garaje simulado
//!
//! Estado explícito en lugar de variables globales: la lista de vehículos,
//! la selección actual y el despacho de acciones sobre el vehículo
//! seleccionado.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::schedule::ReminderLog;
use super::vehicle::{SimError, SimVehicle};

/// Acciones disponibles sobre el vehículo seleccionado
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GarageAction {
    Ignite,
    Shutdown,
    Accelerate(u32),
    Brake(u32),
    ActivateTurbo,
    DeactivateTurbo,
    Load(u32),
    Unload(u32),
}

/// Garaje con sus vehículos y la selección actual
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Garage {
    pub vehicles: Vec<SimVehicle>,
    #[serde(skip)]
    pub selected: Option<String>,
}

impl Garage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Añadir un vehículo. Ids duplicados se ignoran (pasa al recargar
    /// desde el almacenamiento). Devuelve false si ya existía.
    pub fn add_vehicle(&mut self, vehicle: SimVehicle) -> bool {
        if self.vehicles.iter().any(|v| v.id == vehicle.id) {
            log::warn!(
                "Vehículo con id {} ({}) ya existe en el garaje, saltando",
                vehicle.id,
                vehicle.model
            );
            return false;
        }
        self.vehicles.push(vehicle);
        true
    }

    pub fn select(&mut self, id: &str) -> Result<(), SimError> {
        if !self.vehicles.iter().any(|v| v.id == id) {
            self.selected = None;
            return Err(SimError::VehicleNotFound);
        }
        self.selected = Some(id.to_string());
        Ok(())
    }

    pub fn selected_vehicle(&self) -> Option<&SimVehicle> {
        let id = self.selected.as_deref()?;
        self.vehicles.iter().find(|v| v.id == id)
    }

    fn selected_vehicle_mut(&mut self) -> Option<&mut SimVehicle> {
        let id = self.selected.clone()?;
        self.vehicles.iter_mut().find(|v| v.id == id)
    }

    /// Despachar una acción sobre el vehículo seleccionado
    pub fn interact(&mut self, action: GarageAction) -> Result<(), SimError> {
        let vehicle = self
            .selected_vehicle_mut()
            .ok_or(SimError::NoSelection)?;

        match action {
            GarageAction::Ignite => vehicle.ignite(),
            GarageAction::Shutdown => vehicle.shutdown(),
            GarageAction::Accelerate(delta) => vehicle.accelerate(delta).map(|_| ()),
            GarageAction::Brake(delta) => {
                vehicle.brake(delta);
                Ok(())
            }
            GarageAction::ActivateTurbo => vehicle.activate_turbo(),
            GarageAction::DeactivateTurbo => vehicle.deactivate_turbo(),
            GarageAction::Load(kg) => vehicle.load(kg).map(|_| ()),
            GarageAction::Unload(kg) => vehicle.unload(kg).map(|_| ()),
        }
    }

    /// Sembrar la flota por defecto. Dedup lógico por modelo, para no
    /// duplicar los padrones al recargar.
    pub fn seed_default_fleet(&mut self) {
        let defaults = [
            SimVehicle::new_car("Fusca", "azul"),
            SimVehicle::new_sports("Maverick GT", "negro"),
            SimVehicle::new_truck("Scania R450", "blanco", 5000),
        ];
        for vehicle in defaults {
            if !self.vehicles.iter().any(|v| v.model == vehicle.model) {
                self.add_vehicle(vehicle);
            }
        }
    }

    /// Recordatorios de servicios agendados, uno por (vehículo, fecha)
    pub fn collect_reminders(&self, log: &mut ReminderLog, now: DateTime<Utc>) -> Vec<String> {
        let mut reminders = Vec::new();
        for vehicle in &self.vehicles {
            for entry in vehicle.upcoming_services(now) {
                if log.mark(&vehicle.id, entry.date.date_naive()) {
                    reminders.push(format!(
                        "🔔 {}: {} el {}",
                        vehicle.model,
                        entry.kind,
                        entry.date.format("%Y-%m-%d")
                    ));
                }
            }
        }
        reminders
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::schedule::ServiceEntry;
    use chrono::Duration;

    #[test]
    fn test_add_vehicle_dedups_by_id() {
        let mut garage = Garage::new();
        let car = SimVehicle::new_car("Uno", "rojo");
        let duplicate = car.clone();

        assert!(garage.add_vehicle(car));
        assert!(!garage.add_vehicle(duplicate));
        assert_eq!(garage.vehicles.len(), 1);
    }

    #[test]
    fn test_select_and_interact() {
        let mut garage = Garage::new();
        let car = SimVehicle::new_car("Uno", "rojo");
        let id = car.id.clone();
        garage.add_vehicle(car);

        assert_eq!(
            garage.interact(GarageAction::Ignite),
            Err(SimError::NoSelection)
        );
        assert_eq!(garage.select("no-existe"), Err(SimError::VehicleNotFound));

        garage.select(&id).unwrap();
        assert_eq!(garage.interact(GarageAction::Ignite), Ok(()));
        assert_eq!(garage.interact(GarageAction::Accelerate(30)), Ok(()));
        assert_eq!(garage.selected_vehicle().unwrap().speed, 30);

        // Acción no aplicable al tipo seleccionado
        assert_eq!(
            garage.interact(GarageAction::ActivateTurbo),
            Err(SimError::NoTurbo)
        );
    }

    #[test]
    fn test_seed_default_fleet_is_idempotent() {
        let mut garage = Garage::new();
        garage.seed_default_fleet();
        let count = garage.vehicles.len();
        assert_eq!(count, 3);

        garage.seed_default_fleet();
        assert_eq!(garage.vehicles.len(), count);
    }

    #[test]
    fn test_collect_reminders_dedups() {
        let mut garage = Garage::new();
        let mut car = SimVehicle::new_car("Uno", "rojo");
        let now = Utc::now();
        car.add_service(
            ServiceEntry::new(now + Duration::days(3), "revisión", 60.0, "").unwrap(),
        );
        garage.add_vehicle(car);

        let mut log = ReminderLog::new(100);
        let first = garage.collect_reminders(&mut log, now);
        assert_eq!(first.len(), 1);
        assert!(first[0].contains("Uno"));

        // La segunda pasada no repite el recordatorio
        let second = garage.collect_reminders(&mut log, now);
        assert!(second.is_empty());
    }
}
