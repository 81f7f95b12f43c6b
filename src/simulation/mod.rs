//! Simulador de vehículos
//!
//! Port del simulador del cliente: vehículos con variantes etiquetadas
//! (coche, deportivo con turbo, camión con carga), un estado de garaje
//! explícito, recordatorios de mantenimiento con dedup acotado y
//! persistencia local en JSON. Es independiente del servidor.

pub mod garage;
pub mod schedule;
pub mod storage;
pub mod vehicle;

pub use garage::{Garage, GarageAction};
pub use schedule::{ReminderLog, ServiceEntry};
pub use vehicle::{SimError, SimVehicle, VehicleKind};
