//! Persistencia local del garaje
//!
//! Análogo al almacenamiento local del cliente: el garaje se guarda como
//! un array JSON de vehículos. Al cargar, las entradas inválidas se saltan
//! en lugar de descartar todo el archivo.

use std::fs;
use std::path::Path;

use thiserror::Error;

use super::garage::Garage;
use super::vehicle::SimVehicle;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Guardar los vehículos del garaje. Escribe a un archivo temporal y
/// renombra, para no dejar un archivo a medias si algo falla.
pub fn save_garage(path: &Path, garage: &Garage) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(&garage.vehicles)?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Cargar el garaje. Un archivo inexistente es un garaje vacío; los
/// registros que no deserializan se saltan con un warning.
pub fn load_garage(path: &Path) -> Result<Garage, StorageError> {
    if !path.exists() {
        return Ok(Garage::new());
    }

    let raw = fs::read_to_string(path)?;
    let values: Vec<serde_json::Value> = serde_json::from_str(&raw)?;

    let mut garage = Garage::new();
    for value in values {
        match serde_json::from_value::<SimVehicle>(value) {
            Ok(vehicle) => {
                garage.add_vehicle(vehicle);
            }
            Err(e) => {
                log::warn!("Registro de vehículo inválido en el almacenamiento, saltando: {}", e);
            }
        }
    }

    Ok(garage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::vehicle::VehicleKind;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garage.json");

        let mut garage = Garage::new();
        garage.add_vehicle(SimVehicle::new_car("Uno", "rojo"));
        garage.add_vehicle(SimVehicle::new_truck("Actros", "blanco", 3000));

        save_garage(&path, &garage).unwrap();
        let loaded = load_garage(&path).unwrap();

        assert_eq!(loaded.vehicles.len(), 2);
        assert_eq!(loaded.vehicles[0].model, "Uno");
        assert!(matches!(
            loaded.vehicles[1].kind,
            VehicleKind::Truck {
                cargo_capacity: 3000,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_file_is_empty_garage() {
        let dir = tempfile::tempdir().unwrap();
        let garage = load_garage(&dir.path().join("no-existe.json")).unwrap();
        assert!(garage.vehicles.is_empty());
    }

    #[test]
    fn test_invalid_entries_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garage.json");

        let mut garage = Garage::new();
        garage.add_vehicle(SimVehicle::new_car("Uno", "rojo"));
        let mut values: Vec<serde_json::Value> =
            serde_json::from_str(&serde_json::to_string(&garage.vehicles).unwrap()).unwrap();
        values.push(serde_json::json!({ "garbage": true }));
        fs::write(&path, serde_json::to_string(&values).unwrap()).unwrap();

        let loaded = load_garage(&path).unwrap();
        assert_eq!(loaded.vehicles.len(), 1);
    }
}
