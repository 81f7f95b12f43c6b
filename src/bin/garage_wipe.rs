//! Herramienta de limpieza de emergencia
//!
//! Hace login contra la API, lista los vehículos del usuario y los elimina
//! uno por uno con una pequeña pausa entre requests.

use anyhow::{Context, Result};
use serde_json::json;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let base_url =
        std::env::var("GARAGE_API_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let email = std::env::var("GARAGE_EMAIL").context("GARAGE_EMAIL must be set")?;
    let password = std::env::var("GARAGE_PASSWORD").context("GARAGE_PASSWORD must be set")?;

    println!("-----------------------------------------");
    println!("INICIANDO LIMPIEZA DE EMERGENCIA");
    println!("-----------------------------------------");

    let client = reqwest::Client::new();

    // 1. Login para obtener el token
    let login: serde_json::Value = client
        .post(format!("{}/api/auth/login", base_url))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await?
        .error_for_status()
        .context("login fallido")?
        .json()
        .await?;

    let token = login["token"]
        .as_str()
        .context("la respuesta de login no trae token")?
        .to_string();

    // 2. Buscar la lista completa de vehículos
    println!("Buscando la lista de vehículos en la API...");
    let vehicles: Vec<serde_json::Value> = client
        .get(format!("{}/api/vehicles", base_url))
        .bearer_auth(&token)
        .send()
        .await?
        .error_for_status()
        .context("error listando vehículos")?
        .json()
        .await?;

    let total = vehicles.len();
    if total == 0 {
        println!("✅ El garaje ya está vacío. Nada que hacer.");
        return Ok(());
    }
    println!("Encontrados {} vehículos para eliminar.", total);

    // 3. Eliminar uno por uno, con calma
    let mut deleted = 0usize;
    for (i, vehicle) in vehicles.iter().enumerate() {
        let Some(id) = vehicle["id"].as_str() else {
            continue;
        };
        let plate = vehicle["plate"].as_str().unwrap_or("?");
        print!("Eliminando vehículo {} de {} ({})... ", i + 1, total, plate);

        let response = client
            .delete(format!("{}/api/vehicles/{}", base_url, id))
            .bearer_auth(&token)
            .send()
            .await;

        match response {
            Ok(r) if r.status().is_success() => {
                println!("OK");
                deleted += 1;
            }
            Ok(r) => println!("FALLÓ (status {})", r.status()),
            Err(e) => println!("FALLÓ ({})", e),
        }

        // Pausa pequeña para no saturar la API ni el rate limit
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    println!("-----------------------------------------");
    println!("🎉 Limpieza terminada: {}/{} eliminados", deleted, total);

    Ok(())
}
