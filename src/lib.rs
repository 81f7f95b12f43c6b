//! Garaje Virtual - backend multi-tenant de vehículos
//!
//! Los módulos del servidor siguen el layout MVC: models/repositories/
//! controllers/routes, con middleware de auth y rate limiting. El módulo
//! `simulation` es independiente del servidor (port del simulador de
//! vehículos del cliente).

pub mod config;
pub mod controllers;
pub mod database;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod simulation;
pub mod state;
pub mod utils;
