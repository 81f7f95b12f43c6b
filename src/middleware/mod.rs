//! Middleware de la aplicación

pub mod auth;
pub mod cors;
pub mod rate_limit;
