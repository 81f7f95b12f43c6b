//! Servicios de dominio

pub mod authorization_service;
