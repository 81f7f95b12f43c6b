//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::middleware::rate_limit::RateLimitState;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    /// Límite general sobre todo el tráfico de la API
    pub rate_limiter: RateLimitState,
    /// Límite más estricto para endpoints de creación
    pub strict_rate_limiter: RateLimitState,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        let rate_limiter = RateLimitState::new(config.rate_limit_requests, config.rate_limit_window);
        let strict_rate_limiter =
            RateLimitState::new(config.rate_limit_strict_requests, config.rate_limit_window);

        Self {
            pool,
            config,
            rate_limiter,
            strict_rate_limiter,
        }
    }
}
