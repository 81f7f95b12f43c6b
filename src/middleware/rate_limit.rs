//! Middleware de Rate Limiting
//!
//! Ventana fija por IP, en memoria. Hay dos instancias en AppState: una
//! general sobre todo el tráfico y una más estricta para los endpoints de
//! creación (register, crear vehículo, compartir, mantenimiento).

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::state::AppState;
use crate::utils::errors::AppError;

/// Estructura para almacenar información de rate limiting por IP
#[derive(Debug, Clone)]
struct RateLimitInfo {
    requests: u32,
    window_start: Instant,
}

/// Estado de un limitador de ventana fija
#[derive(Clone)]
pub struct RateLimitState {
    requests: Arc<RwLock<HashMap<String, RateLimitInfo>>>,
    max_requests: u32,
    window_duration: Duration,
}

impl RateLimitState {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            requests: Arc::new(RwLock::new(HashMap::new())),
            max_requests,
            window_duration: Duration::from_secs(window_secs),
        }
    }

    /// Verificar si una IP ha excedido el límite
    pub async fn check_rate_limit(&self, ip: &str) -> Result<(), RateLimitError> {
        let mut requests = self.requests.write().await;
        let now = Instant::now();

        // Limpiar entradas expiradas
        requests.retain(|_, info| now.duration_since(info.window_start) < self.window_duration);

        let info = requests.entry(ip.to_string()).or_insert(RateLimitInfo {
            requests: 0,
            window_start: now,
        });

        if now.duration_since(info.window_start) >= self.window_duration {
            info.requests = 1;
            info.window_start = now;
            return Ok(());
        }

        if info.requests >= self.max_requests {
            return Err(RateLimitError::LimitExceeded);
        }

        info.requests += 1;
        Ok(())
    }
}

/// Errores de rate limiting
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("Rate limit exceeded")]
    LimitExceeded,
}

/// Extraer la IP del cliente de los headers
fn client_ip(request: &Request) -> &str {
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("unknown")
        .split(',')
        .next()
        .unwrap_or("unknown")
        .trim()
}

/// Middleware de rate limiting general
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ip = client_ip(&request).to_string();

    if state.rate_limiter.check_rate_limit(&ip).await.is_err() {
        return Err(AppError::RateLimitExceeded);
    }

    Ok(next.run(request).await)
}

/// Middleware de rate limiting más estricto para endpoints de creación
pub async fn strict_rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ip = client_ip(&request).to_string();

    if state.strict_rate_limiter.check_rate_limit(&ip).await.is_err() {
        return Err(AppError::RateLimitExceeded);
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_limit_within_window() {
        let limiter = RateLimitState::new(2, 60);

        assert!(limiter.check_rate_limit("1.2.3.4").await.is_ok());
        assert!(limiter.check_rate_limit("1.2.3.4").await.is_ok());
        assert!(limiter.check_rate_limit("1.2.3.4").await.is_err());

        // Otra IP tiene su propia ventana
        assert!(limiter.check_rate_limit("5.6.7.8").await.is_ok());
    }

    #[tokio::test]
    async fn test_window_expires() {
        let limiter = RateLimitState::new(1, 1);

        assert!(limiter.check_rate_limit("1.2.3.4").await.is_ok());
        assert!(limiter.check_rate_limit("1.2.3.4").await.is_err());

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert!(limiter.check_rate_limit("1.2.3.4").await.is_ok());
    }
}
