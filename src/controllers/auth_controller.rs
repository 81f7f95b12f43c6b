use bcrypt::{hash, verify, DEFAULT_COST};
use sqlx::PgPool;
use validator::Validate;

use crate::config::environment::EnvironmentConfig;
use crate::middleware::auth::generate_jwt_token;
use crate::models::response::ApiResponse;
use crate::models::user::{LoginRequest, LoginResponse, RegisterRequest};
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;

pub struct AuthController {
    users: UserRepository,
    config: EnvironmentConfig,
}

impl AuthController {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            users: UserRepository::new(pool),
            config,
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<ApiResponse<()>, AppError> {
        request.validate().map_err(AppError::Validation)?;

        // Email duplicado responde 400, igual que campos inválidos
        if self.users.email_exists(&request.email).await? {
            return Err(AppError::BadRequest(
                "El email ya está registrado".to_string(),
            ));
        }

        let password_hash = hash(&request.password, DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("Error hasheando password: {}", e)))?;

        let user = self.users.create(&request.email, &password_hash).await?;
        tracing::info!("👤 Usuario registrado: {}", user.email);

        Ok(ApiResponse::message(
            "Usuario registrado exitosamente".to_string(),
        ))
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        request.validate().map_err(AppError::Validation)?;

        // Mismo mensaje para email desconocido y password incorrecto
        let user = self
            .users
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::BadRequest("Credenciales inválidas".to_string()))?;

        let valid = verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(format!("Error verificando password: {}", e)))?;

        if !valid {
            return Err(AppError::BadRequest("Credenciales inválidas".to_string()));
        }

        let token = generate_jwt_token(user.id, &user.email, &self.config)?;

        Ok(LoginResponse {
            token,
            user_id: user.id,
            email: user.email,
        })
    }
}
