use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, instrument};

use crate::dto::auth_dto::{LoginRequest, LoginResponse, LoginUser, SignupRequest, SignupResponse};
use crate::model::user::{NewUser, UserRole};
use crate::repository::repository_error::RepositoryError;
use crate::repository::user_repo::{UserRepository, UserRepositoryImpl};
use crate::util::error::ServiceError;
use crate::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl};
use crate::util::password::{PasswordUtils, PasswordUtilsImpl};

#[async_trait]
pub trait AuthService: Send + Sync {
    async fn signup(&self, req: SignupRequest) -> Result<SignupResponse, ServiceError>;
    async fn login(&self, req: LoginRequest) -> Result<LoginResponse, ServiceError>;
}

pub struct AuthServiceImpl {
    pub user_repo: Arc<UserRepositoryImpl>,
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
}

impl AuthServiceImpl {
    pub fn new(user_repo: Arc<UserRepositoryImpl>, jwt_utils: Arc<JwtTokenUtilsImpl>) -> Self {
        Self {
            user_repo,
            jwt_utils,
        }
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    #[instrument(skip(self, req), fields(email = %req.email))]
    async fn signup(&self, req: SignupRequest) -> Result<SignupResponse, ServiceError> {
        info!("Registering new user");

        let role = match req.role.as_deref() {
            None => UserRole::Citizen,
            Some(raw) => UserRole::parse(raw)
                .ok_or_else(|| ServiceError::InvalidInput(format!("Unknown role: {}", raw)))?,
        };

        let password_hash = PasswordUtilsImpl::hash_password(&req.password)
            .map_err(|e| ServiceError::InternalError(format!("Password hash error: {}", e)))?;

        let user = NewUser {
            full_name: req.full_name,
            email: req.email,
            phone: req.phone,
            password_hash,
            role,
        };

        let user_id = match self.user_repo.insert(user).await {
            Ok(id) => {
                info!("User inserted successfully");
                id
            }
            Err(RepositoryError::AlreadyExists(msg)) => {
                error!("Duplicate signup rejected: {}", msg);
                return Err(ServiceError::Conflict(
                    "Email or phone already exists".to_string(),
                ));
            }
            Err(e) => {
                error!("Failed to insert user: {e}");
                return Err(e.into());
            }
        };

        Ok(SignupResponse {
            message: "Account created".to_string(),
            user_id,
        })
    }

    #[instrument(skip(self, req), fields(email = %req.email))]
    async fn login(&self, req: LoginRequest) -> Result<LoginResponse, ServiceError> {
        info!("User login attempt");

        let user_opt = self.user_repo.find_by_email(&req.email).await;
        match &user_opt {
            Ok(Some(_)) => info!("User found for login"),
            Ok(None) => error!("User not found for login"),
            Err(e) => error!("Failed to fetch user for login: {e}"),
        }
        let user = user_opt?.ok_or(ServiceError::InvalidCredentials)?;

        // Role selected in the login form must match the stored role; this is
        // checked before the password so the client gets the role error even
        // with wrong credentials.
        if let Some(requested) = req.role.as_deref() {
            if user.role.as_str() != requested {
                error!("Role mismatch for user: {}", req.email);
                return Err(ServiceError::RoleMismatch(format!(
                    "User is not a {}. Please select correct role.",
                    requested
                )));
            }
        }

        let valid = PasswordUtilsImpl::verify_password(&req.password, &user.password_hash)
            .map_err(|e| ServiceError::InternalError(format!("Password verify error: {}", e)))?;
        if !valid {
            error!("Invalid credentials for user: {}", req.email);
            return Err(ServiceError::InvalidCredentials);
        }

        let token = self
            .jwt_utils
            .generate_access_token(user.id, user.role)
            .map_err(|e| ServiceError::InternalError(format!("JWT error: {}", e)))?;

        info!("User logged in successfully");
        Ok(LoginResponse {
            message: "Login successful".to_string(),
            token,
            user: LoginUser {
                id: user.id,
                name: user.full_name,
                role: user.role,
                points: user.points,
            },
        })
    }
}
