use async_trait::async_trait;
use sqlx::PgPool;

use crate::model::user::{CurrentUser, NewUser, User};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, user: NewUser) -> RepositoryResult<i64>;
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    /// Live lookup used by the auth gate on every request; inactive users
    /// resolve to `None` regardless of token validity.
    async fn find_active_by_id(&self, id: i64) -> RepositoryResult<Option<CurrentUser>>;
}

pub struct UserRepositoryImpl {
    pool: PgPool,
}

impl UserRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        UserRepositoryImpl { pool }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn insert(&self, user: NewUser) -> RepositoryResult<i64> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO users (full_name, email, phone, password_hash, role)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.password_hash)
        .bind(user.role)
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(id)
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, full_name, email, phone, password_hash, role, points, is_active, created_at
             FROM users
             WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(user)
    }

    async fn find_active_by_id(&self, id: i64) -> RepositoryResult<Option<CurrentUser>> {
        let user = sqlx::query_as::<_, CurrentUser>(
            "SELECT id, full_name, email, role, points
             FROM users
             WHERE id = $1 AND is_active = TRUE",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(user)
    }
}
