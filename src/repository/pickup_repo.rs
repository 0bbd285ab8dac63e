use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;

use crate::model::pickup::{PickupRequest, PickupWithCitizen};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

#[async_trait]
pub trait PickupRepository: Send + Sync {
    async fn schedule(
        &self,
        user_id: i64,
        pickup_date: NaiveDate,
        pickup_time: NaiveTime,
        address: &str,
        notes: Option<&str>,
    ) -> RepositoryResult<i64>;

    async fn list_by_user(&self, user_id: i64) -> RepositoryResult<Vec<PickupRequest>>;
    async fn list_pending(&self) -> RepositoryResult<Vec<PickupWithCitizen>>;
    /// Pending pickups nobody has claimed yet.
    async fn list_available(&self) -> RepositoryResult<Vec<PickupWithCitizen>>;
}

pub struct PgPickupRepository {
    pool: PgPool,
}

impl PgPickupRepository {
    pub fn new(pool: PgPool) -> Self {
        PgPickupRepository { pool }
    }
}

#[async_trait]
impl PickupRepository for PgPickupRepository {
    async fn schedule(
        &self,
        user_id: i64,
        pickup_date: NaiveDate,
        pickup_time: NaiveTime,
        address: &str,
        notes: Option<&str>,
    ) -> RepositoryResult<i64> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO pickup_requests (user_id, pickup_date, pickup_time, address, notes)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(user_id)
        .bind(pickup_date)
        .bind(pickup_time)
        .bind(address)
        .bind(notes)
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(id)
    }

    async fn list_by_user(&self, user_id: i64) -> RepositoryResult<Vec<PickupRequest>> {
        let pickups = sqlx::query_as::<_, PickupRequest>(
            "SELECT id, user_id, pickup_date, pickup_time, address, notes, status,
                    collector_id, points_earned, created_at
             FROM pickup_requests
             WHERE user_id = $1
             ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(pickups)
    }

    async fn list_pending(&self) -> RepositoryResult<Vec<PickupWithCitizen>> {
        let pickups = sqlx::query_as::<_, PickupWithCitizen>(
            "SELECT p.id, p.pickup_date, p.pickup_time, p.address, p.notes, p.status,
                    u.full_name AS citizen_name, u.phone AS citizen_phone
             FROM pickup_requests p
             JOIN users u ON p.user_id = u.id
             WHERE p.status = 'pending'
             ORDER BY p.created_at ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(pickups)
    }

    async fn list_available(&self) -> RepositoryResult<Vec<PickupWithCitizen>> {
        let pickups = sqlx::query_as::<_, PickupWithCitizen>(
            "SELECT p.id, p.pickup_date, p.pickup_time, p.address, p.notes, p.status,
                    u.full_name AS citizen_name, u.phone AS citizen_phone
             FROM pickup_requests p
             JOIN users u ON p.user_id = u.id
             WHERE p.status = 'pending' AND p.collector_id IS NULL
             ORDER BY p.created_at ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(pickups)
    }
}
