use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use tracing::{error, info, instrument};

use crate::dto::pickup_dto::{SchedulePickupRequest, SchedulePickupResponse};
use crate::model::pickup::{PickupRequest, PickupWithCitizen};
use crate::repository::pickup_repo::{PgPickupRepository, PickupRepository};
use crate::util::error::ServiceError;

#[async_trait]
pub trait PickupService: Send + Sync {
    async fn schedule(
        &self,
        user_id: i64,
        req: SchedulePickupRequest,
    ) -> Result<SchedulePickupResponse, ServiceError>;

    async fn my_pickups(&self, user_id: i64) -> Result<Vec<PickupRequest>, ServiceError>;
    async fn pending_pickups(&self) -> Result<Vec<PickupWithCitizen>, ServiceError>;
    async fn available_pickups(&self) -> Result<Vec<PickupWithCitizen>, ServiceError>;
}

pub struct PickupServiceImpl {
    pub pickup_repo: Arc<PgPickupRepository>,
}

impl PickupServiceImpl {
    pub fn new(pickup_repo: Arc<PgPickupRepository>) -> Self {
        Self { pickup_repo }
    }
}

fn parse_pickup_date(raw: &str) -> Result<NaiveDate, ServiceError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ServiceError::InvalidInput(format!("Invalid pickup date: {}", raw)))
}

fn parse_pickup_time(raw: &str) -> Result<NaiveTime, ServiceError> {
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map_err(|_| ServiceError::InvalidInput(format!("Invalid pickup time: {}", raw)))
}

#[async_trait]
impl PickupService for PickupServiceImpl {
    #[instrument(skip(self, req), fields(user_id = user_id))]
    async fn schedule(
        &self,
        user_id: i64,
        req: SchedulePickupRequest,
    ) -> Result<SchedulePickupResponse, ServiceError> {
        info!("Scheduling pickup request");

        let date_raw = req.pickup_date.as_deref().map(str::trim).unwrap_or_default();
        let time_raw = req.pickup_time.as_deref().map(str::trim).unwrap_or_default();
        let address = req.address.as_deref().map(str::trim).unwrap_or_default();
        if date_raw.is_empty() || time_raw.is_empty() || address.is_empty() {
            return Err(ServiceError::InvalidInput(
                "Pickup date, time and address are required".to_string(),
            ));
        }

        let pickup_date = parse_pickup_date(date_raw)?;
        let pickup_time = parse_pickup_time(time_raw)?;

        let pickup_id = self
            .pickup_repo
            .schedule(
                user_id,
                pickup_date,
                pickup_time,
                address,
                req.notes.as_deref(),
            )
            .await
            .map_err(|e| {
                error!("Failed to create pickup request: {e}");
                ServiceError::from(e)
            })?;

        info!(pickup_id = pickup_id, "Pickup request created");
        Ok(SchedulePickupResponse {
            message: "Pickup request created successfully".to_string(),
            pickup_id,
        })
    }

    #[instrument(skip(self))]
    async fn my_pickups(&self, user_id: i64) -> Result<Vec<PickupRequest>, ServiceError> {
        let pickups = self.pickup_repo.list_by_user(user_id).await?;
        Ok(pickups)
    }

    #[instrument(skip(self))]
    async fn pending_pickups(&self) -> Result<Vec<PickupWithCitizen>, ServiceError> {
        let pickups = self.pickup_repo.list_pending().await?;
        Ok(pickups)
    }

    #[instrument(skip(self))]
    async fn available_pickups(&self) -> Result<Vec<PickupWithCitizen>, ServiceError> {
        let pickups = self.pickup_repo.list_available().await?;
        Ok(pickups)
    }
}
