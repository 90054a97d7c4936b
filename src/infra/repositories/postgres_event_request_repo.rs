use crate::domain::{models::event_request::EventRequest, ports::EventRequestRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

pub struct PostgresEventRequestRepo {
    pool: PgPool,
}

impl PostgresEventRequestRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRequestRepository for PostgresEventRequestRepo {
    async fn create(&self, request: &EventRequest) -> Result<EventRequest, AppError> {
        sqlx::query_as::<_, EventRequest>(
            "INSERT INTO event_requests (id, start_time, end_time, event_id, requested_by, reason, status, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING *"
        )
            .bind(&request.id)
            .bind(request.start_time)
            .bind(request.end_time)
            .bind(&request.event_id)
            .bind(&request.requested_by)
            .bind(&request.reason)
            .bind(&request.status)
            .bind(request.created_at)
            .bind(request.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<EventRequest>, AppError> {
        sqlx::query_as::<_, EventRequest>("SELECT * FROM event_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<EventRequest>, AppError> {
        sqlx::query_as::<_, EventRequest>("SELECT * FROM event_requests ORDER BY start_time ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_confirmed_overlap(&self, event_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Option<EventRequest>, AppError> {
        sqlx::query_as::<_, EventRequest>(
            "SELECT * FROM event_requests WHERE event_id = $1 AND status = 'confirmed' AND start_time < $2 AND end_time > $3 LIMIT 1"
        )
            .bind(event_id)
            .bind(end)
            .bind(start)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_overlap_excluding(&self, event_id: &str, exclude_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Option<EventRequest>, AppError> {
        sqlx::query_as::<_, EventRequest>(
            "SELECT * FROM event_requests WHERE event_id = $1 AND id != $2 AND start_time < $3 AND end_time > $4 LIMIT 1"
        )
            .bind(event_id)
            .bind(exclude_id)
            .bind(end)
            .bind(start)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, request: &EventRequest) -> Result<EventRequest, AppError> {
        sqlx::query_as::<_, EventRequest>(
            "UPDATE event_requests SET start_time=$1, end_time=$2, event_id=$3, requested_by=$4, reason=$5, status=$6, updated_at=$7
             WHERE id=$8
             RETURNING *"
        )
            .bind(request.start_time)
            .bind(request.end_time)
            .bind(&request.event_id)
            .bind(&request.requested_by)
            .bind(&request.reason)
            .bind(&request.status)
            .bind(request.updated_at)
            .bind(&request.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM event_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }
}
