use crate::domain::{models::event_request::EventRequest, ports::EventRequestRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

pub struct SqliteEventRequestRepo {
    pool: SqlitePool,
}

impl SqliteEventRequestRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRequestRepository for SqliteEventRequestRepo {
    async fn create(&self, request: &EventRequest) -> Result<EventRequest, AppError> {
        sqlx::query_as::<_, EventRequest>(
            "INSERT INTO event_requests (id, start_time, end_time, event_id, requested_by, reason, status, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
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
        sqlx::query_as::<_, EventRequest>("SELECT * FROM event_requests WHERE id = ?")
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
            "SELECT * FROM event_requests WHERE event_id = ? AND status = 'confirmed' AND start_time < ? AND end_time > ? LIMIT 1"
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
            "SELECT * FROM event_requests WHERE event_id = ? AND id != ? AND start_time < ? AND end_time > ? LIMIT 1"
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
            "UPDATE event_requests SET start_time=?, end_time=?, event_id=?, requested_by=?, reason=?, status=?, updated_at=?
             WHERE id=?
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
        sqlx::query("DELETE FROM event_requests WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }
}
