use crate::domain::{models::classroom_request::ClassroomRequest, ports::ClassroomRequestRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

pub struct SqliteClassroomRequestRepo {
    pool: SqlitePool,
}

impl SqliteClassroomRequestRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClassroomRequestRepository for SqliteClassroomRequestRepo {
    async fn create(&self, request: &ClassroomRequest) -> Result<ClassroomRequest, AppError> {
        sqlx::query_as::<_, ClassroomRequest>(
            "INSERT INTO classroom_requests (id, start_time, end_time, room_id, requested_by, reason, status, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&request.id)
            .bind(request.start_time)
            .bind(request.end_time)
            .bind(&request.room_id)
            .bind(&request.requested_by)
            .bind(&request.reason)
            .bind(&request.status)
            .bind(request.created_at)
            .bind(request.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ClassroomRequest>, AppError> {
        sqlx::query_as::<_, ClassroomRequest>("SELECT * FROM classroom_requests WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<ClassroomRequest>, AppError> {
        sqlx::query_as::<_, ClassroomRequest>("SELECT * FROM classroom_requests ORDER BY start_time ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_requester(&self, requested_by: &str) -> Result<Vec<ClassroomRequest>, AppError> {
        sqlx::query_as::<_, ClassroomRequest>(
            "SELECT * FROM classroom_requests WHERE requested_by = ? ORDER BY start_time ASC"
        )
            .bind(requested_by)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_confirmed_overlap(&self, room_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Option<ClassroomRequest>, AppError> {
        sqlx::query_as::<_, ClassroomRequest>(
            "SELECT * FROM classroom_requests WHERE room_id = ? AND status = 'confirmed' AND start_time < ? AND end_time > ? LIMIT 1"
        )
            .bind(room_id)
            .bind(end)
            .bind(start)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_overlap_excluding(&self, room_id: &str, exclude_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Option<ClassroomRequest>, AppError> {
        sqlx::query_as::<_, ClassroomRequest>(
            "SELECT * FROM classroom_requests WHERE room_id = ? AND id != ? AND start_time < ? AND end_time > ? LIMIT 1"
        )
            .bind(room_id)
            .bind(exclude_id)
            .bind(end)
            .bind(start)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, request: &ClassroomRequest) -> Result<ClassroomRequest, AppError> {
        sqlx::query_as::<_, ClassroomRequest>(
            "UPDATE classroom_requests SET start_time=?, end_time=?, room_id=?, requested_by=?, reason=?, status=?, updated_at=?
             WHERE id=?
             RETURNING *"
        )
            .bind(request.start_time)
            .bind(request.end_time)
            .bind(&request.room_id)
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
        sqlx::query("DELETE FROM classroom_requests WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }
}
