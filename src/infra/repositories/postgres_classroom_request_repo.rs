use crate::domain::{models::classroom_request::ClassroomRequest, ports::ClassroomRequestRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

pub struct PostgresClassroomRequestRepo {
    pool: PgPool,
}

impl PostgresClassroomRequestRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClassroomRequestRepository for PostgresClassroomRequestRepo {
    async fn create(&self, request: &ClassroomRequest) -> Result<ClassroomRequest, AppError> {
        sqlx::query_as::<_, ClassroomRequest>(
            "INSERT INTO classroom_requests (id, start_time, end_time, room_id, requested_by, reason, status, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
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
        sqlx::query_as::<_, ClassroomRequest>("SELECT * FROM classroom_requests WHERE id = $1")
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
            "SELECT * FROM classroom_requests WHERE requested_by = $1 ORDER BY start_time ASC"
        )
            .bind(requested_by)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_confirmed_overlap(&self, room_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Option<ClassroomRequest>, AppError> {
        sqlx::query_as::<_, ClassroomRequest>(
            "SELECT * FROM classroom_requests WHERE room_id = $1 AND status = 'confirmed' AND start_time < $2 AND end_time > $3 LIMIT 1"
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
            "SELECT * FROM classroom_requests WHERE room_id = $1 AND id != $2 AND start_time < $3 AND end_time > $4 LIMIT 1"
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
            "UPDATE classroom_requests SET start_time=$1, end_time=$2, room_id=$3, requested_by=$4, reason=$5, status=$6, updated_at=$7
             WHERE id=$8
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
        sqlx::query("DELETE FROM classroom_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }
}
