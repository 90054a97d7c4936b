use crate::domain::{models::event::Event, ports::EventRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

pub struct PostgresEventRepo {
    pool: PgPool,
}

impl PostgresEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PostgresEventRepo {
    async fn create(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            "INSERT INTO events (id, name, start_time, end_time, image_url, room_id, organizer_id, description, status, private, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING *"
        )
            .bind(&event.id)
            .bind(&event.name)
            .bind(event.start_time)
            .bind(event.end_time)
            .bind(&event.image_url)
            .bind(&event.room_id)
            .bind(&event.organizer_id)
            .bind(&event.description)
            .bind(&event.status)
            .bind(event.private)
            .bind(event.created_at)
            .bind(event.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY start_time ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_status(&self, status: &str) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE status = $1 ORDER BY start_time ASC")
            .bind(status)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_organizer(&self, organizer_id: &str) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE organizer_id = $1 ORDER BY start_time ASC")
            .bind(organizer_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_confirmed(&self) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE status = 'confirmed' ORDER BY start_time ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_confirmed_visible_to(&self, organizer_id: &str) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE status = 'confirmed' AND (private = FALSE OR organizer_id = $1) ORDER BY start_time ASC"
        )
            .bind(organizer_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_confirmed_overlap(&self, room_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Option<Event>, AppError> {
        sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE room_id = $1 AND status = 'confirmed' AND start_time < $2 AND end_time > $3 LIMIT 1"
        )
            .bind(room_id)
            .bind(end)
            .bind(start)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_overlap_excluding(&self, room_id: &str, exclude_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Option<Event>, AppError> {
        sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE room_id = $1 AND id != $2 AND start_time < $3 AND end_time > $4 LIMIT 1"
        )
            .bind(room_id)
            .bind(exclude_id)
            .bind(end)
            .bind(start)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            "UPDATE events SET name=$1, start_time=$2, end_time=$3, image_url=$4, room_id=$5, organizer_id=$6, description=$7, status=$8, private=$9, updated_at=$10
             WHERE id=$11
             RETURNING *"
        )
            .bind(&event.name)
            .bind(event.start_time)
            .bind(event.end_time)
            .bind(&event.image_url)
            .bind(&event.room_id)
            .bind(&event.organizer_id)
            .bind(&event.description)
            .bind(&event.status)
            .bind(event.private)
            .bind(event.updated_at)
            .bind(&event.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }
}
