use crate::domain::{models::classroom::Classroom, ports::ClassroomRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteClassroomRepo {
    pool: SqlitePool,
}

impl SqliteClassroomRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClassroomRepository for SqliteClassroomRepo {
    async fn create(&self, classroom: &Classroom) -> Result<Classroom, AppError> {
        sqlx::query_as::<_, Classroom>(
            "INSERT INTO classrooms (id, num, capacity, available) VALUES (?, ?, ?, ?) RETURNING *"
        )
            .bind(&classroom.id)
            .bind(&classroom.num)
            .bind(classroom.capacity)
            .bind(classroom.available)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Classroom>, AppError> {
        sqlx::query_as::<_, Classroom>("SELECT * FROM classrooms WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_num(&self, num: &str) -> Result<Option<Classroom>, AppError> {
        sqlx::query_as::<_, Classroom>("SELECT * FROM classrooms WHERE num = ?")
            .bind(num)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_num_excluding(&self, num: &str, exclude_id: &str) -> Result<Option<Classroom>, AppError> {
        sqlx::query_as::<_, Classroom>("SELECT * FROM classrooms WHERE num = ? AND id != ?")
            .bind(num)
            .bind(exclude_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Classroom>, AppError> {
        sqlx::query_as::<_, Classroom>("SELECT * FROM classrooms ORDER BY num ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, classroom: &Classroom) -> Result<Classroom, AppError> {
        sqlx::query_as::<_, Classroom>(
            "UPDATE classrooms SET num=?, capacity=?, available=? WHERE id=? RETURNING *"
        )
            .bind(&classroom.num)
            .bind(classroom.capacity)
            .bind(classroom.available)
            .bind(&classroom.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM classrooms WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }
}
