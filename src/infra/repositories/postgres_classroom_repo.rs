use crate::domain::{models::classroom::Classroom, ports::ClassroomRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresClassroomRepo {
    pool: PgPool,
}

impl PostgresClassroomRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClassroomRepository for PostgresClassroomRepo {
    async fn create(&self, classroom: &Classroom) -> Result<Classroom, AppError> {
        sqlx::query_as::<_, Classroom>(
            "INSERT INTO classrooms (id, num, capacity, available) VALUES ($1, $2, $3, $4) RETURNING *"
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
        sqlx::query_as::<_, Classroom>("SELECT * FROM classrooms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_num(&self, num: &str) -> Result<Option<Classroom>, AppError> {
        sqlx::query_as::<_, Classroom>("SELECT * FROM classrooms WHERE num = $1")
            .bind(num)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_num_excluding(&self, num: &str, exclude_id: &str) -> Result<Option<Classroom>, AppError> {
        sqlx::query_as::<_, Classroom>("SELECT * FROM classrooms WHERE num = $1 AND id != $2")
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
            "UPDATE classrooms SET num=$1, capacity=$2, available=$3 WHERE id=$4 RETURNING *"
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
        sqlx::query("DELETE FROM classrooms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }
}
