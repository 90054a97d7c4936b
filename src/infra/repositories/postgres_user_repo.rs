use crate::domain::{models::user::{ClubMember, User}, ports::UserRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresUserRepo {
    pool: PgPool,
}

impl PostgresUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepo {
    async fn create(&self, user: &User) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, full_name, phone, email, password_hash, role, club_description, club_logo, domain, facebook, instagram, linkedin, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING *"
        )
            .bind(&user.id)
            .bind(&user.full_name)
            .bind(&user.phone)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.role)
            .bind(&user.club_description)
            .bind(&user.club_logo)
            .bind(&user.domain)
            .bind(&user.facebook)
            .bind(&user.instagram)
            .bind(&user.linkedin)
            .bind(user.created_at)
            .bind(user.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_email_or_phone(&self, email: &str, phone: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1 OR phone = $2 LIMIT 1")
            .bind(email)
            .bind(phone)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_email_excluding(&self, email: &str, exclude_id: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1 AND id != $2")
            .bind(email)
            .bind(exclude_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_role(&self, role: &str) -> Result<Vec<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE role = $1 ORDER BY created_at ASC")
            .bind(role)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET full_name=$1, phone=$2, email=$3, password_hash=$4, role=$5, club_description=$6, club_logo=$7, domain=$8, facebook=$9, instagram=$10, linkedin=$11, updated_at=$12
             WHERE id=$13
             RETURNING *"
        )
            .bind(&user.full_name)
            .bind(&user.phone)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.role)
            .bind(&user.club_description)
            .bind(&user.club_logo)
            .bind(&user.domain)
            .bind(&user.facebook)
            .bind(&user.instagram)
            .bind(&user.linkedin)
            .bind(user.updated_at)
            .bind(&user.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn add_member(&self, member: &ClubMember) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO club_members (club_id, member_id, member_role, member_since) VALUES ($1, $2, $3, $4)"
        )
            .bind(&member.club_id)
            .bind(&member.member_id)
            .bind(&member.member_role)
            .bind(member.member_since)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn remove_member(&self, club_id: &str, member_id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM club_members WHERE club_id = $1 AND member_id = $2")
            .bind(club_id)
            .bind(member_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn find_member(&self, club_id: &str, member_id: &str) -> Result<Option<ClubMember>, AppError> {
        sqlx::query_as::<_, ClubMember>(
            "SELECT * FROM club_members WHERE club_id = $1 AND member_id = $2"
        )
            .bind(club_id)
            .bind(member_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_members(&self, club_id: &str) -> Result<Vec<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT u.* FROM users u JOIN club_members m ON m.member_id = u.id WHERE m.club_id = $1 ORDER BY m.member_since ASC"
        )
            .bind(club_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_non_member_students(&self, club_id: &str) -> Result<Vec<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE role = 'student' AND id NOT IN (SELECT member_id FROM club_members WHERE club_id = $1)"
        )
            .bind(club_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_clubs_of_member(&self, member_id: &str) -> Result<Vec<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT u.* FROM users u JOIN club_members m ON m.club_id = u.id WHERE m.member_id = $1"
        )
            .bind(member_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
