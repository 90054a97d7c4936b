use crate::domain::{models::user::{ClubMember, User}, ports::UserRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteUserRepo {
    pool: SqlitePool,
}

impl SqliteUserRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepo {
    async fn create(&self, user: &User) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, full_name, phone, email, password_hash, role, club_description, club_logo, domain, facebook, instagram, linkedin, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
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
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_email_or_phone(&self, email: &str, phone: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ? OR phone = ? LIMIT 1")
            .bind(email)
            .bind(phone)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_email_excluding(&self, email: &str, exclude_id: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ? AND id != ?")
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
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE role = ? ORDER BY created_at ASC")
            .bind(role)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET full_name=?, phone=?, email=?, password_hash=?, role=?, club_description=?, club_logo=?, domain=?, facebook=?, instagram=?, linkedin=?, updated_at=?
             WHERE id=?
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
        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn add_member(&self, member: &ClubMember) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO club_members (club_id, member_id, member_role, member_since) VALUES (?, ?, ?, ?)"
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
        sqlx::query("DELETE FROM club_members WHERE club_id = ? AND member_id = ?")
            .bind(club_id)
            .bind(member_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn find_member(&self, club_id: &str, member_id: &str) -> Result<Option<ClubMember>, AppError> {
        sqlx::query_as::<_, ClubMember>(
            "SELECT * FROM club_members WHERE club_id = ? AND member_id = ?"
        )
            .bind(club_id)
            .bind(member_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_members(&self, club_id: &str) -> Result<Vec<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT u.* FROM users u JOIN club_members m ON m.member_id = u.id WHERE m.club_id = ? ORDER BY m.member_since ASC"
        )
            .bind(club_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_non_member_students(&self, club_id: &str) -> Result<Vec<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE role = 'student' AND id NOT IN (SELECT member_id FROM club_members WHERE club_id = ?)"
        )
            .bind(club_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_clubs_of_member(&self, member_id: &str) -> Result<Vec<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT u.* FROM users u JOIN club_members m ON m.club_id = u.id WHERE m.member_id = ?"
        )
            .bind(member_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
