use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_STUDENT: &str = "student";
pub const ROLE_CLUB: &str = "club";

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct User {
    pub id: String,
    pub full_name: String,
    pub phone: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub club_description: Option<String>,
    pub club_logo: Option<String>,
    pub domain: Option<String>,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(full_name: String, phone: String, email: String, password_hash: String, role: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            full_name,
            phone,
            email,
            password_hash,
            role,
            club_description: None,
            club_logo: None,
            domain: None,
            facebook: None,
            instagram: None,
            linkedin: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct ClubMember {
    pub club_id: String,
    pub member_id: String,
    pub member_role: String,
    pub member_since: DateTime<Utc>,
}

impl ClubMember {
    pub fn new(club_id: String, member_id: String, member_role: String) -> Self {
        Self {
            club_id,
            member_id,
            member_role,
            member_since: Utc::now(),
        }
    }
}
