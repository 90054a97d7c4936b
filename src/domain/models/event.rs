use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::status;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub image_url: Option<String>,
    pub room_id: String,
    pub organizer_id: String,
    pub description: String,
    pub status: String,
    pub private: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    pub fn new(
        name: String,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        room_id: String,
        organizer_id: String,
        description: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            start_time,
            end_time,
            image_url: None,
            room_id,
            organizer_id,
            description,
            status: status::PENDING.to_string(),
            private: false,
            created_at: now,
            updated_at: now,
        }
    }
}
