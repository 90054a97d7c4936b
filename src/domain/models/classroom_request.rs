use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::status;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct ClassroomRequest {
    pub id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub room_id: String,
    pub requested_by: String,
    pub reason: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ClassroomRequest {
    pub fn new(
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        room_id: String,
        requested_by: String,
        reason: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            start_time,
            end_time,
            room_id,
            requested_by,
            reason,
            status: status::PENDING.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}
