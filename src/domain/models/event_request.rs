use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::status;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct EventRequest {
    pub id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub event_id: String,
    pub requested_by: String,
    pub reason: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EventRequest {
    pub fn new(
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        event_id: String,
        requested_by: String,
        reason: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            start_time,
            end_time,
            event_id,
            requested_by,
            reason,
            status: status::PENDING.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}
