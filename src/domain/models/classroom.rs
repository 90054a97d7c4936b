use serde::{Deserialize, Serialize};
use uuid::Uuid;
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Classroom {
    pub id: String,
    pub num: String,
    pub capacity: i64,
    pub available: bool,
}

impl Classroom {
    pub fn new(num: String, capacity: i64, available: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            num,
            capacity,
            available,
        }
    }
}
