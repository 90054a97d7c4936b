use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub role: String,
    pub club_description: Option<String>,
    pub club_logo: Option<String>,
    pub domain: Option<String>,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub club_description: Option<String>,
    pub club_logo: Option<String>,
    pub domain: Option<String>,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
    // Rejected outright by the handler when present.
    pub password: Option<String>,
    pub role: Option<String>,
}

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

#[derive(Deserialize)]
pub struct AddMemberRequest {
    pub student_id: String,
    pub member_role: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateClassroomRequest {
    pub num: String,
    pub capacity: i64,
    pub available: Option<bool>,
}

#[derive(Deserialize)]
pub struct UpdateClassroomRequest {
    pub num: Option<String>,
    pub capacity: Option<i64>,
    pub available: Option<bool>,
}

#[derive(Deserialize)]
pub struct CreateEventRequest {
    pub name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub image_url: Option<String>,
    pub room_id: String,
    pub organizer_id: String,
    pub description: String,
    pub status: Option<String>,
    pub private: Option<bool>,
}

#[derive(Deserialize)]
pub struct UpdateEventRequest {
    pub name: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub room_id: Option<String>,
    pub organizer_id: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub private: Option<bool>,
}

#[derive(Deserialize)]
pub struct CreateClassroomRequestBody {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub room_id: String,
    pub requested_by: String,
    pub reason: String,
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateClassroomRequestBody {
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub room_id: Option<String>,
    pub requested_by: Option<String>,
    pub reason: Option<String>,
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateEventRequestBody {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub event_id: String,
    pub requested_by: String,
    pub reason: String,
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateEventRequestBody {
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub event_id: Option<String>,
    pub requested_by: Option<String>,
    pub reason: Option<String>,
    pub status: Option<String>,
}
