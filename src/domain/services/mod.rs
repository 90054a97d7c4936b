pub mod auth_service;
pub mod conflicts;
pub mod time_range;
