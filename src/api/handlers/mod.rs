pub mod auth;
pub mod classroom;
pub mod event;
pub mod health;
pub mod request_classroom;
pub mod request_event;
pub mod user;
