pub mod auth;
pub mod classroom;
pub mod classroom_request;
pub mod event;
pub mod event_request;
pub mod status;
pub mod user;
