pub mod postgres_classroom_repo;
pub mod postgres_classroom_request_repo;
pub mod postgres_event_repo;
pub mod postgres_event_request_repo;
pub mod postgres_user_repo;
pub mod sqlite_classroom_repo;
pub mod sqlite_classroom_request_repo;
pub mod sqlite_event_repo;
pub mod sqlite_event_request_repo;
pub mod sqlite_user_repo;
