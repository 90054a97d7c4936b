use std::sync::Arc;
use crate::domain::ports::{
    ClassroomRepository, ClassroomRequestRepository, EventRepository,
    EventRequestRepository, UserRepository,
};
use crate::domain::services::auth_service::AuthService;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub classroom_repo: Arc<dyn ClassroomRepository>,
    pub event_repo: Arc<dyn EventRepository>,
    pub classroom_request_repo: Arc<dyn ClassroomRequestRepository>,
    pub event_request_repo: Arc<dyn EventRequestRepository>,
    pub auth_service: Arc<AuthService>,
}
