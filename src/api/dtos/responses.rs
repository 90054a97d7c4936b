use serde::Serialize;
use crate::domain::models::classroom_request::ClassroomRequest;
use crate::domain::models::user::User;

#[derive(Serialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
}

/// Creation response carrying the generated initial password. This is the
/// only place the plaintext password ever leaves the system.
#[derive(Serialize)]
pub struct UserCreatedResponse {
    #[serde(flatten)]
    pub user: User,
    pub initial_password: String,
}

/// A classroom request decorated with the room number of its classroom.
/// `num` is null when the referenced classroom no longer resolves.
#[derive(Serialize)]
pub struct ClassroomRequestWithRoom {
    #[serde(flatten)]
    pub request: ClassroomRequest,
    pub num: Option<String>,
}
