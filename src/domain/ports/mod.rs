use crate::domain::models::{
    classroom::Classroom, classroom_request::ClassroomRequest, event::Event,
    event_request::EventRequest, user::{ClubMember, User},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait ClassroomRepository: Send + Sync {
    async fn create(&self, classroom: &Classroom) -> Result<Classroom, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Classroom>, AppError>;
    async fn find_by_num(&self, num: &str) -> Result<Option<Classroom>, AppError>;
    async fn find_by_num_excluding(&self, num: &str, exclude_id: &str) -> Result<Option<Classroom>, AppError>;
    async fn list(&self) -> Result<Vec<Classroom>, AppError>;
    async fn update(&self, classroom: &Classroom) -> Result<Classroom, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &Event) -> Result<Event, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError>;
    async fn list(&self) -> Result<Vec<Event>, AppError>;
    async fn list_by_status(&self, status: &str) -> Result<Vec<Event>, AppError>;
    async fn list_by_organizer(&self, organizer_id: &str) -> Result<Vec<Event>, AppError>;
    async fn list_confirmed(&self) -> Result<Vec<Event>, AppError>;
    async fn list_confirmed_visible_to(&self, organizer_id: &str) -> Result<Vec<Event>, AppError>;
    async fn find_confirmed_overlap(&self, room_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Option<Event>, AppError>;
    async fn find_overlap_excluding(&self, room_id: &str, exclude_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Option<Event>, AppError>;
    async fn update(&self, event: &Event) -> Result<Event, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ClassroomRequestRepository: Send + Sync {
    async fn create(&self, request: &ClassroomRequest) -> Result<ClassroomRequest, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<ClassroomRequest>, AppError>;
    async fn list(&self) -> Result<Vec<ClassroomRequest>, AppError>;
    async fn list_by_requester(&self, requested_by: &str) -> Result<Vec<ClassroomRequest>, AppError>;
    async fn find_confirmed_overlap(&self, room_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Option<ClassroomRequest>, AppError>;
    async fn find_overlap_excluding(&self, room_id: &str, exclude_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Option<ClassroomRequest>, AppError>;
    async fn update(&self, request: &ClassroomRequest) -> Result<ClassroomRequest, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait EventRequestRepository: Send + Sync {
    async fn create(&self, request: &EventRequest) -> Result<EventRequest, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<EventRequest>, AppError>;
    async fn list(&self) -> Result<Vec<EventRequest>, AppError>;
    async fn find_confirmed_overlap(&self, event_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Option<EventRequest>, AppError>;
    async fn find_overlap_excluding(&self, event_id: &str, exclude_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Option<EventRequest>, AppError>;
    async fn update(&self, request: &EventRequest) -> Result<EventRequest, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_by_email_or_phone(&self, email: &str, phone: &str) -> Result<Option<User>, AppError>;
    async fn find_by_email_excluding(&self, email: &str, exclude_id: &str) -> Result<Option<User>, AppError>;
    async fn list(&self) -> Result<Vec<User>, AppError>;
    async fn list_by_role(&self, role: &str) -> Result<Vec<User>, AppError>;
    async fn update(&self, user: &User) -> Result<User, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;

    async fn add_member(&self, member: &ClubMember) -> Result<(), AppError>;
    async fn remove_member(&self, club_id: &str, member_id: &str) -> Result<(), AppError>;
    async fn find_member(&self, club_id: &str, member_id: &str) -> Result<Option<ClubMember>, AppError>;
    async fn list_members(&self, club_id: &str) -> Result<Vec<User>, AppError>;
    async fn list_non_member_students(&self, club_id: &str) -> Result<Vec<User>, AppError>;
    async fn list_clubs_of_member(&self, member_id: &str) -> Result<Vec<User>, AppError>;
}
