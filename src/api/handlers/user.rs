use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::{
    requests::{AddMemberRequest, ChangePasswordRequest, CreateUserRequest, UpdateUserRequest},
    responses::UserCreatedResponse,
};
use crate::domain::models::user::{self, ClubMember, User};
use crate::error::AppError;
use std::sync::Arc;
use argon2::{password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand::{distributions::Alphanumeric, Rng};
use rand::rngs::OsRng;
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;
use tracing::info;

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.phone.len() != 8 || !payload.phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::Validation("Phone number must contain exactly 8 digits.".into()));
    }

    match payload.role.as_str() {
        user::ROLE_ADMIN | user::ROLE_STUDENT | user::ROLE_CLUB => {}
        _ => return Err(AppError::Validation("Role must be admin, student or club.".into())),
    }

    if state.user_repo.find_by_email_or_phone(&payload.email, &payload.phone).await?.is_some() {
        return Err(AppError::Validation("User with this email or phone number already exists.".into()));
    }

    // No self-service registration: an initial password is generated here
    // and handed back exactly once in the creation response.
    let initial_password: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect();

    let password_hash = hash_password(&initial_password)?;

    let mut new_user = User::new(payload.full_name, payload.phone, payload.email, password_hash, payload.role);
    new_user.club_description = payload.club_description;
    new_user.club_logo = payload.club_logo;
    new_user.domain = payload.domain;
    new_user.facebook = payload.facebook;
    new_user.instagram = payload.instagram;
    new_user.linkedin = payload.linkedin;

    let created = state.user_repo.create(&new_user).await?;

    info!("User created: {} ({})", created.id, created.role);

    Ok(Json(UserCreatedResponse { user: created, initial_password }))
}

pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let users = state.user_repo.list().await?;
    Ok(Json(users))
}

pub async fn list_clubs(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let clubs = state.user_repo.list_by_role(user::ROLE_CLUB).await?;
    Ok(Json(clubs))
}

pub async fn list_students(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let students = state.user_repo.list_by_role(user::ROLE_STUDENT).await?;
    Ok(Json(students))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if Uuid::parse_str(&id).is_err() {
        return Err(AppError::Validation("Invalid ID format.".into()));
    }

    let found = state.user_repo.find_by_id(&id).await?
        .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))?;

    Ok(Json(found))
}

pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.password.is_some() || payload.role.is_some() {
        return Err(AppError::Conflict("Updating password or role is not allowed.".into()));
    }

    let mut existing = state.user_repo.find_by_id(&id).await?
        .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))?;

    if let Some(email) = &payload.email {
        if state.user_repo.find_by_email_excluding(email, &id).await?.is_some() {
            return Err(AppError::Conflict("User with this email already exists.".into()));
        }
        existing.email = email.clone();
    }
    if let Some(full_name) = payload.full_name {
        existing.full_name = full_name;
    }
    if let Some(phone) = payload.phone {
        existing.phone = phone;
    }
    if let Some(club_description) = payload.club_description {
        existing.club_description = Some(club_description);
    }
    if let Some(club_logo) = payload.club_logo {
        existing.club_logo = Some(club_logo);
    }
    if let Some(domain) = payload.domain {
        existing.domain = Some(domain);
    }
    if let Some(facebook) = payload.facebook {
        existing.facebook = Some(facebook);
    }
    if let Some(instagram) = payload.instagram {
        existing.instagram = Some(instagram);
    }
    if let Some(linkedin) = payload.linkedin {
        existing.linkedin = Some(linkedin);
    }
    existing.updated_at = Utc::now();

    let updated = state.user_repo.update(&existing).await?;

    info!("User updated: {}", updated.id);

    Ok(Json(updated))
}

// Deletion is idempotent: removing an absent user is not an error.
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.user_repo.delete(&id).await?;

    info!("User deleted: {}", id);

    Ok(Json(json!({ "status": "deleted" })))
}

pub async fn change_password(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut existing = state.user_repo.find_by_id(&id).await?
        .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))?;

    let parsed_hash = PasswordHash::new(&existing.password_hash)
        .map_err(|_| AppError::Internal)?;

    Argon2::default().verify_password(payload.current_password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::Validation("Current password is incorrect.".into()))?;

    if payload.new_password != payload.confirm_password {
        return Err(AppError::Validation("New password and confirm password do not match.".into()));
    }

    existing.password_hash = hash_password(&payload.new_password)?;
    existing.updated_at = Utc::now();

    state.user_repo.update(&existing).await?;

    info!("Password changed for user: {}", id);

    Ok(Json(json!({ "message": "Password successfully updated" })))
}

pub async fn add_member(
    State(state): State<Arc<AppState>>,
    Path(club_id): Path<String>,
    Json(payload): Json<AddMemberRequest>,
) -> Result<impl IntoResponse, AppError> {
    let club = find_club(&state, &club_id, "add members").await?;

    let student = state.user_repo.find_by_id(&payload.student_id).await?
        .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", payload.student_id)))?;
    if student.role != user::ROLE_STUDENT {
        return Err(AppError::Conflict("User must have the student role to be added as a member.".into()));
    }

    if state.user_repo.find_member(&club.id, &student.id).await?.is_some() {
        return Err(AppError::Conflict("Student is already a member of this club.".into()));
    }

    let member = ClubMember::new(
        club.id.clone(),
        student.id.clone(),
        payload.member_role.unwrap_or_else(|| "member".to_string()),
    );
    state.user_repo.add_member(&member).await?;

    info!("Student {} joined club {}", member.member_id, member.club_id);

    Ok(Json(member))
}

pub async fn remove_member(
    State(state): State<Arc<AppState>>,
    Path((club_id, member_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let club = find_club(&state, &club_id, "remove members").await?;

    state.user_repo.remove_member(&club.id, &member_id).await?;

    info!("Student {} removed from club {}", member_id, club.id);

    Ok(Json(json!({ "status": "removed" })))
}

pub async fn list_members(
    State(state): State<Arc<AppState>>,
    Path(club_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let club = find_club(&state, &club_id, "list members").await?;

    let members = state.user_repo.list_members(&club.id).await?;
    Ok(Json(members))
}

pub async fn list_non_members(
    State(state): State<Arc<AppState>>,
    Path(club_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let club = find_club(&state, &club_id, "list non-members").await?;

    let students = state.user_repo.list_non_member_students(&club.id).await?;
    Ok(Json(students))
}

pub async fn list_user_clubs(
    State(state): State<Arc<AppState>>,
    Path(student_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let student = state.user_repo.find_by_id(&student_id).await?
        .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", student_id)))?;
    if student.role != user::ROLE_STUDENT {
        return Err(AppError::Conflict("User must have the student role to get clubs.".into()));
    }

    let clubs = state.user_repo.list_clubs_of_member(&student.id).await?;
    Ok(Json(clubs))
}

async fn find_club(state: &AppState, club_id: &str, action: &str) -> Result<User, AppError> {
    let club = state.user_repo.find_by_id(club_id).await?
        .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", club_id)))?;

    if club.role != user::ROLE_CLUB {
        return Err(AppError::Conflict(format!("User must have the club role to {}.", action)));
    }

    Ok(club)
}

fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AppError::Internal)?
        .to_string())
}
