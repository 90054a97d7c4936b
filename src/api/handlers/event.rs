use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{CreateEventRequest, UpdateEventRequest};
use crate::domain::models::{event::Event, status, user};
use crate::domain::services::{conflicts, time_range};
use crate::error::AppError;
use std::sync::Arc;
use std::collections::HashSet;
use chrono::Utc;
use serde_json::json;
use tracing::info;

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.classroom_repo.find_by_id(&payload.room_id).await?
        .ok_or_else(|| AppError::NotFound(format!("Classroom with id {} not found", payload.room_id)))?;

    let organizer = state.user_repo.find_by_id(&payload.organizer_id).await?
        .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", payload.organizer_id)))?;
    if organizer.role != user::ROLE_CLUB {
        return Err(AppError::Conflict("The organizer must be a club.".into()));
    }

    time_range::validate_range(payload.start_time, payload.end_time)?;

    // Only confirmed records block at creation; a confirmed classroom
    // request holds the room just as strongly as a confirmed event.
    conflicts::ensure_no_confirmed_classroom_request(
        state.classroom_request_repo.as_ref(),
        &payload.room_id,
        payload.start_time,
        payload.end_time,
    ).await?;

    conflicts::ensure_no_confirmed_event(
        state.event_repo.as_ref(),
        &payload.room_id,
        payload.start_time,
        payload.end_time,
    ).await?;

    let mut event = Event::new(
        payload.name,
        payload.start_time,
        payload.end_time,
        payload.room_id,
        payload.organizer_id,
        payload.description,
    );
    event.image_url = payload.image_url;
    event.private = payload.private.unwrap_or(false);
    if let Some(requested_status) = payload.status {
        if !status::is_valid(&requested_status) {
            return Err(AppError::Validation("Status must be pending, confirmed, canceled or refused.".into()));
        }
        event.status = requested_status;
    }

    let created = state.event_repo.create(&event).await?;

    info!("Event created: {} in room {}", created.id, created.room_id);

    Ok(Json(created))
}

pub async fn list_events(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let events = state.event_repo.list().await?;
    Ok(Json(events))
}

pub async fn list_pending_events(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let events = state.event_repo.list_by_status(status::PENDING).await?;
    Ok(Json(events))
}

pub async fn list_organizer_events(
    State(state): State<Arc<AppState>>,
    Path(organizer_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let events = state.event_repo.list_by_organizer(&organizer_id).await?;
    Ok(Json(events))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&id).await?
        .ok_or_else(|| AppError::NotFound(format!("Event with id {} not found", id)))?;

    Ok(Json(event))
}

pub async fn update_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut event = state.event_repo.find_by_id(&id).await?
        .ok_or_else(|| AppError::NotFound(format!("Event with id {} not found", id)))?;

    let room_id = payload.room_id.clone().unwrap_or_else(|| event.room_id.clone());
    let start = payload.start_time.unwrap_or(event.start_time);
    let end = payload.end_time.unwrap_or(event.end_time);

    // Unlike creation, the update check does not filter by status: any
    // other event occupying the room blocks the change.
    if state.event_repo.find_overlap_excluding(&room_id, &id, start, end).await?.is_some() {
        return Err(AppError::Conflict(
            "An event already exists in this room during the selected time slot.".into(),
        ));
    }

    if start >= end {
        return Err(AppError::Conflict("Start date must be before end date.".into()));
    }

    state.classroom_repo.find_by_id(&room_id).await?
        .ok_or_else(|| AppError::NotFound(format!("Classroom with id {} not found", room_id)))?;

    let organizer_id = payload.organizer_id.clone().unwrap_or_else(|| event.organizer_id.clone());
    state.user_repo.find_by_id(&organizer_id).await?
        .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", organizer_id)))?;

    if let Some(name) = payload.name {
        event.name = name;
    }
    event.start_time = start;
    event.end_time = end;
    event.room_id = room_id;
    event.organizer_id = organizer_id;
    if let Some(image_url) = payload.image_url {
        event.image_url = Some(image_url);
    }
    if let Some(description) = payload.description {
        event.description = description;
    }
    if let Some(requested_status) = payload.status {
        if !status::is_valid(&requested_status) {
            return Err(AppError::Validation("Status must be pending, confirmed, canceled or refused.".into()));
        }
        event.status = requested_status;
    }
    if let Some(private) = payload.private {
        event.private = private;
    }
    event.updated_at = Utc::now();

    let updated = state.event_repo.update(&event).await
        .map_err(|e| AppError::InternalWithMsg(e.to_string()))?;

    info!("Event updated: {}", updated.id);

    Ok(Json(updated))
}

pub async fn accept_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    set_event_status(&state, &id, status::CONFIRMED).await
}

pub async fn reject_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    set_event_status(&state, &id, status::REFUSED).await
}

// Status transitions are direct: no conflict re-check happens here, so an
// event can still be confirmed after a competing confirmed record appeared.
async fn set_event_status(
    state: &AppState,
    id: &str,
    new_status: &str,
) -> Result<Json<Event>, AppError> {
    let mut event = state.event_repo.find_by_id(id).await?
        .ok_or_else(|| AppError::NotFound(format!("Event with id {} not found", id)))?;

    event.status = new_status.to_string();
    event.updated_at = Utc::now();

    let updated = state.event_repo.update(&event).await?;

    info!("Event {} set to {}", id, new_status);

    Ok(Json(updated))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.event_repo.find_by_id(&id).await?
        .ok_or_else(|| AppError::NotFound(format!("Event with id {} not found", id)))?;

    state.event_repo.delete(&id).await?;

    info!("Event deleted: {}", id);

    Ok(Json(json!({ "status": "deleted" })))
}

/// Role-filtered event feed. Admins see every confirmed event; clubs also
/// see their own private ones; students see private events only for clubs
/// they belong to. Unknown roles see nothing.
pub async fn list_user_events(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let requester = state.user_repo.find_by_id(&id).await?
        .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))?;

    let events = match requester.role.as_str() {
        user::ROLE_ADMIN => state.event_repo.list_confirmed().await?,
        user::ROLE_CLUB => state.event_repo.list_confirmed_visible_to(&requester.id).await?,
        user::ROLE_STUDENT => {
            let clubs = state.user_repo.list_clubs_of_member(&requester.id).await?;
            let club_ids: HashSet<String> = clubs.into_iter().map(|c| c.id).collect();

            state.event_repo.list_confirmed().await?
                .into_iter()
                .filter(|e| !e.private || club_ids.contains(&e.organizer_id))
                .collect()
        }
        _ => Vec::new(),
    };

    Ok(Json(events))
}
