use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{CreateEventRequestBody, UpdateEventRequestBody};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::{event_request::EventRequest, status, user};
use crate::domain::services::{conflicts, time_range};
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use serde_json::json;
use tracing::info;

pub async fn create_request(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    Json(payload): Json<CreateEventRequestBody>,
) -> Result<impl IntoResponse, AppError> {
    state.event_repo.find_by_id(&payload.event_id).await?
        .ok_or_else(|| AppError::NotFound(format!("Event with id {} not found", payload.event_id)))?;

    let requester = state.user_repo.find_by_id(&payload.requested_by).await?
        .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", payload.requested_by)))?;
    if requester.role != user::ROLE_CLUB {
        return Err(AppError::Conflict("The organizer must be a club.".into()));
    }

    time_range::validate_range(payload.start_time, payload.end_time)?;

    conflicts::ensure_no_confirmed_event_request(
        state.event_request_repo.as_ref(),
        &payload.event_id,
        payload.start_time,
        payload.end_time,
    ).await?;

    let mut request = EventRequest::new(
        payload.start_time,
        payload.end_time,
        payload.event_id,
        payload.requested_by,
        payload.reason,
    );
    if let Some(requested_status) = payload.status {
        if !status::is_valid(&requested_status) {
            return Err(AppError::Validation("Status must be pending, confirmed, canceled or refused.".into()));
        }
        request.status = requested_status;
    }

    let created = state.event_request_repo.create(&request).await?;

    info!("Event request created: {} for event {}", created.id, created.event_id);

    Ok(Json(created))
}

pub async fn list_requests(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let requests = state.event_request_repo.list().await?;
    Ok(Json(requests))
}

pub async fn get_request(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let request = state.event_request_repo.find_by_id(&id).await?
        .ok_or_else(|| AppError::NotFound(format!("Event request with id {} not found", id)))?;

    Ok(Json(request))
}

pub async fn update_request(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateEventRequestBody>,
) -> Result<impl IntoResponse, AppError> {
    let mut request = state.event_request_repo.find_by_id(&id).await?
        .ok_or_else(|| AppError::NotFound(format!("Event request with id {} not found", id)))?;

    let event_id = payload.event_id.clone().unwrap_or_else(|| request.event_id.clone());
    let start = payload.start_time.unwrap_or(request.start_time);
    let end = payload.end_time.unwrap_or(request.end_time);

    // Same asymmetry as the classroom workflow: the update check matches
    // every other request for the event, regardless of status.
    if state.event_request_repo.find_overlap_excluding(&event_id, &id, start, end).await?.is_some() {
        return Err(AppError::Conflict(
            "An event already exists in the selected time slot.".into(),
        ));
    }

    if start >= end {
        return Err(AppError::Conflict("Start date must be before end date.".into()));
    }

    if payload.event_id.is_some() {
        state.event_repo.find_by_id(&event_id).await?
            .ok_or_else(|| AppError::NotFound(format!("Event with id {} not found", event_id)))?;
    }
    if let Some(requested_by) = &payload.requested_by {
        state.user_repo.find_by_id(requested_by).await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", requested_by)))?;
        request.requested_by = requested_by.clone();
    }

    request.start_time = start;
    request.end_time = end;
    request.event_id = event_id;
    if let Some(reason) = payload.reason {
        request.reason = reason;
    }
    if let Some(requested_status) = payload.status {
        if !status::is_valid(&requested_status) {
            return Err(AppError::Validation("Status must be pending, confirmed, canceled or refused.".into()));
        }
        request.status = requested_status;
    }
    request.updated_at = Utc::now();

    let updated = state.event_request_repo.update(&request).await
        .map_err(|e| AppError::InternalWithMsg(e.to_string()))?;

    info!("Event request updated: {}", updated.id);

    Ok(Json(updated))
}

pub async fn delete_request(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.event_request_repo.find_by_id(&id).await?
        .ok_or_else(|| AppError::NotFound(format!("Event request with id {} not found", id)))?;

    state.event_request_repo.delete(&id).await?;

    info!("Event request deleted: {}", id);

    Ok(Json(json!({ "status": "deleted" })))
}
