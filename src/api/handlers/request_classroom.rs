use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::{
    requests::{CreateClassroomRequestBody, UpdateClassroomRequestBody},
    responses::ClassroomRequestWithRoom,
};
use crate::domain::models::{classroom_request::ClassroomRequest, status, user};
use crate::domain::services::{conflicts, time_range};
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use serde_json::json;
use tracing::{info, warn};

pub async fn create_request(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateClassroomRequestBody>,
) -> Result<impl IntoResponse, AppError> {
    state.classroom_repo.find_by_id(&payload.room_id).await?
        .ok_or_else(|| AppError::NotFound(format!("Classroom with id {} not found", payload.room_id)))?;

    let requester = state.user_repo.find_by_id(&payload.requested_by).await?
        .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", payload.requested_by)))?;
    if requester.role != user::ROLE_CLUB {
        return Err(AppError::Conflict("The organizer must be a club.".into()));
    }

    time_range::validate_range(payload.start_time, payload.end_time)?;

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

    let mut request = ClassroomRequest::new(
        payload.start_time,
        payload.end_time,
        payload.room_id,
        payload.requested_by,
        payload.reason,
    );
    if let Some(requested_status) = payload.status {
        if !status::is_valid(&requested_status) {
            return Err(AppError::Validation("Status must be pending, confirmed, canceled or refused.".into()));
        }
        request.status = requested_status;
    }

    let created = state.classroom_request_repo.create(&request).await?;

    info!("Classroom request created: {} for room {}", created.id, created.room_id);

    Ok(Json(created))
}

pub async fn list_requests(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let requests = state.classroom_request_repo.list().await?;
    Ok(Json(with_room_numbers(&state, requests).await))
}

pub async fn list_requests_by_user(
    State(state): State<Arc<AppState>>,
    Path(requested_by): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let requests = state.classroom_request_repo.list_by_requester(&requested_by).await?;
    Ok(Json(with_room_numbers(&state, requests).await))
}

// Best-effort augmentation: a request whose classroom no longer resolves is
// reported with a null room number instead of failing the whole listing.
async fn with_room_numbers(
    state: &AppState,
    requests: Vec<ClassroomRequest>,
) -> Vec<ClassroomRequestWithRoom> {
    let mut decorated = Vec::with_capacity(requests.len());

    for request in requests {
        let num = match state.classroom_repo.find_by_id(&request.room_id).await {
            Ok(Some(classroom)) => Some(classroom.num),
            Ok(None) => None,
            Err(e) => {
                warn!("Failed to resolve classroom {} for request {}: {:?}", request.room_id, request.id, e);
                None
            }
        };
        decorated.push(ClassroomRequestWithRoom { request, num });
    }

    decorated
}

pub async fn get_request(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let request = state.classroom_request_repo.find_by_id(&id).await?
        .ok_or_else(|| AppError::NotFound(format!("Classroom request with id {} not found", id)))?;

    Ok(Json(request))
}

pub async fn update_request(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateClassroomRequestBody>,
) -> Result<impl IntoResponse, AppError> {
    let mut request = state.classroom_request_repo.find_by_id(&id).await?
        .ok_or_else(|| AppError::NotFound(format!("Classroom request with id {} not found", id)))?;

    let room_id = payload.room_id.clone().unwrap_or_else(|| request.room_id.clone());
    let start = payload.start_time.unwrap_or(request.start_time);
    let end = payload.end_time.unwrap_or(request.end_time);

    // Update-time conflicts ignore status: any other request on the room
    // in that window blocks, confirmed or not.
    if state.classroom_request_repo.find_overlap_excluding(&room_id, &id, start, end).await?.is_some() {
        return Err(AppError::Conflict(
            "An event already exists in this room during the selected time slot.".into(),
        ));
    }

    if start >= end {
        return Err(AppError::Conflict("Start date must be before end date.".into()));
    }

    if payload.room_id.is_some() {
        state.classroom_repo.find_by_id(&room_id).await?
            .ok_or_else(|| AppError::NotFound(format!("Classroom with id {} not found", room_id)))?;
    }
    if let Some(requested_by) = &payload.requested_by {
        state.user_repo.find_by_id(requested_by).await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", requested_by)))?;
        request.requested_by = requested_by.clone();
    }

    request.start_time = start;
    request.end_time = end;
    request.room_id = room_id;
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

    let updated = state.classroom_request_repo.update(&request).await
        .map_err(|e| AppError::InternalWithMsg(e.to_string()))?;

    info!("Classroom request updated: {}", updated.id);

    Ok(Json(updated))
}

pub async fn delete_request(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.classroom_request_repo.find_by_id(&id).await?
        .ok_or_else(|| AppError::NotFound(format!("Classroom request with id {} not found", id)))?;

    state.classroom_request_repo.delete(&id).await?;

    info!("Classroom request deleted: {}", id);

    Ok(Json(json!({ "status": "deleted" })))
}
