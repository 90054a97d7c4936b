use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{CreateClassroomRequest, UpdateClassroomRequest};
use crate::domain::models::classroom::Classroom;
use crate::error::AppError;
use std::sync::Arc;
use serde_json::json;
use tracing::info;

pub async fn create_classroom(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateClassroomRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.capacity <= 0 {
        return Err(AppError::Validation("Capacity must be a positive integer.".into()));
    }

    if state.classroom_repo.find_by_num(&payload.num).await?.is_some() {
        return Err(AppError::Conflict("A classroom with this number already exists.".into()));
    }

    let classroom = Classroom::new(payload.num, payload.capacity, payload.available.unwrap_or(true));
    let created = state.classroom_repo.create(&classroom).await?;

    info!("Classroom created: {} (num {})", created.id, created.num);

    Ok(Json(created))
}

pub async fn list_classrooms(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let classrooms = state.classroom_repo.list().await?;
    Ok(Json(classrooms))
}

pub async fn get_classroom(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let classroom = state.classroom_repo.find_by_id(&id).await?
        .ok_or_else(|| AppError::NotFound(format!("Classroom with id {} not found", id)))?;

    Ok(Json(classroom))
}

pub async fn update_classroom(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateClassroomRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut classroom = state.classroom_repo.find_by_id(&id).await?
        .ok_or_else(|| AppError::NotFound(format!("Classroom with id {} not found", id)))?;

    if let Some(num) = &payload.num {
        if state.classroom_repo.find_by_num_excluding(num, &id).await?.is_some() {
            return Err(AppError::Conflict("A classroom with this number already exists.".into()));
        }
        classroom.num = num.clone();
    }
    if let Some(capacity) = payload.capacity {
        if capacity <= 0 {
            return Err(AppError::Validation("Capacity must be a positive integer.".into()));
        }
        classroom.capacity = capacity;
    }
    if let Some(available) = payload.available {
        classroom.available = available;
    }

    let updated = state.classroom_repo.update(&classroom).await?;

    info!("Classroom updated: {}", updated.id);

    Ok(Json(updated))
}

pub async fn delete_classroom(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.classroom_repo.find_by_id(&id).await?
        .ok_or_else(|| AppError::NotFound(format!("Classroom with id {} not found", id)))?;

    // Deletion never cascades: events and requests keep their room
    // reference even once it dangles.
    state.classroom_repo.delete(&id).await?;

    info!("Classroom deleted: {}", id);

    Ok(Json(json!({ "status": "deleted" })))
}
