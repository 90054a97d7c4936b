use chrono::{DateTime, Utc};
use crate::domain::ports::{ClassroomRequestRepository, EventRepository, EventRequestRepository};
use crate::error::AppError;

/// Rejects the interval if a confirmed event already occupies the room.
/// Pending, canceled and refused events do not block.
pub async fn ensure_no_confirmed_event(
    repo: &dyn EventRepository,
    room_id: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<(), AppError> {
    if repo.find_confirmed_overlap(room_id, start, end).await?.is_some() {
        return Err(AppError::Conflict(
            "An accepted event already exists for this room in the selected time slot.".into(),
        ));
    }
    Ok(())
}

/// Rejects the interval if a confirmed classroom request already holds the room.
pub async fn ensure_no_confirmed_classroom_request(
    repo: &dyn ClassroomRequestRepository,
    room_id: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<(), AppError> {
    if repo.find_confirmed_overlap(room_id, start, end).await?.is_some() {
        return Err(AppError::Conflict(
            "An accepted request already exists for this room in the selected time slot.".into(),
        ));
    }
    Ok(())
}

/// Rejects the interval if a confirmed request already claims the event's slot.
pub async fn ensure_no_confirmed_event_request(
    repo: &dyn EventRequestRepository,
    event_id: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<(), AppError> {
    if repo.find_confirmed_overlap(event_id, start, end).await?.is_some() {
        return Err(AppError::Conflict(
            "An accepted request already exists for this event in the selected time slot.".into(),
        ));
    }
    Ok(())
}
