use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, patch, delete},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{auth, classroom, event, health, request_classroom, request_event, user};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/v1/auth/login", post(auth::login))

        // Users
        .route("/api/v1/users", post(user::create_user).get(user::list_users))
        .route("/api/v1/users/clubs", get(user::list_clubs))
        .route("/api/v1/users/students", get(user::list_students))
        .route("/api/v1/users/{id}", get(user::get_user).patch(user::update_user).delete(user::delete_user))
        .route("/api/v1/users/{id}/change-password", patch(user::change_password))

        // Club membership
        .route("/api/v1/users/{id}/members", post(user::add_member).get(user::list_members))
        .route("/api/v1/users/{id}/members/{member_id}", delete(user::remove_member))
        .route("/api/v1/users/{id}/non-members", get(user::list_non_members))
        .route("/api/v1/users/{id}/clubs", get(user::list_user_clubs))

        // Role-filtered event feed
        .route("/api/v1/users/{id}/events", get(event::list_user_events))

        // Classrooms
        .route("/api/v1/classrooms", post(classroom::create_classroom).get(classroom::list_classrooms))
        .route("/api/v1/classrooms/{id}", get(classroom::get_classroom).patch(classroom::update_classroom).delete(classroom::delete_classroom))

        // Events
        .route("/api/v1/events", post(event::create_event).get(event::list_events))
        .route("/api/v1/events/requests", get(event::list_pending_events))
        .route("/api/v1/events/requests/{id}", get(event::list_organizer_events))
        .route("/api/v1/events/{id}", get(event::get_event).patch(event::update_event).delete(event::delete_event))
        .route("/api/v1/events/{id}/accept", patch(event::accept_event))
        .route("/api/v1/events/{id}/reject", patch(event::reject_event))

        // Classroom requests
        .route("/api/v1/classroom-requests", post(request_classroom::create_request).get(request_classroom::list_requests))
        .route("/api/v1/classroom-requests/requested-by/{id}", get(request_classroom::list_requests_by_user))
        .route("/api/v1/classroom-requests/{id}", get(request_classroom::get_request).patch(request_classroom::update_request).delete(request_classroom::delete_request))

        // Event requests (authenticated)
        .route("/api/v1/event-requests", post(request_event::create_request).get(request_event::list_requests))
        .route("/api/v1/event-requests/{id}", get(request_event::get_request).patch(request_event::update_request).delete(request_event::delete_request))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
