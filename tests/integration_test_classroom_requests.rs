mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use chrono::{Duration, Utc};
use common::TestApp;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_classroom(app: &TestApp, num: &str) -> String {
    let res = app.router.clone().oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/v1/classrooms")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "num": num, "capacity": 35 }).to_string()))
            .unwrap(),
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    parse_body(res).await["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_request_lifecycle_and_confirmed_conflict() {
    let app = TestApp::new().await;
    let room_id = create_classroom(&app, "RQ-1").await;
    let (club_id, _) = app.create_user("Coding Club", "54000001", "coding@example.com", "club").await;

    let start = Utc::now() + Duration::days(3);
    let end = start + Duration::hours(2);

    let make_payload = |reason: &str| json!({
        "start_time": start.to_rfc3339(),
        "end_time": end.to_rfc3339(),
        "room_id": room_id,
        "requested_by": club_id,
        "reason": reason
    });

    let res = app.router.clone().oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/v1/classroom-requests")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(make_payload("Weekly meetup").to_string()))
            .unwrap(),
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let first = parse_body(res).await;
    assert_eq!(first["status"], "pending");
    let first_id = first["id"].as_str().unwrap().to_string();

    // A pending request does not block a second one on the same slot.
    let res = app.router.clone().oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/v1/classroom-requests")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(make_payload("Competing meetup").to_string()))
            .unwrap(),
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let second_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    // Confirm the first through its update endpoint. The other pending
    // request must move aside first or the overlap check fires, so update
    // the second out of the window before confirming.
    let moved = Utc::now() + Duration::days(4);
    let res = app.router.clone().oneshot(
        Request::builder()
            .method("PATCH")
            .uri(format!("/api/v1/classroom-requests/{}", second_id))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "start_time": moved.to_rfc3339(),
                "end_time": (moved + Duration::hours(2)).to_rfc3339()
            }).to_string()))
            .unwrap(),
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.router.clone().oneshot(
        Request::builder()
            .method("PATCH")
            .uri(format!("/api/v1/classroom-requests/{}", first_id))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "status": "confirmed" }).to_string()))
            .unwrap(),
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["status"], "confirmed");

    // Creation on the confirmed slot is now rejected.
    let res = app.router.clone().oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/v1/classroom-requests")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(make_payload("Too late").to_string()))
            .unwrap(),
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body = parse_body(res).await;
    assert_eq!(body["error"], "An accepted request already exists for this room in the selected time slot.");
}

#[tokio::test]
async fn test_request_blocked_by_confirmed_event() {
    let app = TestApp::new().await;
    let room_id = create_classroom(&app, "RQ-2").await;
    let (club_id, _) = app.create_user("Science Club", "54000002", "science@example.com", "club").await;

    let start = Utc::now() + Duration::days(5);
    let end = start + Duration::hours(2);

    let res = app.router.clone().oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/v1/events")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "name": "Expo",
                "start_time": start.to_rfc3339(),
                "end_time": end.to_rfc3339(),
                "room_id": room_id,
                "organizer_id": club_id,
                "description": "Science fair",
                "status": "confirmed"
            }).to_string()))
            .unwrap(),
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // A confirmed event holds the room against classroom requests too.
    let res = app.router.clone().oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/v1/classroom-requests")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "start_time": (start + Duration::minutes(30)).to_rfc3339(),
                "end_time": (end + Duration::minutes(30)).to_rfc3339(),
                "room_id": room_id,
                "requested_by": club_id,
                "reason": "Overlapping ask"
            }).to_string()))
            .unwrap(),
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body = parse_body(res).await;
    assert_eq!(body["error"], "An accepted event already exists for this room in the selected time slot.");
}

#[tokio::test]
async fn test_request_listings_carry_room_number() {
    let app = TestApp::new().await;
    let room_id = create_classroom(&app, "RQ-3").await;
    let (club_id, _) = app.create_user("Art Club", "54000003", "art@example.com", "club").await;
    let (other_club_id, _) = app.create_user("Photo Club", "54000004", "photo@example.com", "club").await;

    let start = Utc::now() + Duration::days(6);
    let res = app.router.clone().oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/v1/classroom-requests")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "start_time": start.to_rfc3339(),
                "end_time": (start + Duration::hours(1)).to_rfc3339(),
                "room_id": room_id,
                "requested_by": club_id,
                "reason": "Vernissage prep"
            }).to_string()))
            .unwrap(),
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.router.clone().oneshot(
        Request::builder()
            .method("GET")
            .uri("/api/v1/classroom-requests")
            .body(Body::empty())
            .unwrap(),
    ).await.unwrap();
    let list = parse_body(res).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["num"], "RQ-3");

    // Filter by requester.
    let res = app.router.clone().oneshot(
        Request::builder()
            .method("GET")
            .uri(format!("/api/v1/classroom-requests/requested-by/{}", club_id))
            .body(Body::empty())
            .unwrap(),
    ).await.unwrap();
    assert_eq!(parse_body(res).await.as_array().unwrap().len(), 1);

    let res = app.router.clone().oneshot(
        Request::builder()
            .method("GET")
            .uri(format!("/api/v1/classroom-requests/requested-by/{}", other_club_id))
            .body(Body::empty())
            .unwrap(),
    ).await.unwrap();
    assert!(parse_body(res).await.as_array().unwrap().is_empty());

    // Deleting the classroom leaves the request with a null room number.
    let res = app.router.clone().oneshot(
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/v1/classrooms/{}", room_id))
            .body(Body::empty())
            .unwrap(),
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.router.clone().oneshot(
        Request::builder()
            .method("GET")
            .uri("/api/v1/classroom-requests")
            .body(Body::empty())
            .unwrap(),
    ).await.unwrap();
    let list = parse_body(res).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert!(list[0]["num"].is_null());
    assert_eq!(list[0]["room_id"], room_id);
}

#[tokio::test]
async fn test_request_requires_club_requester() {
    let app = TestApp::new().await;
    let room_id = create_classroom(&app, "RQ-4").await;
    let (student_id, _) = app.create_user("Lina Student", "54000005", "lina@example.com", "student").await;

    let start = Utc::now() + Duration::days(2);
    let res = app.router.clone().oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/v1/classroom-requests")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "start_time": start.to_rfc3339(),
                "end_time": (start + Duration::hours(1)).to_rfc3339(),
                "room_id": room_id,
                "requested_by": student_id,
                "reason": "Study group"
            }).to_string()))
            .unwrap(),
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body = parse_body(res).await;
    assert_eq!(body["error"], "The organizer must be a club.");
}

#[tokio::test]
async fn test_request_get_update_delete() {
    let app = TestApp::new().await;
    let room_id = create_classroom(&app, "RQ-5").await;
    let (club_id, _) = app.create_user("Eco Club", "54000006", "eco@example.com", "club").await;

    let start = Utc::now() + Duration::days(3);
    let res = app.router.clone().oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/v1/classroom-requests")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "start_time": start.to_rfc3339(),
                "end_time": (start + Duration::hours(1)).to_rfc3339(),
                "room_id": room_id,
                "requested_by": club_id,
                "reason": "Planning"
            }).to_string()))
            .unwrap(),
    ).await.unwrap();
    let id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = app.router.clone().oneshot(
        Request::builder()
            .method("GET")
            .uri(format!("/api/v1/classroom-requests/{}", id))
            .body(Body::empty())
            .unwrap(),
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["reason"], "Planning");

    let res = app.router.clone().oneshot(
        Request::builder()
            .method("PATCH")
            .uri(format!("/api/v1/classroom-requests/{}", id))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "reason": "Rescheduled planning" }).to_string()))
            .unwrap(),
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["reason"], "Rescheduled planning");

    // Pointing the request at a missing room is rejected.
    let res = app.router.clone().oneshot(
        Request::builder()
            .method("PATCH")
            .uri(format!("/api/v1/classroom-requests/{}", id))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "room_id": "ghost-room" }).to_string()))
            .unwrap(),
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app.router.clone().oneshot(
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/v1/classroom-requests/{}", id))
            .body(Body::empty())
            .unwrap(),
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.router.clone().oneshot(
        Request::builder()
            .method("GET")
            .uri(format!("/api/v1/classroom-requests/{}", id))
            .body(Body::empty())
            .unwrap(),
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
