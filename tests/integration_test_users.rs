mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::TestApp;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_user_creation_returns_initial_password_once() {
    let app = TestApp::new().await;

    let res = app.router.clone().oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/v1/users")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "full_name": "Amira Ben Salah",
                "phone": "22334455",
                "email": "amira@example.com",
                "role": "student"
            }).to_string()))
            .unwrap(),
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    let id = body["id"].as_str().unwrap().to_string();
    assert_eq!(body["initial_password"].as_str().unwrap().len(), 16);
    assert!(body.get("password_hash").is_none());

    // The plaintext never shows up again.
    let res = app.router.clone().oneshot(
        Request::builder()
            .method("GET")
            .uri(format!("/api/v1/users/{}", id))
            .body(Body::empty())
            .unwrap(),
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert!(body.get("initial_password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_user_creation_validation() {
    let app = TestApp::new().await;

    // Phone must be exactly 8 digits.
    let res = app.router.clone().oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/v1/users")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "full_name": "Bad Phone",
                "phone": "1234",
                "email": "badphone@example.com",
                "role": "student"
            }).to_string()))
            .unwrap(),
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(res).await["error"], "Phone number must contain exactly 8 digits.");

    // Unknown role is rejected.
    let res = app.router.clone().oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/v1/users")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "full_name": "Bad Role",
                "phone": "11223344",
                "email": "badrole@example.com",
                "role": "teacher"
            }).to_string()))
            .unwrap(),
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(res).await["error"], "Role must be admin, student or club.");

    // Duplicate email or phone is rejected.
    app.create_user("Original", "33445566", "dup@example.com", "student").await;

    let res = app.router.clone().oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/v1/users")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "full_name": "Same Phone",
                "phone": "33445566",
                "email": "different@example.com",
                "role": "student"
            }).to_string()))
            .unwrap(),
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(res).await["error"], "User with this email or phone number already exists.");
}

#[tokio::test]
async fn test_user_get_requires_uuid() {
    let app = TestApp::new().await;

    let res = app.router.clone().oneshot(
        Request::builder()
            .method("GET")
            .uri("/api/v1/users/not-a-uuid")
            .body(Body::empty())
            .unwrap(),
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(res).await["error"], "Invalid ID format.");

    let res = app.router.clone().oneshot(
        Request::builder()
            .method("GET")
            .uri(format!("/api/v1/users/{}", Uuid::new_v4()))
            .body(Body::empty())
            .unwrap(),
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_user_update_forbids_password_and_role() {
    let app = TestApp::new().await;
    let (id, _) = app.create_user("Updini", "44556677", "updini@example.com", "student").await;

    let res = app.router.clone().oneshot(
        Request::builder()
            .method("PATCH")
            .uri(format!("/api/v1/users/{}", id))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "role": "admin" }).to_string()))
            .unwrap(),
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(parse_body(res).await["error"], "Updating password or role is not allowed.");

    let res = app.router.clone().oneshot(
        Request::builder()
            .method("PATCH")
            .uri(format!("/api/v1/users/{}", id))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "full_name": "Updini Renamed" }).to_string()))
            .unwrap(),
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["full_name"], "Updini Renamed");
}

#[tokio::test]
async fn test_user_update_email_collision() {
    let app = TestApp::new().await;
    let (_a, _) = app.create_user("Taken", "55667788", "taken@example.com", "student").await;
    let (b, _) = app.create_user("Mover", "66778899", "mover@example.com", "student").await;

    let res = app.router.clone().oneshot(
        Request::builder()
            .method("PATCH")
            .uri(format!("/api/v1/users/{}", b))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "email": "taken@example.com" }).to_string()))
            .unwrap(),
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(parse_body(res).await["error"], "User with this email already exists.");
}

#[tokio::test]
async fn test_change_password_flow() {
    let app = TestApp::new().await;
    let (id, password) = app.create_user("Cycler", "77889900", "cycler@example.com", "student").await;

    // Wrong current password.
    let res = app.router.clone().oneshot(
        Request::builder()
            .method("PATCH")
            .uri(format!("/api/v1/users/{}/change-password", id))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "current_password": "wrong",
                "new_password": "NewSecret123",
                "confirm_password": "NewSecret123"
            }).to_string()))
            .unwrap(),
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(res).await["error"], "Current password is incorrect.");

    // Confirmation mismatch.
    let res = app.router.clone().oneshot(
        Request::builder()
            .method("PATCH")
            .uri(format!("/api/v1/users/{}/change-password", id))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "current_password": password,
                "new_password": "NewSecret123",
                "confirm_password": "Different123"
            }).to_string()))
            .unwrap(),
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(res).await["error"], "New password and confirm password do not match.");

    // Success path, then login with the new password.
    let res = app.router.clone().oneshot(
        Request::builder()
            .method("PATCH")
            .uri(format!("/api/v1/users/{}/change-password", id))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "current_password": password,
                "new_password": "NewSecret123",
                "confirm_password": "NewSecret123"
            }).to_string()))
            .unwrap(),
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let token = app.login("cycler@example.com", "NewSecret123").await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_role_listings() {
    let app = TestApp::new().await;
    app.create_user("Student One", "10000001", "s1@example.com", "student").await;
    app.create_user("Student Two", "10000002", "s2@example.com", "student").await;
    app.create_user("Club One", "10000003", "c1@example.com", "club").await;
    app.create_user("Admin One", "10000004", "a1@example.com", "admin").await;

    let res = app.router.clone().oneshot(
        Request::builder()
            .method("GET")
            .uri("/api/v1/users/students")
            .body(Body::empty())
            .unwrap(),
    ).await.unwrap();
    assert_eq!(parse_body(res).await.as_array().unwrap().len(), 2);

    let res = app.router.clone().oneshot(
        Request::builder()
            .method("GET")
            .uri("/api/v1/users/clubs")
            .body(Body::empty())
            .unwrap(),
    ).await.unwrap();
    assert_eq!(parse_body(res).await.as_array().unwrap().len(), 1);

    let res = app.router.clone().oneshot(
        Request::builder()
            .method("GET")
            .uri("/api/v1/users")
            .body(Body::empty())
            .unwrap(),
    ).await.unwrap();
    assert_eq!(parse_body(res).await.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_club_membership_flow() {
    let app = TestApp::new().await;
    let (club_id, _) = app.create_user("Membership Club", "20000001", "mclub@example.com", "club").await;
    let (student_id, _) = app.create_user("Joiner", "20000002", "joiner@example.com", "student").await;
    let (other_student, _) = app.create_user("Outsider", "20000003", "outsider@example.com", "student").await;

    // Only clubs can take members.
    let res = app.router.clone().oneshot(
        Request::builder()
            .method("POST")
            .uri(format!("/api/v1/users/{}/members", student_id))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "student_id": other_student }).to_string()))
            .unwrap(),
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(parse_body(res).await["error"], "User must have the club role to add members.");

    let res = app.router.clone().oneshot(
        Request::builder()
            .method("POST")
            .uri(format!("/api/v1/users/{}/members", club_id))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "student_id": student_id }).to_string()))
            .unwrap(),
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let member = parse_body(res).await;
    assert_eq!(member["member_role"], "member");

    // Adding twice is a conflict.
    let res = app.router.clone().oneshot(
        Request::builder()
            .method("POST")
            .uri(format!("/api/v1/users/{}/members", club_id))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "student_id": student_id }).to_string()))
            .unwrap(),
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(parse_body(res).await["error"], "Student is already a member of this club.");

    // A club cannot be added as a member.
    let (second_club, _) = app.create_user("Second Club", "20000004", "club2@example.com", "club").await;
    let res = app.router.clone().oneshot(
        Request::builder()
            .method("POST")
            .uri(format!("/api/v1/users/{}/members", club_id))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "student_id": second_club }).to_string()))
            .unwrap(),
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = app.router.clone().oneshot(
        Request::builder()
            .method("GET")
            .uri(format!("/api/v1/users/{}/members", club_id))
            .body(Body::empty())
            .unwrap(),
    ).await.unwrap();
    let members = parse_body(res).await;
    assert_eq!(members.as_array().unwrap().len(), 1);
    assert_eq!(members[0]["full_name"], "Joiner");

    // Outsider is the only non-member student left.
    let res = app.router.clone().oneshot(
        Request::builder()
            .method("GET")
            .uri(format!("/api/v1/users/{}/non-members", club_id))
            .body(Body::empty())
            .unwrap(),
    ).await.unwrap();
    let non_members = parse_body(res).await;
    assert_eq!(non_members.as_array().unwrap().len(), 1);
    assert_eq!(non_members[0]["full_name"], "Outsider");

    // The student sees the club from their side.
    let res = app.router.clone().oneshot(
        Request::builder()
            .method("GET")
            .uri(format!("/api/v1/users/{}/clubs", student_id))
            .body(Body::empty())
            .unwrap(),
    ).await.unwrap();
    let clubs = parse_body(res).await;
    assert_eq!(clubs.as_array().unwrap().len(), 1);
    assert_eq!(clubs[0]["full_name"], "Membership Club");

    // Removal, then the membership listing is empty again.
    let res = app.router.clone().oneshot(
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/v1/users/{}/members/{}", club_id, student_id))
            .body(Body::empty())
            .unwrap(),
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.router.clone().oneshot(
        Request::builder()
            .method("GET")
            .uri(format!("/api/v1/users/{}/members", club_id))
            .body(Body::empty())
            .unwrap(),
    ).await.unwrap();
    assert!(parse_body(res).await.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_user_delete_is_idempotent() {
    let app = TestApp::new().await;
    let (id, _) = app.create_user("Ghost", "30000001", "ghost@example.com", "student").await;

    for _ in 0..2 {
        let res = app.router.clone().oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/users/{}", id))
                .body(Body::empty())
                .unwrap(),
        ).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(parse_body(res).await["status"], "deleted");
    }
}
