use campus_booking_backend::{
    api::router::create_router,
    config::Config,
    domain::services::auth_service::AuthService,
    infra::repositories::{
        sqlite_classroom_repo::SqliteClassroomRepo,
        sqlite_classroom_request_repo::SqliteClassroomRequestRepo,
        sqlite_event_repo::SqliteEventRepo,
        sqlite_event_request_repo::SqliteEventRequestRepo,
        sqlite_user_repo::SqliteUserRepo,
    },
    state::AppState,
};
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use serde_json::Value;
use std::str::FromStr;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            jwt_secret: "test-secret".to_string(),
        };

        let auth_service = Arc::new(AuthService::new(&config));

        let state = Arc::new(AppState {
            config: config.clone(),
            user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
            classroom_repo: Arc::new(SqliteClassroomRepo::new(pool.clone())),
            event_repo: Arc::new(SqliteEventRepo::new(pool.clone())),
            classroom_request_repo: Arc::new(SqliteClassroomRequestRepo::new(pool.clone())),
            event_request_repo: Arc::new(SqliteEventRequestRepo::new(pool.clone())),
            auth_service,
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    /// Creates a user through the API and returns (id, initial_password).
    #[allow(dead_code)]
    pub async fn create_user(&self, full_name: &str, phone: &str, email: &str, role: &str) -> (String, String) {
        let payload = serde_json::json!({
            "full_name": full_name,
            "phone": phone,
            "email": email,
            "role": role
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/users")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("User creation failed in test helper: status {}", response.status());
        }

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        let id = body["id"].as_str().expect("No id in user response").to_string();
        let password = body["initial_password"].as_str().expect("No initial_password").to_string();
        (id, password)
    }

    #[allow(dead_code)]
    pub async fn login(&self, email: &str, password: &str) -> String {
        let payload = serde_json::json!({
            "email": email,
            "password": password
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("Login failed in test helper: status {}", response.status());
        }

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        body["access_token"].as_str().expect("No access_token in body").to_string()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}
