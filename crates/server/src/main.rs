// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use nalka_api::{
    AddGiftRequest, ApiError, AuthenticationService, CreateEventRequest, DrawResponse,
    EventDetail, EventSummary, GiftItemInfo, InviteRequest, InviteResponse, LoginRequest,
    LoginTokenResponse, MyAssignmentResponse, SessionResponse, TokenLoginRequest,
    UpdateEventRequest, UpdateProfileRequest, UserInfo,
};
use nalka_persistence::Persistence;

mod session;

use session::SessionUser;

/// Nalka Server - HTTP server for the Nalka gift coordination service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The persistence layer behind a mutex for concurrent handlers.
    persistence: Arc<Mutex<Persistence>>,
}

/// API response for write operations with no payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WriteResponse {
    /// Success indicator.
    success: bool,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) | ApiError::DrawImpossible => StatusCode::CONFLICT,
            ApiError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::NotEnoughParticipants(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %err, "Internal error");
        }
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// The client address for rate-limiting purposes.
///
/// The service is expected to sit behind a reverse proxy, so the first
/// `X-Forwarded-For` entry wins; direct connections fall back to a
/// single shared bucket.
fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map_or_else(|| String::from("direct"), |ip| ip.trim().to_string())
}

/// Handler for POST `/api/auth/login-request`.
///
/// Issues a short-lived login token for an email address.
async fn handle_login_request(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginTokenResponse>, HttpError> {
    let ip: String = client_ip(&headers);
    let mut persistence = app_state.persistence.lock().await;
    let token: String =
        AuthenticationService::request_login_token(&mut persistence, &req.email, &ip)?;
    drop(persistence);

    Ok(Json(LoginTokenResponse { token }))
}

/// Handler for POST `/api/auth/login`.
///
/// Trades a login token for a session.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<TokenLoginRequest>,
) -> Result<Json<SessionResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let (session_token, user) =
        AuthenticationService::login_with_token(&mut persistence, &req.token)?;
    drop(persistence);

    Ok(Json(SessionResponse {
        session_token,
        user: UserInfo {
            user_id: user.user_id,
            email: user.email,
            name: user.name,
        },
    }))
}

/// Handler for POST `/api/auth/logout`.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_user): SessionUser,
    headers: HeaderMap,
) -> Result<Json<WriteResponse>, HttpError> {
    // The extractor already proved the header is well-formed.
    let token: &str = headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or_default();

    let mut persistence = app_state.persistence.lock().await;
    AuthenticationService::logout(&mut persistence, token)?;
    drop(persistence);

    Ok(Json(WriteResponse { success: true }))
}

/// Handler for GET `/api/events`.
async fn handle_list_events(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user): SessionUser,
) -> Result<Json<Vec<EventSummary>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let events: Vec<EventSummary> = nalka_api::list_my_events(&mut persistence, &user)?;
    drop(persistence);

    Ok(Json(events))
}

/// Handler for POST `/api/events`.
async fn handle_create_event(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Json(req): Json<CreateEventRequest>,
) -> Result<Json<EventDetail>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let detail: EventDetail = nalka_api::create_event(&mut persistence, &user, &req)?;
    drop(persistence);

    Ok(Json(detail))
}

/// Handler for GET `/api/events/{slug}`.
async fn handle_get_event(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(slug): Path<String>,
) -> Result<Json<EventDetail>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let detail: EventDetail = nalka_api::get_event(&mut persistence, &user, &slug)?;
    drop(persistence);

    Ok(Json(detail))
}

/// Handler for PATCH `/api/events/{slug}`.
async fn handle_update_event(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(slug): Path<String>,
    Json(req): Json<UpdateEventRequest>,
) -> Result<Json<EventDetail>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let detail: EventDetail = nalka_api::update_event(&mut persistence, &user, &slug, &req)?;
    drop(persistence);

    Ok(Json(detail))
}

/// Handler for DELETE `/api/events/{slug}`.
async fn handle_delete_event(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(slug): Path<String>,
) -> Result<Json<WriteResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    nalka_api::delete_event(&mut persistence, &user, &slug)?;
    drop(persistence);

    Ok(Json(WriteResponse { success: true }))
}

/// Handler for POST `/api/events/{slug}/invite`.
async fn handle_invite_member(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(slug): Path<String>,
    headers: HeaderMap,
    Json(req): Json<InviteRequest>,
) -> Result<Json<InviteResponse>, HttpError> {
    let ip: String = client_ip(&headers);
    let mut persistence = app_state.persistence.lock().await;
    let response: InviteResponse =
        nalka_api::invite_member(&mut persistence, &user, &slug, &req.email, &ip)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/events/{slug}/leave`.
async fn handle_leave_event(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(slug): Path<String>,
) -> Result<Json<WriteResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    nalka_api::leave_event(&mut persistence, &user, &slug)?;
    drop(persistence);

    Ok(Json(WriteResponse { success: true }))
}

/// Handler for POST `/api/events/{slug}/members/{user_id}/remove`.
async fn handle_remove_member(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path((slug, target_user_id)): Path<(String, i64)>,
) -> Result<Json<WriteResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    nalka_api::remove_member(&mut persistence, &user, &slug, target_user_id)?;
    drop(persistence);

    Ok(Json(WriteResponse { success: true }))
}

/// Handler for POST `/api/events/{slug}/draw`.
async fn handle_launch_draw(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(slug): Path<String>,
) -> Result<Json<DrawResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: DrawResponse = nalka_api::launch_draw(&mut persistence, &user, &slug)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/secret-santa/{event_id}/me`.
async fn handle_my_assignment(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(event_id): Path<i64>,
) -> Result<Json<MyAssignmentResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: MyAssignmentResponse =
        nalka_api::my_assignment(&mut persistence, &user, event_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/gifts`.
async fn handle_add_gift(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Json(req): Json<AddGiftRequest>,
) -> Result<Json<GiftItemInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let item: GiftItemInfo = nalka_api::add_gift(&mut persistence, &user, &req)?;
    drop(persistence);

    Ok(Json(item))
}

/// Handler for DELETE `/api/gifts/{item_id}`.
async fn handle_delete_gift(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(item_id): Path<i64>,
) -> Result<Json<WriteResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    nalka_api::delete_gift(&mut persistence, &user, item_id)?;
    drop(persistence);

    Ok(Json(WriteResponse { success: true }))
}

/// Handler for POST `/api/gifts/{item_id}/reserve`.
async fn handle_reserve_gift(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(item_id): Path<i64>,
) -> Result<Json<WriteResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    nalka_api::reserve_gift(&mut persistence, &user, item_id)?;
    drop(persistence);

    Ok(Json(WriteResponse { success: true }))
}

/// Handler for POST `/api/gifts/{item_id}/release`.
async fn handle_release_gift(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(item_id): Path<i64>,
) -> Result<Json<WriteResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    nalka_api::release_gift(&mut persistence, &user, item_id)?;
    drop(persistence);

    Ok(Json(WriteResponse { success: true }))
}

/// Handler for DELETE `/api/account`.
async fn handle_delete_account(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user): SessionUser,
) -> Result<Json<WriteResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    nalka_api::delete_account(&mut persistence, &user)?;
    drop(persistence);

    Ok(Json(WriteResponse { success: true }))
}

/// Handler for PATCH `/api/profile`.
async fn handle_update_profile(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<UserInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let info: UserInfo = nalka_api::update_profile(&mut persistence, &user, &req)?;
    drop(persistence);

    Ok(Json(info))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/auth/login-request", post(handle_login_request))
        .route("/api/auth/login", post(handle_login))
        .route("/api/auth/logout", post(handle_logout))
        .route("/api/events", get(handle_list_events))
        .route("/api/events", post(handle_create_event))
        .route("/api/events/{slug}", get(handle_get_event))
        .route("/api/events/{slug}", patch(handle_update_event))
        .route("/api/events/{slug}", delete(handle_delete_event))
        .route("/api/events/{slug}/invite", post(handle_invite_member))
        .route("/api/events/{slug}/leave", post(handle_leave_event))
        .route(
            "/api/events/{slug}/members/{user_id}/remove",
            post(handle_remove_member),
        )
        .route("/api/events/{slug}/draw", post(handle_launch_draw))
        .route("/api/secret-santa/{event_id}/me", get(handle_my_assignment))
        .route("/api/gifts", post(handle_add_gift))
        .route("/api/gifts/{item_id}", delete(handle_delete_gift))
        .route("/api/gifts/{item_id}/reserve", post(handle_reserve_gift))
        .route("/api/gifts/{item_id}/release", post(handle_release_gift))
        .route("/api/account", delete(handle_delete_account))
        .route("/api/profile", patch(handle_update_profile))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Nalka Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use serde_json::json;
    use tower::ServiceExt;

    /// Helper to create test app state with in-memory persistence.
    fn create_test_app_state() -> AppState {
        let persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        AppState {
            persistence: Arc::new(Mutex::new(persistence)),
        }
    }

    async fn json_body<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn post_json(
        app: &Router,
        uri: &str,
        session: Option<&str>,
        body: serde_json::Value,
    ) -> Response {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(token) = session {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        app.clone()
            .oneshot(builder.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap()
    }

    async fn get_authed(app: &Router, uri: &str, session: &str) -> Response {
        app.clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(uri)
                    .header("Authorization", format!("Bearer {session}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    /// Runs the full passwordless flow and returns a session token.
    async fn login(app: &Router, email: &str) -> String {
        let response = post_json(
            app,
            "/api/auth/login-request",
            None,
            json!({ "email": email }),
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let token_response: LoginTokenResponse = json_body(response).await;

        let response = post_json(
            app,
            "/api/auth/login",
            None,
            json!({ "token": token_response.token }),
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let session: SessionResponse = json_body(response).await;
        session.session_token
    }

    #[tokio::test]
    async fn test_login_flow_and_event_creation() {
        let app: Router = build_router(create_test_app_state());
        let session: String = login(&app, "owner@example.com").await;

        let response = post_json(
            &app,
            "/api/events",
            Some(&session),
            json!({
                "title": "Christmas 2026",
                "rules": { "is_secret_santa": true }
            }),
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let detail: EventDetail = json_body(response).await;
        assert!(detail.slug.starts_with("christmas-2026-"));
        assert!(detail.rules.is_no_spoil, "Secret Santa implies no-spoil");

        let response = get_authed(&app, "/api/events", &session).await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let events: Vec<EventSummary> = json_body(response).await;
        assert_eq!(events.len(), 1);
    }

    #[tokio::test]
    async fn test_requests_without_a_session_are_unauthorized() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/events")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);

        let response = get_authed(&app, "/api/events", "session_bogus").await;
        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_invalid_login_token_is_unauthorized() {
        let app: Router = build_router(create_test_app_state());

        let response = post_json(
            &app,
            "/api/auth/login",
            None,
            json!({ "token": "login_0_0" }),
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_logout_ends_the_session() {
        let app: Router = build_router(create_test_app_state());
        let session: String = login(&app, "owner@example.com").await;

        let response = post_json(&app, "/api/auth/logout", Some(&session), json!({})).await;
        assert_eq!(response.status(), HttpStatusCode::OK);

        let response = get_authed(&app, "/api/events", &session).await;
        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_draw_round_trip_over_http() {
        let app: Router = build_router(create_test_app_state());
        let owner: String = login(&app, "owner@example.com").await;

        let response = post_json(
            &app,
            "/api/events",
            Some(&owner),
            json!({ "title": "Christmas", "rules": { "is_secret_santa": true } }),
        )
        .await;
        let detail: EventDetail = json_body(response).await;

        // One participant is not enough to draw.
        let response = post_json(
            &app,
            &format!("/api/events/{}/draw", detail.slug),
            Some(&owner),
            json!({}),
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);

        let response = post_json(
            &app,
            &format!("/api/events/{}/invite", detail.slug),
            Some(&owner),
            json!({ "email": "guest@example.com" }),
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::OK);

        let response = post_json(
            &app,
            &format!("/api/events/{}/draw", detail.slug),
            Some(&owner),
            json!({}),
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let draw: DrawResponse = json_body(response).await;
        assert_eq!(draw.participants, 2);

        // With two participants the owner necessarily gives to the guest.
        let response = get_authed(
            &app,
            &format!("/api/secret-santa/{}/me", detail.event_id),
            &owner,
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let assignment: MyAssignmentResponse = json_body(response).await;
        assert_eq!(assignment.receiver.email, "guest@example.com");
    }

    #[tokio::test]
    async fn test_members_cannot_launch_the_draw() {
        let app: Router = build_router(create_test_app_state());
        let owner: String = login(&app, "owner@example.com").await;

        let response = post_json(
            &app,
            "/api/events",
            Some(&owner),
            json!({ "title": "Christmas", "rules": { "is_secret_santa": true } }),
        )
        .await;
        let detail: EventDetail = json_body(response).await;

        post_json(
            &app,
            &format!("/api/events/{}/invite", detail.slug),
            Some(&owner),
            json!({ "email": "guest@example.com" }),
        )
        .await;
        let guest: String = login(&app, "guest@example.com").await;

        let response = post_json(
            &app,
            &format!("/api/events/{}/draw", detail.slug),
            Some(&guest),
            json!({}),
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_events_are_invisible_to_outsiders() {
        let app: Router = build_router(create_test_app_state());
        let owner: String = login(&app, "owner@example.com").await;
        let outsider: String = login(&app, "outsider@example.com").await;

        let response = post_json(
            &app,
            "/api/events",
            Some(&owner),
            json!({ "title": "Christmas", "rules": {} }),
        )
        .await;
        let detail: EventDetail = json_body(response).await;

        let response = get_authed(&app, &format!("/api/events/{}", detail.slug), &outsider).await;
        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_gift_reservation_conflicts_map_to_409() {
        let app: Router = build_router(create_test_app_state());
        let owner: String = login(&app, "owner@example.com").await;

        let response = post_json(
            &app,
            "/api/events",
            Some(&owner),
            json!({ "title": "Birthday", "rules": {} }),
        )
        .await;
        let detail: EventDetail = json_body(response).await;

        for email in ["a@example.com", "b@example.com"] {
            post_json(
                &app,
                &format!("/api/events/{}/invite", detail.slug),
                Some(&owner),
                json!({ "email": email }),
            )
            .await;
        }
        let a: String = login(&app, "a@example.com").await;
        let b: String = login(&app, "b@example.com").await;

        let response = post_json(
            &app,
            "/api/gifts",
            Some(&owner),
            json!({ "event_slug": detail.slug, "title": "Wool socks", "price": "12,50" }),
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let item: GiftItemInfo = json_body(response).await;
        assert_eq!(item.price_cents, Some(1250));

        let response = post_json(
            &app,
            &format!("/api/gifts/{}/reserve", item.item_id),
            Some(&a),
            json!({}),
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::OK);

        let response = post_json(
            &app,
            &format!("/api/gifts/{}/reserve", item.item_id),
            Some(&b),
            json!({}),
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::CONFLICT);

        // Reserving your own item is forbidden outright.
        let response = post_json(
            &app,
            &format!("/api/gifts/{}/reserve", item.item_id),
            Some(&owner),
            json!({}),
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_account_deletion_cascades() {
        let app: Router = build_router(create_test_app_state());
        let owner: String = login(&app, "owner@example.com").await;

        let response = post_json(
            &app,
            "/api/events",
            Some(&owner),
            json!({ "title": "Christmas", "rules": {} }),
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::OK);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/account")
                    .header("Authorization", format!("Bearer {owner}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        // The session points at a deleted account now.
        let response = get_authed(&app, "/api/events", &owner).await;
        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);
    }
}
