// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod session;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use courtside_api::{
    AcceptMemberResponse, ApiError, CloneEventRequest, CreateTeamRequest, CreateTeamResponse,
    DeleteEventResponse, EventInfo, EventRequest, JoinTeamRequest, JoinTeamResponse,
    LinkParentRequest, LinkParentResponse, ListEventsQuery, ListEventsResponse, LoginRequest,
    LoginResponse, MatchResultInfo, MatchResultRequest, PermissionsResponse,
    RejectedParticipantInfo, RsvpRequest, SelectTeamRequest, SelectTeamResponse, SignupRequest,
    SignupResponse, TeamDetailsResponse, TrainingLogInfo, TrainingLogRequest, accept_member,
    clone_event, create_event, create_team, delete_event, get_current_team, get_event,
    get_permissions, join_team, link_parent, list_events, log_training, login, logout,
    record_match_result, respond_to_event, select_team, signup, update_event,
};
use courtside_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::Duration;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::session::SessionUser;

/// Courtside Server - HTTP server for the Courtside team calendar
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// Session lifetime in days
    #[arg(long, default_value_t = 30)]
    session_days: u16,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for accounts, teams, and events.
    persistence: Arc<Mutex<Persistence>>,
    /// How long a newly issued session stays valid.
    session_lifetime: Duration,
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// The machine-readable error kind.
    error: String,
    /// A human-readable message.
    message: String,
    /// Participants refused for the activity, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rejected: Option<Vec<RejectedParticipantInfo>>,
}

/// HTTP error wrapper.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error kind token.
    kind: &'static str,
    /// The error message.
    message: String,
    /// Rejected participants, carried through to the body.
    rejected: Option<Vec<RejectedParticipantInfo>>,
}

impl HttpError {
    /// Builds a 401 response for requests without a valid session.
    fn unauthenticated(message: String) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            kind: "unauthenticated",
            message,
            rejected: None,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: self.kind.to_string(),
            message: self.message,
            rejected: self.rejected,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let kind: &'static str = err.kind();
        let message: String = err.to_string();
        match err {
            ApiError::Unauthenticated { .. } => Self::unauthenticated(message),
            ApiError::Forbidden { .. } => Self {
                status: StatusCode::FORBIDDEN,
                kind,
                message,
                rejected: None,
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                kind,
                message,
                rejected: None,
            },
            ApiError::InvalidParticipants { rejected, .. } => Self {
                status: StatusCode::BAD_REQUEST,
                kind,
                message,
                rejected: Some(rejected),
            },
            ApiError::Validation { .. } | ApiError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                kind,
                message,
                rejected: None,
            },
            ApiError::Conflict { .. } => Self {
                status: StatusCode::CONFLICT,
                kind,
                message,
                rejected: None,
            },
            ApiError::Internal { .. } => {
                error!(error = %message, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    kind,
                    message,
                    rejected: None,
                }
            }
        }
    }
}

// ============================================================================
// Accounts
// ============================================================================

/// Handler for POST `/auth/signup` endpoint.
async fn handle_signup(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), HttpError> {
    info!(email = %req.email, "Handling signup request");

    let response: SignupResponse = signup(&mut *app_state.persistence.lock().await, &req)?;

    info!(user_id = response.user_id, "Account created");
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for POST `/auth/login` endpoint.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    info!(email = %req.email, "Handling login request");

    let response: LoginResponse = login(
        &mut *app_state.persistence.lock().await,
        &req,
        app_state.session_lifetime,
    )?;

    Ok(Json(response))
}

/// Handler for POST `/auth/logout` endpoint.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user): SessionUser,
) -> Result<StatusCode, HttpError> {
    info!(user_id = user.user_id.value(), "Handling logout request");

    logout(
        &mut *app_state.persistence.lock().await,
        &user.session_token,
    )?;

    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET `/auth/permissions` endpoint.
async fn handle_get_permissions(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user): SessionUser,
) -> Result<Json<PermissionsResponse>, HttpError> {
    info!(user_id = user.user_id.value(), "Handling permissions request");

    let response: PermissionsResponse =
        get_permissions(&mut *app_state.persistence.lock().await, &user)?;

    Ok(Json(response))
}

// ============================================================================
// Teams
// ============================================================================

/// Handler for POST `/teams` endpoint.
async fn handle_create_team(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Json(req): Json<CreateTeamRequest>,
) -> Result<(StatusCode, Json<CreateTeamResponse>), HttpError> {
    info!(user_id = user.user_id.value(), name = %req.name, "Handling create team request");

    let response: CreateTeamResponse =
        create_team(&mut *app_state.persistence.lock().await, &req, &user)?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for POST `/teams/join` endpoint.
async fn handle_join_team(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Json(req): Json<JoinTeamRequest>,
) -> Result<Json<JoinTeamResponse>, HttpError> {
    info!(user_id = user.user_id.value(), role = %req.role, "Handling join team request");

    let response: JoinTeamResponse =
        join_team(&mut *app_state.persistence.lock().await, &req, &user)?;

    Ok(Json(response))
}

/// Handler for POST `/teams/select` endpoint.
async fn handle_select_team(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Json(req): Json<SelectTeamRequest>,
) -> Result<Json<SelectTeamResponse>, HttpError> {
    info!(
        user_id = user.user_id.value(),
        team_id = req.team_id,
        "Handling select team request"
    );

    let response: SelectTeamResponse =
        select_team(&mut *app_state.persistence.lock().await, &req, &user)?;

    Ok(Json(response))
}

/// Handler for GET `/teams/current` endpoint.
async fn handle_get_current_team(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user): SessionUser,
) -> Result<Json<TeamDetailsResponse>, HttpError> {
    info!(user_id = user.user_id.value(), "Handling current team request");

    let response: TeamDetailsResponse =
        get_current_team(&mut *app_state.persistence.lock().await, &user)?;

    Ok(Json(response))
}

/// Handler for POST `/teams/members/{user_id}/accept` endpoint.
async fn handle_accept_member(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(member_id): Path<i64>,
) -> Result<Json<AcceptMemberResponse>, HttpError> {
    info!(
        user_id = user.user_id.value(),
        member_id = member_id,
        "Handling accept member request"
    );

    let response: AcceptMemberResponse =
        accept_member(&mut *app_state.persistence.lock().await, member_id, &user)?;

    Ok(Json(response))
}

/// Handler for POST `/teams/links` endpoint.
async fn handle_link_parent(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Json(req): Json<LinkParentRequest>,
) -> Result<(StatusCode, Json<LinkParentResponse>), HttpError> {
    info!(
        user_id = user.user_id.value(),
        parent_id = req.parent_id,
        child_id = req.child_id,
        "Handling link parent request"
    );

    let response: LinkParentResponse =
        link_parent(&mut *app_state.persistence.lock().await, &req, &user)?;

    Ok((StatusCode::CREATED, Json(response)))
}

// ============================================================================
// Calendar
// ============================================================================

/// Handler for GET `/calendar/events` endpoint.
async fn handle_list_events(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Query(query): Query<ListEventsQuery>,
) -> Result<Json<ListEventsResponse>, HttpError> {
    info!(
        user_id = user.user_id.value(),
        start = ?query.start,
        end = ?query.end,
        "Handling list events request"
    );

    let response: ListEventsResponse =
        list_events(&mut *app_state.persistence.lock().await, &query, &user)?;

    Ok(Json(response))
}

/// Handler for POST `/calendar/events` endpoint.
async fn handle_create_event(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Json(req): Json<EventRequest>,
) -> Result<(StatusCode, Json<EventInfo>), HttpError> {
    info!(
        user_id = user.user_id.value(),
        event_type = ?req.event_type,
        "Handling create event request"
    );

    let response: EventInfo = create_event(&mut *app_state.persistence.lock().await, req, &user)?;

    info!(event_id = response.event_id, "Event created");
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET `/calendar/events/{id}` endpoint.
async fn handle_get_event(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(event_id): Path<i64>,
) -> Result<Json<EventInfo>, HttpError> {
    info!(
        user_id = user.user_id.value(),
        event_id = event_id,
        "Handling get event request"
    );

    let response: EventInfo =
        get_event(&mut *app_state.persistence.lock().await, event_id, &user)?;

    Ok(Json(response))
}

/// Handler for PATCH `/calendar/events/{id}` endpoint.
async fn handle_update_event(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(event_id): Path<i64>,
    Json(req): Json<EventRequest>,
) -> Result<Json<EventInfo>, HttpError> {
    info!(
        user_id = user.user_id.value(),
        event_id = event_id,
        "Handling update event request"
    );

    let response: EventInfo = update_event(
        &mut *app_state.persistence.lock().await,
        event_id,
        req,
        &user,
    )?;

    Ok(Json(response))
}

/// Handler for DELETE `/calendar/events/{id}` endpoint.
async fn handle_delete_event(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(event_id): Path<i64>,
) -> Result<Json<DeleteEventResponse>, HttpError> {
    info!(
        user_id = user.user_id.value(),
        event_id = event_id,
        "Handling delete event request"
    );

    let response: DeleteEventResponse =
        delete_event(&mut *app_state.persistence.lock().await, event_id, &user)?;

    Ok(Json(response))
}

/// Handler for POST `/calendar/events/{id}/clone` endpoint.
async fn handle_clone_event(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(event_id): Path<i64>,
    Json(req): Json<CloneEventRequest>,
) -> Result<(StatusCode, Json<EventInfo>), HttpError> {
    info!(
        user_id = user.user_id.value(),
        event_id = event_id,
        "Handling clone event request"
    );

    let response: EventInfo = clone_event(
        &mut *app_state.persistence.lock().await,
        event_id,
        &req,
        &user,
    )?;

    info!(
        event_id = response.event_id,
        original_event_id = event_id,
        "Event cloned"
    );
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for POST `/calendar/events/{id}/rsvp` endpoint.
async fn handle_rsvp(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(event_id): Path<i64>,
    Json(req): Json<RsvpRequest>,
) -> Result<Json<EventInfo>, HttpError> {
    info!(
        user_id = user.user_id.value(),
        event_id = event_id,
        status = %req.status,
        "Handling RSVP request"
    );

    let response: EventInfo = respond_to_event(
        &mut *app_state.persistence.lock().await,
        event_id,
        &req,
        &user,
    )?;

    Ok(Json(response))
}

// ============================================================================
// Results
// ============================================================================

/// Handler for POST `/events/{id}/match-result` endpoint.
async fn handle_record_match_result(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(event_id): Path<i64>,
    Json(req): Json<MatchResultRequest>,
) -> Result<(StatusCode, Json<MatchResultInfo>), HttpError> {
    info!(
        user_id = user.user_id.value(),
        event_id = event_id,
        "Handling match result request"
    );

    let response: MatchResultInfo = record_match_result(
        &mut *app_state.persistence.lock().await,
        event_id,
        &req,
        &user,
    )?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for POST `/events/{id}/training-log` endpoint.
async fn handle_log_training(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(event_id): Path<i64>,
    Json(req): Json<TrainingLogRequest>,
) -> Result<Json<TrainingLogInfo>, HttpError> {
    info!(
        user_id = user.user_id.value(),
        event_id = event_id,
        player_id = req.player_id,
        "Handling training log request"
    );

    let response: TrainingLogInfo = log_training(
        &mut *app_state.persistence.lock().await,
        event_id,
        &req,
        &user,
    )?;

    Ok(Json(response))
}

/// Builds the application router.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/auth/signup", post(handle_signup))
        .route("/auth/login", post(handle_login))
        .route("/auth/logout", post(handle_logout))
        .route("/auth/permissions", get(handle_get_permissions))
        .route("/teams", post(handle_create_team))
        .route("/teams/join", post(handle_join_team))
        .route("/teams/select", post(handle_select_team))
        .route("/teams/current", get(handle_get_current_team))
        .route(
            "/teams/members/{user_id}/accept",
            post(handle_accept_member),
        )
        .route("/teams/links", post(handle_link_parent))
        .route(
            "/calendar/events",
            get(handle_list_events).post(handle_create_event),
        )
        .route(
            "/calendar/events/{id}",
            get(handle_get_event)
                .patch(handle_update_event)
                .delete(handle_delete_event),
        )
        .route("/calendar/events/{id}/clone", post(handle_clone_event))
        .route("/calendar/events/{id}/rsvp", post(handle_rsvp))
        .route(
            "/events/{id}/match-result",
            post(handle_record_match_result),
        )
        .route("/events/{id}/training-log", post(handle_log_training))
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

    info!("Initializing Courtside Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let purged: usize = persistence.delete_expired_sessions()?;
    info!(purged = purged, "Removed expired sessions");

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        session_lifetime: Duration::days(i64::from(args.session_days)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener: tokio::net::TcpListener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
