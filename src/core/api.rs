//! HTTP + WebSocket API for the prospect simulator
//!
//! Endpoints:
//! - POST /session/new - Create session from a PersonaRequest
//! - GET /session/{id} - Session status and snapshot
//! - POST /session/{id}/turn - Process one TurnInput, returns the directive
//! - POST /session/{id}/cancel - Cancel at the turn boundary
//! - GET /session/{id}/profile - Prospect profile
//! - WS /ws/{id} - Live directives
//! - GET /health - Health check
//!
//! A session that reaches a terminal reason leaves the live map for a bounded
//! archive. Status and profile still answer from the archive; turns get 409.

use axum::{
    extract::{rejection::JsonRejection, Path, State, WebSocketUpgrade, ws::{Message, WebSocket}},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::core::{build_profile, new_session_id, save_snapshot, CallSession};
use crate::error::EngineError;
use crate::types::{
    ObjectionKind, PersonaBrief, PersonaRequest, ProspectProfile, SessionSnapshot, Tier,
    TurnDirective, TurnInput,
};

/// Session state
#[derive(Debug)]
pub struct Session {
    pub call: CallSession,
    pub last_snapshot_path: Option<String>,
    /// Bumped for every committed directive
    pub revision: u64,
    /// Revision `last_snapshot_path` was written for
    pub saved_revision: u64,
    pub update_tx: broadcast::Sender<TurnDirective>,
}

/// A terminal session kept for read-only lookups
#[derive(Debug, Clone)]
pub struct ArchivedSession {
    pub call: CallSession,
    pub last_snapshot_path: Option<String>,
}

/// Ended sessions, oldest evicted first once `limit` is reached
#[derive(Debug)]
pub struct SessionArchive {
    limit: usize,
    order: VecDeque<String>,
    entries: HashMap<String, ArchivedSession>,
}

impl SessionArchive {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            order: VecDeque::new(),
            entries: HashMap::new(),
        }
    }

    pub fn insert(&mut self, id: String, session: ArchivedSession) {
        if self.limit == 0 {
            return;
        }
        if self.entries.insert(id.clone(), session).is_none() {
            self.order.push_back(id);
        }
        while self.order.len() > self.limit {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
                debug!(session = %oldest, "archived session evicted");
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&ArchivedSession> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// App state
pub struct AppState {
    /// Each session has its own lock so turns serialize per session only
    pub sessions: RwLock<HashMap<String, Arc<Mutex<Session>>>>,
    pub archive: RwLock<SessionArchive>,
    pub config: EngineConfig,
}

/// Create new session response
#[derive(Debug, Serialize)]
pub struct NewSessionResponse {
    pub session_id: String,
    pub tier: Tier,
    pub seed: u64,
    pub websocket_url: String,
}

/// Session status response
#[derive(Debug, Serialize)]
pub struct SessionStatusResponse {
    pub session_id: String,
    pub tier: Tier,
    pub active_objection: Option<ObjectionKind>,
    pub close_permitted: bool,
    pub terminal: bool,
    pub snapshot: SessionSnapshot,
    pub snapshot_path: Option<String>,
}

/// Profile plus the tier/DISC brief a renderer voices the prospect from
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub profile: ProspectProfile,
    pub persona: PersonaBrief,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub sessions_active: usize,
    pub sessions_archived: usize,
}

/// Error body + status for engine failures
#[derive(Debug)]
pub enum ApiError {
    UnknownSession(String),
    Engine(EngineError),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        ApiError::Engine(err)
    }
}

/// Bodies that fail to deserialize are bad persona or turn parameters
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Engine(EngineError::configuration(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match &self {
            ApiError::UnknownSession(id) => {
                (StatusCode::NOT_FOUND, "unknown_session", format!("no session {}", id))
            }
            ApiError::Engine(err @ EngineError::Configuration(_)) => {
                (StatusCode::BAD_REQUEST, "configuration", err.to_string())
            }
            ApiError::Engine(err @ EngineError::InvalidStateTransition { .. }) => {
                (StatusCode::CONFLICT, "invalid_state_transition", err.to_string())
            }
            ApiError::Engine(err @ EngineError::Snapshot(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "snapshot", err.to_string())
            }
        };
        (
            status,
            Json(serde_json::json!({
                "status": "error",
                "kind": kind,
                "message": message
            })),
        )
            .into_response()
    }
}

/// Create the API router
pub fn create_router(config: EngineConfig) -> Router {
    let state = Arc::new(AppState {
        sessions: RwLock::new(HashMap::new()),
        archive: RwLock::new(SessionArchive::new(config.archive_limit)),
        config,
    });

    Router::new()
        .route("/health", get(health))
        .route("/session/new", post(create_session))
        .route("/session/:id", get(get_session))
        .route("/session/:id/turn", post(add_turn))
        .route("/session/:id/cancel", post(cancel_session))
        .route("/session/:id/profile", get(get_profile))
        .route("/ws/:id", get(websocket_handler))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let sessions_active = state.sessions.read().await.len();
    let sessions_archived = state.archive.read().await.len();
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        sessions_active,
        sessions_archived,
    })
}

/// Create new session
async fn create_session(
    State(state): State<Arc<AppState>>,
    body: Result<Json<PersonaRequest>, JsonRejection>,
) -> Result<Json<NewSessionResponse>, ApiError> {
    let Json(req) = body?;
    let profile = build_profile(&req, state.config.default_seed)?;
    let session_id = new_session_id();
    let (tier, seed) = (profile.tier, profile.seed);
    let call = CallSession::new(session_id.clone(), profile, &state.config)?;
    let (tx, _) = broadcast::channel(100);

    let session = Session {
        call,
        last_snapshot_path: None,
        revision: 0,
        saved_revision: 0,
        update_tx: tx,
    };

    let mut sessions = state.sessions.write().await;
    sessions.insert(session_id.clone(), Arc::new(Mutex::new(session)));

    Ok(Json(NewSessionResponse {
        session_id: session_id.clone(),
        tier,
        seed,
        websocket_url: format!("/ws/{}", session_id),
    }))
}

/// Look up a live session handle without holding the map lock.
/// Archived sessions are a state conflict, not a missing session.
async fn find_session(state: &AppState, id: &str) -> Result<Arc<Mutex<Session>>, ApiError> {
    if let Some(handle) = state.sessions.read().await.get(id).cloned() {
        return Ok(handle);
    }
    match state.archive.read().await.get(id) {
        Some(archived) => Err(EngineError::invalid_transition(
            id,
            archived.call.turn_index(),
            format!("session already ended ({})", archived.call.terminal_reason()),
        )
        .into()),
        None => Err(ApiError::UnknownSession(id.to_string())),
    }
}

/// Read a session, live or archived
async fn inspect_session<T>(
    state: &AppState,
    id: &str,
    f: impl FnOnce(&CallSession, Option<&String>) -> T,
) -> Result<T, ApiError> {
    let live = state.sessions.read().await.get(id).cloned();
    if let Some(handle) = live {
        let session = handle.lock().await;
        return Ok(f(&session.call, session.last_snapshot_path.as_ref()));
    }
    let archive = state.archive.read().await;
    archive
        .get(id)
        .map(|a| f(&a.call, a.last_snapshot_path.as_ref()))
        .ok_or_else(|| ApiError::UnknownSession(id.to_string()))
}

/// Get session status
async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionStatusResponse>, ApiError> {
    let status = inspect_session(&state, &id, |call, path| SessionStatusResponse {
        session_id: id.clone(),
        tier: call.profile().tier,
        active_objection: call.active_objection(),
        close_permitted: call.gate().close_permitted(),
        terminal: call.is_terminal(),
        snapshot: call.snapshot(),
        snapshot_path: path.cloned(),
    })
    .await?;
    Ok(Json(status))
}

/// Commit a directive: broadcast it in order, then persist and archive
/// without holding the session lock
async fn publish(
    state: &AppState,
    id: &str,
    handle: &Arc<Mutex<Session>>,
    directive: &TurnDirective,
    revision: u64,
    profile: ProspectProfile,
) {
    if let Some(path) = autosave(state, id, profile, directive.snapshot.clone()).await {
        let mut session = handle.lock().await;
        // a slower save of an older turn must not win
        if revision > session.saved_revision {
            session.saved_revision = revision;
            session.last_snapshot_path = Some(path);
        }
    }
    if directive.session_terminal {
        archive_session(state, id, handle).await;
    }
}

/// Write the snapshot on the blocking pool when autosave is on
async fn autosave(
    state: &AppState,
    id: &str,
    profile: ProspectProfile,
    snapshot: SessionSnapshot,
) -> Option<String> {
    if !state.config.autosave {
        return None;
    }
    let dir = state.config.snapshot_dir.clone();
    match tokio::task::spawn_blocking(move || save_snapshot(&profile, &snapshot, &dir)).await {
        Ok(Ok(path)) => Some(path),
        Ok(Err(reason)) => {
            warn!(session = %id, %reason, "autosave failed");
            None
        }
        Err(err) => {
            warn!(session = %id, error = %err, "autosave task failed");
            None
        }
    }
}

/// Move a terminal session from the live map into the archive
async fn archive_session(state: &AppState, id: &str, handle: &Arc<Mutex<Session>>) {
    let archived = {
        let session = handle.lock().await;
        ArchivedSession {
            call: session.call.clone(),
            last_snapshot_path: session.last_snapshot_path.clone(),
        }
    };
    let reason = archived.call.terminal_reason();
    state.archive.write().await.insert(id.to_string(), archived);
    state.sessions.write().await.remove(id);
    info!(session = %id, %reason, "session archived");
}

/// Process one representative turn
async fn add_turn(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<TurnInput>, JsonRejection>,
) -> Result<Json<TurnDirective>, ApiError> {
    let Json(req) = body?;
    let handle = find_session(&state, &id).await?;

    let (directive, revision, profile) = {
        let mut session = handle.lock().await;
        let directive = session.call.process_turn(&req)?;
        session.revision += 1;
        // Broadcast under the lock so subscribers see turns in order
        let _ = session.update_tx.send(directive.clone());
        (directive, session.revision, session.call.profile().clone())
    };

    publish(&state, &id, &handle, &directive, revision, profile).await;
    Ok(Json(directive))
}

/// Cancel a live session
async fn cancel_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TurnDirective>, ApiError> {
    let handle = find_session(&state, &id).await?;

    let (directive, revision, profile) = {
        let mut session = handle.lock().await;
        let directive = session.call.cancel()?;
        session.revision += 1;
        let _ = session.update_tx.send(directive.clone());
        (directive, session.revision, session.call.profile().clone())
    };

    publish(&state, &id, &handle, &directive, revision, profile).await;
    Ok(Json(directive))
}

/// Get prospect profile and persona brief
async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let response = inspect_session(&state, &id, |call, _| ProfileResponse {
        profile: call.profile().clone(),
        persona: call.persona_brief(),
    })
    .await?;
    Ok(Json(response))
}

/// WebSocket handler for live updates
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, ApiError> {
    let handle = find_session(&state, &id).await?;
    let rx = handle.lock().await.update_tx.subscribe();

    Ok(ws.on_upgrade(move |socket| async move {
        handle_websocket(socket, rx).await;
    }))
}

/// Handle WebSocket connection
async fn handle_websocket(mut socket: WebSocket, mut rx: broadcast::Receiver<TurnDirective>) {
    while let Ok(directive) = rx.recv().await {
        let terminal = directive.session_terminal;
        let json = serde_json::to_string(&directive).unwrap_or_default();
        if socket.send(Message::Text(json)).await.is_err() || terminal {
            break;
        }
    }
}

/// Run the API server
pub async fn run_server(config: EngineConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.addr.clone();
    let router = create_router(config);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "prospect-sim API listening");
    info!("  POST /session/new          - Create session");
    info!("  GET  /session/:id          - Get status");
    info!("  POST /session/:id/turn     - Process turn");
    info!("  POST /session/:id/cancel   - Cancel call");
    info!("  GET  /session/:id/profile  - Get profile");
    info!("  WS   /ws/:id               - Live directives");
    info!("  GET  /health               - Health check");
    axum::serve(listener, router).await?;
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
