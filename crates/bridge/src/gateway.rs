//! HTTP ingestion gateway
//!
//! Thin axum layer: bytes go to the decoder, frames to the scheduler,
//! configuration to the [`ConfigHandler`]. Status endpoints only read
//! snapshots.
//!
//! | Method & path | Handler |
//! |---------------|---------|
//! | `POST /api/data` | prefixed wire protocol |
//! | `POST /api/display/frame` | raw PNG body |
//! | `GET /api/status` | service status |
//! | `GET /api/display/info` | active model |
//! | `GET /api/display/models` | every known model |
//! | `GET /api/test` | liveness |

use std::future::Future;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use eink_specs::{PanelModel, PanelRegistry};
use platform::config::{API_VERSION, CAPABILITIES, MAX_BODY_BYTES, SERVICE_ID as SERVICE};
use protocol::Message;
use serde::Serialize;
use serde_json::json;
use tokio::net::TcpListener;

use crate::config_handler::ConfigHandler;
use crate::error::{BridgeError, SchedulerError};
use crate::frame::ValidatedFrame;
use crate::render::{RenderScheduler, Submission};
use crate::status::{Phase, StatusBoard};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    /// Frame sink
    pub scheduler: Arc<RenderScheduler>,
    /// Status snapshots
    pub status: StatusBoard,
    /// Latest configuration document
    pub config: Arc<ConfigHandler>,
    /// Active panel model
    pub model: &'static PanelModel,
    /// Host MAC address, read once at startup
    pub mac_address: Arc<str>,
}

/// Build the router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/data", post(post_data))
        .route("/api/display/frame", post(post_frame))
        .route("/api/status", get(get_status))
        .route("/api/display/info", get(get_info))
        .route("/api/display/models", get(get_models))
        .route("/api/test", get(get_test))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

/// Serve until `shutdown` resolves
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "HTTP gateway listening");
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Error response: `{"error": "..."}` with a matching status code
#[derive(Debug)]
pub struct ApiError(BridgeError);

impl<E: Into<BridgeError>> From<E> for ApiError {
    fn from(e: E) -> Self {
        Self(e.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            e if e.is_client_error() => StatusCode::BAD_REQUEST,
            BridgeError::Scheduler(SchedulerError::ShutDown) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        } else {
            tracing::debug!(error = %self.0, "request rejected");
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

#[derive(Serialize)]
struct FrameAccepted {
    status: &'static str,
    #[serde(flatten)]
    submission: Submission,
    frame_size: usize,
    width: u32,
    height: u32,
    timestamp: f64,
}

async fn post_data(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    let (header, message) = protocol::decode_envelope(&body)?;
    if let Some(header) = header {
        let actual = body.len().saturating_sub(protocol::HEADER_LEN);
        if usize::from(header.length_hint) != actual {
            tracing::debug!(hint = header.length_hint, actual, "length hint differs from payload");
        }
        tracing::debug!(route = header.route, kind = message.kind(), "prefixed message");
    }

    match message {
        Message::Frame(bytes) => accept_frame(&state, bytes),
        config => {
            let receipt = state.config.apply(&config)?;
            Ok((StatusCode::OK, Json(json!({ "status": "ok", "config": receipt }))).into_response())
        }
    }
}

async fn post_frame(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    match protocol::decode_raw_frame(&body)? {
        Message::Frame(bytes) => accept_frame(&state, bytes),
        other => Err(protocol::FrameError::InvalidContainer(format!("unexpected {}", other.kind())).into()),
    }
}

fn accept_frame(state: &AppState, bytes: Vec<u8>) -> Result<Response, ApiError> {
    let frame = ValidatedFrame::validate(bytes)?;
    let (frame_size, width, height) = (frame.len(), frame.width(), frame.height());
    let submission = state.scheduler.submit(frame)?;
    let body = FrameAccepted {
        status: "accepted",
        submission,
        frame_size,
        width,
        height,
        timestamp: unix_seconds(SystemTime::now()),
    };
    Ok((StatusCode::ACCEPTED, Json(body)).into_response())
}

#[derive(Serialize)]
struct Resolution {
    width: u32,
    height: u32,
}

#[derive(Serialize)]
struct StatusResponse {
    status: &'static str,
    service: &'static str,
    uptime_seconds: u64,
    frames_displayed: u64,
    last_frame: Option<f64>,
    display_initialized: bool,
    hardware_available: bool,
    phase: Phase,
    failed_renders: u64,
    coalesced_frames: u64,
    last_error: Option<String>,
    mac_address: String,
    model: Option<&'static str>,
    resolution: Resolution,
}

async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let s = state.status.snapshot();
    Json(StatusResponse {
        status: "running",
        service: SERVICE,
        uptime_seconds: s.uptime_seconds(),
        frames_displayed: s.frame_count,
        last_frame: s.last_render.map(unix_seconds),
        display_initialized: s.initialized,
        hardware_available: s.hardware_available,
        phase: s.phase,
        failed_renders: s.failed_renders,
        coalesced_frames: s.coalesced_frames,
        last_error: s.last_error,
        mac_address: state.mac_address.to_string(),
        model: s.model,
        resolution: Resolution {
            width: s.width,
            height: s.height,
        },
    })
}

async fn get_info(State(state): State<AppState>) -> Json<serde_json::Value> {
    let model = state.model;
    Json(json!({
        "display_type": format!("{SERVICE}_{}", model.id),
        "model": model.id,
        "description": model.description,
        "width": model.width,
        "height": model.height,
        "colors": model.color_names().collect::<Vec<_>>(),
        "color_mode": model.color_mode(),
        "capabilities": CAPABILITIES,
        "version": API_VERSION,
        "mac_address": &*state.mac_address,
    }))
}

async fn get_models() -> Json<serde_json::Value> {
    let models: Vec<_> = PanelRegistry::list()
        .iter()
        .map(|m| {
            json!({
                "id": m.id,
                "description": m.description,
                "width": m.width,
                "height": m.height,
                "colors": m.color_names().collect::<Vec<_>>(),
                "driver": m.driver.as_str(),
            })
        })
        .collect();
    Json(json!({ "models": models }))
}

async fn get_test() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Frame display service is running",
        "timestamp": unix_seconds(SystemTime::now()),
        "service": SERVICE,
    }))
}

async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Endpoint not found" })),
    )
}

fn unix_seconds(t: SystemTime) -> f64 {
    t.duration_since(UNIX_EPOCH)
        .map_or(0.0, |d| d.as_secs_f64())
}

/// MAC address of the first non-loopback interface, or all zeros
///
/// Reads sysfs; call once at startup, not from a handler.
pub fn read_mac_address() -> String {
    const FALLBACK: &str = "00:00:00:00:00:00";
    let Ok(entries) = std::fs::read_dir("/sys/class/net") else {
        return FALLBACK.into();
    };
    let mut names: Vec<_> = entries
        .filter_map(Result::ok)
        .map(|e| e.file_name())
        .filter(|n| n != "lo")
        .collect();
    names.sort();
    names
        .iter()
        .filter_map(|n| std::fs::read_to_string(format!("/sys/class/net/{}/address", n.to_string_lossy())).ok())
        .map(|s| s.trim().to_owned())
        .find(|s| s.split(':').count() == 6 && s != FALLBACK)
        .unwrap_or_else(|| FALLBACK.into())
}
