//! HTTP gateway routes, driven in-process with `tower::ServiceExt::oneshot`.

mod common;

use std::io::Write;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use bridge::config_handler::ConfigHandler;
use bridge::gateway::{self, AppState};
use bridge::RenderScheduler;
use eink_specs::PanelRegistry;
use eink_testing::fixtures;
use flate2::write::GzEncoder;
use flate2::Compression;
use http_body_util::BodyExt;
use protocol::{encode_message, MessageType};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{gated_scheduler, simulated_adapter, GREEN, RED, WAIT};

fn state() -> AppState {
    let adapter = simulated_adapter("2in13v4");
    let status = adapter.status().clone();
    AppState {
        scheduler: Arc::new(RenderScheduler::spawn(adapter).unwrap()),
        status,
        config: Arc::new(ConfigHandler::default()),
        model: PanelRegistry::lookup("2in13v4").unwrap(),
        mac_address: "aa:bb:cc:dd:ee:ff".into(),
    }
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn gzip(bytes: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes).unwrap();
    encoder.finish().unwrap()
}

#[tokio::test]
async fn raw_frame_is_accepted_and_rendered() {
    let state = state();
    let app = gateway::router(state.clone());
    let png = fixtures::textured_png(50, 20, [0, 0, 0]);

    let (status, body) = send(&app, post("/api/display/frame", png.clone())).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["status"], "accepted");
    assert_eq!(body["outcome"], "started");
    assert_eq!(body["sequence"], 1);
    assert_eq!(body["frame_size"], png.len());
    assert_eq!((body["width"].as_u64(), body["height"].as_u64()), (Some(50), Some(20)));

    assert!(state.scheduler.wait_idle(WAIT));
    let (status, body) = send(&app, get("/api/status")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["frames_displayed"], 1);
    assert!(body["last_frame"].is_f64());
}

#[tokio::test]
async fn prefixed_and_bare_frames_on_data_route() {
    let state = state();
    let app = gateway::router(state.clone());
    let png = fixtures::textured_png(20, 20, [255, 255, 255]);

    let wire = encode_message(MessageType::Frame, 3, &png);
    let (status, body) = send(&app, post("/api/data", wire)).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["frame_size"], png.len());

    let (status, _) = send(&app, post("/api/data", png)).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert!(state.scheduler.wait_idle(WAIT));
}

#[tokio::test]
async fn bad_frames_are_client_errors() {
    let app = gateway::router(state());

    let cases = [
        ("/api/display/frame", Vec::new(), "no frame data received"),
        ("/api/display/frame", vec![0x89; 40], "too small"),
        ("/api/display/frame", vec![b'x'; 400], "not a valid PNG"),
        ("/api/display/frame", fixtures::corrupt_png(400), "not a valid PNG"),
        ("/api/data", b"0012".to_vec(), "too short"),
        ("/api/data", b"hello world, not a frame".to_vec(), "malformed header"),
        ("/api/data", b"00040700abcd".to_vec(), "unknown message type"),
        ("/api/data", encode_message(MessageType::Frame, 0, &[0x89; 20]), "too small"),
    ];
    for (uri, body, expected) in cases {
        let (status, json) = send(&app, post(uri, body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}: {json}");
        let message = json["error"].as_str().unwrap();
        assert!(message.contains(expected), "{uri}: {message}");
    }
}

#[tokio::test]
async fn config_messages_are_stored() {
    let state = state();
    let app = gateway::router(state.clone());

    let document = json!({ "refresh": 60, "name": "kitchen" }).to_string();
    let wire = encode_message(MessageType::ConfigGzip, 0, &gzip(document.as_bytes()));
    let (status, body) = send(&app, post("/api/data", wire)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["config"]["kind"], "config_gzip");
    assert_eq!(body["config"]["document_bytes"], document.len());

    let latest = state.config.latest().unwrap();
    assert!(latest.compressed);
    assert_eq!(latest.value["name"], "kitchen");

    let wire = encode_message(MessageType::ConfigJson, 0, br#"{"refresh": 30}"#);
    let (status, body) = send(&app, post("/api/data", wire)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["config"]["kind"], "config_json");
    assert_eq!(state.config.latest().unwrap().value["refresh"], 30);

    // No frame was ever rendered
    assert_eq!(state.status.snapshot().frame_count, 0);
}

#[tokio::test]
async fn broken_config_is_rejected_and_keeps_previous() {
    let state = state();
    let app = gateway::router(state.clone());

    let wire = encode_message(MessageType::ConfigJson, 0, br#"{"a": 1}"#);
    assert_eq!(send(&app, post("/api/data", wire)).await.0, StatusCode::OK);

    let not_gzip = encode_message(MessageType::ConfigGzip, 0, b"definitely not gzip");
    let (status, body) = send(&app, post("/api/data", not_gzip)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("gzip"));

    let not_json = encode_message(MessageType::ConfigGzip, 0, &gzip(b"{not json"));
    let (status, _) = send(&app, post("/api/data", not_json)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(state.config.latest().unwrap().value["a"], 1);
}

/// A PNG that only fails past its header must not displace a queued frame.
#[tokio::test]
async fn undecodable_frame_never_reaches_the_slot() {
    let (scheduler, probe, gate) = gated_scheduler();
    let state = AppState {
        scheduler,
        status: bridge::StatusBoard::new(),
        config: Arc::new(ConfigHandler::default()),
        model: PanelRegistry::lookup("7in3sce").unwrap(),
        mac_address: "aa:bb:cc:dd:ee:ff".into(),
    };
    let app = gateway::router(state.clone());

    let (status, body) = send(&app, post("/api/display/frame", fixtures::textured_png(40, 24, RED))).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["outcome"], "started");
    assert!(gate.wait_entered(WAIT));

    let (status, body) = send(&app, post("/api/display/frame", fixtures::textured_png(40, 24, GREEN))).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["outcome"], "queued");

    let mut broken = fixtures::textured_png(40, 24, RED);
    let end = broken.len() - 12;
    broken[50..end].fill(0xEE);
    let (status, body) = send(&app, post("/api/display/frame", broken)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");

    gate.release();
    assert!(gate.wait_entered(WAIT), "queued frame was dropped");
    gate.release();
    assert!(state.scheduler.wait_idle(WAIT));

    let frames = probe.frames();
    assert_eq!(frames.len(), 2);
    eink_testing::assert_frame_solid(&frames[1], GREEN).unwrap();
    let stats = state.scheduler.shutdown().unwrap().get_stats();
    assert_eq!(stats.coalesced_frames, 0);
}

/// The MAC address is served from state, not looked up per request.
#[tokio::test]
async fn mac_address_comes_from_state() {
    let app = gateway::router(state());

    let (_, info) = send(&app, get("/api/display/info")).await;
    assert_eq!(info["mac_address"], "aa:bb:cc:dd:ee:ff");
    let (_, status) = send(&app, get("/api/status")).await;
    assert_eq!(status["mac_address"], "aa:bb:cc:dd:ee:ff");
}

#[test]
fn host_mac_address_is_six_octets() {
    let mac = gateway::read_mac_address();
    let octets: Vec<_> = mac.split(':').collect();
    assert_eq!(octets.len(), 6, "{mac}");
    assert!(octets.iter().all(|o| o.len() == 2 && o.chars().all(|c| c.is_ascii_hexdigit())), "{mac}");
}

#[tokio::test]
async fn info_routes_describe_active_model() {
    let app = gateway::router(state());

    let (status, info) = send(&app, get("/api/display/info")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(info["model"], "2in13v4");
    assert_eq!(info["display_type"], "epaper_frame_display_2in13v4");
    assert_eq!(info["colors"], json!(["black", "white"]));
    assert_eq!((info["width"].as_u64(), info["height"].as_u64()), (Some(250), Some(122)));
    assert_eq!(info["version"], "2.0");

    let (status, models) = send(&app, get("/api/display/models")).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<_> = models["models"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(ids, PanelRegistry::ids().collect::<Vec<_>>());

    let (status, test) = send(&app, get("/api/test")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(test["service"], "epaper_frame_display");

    let (status, s) = send(&app, get("/api/status")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(s["status"], "running");
    assert_eq!(s["display_initialized"], true);
    assert_eq!(s["hardware_available"], false);
    assert_eq!(s["phase"], "simulation_ready");
    assert_eq!(s["resolution"], json!({ "width": 250, "height": 122 }));
    assert!(s["last_frame"].is_null());
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let app = gateway::router(state());
    let (status, body) = send(&app, get("/api/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Endpoint not found" }));
}

#[tokio::test]
async fn oversized_body_is_refused() {
    let app = gateway::router(state());
    let mut body = protocol::PNG_SIGNATURE.to_vec();
    body.resize(platform::config::MAX_BODY_BYTES + 1, 0);
    let (status, _) = send(&app, post("/api/display/frame", body)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn frames_after_shutdown_are_unavailable() {
    let state = state();
    let app = gateway::router(state.clone());
    state.scheduler.shutdown().unwrap();

    let png = fixtures::textured_png(20, 20, [0, 0, 0]);
    let (status, body) = send(&app, post("/api/display/frame", png)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].as_str().unwrap().contains("shut down"));
}
