use {
    axum::{
        body::Bytes,
        extract::{Path, State},
        http::{HeaderMap, StatusCode},
        response::Json,
    },
    secrecy::ExposeSecret,
    serde::Deserialize,
    serde_json::json,
    tracing::{info, warn},
};

use courier_line::{WebhookPayload, decode_events, verify_signature};

use crate::state::AppState;

const SIGNATURE_HEADER: &str = "x-line-signature";

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "total_subscribers": state.store.count().await,
    }))
}

pub async fn list_subscribers(State(state): State<AppState>) -> Json<serde_json::Value> {
    let subscribers = state.store.list().await;
    Json(json!({
        "total": subscribers.len(),
        "subscribers": subscribers,
    }))
}

pub async fn count_subscribers(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({ "total": state.store.count().await }))
}

pub async fn delete_subscriber(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> (StatusCode, Json<serde_json::Value>) {
    if state.store.remove(&id).await {
        info!(user_id = id, "subscriber deleted via admin api");
        (
            StatusCode::OK,
            Json(json!({ "message": format!("subscriber {id} removed") })),
        )
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "subscriber not found" })),
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct BroadcastRequest {
    #[serde(default)]
    pub text: String,
}

pub async fn broadcast(
    State(state): State<AppState>,
    Json(req): Json<BroadcastRequest>,
) -> (StatusCode, Json<serde_json::Value>) {
    match state.dispatcher.broadcast(&req.text).await {
        Ok(report) => (
            StatusCode::OK,
            Json(json!({
                "total": report.total,
                "success": report.success,
                "failed_count": report.failed.len(),
                "failed": report.failed,
            })),
        ),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.to_string() })),
        ),
    }
}

/// Platform webhook endpoint. The signature is checked against the raw body
/// before anything else happens; only then is the payload decoded and each
/// event handed to the router.
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<serde_json::Value>) {
    let Some(signature) = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
    else {
        warn!("webhook delivery without signature header");
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "missing signature" })),
        );
    };
    if !verify_signature(&body, signature, state.channel_secret.expose_secret()) {
        warn!("webhook signature verification failed");
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid signature" })),
        );
    }

    let payload: WebhookPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "undecodable webhook payload");
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "invalid payload" })),
            );
        },
    };

    for event in decode_events(payload) {
        state.router.handle(event).await;
    }
    (StatusCode::OK, Json(json!({ "message": "ok" })))
}
