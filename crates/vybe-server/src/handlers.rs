//! HTTP/WebSocket Handlers

use axum::{
    Json,
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    http::StatusCode,
    response::Response,
};
use base64::{Engine, engine::general_purpose::STANDARD};
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use vybe_core::{Incoming, LinkButton, Reply, messages};

use crate::state::AppState;

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub sessions: usize,
}

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub user_id: String,
    pub text: String,
    #[serde(default)]
    pub first_name: Option<String>,
}

impl MessageRequest {
    fn into_incoming(self) -> Result<Incoming, ErrorResponse> {
        if self.user_id.trim().is_empty() {
            return Err(ErrorResponse {
                error: "user_id must not be empty".into(),
                code: "MISSING_USER".into(),
            });
        }
        let incoming = Incoming::new(self.user_id, self.text);
        Ok(match self.first_name {
            Some(name) => incoming.with_first_name(name),
            None => incoming,
        })
    }
}

/// One outgoing message, as the client sees it
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplyDto {
    Text {
        text: String,
        markdown: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        keyboard: Option<Vec<Vec<String>>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        link: Option<LinkButton>,
    },
    Photo {
        image_base64: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
}

impl ReplyDto {
    /// Convert a reply, consuming any chart artifact.
    ///
    /// The artifact's file is gone once this returns, whether or not the
    /// read succeeded.
    async fn from_reply(reply: Reply) -> Self {
        match reply {
            Reply::Text(text) => ReplyDto::Text {
                text: text.body,
                markdown: text.markdown,
                keyboard: text.keyboard.map(|k| k.rows),
                link: text.link,
            },
            Reply::Photo { artifact, caption } => match artifact.read().await {
                Ok(bytes) => ReplyDto::Photo {
                    image_base64: STANDARD.encode(bytes),
                    caption,
                },
                Err(e) => {
                    tracing::warn!("Chart artifact unreadable: {}", e);
                    ReplyDto::Text {
                        text: messages::CHART_ERROR.into(),
                        markdown: true,
                        keyboard: None,
                        link: None,
                    }
                }
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub replies: Vec<ReplyDto>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

async fn respond(state: &AppState, incoming: &Incoming) -> Vec<ReplyDto> {
    let replies = state.dialog.handle(incoming).await;
    let mut out = Vec::with_capacity(replies.len());
    for reply in replies {
        out.push(ReplyDto::from_reply(reply).await);
    }
    out
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        sessions: state.dialog.sessions().len().await,
    })
}

/// One message in, every reply out
pub async fn message_handler(
    State(state): State<AppState>,
    Json(payload): Json<MessageRequest>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<ErrorResponse>)> {
    let incoming = payload
        .into_incoming()
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(e)))?;

    tracing::debug!(user = %incoming.user, "message received");
    let replies = respond(&state, &incoming).await;
    Ok(Json(MessageResponse { replies }))
}

/// WebSocket conversation: one request per frame, one frame per reply
pub async fn message_stream_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> Response {
    ws.on_upgrade(move |socket| handle_stream(socket, state))
}

async fn handle_stream(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();

    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => break,
            Err(e) => {
                tracing::error!("WebSocket error: {}", e);
                break;
            }
            _ => continue,
        };

        let incoming = match serde_json::from_str::<MessageRequest>(msg.as_str())
            .map_err(|e| ErrorResponse {
                error: e.to_string(),
                code: "BAD_REQUEST".into(),
            })
            .and_then(MessageRequest::into_incoming)
        {
            Ok(incoming) => incoming,
            Err(e) => {
                let error = serde_json::json!({"type": "error", "error": e.error, "code": e.code});
                let _ = sender.send(Message::Text(error.to_string().into())).await;
                continue;
            }
        };

        for reply in respond(&state, &incoming).await {
            let frame = match serde_json::to_string(&reply) {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::error!("Reply serialization failed: {}", e);
                    continue;
                }
            };
            if sender.send(Message::Text(frame.into())).await.is_err() {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use vybe_core::gateway::MockGateway;
    use vybe_core::{ChartImage, Dialog, FlowResult};

    use super::*;

    const ADDR: &str = "So11111111111111111111111111111111111111112";

    fn state_with(gateway: Arc<MockGateway>) -> AppState {
        AppState::new(Dialog::builder().gateway(gateway).build().unwrap())
    }

    async fn post(app: axum::Router, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/api/message")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let app = crate::app(state_with(Arc::new(MockGateway::new())));
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["sessions"], 0);
    }

    #[tokio::test]
    async fn test_start_returns_greeting_and_keyboard() {
        let app = crate::app(state_with(Arc::new(MockGateway::new())));
        let (status, body) = post(
            app,
            json!({"user_id": "42", "text": "/start", "first_name": "Ada"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let reply = &body["replies"][0];
        assert_eq!(reply["type"], "text");
        assert!(reply["text"].as_str().unwrap().starts_with("👋 Hello Ada"));
        assert!(reply["keyboard"].is_array());
    }

    #[tokio::test]
    async fn test_empty_user_is_rejected() {
        let app = crate::app(state_with(Arc::new(MockGateway::new())));
        let (status, body) = post(app, json!({"user_id": " ", "text": "/start"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "MISSING_USER");
    }

    #[tokio::test]
    async fn test_sessions_persist_across_requests() {
        let gateway = Arc::new(MockGateway::new());
        let state = state_with(gateway.clone());

        post(crate::app(state.clone()), json!({"user_id": "7", "text": "📄 Details"})).await;
        let (_, body) = post(crate::app(state.clone()), json!({"user_id": "7", "text": ADDR})).await;

        assert_eq!(gateway.calls(), vec![format!("program_details({ADDR})")]);
        assert_eq!(body["replies"][0]["text"], format!("program_details: {ADDR}"));
        assert_eq!(state.dialog.sessions().len().await, 1);
    }

    #[tokio::test]
    async fn test_chart_is_inlined_as_base64() {
        let gateway = Arc::new(MockGateway::new());
        gateway.respond(
            "tvl",
            FlowResult::TextAndImage(
                "📈 TVL".into(),
                ChartImage {
                    bytes: b"\x89PNG".to_vec(),
                    caption: Some("TVL".into()),
                },
            ),
        );
        let state = state_with(gateway);

        post(crate::app(state.clone()), json!({"user_id": "9", "text": "📈 TVL"})).await;
        post(crate::app(state.clone()), json!({"user_id": "9", "text": ADDR})).await;
        let (_, body) = post(crate::app(state), json!({"user_id": "9", "text": "1d"})).await;

        let photo = &body["replies"][1];
        assert_eq!(photo["type"], "photo");
        assert_eq!(photo["image_base64"], STANDARD.encode(b"\x89PNG"));
        assert_eq!(photo["caption"], "TVL");
    }
}
