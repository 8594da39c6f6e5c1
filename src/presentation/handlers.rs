// HTTP request handlers
use std::sync::Arc;

use axum::{
    extract::{
        Query, State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};

use crate::domain::error::EngineError;
use crate::domain::reading::Sensor;
use crate::domain::timestamp::normalize_delimiters;
use crate::presentation::app_state::AppState;

#[derive(Deserialize)]
pub struct DegreeDaysQuery {
    pub threshold: f64,
    pub sensor: Option<Sensor>,
    pub start: String,
    pub end: Option<String>,
}

#[derive(Deserialize)]
pub struct TemperatureQuery {
    pub sensor: Option<Sensor>,
    pub at: String,
}

#[derive(Serialize)]
struct DegreeDaysResponse {
    degree_days: f64,
}

#[derive(Serialize)]
struct TemperatureResponse {
    temperature_c: f64,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Degree-days accumulated over a date/time window
pub async fn degree_days(
    Query(query): Query<DegreeDaysQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let sensor = query.sensor.unwrap_or(Sensor::Probe);
    let start = normalize_delimiters(&query.start);
    let end = query.end.as_deref().map(normalize_delimiters);

    match state
        .degree_day_service
        .degree_days_between(query.threshold, sensor, &start, end.as_deref())
    {
        Ok(total) => Json(DegreeDaysResponse { degree_days: total }).into_response(),
        Err(error) => engine_error_response(error),
    }
}

/// Single reading nearest to a point in time
pub async fn temperature(
    Query(query): Query<TemperatureQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let sensor = query.sensor.unwrap_or(Sensor::Probe);
    let at = normalize_delimiters(&query.at);

    match state.degree_day_service.temperature_at(sensor, &at) {
        Ok(value) => Json(TemperatureResponse { temperature_c: value }).into_response(),
        Err(error) => engine_error_response(error),
    }
}

fn engine_error_response(error: EngineError) -> Response {
    tracing::warn!("request failed: {}", error);
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}

/// Upgrade to the chat room socket
pub async fn chat_socket(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| chat_connection(socket, state))
}

/// One connected chat client. The first text frame names the client, every
/// later frame is relayed to the room.
async fn chat_connection(socket: WebSocket, state: Arc<AppState>) {
    let (mut outbound, mut inbound) = socket.split();

    let nickname = loop {
        match inbound.next().await {
            Some(Ok(Message::Text(name))) if !name.trim().is_empty() => {
                break name.trim().to_string();
            }
            Some(Ok(_)) => continue,
            _ => return,
        }
    };

    let mut events = state.chat_service.join(&nickname);

    let mut relay = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            let Ok(text) = serde_json::to_string(&event) else {
                continue;
            };
            if outbound.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    let service = state.chat_service.clone();
    let sender = nickname.clone();
    let mut reader = tokio::spawn(async move {
        while let Some(Ok(frame)) = inbound.next().await {
            if let Message::Text(message) = frame {
                service.message(&sender, &message);
            }
        }
    });

    // Whichever side closes first tears down the other.
    tokio::select! {
        _ = &mut relay => reader.abort(),
        _ = &mut reader => relay.abort(),
    }

    state.chat_service.leave(&nickname);
}
