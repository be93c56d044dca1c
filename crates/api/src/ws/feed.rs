use std::time::Duration;

use aurora_events::{ActivityHub, ActivitySubscription};
use axum::body::Bytes;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};

use crate::middleware::auth::AuthSession;
use crate::state::AppState;

/// Interval between heartbeat pings (in seconds).
const HEARTBEAT_INTERVAL_SECS: u64 = 30;

/// GET /api/v1/activity/ws
///
/// Upgrades an authenticated request to a WebSocket carrying the session
/// user's live activity stream.
pub async fn activity_feed(
    State(state): State<AppState>,
    session: AuthSession,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let hub = state.recorder.hub().clone();
    ws.on_upgrade(move |socket| async move {
        let subscription = hub.subscribe(session.user_id).await;
        handle_socket(socket, &hub, subscription).await;
    })
}

/// Manage a single feed connection after upgrade.
///
///   1. Spawns a sender task that forwards published records (and
///      heartbeat pings) to the sink.
///   2. Drains inbound frames on the current task until the client leaves.
///   3. Unsubscribes on disconnect.
async fn handle_socket(socket: WebSocket, hub: &ActivityHub, mut subscription: ActivitySubscription) {
    let handle = subscription.handle();
    tracing::info!(user_id = handle.user_id, listener_id = handle.id, "Activity feed connected");

    let (mut sink, mut stream) = socket.split();

    let send_task = tokio::spawn(async move {
        let period = Duration::from_secs(HEARTBEAT_INTERVAL_SECS);
        let mut heartbeat = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        loop {
            let message = tokio::select! {
                record = subscription.recv() => match record {
                    Some(record) => match serde_json::to_string(&record) {
                        Ok(text) => Some(Message::Text(text.into())),
                        Err(e) => {
                            tracing::error!(error = %e, id = record.id, "Failed to serialize activity");
                            None
                        }
                    },
                    None => Some(Message::Close(None)),
                },
                _ = heartbeat.tick() => Some(Message::Ping(Bytes::new())),
            };
            let Some(message) = message else {
                continue;
            };

            let closing = matches!(message, Message::Close(_));
            if sink.send(message).await.is_err() || closing {
                break;
            }
        }
    });

    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(listener_id = handle.id, "Pong received");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(listener_id = handle.id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    hub.unsubscribe(handle).await;
    send_task.abort();
    tracing::info!(user_id = handle.user_id, listener_id = handle.id, "Activity feed disconnected");
}
