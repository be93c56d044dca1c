use std::sync::Arc;

use aurora_events::ActivityRecorder;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; inner data is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (session secret, gate paths, timeouts).
    pub config: Arc<ServerConfig>,
    /// Activity recorder; its hub carries the live activity feed.
    pub recorder: Arc<ActivityRecorder>,
}
