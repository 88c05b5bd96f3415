use std::sync::Arc;
use std::time::Instant;

use flowkit_core::app_id::AppId;
use flowkit_core::editor::EditorState;
use flowkit_store::FlowRepository;

use crate::config::ServerConfig;
use crate::sessions::{EditorSession, SessionManager};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Live editor sessions.
    pub sessions: Arc<SessionManager>,
    /// Published flows read by the viewer and the native SDK.
    pub flows: Arc<dyn FlowRepository>,
    /// Session rendered by the editor page at `/`.
    pub default_app_id: AppId,
}

impl AppState {
    /// Build the state and open the default editor session under
    /// `default_app_id`, starting from the default flow. That session is
    /// pinned: it is never evicted or deleted.
    pub async fn new(
        config: ServerConfig,
        flows: Arc<dyn FlowRepository>,
        default_app_id: AppId,
    ) -> Self {
        let sessions = Arc::new(SessionManager::new(config.max_sessions));
        sessions
            .insert_pinned(
                default_app_id.clone(),
                EditorSession::new(EditorState::default(), Instant::now()),
            )
            .await;

        Self {
            config: Arc::new(config),
            sessions,
            flows,
            default_app_id,
        }
    }
}
