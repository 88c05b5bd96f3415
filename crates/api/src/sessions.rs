//! Live editor sessions, keyed by app id.
//!
//! Each session pairs the editable flow with the preview that follows it.
//! Handlers borrow a session through [`SessionManager::read`] or
//! [`SessionManager::update`], which hold the map lock for exactly one
//! closure call, so every mutation is visible to the next render.

use std::collections::HashMap;
use std::time::Instant;

use flowkit_core::app_id::AppId;
use flowkit_core::editor::EditorState;
use flowkit_core::navigation::PreviewMode;
use flowkit_core::preview::PreviewSession;
use tokio::sync::RwLock;

/// One editor plus its phone-frame preview.
#[derive(Debug, Clone)]
pub struct EditorSession {
    pub editor: EditorState,
    pub preview: PreviewSession,
}

impl EditorSession {
    pub fn new(editor: EditorState, now: Instant) -> Self {
        let mut preview = PreviewSession::new(PreviewMode::Editor, now);
        preview.follow_editor(&editor, now);
        Self { editor, preview }
    }

    /// Bring the preview in line with the editor after a mutation.
    pub fn sync_preview(&mut self, now: Instant) {
        self.preview.follow_editor(&self.editor, now);
    }
}

/// Default cap on live sessions.
pub const DEFAULT_MAX_SESSIONS: usize = 200;

#[derive(Debug)]
struct Entry {
    session: EditorSession,
    last_used: Instant,
    pinned: bool,
}

/// Thread-safe registry of editor sessions.
///
/// Holds at most `capacity` sessions. Registering a new one when full
/// evicts the least recently used unpinned session.
#[derive(Debug)]
pub struct SessionManager {
    sessions: RwLock<HashMap<AppId, Entry>>,
    capacity: usize,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SESSIONS)
    }
}

impl SessionManager {
    pub fn new(capacity: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Register a session, replacing any earlier one under the same id.
    /// Returns the id evicted to make room, if any.
    pub async fn insert(&self, app_id: AppId, session: EditorSession) -> Option<AppId> {
        self.insert_entry(app_id, session, false).await
    }

    /// Register a session that is never evicted.
    pub async fn insert_pinned(&self, app_id: AppId, session: EditorSession) {
        self.insert_entry(app_id, session, true).await;
    }

    async fn insert_entry(
        &self,
        app_id: AppId,
        session: EditorSession,
        pinned: bool,
    ) -> Option<AppId> {
        let mut sessions = self.sessions.write().await;
        let evicted = if sessions.len() >= self.capacity && !sessions.contains_key(&app_id) {
            let oldest = sessions
                .iter()
                .filter(|(_, entry)| !entry.pinned)
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(id, _)| id.clone());
            if let Some(id) = &oldest {
                sessions.remove(id);
                tracing::info!(app_id = %id, "Editor session evicted");
            }
            oldest
        } else {
            None
        };

        tracing::debug!(app_id = %app_id, pinned, "Editor session registered");
        sessions.insert(
            app_id,
            Entry {
                session,
                last_used: Instant::now(),
                pinned,
            },
        );
        evicted
    }

    /// Drop the session for `app_id`. Pinned sessions stay.
    pub async fn remove(&self, app_id: &AppId) -> Option<EditorSession> {
        let mut sessions = self.sessions.write().await;
        if sessions.get(app_id)?.pinned {
            return None;
        }
        sessions.remove(app_id).map(|entry| entry.session)
    }

    pub async fn contains(&self, app_id: &AppId) -> bool {
        self.sessions.read().await.contains_key(app_id)
    }

    /// Run `f` against the session for `app_id` under the read lock.
    pub async fn read<R>(&self, app_id: &AppId, f: impl FnOnce(&EditorSession) -> R) -> Option<R> {
        self.sessions
            .read()
            .await
            .get(app_id)
            .map(|entry| f(&entry.session))
    }

    /// Run `f` against the session for `app_id` under the write lock and
    /// mark it as recently used.
    pub async fn update<R>(
        &self,
        app_id: &AppId,
        f: impl FnOnce(&mut EditorSession) -> R,
    ) -> Option<R> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(app_id)?;
        entry.last_used = Instant::now();
        Some(f(&mut entry.session))
    }

    /// All session ids, sorted.
    pub async fn ids(&self) -> Vec<AppId> {
        let mut ids: Vec<AppId> = self.sessions.read().await.keys().cloned().collect();
        ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        ids
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_id(raw: &str) -> AppId {
        AppId::parse(raw).unwrap()
    }

    #[tokio::test]
    async fn update_is_visible_to_next_read() {
        let manager = SessionManager::default();
        let id = app_id("flow-abc12345");
        manager
            .insert(id.clone(), EditorSession::new(EditorState::default(), Instant::now()))
            .await;

        manager
            .update(&id, |s| s.editor.rename_flow("Renamed"))
            .await
            .unwrap();

        let name = manager.read(&id, |s| s.editor.flow().name.clone()).await;
        assert_eq!(name.as_deref(), Some("Renamed"));
    }

    #[tokio::test]
    async fn unknown_session_yields_none() {
        let manager = SessionManager::default();
        let id = app_id("missing");
        assert!(manager.read(&id, |_| ()).await.is_none());
        assert!(manager.update(&id, |_| ()).await.is_none());
        assert!(!manager.contains(&id).await);
        assert_eq!(manager.session_count().await, 0);
    }

    fn session() -> EditorSession {
        EditorSession::new(EditorState::default(), Instant::now())
    }

    #[tokio::test]
    async fn full_manager_evicts_least_recently_used() {
        let manager = SessionManager::new(3);
        let pinned = app_id("default-flow");
        manager.insert_pinned(pinned.clone(), session()).await;
        assert_eq!(manager.insert(app_id("first"), session()).await, None);
        assert_eq!(manager.insert(app_id("second"), session()).await, None);

        // Touching "first" leaves "second" as the stalest unpinned entry.
        manager.update(&app_id("first"), |_| ()).await.unwrap();
        let evicted = manager.insert(app_id("third"), session()).await;

        assert_eq!(evicted, Some(app_id("second")));
        assert_eq!(manager.session_count().await, 3);
        assert!(manager.contains(&pinned).await);
        assert!(manager.contains(&app_id("first")).await);
    }

    #[tokio::test]
    async fn replacing_existing_id_does_not_evict() {
        let manager = SessionManager::new(1);
        manager.insert(app_id("only"), session()).await;
        assert_eq!(manager.insert(app_id("only"), session()).await, None);
        assert_eq!(manager.session_count().await, 1);
    }

    #[tokio::test]
    async fn remove_skips_pinned_sessions() {
        let manager = SessionManager::default();
        manager.insert_pinned(app_id("default-flow"), session()).await;
        manager.insert(app_id("scratch"), session()).await;

        assert!(manager.remove(&app_id("default-flow")).await.is_none());
        assert!(manager.remove(&app_id("scratch")).await.is_some());
        assert!(manager.remove(&app_id("scratch")).await.is_none());
        assert_eq!(manager.ids().await, vec![app_id("default-flow")]);
    }
}
