//! File-backed key-value cache.
//!
//! A flat JSON object on disk. The editor keeps its generated app id under
//! [`APP_ID_KEY`] so a restarted server keeps serving the same viewer URL.
//! Writes go through a mutex and replace the file atomically via rename.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use flowkit_core::app_id::AppId;
use tokio::sync::Mutex;

use crate::error::StoreError;

/// Key under which the editor's app id is stored.
pub const APP_ID_KEY: &str = "flowkit_app_id";

type Entries = BTreeMap<String, String>;

#[derive(Debug)]
pub struct AppIdCache {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl AppIdCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Entries, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Entries::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Entries::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, entries: &Entries) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, serde_json::to_vec_pretty(entries)?).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load().await?.remove(key))
    }

    pub async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load().await?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries).await
    }

    pub async fn remove(&self, key: &str) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load().await?;
        let removed = entries.remove(key).is_some();
        if removed {
            self.save(&entries).await?;
        }
        Ok(removed)
    }

    /// The cached app id, or a freshly generated one for `flow_name` that is
    /// stored before returning. An unparseable cached value is replaced.
    pub async fn get_or_create_app_id(&self, flow_name: &str) -> Result<AppId, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load().await?;

        if let Some(existing) = entries.get(APP_ID_KEY) {
            match AppId::parse(existing) {
                Ok(app_id) => return Ok(app_id),
                Err(e) => {
                    tracing::warn!(value = %existing, error = %e, "Discarding invalid cached app id")
                }
            }
        }

        let app_id = AppId::generate(flow_name);
        entries.insert(APP_ID_KEY.to_string(), app_id.to_string());
        self.save(&entries).await?;
        tracing::info!(app_id = %app_id, path = %self.path.display(), "Generated new app id");
        Ok(app_id)
    }
}
