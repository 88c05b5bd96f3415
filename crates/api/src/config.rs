use std::path::PathBuf;

use crate::sessions::DEFAULT_MAX_SESSIONS;

/// Settings for the FlowKit Studio server, read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed to call the JSON API from a browser.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// How long in-flight requests may drain after a shutdown signal.
    pub shutdown_timeout_secs: u64,
    /// JSON file holding the editor's generated app id.
    pub app_id_cache_path: PathBuf,
    /// Externally visible origin, used to build viewer URLs.
    pub public_base_url: String,
    /// Live editor sessions kept before the least recently used is evicted.
    pub max_sessions: usize,
}

impl ServerConfig {
    /// Read the environment (after `.env` has been loaded).
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `HOST`                  | `0.0.0.0`               |
    /// | `PORT`                  | `3000`                  |
    /// | `CORS_ORIGINS`          | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                    |
    /// | `APP_ID_CACHE_PATH`     | `.flowkit/app_id.json`  |
    /// | `PUBLIC_BASE_URL`       | `http://localhost:3000` |
    /// | `MAX_EDITOR_SESSIONS`   | `200`                   |
    ///
    /// Panics on unparsable numbers so a bad deployment fails at boot.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let app_id_cache_path = std::env::var("APP_ID_CACHE_PATH")
            .unwrap_or_else(|_| ".flowkit/app_id.json".into())
            .into();

        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .trim_end_matches('/')
            .to_string();

        let max_sessions: usize = std::env::var("MAX_EDITOR_SESSIONS")
            .map(|raw| raw.parse().expect("MAX_EDITOR_SESSIONS must be a valid usize"))
            .unwrap_or(DEFAULT_MAX_SESSIONS);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            app_id_cache_path,
            public_base_url,
            max_sessions,
        }
    }

    /// Absolute URL of the standalone viewer for `app_id`.
    pub fn viewer_url(&self, app_id: &str) -> String {
        format!("{}/onboarding/{app_id}", self.public_base_url)
    }
}
