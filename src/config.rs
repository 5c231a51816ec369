// src/config.rs
//
// Runtime configuration
//
// Plain structs with sensible defaults. `AppConfig::from_env` overlays the
// `BIBLIORED_*` environment variables on top of the defaults.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Catalog backend as seen from the Android emulator
pub const DEFAULT_CATALOG_URL: &str = "http://10.0.2.2:8080/";

pub const DEFAULT_OPEN_LIBRARY_URL: &str = "https://openlibrary.org/";

pub const DEFAULT_USER_AGENT: &str = "BiblioRed/1.0";

/// HTTP settings for one backend
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub user_agent: String,
    /// Sent as `Authorization: Bearer <token>` when present
    pub bearer_token: Option<String>,
    /// Raw `Cookie` header forwarded to the backend
    pub cookie: Option<String>,
    /// Log every request and response status at debug level
    pub log_requests: bool,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            connect_timeout: Duration::from_secs(15),
            read_timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            bearer_token: None,
            cookie: None,
            log_requests: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub catalog: ApiConfig,
    pub open_library: ApiConfig,
    /// Host serving `/openlibrary/getCover/...` and `/openlibrary/getIsbnCover/...`
    pub cover_base_url: String,
    pub database_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog: ApiConfig::new(DEFAULT_CATALOG_URL),
            open_library: ApiConfig::new(DEFAULT_OPEN_LIBRARY_URL),
            cover_base_url: DEFAULT_CATALOG_URL.to_string(),
            database_path: None,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by the process environment
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production)
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("BIBLIORED_CATALOG_URL") {
            config.catalog.base_url = url.clone();
            config.cover_base_url = url;
        }
        if let Some(url) = lookup("BIBLIORED_OPENLIBRARY_URL") {
            config.open_library.base_url = url;
        }
        if let Some(url) = lookup("BIBLIORED_COVER_URL") {
            config.cover_base_url = url;
        }
        if let Some(cookie) = lookup("BIBLIORED_COOKIE") {
            config.catalog.cookie = Some(cookie);
        }
        if let Some(token) = lookup("BIBLIORED_TOKEN") {
            config.catalog.bearer_token = Some(token);
        }
        if let Some(secs) = lookup("BIBLIORED_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .map_err(|_| AppError::Config(format!("BIBLIORED_TIMEOUT_SECS is not a number: {}", secs)))?;
            config.catalog.read_timeout = Duration::from_secs(secs);
            config.open_library.read_timeout = Duration::from_secs(secs);
        }
        if let Some(path) = lookup("BIBLIORED_DB") {
            config.database_path = Some(PathBuf::from(path));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.catalog.base_url, DEFAULT_CATALOG_URL);
        assert_eq!(config.open_library.base_url, DEFAULT_OPEN_LIBRARY_URL);
        assert_eq!(config.catalog.connect_timeout, Duration::from_secs(15));
        assert_eq!(config.catalog.read_timeout, Duration::from_secs(30));
        assert!(config.database_path.is_none());
    }

    #[test]
    fn test_catalog_url_also_moves_cover_proxy() {
        let env: HashMap<&str, &str> = [("BIBLIORED_CATALOG_URL", "http://localhost:9000/")].into();
        let config = AppConfig::from_lookup(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.catalog.base_url, "http://localhost:9000/");
        assert_eq!(config.cover_base_url, "http://localhost:9000/");
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        let env: HashMap<&str, &str> = [("BIBLIORED_TIMEOUT_SECS", "soon")].into();
        let result = AppConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
