use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

/// Database name is fixed; only the connection URL comes from the environment.
pub const DATABASE_NAME: &str = "blog-api";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub store: StoreConfig,
    pub api: ApiConfig,
    pub pagination: PaginationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Connection string for a driver-backed store; unused by the in-process
    /// store but kept as the single configuration point for the boundary.
    pub url: Option<String>,
    pub database_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    pub default_page_limit: usize,
    pub max_page_limit: Option<usize>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Environment presets first, then specific env vars on top
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("DATABASE_URL") {
            self.store.url = Some(v);
        }

        if let Ok(v) = env::var("BLOG_API_PORT").or_else(|_| env::var("PORT")) {
            self.api.port = v.parse().unwrap_or(self.api.port);
        }
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }

        if let Ok(v) = env::var("PAGINATION_DEFAULT_PAGE_LIMIT") {
            self.pagination.default_page_limit = v.parse().unwrap_or(self.pagination.default_page_limit);
        }
        if let Ok(v) = env::var("PAGINATION_MAX_PAGE_LIMIT") {
            self.pagination.max_page_limit = v.parse().ok();
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            store: StoreConfig { url: None, database_name: DATABASE_NAME.to_string() },
            api: ApiConfig { port: 3000, enable_request_logging: true },
            pagination: PaginationConfig { default_page_limit: 10, max_page_limit: Some(1000) },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            store: StoreConfig { url: None, database_name: DATABASE_NAME.to_string() },
            api: ApiConfig { port: 3000, enable_request_logging: true },
            pagination: PaginationConfig { default_page_limit: 10, max_page_limit: Some(500) },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            store: StoreConfig { url: None, database_name: DATABASE_NAME.to_string() },
            api: ApiConfig { port: 3000, enable_request_logging: false },
            pagination: PaginationConfig { default_page_limit: 10, max_page_limit: Some(100) },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
