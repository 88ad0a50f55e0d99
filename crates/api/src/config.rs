use reqfields_core::registry::DEFAULT_PUBLIC_POST_TYPES;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Post types a registration for `"any"` expands to.
    pub public_post_types: Vec<String>,
    /// Built-in fields that start out required (`REQUIRED_FIELDS`).
    pub required_fields: Vec<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `PUBLIC_POST_TYPES`    | `post,page,attachment`     |
    /// | `REQUIRED_FIELDS`      | (none)                     |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = list_var("CORS_ORIGINS", "http://localhost:5173");

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let public_post_types = list_var("PUBLIC_POST_TYPES", &DEFAULT_PUBLIC_POST_TYPES.join(","));
        let required_fields = list_var("REQUIRED_FIELDS", "");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            public_post_types,
            required_fields,
        }
    }
}

/// Read a comma-separated env var, dropping blank entries.
fn list_var(name: &str, default: &str) -> Vec<String> {
    split_list(&std::env::var(name).unwrap_or_else(|_| default.to_string()))
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
