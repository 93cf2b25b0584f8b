//! Connection configuration.
//!
//! Values come from (highest first) explicit overrides, the environment, and
//! built-in defaults matching a local development server.

use std::time::Duration;

pub const SERVER_URL_ENV: &str = "SCHEMASEED_SERVER";
pub const ACCOUNT_ENV: &str = "SCHEMASEED_ACCOUNT";
pub const USER_ENV: &str = "SCHEMASEED_USER";
pub const KEY_ENV: &str = "SCHEMASEED_KEY";

pub const DEFAULT_SERVER_URL: &str = "https://127.0.0.1:6363";
pub const DEFAULT_ACCOUNT: &str = "admin";
pub const DEFAULT_USER: &str = "admin";
pub const DEFAULT_KEY: &str = "root";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub server_url: String,
    pub account: String,
    pub user: String,
    pub key: String,
    pub timeout: Option<Duration>,
    /// Accept self-signed certificates (local servers ship with one).
    pub accept_invalid_certs: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            account: DEFAULT_ACCOUNT.to_string(),
            user: DEFAULT_USER.to_string(),
            key: DEFAULT_KEY.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
            accept_invalid_certs: false,
        }
    }
}

/// Per-field overrides, typically from command-line flags.
#[derive(Debug, Clone, Default)]
pub struct ServerOverrides {
    pub server_url: Option<String>,
    pub account: Option<String>,
    pub user: Option<String>,
    pub key: Option<String>,
    pub timeout: Option<Duration>,
    pub accept_invalid_certs: bool,
}

impl ServerConfig {
    /// Resolve overrides, then the process environment, then defaults.
    pub fn resolve(overrides: ServerOverrides) -> Self {
        Self::resolve_with(overrides, |name| std::env::var(name).ok())
    }

    /// Same as [`ServerConfig::resolve`] with an explicit environment lookup.
    pub fn resolve_with(
        overrides: ServerOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let pick = |value: Option<String>, var: &str, default: &str| -> String {
            value
                .or_else(|| env(var))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        let defaults = ServerConfig::default();
        Self {
            server_url: normalize_server_url(&pick(
                overrides.server_url,
                SERVER_URL_ENV,
                DEFAULT_SERVER_URL,
            )),
            account: pick(overrides.account, ACCOUNT_ENV, DEFAULT_ACCOUNT),
            user: pick(overrides.user, USER_ENV, DEFAULT_USER),
            key: pick(overrides.key, KEY_ENV, DEFAULT_KEY),
            timeout: overrides.timeout.or(defaults.timeout),
            accept_invalid_certs: overrides.accept_invalid_certs,
        }
    }

    pub fn api_url(&self, path: &str) -> String {
        format!("{}/api/{}", self.server_url, path.trim_start_matches('/'))
    }
}

/// Trim, default to `https://`, and drop trailing slashes.
pub fn normalize_server_url(url: &str) -> String {
    let mut url = url.trim().to_string();
    if url.is_empty() {
        url = DEFAULT_SERVER_URL.to_string();
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        url = format!("https://{url}");
    }
    url.trim_end_matches('/').to_string()
}

/// Address of one database on the server.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DatabaseRef {
    pub account: String,
    pub id: String,
}

impl DatabaseRef {
    pub fn new(account: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            id: id.into(),
        }
    }

    pub fn path(&self) -> String {
        format!("{}/{}", self.account, self.id)
    }

    pub fn owner(&self) -> &str {
        &self.account
    }
}

/// What to create when the database is missing. The database is owned by
/// `db.account`; that account is the first segment of every request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSpec {
    pub db: DatabaseRef,
    pub label: String,
    pub description: Option<String>,
}

impl DatabaseSpec {
    pub fn new(db: DatabaseRef, label: impl Into<String>) -> Self {
        Self {
            db,
            label: label.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_urls() {
        assert_eq!(
            normalize_server_url(" 127.0.0.1:6363/ "),
            "https://127.0.0.1:6363"
        );
        assert_eq!(
            normalize_server_url("http://localhost:6363//"),
            "http://localhost:6363"
        );
        assert_eq!(normalize_server_url(""), DEFAULT_SERVER_URL);
    }

    #[test]
    fn overrides_beat_environment_beat_defaults() {
        let env = |name: &str| match name {
            SERVER_URL_ENV => Some("db.example.org".to_string()),
            USER_ENV => Some("env-user".to_string()),
            KEY_ENV => Some("   ".to_string()),
            _ => None,
        };
        let cfg = ServerConfig::resolve_with(
            ServerOverrides {
                user: Some("flag-user".into()),
                ..Default::default()
            },
            env,
        );
        assert_eq!(cfg.server_url, "https://db.example.org");
        assert_eq!(cfg.user, "flag-user");
        assert_eq!(cfg.account, DEFAULT_ACCOUNT);
        assert_eq!(cfg.key, DEFAULT_KEY);
        assert_eq!(
            cfg.api_url("/db/admin/x"),
            "https://db.example.org/api/db/admin/x"
        );
    }
}
