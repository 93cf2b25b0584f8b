//! Blocking HTTP client for a live graph server.

use crate::config::{DatabaseRef, DatabaseSpec, ServerConfig};
use crate::error::ClientError;
use crate::{ExecutionReport, GraphClient};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use schemaseed_woql::Query;
use serde_json::json;

pub struct HttpGraphClient {
    config: ServerConfig,
    http: Client,
}

impl std::fmt::Debug for HttpGraphClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Keep the key out of logs.
        f.debug_struct("HttpGraphClient")
            .field("server_url", &self.config.server_url)
            .field("account", &self.config.account)
            .field("user", &self.config.user)
            .finish_non_exhaustive()
    }
}

impl HttpGraphClient {
    /// Build the client and check that the server answers with our credentials.
    pub fn connect(config: ServerConfig) -> Result<Self, ClientError> {
        let mut config = config;
        config.server_url = crate::config::normalize_server_url(&config.server_url);

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if config.accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }
        let http = builder
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build http client: {e}")))?;

        let client = Self { config, http };
        let url = client.config.api_url("");
        let resp = client.send(&url, client.http.get(&url))?;
        Self::check(resp)?;
        tracing::info!(
            server = %client.config.server_url,
            user = %client.config.user,
            "connected"
        );
        Ok(client)
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    fn send(&self, url: &str, request: RequestBuilder) -> Result<Response, ClientError> {
        request
            .basic_auth(&self.config.user, Some(&self.config.key))
            .send()
            .map_err(|source| ClientError::Transport {
                url: url.to_string(),
                source,
            })
    }

    fn check(resp: Response) -> Result<Response, ClientError> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status().as_u16();
        let body = resp.text().unwrap_or_default();
        Err(ClientError::from_response_body(status, &body))
    }
}

impl GraphClient for HttpGraphClient {
    fn database_exists(&self, db: &DatabaseRef) -> Result<bool, ClientError> {
        let url = self.config.api_url(&format!("db/{}", db.path()));
        let resp = self.send(&url, self.http.head(&url))?;
        match resp.status() {
            StatusCode::NOT_FOUND => Ok(false),
            s if s.is_success() => Ok(true),
            _ => Self::check(resp).map(|_| true),
        }
    }

    fn create_database(&self, spec: &DatabaseSpec) -> Result<(), ClientError> {
        let url = self.config.api_url(&format!("db/{}", spec.db.path()));
        let body = json!({
            "label": spec.label,
            "comment": spec.description.clone().unwrap_or_default(),
            "schema": true,
        });
        let resp = self.send(&url, self.http.post(&url).json(&body))?;
        Self::check(resp)?;
        tracing::info!(db = %spec.db.path(), owner = spec.db.owner(), "created database");
        Ok(())
    }

    fn execute(&self, db: &DatabaseRef, query: &Query) -> Result<ExecutionReport, ClientError> {
        let url = self.config.api_url(&format!("woql/{}", db.path()));
        let body = json!({ "query": query.to_json() });
        let resp = self.send(&url, self.http.post(&url).json(&body))?;
        let resp = Self::check(resp)?;
        let text = resp.text().map_err(|source| ClientError::Transport {
            url: url.clone(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|e| {
            ClientError::InvalidResponse(format!("{e} in `{}`", truncate(&text, 200)))
        })
    }
}

fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
