//! Client error taxonomy.
//!
//! Servers report failures as JSON documents carrying an `api:error` object
//! whose `@type` names the failure; that name is decoded into an
//! [`ErrorCategory`] so callers can branch on it instead of matching message
//! text.

use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCategory {
    DatabaseAlreadyExists,
    DatabaseNotFound,
    Unauthorized,
    BadRequest,
    Other(String),
}

impl ErrorCategory {
    pub fn from_api_type(ty: &str) -> Self {
        match ty {
            "api:DatabaseAlreadyExists" => ErrorCategory::DatabaseAlreadyExists,
            "api:DatabaseDoesNotExist" | "api:UnknownDatabase" | "api:ResourceNotFound" => {
                ErrorCategory::DatabaseNotFound
            }
            "api:IncorrectAuthenticationError" | "api:Unauthorized" => ErrorCategory::Unauthorized,
            "api:BadRequest" | "api:WOQLSyntaxError" => ErrorCategory::BadRequest,
            other => ErrorCategory::Other(other.to_string()),
        }
    }

    /// Fallback when the body carries no `api:error` type.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => ErrorCategory::BadRequest,
            401 | 403 => ErrorCategory::Unauthorized,
            404 => ErrorCategory::DatabaseNotFound,
            other => ErrorCategory::Other(format!("http {other}")),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ErrorCategory::DatabaseAlreadyExists => "api:DatabaseAlreadyExists",
            ErrorCategory::DatabaseNotFound => "api:DatabaseDoesNotExist",
            ErrorCategory::Unauthorized => "api:Unauthorized",
            ErrorCategory::BadRequest => "api:BadRequest",
            ErrorCategory::Other(s) => s,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("failed to reach graph server at {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("graph server error {status} ({category}): {message}")]
    Api {
        category: ErrorCategory,
        status: u16,
        message: String,
    },
    #[error("graph server returned an unexpected response: {0}")]
    InvalidResponse(String),
    #[error("invalid client configuration: {0}")]
    Config(String),
    #[error("batch `{batch}` failed: {source}")]
    Batch {
        batch: String,
        #[source]
        source: Box<ClientError>,
    },
}

impl ClientError {
    pub fn api(category: ErrorCategory, status: u16, message: impl Into<String>) -> Self {
        ClientError::Api {
            category,
            status,
            message: message.into(),
        }
    }

    /// Category of a server-reported failure (looking through batch context).
    pub fn category(&self) -> Option<&ErrorCategory> {
        match self {
            ClientError::Api { category, .. } => Some(category),
            ClientError::Batch { source, .. } => source.category(),
            _ => None,
        }
    }

    pub fn is_already_exists(&self) -> bool {
        self.category() == Some(&ErrorCategory::DatabaseAlreadyExists)
    }

    /// Decode an error response body. Non-JSON bodies keep their text as the
    /// message and are categorized by status.
    pub fn from_response_body(status: u16, body: &str) -> Self {
        let Ok(doc) = serde_json::from_str::<Value>(body) else {
            let message = if body.trim().is_empty() {
                format!("http status {status}")
            } else {
                body.trim().to_string()
            };
            return ClientError::api(ErrorCategory::from_status(status), status, message);
        };

        let category = doc
            .get("api:error")
            .and_then(|e| e.get("@type"))
            .and_then(Value::as_str)
            .map(ErrorCategory::from_api_type)
            .unwrap_or_else(|| ErrorCategory::from_status(status));
        let message = doc
            .get("api:message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| doc.to_string());
        ClientError::api(category, status, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_already_exists_body() {
        let body = r#"{
            "@type": "api:DbCreateErrorResponse",
            "api:status": "api:failure",
            "api:message": "Database already exists.",
            "api:error": {
                "@type": "api:DatabaseAlreadyExists",
                "api:database_name": "schema_tutorial"
            }
        }"#;
        let err = ClientError::from_response_body(400, body);
        assert!(err.is_already_exists());
        assert!(err.to_string().contains("Database already exists."));
    }

    #[test]
    fn non_json_body_falls_back_to_status() {
        let err = ClientError::from_response_body(401, "nope");
        assert_eq!(err.category(), Some(&ErrorCategory::Unauthorized));
        assert!(!err.is_already_exists());
    }

    #[test]
    fn batch_context_keeps_category() {
        let inner = ClientError::api(ErrorCategory::BadRequest, 400, "bad query");
        let err = ClientError::Batch {
            batch: "type-hierarchy".into(),
            source: Box::new(inner),
        };
        assert_eq!(err.category(), Some(&ErrorCategory::BadRequest));
        assert!(err.to_string().contains("type-hierarchy"));
    }

    #[test]
    fn unknown_api_type_is_preserved() {
        assert_eq!(
            ErrorCategory::from_api_type("api:SchemaCheckFailure"),
            ErrorCategory::Other("api:SchemaCheckFailure".into())
        );
    }
}
