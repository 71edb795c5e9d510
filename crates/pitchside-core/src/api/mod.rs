//! HTTP adapter for the api-sports.io football API.
//!
//! Every call is a single GET against the configured base URL carrying the
//! `x-rapidapi-host` / `x-rapidapi-key` headers. On success only the
//! `response` member of the JSON body is returned. Failures are classified
//! into [`FetchError`] and logged here; callers decide what to show.

mod endpoint;
mod error;

pub use endpoint::{path_and_query, Endpoint};
pub use error::{FailureKind, FetchError};

use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::ApiConfig;

pub const HOST_HEADER: &str = "x-rapidapi-host";
pub const KEY_HEADER: &str = "x-rapidapi-key";

/// Member of the API body that carries the payload.
const RESPONSE_FIELD: &str = "response";
const ERRORS_FIELD: &str = "errors";

/// Football API adapter. Holds settings only; no state is shared between calls.
#[derive(Debug, Clone)]
pub struct FootballApi {
    base_url: String,
    host: String,
    api_key: String,
    timeout: Duration,
}

impl FootballApi {
    pub fn new(base_url: &str, host: &str, api_key: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            host: host.to_string(),
            api_key: api_key.to_string(),
            timeout,
        }
    }

    /// Build the adapter from config, resolving the API key from the environment first.
    pub fn from_config(config: &ApiConfig) -> Self {
        let api_key = config.resolved_api_key();
        if api_key.is_empty() {
            warn!("No football API key configured; requests will likely be rejected");
        }
        Self::new(
            &config.base_url,
            &config.host,
            &api_key,
            Duration::from_secs(config.timeout_seconds),
        )
    }

    /// Build a client scoped to one call; it and its connections drop with it.
    fn build_http_client(&self) -> Result<reqwest::Client, FetchError> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("pitchside/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Unexpected(format!("HTTP client error: {e}")))
    }

    /// Perform one GET and return the `response` payload.
    pub async fn request(&self, endpoint: &Endpoint) -> Result<Value, FetchError> {
        let result = self.send(endpoint).await;
        if let Err(ref e) = result {
            match e {
                FetchError::Status { status, body } => {
                    warn!(status, body = %body, path = endpoint.path(), "HTTP error occurred")
                }
                FetchError::Transport(msg) => {
                    warn!(error = %msg, path = endpoint.path(), "Request error")
                }
                FetchError::Unexpected(msg) => {
                    warn!(error = %msg, path = endpoint.path(), "Unexpected error")
                }
                FetchError::Empty => {}
            }
        }
        result
    }

    async fn send(&self, endpoint: &Endpoint) -> Result<Value, FetchError> {
        let url = endpoint.url(&self.base_url)?;
        let client = self.build_http_client()?;

        debug!(url = %path_and_query(&url), "Football API request");

        let resp = client
            .get(url)
            .header(HOST_HEADER, &self.host)
            .header(KEY_HEADER, &self.api_key)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = match resp.text().await {
                Ok(body) => body,
                Err(e) => {
                    debug!(error = %e, status = status.as_u16(), "Could not read error body");
                    String::new()
                }
            };
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp.bytes().await?;
        let mut body: Value = serde_json::from_slice(&bytes)
            .map_err(|e| FetchError::Unexpected(format!("invalid JSON body: {e}")))?;

        if let Some(errors) = body.get(ERRORS_FIELD).filter(|e| !is_empty_payload(e)) {
            warn!(errors = %errors, path = endpoint.path(), "Football API reported errors");
        }

        match body.get_mut(RESPONSE_FIELD) {
            Some(payload) => Ok(payload.take()),
            None => Err(FetchError::Unexpected(format!(
                "response body has no '{}' field",
                RESPONSE_FIELD
            ))),
        }
    }
}

/// Whether a payload counts as "no data": null, false, 0, "", [] or {}.
pub fn is_empty_payload(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn api_for(server: &MockServer) -> FootballApi {
        FootballApi::new(
            &server.base_url(),
            "v3.football.api-sports.io",
            "test-key",
            Duration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn returns_response_member_and_sends_headers() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/players/teams")
                    .query_param("player", "276")
                    .header("x-rapidapi-host", "v3.football.api-sports.io")
                    .header("x-rapidapi-key", "test-key");
                then.status(200).json_body(json!({
                    "get": "players/teams",
                    "errors": [],
                    "response": [{"team": {"id": 85}}]
                }));
            })
            .await;

        let endpoint = Endpoint::new("/players/teams").param("player", "276");
        let payload = api_for(&server).request(&endpoint).await.unwrap();

        mock.assert_async().await;
        assert_eq!(payload, json!([{"team": {"id": 85}}]));
    }

    #[tokio::test]
    async fn non_success_status_is_classified() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/leagues");
                then.status(500).body("upstream exploded");
            })
            .await;

        let endpoint = Endpoint::new("/leagues").param("search", "x");
        let err = api_for(&server).request(&endpoint).await.unwrap_err();
        match err {
            FetchError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "upstream exploded");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_response_field_is_unexpected() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/leagues");
                then.status(200).json_body(json!({"message": "You are not subscribed"}));
            })
            .await;

        let endpoint = Endpoint::new("/leagues").param("search", "x");
        let err = api_for(&server).request(&endpoint).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::Unexpected);
    }

    #[tokio::test]
    async fn non_json_body_is_unexpected() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/leagues");
                then.status(200).body("<html>maintenance</html>");
            })
            .await;

        let endpoint = Endpoint::new("/leagues").param("search", "x");
        let err = api_for(&server).request(&endpoint).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::Unexpected);
    }

    #[tokio::test]
    async fn refused_connection_is_transport() {
        let api = FootballApi::new(
            "http://127.0.0.1:1",
            "v3.football.api-sports.io",
            "",
            Duration::from_secs(5),
        );
        let endpoint = Endpoint::new("/leagues").param("search", "x");
        let err = api.request(&endpoint).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::Transport);
    }

    #[tokio::test]
    async fn timeout_is_transport() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/leagues");
                then.status(200)
                    .delay(Duration::from_millis(800))
                    .json_body(json!({"response": []}));
            })
            .await;

        let api = FootballApi::new(
            &server.base_url(),
            "v3.football.api-sports.io",
            "test-key",
            Duration::from_millis(100),
        );
        let endpoint = Endpoint::new("/leagues").param("search", "x");
        let err = api.request(&endpoint).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::Transport);
    }

    #[test]
    fn empty_payloads() {
        assert!(is_empty_payload(&json!(null)));
        assert!(is_empty_payload(&json!([])));
        assert!(is_empty_payload(&json!({})));
        assert!(is_empty_payload(&json!("")));
        assert!(is_empty_payload(&json!(0)));
        assert!(!is_empty_payload(&json!([{"id": 1}])));
        assert!(!is_empty_payload(&json!({"errors": "x"})));
    }
}
