//! Blocking HTTP transport shared by the encoders and the primary store.
//!
//! One attempt per call. Retry and fallback decisions belong to the
//! retrieval executor, so every failure is classified into a
//! [`BackendError`] and handed straight back.

use std::time::Duration;

use groundwork_core::errors::{BackendError, GroundError, GroundResult};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// Longest error body echoed into a [`BackendError::Status`].
const MAX_ERROR_BODY: usize = 512;

/// Credential attached to every request.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Credential {
    Bearer(String),
    Header { name: &'static str, value: String },
}

/// HTTP client bound to one named backend.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    backend: String,
    client: Client,
    timeout_ms: u64,
    credential: Option<Credential>,
}

impl HttpTransport {
    /// Build a transport for `backend` with a whole-request timeout.
    pub fn new(backend: impl Into<String>, timeout: Duration) -> GroundResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .build()
            .map_err(|e| GroundError::internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            backend: backend.into(),
            client,
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            credential: None,
        })
    }

    /// Send `Authorization: Bearer <token>` when a non-empty token is given.
    pub fn with_bearer_token(mut self, token: Option<String>) -> Self {
        self.credential = token
            .filter(|t| !t.trim().is_empty())
            .map(Credential::Bearer);
        self
    }

    /// Send `<name>: <value>` when a non-empty value is given.
    pub fn with_api_key_header(mut self, name: &'static str, value: Option<String>) -> Self {
        self.credential = value
            .filter(|v| !v.trim().is_empty())
            .map(|value| Credential::Header { name, value });
        self
    }

    pub fn backend(&self) -> &str {
        &self.backend
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// POST `body` as JSON and decode the JSON reply.
    pub fn post_json<Req, Resp>(&self, url: &str, body: &Req) -> GroundResult<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        debug!(backend = %self.backend, url, "POST");
        let request = self.authorize(self.client.post(url).json(body));
        let response = request.send().map_err(|e| self.classify(e))?;
        self.decode(response)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credential {
            Some(Credential::Bearer(token)) => request.bearer_auth(token),
            Some(Credential::Header { name, value }) => request.header(*name, value),
            None => request,
        }
    }

    fn decode<Resp: DeserializeOwned>(&self, response: Response) -> GroundResult<Resp> {
        let status = response.status();
        let text = response.text().map_err(|e| self.classify(e))?;

        if !status.is_success() {
            return Err(BackendError::Status {
                backend: self.backend.clone(),
                status: status.as_u16(),
                body: truncate(&text, MAX_ERROR_BODY),
            }
            .into());
        }

        serde_json::from_str(&text).map_err(|e| {
            BackendError::MalformedResponse {
                backend: self.backend.clone(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn classify(&self, err: reqwest::Error) -> GroundError {
        let backend = self.backend.clone();
        let err = if err.is_timeout() {
            BackendError::Timeout {
                backend,
                timeout_ms: self.timeout_ms,
            }
        } else if err.is_decode() {
            BackendError::MalformedResponse {
                backend,
                reason: err.to_string(),
            }
        } else {
            BackendError::Unreachable {
                backend,
                reason: err.to_string(),
            }
        };
        err.into()
    }
}

fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
