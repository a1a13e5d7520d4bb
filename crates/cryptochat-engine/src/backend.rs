//! Client for the question-answering backend.
//!
//! The dispatcher only sees the [`ChatBackend`] trait, so tests can swap in
//! scripted fakes. [`HttpChatBackend`] talks to the real endpoint:
//!
//! ```text
//! POST {base_url}/api/crypto/chat   {"question": "..."}
//! 200                               {"response": "..."}
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::WidgetConfig;

/// Path of the chat endpoint, appended to the configured base URL.
pub const CHAT_ENDPOINT_PATH: &str = "/api/crypto/chat";

/// Request body sent to the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's question, verbatim.
    pub question: String,
}

/// Successful response body from the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    /// Natural-language answer.
    pub response: String,
}

/// Something that can answer a question.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Ask `question` and wait for the answer text.
    async fn ask(&self, question: &str) -> Result<String, BackendError>;
}

/// HTTP implementation of [`ChatBackend`].
#[derive(Debug, Clone)]
pub struct HttpChatBackend {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpChatBackend {
    /// Create a client for the backend rooted at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("cryptochat/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(BackendError::Transport)?;

        Ok(Self {
            endpoint: format!("{}{CHAT_ENDPOINT_PATH}", base_url.trim_end_matches('/')),
            client,
        })
    }

    /// Create a client from widget configuration.
    pub fn from_config(config: &WidgetConfig) -> Result<Self, BackendError> {
        Self::new(&config.backend_url, config.request_timeout())
    }

    /// Full URL of the chat endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn ask(&self, question: &str) -> Result<String, BackendError> {
        let body = ChatRequest {
            question: question.to_string(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(BackendError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status.as_u16()));
        }

        let text = response.text().await.map_err(BackendError::from_reqwest)?;
        let reply: ChatReply = serde_json::from_str(&text).map_err(BackendError::Malformed)?;
        Ok(reply.response)
    }
}

/// Errors that can occur when talking to the backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Connection refused, DNS failure, or other transport problem.
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The request did not complete in time.
    #[error("Request timed out")]
    Timeout,

    /// The backend answered with a non-success status.
    #[error("Backend returned HTTP {0}")]
    Status(u16),

    /// The body was not `{"response": <string>}`.
    #[error("Malformed response: {0}")]
    Malformed(#[source] serde_json::Error),

    /// The request task panicked or was cancelled before answering.
    #[error("Request task failed: {0}")]
    TaskFailed(String),
}

impl BackendError {
    fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err)
        }
    }
}
