use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::warn;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// Outbound request handed to the [`HttpClient`] collaborator.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: String,
    pub username: String,
    pub password: String,
    pub timeout: Duration,
}

impl HttpRequest {
    pub fn post(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::Post,
            headers: Vec::new(),
            body: String::new(),
            username: String::new(),
            password: String::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Request failed: {message}")]
    Transport { message: String },
}

/// Transport collaborator: the core only needs `perform`.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn perform(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}

/// reqwest-backed implementation used by the real binary.
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client; using defaults");
                Client::new()
            });
        Self { client }
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn perform(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Put => self.client.put(&request.url),
            HttpMethod::Delete => self.client.delete(&request.url),
        };

        builder = builder.timeout(request.timeout);

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        if !request.username.is_empty() {
            builder = builder.basic_auth(&request.username, Some(&request.password));
        }

        if !request.body.is_empty() {
            builder = builder.body(request.body.clone());
        }

        let response = builder.send().await.map_err(|err| HttpError::Transport {
            message: err.to_string(),
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|err| HttpError::Transport {
            message: err.to_string(),
        })?;

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_request_defaults() {
        let request = HttpRequest::post("https://ntfy.example/topic");
        assert_eq!(request.method, HttpMethod::Post);
        assert!(request.headers.is_empty());
        assert!(request.username.is_empty());
        assert_eq!(request.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn response_success_range() {
        assert!(
            HttpResponse {
                status: 200,
                body: String::new()
            }
            .is_success()
        );
        assert!(
            HttpResponse {
                status: 299,
                body: String::new()
            }
            .is_success()
        );
        assert!(
            !HttpResponse {
                status: 404,
                body: String::new()
            }
            .is_success()
        );
    }
}
