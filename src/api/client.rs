use crate::error::ApiError;
use crate::utils::error_helpers::{convert_body_error, convert_request_error, server_message};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("sonar-report/", env!("CARGO_PKG_VERSION"));

/// Authenticated GET access to the server.
///
/// Acquisition services only see this trait, so tests can script responses
/// without a network.
#[async_trait]
pub trait RemoteResource: Send + Sync {
    /// GET `url` and parse the body as a JSON value.
    async fn get_json(&self, url: &str) -> Result<Value, ApiError>;

    /// GET `url` and return the body untouched.
    async fn get_text(&self, url: &str) -> Result<String, ApiError>;
}

#[derive(Debug, Clone)]
pub struct SonarClient {
    client: Client,
    token: Option<String>,
    timeout_secs: u64,
}

impl SonarClient {
    pub fn new(token: Option<String>) -> Result<Self, ApiError> {
        Self::with_timeout(token, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(token: Option<String>, timeout_secs: u64) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| convert_request_error(e, "client_init", timeout_secs))?;

        Ok(SonarClient {
            client,
            token: token.filter(|t| !t.is_empty()),
            timeout_secs,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    // The token goes in as the basic-auth user with an empty password.
    pub fn build_request(&self, url: &str) -> RequestBuilder {
        let request = self.client.get(url);

        match &self.token {
            Some(token) => request.basic_auth(token, Some("")),
            None => request,
        }
    }

    async fn send(&self, url: &str) -> Result<Response, ApiError> {
        log::debug!("GET {}", url);

        let response = self
            .build_request(url)
            .send()
            .await
            .map_err(|e| convert_request_error(e, url, self.timeout_secs))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        match status.as_u16() {
            401 | 403 => Err(ApiError::Unauthorized {
                status: status.as_u16(),
                endpoint: url.to_string(),
                server_message: server_message(&error_text),
            }),
            408 | 504 => Err(ApiError::Timeout {
                timeout_secs: self.timeout_secs,
                endpoint: url.to_string(),
            }),
            _ => Err(ApiError::Rejected {
                status: status.as_u16(),
                endpoint: url.to_string(),
                message: server_message(&error_text),
            }),
        }
    }
}

#[async_trait]
impl RemoteResource for SonarClient {
    async fn get_json(&self, url: &str) -> Result<Value, ApiError> {
        let response = self.send(url).await?;
        let body = response
            .text()
            .await
            .map_err(|e| convert_request_error(e, url, self.timeout_secs))?;

        serde_json::from_str(&body).map_err(|e| convert_body_error(e, url))
    }

    async fn get_text(&self, url: &str) -> Result<String, ApiError> {
        let response = self.send(url).await?;
        response
            .text()
            .await
            .map_err(|e| convert_request_error(e, url, self.timeout_secs))
    }
}
