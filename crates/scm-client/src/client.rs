//! SCM API client
//!
//! `reqwest`-backed [`HttpTransport`]. Authenticates with a bearer token and
//! maps structured error bodies to [`ApiError`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::Value;
use tracing::debug;

use crate::api_error::ApiError;
use crate::config::ClientConfig;
use crate::error::ScmError;
use crate::transport::HttpTransport;

/// SCM API client
pub struct ScmClient {
    client: Client,
    base_url: String,
    token: String,
}

impl std::fmt::Debug for ScmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScmClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ScmClient {
    /// Create a new SCM client
    ///
    /// # Arguments
    /// * `base_url` - API base URL (e.g., "https://api.strata.paloaltonetworks.com")
    /// * `token` - OAuth2 access token
    pub fn new(base_url: String, token: String) -> Result<Self, ScmError> {
        Self::with_timeout(base_url, token, Duration::from_secs(30))
    }

    /// Create a client from a [`ClientConfig`]
    pub fn from_config(config: &ClientConfig) -> Result<Self, ScmError> {
        Self::with_timeout(
            config.base_url.clone(),
            config.access_token.clone(),
            config.timeout,
        )
    }

    fn with_timeout(base_url: String, token: String, timeout: Duration) -> Result<Self, ScmError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a URL-encoded query string
    fn build_query_string(params: &[(&str, String)]) -> String {
        params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    fn build_url(&self, path: &str, params: &[(&str, String)]) -> String {
        if params.is_empty() {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}{}?{}", self.base_url, path, Self::build_query_string(params))
        }
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .bearer_auth(&self.token)
            .header("Accept", "application/json")
    }

    /// Send a request and decode its JSON body
    ///
    /// An empty success body decodes to `Value::Null`.
    async fn send(&self, request: RequestBuilder) -> Result<Value, ScmError> {
        let response = request.send().await?;
        let response = Self::check_status(response).await?;

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Map non-success responses to an error
    ///
    /// Structured `_errors` bodies become [`ScmError::Api`]; anything else
    /// surfaces the original status error.
    async fn check_status(response: Response) -> Result<Response, ScmError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let status_error = response.error_for_status_ref().err();
        let body = response.text().await.unwrap_or_default();
        debug!("SCM API returned {}: {}", status, body);

        if let Ok(json) = serde_json::from_str::<Value>(&body) {
            if let Some(api_error) = ApiError::from_response(status.as_u16(), &json) {
                return Err(ScmError::Api(api_error));
            }
        }

        match status_error {
            Some(err) => Err(ScmError::Http(err)),
            None => Err(ScmError::MalformedResponse(format!(
                "unexpected HTTP status {status}: {body}"
            ))),
        }
    }
}

#[async_trait]
impl HttpTransport for ScmClient {
    async fn get(&self, path: &str, params: &[(&str, String)]) -> Result<Value, ScmError> {
        let url = self.build_url(path, params);
        debug!("GET {}", url);
        self.send(self.request(Method::GET, &url)).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, ScmError> {
        let url = self.build_url(path, &[]);
        debug!("POST {}", url);
        self.send(self.request(Method::POST, &url).json(body)).await
    }

    async fn put(&self, path: &str, body: &Value) -> Result<Value, ScmError> {
        let url = self.build_url(path, &[]);
        debug!("PUT {}", url);
        self.send(self.request(Method::PUT, &url).json(body)).await
    }

    async fn delete(&self, path: &str) -> Result<(), ScmError> {
        let url = self.build_url(path, &[]);
        debug!("DELETE {}", url);
        self.send(self.request(Method::DELETE, &url)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client =
            ScmClient::new("https://scm.example.com/".to_string(), "t".to_string()).unwrap();
        assert_eq!(client.base_url(), "https://scm.example.com");
        assert_eq!(
            client.build_url("/config/objects/v1/tags", &[]),
            "https://scm.example.com/config/objects/v1/tags"
        );
    }

    #[test]
    fn test_query_values_are_encoded() {
        let query = ScmClient::build_query_string(&[
            ("folder", "Shared Folder".to_string()),
            ("name", "a&b".to_string()),
        ]);
        assert_eq!(query, "folder=Shared%20Folder&name=a%26b");
    }
}
