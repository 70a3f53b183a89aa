//! HTTP transport trait
//!
//! This trait abstracts the HTTP layer so the config services can be driven by
//! the real [`ScmClient`](crate::client::ScmClient) or by an in-memory mock in
//! unit tests. Implementations own authentication, timeouts and error-body
//! mapping; callers only see decoded JSON or an [`ScmError`].

use serde_json::Value;

use crate::error::ScmError;

/// Verb-level access to the SCM REST API
///
/// Paths are relative to the API base URL, e.g. `/config/objects/v1/addresses`.
#[async_trait::async_trait]
pub trait HttpTransport: Send + Sync {
    /// GET `path` with query parameters
    async fn get(&self, path: &str, params: &[(&str, String)]) -> Result<Value, ScmError>;

    /// POST a JSON body
    async fn post(&self, path: &str, body: &Value) -> Result<Value, ScmError>;

    /// PUT a JSON body
    async fn put(&self, path: &str, body: &Value) -> Result<Value, ScmError>;

    /// DELETE; no response body is expected
    async fn delete(&self, path: &str) -> Result<(), ScmError>;
}
