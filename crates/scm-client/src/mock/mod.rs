//! Mock transport for unit testing
//!
//! [`MockTransport`] implements [`HttpTransport`] without a network. It serves
//! requests from two places:
//!
//! - a queue of scripted responses, consumed first, for exercising paging and
//!   malformed payloads
//! - an in-memory object store (see `store.rs`) that behaves like a small SCM
//!   tenant: POST assigns an id, GET/PUT/DELETE by id, and scoped listing
//!
//! Every request is recorded so tests can assert on paths, query parameters
//! and bodies.

mod store;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::{Value, json};

use crate::error::ScmError;
use crate::transport::HttpTransport;

use store::Store;

/// HTTP verb of a recorded request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// A request seen by the mock
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: RequestMethod,
    pub path: String,
    pub params: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RecordedRequest {
    /// Value of the query parameter `key`, if sent
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// In-memory [`HttpTransport`]
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    scripted: Arc<Mutex<VecDeque<Result<Value, ScmError>>>>,
    store: Arc<Mutex<Store>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockTransport {
    /// Create an empty mock
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw response for the next request
    pub fn push_response(&self, response: Value) {
        lock(&self.scripted).push_back(Ok(response));
    }

    /// Queue a list page (`{"data": items, ...}`) for the next request
    pub fn push_page(&self, items: Vec<Value>) {
        let total = items.len();
        self.push_response(json!({
            "data": items,
            "limit": total,
            "offset": 0,
            "total": total,
        }));
    }

    /// Queue an error for the next request
    pub fn push_error(&self, error: ScmError) {
        lock(&self.scripted).push_back(Err(error));
    }

    /// Put an object straight into the store (for test setup)
    ///
    /// The object is stored as given; objects without an `id` behave like
    /// predefined entries.
    pub fn seed(&self, endpoint: &str, object: Value) {
        lock(&self.store).insert(endpoint, object);
    }

    /// Objects currently stored under `endpoint`
    pub fn stored(&self, endpoint: &str) -> Vec<Value> {
        lock(&self.store).objects(endpoint)
    }

    /// Every request received so far, oldest first
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    fn record(
        &self,
        method: RequestMethod,
        path: &str,
        params: &[(&str, String)],
        body: Option<&Value>,
    ) -> Option<Result<Value, ScmError>> {
        lock(&self.requests).push(RecordedRequest {
            method,
            path: path.to_string(),
            params: params
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.clone()))
                .collect(),
            body: body.cloned(),
        });
        lock(&self.scripted).pop_front()
    }
}

#[async_trait::async_trait]
impl HttpTransport for MockTransport {
    async fn get(&self, path: &str, params: &[(&str, String)]) -> Result<Value, ScmError> {
        if let Some(scripted) = self.record(RequestMethod::Get, path, params, None) {
            return scripted;
        }
        lock(&self.store).get(path, params)
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, ScmError> {
        if let Some(scripted) = self.record(RequestMethod::Post, path, &[], Some(body)) {
            return scripted;
        }
        lock(&self.store).create(path, body)
    }

    async fn put(&self, path: &str, body: &Value) -> Result<Value, ScmError> {
        if let Some(scripted) = self.record(RequestMethod::Put, path, &[], Some(body)) {
            return scripted;
        }
        lock(&self.store).update(path, body)
    }

    async fn delete(&self, path: &str) -> Result<(), ScmError> {
        if let Some(scripted) = self.record(RequestMethod::Delete, path, &[], None) {
            return scripted.map(|_| ());
        }
        lock(&self.store).delete(path)
    }
}
