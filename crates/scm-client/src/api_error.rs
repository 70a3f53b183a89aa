//! API error mapping
//!
//! Translates the structured error body SCM returns on HTTP failure into a
//! typed [`ApiError`]. Bodies look like:
//!
//! ```json
//! {
//!   "_errors": [{
//!     "code": "E006",
//!     "message": "Your configuration is not valid.",
//!     "details": { "errorType": "Object Already Exists" }
//!   }],
//!   "_request_id": "123e4567-e89b-12d3-a456-426655440000"
//! }
//! ```

use std::fmt;

use serde_json::Value;

/// Classified API failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    MalformedCommand,
    InvalidObject,
    InvalidQueryParameter,
    MissingQueryParameter,
    MissingBody,
    NotAuthenticated,
    Unauthorized,
    ObjectNotPresent,
    FolderNotFound,
    MethodNotAllowed,
    ObjectAlreadyExists,
    NameNotUnique,
    ReferenceNotZero,
    Server,
    Unknown,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::MalformedCommand => "malformed command",
            Self::InvalidObject => "invalid object",
            Self::InvalidQueryParameter => "invalid query parameter",
            Self::MissingQueryParameter => "missing query parameter",
            Self::MissingBody => "missing body",
            Self::NotAuthenticated => "not authenticated",
            Self::Unauthorized => "unauthorized",
            Self::ObjectNotPresent => "object not present",
            Self::FolderNotFound => "folder not found",
            Self::MethodNotAllowed => "method not allowed",
            Self::ObjectAlreadyExists => "object already exists",
            Self::NameNotUnique => "name not unique",
            Self::ReferenceNotZero => "reference not zero",
            Self::Server => "server error",
            Self::Unknown => "unknown error",
        };
        f.write_str(text)
    }
}

/// Error reported by the SCM API
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub status: u16,
    pub code: Option<String>,
    pub message: String,
    pub error_type: Option<String>,
    pub details: Option<Value>,
    pub request_id: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(
                f,
                "{} (HTTP {}, {}): {}",
                self.kind, self.status, code, self.message
            ),
            None => write!(f, "{} (HTTP {}): {}", self.kind, self.status, self.message),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Build an error directly (used by transports that know the failure up front)
    pub fn new(kind: ApiErrorKind, status: u16, message: impl Into<String>) -> Self {
        Self {
            kind,
            status,
            code: None,
            message: message.into(),
            error_type: None,
            details: None,
            request_id: None,
        }
    }

    /// Map an HTTP error response body
    ///
    /// Returns `None` when the body does not carry an `_errors` array, so the
    /// caller can surface the original transport error instead.
    pub fn from_response(status: u16, body: &Value) -> Option<Self> {
        let first = body.get("_errors")?.as_array()?.first()?;

        let code = first
            .get("code")
            .and_then(Value::as_str)
            .map(str::to_string);
        let message = first
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("An error occurred")
            .to_string();
        let details = first.get("details").cloned();
        let error_type = details
            .as_ref()
            .and_then(|d| d.get("errorType"))
            .and_then(Value::as_str)
            .map(str::to_string);
        let request_id = body
            .get("_request_id")
            .and_then(Value::as_str)
            .map(str::to_string);

        let kind = classify(
            status,
            code.as_deref(),
            error_type.as_deref(),
            &message,
            details.as_ref(),
        );

        Some(Self {
            kind,
            status,
            code,
            message,
            error_type,
            details,
            request_id,
        })
    }
}

fn classify(
    status: u16,
    code: Option<&str>,
    error_type: Option<&str>,
    message: &str,
    details: Option<&Value>,
) -> ApiErrorKind {
    match status {
        400 => match (error_type, code) {
            (Some("Invalid Object"), _) => ApiErrorKind::InvalidObject,
            (Some("Invalid Query Parameter"), _) => ApiErrorKind::InvalidQueryParameter,
            (Some("Missing Query Parameter"), _) => ApiErrorKind::MissingQueryParameter,
            (Some("Missing Body"), _) => ApiErrorKind::MissingBody,
            (Some("Malformed Command"), _) | (_, Some("E003")) => ApiErrorKind::MalformedCommand,
            _ => ApiErrorKind::Unknown,
        },
        401 => ApiErrorKind::NotAuthenticated,
        403 => ApiErrorKind::Unauthorized,
        404 => {
            if mentions_folder_not_found(message, details) {
                ApiErrorKind::FolderNotFound
            } else {
                ApiErrorKind::ObjectNotPresent
            }
        }
        405 => ApiErrorKind::MethodNotAllowed,
        409 => match (error_type, code) {
            (Some("Name Not Unique"), _) => ApiErrorKind::NameNotUnique,
            (Some("Reference Not Zero"), _) | (_, Some("E009")) => ApiErrorKind::ReferenceNotZero,
            (Some("Object Already Exists"), _) | (_, Some("E006")) => {
                ApiErrorKind::ObjectAlreadyExists
            }
            _ => ApiErrorKind::Unknown,
        },
        500..=599 => ApiErrorKind::Server,
        _ => ApiErrorKind::Unknown,
    }
}

fn mentions_folder_not_found(message: &str, details: Option<&Value>) -> bool {
    let needle = "folder not found";
    if message.to_lowercase().contains(needle) {
        return true;
    }
    details
        .and_then(|d| d.get("message"))
        .and_then(Value::as_str)
        .is_some_and(|m| m.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(code: &str, message: &str, error_type: &str) -> Value {
        json!({
            "_errors": [{
                "code": code,
                "message": message,
                "details": { "errorType": error_type }
            }],
            "_request_id": "req-1"
        })
    }

    fn error(status: u16, code: &str, message: &str, error_type: &str) -> ApiError {
        ApiError::from_response(status, &body(code, message, error_type)).unwrap()
    }

    #[test]
    fn test_object_already_exists() {
        let err = error(409, "E006", "Invalid config", "Object Already Exists");
        assert_eq!(err.kind, ApiErrorKind::ObjectAlreadyExists);
        assert_eq!(err.code.as_deref(), Some("E006"));
        assert_eq!(err.request_id.as_deref(), Some("req-1"));
        assert_eq!(err.error_type.as_deref(), Some("Object Already Exists"));
    }

    #[test]
    fn test_reference_not_zero() {
        let err = error(409, "E009", "Reference not zero", "Reference Not Zero");
        assert_eq!(err.kind, ApiErrorKind::ReferenceNotZero);
    }

    #[test]
    fn test_name_not_unique() {
        let err = error(409, "E006", "Name Not Unique", "Name Not Unique");
        assert_eq!(err.kind, ApiErrorKind::NameNotUnique);
    }

    #[test]
    fn test_malformed_command_by_code() {
        let err = error(400, "E003", "Bad request", "Something Else");
        assert_eq!(err.kind, ApiErrorKind::MalformedCommand);
    }

    #[test]
    fn test_missing_query_parameter() {
        let err = error(400, "E016", "Missing folder", "Missing Query Parameter");
        assert_eq!(err.kind, ApiErrorKind::MissingQueryParameter);
    }

    #[test]
    fn test_object_not_present_and_folder_not_found() {
        let err = error(404, "E005", "Object Not Present", "Object Not Present");
        assert_eq!(err.kind, ApiErrorKind::ObjectNotPresent);

        let err = error(404, "E005", "Folder not found", "Operation Impossible");
        assert_eq!(err.kind, ApiErrorKind::FolderNotFound);
    }

    #[test]
    fn test_auth_and_server_statuses() {
        let unauthenticated = error(401, "E016", "Token expired", "");
        assert_eq!(unauthenticated.kind, ApiErrorKind::NotAuthenticated);

        let forbidden = error(403, "E007", "Forbidden", "");
        assert_eq!(forbidden.kind, ApiErrorKind::Unauthorized);

        let server = error(503, "E999", "Unavailable", "");
        assert_eq!(server.kind, ApiErrorKind::Server);
    }

    #[test]
    fn test_body_without_errors_is_not_mapped() {
        assert!(ApiError::from_response(500, &json!({"detail": "boom"})).is_none());
        assert!(ApiError::from_response(500, &json!({"_errors": []})).is_none());
        assert!(ApiError::from_response(500, &json!("plain text")).is_none());
    }

    #[test]
    fn test_display_includes_status_and_code() {
        let err = error(409, "E006", "Duplicate", "Object Already Exists");
        assert_eq!(err.to_string(), "object already exists (HTTP 409, E006): Duplicate");
    }
}
