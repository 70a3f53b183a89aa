//! SCM client errors

use std::fmt;

use thiserror::Error;

use crate::api_error::ApiError;
use crate::common::filter::FilterKind;
use crate::validation::ValidationErrors;

/// Which bound a configuration value violated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssue {
    /// A required setting was absent or empty
    Missing,
    /// The value could not be read as the expected type
    InvalidType,
    /// The value is below the allowed minimum
    BelowMinimum,
    /// The value exceeds the allowed maximum
    AboveMaximum,
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Missing => "is missing",
            Self::InvalidType => "has an invalid type",
            Self::BelowMinimum => "is below the minimum",
            Self::AboveMaximum => "exceeds the maximum",
        };
        f.write_str(text)
    }
}

/// Errors that can occur when interacting with the SCM API
#[derive(Debug, Error)]
pub enum ScmError {
    /// HTTP request/response error without a structured API error body
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// SCM API returned a structured error body
    #[error("SCM API error: {0}")]
    Api(#[from] ApiError),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Payload failed schema validation before anything was sent
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// A required string parameter was empty
    #[error("Missing parameter: '{parameter}' is not allowed to be empty")]
    MissingParameter { parameter: String },

    /// Zero, or more than one, of folder/snippet/device was supplied
    #[error("Invalid scope: {0}")]
    InvalidScope(String),

    /// A filter criterion was supplied with the wrong value shape
    #[error("Invalid filter type: '{criterion}' expects {expected}, got {actual}")]
    InvalidFilterType {
        criterion: String,
        expected: FilterKind,
        actual: &'static str,
    },

    /// A client setting is out of bounds or of the wrong type
    #[error("Invalid configuration: {setting} {issue} ({detail})")]
    InvalidConfiguration {
        setting: String,
        issue: ConfigIssue,
        detail: String,
    },

    /// The API returned a structurally unexpected payload
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A name lookup matched nothing
    #[error("Not found: {0}")]
    NotFound(String),

    /// A name lookup matched several objects and the resource does not allow it
    #[error("Multiple {resource} objects named '{name}' found ({count})")]
    MultipleMatches {
        resource: String,
        name: String,
        count: usize,
    },
}

impl ScmError {
    pub(crate) fn missing_parameter(parameter: impl Into<String>) -> Self {
        Self::MissingParameter {
            parameter: parameter.into(),
        }
    }

    pub(crate) fn invalid_configuration(
        setting: impl Into<String>,
        issue: ConfigIssue,
        detail: impl Into<String>,
    ) -> Self {
        Self::InvalidConfiguration {
            setting: setting.into(),
            issue,
            detail: detail.into(),
        }
    }
}
