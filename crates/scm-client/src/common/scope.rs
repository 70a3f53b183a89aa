//! Container scope selection
//!
//! Every list and fetch call is scoped to exactly one container: a folder, a
//! snippet, or a device. The same key/value pair travels as a query parameter
//! and is read back from decoded objects for exact matching and exclusions.

use std::fmt;

use crate::error::ScmError;

/// Which container field a scope refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Folder,
    Snippet,
    Device,
}

impl ScopeKind {
    /// Query parameter / object field name
    pub fn key(self) -> &'static str {
        match self {
            Self::Folder => "folder",
            Self::Snippet => "snippet",
            Self::Device => "device",
        }
    }
}

/// A validated container scope
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    Folder(String),
    Snippet(String),
    Device(String),
}

impl Scope {
    pub fn kind(&self) -> ScopeKind {
        match self {
            Self::Folder(_) => ScopeKind::Folder,
            Self::Snippet(_) => ScopeKind::Snippet,
            Self::Device(_) => ScopeKind::Device,
        }
    }

    pub fn key(&self) -> &'static str {
        self.kind().key()
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Folder(v) | Self::Snippet(v) | Self::Device(v) => v,
        }
    }

    /// The `(key, value)` query parameter for this scope
    pub fn query_param(&self) -> (&'static str, String) {
        (self.key(), self.value().to_string())
    }

    /// True if `object` lives in exactly this container
    pub fn contains<T: Scoped>(&self, object: &T) -> bool {
        object.container(self.kind()) == Some(self.value())
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key(), self.value())
    }
}

/// Objects that carry container fields
pub trait Scoped {
    fn folder(&self) -> Option<&str>;
    fn snippet(&self) -> Option<&str>;
    fn device(&self) -> Option<&str>;

    fn container(&self, kind: ScopeKind) -> Option<&str> {
        match kind {
            ScopeKind::Folder => self.folder(),
            ScopeKind::Snippet => self.snippet(),
            ScopeKind::Device => self.device(),
        }
    }
}

/// Caller-supplied, not yet validated, container parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeParams {
    pub folder: Option<String>,
    pub snippet: Option<String>,
    pub device: Option<String>,
}

impl ScopeParams {
    pub fn folder(name: impl Into<String>) -> Self {
        Self {
            folder: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn snippet(name: impl Into<String>) -> Self {
        Self {
            snippet: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn device(name: impl Into<String>) -> Self {
        Self {
            device: Some(name.into()),
            ..Self::default()
        }
    }

    /// Validate into a single [`Scope`]
    pub fn resolve(&self) -> Result<Scope, ScmError> {
        validate_container(
            self.folder.as_deref(),
            self.snippet.as_deref(),
            self.device.as_deref(),
        )
    }
}

/// Enforce exactly one non-empty container parameter
///
/// An explicitly empty string is reported as a missing parameter, which is
/// distinct from the parameter not being supplied at all.
pub fn validate_container(
    folder: Option<&str>,
    snippet: Option<&str>,
    device: Option<&str>,
) -> Result<Scope, ScmError> {
    for (key, value) in [("folder", folder), ("snippet", snippet), ("device", device)] {
        if value == Some("") {
            return Err(ScmError::missing_parameter(key));
        }
    }

    match (folder, snippet, device) {
        (Some(f), None, None) => Ok(Scope::Folder(f.to_string())),
        (None, Some(s), None) => Ok(Scope::Snippet(s.to_string())),
        (None, None, Some(d)) => Ok(Scope::Device(d.to_string())),
        _ => Err(ScmError::InvalidScope(
            "exactly one of 'folder', 'snippet', or 'device' must be provided".to_string(),
        )),
    }
}
