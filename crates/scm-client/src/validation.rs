//! Payload validation
//!
//! Create and update models implement [`Validate`]. Each implementation feeds
//! its fields through a [`Validator`], which accumulates every violation
//! instead of stopping at the first one, so callers see the complete list of
//! offending fields.

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Pattern shared by most object names
pub const NAME_PATTERN: &str = r"^[a-zA-Z\d\-_. ]+$";

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(NAME_PATTERN).expect("name pattern is a valid regex"));

/// The constraint a field failed
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    Required,
    Pattern { pattern: &'static str },
    MaxLength { max: usize },
    MinItems { min: usize },
    UniqueItems,
    ExactlyOneOf { fields: Vec<&'static str> },
    AtMostOneOf { fields: Vec<&'static str> },
    Range { min: f64, max: f64 },
    OneOf { allowed: &'static [&'static str] },
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => f.write_str("field is required"),
            Self::Pattern { pattern } => write!(f, "must match pattern {pattern}"),
            Self::MaxLength { max } => write!(f, "must be at most {max} characters"),
            Self::MinItems { min } => write!(f, "must contain at least {min} item(s)"),
            Self::UniqueItems => f.write_str("list items must be unique"),
            Self::ExactlyOneOf { fields } => {
                write!(f, "exactly one of {} must be provided", fields.join(", "))
            }
            Self::AtMostOneOf { fields } => {
                write!(f, "only one of {} can be provided", fields.join(", "))
            }
            Self::Range { min, max } => write!(f, "must be between {min} and {max}"),
            Self::OneOf { allowed } => write!(f, "must be one of: {}", allowed.join(", ")),
        }
    }
}

/// A single field-level violation
#[derive(Debug, Clone, PartialEq)]
pub struct FieldViolation {
    pub field: String,
    pub constraint: Constraint,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.constraint)
    }
}

/// All violations found in one payload
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(pub Vec<FieldViolation>);

impl ValidationErrors {
    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }

    /// True if some violation names `field`
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|v| v.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Schema check implemented by every outbound model
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Accumulates violations for one payload
#[derive(Debug, Default)]
pub struct Validator {
    violations: Vec<FieldViolation>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, field: impl Into<String>, constraint: Constraint) {
        self.violations.push(FieldViolation {
            field: field.into(),
            constraint,
        });
    }

    /// Non-empty string
    pub fn required(&mut self, field: &str, value: &str) -> &mut Self {
        if value.is_empty() {
            self.push(field, Constraint::Required);
        }
        self
    }

    /// Standard object name: required, bounded, and matching [`NAME_PATTERN`]
    pub fn name(&mut self, field: &str, value: &str, max: usize) -> &mut Self {
        if value.is_empty() {
            self.push(field, Constraint::Required);
            return self;
        }
        self.max_len(field, Some(value), max);
        if !NAME_RE.is_match(value) {
            self.push(
                field,
                Constraint::Pattern {
                    pattern: NAME_PATTERN,
                },
            );
        }
        self
    }

    pub fn max_len(&mut self, field: &str, value: Option<&str>, max: usize) -> &mut Self {
        if value.is_some_and(|v| v.chars().count() > max) {
            self.push(field, Constraint::MaxLength { max });
        }
        self
    }

    pub fn pattern(
        &mut self,
        field: &str,
        value: Option<&str>,
        re: &Regex,
        pattern: &'static str,
    ) -> &mut Self {
        if value.is_some_and(|v| !re.is_match(v)) {
            self.push(field, Constraint::Pattern { pattern });
        }
        self
    }

    pub fn min_items<T>(&mut self, field: &str, items: Option<&[T]>, min: usize) -> &mut Self {
        if items.is_some_and(|i| i.len() < min) {
            self.push(field, Constraint::MinItems { min });
        }
        self
    }

    pub fn unique_items(&mut self, field: &str, items: Option<&[String]>) -> &mut Self {
        if let Some(items) = items {
            let mut seen = HashSet::new();
            if !items.iter().all(|item| seen.insert(item.as_str())) {
                self.push(field, Constraint::UniqueItems);
            }
        }
        self
    }

    /// Exactly one of the flagged fields is present
    pub fn exactly_one_of(&mut self, fields: &[(&'static str, bool)]) -> &mut Self {
        let present = fields.iter().filter(|(_, set)| *set).count();
        if present != 1 {
            let names: Vec<&'static str> = fields.iter().map(|(name, _)| *name).collect();
            let field = names.join("|");
            self.push(field, Constraint::ExactlyOneOf { fields: names });
        }
        self
    }

    pub fn at_most_one_of(&mut self, fields: &[(&'static str, bool)]) -> &mut Self {
        let present = fields.iter().filter(|(_, set)| *set).count();
        if present > 1 {
            let names: Vec<&'static str> = fields.iter().map(|(name, _)| *name).collect();
            let field = names.join("|");
            self.push(field, Constraint::AtMostOneOf { fields: names });
        }
        self
    }

    /// Exactly one non-empty container among folder, snippet and device
    pub fn container(
        &mut self,
        folder: Option<&str>,
        snippet: Option<&str>,
        device: Option<&str>,
    ) -> &mut Self {
        self.max_len("folder", folder, 64)
            .max_len("snippet", snippet, 64)
            .max_len("device", device, 64);
        self.exactly_one_of(&[
            ("folder", folder.is_some_and(|v| !v.is_empty())),
            ("snippet", snippet.is_some_and(|v| !v.is_empty())),
            ("device", device.is_some_and(|v| !v.is_empty())),
        ])
    }

    /// At most one container; used by update payloads, which may omit it
    pub fn optional_container(
        &mut self,
        folder: Option<&str>,
        snippet: Option<&str>,
        device: Option<&str>,
    ) -> &mut Self {
        self.max_len("folder", folder, 64)
            .max_len("snippet", snippet, 64)
            .max_len("device", device, 64);
        self.at_most_one_of(&[
            ("folder", folder.is_some()),
            ("snippet", snippet.is_some()),
            ("device", device.is_some()),
        ])
    }

    /// Each tag bounded in length, no duplicates
    pub fn tags(&mut self, field: &str, tags: Option<&[String]>) -> &mut Self {
        for tag in tags.unwrap_or_default() {
            self.max_len(field, Some(tag), 127);
        }
        self.unique_items(field, tags)
    }

    pub fn range_i64(&mut self, field: &str, value: Option<i64>, min: i64, max: i64) -> &mut Self {
        if value.is_some_and(|v| v < min || v > max) {
            self.push(
                field,
                Constraint::Range {
                    min: min as f64,
                    max: max as f64,
                },
            );
        }
        self
    }

    pub fn range_f64(&mut self, field: &str, value: Option<f64>, min: f64, max: f64) -> &mut Self {
        if value.is_some_and(|v| !(min..=max).contains(&v)) {
            self.push(field, Constraint::Range { min, max });
        }
        self
    }

    pub fn one_of(
        &mut self,
        field: &str,
        value: Option<&str>,
        allowed: &'static [&'static str],
    ) -> &mut Self {
        if value.is_some_and(|v| !allowed.contains(&v)) {
            self.push(field, Constraint::OneOf { allowed });
        }
        self
    }

    pub fn finish(&mut self) -> Result<(), ValidationErrors> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(std::mem::take(&mut self.violations)))
        }
    }
}
