//! Name lookup response resolution
//!
//! A `GET {endpoint}?{scope}&name=...` answers in one of two shapes: the
//! object itself (`{"id": ...}`), or a list wrapper (`{"data": [...]}`). The
//! resolver picks the single object out of either shape.

use serde_json::Value;

use crate::error::ScmError;
use crate::warning::WarningSink;

/// What to do when a name lookup returns more than one object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MultipleMatchPolicy {
    /// Return the first object and emit one warning
    #[default]
    FirstWithWarning,
    /// Fail with [`ScmError::MultipleMatches`]
    Reject,
}

/// Context for resolving one lookup
#[derive(Debug, Clone, Copy)]
pub struct FetchContext<'a> {
    pub resource: &'a str,
    pub name: &'a str,
    pub policy: MultipleMatchPolicy,
}

/// Select the raw object from a lookup response
pub fn resolve_fetch_response(
    response: Value,
    context: FetchContext<'_>,
    warnings: &dyn WarningSink,
) -> Result<Value, ScmError> {
    let Value::Object(mut map) = response else {
        return Err(ScmError::MalformedResponse(format!(
            "{} lookup response is not a JSON object",
            context.resource
        )));
    };

    if map.contains_key("id") {
        return Ok(Value::Object(map));
    }

    match map.remove("data") {
        Some(Value::Array(items)) => select_first(items, context, warnings),
        _ => Err(ScmError::MalformedResponse(format!(
            "{} lookup response has neither an 'id' nor a 'data' list field",
            context.resource
        ))),
    }
}

fn select_first(
    items: Vec<Value>,
    context: FetchContext<'_>,
    warnings: &dyn WarningSink,
) -> Result<Value, ScmError> {
    let count = items.len();
    let Some(first) = items.into_iter().next() else {
        return Err(ScmError::NotFound(format!(
            "{} '{}' not found",
            context.resource, context.name
        )));
    };

    if first.get("id").is_none() {
        return Err(ScmError::MalformedResponse(format!(
            "{} lookup result is missing the 'id' field",
            context.resource
        )));
    }

    if count > 1 {
        match context.policy {
            MultipleMatchPolicy::Reject => {
                return Err(ScmError::MultipleMatches {
                    resource: context.resource.to_string(),
                    name: context.name.to_string(),
                    count,
                });
            }
            MultipleMatchPolicy::FirstWithWarning => warnings.warn(&format!(
                "Multiple {} objects named '{}' found ({}); using the first match",
                context.resource, context.name, count
            )),
        }
    }

    Ok(first)
}
