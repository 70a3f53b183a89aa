//! Tag objects

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{impl_has_id, impl_scoped};
use crate::validation::{Validate, ValidationErrors, Validator};

const TAG_NAME_PATTERN: &str = r"^[a-zA-Z0-9_ \.\-\[\]&()]+$";

static TAG_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TAG_NAME_PATTERN).expect("tag name pattern is a valid regex"));

/// Colour names accepted by the API
pub const TAG_COLORS: &[&str] = &[
    "Azure Blue",
    "Black",
    "Blue",
    "Blue Gray",
    "Blue Violet",
    "Brown",
    "Burnt Sienna",
    "Cerulean Blue",
    "Chestnut",
    "Cobalt Blue",
    "Copper",
    "Cyan",
    "Forest Green",
    "Gold",
    "Gray",
    "Green",
    "Lavender",
    "Light Gray",
    "Light Green",
    "Lime",
    "Magenta",
    "Mahogany",
    "Maroon",
    "Medium Blue",
    "Medium Rose",
    "Medium Violet",
    "Midnight Blue",
    "Olive",
    "Orange",
    "Orchid",
    "Peach",
    "Purple",
    "Red",
    "Red Violet",
    "Red-Orange",
    "Salmon",
    "Thistle",
    "Turquoise Blue",
    "Violet Blue",
    "Yellow",
    "Yellow-Orange",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCreate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagUpdate {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

/// Tag as returned by the API; predefined tags carry no `id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagResponse {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub device: Option<String>,
}

impl_scoped!(TagCreate, TagUpdate, TagResponse);
impl_has_id!(TagUpdate);

fn check_tag(v: &mut Validator, name: &str, color: Option<&str>, comments: Option<&str>) {
    let non_empty = Some(name).filter(|n| !n.is_empty());
    v.required("name", name)
        .max_len("name", Some(name), 127)
        .pattern("name", non_empty, &TAG_NAME_RE, TAG_NAME_PATTERN)
        .one_of("color", color, TAG_COLORS)
        .max_len("comments", comments, 1023);
}

impl Validate for TagCreate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        check_tag(
            &mut v,
            &self.name,
            self.color.as_deref(),
            self.comments.as_deref(),
        );
        v.container(
            self.folder.as_deref(),
            self.snippet.as_deref(),
            self.device.as_deref(),
        )
        .finish()
    }
}

impl Validate for TagUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        check_tag(
            &mut v,
            &self.name,
            self.color.as_deref(),
            self.comments.as_deref(),
        );
        v.optional_container(
            self.folder.as_deref(),
            self.snippet.as_deref(),
            self.device.as_deref(),
        )
        .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(name: &str, color: Option<&str>) -> TagCreate {
        TagCreate {
            name: name.to_string(),
            color: color.map(str::to_string),
            folder: Some("Texas".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_palette_colors() {
        assert!(tag("prod", Some("Red")).validate().is_ok());
        assert!(tag("prod", Some("Red-Orange")).validate().is_ok());
        assert!(tag("prod", None).validate().is_ok());
        let err = tag("prod", Some("Plaid")).validate().unwrap_err();
        assert!(err.has_field("color"));
    }

    #[test]
    fn test_tag_names_allow_brackets() {
        assert!(tag("env [prod] & (dr)", None).validate().is_ok());
        assert!(tag("a/b", None).validate().unwrap_err().has_field("name"));
        assert!(tag(&"t".repeat(128), None).validate().is_err());
    }
}
