//! Address group objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{impl_has_id, impl_scoped};
use crate::validation::{Validate, ValidationErrors, Validator};

/// Tag-expression membership for dynamic groups
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicFilter {
    pub filter: String,
}

impl DynamicFilter {
    pub fn new(filter: impl Into<String>) -> Self {
        Self {
            filter: filter.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressGroupCreate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<Vec<String>>,
    #[serde(default, rename = "static", skip_serializing_if = "Option::is_none")]
    pub static_members: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic: Option<DynamicFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressGroupUpdate {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<Vec<String>>,
    #[serde(default, rename = "static", skip_serializing_if = "Option::is_none")]
    pub static_members: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic: Option<DynamicFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressGroupResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tag: Option<Vec<String>>,
    #[serde(default, rename = "static")]
    pub static_members: Option<Vec<String>>,
    #[serde(default)]
    pub dynamic: Option<DynamicFilter>,
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub device: Option<String>,
}

impl_scoped!(AddressGroupCreate, AddressGroupUpdate, AddressGroupResponse);
impl_has_id!(AddressGroupUpdate);

fn check_group(
    v: &mut Validator,
    name: &str,
    description: Option<&str>,
    tag: Option<&[String]>,
    static_members: Option<&[String]>,
    dynamic: Option<&DynamicFilter>,
) {
    v.name("name", name, 63)
        .max_len("description", description, 1023)
        .tags("tag", tag)
        .min_items("static", static_members, 1)
        .unique_items("static", static_members)
        .max_len("dynamic.filter", dynamic.map(|d| d.filter.as_str()), 1024)
        .exactly_one_of(&[
            ("static", static_members.is_some()),
            ("dynamic", dynamic.is_some()),
        ]);
}

impl Validate for AddressGroupCreate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        check_group(
            &mut v,
            &self.name,
            self.description.as_deref(),
            self.tag.as_deref(),
            self.static_members.as_deref(),
            self.dynamic.as_ref(),
        );
        v.container(
            self.folder.as_deref(),
            self.snippet.as_deref(),
            self.device.as_deref(),
        )
        .finish()
    }
}

impl Validate for AddressGroupUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        check_group(
            &mut v,
            &self.name,
            self.description.as_deref(),
            self.tag.as_deref(),
            self.static_members.as_deref(),
            self.dynamic.as_ref(),
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
    use serde_json::json;

    fn static_group() -> AddressGroupCreate {
        AddressGroupCreate {
            name: "web-servers".to_string(),
            static_members: Some(vec!["web-1".to_string(), "web-2".to_string()]),
            folder: Some("Texas".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_static_serializes_under_reserved_name() {
        let body = serde_json::to_value(static_group()).unwrap();
        assert_eq!(body["static"], json!(["web-1", "web-2"]));
        assert!(body.get("dynamic").is_none());
    }

    #[test]
    fn test_static_xor_dynamic() {
        let mut both = static_group();
        both.dynamic = Some(DynamicFilter::new("'prod'"));
        assert!(both.validate().unwrap_err().has_field("static|dynamic"));

        let mut neither = static_group();
        neither.static_members = None;
        assert!(neither.validate().is_err());

        let mut dynamic = static_group();
        dynamic.static_members = None;
        dynamic.dynamic = Some(DynamicFilter::new("'prod' and 'web'"));
        assert!(dynamic.validate().is_ok());
    }

    #[test]
    fn test_static_members_unique_and_non_empty() {
        let mut empty = static_group();
        empty.static_members = Some(vec![]);
        assert!(empty.validate().unwrap_err().has_field("static"));

        let mut duplicated = static_group();
        duplicated.static_members = Some(vec!["a".to_string(), "a".to_string()]);
        assert!(duplicated.validate().unwrap_err().has_field("static"));
    }

    #[test]
    fn test_dynamic_filter_length() {
        let mut long = static_group();
        long.static_members = None;
        long.dynamic = Some(DynamicFilter::new("x".repeat(1025)));
        assert!(long.validate().unwrap_err().has_field("dynamic.filter"));
    }
}
