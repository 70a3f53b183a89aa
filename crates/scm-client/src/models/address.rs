//! Address objects

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{impl_has_id, impl_scoped};
use crate::validation::{Validate, ValidationErrors, Validator};

const FQDN_PATTERN: &str = r"^[a-zA-Z0-9_]([a-zA-Z0-9._-])*[a-zA-Z0-9]$";

static FQDN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(FQDN_PATTERN).expect("fqdn pattern is a valid regex"));

/// Create payload for an address object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressCreate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_netmask: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_wildcard: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fqdn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

/// Update payload for an address object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressUpdate {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_netmask: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_wildcard: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fqdn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

/// Address object as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tag: Option<Vec<String>>,
    #[serde(default)]
    pub ip_netmask: Option<String>,
    #[serde(default)]
    pub ip_range: Option<String>,
    #[serde(default)]
    pub ip_wildcard: Option<String>,
    #[serde(default)]
    pub fqdn: Option<String>,
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub device: Option<String>,
}

impl AddressResponse {
    /// The populated address value, whichever type it is
    pub fn value(&self) -> Option<&str> {
        self.ip_netmask
            .as_deref()
            .or(self.ip_range.as_deref())
            .or(self.ip_wildcard.as_deref())
            .or(self.fqdn.as_deref())
    }
}

impl_scoped!(AddressCreate, AddressUpdate, AddressResponse);
impl_has_id!(AddressUpdate);

#[allow(clippy::too_many_arguments)]
fn check_address(
    v: &mut Validator,
    name: &str,
    description: Option<&str>,
    tag: Option<&[String]>,
    ip_netmask: Option<&str>,
    ip_range: Option<&str>,
    ip_wildcard: Option<&str>,
    fqdn: Option<&str>,
) {
    v.name("name", name, 63)
        .max_len("description", description, 1023)
        .tags("tag", tag)
        .max_len("fqdn", fqdn, 255)
        .pattern("fqdn", fqdn, &FQDN_RE, FQDN_PATTERN)
        .exactly_one_of(&[
            ("ip_netmask", ip_netmask.is_some()),
            ("ip_range", ip_range.is_some()),
            ("ip_wildcard", ip_wildcard.is_some()),
            ("fqdn", fqdn.is_some()),
        ]);
}

impl Validate for AddressCreate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        check_address(
            &mut v,
            &self.name,
            self.description.as_deref(),
            self.tag.as_deref(),
            self.ip_netmask.as_deref(),
            self.ip_range.as_deref(),
            self.ip_wildcard.as_deref(),
            self.fqdn.as_deref(),
        );
        v.container(
            self.folder.as_deref(),
            self.snippet.as_deref(),
            self.device.as_deref(),
        )
        .finish()
    }
}

impl Validate for AddressUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        check_address(
            &mut v,
            &self.name,
            self.description.as_deref(),
            self.tag.as_deref(),
            self.ip_netmask.as_deref(),
            self.ip_range.as_deref(),
            self.ip_wildcard.as_deref(),
            self.fqdn.as_deref(),
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

    fn valid() -> AddressCreate {
        AddressCreate {
            name: "web".to_string(),
            ip_netmask: Some("10.0.0.1/32".to_string()),
            folder: Some("Texas".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_address() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_address_type_is_exactly_one() {
        let mut none = valid();
        none.ip_netmask = None;
        let err = none.validate().unwrap_err();
        assert!(err.has_field("ip_netmask|ip_range|ip_wildcard|fqdn"));

        let mut two = valid();
        two.fqdn = Some("example.com".to_string());
        assert!(two.validate().is_err());
    }

    #[test]
    fn test_container_is_exactly_one() {
        let mut two = valid();
        two.snippet = Some("shared".to_string());
        let err = two.validate().unwrap_err();
        assert!(err.has_field("folder|snippet|device"));

        let mut none = valid();
        none.folder = None;
        assert!(none.validate().is_err());
    }

    #[test]
    fn test_fqdn_pattern_and_duplicate_tags() {
        let mut bad = valid();
        bad.ip_netmask = None;
        bad.fqdn = Some("-bad-".to_string());
        bad.tag = Some(vec!["a".to_string(), "a".to_string()]);
        let err = bad.validate().unwrap_err();
        assert!(err.has_field("fqdn"));
        assert!(err.has_field("tag"));
    }

    #[test]
    fn test_update_allows_missing_container() {
        let update = AddressUpdate {
            id: Uuid::new_v4(),
            name: "web".to_string(),
            fqdn: Some("web.example.com".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_create_omits_unset_fields() {
        let body = serde_json::to_value(valid()).unwrap();
        assert_eq!(
            body,
            json!({"name": "web", "ip_netmask": "10.0.0.1/32", "folder": "Texas"})
        );
    }

    #[test]
    fn test_response_value() {
        let response: AddressResponse = serde_json::from_value(json!({
            "id": "123e4567-e89b-12d3-a456-426655440000",
            "name": "r",
            "ip_range": "10.0.0.1-10.0.0.9",
            "folder": "Texas"
        }))
        .unwrap();
        assert_eq!(response.value(), Some("10.0.0.1-10.0.0.9"));
    }
}
