//! Application group objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::address_group::DynamicFilter;
use super::{impl_has_id, impl_scoped};
use crate::validation::{Validate, ValidationErrors, Validator};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationGroupCreate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<String>>,
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
pub struct ApplicationGroupUpdate {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<String>>,
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
pub struct ApplicationGroupResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub members: Option<Vec<String>>,
    #[serde(default)]
    pub dynamic: Option<DynamicFilter>,
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub device: Option<String>,
}

impl_scoped!(
    ApplicationGroupCreate,
    ApplicationGroupUpdate,
    ApplicationGroupResponse
);
impl_has_id!(ApplicationGroupUpdate);

fn check_members(
    v: &mut Validator,
    name: &str,
    members: Option<&[String]>,
    dynamic: Option<&DynamicFilter>,
) {
    v.name("name", name, 63)
        .min_items("members", members, 1)
        .unique_items("members", members)
        .max_len("dynamic.filter", dynamic.map(|d| d.filter.as_str()), 2047)
        .exactly_one_of(&[
            ("members", members.is_some()),
            ("dynamic", dynamic.is_some()),
        ]);
}

impl Validate for ApplicationGroupCreate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        check_members(
            &mut v,
            &self.name,
            self.members.as_deref(),
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

impl Validate for ApplicationGroupUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        check_members(
            &mut v,
            &self.name,
            self.members.as_deref(),
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
