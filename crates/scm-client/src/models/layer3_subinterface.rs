//! Layer 3 subinterfaces (VLAN-tagged logical interfaces)

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{impl_has_id, impl_scoped};
use crate::validation::{Validate, ValidationErrors, Validator};

/// A static address assigned to the subinterface
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpEntry {
    pub name: String,
}

impl IpEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DhcpClient {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_default_route: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_route_metric: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer3SubinterfaceCreate {
    pub name: String,
    pub tag: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_interface: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtu: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface_management_profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<Vec<IpEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dhcp_client: Option<DhcpClient>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer3SubinterfaceUpdate {
    pub id: Uuid,
    pub name: String,
    pub tag: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_interface: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtu: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface_management_profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<Vec<IpEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dhcp_client: Option<DhcpClient>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer3SubinterfaceResponse {
    pub id: Uuid,
    pub name: String,
    pub tag: i64,
    #[serde(default)]
    pub parent_interface: Option<String>,
    #[serde(default)]
    pub mtu: Option<i64>,
    #[serde(default)]
    pub interface_management_profile: Option<String>,
    #[serde(default)]
    pub ip: Option<Vec<IpEntry>>,
    #[serde(default)]
    pub dhcp_client: Option<DhcpClient>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub device: Option<String>,
}

impl_scoped!(
    Layer3SubinterfaceCreate,
    Layer3SubinterfaceUpdate,
    Layer3SubinterfaceResponse,
);
impl_has_id!(Layer3SubinterfaceUpdate);

struct SubinterfaceFields<'a> {
    name: &'a str,
    tag: i64,
    mtu: Option<i64>,
    ip: Option<&'a [IpEntry]>,
    dhcp_client: Option<&'a DhcpClient>,
    comment: Option<&'a str>,
}

fn check_subinterface(v: &mut Validator, fields: &SubinterfaceFields<'_>) {
    v.required("name", fields.name)
        .range_i64("tag", Some(fields.tag), 1, 4096)
        .range_i64("mtu", fields.mtu, 576, 9216)
        .range_i64(
            "dhcp_client.default_route_metric",
            fields.dhcp_client.and_then(|d| d.default_route_metric),
            1,
            65535,
        )
        .max_len("comment", fields.comment, 1023)
        .at_most_one_of(&[
            ("ip", fields.ip.is_some()),
            ("dhcp_client", fields.dhcp_client.is_some()),
        ]);
}

impl Validate for Layer3SubinterfaceCreate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        check_subinterface(
            &mut v,
            &SubinterfaceFields {
                name: &self.name,
                tag: self.tag,
                mtu: self.mtu,
                ip: self.ip.as_deref(),
                dhcp_client: self.dhcp_client.as_ref(),
                comment: self.comment.as_deref(),
            },
        );
        v.container(
            self.folder.as_deref(),
            self.snippet.as_deref(),
            self.device.as_deref(),
        )
        .finish()
    }
}

impl Validate for Layer3SubinterfaceUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        check_subinterface(
            &mut v,
            &SubinterfaceFields {
                name: &self.name,
                tag: self.tag,
                mtu: self.mtu,
                ip: self.ip.as_deref(),
                dhcp_client: self.dhcp_client.as_ref(),
                comment: self.comment.as_deref(),
            },
        );
        v.optional_container(
            self.folder.as_deref(),
            self.snippet.as_deref(),
            self.device.as_deref(),
        )
        .finish()
    }
}
