//! Service objects (protocol and port definitions)

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{impl_has_id, impl_scoped};
use crate::validation::{Validate, ValidationErrors, Validator};

const PORT_PATTERN: &str = r"^[0-9,\-]+$";

static PORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PORT_PATTERN).expect("port pattern is a valid regex"));

/// Session timeout overrides, in seconds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub halfclose_timeout: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timewait_timeout: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TcpProtocol {
    pub port: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_port: Option<String>,
    #[serde(default, rename = "override", skip_serializing_if = "Option::is_none")]
    pub timeouts: Option<TimeoutOverride>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UdpProtocol {
    pub port: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_port: Option<String>,
    #[serde(default, rename = "override", skip_serializing_if = "Option::is_none")]
    pub timeouts: Option<TimeoutOverride>,
}

/// Exactly one of `tcp` or `udp`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Protocol {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tcp: Option<TcpProtocol>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub udp: Option<UdpProtocol>,
}

impl Protocol {
    pub fn tcp(port: impl Into<String>) -> Self {
        Self {
            tcp: Some(TcpProtocol {
                port: port.into(),
                ..TcpProtocol::default()
            }),
            udp: None,
        }
    }

    pub fn udp(port: impl Into<String>) -> Self {
        Self {
            tcp: None,
            udp: Some(UdpProtocol {
                port: port.into(),
                ..UdpProtocol::default()
            }),
        }
    }

    /// `"tcp"` or `"udp"`, whichever is set first
    pub fn name(&self) -> Option<&'static str> {
        if self.tcp.is_some() {
            Some("tcp")
        } else if self.udp.is_some() {
            Some("udp")
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCreate {
    pub name: String,
    pub protocol: Protocol,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceUpdate {
    pub id: Uuid,
    pub name: String,
    pub protocol: Protocol,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

/// Service as returned by the API; predefined services (`service-http`,
/// `service-https`) carry no `id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceResponse {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub protocol: Protocol,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tag: Option<Vec<String>>,
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub device: Option<String>,
}

impl_scoped!(ServiceCreate, ServiceUpdate, ServiceResponse);
impl_has_id!(ServiceUpdate);

fn check_ports(v: &mut Validator, prefix: &str, port: &str, source_port: Option<&str>) {
    let port_field = format!("{prefix}.port");
    let source_field = format!("{prefix}.source_port");
    v.required(&port_field, port)
        .max_len(&port_field, Some(port), 1023)
        .pattern(&port_field, Some(port), &PORT_RE, PORT_PATTERN)
        .pattern(&source_field, source_port, &PORT_RE, PORT_PATTERN);
}

fn check_protocol(v: &mut Validator, protocol: &Protocol) {
    v.exactly_one_of(&[
        ("protocol.tcp", protocol.tcp.is_some()),
        ("protocol.udp", protocol.udp.is_some()),
    ]);

    if let Some(tcp) = &protocol.tcp {
        check_ports(v, "protocol.tcp", &tcp.port, tcp.source_port.as_deref());
        if let Some(o) = &tcp.timeouts {
            v.range_i64("protocol.tcp.override.timeout", o.timeout, 1, 604_800)
                .range_i64(
                    "protocol.tcp.override.halfclose_timeout",
                    o.halfclose_timeout,
                    1,
                    604_800,
                )
                .range_i64(
                    "protocol.tcp.override.timewait_timeout",
                    o.timewait_timeout,
                    1,
                    600,
                );
        }
    }
    if let Some(udp) = &protocol.udp {
        check_ports(v, "protocol.udp", &udp.port, udp.source_port.as_deref());
        if let Some(o) = &udp.timeouts {
            v.range_i64("protocol.udp.override.timeout", o.timeout, 1, 604_800);
        }
    }
}

fn check_service(
    v: &mut Validator,
    name: &str,
    protocol: &Protocol,
    description: Option<&str>,
    tag: Option<&[String]>,
) {
    v.name("name", name, 63)
        .max_len("description", description, 1023)
        .tags("tag", tag);
    check_protocol(v, protocol);
}

impl Validate for ServiceCreate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        check_service(
            &mut v,
            &self.name,
            &self.protocol,
            self.description.as_deref(),
            self.tag.as_deref(),
        );
        v.container(
            self.folder.as_deref(),
            self.snippet.as_deref(),
            self.device.as_deref(),
        )
        .finish()
    }
}

impl Validate for ServiceUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        check_service(
            &mut v,
            &self.name,
            &self.protocol,
            self.description.as_deref(),
            self.tag.as_deref(),
        );
        v.optional_container(
            self.folder.as_deref(),
            self.snippet.as_deref(),
            self.device.as_deref(),
        )
        .finish()
    }
}
