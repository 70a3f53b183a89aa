//! Custom application objects
//!
//! Applications live in a folder or a snippet, never on a device. Listing a
//! container also returns predefined applications, which have no `id`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::impl_has_id;
use crate::common::scope::Scoped;
use crate::validation::{Validate, ValidationErrors, Validator};

/// Behavioural characteristics shared by all application shapes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationFlags {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evasive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pervasive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excessive_bandwidth_use: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_by_malware: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfers_files: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_known_vulnerabilities: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tunnels_other_apps: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prone_to_misuse: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_certifications: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationCreate {
    pub name: String,
    pub category: String,
    pub subcategory: String,
    pub technology: String,
    pub risk: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ports: Option<Vec<String>>,
    #[serde(flatten)]
    pub flags: ApplicationFlags,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationUpdate {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub subcategory: String,
    pub technology: String,
    pub risk: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ports: Option<Vec<String>>,
    #[serde(flatten)]
    pub flags: ApplicationFlags,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

/// Application as returned by the API; predefined entries carry no `id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationResponse {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    #[serde(default)]
    pub technology: String,
    #[serde(default)]
    pub risk: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ports: Option<Vec<String>>,
    #[serde(flatten)]
    pub flags: ApplicationFlags,
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
}

impl ApplicationResponse {
    pub fn is_predefined(&self) -> bool {
        self.id.is_none()
    }
}

macro_rules! impl_scoped_without_device {
    ($($ty:ty),+) => {
        $(
            impl Scoped for $ty {
                fn folder(&self) -> Option<&str> {
                    self.folder.as_deref()
                }
                fn snippet(&self) -> Option<&str> {
                    self.snippet.as_deref()
                }
                fn device(&self) -> Option<&str> {
                    None
                }
            }
        )+
    };
}

impl_scoped_without_device!(ApplicationCreate, ApplicationUpdate, ApplicationResponse);
impl_has_id!(ApplicationUpdate);

fn check_application(
    v: &mut Validator,
    name: &str,
    classification: [(&str, &str); 3],
    risk: i64,
    description: Option<&str>,
) {
    v.name("name", name, 63);
    for (field, value) in classification {
        v.required(field, value).max_len(field, Some(value), 63);
    }
    v.range_i64("risk", Some(risk), 1, 5)
        .max_len("description", description, 1023);
}

impl Validate for ApplicationCreate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        check_application(
            &mut v,
            &self.name,
            [
                ("category", self.category.as_str()),
                ("subcategory", self.subcategory.as_str()),
                ("technology", self.technology.as_str()),
            ],
            self.risk,
            self.description.as_deref(),
        );
        v.max_len("folder", self.folder.as_deref(), 64)
            .max_len("snippet", self.snippet.as_deref(), 64)
            .exactly_one_of(&[
                ("folder", self.folder.as_deref().is_some_and(|f| !f.is_empty())),
                ("snippet", self.snippet.as_deref().is_some_and(|s| !s.is_empty())),
            ])
            .finish()
    }
}

impl Validate for ApplicationUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        check_application(
            &mut v,
            &self.name,
            [
                ("category", self.category.as_str()),
                ("subcategory", self.subcategory.as_str()),
                ("technology", self.technology.as_str()),
            ],
            self.risk,
            self.description.as_deref(),
        );
        v.optional_container(self.folder.as_deref(), self.snippet.as_deref(), None)
            .finish()
    }
}
