//! Region objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{impl_has_id, impl_scoped};
use crate::validation::{Validate, ValidationErrors, Validator};

/// Geographic coordinates of a region
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionCreate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_location: Option<GeoLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionUpdate {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_location: Option<GeoLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub geo_location: Option<GeoLocation>,
    #[serde(default)]
    pub address: Option<Vec<String>>,
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub device: Option<String>,
}

impl_scoped!(RegionCreate, RegionUpdate, RegionResponse);
impl_has_id!(RegionUpdate);

fn check_region(
    v: &mut Validator,
    name: &str,
    geo_location: Option<&GeoLocation>,
    address: Option<&[String]>,
) {
    let latitude = geo_location.map(|g| g.latitude);
    let longitude = geo_location.map(|g| g.longitude);
    v.required("name", name)
        .max_len("name", Some(name), 31)
        .range_f64("geo_location.latitude", latitude, -90.0, 90.0)
        .range_f64("geo_location.longitude", longitude, -180.0, 180.0)
        .unique_items("address", address);
}

impl Validate for RegionCreate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        check_region(
            &mut v,
            &self.name,
            self.geo_location.as_ref(),
            self.address.as_deref(),
        );
        v.container(
            self.folder.as_deref(),
            self.snippet.as_deref(),
            self.device.as_deref(),
        )
        .finish()
    }
}

impl Validate for RegionUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        check_region(
            &mut v,
            &self.name,
            self.geo_location.as_ref(),
            self.address.as_deref(),
        );
        v.optional_container(
            self.folder.as_deref(),
            self.snippet.as_deref(),
            self.device.as_deref(),
        )
        .finish()
    }
}
