//! Objects API resources (`/config/objects/v1`)

use crate::common::filter::{FilterKind, FilterSpec, FilterValue, in_list, intersects};
use crate::common::query::MissingIdPolicy;
use crate::models::{
    AddressCreate, AddressGroupCreate, AddressGroupResponse, AddressGroupUpdate, AddressResponse,
    AddressUpdate, ApplicationCreate, ApplicationGroupCreate, ApplicationGroupResponse,
    ApplicationGroupUpdate, ApplicationResponse, ApplicationUpdate, RegionCreate, RegionResponse,
    RegionUpdate, ServiceCreate, ServiceResponse, ServiceUpdate, TagCreate, TagResponse, TagUpdate,
};
use crate::service::Resource;

/// Address objects
#[derive(Debug, Clone, Copy)]
pub struct Address;

fn address_types(address: &AddressResponse, value: &FilterValue) -> bool {
    let kinds = [
        ("netmask", address.ip_netmask.is_some()),
        ("range", address.ip_range.is_some()),
        ("wildcard", address.ip_wildcard.is_some()),
        ("fqdn", address.fqdn.is_some()),
    ];
    let wanted = value.strings();
    kinds
        .iter()
        .any(|(kind, set)| *set && wanted.iter().any(|w| w.as_str() == *kind))
}

fn address_values(address: &AddressResponse, value: &FilterValue) -> bool {
    in_list(address.value(), value.strings())
}

fn address_tags(address: &AddressResponse, value: &FilterValue) -> bool {
    intersects(address.tag.as_deref(), value.strings())
}

impl Resource for Address {
    const ENDPOINT: &'static str = "/config/objects/v1/addresses";
    const NAME: &'static str = "address";

    type Create = AddressCreate;
    type Update = AddressUpdate;
    type Response = AddressResponse;

    fn filters() -> &'static [FilterSpec<AddressResponse>] {
        const FILTERS: &[FilterSpec<AddressResponse>] = &[
            FilterSpec::new("types", FilterKind::StrList, address_types),
            FilterSpec::new("values", FilterKind::StrList, address_values),
            FilterSpec::new("tags", FilterKind::StrList, address_tags),
        ];
        FILTERS
    }
}

/// Address groups, static or dynamic
#[derive(Debug, Clone, Copy)]
pub struct AddressGroup;

fn group_types(group: &AddressGroupResponse, value: &FilterValue) -> bool {
    let kind = if group.static_members.is_some() {
        "static"
    } else if group.dynamic.is_some() {
        "dynamic"
    } else {
        return false;
    };
    value.strings().iter().any(|wanted| wanted == kind)
}

fn group_values(group: &AddressGroupResponse, value: &FilterValue) -> bool {
    let wanted = value.strings();
    match (&group.static_members, &group.dynamic) {
        (Some(members), _) => members.iter().any(|m| wanted.contains(m)),
        (None, Some(dynamic)) => wanted.contains(&dynamic.filter),
        (None, None) => false,
    }
}

fn group_tags(group: &AddressGroupResponse, value: &FilterValue) -> bool {
    intersects(group.tag.as_deref(), value.strings())
}

impl Resource for AddressGroup {
    const ENDPOINT: &'static str = "/config/objects/v1/address-groups";
    const NAME: &'static str = "address group";
    const MISSING_ID: MissingIdPolicy = MissingIdPolicy::Reject;

    type Create = AddressGroupCreate;
    type Update = AddressGroupUpdate;
    type Response = AddressGroupResponse;

    fn filters() -> &'static [FilterSpec<AddressGroupResponse>] {
        const FILTERS: &[FilterSpec<AddressGroupResponse>] = &[
            FilterSpec::new("types", FilterKind::StrList, group_types),
            FilterSpec::new("values", FilterKind::StrList, group_values),
            FilterSpec::new("tags", FilterKind::StrList, group_tags),
        ];
        FILTERS
    }
}

/// Custom applications; listings include predefined applications
#[derive(Debug, Clone, Copy)]
pub struct Application;

fn app_category(app: &ApplicationResponse, value: &FilterValue) -> bool {
    in_list(Some(app.category.as_str()), value.strings())
}

fn app_subcategory(app: &ApplicationResponse, value: &FilterValue) -> bool {
    in_list(Some(app.subcategory.as_str()), value.strings())
}

fn app_technology(app: &ApplicationResponse, value: &FilterValue) -> bool {
    in_list(Some(app.technology.as_str()), value.strings())
}

fn app_risk(app: &ApplicationResponse, value: &FilterValue) -> bool {
    value.integers().contains(&app.risk)
}

impl Resource for Application {
    const ENDPOINT: &'static str = "/config/objects/v1/applications";
    const NAME: &'static str = "application";
    const MISSING_ID: MissingIdPolicy = MissingIdPolicy::AllowPredefined;

    type Create = ApplicationCreate;
    type Update = ApplicationUpdate;
    type Response = ApplicationResponse;

    fn filters() -> &'static [FilterSpec<ApplicationResponse>] {
        const FILTERS: &[FilterSpec<ApplicationResponse>] = &[
            FilterSpec::new("category", FilterKind::StrList, app_category),
            FilterSpec::new("subcategory", FilterKind::StrList, app_subcategory),
            FilterSpec::new("technology", FilterKind::StrList, app_technology),
            FilterSpec::new("risk", FilterKind::IntList, app_risk),
        ];
        FILTERS
    }
}

/// Application groups
#[derive(Debug, Clone, Copy)]
pub struct ApplicationGroup;

fn app_group_members(group: &ApplicationGroupResponse, value: &FilterValue) -> bool {
    intersects(group.members.as_deref(), value.strings())
}

impl Resource for ApplicationGroup {
    const ENDPOINT: &'static str = "/config/objects/v1/application-groups";
    const NAME: &'static str = "application group";

    type Create = ApplicationGroupCreate;
    type Update = ApplicationGroupUpdate;
    type Response = ApplicationGroupResponse;

    fn filters() -> &'static [FilterSpec<ApplicationGroupResponse>] {
        const FILTERS: &[FilterSpec<ApplicationGroupResponse>] =
            &[FilterSpec::new("members", FilterKind::StrList, app_group_members)];
        FILTERS
    }
}

/// Service objects; listings include predefined services
#[derive(Debug, Clone, Copy)]
pub struct Service;

fn service_protocols(service: &ServiceResponse, value: &FilterValue) -> bool {
    in_list(service.protocol.name(), value.strings())
}

fn service_tags(service: &ServiceResponse, value: &FilterValue) -> bool {
    intersects(service.tag.as_deref(), value.strings())
}

impl Resource for Service {
    const ENDPOINT: &'static str = "/config/objects/v1/services";
    const NAME: &'static str = "service";
    const MISSING_ID: MissingIdPolicy = MissingIdPolicy::AllowPredefined;

    type Create = ServiceCreate;
    type Update = ServiceUpdate;
    type Response = ServiceResponse;

    fn filters() -> &'static [FilterSpec<ServiceResponse>] {
        const FILTERS: &[FilterSpec<ServiceResponse>] = &[
            FilterSpec::new("protocols", FilterKind::StrList, service_protocols),
            FilterSpec::new("tags", FilterKind::StrList, service_tags),
        ];
        FILTERS
    }
}

/// Tags
#[derive(Debug, Clone, Copy)]
pub struct Tag;

fn tag_colors(tag: &TagResponse, value: &FilterValue) -> bool {
    in_list(tag.color.as_deref(), value.strings())
}

impl Resource for Tag {
    const ENDPOINT: &'static str = "/config/objects/v1/tags";
    const NAME: &'static str = "tag";

    type Create = TagCreate;
    type Update = TagUpdate;
    type Response = TagResponse;

    fn filters() -> &'static [FilterSpec<TagResponse>] {
        const FILTERS: &[FilterSpec<TagResponse>] =
            &[FilterSpec::new("colors", FilterKind::StrList, tag_colors)];
        FILTERS
    }
}

/// Regions
#[derive(Debug, Clone, Copy)]
pub struct Region;

fn region_geo_location(region: &RegionResponse, value: &FilterValue) -> bool {
    match (region.geo_location, value.as_geo_range()) {
        (Some(location), Some(range)) => {
            range.latitude.contains(location.latitude)
                && range.longitude.contains(location.longitude)
        }
        _ => false,
    }
}

fn region_addresses(region: &RegionResponse, value: &FilterValue) -> bool {
    intersects(region.address.as_deref(), value.strings())
}

impl Resource for Region {
    const ENDPOINT: &'static str = "/config/objects/v1/regions";
    const NAME: &'static str = "region";

    type Create = RegionCreate;
    type Update = RegionUpdate;
    type Response = RegionResponse;

    fn filters() -> &'static [FilterSpec<RegionResponse>] {
        const FILTERS: &[FilterSpec<RegionResponse>] = &[
            FilterSpec::new("geo_location", FilterKind::GeoRange, region_geo_location),
            FilterSpec::new("addresses", FilterKind::StrList, region_addresses),
        ];
        FILTERS
    }
}
