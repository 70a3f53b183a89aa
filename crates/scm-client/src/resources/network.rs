//! Network API resources (`/config/network/v1`)

use crate::common::filter::{FilterKind, FilterSpec, FilterValue};
use crate::models::{
    Layer3SubinterfaceCreate, Layer3SubinterfaceResponse, Layer3SubinterfaceUpdate,
};
use crate::service::Resource;

/// VLAN-tagged layer 3 subinterfaces
#[derive(Debug, Clone, Copy)]
pub struct Layer3Subinterface;

fn subinterface_mtu(sub: &Layer3SubinterfaceResponse, value: &FilterValue) -> bool {
    sub.mtu.is_some() && sub.mtu == value.as_int()
}

fn subinterface_parent(sub: &Layer3SubinterfaceResponse, value: &FilterValue) -> bool {
    sub.parent_interface.is_some() && sub.parent_interface.as_deref() == value.as_str()
}

fn subinterface_tag(sub: &Layer3SubinterfaceResponse, value: &FilterValue) -> bool {
    value.as_int() == Some(sub.tag)
}

impl Resource for Layer3Subinterface {
    const ENDPOINT: &'static str = "/config/network/v1/layer3-subinterfaces";
    const NAME: &'static str = "layer3 subinterface";

    type Create = Layer3SubinterfaceCreate;
    type Update = Layer3SubinterfaceUpdate;
    type Response = Layer3SubinterfaceResponse;

    fn filters() -> &'static [FilterSpec<Layer3SubinterfaceResponse>] {
        const FILTERS: &[FilterSpec<Layer3SubinterfaceResponse>] = &[
            FilterSpec::new("mtu", FilterKind::Int, subinterface_mtu),
            FilterSpec::new("parent_interface", FilterKind::Str, subinterface_parent),
            FilterSpec::new("tag", FilterKind::Int, subinterface_tag),
        ];
        FILTERS
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::common::scope::ScopeParams;
    use crate::error::ScmError;
    use crate::mock::MockTransport;
    use crate::service::{ConfigService, ListQuery};
    use serde_json::json;

    fn seeded() -> ConfigService<Layer3Subinterface> {
        let mock = MockTransport::new();
        let endpoint = Layer3Subinterface::ENDPOINT;
        mock.seed(
            endpoint,
            json!({
                "id": "00000000-0000-0000-0000-000000000001",
                "name": "ethernet1/1.100",
                "tag": 100,
                "mtu": 1500,
                "parent_interface": "ethernet1/1",
                "folder": "Texas"
            }),
        );
        mock.seed(
            endpoint,
            json!({
                "id": "00000000-0000-0000-0000-000000000002",
                "name": "ethernet1/1.200",
                "tag": 200,
                "mtu": 9000,
                "parent_interface": "ethernet1/1",
                "folder": "Texas"
            }),
        );
        mock.seed(
            endpoint,
            json!({
                "id": "00000000-0000-0000-0000-000000000003",
                "name": "ethernet1/2.100",
                "tag": 100,
                "parent_interface": "ethernet1/2",
                "folder": "Texas"
            }),
        );
        ConfigService::new(Arc::new(mock))
    }

    fn names(subs: &[Layer3SubinterfaceResponse]) -> Vec<&str> {
        subs.iter().map(|s| s.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_scalar_filters() {
        let service = seeded();

        let jumbo = service
            .list(&ListQuery::folder("Texas").filter("mtu", 9000_i64))
            .await
            .unwrap();
        assert_eq!(names(&jumbo), vec!["ethernet1/1.200"]);

        let vlan100 = service
            .list(
                &ListQuery::folder("Texas")
                    .filter("tag", 100_i64)
                    .filter("parent_interface", "ethernet1/2"),
            )
            .await
            .unwrap();
        assert_eq!(names(&vlan100), vec!["ethernet1/2.100"]);
    }

    #[tokio::test]
    async fn test_scalar_filter_rejects_list() {
        let err = seeded()
            .list(&ListQuery::folder("Texas").filter("mtu", [1500_i64]))
            .await
            .unwrap_err();
        assert!(matches!(err, ScmError::InvalidFilterType { .. }));
    }

    #[tokio::test]
    async fn test_fetch_by_name() {
        let sub = seeded()
            .fetch("ethernet1/1.100", &ScopeParams::folder("Texas"))
            .await
            .unwrap();
        assert_eq!(sub.tag, 100);
    }
}
