//! Entry point holding one transport shared by every resource service

use std::sync::Arc;

use crate::client::ScmClient;
use crate::common::query::MaxLimit;
use crate::config::ClientConfig;
use crate::error::ScmError;
use crate::resources::{
    Address, AddressGroup, Application, ApplicationGroup, Layer3Subinterface, Region, Service, Tag,
};
use crate::service::{ConfigService, Resource};
use crate::transport::HttpTransport;
use crate::warning::{TracingWarningSink, WarningSink};

/// Shared handle for building resource services
#[derive(Clone)]
pub struct Scm {
    transport: Arc<dyn HttpTransport>,
    max_limit: MaxLimit,
    warnings: Arc<dyn WarningSink>,
}

impl std::fmt::Debug for Scm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scm")
            .field("max_limit", &self.max_limit)
            .field("warnings", &self.warnings)
            .finish_non_exhaustive()
    }
}

impl Scm {
    /// Wrap any transport (the real client or a mock)
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            max_limit: MaxLimit::default(),
            warnings: Arc::new(TracingWarningSink),
        }
    }

    /// Build an [`ScmClient`] from `config` and use its page size
    pub fn from_config(config: &ClientConfig) -> Result<Self, ScmError> {
        let client = ScmClient::from_config(config)?;
        Ok(Self::new(Arc::new(client)).with_max_limit(config.max_limit))
    }

    /// Page size handed to every service created afterwards
    #[must_use]
    pub fn with_max_limit(mut self, max_limit: MaxLimit) -> Self {
        self.max_limit = max_limit;
        self
    }

    #[must_use]
    pub fn with_warning_sink(mut self, sink: Arc<dyn WarningSink>) -> Self {
        self.warnings = sink;
        self
    }

    /// Service for any [`Resource`]
    pub fn service<R: Resource>(&self) -> ConfigService<R> {
        ConfigService::from_parts(
            Arc::clone(&self.transport),
            self.max_limit,
            Arc::clone(&self.warnings),
        )
    }

    pub fn addresses(&self) -> ConfigService<Address> {
        self.service()
    }

    pub fn address_groups(&self) -> ConfigService<AddressGroup> {
        self.service()
    }

    pub fn applications(&self) -> ConfigService<Application> {
        self.service()
    }

    pub fn application_groups(&self) -> ConfigService<ApplicationGroup> {
        self.service()
    }

    pub fn services(&self) -> ConfigService<Service> {
        self.service()
    }

    pub fn tags(&self) -> ConfigService<Tag> {
        self.service()
    }

    pub fn regions(&self) -> ConfigService<Region> {
        self.service()
    }

    pub fn layer3_subinterfaces(&self) -> ConfigService<Layer3Subinterface> {
        self.service()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::scope::ScopeParams;
    use crate::mock::MockTransport;
    use crate::models::{TagCreate, TagUpdate};
    use crate::service::ListQuery;
    use serde_json::json;

    #[test]
    fn test_services_inherit_settings() {
        let scm = Scm::new(Arc::new(MockTransport::new()))
            .with_max_limit(MaxLimit::new(200).unwrap());
        assert_eq!(scm.addresses().max_limit(), 200);
        assert_eq!(scm.tags().endpoint(), "/config/objects/v1/tags");
        assert_eq!(
            scm.layer3_subinterfaces().endpoint(),
            "/config/network/v1/layer3-subinterfaces"
        );
    }

    #[tokio::test]
    async fn test_services_share_one_transport() {
        let mock = MockTransport::new();
        let scm = Scm::new(Arc::new(mock.clone()));

        let created = scm
            .tags()
            .create(&TagCreate {
                name: "prod".to_string(),
                color: Some("Red".to_string()),
                folder: Some("Texas".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        let id = created.id.unwrap();

        let updated = scm
            .tags()
            .update(&TagUpdate {
                id,
                name: "prod".to_string(),
                color: Some("Blue".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(updated.color.as_deref(), Some("Blue"));
        assert_eq!(mock.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_predefined_entries_survive_listing() {
        let mock = MockTransport::new();
        let endpoint = "/config/objects/v1/applications";
        mock.seed(
            endpoint,
            json!({
                "name": "ssl",
                "category": "networking",
                "subcategory": "encrypted-tunnel",
                "technology": "browser-based",
                "risk": 4,
                "folder": "Texas"
            }),
        );
        mock.seed(
            endpoint,
            json!({
                "id": "00000000-0000-0000-0000-000000000001",
                "name": "crm",
                "category": "business-systems",
                "subcategory": "management",
                "technology": "client-server",
                "risk": 2,
                "folder": "Texas"
            }),
        );
        let scm = Scm::new(Arc::new(mock));

        let apps = scm
            .applications()
            .list(&ListQuery::folder("Texas"))
            .await
            .unwrap();
        assert_eq!(apps.len(), 2);
        assert!(apps[0].is_predefined());
        assert!(!apps[1].is_predefined());
    }

    #[tokio::test]
    async fn test_address_group_rejects_items_without_id() {
        let mock = MockTransport::new();
        mock.seed(
            "/config/objects/v1/address-groups",
            json!({"name": "broken", "static": ["a"], "folder": "Texas"}),
        );
        let scm = Scm::new(Arc::new(mock));

        let err = scm
            .address_groups()
            .list(&ListQuery::folder("Texas"))
            .await
            .unwrap_err();
        assert!(matches!(err, ScmError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_fetch_in_snippet() {
        let mock = MockTransport::new();
        mock.seed(
            "/config/objects/v1/services",
            json!({
                "name": "service-https",
                "protocol": {"tcp": {"port": "443"}},
                "snippet": "predefined"
            }),
        );
        let scm = Scm::new(Arc::new(mock));

        // No id: fetch treats a data item without id as malformed
        let err = scm
            .services()
            .fetch("service-https", &ScopeParams::snippet("predefined"))
            .await
            .unwrap_err();
        assert!(matches!(err, ScmError::MalformedResponse(_)));
    }
}
