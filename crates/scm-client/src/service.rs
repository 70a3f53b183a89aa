//! Generic configuration service
//!
//! [`ConfigService`] implements create/get/update/delete/list/fetch once for
//! every resource type. A resource plugs in through the [`Resource`] trait:
//! its endpoint, its payload and response models, its client-side filter
//! table, and the decode policies for its list and fetch responses.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::common::exclusion::{ExclusionOptions, apply_exclusions};
use crate::common::fetch::{FetchContext, MultipleMatchPolicy, resolve_fetch_response};
use crate::common::filter::{FilterMap, FilterSpec, FilterValue, apply_filters, validate_filters};
use crate::common::query::{MaxLimit, MissingIdPolicy, Paginator};
use crate::common::scope::{ScopeParams, Scoped};
use crate::error::ScmError;
use crate::transport::HttpTransport;
use crate::validation::Validate;
use crate::warning::{TracingWarningSink, WarningSink};

/// Update payloads carry the id of the object they replace
pub trait HasId {
    fn id(&self) -> &Uuid;
}

/// A configuration object type served by [`ConfigService`]
pub trait Resource: Send + Sync + 'static {
    /// Collection path, e.g. `/config/objects/v1/addresses`
    const ENDPOINT: &'static str;
    /// Human-readable name used in logs, warnings and errors
    const NAME: &'static str;
    /// Treatment of list items without an `id`
    const MISSING_ID: MissingIdPolicy = MissingIdPolicy::Decode;
    /// Treatment of name lookups that match several objects
    const MULTIPLE_MATCH: MultipleMatchPolicy = MultipleMatchPolicy::FirstWithWarning;

    type Create: Serialize + Validate + Send + Sync;
    type Update: Serialize + Validate + HasId + Send + Sync;
    type Response: DeserializeOwned + Scoped + Send + 'static;

    /// Client-side filter criteria accepted by `list`
    fn filters() -> &'static [FilterSpec<Self::Response>] {
        &[]
    }
}

/// Arguments to [`ConfigService::list`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub scope: ScopeParams,
    pub exclusions: ExclusionOptions,
    pub filters: FilterMap,
}

impl ListQuery {
    pub fn folder(name: impl Into<String>) -> Self {
        Self::in_scope(ScopeParams::folder(name))
    }

    pub fn snippet(name: impl Into<String>) -> Self {
        Self::in_scope(ScopeParams::snippet(name))
    }

    pub fn device(name: impl Into<String>) -> Self {
        Self::in_scope(ScopeParams::device(name))
    }

    pub fn in_scope(scope: ScopeParams) -> Self {
        Self {
            scope,
            ..Self::default()
        }
    }

    /// Only keep objects defined directly in the requested container
    #[must_use]
    pub fn exact_match(mut self) -> Self {
        self.exclusions.exact_match = true;
        self
    }

    #[must_use]
    pub fn exclude_folders<I, S>(mut self, folders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclusions.exclude_folders = folders.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn exclude_snippets<I, S>(mut self, snippets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclusions.exclude_snippets = snippets.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn exclude_devices<I, S>(mut self, devices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclusions.exclude_devices = devices.into_iter().map(Into::into).collect();
        self
    }

    /// Add a client-side filter criterion
    #[must_use]
    pub fn filter(mut self, criterion: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.filters.insert(criterion.into(), value.into());
        self
    }
}

/// CRUD, list and fetch for one resource type
pub struct ConfigService<R: Resource> {
    transport: Arc<dyn HttpTransport>,
    max_limit: MaxLimit,
    warnings: Arc<dyn WarningSink>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> fmt::Debug for ConfigService<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigService")
            .field("resource", &R::NAME)
            .field("endpoint", &R::ENDPOINT)
            .field("max_limit", &self.max_limit.get())
            .finish_non_exhaustive()
    }
}

impl<R: Resource> ConfigService<R> {
    /// Create a service with the default page size
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            max_limit: MaxLimit::default(),
            warnings: Arc::new(TracingWarningSink),
            _resource: PhantomData,
        }
    }

    /// Create a service with a custom page size
    ///
    /// # Errors
    /// `InvalidConfiguration` if `max_limit` is outside `1..=5000`.
    pub fn with_max_limit(
        transport: Arc<dyn HttpTransport>,
        max_limit: i64,
    ) -> Result<Self, ScmError> {
        let mut service = Self::new(transport);
        service.set_max_limit(max_limit)?;
        Ok(service)
    }

    /// Route multiple-match warnings to `sink`
    #[must_use]
    pub fn with_warning_sink(mut self, sink: Arc<dyn WarningSink>) -> Self {
        self.warnings = sink;
        self
    }

    pub(crate) fn from_parts(
        transport: Arc<dyn HttpTransport>,
        max_limit: MaxLimit,
        warnings: Arc<dyn WarningSink>,
    ) -> Self {
        Self {
            transport,
            max_limit,
            warnings,
            _resource: PhantomData,
        }
    }

    pub fn endpoint(&self) -> &'static str {
        R::ENDPOINT
    }

    pub fn max_limit(&self) -> u32 {
        self.max_limit.get()
    }

    /// Change the page size used by `list`
    ///
    /// # Errors
    /// `InvalidConfiguration` if the value is outside `1..=5000`; the current
    /// value is kept.
    pub fn set_max_limit(&mut self, max_limit: i64) -> Result<(), ScmError> {
        self.max_limit = MaxLimit::new(max_limit)?;
        Ok(())
    }

    fn decode(value: Value) -> Result<R::Response, ScmError> {
        serde_json::from_value(value).map_err(ScmError::from)
    }

    fn item_path(id: &Uuid) -> String {
        format!("{}/{}", R::ENDPOINT, id)
    }

    /// Validate and create a new object
    pub async fn create(&self, data: &R::Create) -> Result<R::Response, ScmError> {
        data.validate()?;
        let body = serde_json::to_value(data)?;
        debug!("Creating {} via POST {}", R::NAME, R::ENDPOINT);

        let response = self.transport.post(R::ENDPOINT, &body).await?;
        Self::decode(response)
    }

    /// Get an object by id
    pub async fn get(&self, id: &Uuid) -> Result<R::Response, ScmError> {
        debug!("Fetching {} {}", R::NAME, id);
        let response = self.transport.get(&Self::item_path(id), &[]).await?;
        Self::decode(response)
    }

    /// Validate and replace an existing object
    ///
    /// The id travels in the URL path only; it is stripped from the body.
    pub async fn update(&self, data: &R::Update) -> Result<R::Response, ScmError> {
        data.validate()?;
        let mut body = serde_json::to_value(data)?;
        if let Some(map) = body.as_object_mut() {
            map.remove("id");
        }

        let path = Self::item_path(data.id());
        debug!("Updating {} via PUT {}", R::NAME, path);
        let response = self.transport.put(&path, &body).await?;
        Self::decode(response)
    }

    /// Delete an object by id
    pub async fn delete(&self, id: &Uuid) -> Result<(), ScmError> {
        debug!("Deleting {} {}", R::NAME, id);
        self.transport.delete(&Self::item_path(id)).await
    }

    /// List every object in one container
    ///
    /// Pages through the collection, then applies client-side filters and
    /// finally the exact-match and exclusion options.
    pub async fn list(&self, query: &ListQuery) -> Result<Vec<R::Response>, ScmError> {
        let scope = query.scope.resolve()?;
        validate_filters(&query.filters, R::filters())?;

        let objects = Paginator::new(self.transport.as_ref(), R::ENDPOINT, self.max_limit)
            .resource(R::NAME)
            .missing_id_policy(R::MISSING_ID)
            .paginate(&scope, Self::decode)
            .await?;

        let filtered = apply_filters(objects, &query.filters, R::filters())?;
        Ok(apply_exclusions(filtered, &scope, &query.exclusions))
    }

    /// Look up a single object by name within one container
    pub async fn fetch(&self, name: &str, scope: &ScopeParams) -> Result<R::Response, ScmError> {
        if name.is_empty() {
            return Err(ScmError::missing_parameter("name"));
        }
        let scope = scope.resolve()?;
        debug!("Fetching {} '{}' in {}", R::NAME, name, scope);

        let params = [scope.query_param(), ("name", name.to_string())];
        let response = self.transport.get(R::ENDPOINT, &params).await?;
        let object = resolve_fetch_response(
            response,
            FetchContext {
                resource: R::NAME,
                name,
                policy: R::MULTIPLE_MATCH,
            },
            self.warnings.as_ref(),
        )?;
        Self::decode(object)
    }
}
