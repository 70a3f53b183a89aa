//! Strata Cloud Manager configuration API client
//!
//! A Rust client library for the Strata Cloud Manager (SCM) configuration API.
//! Every configuration object type (addresses, address groups, applications,
//! services, tags, regions, subinterfaces, ...) is served by the same generic
//! [`ConfigService`], which validates payloads, talks to the API through an
//! [`HttpTransport`], and decodes responses into typed models.
//!
//! # Example
//!
//! ```no_run
//! use scm_client::{ListQuery, Scm, ScopeParams};
//! use scm_client::models::AddressCreate;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let scm = Scm::from_config(&scm_client::ClientConfig::from_env()?)?;
//! let addresses = scm.addresses();
//!
//! // Create an address object in the "Texas" folder
//! let created = addresses
//!     .create(&AddressCreate {
//!         name: "web-server".to_string(),
//!         ip_netmask: Some("10.0.0.10/32".to_string()),
//!         folder: Some("Texas".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! // List every address in the folder carrying the "prod" tag
//! let tagged = addresses
//!     .list(&ListQuery::folder("Texas").filter("tags", ["prod"]))
//!     .await?;
//!
//! // Resolve a single object by name
//! let same = addresses.fetch("web-server", &ScopeParams::folder("Texas")).await?;
//! assert_eq!(created.id, same.id);
//! # let _ = tagged;
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Scoped listing**: exactly one of folder, snippet or device per request
//! - **Pagination**: offset/limit paging until a short page is returned
//! - **Client-side filters**: typed per-resource filter criteria
//! - **Exclusions**: exact scope matching and folder/snippet/device exclusion lists
//! - **Fetch by name**: handles direct-object and `data`-array response shapes

pub mod api_error;
pub mod client;
pub mod common;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod resources;
pub mod scm;
pub mod service;
pub mod transport;
pub mod validation;
pub mod warning;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;

pub use api_error::{ApiError, ApiErrorKind};
pub use client::ScmClient;
pub use common::exclusion::ExclusionOptions;
pub use common::fetch::MultipleMatchPolicy;
pub use common::filter::{Bounds, FilterKind, FilterMap, FilterSpec, FilterValue, GeoRange};
pub use common::query::{ABSOLUTE_MAX_LIMIT, DEFAULT_MAX_LIMIT, MaxLimit, MissingIdPolicy};
pub use common::scope::{Scope, ScopeKind, ScopeParams, Scoped};
pub use config::ClientConfig;
pub use error::{ConfigIssue, ScmError};
pub use scm::Scm;
pub use service::{ConfigService, HasId, ListQuery, Resource};
pub use transport::HttpTransport;
pub use validation::{Constraint, FieldViolation, Validate, ValidationErrors};
pub use warning::{TracingWarningSink, WarningSink};
#[cfg(any(test, feature = "test-util"))]
pub use mock::{MockTransport, RecordedRequest, RequestMethod};
#[cfg(any(test, feature = "test-util"))]
pub use warning::RecordingWarningSink;
