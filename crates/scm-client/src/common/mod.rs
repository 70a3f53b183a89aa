//! Shared list/fetch protocol
//!
//! Every resource service runs the same pipeline, assembled from these parts:
//! - `scope` - exactly-one-of folder/snippet/device validation
//! - `query` - offset/limit pagination and page limits
//! - `filter` - typed client-side filter criteria
//! - `exclusion` - exact scope matching and exclusion lists
//! - `fetch` - name lookup response disambiguation

pub mod exclusion;
pub mod fetch;
pub mod filter;
pub mod query;
pub mod scope;
