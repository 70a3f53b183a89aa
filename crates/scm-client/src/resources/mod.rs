//! Resource definitions
//!
//! Zero-sized marker types tying an endpoint to its models, filter table and
//! decode policies. Use them with [`ConfigService`](crate::service::ConfigService)
//! or through the accessors on [`Scm`](crate::scm::Scm).

mod network;
mod objects;

pub use network::Layer3Subinterface;
pub use objects::{Address, AddressGroup, Application, ApplicationGroup, Region, Service, Tag};
