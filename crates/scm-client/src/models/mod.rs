//! Request and response models
//!
//! Each resource has three shapes: a create payload, an update payload
//! (create fields plus `id`), and the response decoded from the API. Unset
//! optional fields are omitted from outbound JSON.

mod address;
mod address_group;
mod application;
mod application_group;
mod layer3_subinterface;
mod region;
mod service;
mod tag;

pub use address::{AddressCreate, AddressResponse, AddressUpdate};
pub use address_group::{
    AddressGroupCreate, AddressGroupResponse, AddressGroupUpdate, DynamicFilter,
};
pub use application::{ApplicationCreate, ApplicationFlags, ApplicationResponse, ApplicationUpdate};
pub use application_group::{
    ApplicationGroupCreate, ApplicationGroupResponse, ApplicationGroupUpdate,
};
pub use layer3_subinterface::{
    DhcpClient, IpEntry, Layer3SubinterfaceCreate, Layer3SubinterfaceResponse,
    Layer3SubinterfaceUpdate,
};
pub use region::{GeoLocation, RegionCreate, RegionResponse, RegionUpdate};
pub use service::{
    Protocol, ServiceCreate, ServiceResponse, ServiceUpdate, TcpProtocol, TimeoutOverride,
    UdpProtocol,
};
pub use tag::{TAG_COLORS, TagCreate, TagResponse, TagUpdate};

/// Implement [`Scoped`](crate::common::scope::Scoped) for models with
/// `folder`, `snippet` and `device` fields
macro_rules! impl_scoped {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::common::scope::Scoped for $ty {
                fn folder(&self) -> Option<&str> {
                    self.folder.as_deref()
                }
                fn snippet(&self) -> Option<&str> {
                    self.snippet.as_deref()
                }
                fn device(&self) -> Option<&str> {
                    self.device.as_deref()
                }
            }
        )+
    };
}

/// Implement [`HasId`](crate::service::HasId) for update models
macro_rules! impl_has_id {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::service::HasId for $ty {
                fn id(&self) -> &uuid::Uuid {
                    &self.id
                }
            }
        )+
    };
}

pub(crate) use impl_has_id;
pub(crate) use impl_scoped;
