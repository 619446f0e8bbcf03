// sigfox-api: Async Rust client for the Sigfox device-management API (v2)

pub mod auth;
pub mod classify;
pub mod client;
pub mod contracts;
pub mod decode;
pub mod device_types;
pub mod devices;
pub mod error;
pub mod messages;
pub mod models;
pub mod paginate;
pub mod provision;
pub mod transport;

pub use auth::Credentials;
pub use classify::RequestKind;
pub use client::{DEFAULT_BASE_URL, SigfoxClient};
pub use error::Error;
pub use models::{
    BaseDevice, Contract, Device, DeviceType, EntityRef, Location, Message, MessageStats, Page,
    Paging,
};
pub use paginate::PageMode;
pub use provision::{NewDevice, ProvisionRequest};
pub use transport::{RawResponse, TlsMode, TransportConfig};
