// smbulk-api: Async Rust client for the Security Manager REST API

pub mod auth;
pub mod client;
pub mod device_groups;
pub mod devices;
pub mod error;
pub mod models;
pub mod plugins;
pub mod transport;

pub use auth::{AuthValidation, Credentials};
pub use client::{SecurityManagerClient, base_url_from_host};
pub use devices::DeviceFilter;
pub use error::Error;
pub use models::{Device, DeviceGroup, DevicePack, Page};
pub use transport::{TlsMode, TransportConfig};
