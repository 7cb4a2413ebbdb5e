//! SmartThings device model
//!
//! This crate describes the SmartThings cloud API surface that the Home
//! Assistant integration consumes: capability and attribute identifiers,
//! the device object with its status snapshot, and the `DeviceApi` trait
//! through which commands are sent. Concrete transports live elsewhere.

mod device;
mod error;
mod status;

pub mod attribute;
pub mod capability;

pub use device::{Device, DeviceApi, DeviceCommand, COMPONENT_MAIN};
pub use error::{ApiError, ApiResult};
pub use status::{AttributeState, DeviceStatus};
