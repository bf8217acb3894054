//! Device telemetry and command wire types.

pub mod types;

pub use types::{
    CommandRequest, DeviceMode, DeviceStatus, PhLevel, SensorData, WaterLevel,
};
