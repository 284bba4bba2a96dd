pub mod envelope;
pub mod error;
pub mod message;
pub mod timestamp;
pub mod uplink_converter;

pub use envelope::{Attributes, Telemetry, TelemetryEnvelope};
pub use error::{ConvertError, ConvertResult};
pub use message::{DeviceInfo, UplinkMessage};
pub use timestamp::to_epoch_millis;
pub use uplink_converter::{TruncationPolicy, UplinkConverter};
pub use uplink_payload::SensorReadings;
