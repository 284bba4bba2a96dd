use serde::{Deserialize, Serialize};
use uplink_payload::SensorReadings;

/// Device attributes attached to the envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attributes {
    pub dev_eui: String,
}

/// Timestamped sensor values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Telemetry {
    /// Epoch milliseconds
    pub ts: i64,
    pub values: SensorReadings,
}

/// Normalized envelope handed to the device-management platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryEnvelope {
    pub device_name: String,
    pub device_type: String,
    pub attributes: Attributes,
    pub telemetry: Telemetry,
}
