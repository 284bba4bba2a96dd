use serde::{Deserialize, Serialize};

/// Readings decoded from a single payload.
///
/// Serializes as the telemetry `values` map: readings that were not
/// reported are omitted rather than written as null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorReadings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<u8>,
}

impl SensorReadings {
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of readings present
    pub fn len(&self) -> usize {
        usize::from(self.battery.is_some())
            + usize::from(self.temperature.is_some())
            + usize::from(self.humidity.is_some())
    }
}
