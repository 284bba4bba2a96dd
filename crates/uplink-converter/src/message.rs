use crate::error::{ConvertError, ConvertResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Device identity block of an uplink message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub device_name: String,
    pub device_profile_name: String,
    pub dev_eui: String,
}

/// Uplink message as delivered by the sensor gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UplinkMessage {
    pub device_info: DeviceInfo,
    /// ISO-8601 timestamp with UTC offset
    pub time: String,
    /// Base64-encoded sensor payload
    pub data: String,
}

impl UplinkMessage {
    /// Extract the message from a parsed JSON record.
    ///
    /// Unlike plain deserialization, a failure names the dotted path of the
    /// offending key. Keys other than the required ones are ignored.
    pub fn from_value(value: &Value) -> ConvertResult<Self> {
        let device_info = value
            .get("deviceInfo")
            .filter(|v| v.is_object())
            .ok_or_else(|| ConvertError::MissingField("deviceInfo".to_string()))?;

        Ok(Self {
            device_info: DeviceInfo {
                device_name: required_str(device_info, "deviceInfo.", "deviceName")?,
                device_profile_name: required_str(
                    device_info,
                    "deviceInfo.",
                    "deviceProfileName",
                )?,
                dev_eui: required_str(device_info, "deviceInfo.", "devEui")?,
            },
            time: required_str(value, "", "time")?,
            data: required_str(value, "", "data")?,
        })
    }
}

fn required_str(object: &Value, prefix: &str, key: &str) -> ConvertResult<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ConvertError::MissingField(format!("{}{}", prefix, key)))
}
