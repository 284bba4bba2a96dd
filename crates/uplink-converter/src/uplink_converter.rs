use crate::envelope::{Attributes, Telemetry, TelemetryEnvelope};
use crate::error::ConvertResult;
use crate::message::UplinkMessage;
use crate::timestamp::to_epoch_millis;
use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use uplink_payload::{ChannelDecoder, PayloadDecoder, SensorReadings};

/// Standard alphabet; trailing `=` padding is optional on decode
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// What to do when a known channel record runs past the end of the payload
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TruncationPolicy {
    /// Fail the whole conversion
    #[default]
    Reject,
    /// Keep the readings decoded before the truncated record
    KeepDecoded,
}

/// Converts gateway uplink messages into telemetry envelopes
///
/// Flow:
/// 1. Normalize the timestamp to epoch milliseconds
/// 2. Base64-decode the sensor payload
/// 3. Decode channel records into readings
/// 4. Assemble the envelope from identity fields and readings
///
/// Holds no per-call state; one instance can serve any number of threads.
pub struct UplinkConverter {
    decoder: Arc<dyn PayloadDecoder>,
    truncation_policy: TruncationPolicy,
}

impl UplinkConverter {
    /// Create a new UplinkConverter with dependencies
    pub fn new(decoder: Arc<dyn PayloadDecoder>, truncation_policy: TruncationPolicy) -> Self {
        Self {
            decoder,
            truncation_policy,
        }
    }

    pub fn truncation_policy(&self) -> TruncationPolicy {
        self.truncation_policy
    }

    /// Convert a typed uplink message into an envelope
    #[instrument(skip(self, message), fields(dev_eui = %message.device_info.dev_eui))]
    pub fn convert(&self, message: &UplinkMessage) -> ConvertResult<TelemetryEnvelope> {
        let ts = to_epoch_millis(&message.time)?;

        let payload = PAYLOAD_ENGINE.decode(&message.data)?;
        debug!(payload_size = payload.len(), "decoding sensor payload");

        let values = self.decode_payload(&payload)?;
        debug!(ts, reading_count = values.len(), "converted uplink");

        Ok(TelemetryEnvelope {
            device_name: message.device_info.device_name.clone(),
            device_type: message.device_info.device_profile_name.clone(),
            attributes: Attributes {
                dev_eui: message.device_info.dev_eui.clone(),
            },
            telemetry: Telemetry { ts, values },
        })
    }

    /// Convert a parsed JSON uplink record into a parsed JSON envelope
    pub fn convert_value(&self, input: &Value) -> ConvertResult<Value> {
        let message = UplinkMessage::from_value(input)?;
        let envelope = self.convert(&message)?;
        Ok(serde_json::to_value(envelope)?)
    }

    fn decode_payload(&self, payload: &[u8]) -> ConvertResult<SensorReadings> {
        match self.truncation_policy {
            TruncationPolicy::Reject => Ok(self.decoder.decode(payload)?),
            TruncationPolicy::KeepDecoded => {
                let outcome = self.decoder.decode_partial(payload);
                if let Some(err) = outcome.truncated {
                    warn!(
                        error = %err,
                        kept = outcome.readings.len(),
                        "keeping readings decoded before truncated record"
                    );
                }
                Ok(outcome.readings)
            }
        }
    }
}

impl Default for UplinkConverter {
    fn default() -> Self {
        Self::new(Arc::new(ChannelDecoder::new()), TruncationPolicy::default())
    }
}
