pub mod channel;
mod error;
mod readings;

pub use channel::{ChannelDecoder, ChannelSpec, Reading, CHANNELS};
pub use error::{PayloadError, Result};
pub use readings::SensorReadings;

/// Outcome of a lenient decode: everything decoded before the first
/// truncated record, plus the truncation error if one was hit.
#[derive(Debug, Default)]
pub struct PartialDecode {
    pub readings: SensorReadings,
    pub truncated: Option<PayloadError>,
}

/// Trait for decoding binary sensor payloads into typed readings
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait PayloadDecoder: Send + Sync {
    /// Decode the payload, failing on the first truncated record
    fn decode(&self, bytes: &[u8]) -> Result<SensorReadings>;

    /// Decode the payload, keeping readings decoded before a truncated record
    fn decode_partial(&self, bytes: &[u8]) -> PartialDecode;
}
