use crate::{PartialDecode, PayloadDecoder, PayloadError, Result, SensorReadings};
use tracing::trace;

// Channel IDs
pub const CHANNEL_BATTERY: u8 = 0x01;
pub const CHANNEL_TEMPERATURE: u8 = 0x02;
pub const CHANNEL_HUMIDITY: u8 = 0x04;

// Channel types paired with the IDs above
pub const TYPE_BATTERY: u8 = 0x45;
pub const TYPE_TEMPERATURE: u8 = 0x22;
pub const TYPE_HUMIDITY: u8 = 0x68;

// Data sizes for each channel (in bytes, excluding channel and type bytes)
pub const SIZE_BATTERY: usize = 1;
pub const SIZE_TEMPERATURE: usize = 2;
pub const SIZE_HUMIDITY: usize = 1;

/// Header size: one channel ID byte plus one channel type byte
pub const HEADER_SIZE: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reading {
    Battery,
    Temperature,
    Humidity,
}

impl Reading {
    /// Key used for this reading in the telemetry values map
    pub fn name(self) -> &'static str {
        match self {
            Reading::Battery => "battery",
            Reading::Temperature => "temperature",
            Reading::Humidity => "humidity",
        }
    }
}

/// One row of the channel table.
///
/// `apply` receives exactly `size` bytes.
#[derive(Debug, Clone, Copy)]
pub struct ChannelSpec {
    pub channel_id: u8,
    pub channel_type: u8,
    pub size: usize,
    pub reading: Reading,
    apply: fn(&[u8], &mut SensorReadings),
}

impl ChannelSpec {
    pub fn lookup(channel_id: u8, channel_type: u8) -> Option<&'static ChannelSpec> {
        CHANNELS
            .iter()
            .find(|spec| spec.channel_id == channel_id && spec.channel_type == channel_type)
    }
}

/// Known channels. Any other (channel ID, channel type) pair is skipped
/// without consuming data bytes.
pub static CHANNELS: [ChannelSpec; 3] = [
    ChannelSpec {
        channel_id: CHANNEL_BATTERY,
        channel_type: TYPE_BATTERY,
        size: SIZE_BATTERY,
        reading: Reading::Battery,
        apply: apply_battery,
    },
    ChannelSpec {
        channel_id: CHANNEL_TEMPERATURE,
        channel_type: TYPE_TEMPERATURE,
        size: SIZE_TEMPERATURE,
        reading: Reading::Temperature,
        apply: apply_temperature,
    },
    ChannelSpec {
        channel_id: CHANNEL_HUMIDITY,
        channel_type: TYPE_HUMIDITY,
        size: SIZE_HUMIDITY,
        reading: Reading::Humidity,
        apply: apply_humidity,
    },
];

fn read_u16_be(data: &[u8]) -> u16 {
    u16::from_be_bytes([data[0], data[1]])
}

fn apply_battery(data: &[u8], readings: &mut SensorReadings) {
    readings.battery = Some(data[0]);
}

fn apply_temperature(data: &[u8], readings: &mut SensorReadings) {
    readings.temperature = Some(f64::from(read_u16_be(data)) / 100.0);
}

fn apply_humidity(data: &[u8], readings: &mut SensorReadings) {
    readings.humidity = Some(data[0]);
}

/// Decoder for the channel-tagged sensor payload
pub struct ChannelDecoder;

impl ChannelDecoder {
    pub fn new() -> Self {
        Self
    }

    /// The channel table this decoder dispatches on
    pub fn channels(&self) -> &'static [ChannelSpec] {
        &CHANNELS
    }

    /// Walk the records front to back, writing each known reading into
    /// `readings`. Later records overwrite earlier ones.
    fn decode_into(&self, bytes: &[u8], readings: &mut SensorReadings) -> Result<()> {
        let mut offset = 0;

        // A lone trailing byte cannot hold a header and is dropped
        while bytes.len() - offset >= HEADER_SIZE {
            let channel_id = bytes[offset];
            let channel_type = bytes[offset + 1];
            offset += HEADER_SIZE;

            let Some(spec) = ChannelSpec::lookup(channel_id, channel_type) else {
                trace!(channel_id, channel_type, offset, "skipping unknown channel");
                continue;
            };

            let remaining = bytes.len() - offset;
            if spec.size > remaining {
                return Err(PayloadError::TruncatedPayload {
                    channel_id,
                    channel_type,
                    expected: spec.size,
                    actual: remaining,
                });
            }

            (spec.apply)(&bytes[offset..offset + spec.size], readings);
            offset += spec.size;
        }

        Ok(())
    }
}

impl Default for ChannelDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PayloadDecoder for ChannelDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<SensorReadings> {
        let mut readings = SensorReadings::default();
        self.decode_into(bytes, &mut readings)?;
        Ok(readings)
    }

    fn decode_partial(&self, bytes: &[u8]) -> PartialDecode {
        let mut readings = SensorReadings::default();
        let truncated = self.decode_into(bytes, &mut readings).err();
        PartialDecode {
            readings,
            truncated,
        }
    }
}
