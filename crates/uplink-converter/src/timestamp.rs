use crate::error::{ConvertError, ConvertResult};
use chrono::DateTime;

/// Date-time with seconds and optional fraction, then a `±HH:MM` offset
const WITH_SECONDS: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";
/// Date-time to the minute, then a `±HH:MM` offset
const WITHOUT_SECONDS: &str = "%Y-%m-%dT%H:%M%:z";

/// Index of the date/time separator in `YYYY-MM-DDThh:mm`
const SEPARATOR_INDEX: usize = 10;

/// Convert an ISO-8601 offset date-time to epoch milliseconds.
///
/// Seconds and fractional seconds are optional. The offset is `Z` or
/// `±HH:MM`; `T` and `Z` match in either case. Sub-millisecond digits are
/// dropped and instants before 1970 floor towards the earlier millisecond.
pub fn to_epoch_millis(time: &str) -> ConvertResult<i64> {
    let normalized = normalize(time);
    let parsed = DateTime::parse_from_str(&normalized, WITH_SECONDS)
        .or_else(|err| DateTime::parse_from_str(&normalized, WITHOUT_SECONDS).map_err(|_| err))
        .map_err(|source| ConvertError::TimestampFormat {
            value: time.to_string(),
            source,
        })?;
    Ok(parsed.timestamp_millis())
}

/// Upper-case a `t` separator and spell a `Z`/`z` offset as `+00:00`
fn normalize(time: &str) -> String {
    let mut normalized: String = time
        .char_indices()
        .map(|(i, c)| if i == SEPARATOR_INDEX && c == 't' { 'T' } else { c })
        .collect();
    if normalized.ends_with(['Z', 'z']) {
        normalized.pop();
        normalized.push_str("+00:00");
    }
    normalized
}
