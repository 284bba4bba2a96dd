use thiserror::Error;
use uplink_payload::PayloadError;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Missing or invalid field: {0}")]
    MissingField(String),

    #[error("Invalid timestamp {value:?}: {source}")]
    TimestampFormat {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Invalid payload encoding: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),

    #[error("Payload decode error: {0}")]
    TruncatedPayload(#[from] PayloadError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ConvertResult<T> = Result<T, ConvertError>;
