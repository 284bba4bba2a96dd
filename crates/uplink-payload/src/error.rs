use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error(
        "truncated payload: channel {channel_id:#04x}/{channel_type:#04x} expects {expected} bytes, got {actual}"
    )]
    TruncatedPayload {
        channel_id: u8,
        channel_type: u8,
        expected: usize,
        actual: usize,
    },
}

pub type Result<T> = std::result::Result<T, PayloadError>;
