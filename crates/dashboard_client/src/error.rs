use thiserror::Error;

/// Failure taxonomy of the REST boundary. `InvalidUrl` is the validation
/// class (malformed user input caught before the wire); the rest are
/// transport failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("http status {code}")]
    Status { code: u16 },
    #[error("request timed out")]
    Timeout,
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("network error: {0}")]
    Network(String),
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::Timeout;
    }
    if err.is_decode() {
        return ApiError::Decode(err.to_string());
    }
    ApiError::Network(err.to_string())
}
