use uhsapi::transport::TransportError;

/// Malformed input handed to a [`Response`](super::Response) setter, the response is left untouched
#[derive(Debug, thiserror::Error)]
pub enum InvalidArgument {
    #[error("invalid HTTP status code: {0} supplied")]
    StatusCode(i64),
    #[error("HTTP status code must be an integer, got {0}")]
    StatusCodeType(&'static str),
    #[error("JSON response content must be an object or an array, got {0}")]
    JsonBody(&'static str),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("HTML response content must be a string or a number, got {0}")]
    HtmlBody(&'static str),
    #[error("supplied headers must be a map of name => value pairs, got {0}")]
    Headers(&'static str),
}

#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),
    #[error("response has no such method: {0}")]
    UnknownMethod(String),
    #[error("response has no such property: {0}")]
    UnknownProperty(String),
    #[error("response has already been sent")]
    AlreadySent,
    #[error(transparent)]
    Transport(#[from] TransportError),
}
