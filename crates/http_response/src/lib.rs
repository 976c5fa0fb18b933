//! An HTTP response builder in rust
//!
//! A [`Response`] is configured through its setters and then written once through a
//! [`Transport`], the boundary to whatever server actually owns the connection.
//! [`WireTransport`] serializes to HTTP/1.1 bytes for callers which own a raw socket.

pub mod http;
pub mod wire;

pub use http::{
    explain::{Explanation, StatusCodeEntry, explain},
    header::HeaderMap,
    response::{ContentType, InvalidArgument, Response, ResponseError, StatusCode},
};
pub use uhsapi::transport::{Transport, TransportError};
pub use wire::WireTransport;
