use std::fmt;

use crate::{ascii::InvalidAsciiError, http::HttpVersion};

/// The boundary a response is written through.
///
/// Implementations receive the status line first, then zero or more headers, then the body.
/// A backend which cannot accept a call (closed connection, headers already flushed, ...)
/// returns an error, the caller does not retry.
pub trait Transport {
    /// Sets the status line, `{version} {code} {reason}`
    fn status_line(
        &mut self,
        version: HttpVersion,
        code: u16,
        reason: &str,
    ) -> Result<(), TransportError>;

    /// Sets a single header, can be called multiple times
    fn header(&mut self, name: &str, value: &str) -> Result<(), TransportError>;

    /// Writes the body bytes, headers can no longer be set afterwards
    fn body(&mut self, body: &[u8]) -> Result<(), TransportError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn status_line(
        &mut self,
        version: HttpVersion,
        code: u16,
        reason: &str,
    ) -> Result<(), TransportError> {
        (**self).status_line(version, code, reason)
    }

    fn header(&mut self, name: &str, value: &str) -> Result<(), TransportError> {
        (**self).header(name, value)
    }

    fn body(&mut self, body: &[u8]) -> Result<(), TransportError> {
        (**self).body(body)
    }
}

#[derive(Debug)]
pub enum TransportError {
    /// The underlying connection is gone
    Closed,
    /// A header or status line was written after the body
    HeadersSent,
    /// A call arrived before the status line
    OutOfOrder,
    /// A header name or value that cannot be put on the wire
    InvalidHeader(String),
    /// A second value for a field which only allows one
    DuplicateHeader(String),
    /// The declared `Content-Length` disagrees with the body
    ContentLengthMismatch { declared: u64, actual: u64 },
    InvalidAscii(InvalidAsciiError),
    Io(std::io::Error),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => f.write_str("transport is closed"),
            Self::HeadersSent => f.write_str("headers have already been sent"),
            Self::OutOfOrder => f.write_str("status line must be sent first"),
            Self::InvalidHeader(name) => write!(f, "invalid header: {name}"),
            Self::DuplicateHeader(name) => write!(f, "duplicate header: {name}"),
            Self::ContentLengthMismatch { declared, actual } => write!(
                f,
                "content-length is {declared} but the body is {actual} bytes"
            ),
            Self::InvalidAscii(err) => fmt::Display::fmt(err, f),
            Self::Io(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidAscii(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<InvalidAsciiError> for TransportError {
    fn from(value: InvalidAsciiError) -> Self {
        Self::InvalidAscii(value)
    }
}

impl From<std::io::Error> for TransportError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
