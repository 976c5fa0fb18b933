use std::fmt::Display;

mod builder;
mod dispatch;
mod error;
pub use builder::{HtmlContent, Response};
pub use dispatch::{Field, Property, Setter};
pub use error::{InvalidArgument, ResponseError};

/// The reason phrase for codes outside of the canonical table
pub const UNKNOWN_STATUS: &str = "unknown status";

/// An HTTP status code, always within `100..600`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StatusCode(u16);

// The range check is the only thing this wraps
static_assertions::assert_eq_size!(StatusCode, u16);

impl StatusCode {
    pub const OK: Self = Self(200);
    pub const CREATED: Self = Self(201);
    pub const NO_CONTENT: Self = Self(204);
    pub const BAD_REQUEST: Self = Self(400);
    pub const UNAUTHORIZED: Self = Self(401);
    pub const FORBIDDEN: Self = Self(403);
    pub const NOT_FOUND: Self = Self(404);
    pub const METHOD_NOT_ALLOWED: Self = Self(405);
    pub const CONFLICT: Self = Self(409);
    pub const INTERNAL_SERVER_ERROR: Self = Self(500);
    pub const SERVICE_UNAVAILABLE: Self = Self(503);

    pub fn new(code: i64) -> Result<Self, InvalidArgument> {
        if !(100..600).contains(&code) {
            return Err(InvalidArgument::StatusCode(code));
        }
        Ok(Self(code as u16))
    }

    pub const fn as_u16(&self) -> u16 {
        self.0
    }

    pub const fn canonical_reason(&self) -> Option<&'static str> {
        Some(match self.0 {
            200 => "OK",
            201 => "Created",
            204 => "No Content",
            400 => "Bad Request",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            409 => "Conflict",
            500 => "Internal Server Error",
            503 => "Service Unavailable",
            _ => return None,
        })
    }

    /// The canonical reason, or [`UNKNOWN_STATUS`]
    pub const fn reason_or_unknown(&self) -> &'static str {
        match self.canonical_reason() {
            Some(reason) => reason,
            None => UNKNOWN_STATUS,
        }
    }
}

impl TryFrom<i64> for StatusCode {
    type Error = InvalidArgument;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StatusCode> for u16 {
    fn from(value: StatusCode) -> Self {
        value.0
    }
}

impl Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// The two body formats a [`Response`] can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentType {
    #[default]
    Html,
    Json,
}

impl ContentType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Html => "text/html",
            Self::Json => "application/json",
        }
    }

    /// The value of the `Content-Type` header put on the wire
    pub fn header_value(&self) -> String {
        format!("{}; charset=UTF-8", self.as_str())
    }
}

impl Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
