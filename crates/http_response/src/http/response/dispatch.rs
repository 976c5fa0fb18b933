//! Name based access to a [`Response`], for callers which only know the setter or field
//! name at runtime. Arguments are [`serde_json::Value`]s and are coerced loosely, the way a
//! dynamically typed caller would expect.

use std::str::FromStr;

use serde_json::{Number, Value};

use crate::http::{
    header::HeaderMap,
    response::{
        ContentType, InvalidArgument, ResponseError, StatusCode,
        builder::{Response, value_kind},
    },
};

/// The setters reachable through [`Response::call`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setter {
    Json,
    Html,
    Code,
    Message,
    Headers,
}

impl FromStr for Setter {
    type Err = ResponseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "json" => Self::Json,
            "html" => Self::Html,
            "code" => Self::Code,
            "message" => Self::Message,
            "headers" => Self::Headers,
            other => return Err(ResponseError::UnknownMethod(other.to_string())),
        })
    }
}

/// The fields readable through [`Response::get`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Type,
    Body,
    Code,
    Message,
    Headers,
}

impl FromStr for Field {
    type Err = ResponseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "type" => Self::Type,
            "body" => Self::Body,
            "code" => Self::Code,
            "message" => Self::Message,
            "headers" => Self::Headers,
            other => return Err(ResponseError::UnknownProperty(other.to_string())),
        })
    }
}

/// The current value of a [`Field`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property<'a> {
    Type(ContentType),
    Body(&'a str),
    Code(StatusCode),
    Message(&'a str),
    Headers(&'a HeaderMap),
}

impl Property<'_> {
    pub fn to_value(&self) -> Value {
        match self {
            Self::Type(ty) => Value::from(ty.as_str()),
            Self::Body(body) => Value::from(*body),
            Self::Code(code) => Value::from(code.as_u16()),
            Self::Message(message) => Value::from(*message),
            Self::Headers(headers) => Value::Object(
                headers
                    .iter()
                    .map(|(name, value)| (name.to_string(), Value::from(value.as_str())))
                    .collect(),
            ),
        }
    }
}

impl Response {
    /// Invokes the setter called `method` with a single argument
    pub fn call(&mut self, method: &str, arg: Value) -> Result<&mut Self, ResponseError> {
        match method.parse::<Setter>()? {
            Setter::Json => {
                self.set_json_body(&arg)?;
            }
            Setter::Html => match arg {
                Value::String(html) => {
                    self.set_html_body(html);
                }
                Value::Number(number) => {
                    self.set_html_body(number_string(&number));
                }
                other => return Err(InvalidArgument::HtmlBody(value_kind(&other)).into()),
            },
            Setter::Code => {
                self.set_status_code(coerce_int(&arg)?)?;
            }
            Setter::Message => {
                self.set_status_message(coerce_string(&arg));
            }
            Setter::Headers => match arg {
                Value::Object(headers) => {
                    self.set_headers(
                        headers
                            .iter()
                            .map(|(name, value)| (name.as_str(), coerce_string(value))),
                    );
                }
                other => return Err(InvalidArgument::Headers(value_kind(&other)).into()),
            },
        }
        Ok(self)
    }

    /// Reads the field called `property`
    pub fn get(&self, property: &str) -> Result<Property<'_>, ResponseError> {
        Ok(match property.parse::<Field>()? {
            Field::Type => Property::Type(self.content_type()),
            Field::Body => Property::Body(self.body()),
            Field::Code => Property::Code(self.status_code()),
            Field::Message => Property::Message(self.status_message()),
            Field::Headers => Property::Headers(self.headers()),
        })
    }
}

/// Integer coercion: numbers are truncated (saturating), strings use their leading integer,
/// booleans are 0 or 1 and null is 0
fn coerce_int(value: &Value) -> Result<i64, InvalidArgument> {
    Ok(match value {
        Value::Null => 0,
        Value::Bool(b) => i64::from(*b),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|_| i64::MAX))
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => leading_int(s),
        other => return Err(InvalidArgument::StatusCodeType(value_kind(other))),
    })
}

fn leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return 0;
    }
    let literal = &s[..s.len() - rest.len() + digits];
    literal
        .parse()
        .unwrap_or(if negative { i64::MIN } else { i64::MAX })
}

/// Integral floats lose their fraction, `1.0` is "1"
fn number_string(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => (f as i64).to_string(),
        _ => n.to_string(),
    }
}

/// String coercion: `true` is "1", `false` and null are empty, compound values become JSON
fn coerce_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => String::new(),
        Value::Number(n) => number_string(n),
        Value::String(s) => s.clone(),
        compound => compound.to_string(),
    }
}
