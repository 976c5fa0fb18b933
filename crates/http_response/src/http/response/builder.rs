use std::fmt::Display;

use serde::Serialize;
use uhsapi::{http::HttpVersion, transport::Transport};
use unicase::UniCase;

use crate::http::{
    explain::{self, Explanation},
    header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
    response::{ContentType, InvalidArgument, ResponseError, StatusCode},
};

/// Content accepted as an HTML body: strings and numbers
pub trait HtmlContent {
    fn into_html(self) -> String;
}

impl HtmlContent for String {
    fn into_html(self) -> String {
        self
    }
}

impl HtmlContent for &str {
    fn into_html(self) -> String {
        self.to_string()
    }
}

impl HtmlContent for &String {
    fn into_html(self) -> String {
        self.clone()
    }
}

macro_rules! html_numeric {
    ($($ty: ty),*) => {
        $(
            impl HtmlContent for $ty {
                fn into_html(self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

html_numeric!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);

/// A response under construction.
///
/// Every setter either applies completely or, on invalid input, returns an error and leaves the
/// response as it was. [`Response::send`] can only succeed once.
#[derive(Debug, Clone)]
pub struct Response {
    version: HttpVersion,
    content_type: ContentType,
    body: String,
    status: StatusCode,
    message: String,
    headers: HeaderMap,
    sent: bool,
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

impl Response {
    pub fn new() -> Self {
        Self::with_version(HttpVersion::HTTP_1_1)
    }

    pub fn with_version(version: HttpVersion) -> Self {
        let status = StatusCode::OK;
        Self {
            version,
            content_type: ContentType::Html,
            body: String::new(),
            status,
            message: status.reason_or_unknown().to_string(),
            headers: HeaderMap::new(),
            sent: false,
        }
    }

    /// Serializes `value` as the body, which has to be a JSON object or array
    pub fn set_json_body<T>(&mut self, value: &T) -> Result<&mut Self, InvalidArgument>
    where
        T: Serialize + ?Sized,
    {
        let body = serde_json::to_string(value)?;
        if !matches!(body.as_bytes().first(), Some(b'{' | b'[')) {
            let kind = json_kind(&body);
            log::debug!("rejected JSON body of kind {kind}");
            return Err(InvalidArgument::JsonBody(kind));
        }

        log::trace!("json body set ({} bytes)", body.len());
        self.content_type = ContentType::Json;
        self.body = body;
        Ok(self)
    }

    pub fn set_html_body(&mut self, content: impl HtmlContent) -> &mut Self {
        self.body = content.into_html();
        self.content_type = ContentType::Html;
        log::trace!("html body set ({} bytes)", self.body.len());
        self
    }

    /// Sets the status code, and resets the status message to the code's canonical reason
    pub fn set_status_code<C: Into<i64>>(&mut self, code: C) -> Result<&mut Self, InvalidArgument> {
        let status = StatusCode::new(code.into()).inspect_err(|err| log::debug!("{err}"))?;
        self.status = status;
        self.message = status.reason_or_unknown().to_string();
        log::trace!("status set to {} {}", self.status, self.message);
        Ok(self)
    }

    /// Merges `headers` into the existing ones, a name that is already present is overwritten
    pub fn set_headers<I, K, V>(&mut self, headers: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Display,
        V: Display,
    {
        self.headers.extend(headers.into_iter().map(|(name, value)| {
            log::trace!("header {name}: {value}");
            (
                HeaderName::from(name.to_string()),
                HeaderValue::from(value.to_string()),
            )
        }));
        self
    }

    pub fn set_status_message(&mut self, message: impl Display) -> &mut Self {
        self.message = message.to_string();
        self
    }

    pub fn version(&self) -> HttpVersion {
        self.version
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    pub fn status_message(&self) -> &str {
        &self.message
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn is_sent(&self) -> bool {
        self.sent
    }

    /// Writes the status line, the content type, the custom headers and then the body.
    ///
    /// The response counts as sent as soon as this is called, even when the transport fails
    /// halfway, so a second call is always [`ResponseError::AlreadySent`].
    pub fn send<T>(&mut self, transport: &mut T) -> Result<(), ResponseError>
    where
        T: Transport + ?Sized,
    {
        if self.sent {
            log::warn!("attempted to send a response twice");
            return Err(ResponseError::AlreadySent);
        }
        self.sent = true;

        log::debug!(
            "sending {} {} {} ({}, {} bytes)",
            self.version,
            self.status,
            self.message,
            self.content_type,
            self.body.len()
        );
        self.send_headers(transport)
            .and_then(|_| self.send_content(transport))
            .inspect_err(|err| log::warn!("failed to send response: {err}"))
    }

    fn send_headers<T>(&self, transport: &mut T) -> Result<(), ResponseError>
    where
        T: Transport + ?Sized,
    {
        transport.status_line(self.version, self.status.as_u16(), &self.message)?;

        // A custom Content-Type takes the place of the derived one
        match self
            .headers
            .iter()
            .find(|(name, _)| is_content_type(name.as_str()))
        {
            Some((name, value)) => transport.header(name.as_str(), value.as_str())?,
            None => transport.header(CONTENT_TYPE, &self.content_type.header_value())?,
        }
        for (name, value) in self
            .headers
            .iter()
            .filter(|(name, _)| !is_content_type(name.as_str()))
        {
            transport.header(name.as_str(), value.as_str())?;
        }
        Ok(())
    }

    fn send_content<T>(&self, transport: &mut T) -> Result<(), ResponseError>
    where
        T: Transport + ?Sized,
    {
        transport.body(self.body.as_bytes())?;
        Ok(())
    }

    /// Looks up the documentation for `code`, or for every known code
    pub fn explain(code: Option<i64>) -> Explanation {
        explain::explain(code)
    }
}

fn is_content_type(name: &str) -> bool {
    UniCase::new(name) == UniCase::new(CONTENT_TYPE)
}

/// The kind of a serialized JSON document, judged by its first byte
fn json_kind(json: &str) -> &'static str {
    match json.as_bytes().first() {
        Some(b'{') => "object",
        Some(b'[') => "array",
        Some(b'"') => "string",
        Some(b'n') => "null",
        Some(b't' | b'f') => "bool",
        _ => "number",
    }
}

pub(super) fn value_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde::Serialize;

    use super::*;
    use crate::http::response::UNKNOWN_STATUS;

    #[test]
    fn test_defaults() {
        let res = Response::new();
        assert_eq!(res.content_type(), ContentType::Html);
        assert_eq!(res.body(), "");
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.status_message(), "OK");
        assert!(res.headers().is_empty());
        assert_eq!(res.version(), HttpVersion::HTTP_1_1);
        assert!(!res.is_sent());
    }

    #[test]
    fn test_set_status_code_resets_message() {
        let mut res = Response::new();
        res.set_status_code(404).unwrap();
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(res.status_message(), "Not Found");

        res.set_status_code(418).unwrap();
        assert_eq!(res.status_code().as_u16(), 418);
        assert_eq!(res.status_message(), UNKNOWN_STATUS);

        res.set_status_message("I'm a teapot");
        assert_eq!(res.status_code().as_u16(), 418);
        assert_eq!(res.status_message(), "I'm a teapot");

        // Setting a code again overrides the custom message
        res.set_status_code(201u16).unwrap();
        assert_eq!(res.status_message(), "Created");
    }

    #[test]
    fn test_set_status_code_out_of_range_keeps_state() {
        let mut res = Response::new();
        res.set_status_code(503).unwrap().set_status_message("Down");
        for code in [-5i64, 0, 99, 600, 999] {
            let err = res.set_status_code(code).unwrap_err();
            assert!(matches!(err, InvalidArgument::StatusCode(c) if c == code));
            assert_eq!(res.status_code(), StatusCode::SERVICE_UNAVAILABLE);
            assert_eq!(res.status_message(), "Down");
        }
        assert_eq!(
            res.set_status_code(600).unwrap_err().to_string(),
            "invalid HTTP status code: 600 supplied"
        );
    }

    #[test]
    fn test_set_status_code_full_range() {
        let mut res = Response::new();
        for code in 100..600i64 {
            res.set_status_code(code).unwrap();
            assert_eq!(i64::from(res.status_code().as_u16()), code);
        }
    }

    #[test]
    fn test_set_json_body() {
        #[derive(Serialize)]
        struct User {
            name: &'static str,
            id: u32,
        }

        let mut res = Response::new();
        let mut map = BTreeMap::new();
        map.insert("a", 1);
        res.set_json_body(&map).unwrap();
        assert_eq!(res.content_type(), ContentType::Json);
        assert_eq!(res.body(), r#"{"a":1}"#);

        res.set_json_body(&User { name: "pradeep", id: 7 }).unwrap();
        assert_eq!(res.body(), r#"{"name":"pradeep","id":7}"#);

        res.set_json_body(&[1, 2, 3]).unwrap();
        assert_eq!(res.body(), "[1,2,3]");

        let empty: Vec<u8> = Vec::new();
        res.set_json_body(&empty).unwrap();
        assert_eq!(res.body(), "[]");
    }

    #[test]
    fn test_set_json_body_wide_numbers() {
        let mut res = Response::new();
        res.set_json_body(&[u128::MAX]).unwrap();
        assert_eq!(res.content_type(), ContentType::Json);
        assert_eq!(res.body(), "[340282366920938463463374607431768211455]");
    }

    #[test]
    fn test_set_json_body_rejects_scalars() {
        let mut res = Response::new();
        res.set_html_body("<p>kept</p>");

        assert!(matches!(
            res.set_json_body("text"),
            Err(InvalidArgument::JsonBody("string"))
        ));
        assert!(matches!(
            res.set_json_body(&42),
            Err(InvalidArgument::JsonBody("number"))
        ));
        assert!(matches!(
            res.set_json_body(&()),
            Err(InvalidArgument::JsonBody("null"))
        ));
        assert!(matches!(
            res.set_json_body(&true),
            Err(InvalidArgument::JsonBody("bool"))
        ));
        assert_eq!(res.content_type(), ContentType::Html);
        assert_eq!(res.body(), "<p>kept</p>");
    }

    #[test]
    fn test_set_json_body_rejects_unserializable() {
        let mut map = BTreeMap::new();
        map.insert(vec![1u8], "non-string key");

        let mut res = Response::new();
        assert!(matches!(
            res.set_json_body(&map),
            Err(InvalidArgument::Json(_))
        ));
        assert_eq!(res.body(), "");
    }

    #[test]
    fn test_set_html_body() {
        let mut res = Response::new();
        res.set_json_body(&[1]).unwrap();
        res.set_html_body("<p>x</p>");
        assert_eq!(res.content_type(), ContentType::Html);
        assert_eq!(res.body(), "<p>x</p>");

        res.set_html_body(404);
        assert_eq!(res.body(), "404");
        res.set_html_body(2.5f64);
        assert_eq!(res.body(), "2.5");
        res.set_html_body(String::from("owned"));
        assert_eq!(res.body(), "owned");
    }

    #[test]
    fn test_set_headers_merges() {
        let mut res = Response::new();
        res.set_headers([("X-A", "1")]).set_headers([("X-B", "2")]);
        assert_eq!(res.headers().len(), 2);
        assert_eq!(res.headers().get("X-A").unwrap(), "1");
        assert_eq!(res.headers().get("X-B").unwrap(), "2");

        res.set_headers([("X-A", 3)]);
        assert_eq!(res.headers().len(), 2);
        assert_eq!(res.headers().get("X-A").unwrap(), "3");
    }

    #[test]
    fn test_explain_delegates() {
        assert!(Response::explain(Some(404)).is_found());
        assert!(!Response::explain(Some(999)).is_found());
        assert_eq!(Response::explain(None).entries().len(), 11);
    }
}
