//! Test transports for exercising response producers without a socket

use uhsapi::{
    http::HttpVersion,
    transport::{Transport, TransportError},
};

/// A single call made against a [`RecordingTransport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    StatusLine {
        version: HttpVersion,
        code: u16,
        reason: String,
    },
    Header {
        name: String,
        value: String,
    },
    Body(Vec<u8>),
}

impl Event {
    pub fn status_line(code: u16, reason: &str) -> Self {
        Self::StatusLine {
            version: HttpVersion::HTTP_1_1,
            code,
            reason: reason.to_string(),
        }
    }

    pub fn header(name: &str, value: &str) -> Self {
        Self::Header {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    pub fn body(body: &str) -> Self {
        Self::Body(Vec::from(body.as_bytes()))
    }
}

/// Records every call in order, and accepts everything
#[derive(Debug, Default)]
pub struct RecordingTransport {
    events: Vec<Event>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.events.iter().filter_map(|event| match event {
            Event::Header { name, value } => Some((name.as_str(), value.as_str())),
            _ => None,
        })
    }
}

impl Transport for RecordingTransport {
    fn status_line(
        &mut self,
        version: HttpVersion,
        code: u16,
        reason: &str,
    ) -> Result<(), TransportError> {
        self.events.push(Event::StatusLine {
            version,
            code,
            reason: reason.to_string(),
        });
        Ok(())
    }

    fn header(&mut self, name: &str, value: &str) -> Result<(), TransportError> {
        self.events.push(Event::Header {
            name: name.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    fn body(&mut self, body: &[u8]) -> Result<(), TransportError> {
        self.events.push(Event::Body(Vec::from(body)));
        Ok(())
    }
}

/// A transport whose connection has already gone away
#[derive(Debug, Default)]
pub struct ClosedTransport {
    pub calls: usize,
}

impl Transport for ClosedTransport {
    fn status_line(&mut self, _: HttpVersion, _: u16, _: &str) -> Result<(), TransportError> {
        self.calls += 1;
        Err(TransportError::Closed)
    }

    fn header(&mut self, _: &str, _: &str) -> Result<(), TransportError> {
        self.calls += 1;
        Err(TransportError::Closed)
    }

    fn body(&mut self, _: &[u8]) -> Result<(), TransportError> {
        self.calls += 1;
        Err(TransportError::Closed)
    }
}
