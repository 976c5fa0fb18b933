//! An HTTP/1.1 serializer implementing [`Transport`]

use bytes::{BufMut, Bytes, BytesMut};
use memchr::memchr2;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use uhsapi::{
    ascii::AsAsciiStr,
    http::HttpVersion,
    transport::{Transport, TransportError},
};
use unicase::UniCase;

use crate::http::header::{CONTENT_LENGTH, CONTENT_TYPE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    StatusLine,
    Headers,
    Body,
}

/// Buffers a response in wire format.
///
/// The head and the body are kept apart until [`WireTransport::into_bytes`], so a
/// `Content-Length` can be added when the caller did not set one, or checked when they did.
#[derive(Debug)]
pub struct WireTransport {
    head: BytesMut,
    body: BytesMut,
    stage: Stage,
    content_length: Option<u64>,
    has_content_type: bool,
}

impl Default for WireTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl WireTransport {
    const HEAD_SIZE: usize = 256;

    pub fn new() -> Self {
        Self {
            head: BytesMut::with_capacity(Self::HEAD_SIZE),
            body: BytesMut::new(),
            stage: Stage::StatusLine,
            content_length: None,
            has_content_type: false,
        }
    }

    /// Finishes the head and returns the complete response
    pub fn into_bytes(mut self) -> Result<Bytes, TransportError> {
        if self.stage == Stage::StatusLine {
            return Err(TransportError::OutOfOrder);
        }
        let actual = self.body.len() as u64;
        match self.content_length {
            Some(declared) if declared != actual => {
                return Err(TransportError::ContentLengthMismatch { declared, actual });
            }
            Some(_) => {}
            None => self.put_header(CONTENT_LENGTH, &actual.to_string()),
        }
        self.head.put_slice(b"\r\n");
        self.head.unsplit(self.body);
        Ok(self.head.freeze())
    }

    /// Writes the complete response to `writer`
    pub async fn flush_to<W>(self, writer: &mut W) -> Result<(), TransportError>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let bytes = self.into_bytes()?;
        writer.write_all(&bytes).await?;
        writer.flush().await?;
        log::trace!("flushed {} bytes", bytes.len());
        Ok(())
    }

    fn put_header(&mut self, name: &str, value: &str) {
        self.head.put_slice(name.as_bytes());
        self.head.put_slice(b": ");
        self.head.put_slice(value.as_bytes());
        self.head.put_slice(b"\r\n");
    }
}

/// Field values and reason phrases cannot carry line breaks
fn check_line(value: &str) -> Result<(), TransportError> {
    match memchr2(b'\r', b'\n', value.as_bytes()) {
        Some(_) => Err(TransportError::InvalidHeader(value.escape_debug().to_string())),
        None => Ok(()),
    }
}

impl Transport for WireTransport {
    fn status_line(
        &mut self,
        version: HttpVersion,
        code: u16,
        reason: &str,
    ) -> Result<(), TransportError> {
        match self.stage {
            Stage::StatusLine => {}
            Stage::Headers => return Err(TransportError::OutOfOrder),
            Stage::Body => return Err(TransportError::HeadersSent),
        }
        check_line(reason)?;

        self.head.put_slice(version.as_str().as_bytes());
        self.head.put_u8(b' ');
        self.head.put_slice(code.to_string().as_bytes());
        self.head.put_u8(b' ');
        self.head.put_slice(reason.as_bytes());
        self.head.put_slice(b"\r\n");
        self.stage = Stage::Headers;
        Ok(())
    }

    fn header(&mut self, name: &str, value: &str) -> Result<(), TransportError> {
        match self.stage {
            Stage::StatusLine => return Err(TransportError::OutOfOrder),
            Stage::Headers => {}
            Stage::Body => return Err(TransportError::HeadersSent),
        }
        if !name.as_ascii_str()?.is_token() {
            return Err(TransportError::InvalidHeader(name.escape_debug().to_string()));
        }
        check_line(value)?;

        // Both fields only allow a single value
        let name_ci = UniCase::new(name);
        if name_ci == UniCase::new(CONTENT_TYPE) {
            if self.has_content_type {
                return Err(TransportError::DuplicateHeader(name.to_string()));
            }
            self.has_content_type = true;
        } else if name_ci == UniCase::new(CONTENT_LENGTH) {
            if self.content_length.is_some() {
                return Err(TransportError::DuplicateHeader(name.to_string()));
            }
            let len = value
                .trim()
                .parse()
                .map_err(|_| TransportError::InvalidHeader(format!("{name}: {value}")))?;
            self.content_length = Some(len);
        }
        self.put_header(name, value);
        Ok(())
    }

    fn body(&mut self, body: &[u8]) -> Result<(), TransportError> {
        if self.stage == Stage::StatusLine {
            return Err(TransportError::OutOfOrder);
        }
        self.stage = Stage::Body;
        self.body.put_slice(body);
        Ok(())
    }
}
