use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidAsciiError;

impl fmt::Display for InvalidAsciiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid ascii")
    }
}

impl std::error::Error for InvalidAsciiError {}

pub fn bytes_are_ascii(bytes: &[u8]) -> Result<(), InvalidAsciiError> {
    if bytes.iter().all(|&b| b < 0x80) {
        Ok(())
    } else {
        Err(InvalidAsciiError)
    }
}

/// A token character
/// SPEC: RFC 9110 - 5.6.2. Tokens
/// ABNF: tchar = "!" / "#" / "$" / "%" / "&" / "'" / "*" / "+" / "-" / "." / "^" / "_" / "`" / "|" / "~" / DIGIT / ALPHA
pub fn is_tchar(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'!' | b'#'
                | b'$'
                | b'%'
                | b'&'
                | b'\''
                | b'*'
                | b'+'
                | b'-'
                | b'.'
                | b'^'
                | b'_'
                | b'`'
                | b'|'
                | b'~'
        )
}

#[repr(transparent)]
#[derive(PartialEq, Eq, Hash)]
pub struct AsciiStr([u8]);

impl fmt::Debug for AsciiStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.as_str())
    }
}

impl fmt::Display for AsciiStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsciiStr {
    pub fn from_str(s: &str) -> Result<&AsciiStr, InvalidAsciiError> {
        Self::from_ascii(s.as_bytes())
    }

    pub fn from_ascii(bytes: &[u8]) -> Result<&AsciiStr, InvalidAsciiError> {
        bytes_are_ascii(bytes)?;
        // SAFETY: We checked that all bytes are valid
        Ok(unsafe { Self::from_ascii_unchecked(bytes) })
    }

    pub const unsafe fn from_ascii_unchecked(bytes: &[u8]) -> &AsciiStr {
        unsafe { std::mem::transmute(bytes) }
    }

    pub fn as_str(&self) -> &str {
        // SAFETY: valid ascii is valid UTF-8
        unsafe { std::str::from_utf8_unchecked(&self.0) }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Whether the string is a non-empty token, the grammar of field names
    pub fn is_token(&self) -> bool {
        !self.0.is_empty() && self.0.iter().copied().all(is_tchar)
    }
}

pub trait AsAsciiStr {
    fn as_ascii_str(&self) -> Result<&AsciiStr, InvalidAsciiError>;
}

impl AsAsciiStr for &'_ str {
    fn as_ascii_str(&self) -> Result<&AsciiStr, InvalidAsciiError> {
        AsciiStr::from_str(self)
    }
}

impl AsAsciiStr for &'_ [u8] {
    fn as_ascii_str(&self) -> Result<&AsciiStr, InvalidAsciiError> {
        AsciiStr::from_ascii(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_str() {
        assert_eq!("X-Powered".as_ascii_str().unwrap().as_str(), "X-Powered");
        assert_eq!("X-Pöwered".as_ascii_str(), Err(InvalidAsciiError));
        let bytes: &[u8] = b"Content-Type";
        assert_eq!(bytes.as_ascii_str().unwrap().as_bytes(), b"Content-Type");
    }

    #[test]
    fn test_is_token() {
        let cases: &[(&str, bool)] = &[
            ("X-Powered", true),
            ("content-type", true),
            ("x_custom.v2~", true),
            ("", false),
            ("Bad Header", false),
            ("Bad:Header", false),
            ("Bad\r\nHeader", false),
        ];
        for (name, token) in cases {
            assert_eq!(
                AsciiStr::from_str(name).unwrap().is_token(),
                *token,
                "{name:?}"
            );
        }
    }
}
