#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpVersion {
    HTTP_1_0,
    #[default]
    HTTP_1_1,
}

impl HttpVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HTTP_1_0 => "HTTP/1.0",
            Self::HTTP_1_1 => "HTTP/1.1",
        }
    }
}

impl std::fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
