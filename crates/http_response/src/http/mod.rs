pub mod explain;
pub mod header;
pub mod response;

pub use uhsapi::http::HttpVersion;
