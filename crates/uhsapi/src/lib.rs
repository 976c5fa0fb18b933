//! UHS API (Universal Http Server API)
//! is a project which aims to create a universal facade API for http servers,
//! allowing response producers to write to many server backends,
//! such as carbon_http_server, actix, etc... through a single [`transport::Transport`] trait.

pub mod ascii;
pub mod http;
pub mod transport;
