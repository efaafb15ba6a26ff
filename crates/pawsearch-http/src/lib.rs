//! pawsearch-http - Network-backed adoption service implementation.

mod config;
mod http;
mod service;
mod session;

pub use config::{DEFAULT_TIMEOUT, HttpConfig};
pub use service::HttpService;
pub use session::HttpSession;
