//! pawsearch-file - Filesystem-backed adoption service.
//!
//! Serves a local `dogs.json` catalog through the same [`Service`] and
//! [`Session`] traits as the network backend, for offline use and tests.
//!
//! [`Service`]: pawsearch_core::Service
//! [`Session`]: pawsearch_core::Session

mod service;
mod session;
mod store;

pub use service::FileService;
pub use session::FileSession;
pub use store::FileStore;
