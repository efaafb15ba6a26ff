//! pawsearch-core - Core types, traits and browsing state for the
//! dog-adoption catalog client.
//!
//! Backends implement [`Service`] and [`Session`]; front ends drive a
//! [`browse::CatalogBrowser`] with whichever session they hold.

pub mod browse;
pub mod credentials;
pub mod error;
pub mod tokens;
pub mod traits;
pub mod types;

pub use browse::{CatalogBrowser, FetchOutcome, FilterState, Notice, PageCursor, SelectionSet};
pub use credentials::Credentials;
pub use error::{Error, ErrorClass};
pub use tokens::AuthToken;
pub use traits::{Service, Session};
pub use types::{
    Cursor, DEFAULT_PAGE_SIZE, DogId, DogRecord, SearchRequest, SearchResults, ServiceUrl,
    SortOrder,
};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
