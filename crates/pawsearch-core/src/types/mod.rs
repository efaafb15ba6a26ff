//! Catalog data types.
//!
//! Identifier and URL types enforce their invariants at construction time.
//! Cursors are never validated.

mod cursor;
mod dog;
mod dog_id;
mod search;
mod service_url;

pub use cursor::Cursor;
pub use dog::DogRecord;
pub use dog_id::DogId;
pub use search::{DEFAULT_PAGE_SIZE, SORT_FIELD, SearchRequest, SearchResults, SortOrder};
pub use service_url::ServiceUrl;
