//! Catalog browsing: filter, pagination, favorites and match.

mod browser;
mod filter;
mod notice;
mod pagination;
mod selection;

pub use browser::{CatalogBrowser, FetchOutcome};
pub use filter::FilterState;
pub use notice::Notice;
pub use pagination::PageCursor;
pub use selection::{FAVORITE_LABEL, SelectionSet, UNFAVORITE_LABEL};
