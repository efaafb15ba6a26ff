//! Search request and response types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

use super::{Cursor, DogId};

/// Number of dogs requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 6;

/// Field the catalog is sorted by. The sort key is not user-selectable.
pub const SORT_FIELD: &str = "breed";

/// Sort direction for the breed sort key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    /// A to Z.
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    /// Z to A.
    #[serde(rename = "desc")]
    Descending,
}

impl SortOrder {
    /// Short form used on the wire and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }

    /// The `sort` query parameter value, e.g. `breed:asc`.
    pub fn as_param(self) -> String {
        format!("{}:{}", SORT_FIELD, self.as_str())
    }

    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            _ => Err(InvalidInputError::SortOrder {
                value: s.to_string(),
            }
            .into()),
        }
    }
}

/// What to ask the search endpoint for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchRequest {
    /// A first page built from the current filter.
    FirstPage {
        /// Breed to restrict to; `None` means unfiltered.
        breed: Option<String>,
        /// Sort direction on the breed key.
        sort: SortOrder,
        /// Page size.
        size: u32,
    },
    /// A neighbouring page, addressed by a cursor the service issued earlier.
    Cursor(Cursor),
}

impl SearchRequest {
    /// Returns the cursor if this is a cursor request.
    pub fn cursor(&self) -> Option<&Cursor> {
        match self {
            SearchRequest::Cursor(cursor) => Some(cursor),
            SearchRequest::FirstPage { .. } => None,
        }
    }
}

/// Output of the search endpoint: one page of ids plus neighbour cursors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    /// Ids on this page, in the service's sort order.
    pub result_ids: Vec<DogId>,
    /// Total number of dogs matching the query, if reported.
    #[serde(default)]
    pub total: Option<u64>,
    /// Cursor for the following page.
    #[serde(default)]
    pub next: Option<Cursor>,
    /// Cursor for the preceding page.
    #[serde(default)]
    pub prev: Option<Cursor>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_param_uses_breed_key() {
        assert_eq!(SortOrder::Ascending.as_param(), "breed:asc");
        assert_eq!(SortOrder::Descending.as_param(), "breed:desc");
    }

    #[test]
    fn sort_order_parses_short_and_long_forms() {
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Ascending);
        assert_eq!("DESC".parse::<SortOrder>().unwrap(), SortOrder::Descending);
        assert_eq!(
            "descending".parse::<SortOrder>().unwrap(),
            SortOrder::Descending
        );
        assert!("sideways".parse::<SortOrder>().is_err());
    }

    #[test]
    fn toggle_flips_direction() {
        assert_eq!(SortOrder::Ascending.toggled(), SortOrder::Descending);
        assert_eq!(SortOrder::Ascending.toggled().toggled(), SortOrder::Ascending);
    }

    #[test]
    fn search_results_decode_null_cursors() {
        let results: SearchResults = serde_json::from_value(serde_json::json!({
            "resultIds": ["a", "b"],
            "total": 2,
            "next": "/dogs/search?size=6&from=6",
            "prev": null
        }))
        .unwrap();

        assert_eq!(results.result_ids.len(), 2);
        assert_eq!(results.total, Some(2));
        assert_eq!(
            results.next.as_ref().map(Cursor::as_str),
            Some("/dogs/search?size=6&from=6")
        );
        assert!(results.prev.is_none());
    }
}
