//! Breed filter and sort order.

use crate::types::{SearchRequest, SortOrder};

/// User-selected breed filter and sort direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Selected breed; empty means unfiltered.
    pub breed: String,
    /// Direction of the breed sort.
    pub sort: SortOrder,
}

impl FilterState {
    /// The breed to filter on, or `None` when unfiltered.
    pub fn breed_filter(&self) -> Option<&str> {
        if self.breed.is_empty() {
            None
        } else {
            Some(&self.breed)
        }
    }

    /// First-page search for this filter.
    pub fn first_page(&self, size: u32) -> SearchRequest {
        SearchRequest::FirstPage {
            breed: self.breed_filter().map(str::to_string),
            sort: self.sort,
            size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_breed_is_unfiltered() {
        let filter = FilterState::default();
        assert_eq!(
            filter.first_page(6),
            SearchRequest::FirstPage {
                breed: None,
                sort: SortOrder::Ascending,
                size: 6,
            }
        );
    }

    #[test]
    fn breed_and_sort_carry_into_request() {
        let filter = FilterState {
            breed: "Beagle".to_string(),
            sort: SortOrder::Descending,
        };
        assert_eq!(
            filter.first_page(6),
            SearchRequest::FirstPage {
                breed: Some("Beagle".to_string()),
                sort: SortOrder::Descending,
                size: 6,
            }
        );
    }
}
