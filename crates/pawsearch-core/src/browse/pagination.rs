//! Neighbour-page cursors.

use crate::types::{Cursor, SearchResults};

/// Cursors for the pages around the displayed one.
///
/// An absent cursor means the boundary in that direction has been reached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageCursor {
    pub next: Option<Cursor>,
    pub prev: Option<Cursor>,
}

impl PageCursor {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn has_prev(&self) -> bool {
        self.prev.is_some()
    }
}

impl From<&SearchResults> for PageCursor {
    /// Empty tokens count as absent.
    fn from(results: &SearchResults) -> Self {
        let present = |c: &Option<Cursor>| c.clone().filter(|c| !c.as_str().is_empty());
        Self {
            next: present(&results.next),
            prev: present(&results.prev),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_token_is_absent() {
        let results = SearchResults {
            next: Some(Cursor::new("")),
            prev: Some(Cursor::new("/dogs/search?from=0")),
            ..Default::default()
        };
        let cursor = PageCursor::from(&results);
        assert!(!cursor.has_next());
        assert!(cursor.has_prev());
    }
}
