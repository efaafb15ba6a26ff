//! Catalog browsing state machine.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, instrument, warn};

use crate::error::PreconditionError;
use crate::traits::Session;
use crate::types::{Cursor, DEFAULT_PAGE_SIZE, DogId, DogRecord, SearchRequest, SortOrder};
use crate::Result;

use super::{FilterState, PageCursor, SelectionSet};

/// Result of a page fetch that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The fetched page is now displayed.
    Applied,
    /// A later fetch was started before this one finished; its result was dropped.
    Superseded,
}

/// Browsing state for one logged-in user: filter, displayed page, cursors and
/// favorites.
///
/// Every method takes `&self`, so fetches may overlap (for example a sort
/// change issued while a Next is still in flight). Page fetches are ticketed
/// at the moment they start, and only the most recently started fetch may
/// write the displayed page and cursors. Locks are never held across a
/// service call.
///
/// Remote operations receive the [`Session`] explicitly.
///
/// # Example
///
/// ```no_run
/// use pawsearch_core::browse::CatalogBrowser;
/// use pawsearch_core::{Session, SortOrder};
///
/// # async fn example(session: &impl Session) -> pawsearch_core::Result<()> {
/// let browser = CatalogBrowser::new();
/// browser.set_breed_filter(session, "Beagle").await?;
/// browser.set_sort_order(session, SortOrder::Descending).await?;
/// if browser.has_next() {
///     browser.go_next(session).await?;
/// }
/// for dog in browser.page() {
///     println!("{} ({})", dog.name, browser.favorite_label(&dog.id));
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CatalogBrowser {
    state: RwLock<BrowseState>,
    page_size: u32,
}

#[derive(Debug, Default)]
struct BrowseState {
    filter: FilterState,
    page: Vec<DogRecord>,
    cursor: PageCursor,
    total: Option<u64>,
    selection: SelectionSet,
    breeds: Vec<String>,
    /// Ticket of the most recently started page fetch.
    issued: u64,
}

struct LoadedPage {
    dogs: Vec<DogRecord>,
    cursor: PageCursor,
    total: Option<u64>,
}

impl Default for CatalogBrowser {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogBrowser {
    /// Create a browser with the default page size.
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// Create a browser requesting `page_size` dogs per first page.
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            state: RwLock::new(BrowseState::default()),
            page_size,
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    fn read(&self) -> RwLockReadGuard<'_, BrowseState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BrowseState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Current filter.
    pub fn filter(&self) -> FilterState {
        self.read().filter.clone()
    }

    /// Dogs on the displayed page, in the service's sort order.
    pub fn page(&self) -> Vec<DogRecord> {
        self.read().page.clone()
    }

    /// Cursors around the displayed page.
    pub fn cursor(&self) -> PageCursor {
        self.read().cursor.clone()
    }

    /// Total matches reported with the displayed page.
    pub fn total(&self) -> Option<u64> {
        self.read().total
    }

    /// Whether the Next control is enabled.
    pub fn has_next(&self) -> bool {
        self.read().cursor.has_next()
    }

    /// Whether the Prev control is enabled.
    pub fn has_prev(&self) -> bool {
        self.read().cursor.has_prev()
    }

    /// Breed names loaded by [`load_breeds`](Self::load_breeds).
    pub fn breeds(&self) -> Vec<String> {
        self.read().breeds.clone()
    }

    pub fn is_favorite(&self, id: &DogId) -> bool {
        self.read().selection.contains(id)
    }

    /// Favorite button label for `id`.
    pub fn favorite_label(&self, id: &DogId) -> &'static str {
        self.read().selection.label(id)
    }

    /// Snapshot of the selected ids.
    pub fn favorites(&self) -> Vec<DogId> {
        self.read().selection.to_vec()
    }

    /// Snapshot of the selection.
    pub fn selection(&self) -> SelectionSet {
        self.read().selection.clone()
    }

    /// Whether the match control is enabled.
    pub fn can_request_match(&self) -> bool {
        !self.read().selection.is_empty()
    }

    // ------------------------------------------------------------------
    // Filter and fetch
    // ------------------------------------------------------------------

    /// Load the breed list offered by the filter.
    #[instrument(skip(self, session))]
    pub async fn load_breeds<S>(&self, session: &S) -> Result<Vec<String>>
    where
        S: Session + ?Sized,
    {
        let breeds = session.list_breeds().await?;
        debug!(count = breeds.len(), "Loaded breeds");
        self.write().breeds = breeds.clone();
        Ok(breeds)
    }

    /// Filter on `breed` (empty clears the filter) and fetch the first page.
    #[instrument(skip(self, session))]
    pub async fn set_breed_filter<S>(&self, session: &S, breed: &str) -> Result<FetchOutcome>
    where
        S: Session + ?Sized,
    {
        let (ticket, request) = self.begin_fetch(|state, size| {
            state.filter.breed = breed.trim().to_string();
            state.filter.first_page(size)
        });
        self.complete_fetch(session, ticket, request).await
    }

    /// Sort in `order` and fetch the first page.
    #[instrument(skip(self, session))]
    pub async fn set_sort_order<S>(&self, session: &S, order: SortOrder) -> Result<FetchOutcome>
    where
        S: Session + ?Sized,
    {
        let (ticket, request) = self.begin_fetch(|state, size| {
            state.filter.sort = order;
            state.filter.first_page(size)
        });
        self.complete_fetch(session, ticket, request).await
    }

    /// Replace breed and sort together and fetch the first page once.
    #[instrument(skip(self, session))]
    pub async fn set_filter<S>(&self, session: &S, filter: FilterState) -> Result<FetchOutcome>
    where
        S: Session + ?Sized,
    {
        let (ticket, request) = self.begin_fetch(|state, size| {
            state.filter = FilterState {
                breed: filter.breed.trim().to_string(),
                sort: filter.sort,
            };
            state.filter.first_page(size)
        });
        self.complete_fetch(session, ticket, request).await
    }

    /// Flip the sort direction and fetch the first page.
    pub async fn toggle_sort_order<S>(&self, session: &S) -> Result<FetchOutcome>
    where
        S: Session + ?Sized,
    {
        let order = self.read().filter.sort.toggled();
        self.set_sort_order(session, order).await
    }

    /// Fetch the first page for the current filter.
    pub async fn refresh<S>(&self, session: &S) -> Result<FetchOutcome>
    where
        S: Session + ?Sized,
    {
        self.fetch_page(session, None).await
    }

    /// Fetch a page.
    ///
    /// Without a cursor the first page for the current filter is requested.
    /// With one, the cursor is sent verbatim and the filter is not consulted.
    /// On failure the displayed page and cursors are left as they were.
    #[instrument(skip(self, session))]
    pub async fn fetch_page<S>(&self, session: &S, cursor: Option<&Cursor>) -> Result<FetchOutcome>
    where
        S: Session + ?Sized,
    {
        let (ticket, request) = self.begin_fetch(|state, size| match cursor {
            Some(cursor) => SearchRequest::Cursor(cursor.clone()),
            None => state.filter.first_page(size),
        });
        self.complete_fetch(session, ticket, request).await
    }

    // ------------------------------------------------------------------
    // Pagination
    // ------------------------------------------------------------------

    /// Fetch the page after the displayed one.
    ///
    /// # Errors
    ///
    /// [`PreconditionError::NoNextPage`] if the service reported no next page.
    pub async fn go_next<S>(&self, session: &S) -> Result<FetchOutcome>
    where
        S: Session + ?Sized,
    {
        let next = self.read().cursor.next.clone();
        let next = next.ok_or(PreconditionError::NoNextPage)?;
        self.fetch_page(session, Some(&next)).await
    }

    /// Fetch the page before the displayed one.
    ///
    /// # Errors
    ///
    /// [`PreconditionError::NoPrevPage`] if the service reported no previous page.
    pub async fn go_prev<S>(&self, session: &S) -> Result<FetchOutcome>
    where
        S: Session + ?Sized,
    {
        let prev = self.read().cursor.prev.clone();
        let prev = prev.ok_or(PreconditionError::NoPrevPage)?;
        self.fetch_page(session, Some(&prev)).await
    }

    // ------------------------------------------------------------------
    // Selection and match
    // ------------------------------------------------------------------

    /// Flip `id`'s favorite membership. Returns the new membership.
    pub fn toggle_favorite(&self, id: DogId) -> bool {
        let selected = self.write().selection.toggle(id.clone());
        debug!(%id, selected, "Toggled favorite");
        selected
    }

    /// Ask the service for a match among the favorites.
    ///
    /// The selection, page and cursors are not modified, whatever the outcome.
    ///
    /// # Errors
    ///
    /// [`PreconditionError::NoFavorites`] without a network call if nothing is
    /// selected; otherwise any error from the service.
    #[instrument(skip(self, session))]
    pub async fn request_match<S>(&self, session: &S) -> Result<DogId>
    where
        S: Session + ?Sized,
    {
        let ids = self.favorites();
        if ids.is_empty() {
            return Err(PreconditionError::NoFavorites.into());
        }

        debug!(count = ids.len(), "Requesting match");
        let matched = session.match_dogs(&ids).await?;
        debug!(%matched, "Match received");
        Ok(matched)
    }

    /// Forget everything, including favorites. Used when the session ends.
    ///
    /// Fetches still in flight are discarded when they complete.
    pub fn reset(&self) {
        let mut state = self.write();
        let issued = state.issued;
        *state = BrowseState {
            issued: issued + 1,
            ..BrowseState::default()
        };
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Apply `prepare` and take a ticket under a single lock.
    fn begin_fetch<F>(&self, prepare: F) -> (u64, SearchRequest)
    where
        F: FnOnce(&mut BrowseState, u32) -> SearchRequest,
    {
        let mut state = self.write();
        let request = prepare(&mut state, self.page_size);
        state.issued += 1;
        (state.issued, request)
    }

    async fn complete_fetch<S>(
        &self,
        session: &S,
        ticket: u64,
        request: SearchRequest,
    ) -> Result<FetchOutcome>
    where
        S: Session + ?Sized,
    {
        debug!(ticket, ?request, "Fetching page");
        let loaded = load_page(session, &request).await;

        let mut state = self.write();
        if state.issued != ticket {
            debug!(
                ticket,
                latest = state.issued,
                ok = loaded.is_ok(),
                "Discarding superseded page fetch"
            );
            return Ok(FetchOutcome::Superseded);
        }

        let loaded = loaded?;
        debug!(ticket, dogs = loaded.dogs.len(), "Page applied");
        state.page = loaded.dogs;
        state.cursor = loaded.cursor;
        state.total = loaded.total;
        Ok(FetchOutcome::Applied)
    }
}

/// Run both phases of a page fetch: search for ids, then resolve them.
async fn load_page<S>(session: &S, request: &SearchRequest) -> Result<LoadedPage>
where
    S: Session + ?Sized,
{
    let results = session.search_dogs(request).await?;

    let dogs = if results.result_ids.is_empty() {
        Vec::new()
    } else {
        let records = session.fetch_dogs(&results.result_ids).await?;
        order_by_ids(&results.result_ids, records)
    };

    Ok(LoadedPage {
        dogs,
        cursor: PageCursor::from(&results),
        total: results.total,
    })
}

/// Arrange records in the order the search returned their ids.
fn order_by_ids(ids: &[DogId], records: Vec<DogRecord>) -> Vec<DogRecord> {
    let mut by_id: HashMap<DogId, DogRecord> =
        records.into_iter().map(|r| (r.id.clone(), r)).collect();

    let mut ordered = Vec::with_capacity(ids.len());
    for id in ids {
        match by_id.remove(id) {
            Some(record) => ordered.push(record),
            None => warn!(%id, "Batch lookup did not return a searched dog"),
        }
    }

    if !by_id.is_empty() {
        warn!(extra = by_id.len(), "Batch lookup returned dogs that were not searched for");
    }

    ordered
}
