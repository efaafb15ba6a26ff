//! Filesystem storage for the file-backed service.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};
use url::form_urlencoded;

use pawsearch_core::Result;
use pawsearch_core::error::{Error, ProtocolError, TransportError};
use pawsearch_core::{Cursor, DogId, DogRecord, SearchRequest, SearchResults, SortOrder};

/// Path prefix of every cursor this store issues.
const SEARCH_PATH: &str = "/dogs/search";

fn map_io(err: std::io::Error) -> Error {
    Error::Transport(TransportError::Io {
        message: err.to_string(),
    })
}

fn bad_request(message: impl Into<String>) -> Error {
    Error::Protocol(ProtocolError::new(400, Some(message.into())))
}

/// A resolved search: which slice of which ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PageQuery {
    pub breed: Option<String>,
    pub sort: SortOrder,
    pub size: u32,
    pub from: usize,
}

impl PageQuery {
    pub(crate) fn from_request(request: &SearchRequest) -> Result<Self> {
        match request {
            SearchRequest::FirstPage { breed, sort, size } => Ok(Self {
                breed: breed.clone(),
                sort: *sort,
                size: *size,
                from: 0,
            }),
            SearchRequest::Cursor(cursor) => Self::from_cursor(cursor),
        }
    }

    fn from_cursor(cursor: &Cursor) -> Result<Self> {
        let query = cursor
            .as_str()
            .strip_prefix(SEARCH_PATH)
            .and_then(|rest| rest.strip_prefix('?'))
            .ok_or_else(|| bad_request(format!("unrecognized cursor '{cursor}'")))?;

        let mut page = Self {
            breed: None,
            sort: SortOrder::default(),
            size: pawsearch_core::DEFAULT_PAGE_SIZE,
            from: 0,
        };

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "breeds" => page.breed = Some(value.into_owned()),
                "size" => {
                    page.size = value
                        .parse()
                        .map_err(|_| bad_request(format!("invalid size '{value}'")))?
                }
                "from" => {
                    page.from = value
                        .parse()
                        .map_err(|_| bad_request(format!("invalid from '{value}'")))?
                }
                "sort" => {
                    let direction = value
                        .strip_prefix("breed:")
                        .ok_or_else(|| bad_request(format!("invalid sort '{value}'")))?;
                    page.sort = direction
                        .parse()
                        .map_err(|_| bad_request(format!("invalid sort '{value}'")))?;
                }
                _ => {}
            }
        }

        Ok(page)
    }

    /// The cursor addressing this query at offset `from`.
    fn cursor_at(&self, from: usize) -> Cursor {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("size", &self.size.to_string());
        query.append_pair("from", &from.to_string());
        query.append_pair("sort", &self.sort.as_param());
        if let Some(breed) = &self.breed {
            query.append_pair("breeds", breed);
        }
        Cursor::new(format!("{}?{}", SEARCH_PATH, query.finish()))
    }
}

/// Filesystem-backed catalog data.
///
/// The catalog is a single `dogs.json` file holding an array of dog
/// records. It is re-read on every call.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a new file store at the given root directory.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn dogs_path(&self) -> PathBuf {
        self.root.join("dogs.json")
    }

    /// Replace the catalog contents.
    pub fn write_dogs(&self, dogs: &[DogRecord]) -> Result<()> {
        fs::create_dir_all(&self.root).map_err(map_io)?;
        let json = serde_json::to_string_pretty(dogs).map_err(|e| TransportError::Io {
            message: e.to_string(),
        })?;
        fs::write(self.dogs_path(), json).map_err(map_io)
    }

    /// Load the catalog. A missing file is an empty catalog.
    pub fn read_dogs(&self) -> Result<Vec<DogRecord>> {
        let path = self.dogs_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let json = fs::read_to_string(&path).map_err(map_io)?;
        serde_json::from_str(&json).map_err(|e| {
            Error::Transport(TransportError::Io {
                message: format!("{}: {}", path.display(), e),
            })
        })
    }

    /// Distinct breed names in lexical order.
    pub fn breeds(&self) -> Result<Vec<String>> {
        let breeds: BTreeSet<String> = self.read_dogs()?.into_iter().map(|d| d.breed).collect();
        Ok(breeds.into_iter().collect())
    }

    #[instrument(skip(self))]
    pub(crate) fn search(&self, query: &PageQuery) -> Result<SearchResults> {
        if query.size == 0 {
            return Err(bad_request("size must be positive"));
        }

        let mut dogs: Vec<DogRecord> = self
            .read_dogs()?
            .into_iter()
            .filter(|d| query.breed.as_deref().is_none_or(|b| d.breed == b))
            .collect();

        dogs.sort_by(|a, b| a.breed.cmp(&b.breed).then_with(|| a.id.cmp(&b.id)));
        if query.sort == SortOrder::Descending {
            dogs.reverse();
        }

        let total = dogs.len();
        let size = query.size as usize;
        let result_ids: Vec<DogId> = dogs
            .into_iter()
            .skip(query.from)
            .take(size)
            .map(|d| d.id)
            .collect();

        let end = query.from.saturating_add(size);
        let next = (end < total).then(|| query.cursor_at(end));
        let prev = (query.from > 0).then(|| query.cursor_at(query.from.saturating_sub(size)));

        debug!(total, returned = result_ids.len(), "Search served");

        Ok(SearchResults {
            result_ids,
            total: Some(total as u64),
            next,
            prev,
        })
    }

    /// Records for the given ids; unknown ids are skipped.
    pub(crate) fn lookup(&self, ids: &[DogId]) -> Result<Vec<DogRecord>> {
        let mut by_id: HashMap<DogId, DogRecord> = self
            .read_dogs()?
            .into_iter()
            .map(|d| (d.id.clone(), d))
            .collect();
        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    /// Pick a match: the first requested id present in the catalog.
    pub(crate) fn pick_match(&self, ids: &[DogId]) -> Result<DogId> {
        let known: BTreeSet<DogId> = self.read_dogs()?.into_iter().map(|d| d.id).collect();
        ids.iter()
            .find(|id| known.contains(*id))
            .cloned()
            .ok_or_else(|| bad_request("none of the requested dogs exist"))
    }
}
