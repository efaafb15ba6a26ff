//! Search command implementation.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use pawsearch_core::{CatalogBrowser, Cursor, FilterState, SortOrder};
use pawsearch_http::HttpConfig;

use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Only show this breed
    #[arg(long)]
    pub breed: Option<String>,

    /// Breed sort direction (asc or desc)
    #[arg(long, default_value_t = SortOrder::Ascending)]
    pub sort: SortOrder,

    /// Cursor printed by an earlier search; overrides --breed and --sort
    #[arg(long)]
    pub cursor: Option<String>,

    /// Dogs per page
    #[arg(long, default_value_t = pawsearch_core::DEFAULT_PAGE_SIZE)]
    pub size: u32,

    /// Print records as JSON lines
    #[arg(long)]
    pub json: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: SearchArgs, config: &HttpConfig) -> Result<()> {
    let session = storage::require_session(config)?;
    let browser = CatalogBrowser::with_page_size(args.size);

    let fetched = match args.cursor.filter(|c| !c.is_empty()) {
        Some(cursor) => browser.fetch_page(&session, Some(&Cursor::new(cursor))).await,
        None => {
            let filter = FilterState {
                breed: args.breed.unwrap_or_default(),
                sort: args.sort,
            };
            browser.set_filter(&session, filter).await
        }
    };
    fetched.map_err(|e| super::report(e, "Failed to search"))?;

    let page = browser.page();
    if page.is_empty() {
        eprintln!("{}", "No dogs found.".dimmed());
    }

    for dog in &page {
        if args.pretty {
            output::json_pretty(dog)?;
        } else if args.json {
            output::json(dog)?;
        } else {
            output::dog(dog, false);
        }
    }

    let cursor = browser.cursor();
    if let Some(total) = browser.total() {
        eprintln!();
        eprintln!("{}: {}", "Total".dimmed(), total);
    }
    if let Some(next) = &cursor.next {
        eprintln!("{}: {}", "Next cursor".dimmed(), next);
    }
    if let Some(prev) = &cursor.prev {
        eprintln!("{}: {}", "Prev cursor".dimmed(), prev);
    }

    Ok(())
}
