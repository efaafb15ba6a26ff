//! Match command implementation.

use anyhow::Result;
use clap::Args;

use pawsearch_core::{CatalogBrowser, DogId, Notice};
use pawsearch_http::HttpConfig;

use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct MatchArgs {
    /// Dog ids to choose among
    #[arg(long = "id", required = true, num_args = 1..)]
    pub ids: Vec<DogId>,
}

pub async fn run(args: MatchArgs, config: &HttpConfig) -> Result<()> {
    let session = storage::require_session(config)?;

    let browser = CatalogBrowser::new();
    for id in args.ids {
        if !browser.is_favorite(&id) {
            browser.toggle_favorite(id);
        }
    }

    let matched = browser
        .request_match(&session)
        .await
        .map_err(|e| super::report(e, "Failed to request a match"))?;

    output::notice(&Notice::Matched(matched));

    Ok(())
}
