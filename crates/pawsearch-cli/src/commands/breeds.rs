//! Breeds command implementation.

use anyhow::Result;
use clap::Args;

use pawsearch_core::Session;
use pawsearch_http::HttpConfig;

use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct BreedsArgs {
    /// Print as a JSON array
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: BreedsArgs, config: &HttpConfig) -> Result<()> {
    let session = storage::require_session(config)?;

    let breeds = session
        .list_breeds()
        .await
        .map_err(|e| super::report(e, "Failed to list breeds"))?;

    if args.json {
        output::json(&breeds)?;
    } else {
        for breed in &breeds {
            println!("{breed}");
        }
    }

    Ok(())
}
