//! Logout command implementation.

use anyhow::Result;
use clap::Args;
use tracing::warn;

use pawsearch_core::Session;
use pawsearch_http::HttpConfig;

use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs, config: &HttpConfig) -> Result<()> {
    let Some(stored) = storage::read_session()? else {
        output::success("Not logged in");
        return Ok(());
    };

    match stored.open(config) {
        Ok(session) => {
            if let Err(e) = session.logout().await {
                warn!(error = %e, "Service logout failed; forgetting the session anyway");
            }
        }
        Err(e) => warn!(error = %e, "Stored session is unusable; removing it"),
    }

    storage::clear_session()?;
    output::success("Logged out");

    Ok(())
}
