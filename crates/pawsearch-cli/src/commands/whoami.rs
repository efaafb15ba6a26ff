//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct WhoamiArgs {}

pub async fn run(_args: WhoamiArgs) -> Result<()> {
    let stored = storage::read_session()
        .context("Failed to load session")?
        .context("No active session. Run 'pawsearch login' first.")?;

    output::field("User", &stored.user);
    output::field("Service", &stored.service);
    output::field("Logged in", &stored.logged_in_at.to_rfc3339());

    Ok(())
}
