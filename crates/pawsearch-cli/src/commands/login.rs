//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use pawsearch_core::{Credentials, ServiceUrl, Session};
use pawsearch_http::HttpConfig;

use crate::cli::DEFAULT_SERVICE;
use crate::output;
use crate::session::{CliSession, storage};

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Your name
    #[arg(long)]
    pub name: String,

    /// Your email address
    #[arg(long)]
    pub email: String,

    /// Service base URL (`file://` for a local catalog)
    #[arg(long, env = "PAWSEARCH_SERVICE", default_value = DEFAULT_SERVICE)]
    pub service: String,
}

pub async fn run(args: LoginArgs, config: &HttpConfig) -> Result<()> {
    let service = ServiceUrl::new(&args.service).context("Invalid service URL")?;
    let credentials = Credentials::new(args.name, args.email);

    eprintln!("{}", "Logging in...".dimmed());

    let session = CliSession::login(service, credentials, config)
        .await
        .map_err(|e| super::report(e, "Failed to login"))?;

    storage::save_session(&session).context("Failed to save session")?;

    output::success("Logged in successfully");
    println!();
    output::field("User", session.user());
    output::field("Service", session.service().as_str());

    Ok(())
}
