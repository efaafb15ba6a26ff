//! Subcommand implementations.

mod breeds;
mod browse;
mod login;
mod logout;
mod matching;
mod search;
mod whoami;

use anyhow::Result;
use clap::Subcommand;

use pawsearch_core::Notice;
use pawsearch_http::HttpConfig;

use crate::output;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and store the session
    Login(login::LoginArgs),

    /// End the session and forget it
    Logout(logout::LogoutArgs),

    /// Display the stored session
    Whoami(whoami::WhoamiArgs),

    /// List every breed the service knows
    Breeds(breeds::BreedsArgs),

    /// Print one page of search results
    Search(search::SearchArgs),

    /// Ask the service to pick a match among dog ids
    Match(matching::MatchArgs),

    /// Browse interactively: filter, page, favorite and match
    Browse(browse::BrowseArgs),
}

pub async fn handle(cmd: Command, config: &HttpConfig) -> Result<()> {
    match cmd {
        Command::Login(args) => login::run(args, config).await,
        Command::Logout(args) => logout::run(args, config).await,
        Command::Whoami(args) => whoami::run(args).await,
        Command::Breeds(args) => breeds::run(args, config).await,
        Command::Search(args) => search::run(args, config).await,
        Command::Match(args) => matching::run(args, config).await,
        Command::Browse(args) => browse::run(args, config).await,
    }
}

/// Show the notice for `err` and hand it back with context for the exit path.
fn report(err: pawsearch_core::Error, context: &'static str) -> anyhow::Error {
    output::notice(&Notice::from_error(&err));
    anyhow::Error::new(err).context(context)
}
