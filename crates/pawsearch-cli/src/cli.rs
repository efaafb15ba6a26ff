//! CLI argument definitions.

use std::time::Duration;

use clap::Parser;

use pawsearch_http::{DEFAULT_TIMEOUT, HttpConfig};

use crate::commands::Command;

/// Service used when neither `--service` nor `PAWSEARCH_SERVICE` is given.
pub const DEFAULT_SERVICE: &str = "https://frontend-take-home-service.fetch.com";

/// Browse adoptable dogs and find a match.
#[derive(Parser, Debug)]
#[command(name = "pawsearch")]
#[command(author, version = env!("PAWSEARCH_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Per-request timeout for the HTTP service, in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn http_config(&self) -> HttpConfig {
        HttpConfig::default().with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn timeout_flag_feeds_http_config() {
        let cli = Cli::parse_from(["pawsearch", "--timeout-secs", "5", "whoami"]);
        assert_eq!(cli.http_config().timeout, Duration::from_secs(5));
    }

    #[test]
    fn default_timeout() {
        let cli = Cli::parse_from(["pawsearch", "whoami"]);
        assert_eq!(cli.http_config().timeout, DEFAULT_TIMEOUT);
    }
}
