//! Interactive browse command.
//!
//! Reads one action per line from stdin and drives a [`CatalogBrowser`]
//! with the stored session.

use std::io::Write;

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};

use pawsearch_core::{CatalogBrowser, DogId, Notice, Session, SortOrder};
use pawsearch_http::HttpConfig;

use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct BrowseArgs {
    /// Dogs per page
    #[arg(long, default_value_t = pawsearch_core::DEFAULT_PAGE_SIZE)]
    pub size: u32,
}

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    /// Filter on a breed; `None` clears the filter.
    Breed(Option<String>),
    /// Sort in the given direction; `None` flips it.
    Sort(Option<SortOrder>),
    Next,
    Prev,
    Favorite(DogId),
    Favorites,
    Match,
    Breeds,
    Show,
    Help,
    Quit,
}

impl Action {
    /// Parse a line. Blank lines yield `Ok(None)`.
    fn parse(line: &str) -> std::result::Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let action = match word.to_ascii_lowercase().as_str() {
            "breed" => Action::Breed((!rest.is_empty()).then(|| rest.to_string())),
            "sort" if rest.is_empty() => Action::Sort(None),
            "sort" => Action::Sort(Some(rest.parse().map_err(|e| format!("{e}"))?)),
            "next" | "n" => Action::Next,
            "prev" | "p" => Action::Prev,
            "fav" | "f" => {
                if rest.is_empty() {
                    return Err("usage: fav <ID>".to_string());
                }
                Action::Favorite(DogId::new(rest).map_err(|e| format!("{e}"))?)
            }
            "favs" => Action::Favorites,
            "match" => Action::Match,
            "breeds" => Action::Breeds,
            "show" | "ls" => Action::Show,
            "help" | "?" => Action::Help,
            "quit" | "exit" | "q" => Action::Quit,
            other => return Err(format!("unknown command '{other}' (try 'help')")),
        };

        Ok(Some(action))
    }
}

pub async fn run(args: BrowseArgs, config: &HttpConfig) -> Result<()> {
    let session = storage::require_session(config)?;
    let browser = CatalogBrowser::with_page_size(args.size);

    if let Err(e) = browser.load_breeds(&session).await {
        output::notice(&Notice::from_error(&e));
    }
    match browser.refresh(&session).await {
        Ok(_) => show(&browser),
        Err(e) => output::notice(&Notice::from_error(&e)),
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt(&browser)?;

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };

        let action = match Action::parse(&line) {
            Ok(Some(Action::Quit)) => break,
            Ok(Some(action)) => action,
            Ok(None) => continue,
            Err(message) => {
                output::error(&message);
                continue;
            }
        };

        if let Err(e) = step(&browser, &session, action).await {
            let notice = Notice::from_error(&e);
            output::notice(&notice);
            if notice == Notice::Reauthenticate {
                bail!("Session expired. Run 'pawsearch login' again.");
            }
        }
    }

    Ok(())
}

async fn step<S>(browser: &CatalogBrowser, session: &S, action: Action) -> pawsearch_core::Result<()>
where
    S: Session + ?Sized,
{
    match action {
        Action::Breed(breed) => {
            browser
                .set_breed_filter(session, breed.as_deref().unwrap_or(""))
                .await?;
            show(browser);
        }
        Action::Sort(None) => {
            browser.toggle_sort_order(session).await?;
            show(browser);
        }
        Action::Sort(Some(order)) => {
            browser.set_sort_order(session, order).await?;
            show(browser);
        }
        Action::Next => {
            browser.go_next(session).await?;
            show(browser);
        }
        Action::Prev => {
            browser.go_prev(session).await?;
            show(browser);
        }
        Action::Favorite(id) => {
            if browser.toggle_favorite(id.clone()) {
                output::success(&format!("Added {id} to favorites"));
            } else {
                output::success(&format!("Removed {id} from favorites"));
            }
        }
        Action::Favorites => {
            let favorites = browser.favorites();
            if favorites.is_empty() {
                eprintln!("{}", "No favorites yet.".dimmed());
            }
            for id in favorites {
                println!("★ {id}");
            }
        }
        Action::Match => {
            let matched = browser.request_match(session).await?;
            output::notice(&Notice::Matched(matched));
        }
        Action::Breeds => {
            let mut breeds = browser.breeds();
            if breeds.is_empty() {
                breeds = browser.load_breeds(session).await?;
            }
            for breed in breeds {
                println!("{breed}");
            }
        }
        Action::Show => show(browser),
        Action::Help => help(),
        Action::Quit => {}
    }
    Ok(())
}

fn show(browser: &CatalogBrowser) {
    let filter = browser.filter();
    let breed = filter.breed_filter().unwrap_or("All breeds");
    let total = browser
        .total()
        .map(|t| format!(", {t} total"))
        .unwrap_or_default();
    println!();
    println!("{} ({}{})", breed.bold(), filter.sort, total);

    let page = browser.page();
    if page.is_empty() {
        println!("{}", "No dogs found.".dimmed());
    }
    for dog in &page {
        output::dog(dog, browser.is_favorite(&dog.id));
    }
}

fn prompt(browser: &CatalogBrowser) -> Result<()> {
    let mut actions = vec!["breed", "sort"];
    if browser.has_prev() {
        actions.push("prev");
    }
    if browser.has_next() {
        actions.push("next");
    }
    actions.push("fav");
    if browser.can_request_match() {
        actions.push("match");
    }
    actions.push("help");

    print!("{} ", format!("[{}]>", actions.join(" ")).dimmed());
    std::io::stdout().flush()?;
    Ok(())
}

fn help() {
    println!("breed [NAME]      filter on a breed (no name shows all)");
    println!("sort [asc|desc]   set the breed sort (no argument flips it)");
    println!("next, prev        move between pages");
    println!("fav <ID>          favorite or unfavorite a dog");
    println!("favs              list favorites");
    println!("match             ask for a match among favorites");
    println!("breeds            list breeds");
    println!("show              redisplay the current page");
    println!("quit              leave");
}
