// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Load a .env file if there is one, then parse command-line arguments
// 2. Set up logging and build the GitHub client from the configuration
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = success, 1 = search did not succeed, 2 = error)
// =============================================================================

mod cli;
mod config;
mod github;
mod present;

use std::io::{self, Write};

use anyhow::{anyhow, Result};
use clap::Parser;
use log::LevelFilter;
use serde::Serialize;
use simple_logger::SimpleLogger;
use tokio::io::{AsyncBufReadExt, BufReader};

use cli::{Cli, Commands};
use config::Config;
use github::{GitHubClient, OutcomeCode, RepositorySummary, SearchOutcome, SearchQuery, SearchResult};
use present::{PagerState, View};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    // A missing .env file is fine; the real environment still applies
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    SimpleLogger::new()
        .with_level(LevelFilter::Warn)
        .with_module_level("repo_scout", level)
        .init()?;

    let config = Config::from_cli(&cli)?;
    let client = config.client()?;

    match cli.command {
        Commands::Search { term, page, json } => handle_search(&client, &term, page, json).await,
        Commands::Details { repo, json } => handle_details(&client, &repo, json).await,
        Commands::Browse { term } => handle_browse(&client, term).await,
    }
}

// JSON shape of the `search --json` output
#[derive(Serialize)]
struct SearchReport<'a> {
    outcome: OutcomeCode,
    page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a SearchResult>,
}

async fn handle_search(client: &GitHubClient, raw_term: &str, page: u32, json: bool) -> Result<i32> {
    let query = SearchQuery::new(present::sanitize_query(raw_term), page)?;
    let outcome = client.search(&query).await;
    let message = present::outcome_message(outcome.code());

    if json {
        present::print_json(&SearchReport {
            outcome: outcome.code(),
            page: query.page(),
            message,
            result: outcome.result(),
        })?;
    } else {
        match &outcome {
            SearchOutcome::Success(result) => print_page(result, query.page()),
            _ => {
                if let Some(message) = message {
                    println!("❌ {}", message);
                }
            }
        }
    }

    Ok(match outcome.code() {
        OutcomeCode::Success => 0,
        _ => 1,
    })
}

fn print_page(result: &SearchResult, page: u32) {
    if result.items.is_empty() {
        println!("No repositories found.");
    } else {
        print!("{}", present::results_table(result));
    }

    if let Some(footer) = present::page_footer(result, page) {
        println!();
        println!("{}", footer);
    }
}

async fn handle_details(client: &GitHubClient, repo: &str, json: bool) -> Result<i32> {
    let item = RepositorySummary::from_full_name(client.api_base().as_str(), repo)
        .ok_or_else(|| anyhow!("Expected a repository as owner/name, got '{}'", repo))?;

    println!("🔍 Looking up {}", item.full_name);
    let details = client.fetch_details(&item).await;

    if json {
        present::print_json(&details)?;
    } else {
        println!("{}", present::detail_text(&details));
    }
    Ok(0)
}

const BROWSE_HELP: &str = "Commands: s <term> (search), n (next page), p (previous page), d <row> (details), q (quit)";

// Interactive session over stdin.
//
// Each command is awaited to completion before the next line is read, so
// there is never more than one request in flight.
async fn handle_browse(client: &GitHubClient, term: Option<String>) -> Result<i32> {
    let mut state = PagerState::new();
    println!("{}", BROWSE_HELP);

    if let Some(term) = term {
        let query = state.submit(present::sanitize_query(&term));
        run_query(client, &mut state, query).await;
    } else {
        println!("{}", present::render_state(&state));
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        let (command, arg) = line.split_once(' ').unwrap_or((line, ""));

        match command {
            "" => {}
            "q" | "quit" => break,
            "s" | "search" => {
                let query = state.submit(present::sanitize_query(arg.trim()));
                run_query(client, &mut state, query).await;
            }
            "n" | "next" => {
                let query = state.next();
                run_query(client, &mut state, query).await;
            }
            "p" | "prev" => {
                let query = state.prev();
                run_query(client, &mut state, query).await;
            }
            "d" | "details" => show_details(client, &state, arg.trim()).await,
            _ => println!("{}", BROWSE_HELP),
        }
    }

    Ok(0)
}

async fn run_query(client: &GitHubClient, state: &mut PagerState, query: Option<SearchQuery>) {
    let Some(query) = query else {
        println!("⚠️  Not available right now");
        return;
    };

    let outcome = client.search(&query).await;
    state.apply(&query, outcome);
    println!("{}", present::render_state(state));
}

async fn show_details(client: &GitHubClient, state: &PagerState, arg: &str) {
    let View::Results(result) = state.view() else {
        println!("⚠️  Search for something first");
        return;
    };

    let item = arg
        .parse::<usize>()
        .ok()
        .and_then(|row| row.checked_sub(1))
        .and_then(|index| result.items.get(index));

    match item {
        Some(item) => {
            let details = client.fetch_details(item).await;
            println!("{}:\n{}", item.full_name, present::detail_text(&details));
        }
        None => println!("⚠️  Pick a row between 1 and {}", result.items.len()),
    }
}
