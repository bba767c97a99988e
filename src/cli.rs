// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Global flags (token, API URL, timeout) can also come from environment
// variables, which main.rs may have loaded from a .env file first.
// =============================================================================

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "repo-scout",
    version,
    about = "Search GitHub repositories and inspect their recent activity",
    long_about = "repo-scout searches GitHub repositories by keyword, sorted by stars, and shows \
                  who committed last, who forked last and what the owner says about themselves."
)]
pub struct Cli {
    /// GitHub token sent as a bearer credential
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com", global = true)]
    pub api_url: String,

    /// Per-request timeout in seconds
    #[arg(
        long,
        env = "REPO_SCOUT_TIMEOUT_SECS",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..),
        global = true
    )]
    pub timeout_secs: u64,

    /// Log requests and outcomes to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search repositories by keyword, most starred first
    ///
    /// Example: repo-scout search apache --page 2
    Search {
        /// Search term (special characters are escaped before sending)
        term: String,

        /// Page to fetch, 10 repositories per page
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show latest commit authors, latest fork creator and owner bio
    ///
    /// Example: repo-scout details apache/echarts
    Details {
        /// Repository as owner/name
        repo: String,

        /// Output results in JSON format instead of text
        #[arg(long)]
        json: bool,
    },

    /// Interactive session: search, page through results, inspect rows
    ///
    /// Commands: s <term>, n, p, d <row>, q
    Browse {
        /// Optional term to search right away
        term: Option<String>,
    },
}
