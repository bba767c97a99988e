// src/config.rs
// =============================================================================
// Resolved runtime settings.
//
// clap has already merged flags and environment variables; this file checks
// the values and turns them into a ready GitHubClient.
// =============================================================================

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use log::warn;
use url::Url;

use crate::cli::Cli;
use crate::github::{GitHubClient, HttpFetcher};

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: Url,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let api_base = Url::parse(&cli.api_url)
            .with_context(|| format!("Invalid API URL '{}'", cli.api_url))?;
        if api_base.cannot_be_a_base() || !matches!(api_base.scheme(), "http" | "https") {
            return Err(anyhow!("API URL must be an http(s) URL: {}", cli.api_url));
        }

        let token = cli
            .token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        Ok(Self {
            api_base,
            token,
            timeout: Duration::from_secs(cli.timeout_secs),
        })
    }

    pub fn client(&self) -> Result<GitHubClient> {
        if self.token.is_none() {
            warn!("GITHUB_TOKEN is not set, requests are unauthenticated and heavily rate limited");
        }
        let fetcher = HttpFetcher::new(self.token.as_deref(), self.timeout)?;
        Ok(GitHubClient::new(fetcher, self.api_base.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        let mut full = vec!["repo-scout"];
        full.extend_from_slice(args);
        full.extend_from_slice(&["search", "x"]);
        Cli::try_parse_from(full).unwrap()
    }

    #[test]
    fn test_blank_token_means_no_token() {
        let config = Config::from_cli(&cli(&["--token", "  "])).unwrap();
        assert!(config.token.is_none());

        let config = Config::from_cli(&cli(&["--token", "ghp_abc"])).unwrap();
        assert_eq!(config.token.as_deref(), Some("ghp_abc"));
    }

    #[test]
    fn test_api_url_must_be_http() {
        assert!(Config::from_cli(&cli(&["--api-url", "not a url"])).is_err());
        assert!(Config::from_cli(&cli(&["--api-url", "mailto:me@example.com"])).is_err());
        assert!(Config::from_cli(&cli(&["--api-url", "ftp://example.com"])).is_err());

        let config = Config::from_cli(&cli(&["--api-url", "http://localhost:8080"])).unwrap();
        assert_eq!(config.api_base.as_str(), "http://localhost:8080/");
    }

    #[test]
    fn test_client_builds() {
        let config = Config::from_cli(&cli(&["--timeout-secs", "3"])).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert!(config.client().is_ok());
    }
}
