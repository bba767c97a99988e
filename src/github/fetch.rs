// src/github/fetch.rs
// =============================================================================
// This module is the only place that talks to the network.
//
// Strategy:
// - The Fetch trait describes "GET this URL and give me status, rate-limit
//   header and body". Search and detail code are written against the trait.
// - HttpFetcher implements it with reqwest, adding the bearer token, the
//   GitHub Accept header and a User-Agent (GitHub rejects requests without one).
// - Tests implement it with FakeFetcher, which serves canned responses from
//   memory so no test needs an internet connection.
//
// Rust concepts:
// - Traits: An interface the rest of the code depends on
// - impl Future: Returning async work from a trait method
// - thiserror: Deriving Display/Error for our own error enum
// =============================================================================

use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Header GitHub uses to report the remaining request quota.
pub const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

// A response that made it back from the server, whatever its status.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    /// Parsed `x-ratelimit-remaining`, None when missing or not a number.
    pub rate_limit_remaining: Option<u64>,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.body)
    }
}

// The request never produced a response at all.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    fn from_reqwest(url: String, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            FetchError::Timeout { url }
        } else {
            FetchError::Transport { url, source: error }
        }
    }
}

pub trait Fetch {
    fn get(&self, url: &str) -> impl Future<Output = Result<RawResponse, FetchError>> + Send;
}

// reqwest-backed fetcher used by the real binary.
//
// Cloning is cheap: reqwest::Client is reference counted internally and the
// clones share one connection pool.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(token: Option<&str>, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("repo-scout/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));

        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .context("GitHub token contains characters not allowed in a header")?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn get(&self, url: &str) -> impl Future<Output = Result<RawResponse, FetchError>> + Send {
        let request = self.client.get(url);
        let url = url.to_string();

        async move {
            let response = request
                .send()
                .await
                .map_err(|e| FetchError::from_reqwest(url.clone(), e))?;

            let status = response.status();
            let rate_limit_remaining = parse_rate_limit(response.headers());
            let body = response
                .text()
                .await
                .map_err(|e| FetchError::from_reqwest(url, e))?;

            Ok(RawResponse {
                status,
                rate_limit_remaining,
                body,
            })
        }
    }
}

fn parse_rate_limit(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RATE_LIMIT_REMAINING)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

// -----------------------------------------------------------------------------
// In-memory fetcher for tests
// -----------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    pub(crate) enum Canned {
        Response(RawResponse),
        Timeout,
    }

    // Serves canned responses by exact URL and records every request.
    // Unknown URLs get a 404 so a wrong URL shows up as a failed branch.
    #[derive(Default)]
    pub(crate) struct FakeFetcher {
        routes: HashMap<String, Canned>,
        requested: Mutex<Vec<String>>,
    }

    impl FakeFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(
            mut self,
            url: &str,
            status: u16,
            rate_limit_remaining: Option<u64>,
            body: &str,
        ) -> Self {
            let response = RawResponse {
                status: StatusCode::from_u16(status).unwrap(),
                rate_limit_remaining,
                body: body.to_string(),
            };
            self.routes.insert(url.to_string(), Canned::Response(response));
            self
        }

        pub fn ok(self, url: &str, body: &str) -> Self {
            self.respond(url, 200, Some(4999), body)
        }

        pub fn timeout(mut self, url: &str) -> Self {
            self.routes.insert(url.to_string(), Canned::Timeout);
            self
        }

        pub fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    impl Fetch for FakeFetcher {
        fn get(&self, url: &str) -> impl Future<Output = Result<RawResponse, FetchError>> + Send {
            self.requested.lock().unwrap().push(url.to_string());

            let result = match self.routes.get(url) {
                Some(Canned::Response(response)) => Ok(response.clone()),
                Some(Canned::Timeout) => Err(FetchError::Timeout {
                    url: url.to_string(),
                }),
                None => Ok(RawResponse {
                    status: StatusCode::NOT_FOUND,
                    rate_limit_remaining: Some(4999),
                    body: r#"{"message":"Not Found"}"#.to_string(),
                }),
            };
            std::future::ready(result)
        }
    }
}
