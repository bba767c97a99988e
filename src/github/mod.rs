// src/github/mod.rs
// =============================================================================
// This module talks to the GitHub REST API.
//
// Currently implements:
// - Repository search with outcome classification (search.rs)
// - Commit/fork/owner detail lookup for one repository (details.rs)
// - The HTTP seam both are written against (fetch.rs)
//
// GitHubClient bundles a fetcher with the API base URL so callers only pass
// what changes between calls.
// =============================================================================

mod details;
mod fetch;
mod models;
mod search;

use fetch::Fetch;
pub use fetch::HttpFetcher;
pub use models::{
    DetailResult, OutcomeCode, RepositorySummary, SearchOutcome, SearchQuery, SearchResult,
    FIRST_PAGE, ITEMS_PER_PAGE,
};

#[cfg(test)]
pub(crate) use fetch::fake::FakeFetcher;

use url::Url;

pub struct GitHubClient<F = HttpFetcher> {
    fetcher: F,
    api_base: Url,
}

impl<F: Fetch> GitHubClient<F> {
    pub fn new(fetcher: F, api_base: Url) -> Self {
        Self { fetcher, api_base }
    }

    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    pub async fn search(&self, query: &SearchQuery) -> SearchOutcome {
        search::search(&self.fetcher, &self.api_base, query).await
    }

    pub async fn fetch_details(&self, item: &RepositorySummary) -> DetailResult {
        details::fetch_details(&self.fetcher, item).await
    }
}
