// src/github/models.rs
// =============================================================================
// Data types shared by the search and detail code.
//
// Two kinds of types live here:
// - Wire types (RepoItem, CommitEntry, ...) that mirror the JSON GitHub sends
// - Our own types (SearchResult, RepositorySummary, DetailResult, ...) that the
//   rest of the application works with
//
// Keeping them apart means a change in GitHub's payload only touches the
// conversion functions at the bottom of this file.
// =============================================================================

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Number of repositories requested per search page.
pub const ITEMS_PER_PAGE: u32 = 10;

/// Page numbers are 1-based.
pub const FIRST_PAGE: u32 = 1;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("page numbers start at 1, got {0}")]
    InvalidPage(u32),
}

// A sanitized search term plus the page to fetch.
//
// The term is not validated: an empty or whitespace-only term is a legal
// request, GitHub answers it with 422 and that becomes EmptySearchTerm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    term: String,
    page: u32,
}

impl SearchQuery {
    pub fn new(term: impl Into<String>, page: u32) -> Result<Self, QueryError> {
        if page < FIRST_PAGE {
            return Err(QueryError::InvalidPage(page));
        }
        Ok(Self {
            term: term.into(),
            page,
        })
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn page(&self) -> u32 {
        self.page
    }
}

/// Classification of a single search call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeCode {
    Success,
    EmptySearchTerm,
    RateLimited,
    OtherFailure,
}

// What the Query Client hands back.
//
// Only the Success variant carries data, so a failed or rate-limited call
// can never leak a payload to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Success(SearchResult),
    EmptySearchTerm,
    RateLimited,
    OtherFailure,
}

impl SearchOutcome {
    pub fn code(&self) -> OutcomeCode {
        match self {
            SearchOutcome::Success(_) => OutcomeCode::Success,
            SearchOutcome::EmptySearchTerm => OutcomeCode::EmptySearchTerm,
            SearchOutcome::RateLimited => OutcomeCode::RateLimited,
            SearchOutcome::OtherFailure => OutcomeCode::OtherFailure,
        }
    }

    pub fn result(&self) -> Option<&SearchResult> {
        match self {
            SearchOutcome::Success(result) => Some(result),
            _ => None,
        }
    }
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub total_count: u64,
    pub items: Vec<RepositorySummary>,
}

/// Read-only projection of one repository entry from the search API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositorySummary {
    pub name: String,
    pub owner_login: String,
    pub star_count: u64,
    pub html_url: String,
    pub full_name: String,
    pub commits_url: String,
    pub forks_url: String,
    pub owner_url: String,
}

impl RepositorySummary {
    // Builds a summary for `owner/repo` without going through search.
    //
    // The URLs follow the layout GitHub itself reports in search results, so a
    // summary built here is interchangeable with one from a search page.
    pub fn from_full_name(api_base: &str, full_name: &str) -> Option<Self> {
        let (owner, name) = full_name.split_once('/')?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }

        let api_base = api_base.trim_end_matches('/');
        Some(Self {
            name: name.to_string(),
            owner_login: owner.to_string(),
            star_count: 0,
            html_url: format!("{}/{}/{}", web_base(api_base), owner, name),
            full_name: full_name.to_string(),
            commits_url: format!("{}/repos/{}/{}/commits{{/sha}}", api_base, owner, name),
            forks_url: format!("{}/repos/{}/{}/forks", api_base, owner, name),
            owner_url: format!("{}/users/{}", api_base, owner),
        })
    }
}

// Web host that matches an API base.
//
// github.com serves its API from a separate host; GitHub Enterprise serves
// it under /api/v3 on the same host as the web UI.
fn web_base(api_base: &str) -> String {
    match Url::parse(api_base) {
        Ok(url) if url.host_str() != Some("api.github.com") => url.origin().ascii_serialization(),
        _ => "https://github.com".to_string(),
    }
}

// Supplementary information about one repository.
//
// Every field is always present. A field whose lookup failed is an empty
// string, never missing, so callers can tell "nothing to show" apart from
// "partially available" by looking at the three fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetailResult {
    /// Up to three commit author names, newest first, joined with ", ".
    pub last_commit_authors: String,
    pub last_fork_creator: String,
    pub owner_bio: String,
}

impl DetailResult {
    pub fn is_empty(&self) -> bool {
        self.last_commit_authors.is_empty()
            && self.last_fork_creator.is_empty()
            && self.owner_bio.is_empty()
    }
}

// -----------------------------------------------------------------------------
// Wire types
// -----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub total_count: u64,
    #[serde(default)]
    pub items: Vec<RepoItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RepoItem {
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    #[serde(default)]
    pub stargazers_count: u64,
    pub commits_url: String,
    pub forks_url: String,
    pub owner: OwnerRef,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwnerRef {
    pub login: String,
    pub url: String,
}

// Entry of GET /repos/{owner}/{repo}/commits
#[derive(Debug, Deserialize)]
pub(crate) struct CommitEntry {
    pub commit: CommitInfo,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitInfo {
    pub author: Option<CommitAuthor>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitAuthor {
    pub name: Option<String>,
}

// Entry of GET /repos/{owner}/{repo}/forks
#[derive(Debug, Deserialize)]
pub(crate) struct ForkEntry {
    pub owner: Option<ForkOwner>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForkOwner {
    pub login: String,
}

// GET /users/{login}
#[derive(Debug, Deserialize)]
pub(crate) struct UserProfile {
    pub bio: Option<String>,
}

impl From<RepoItem> for RepositorySummary {
    fn from(item: RepoItem) -> Self {
        RepositorySummary {
            name: item.name,
            owner_login: item.owner.login,
            star_count: item.stargazers_count,
            html_url: item.html_url,
            full_name: item.full_name,
            commits_url: item.commits_url,
            forks_url: item.forks_url,
            owner_url: item.owner.url,
        }
    }
}

impl From<SearchResponse> for SearchResult {
    fn from(response: SearchResponse) -> Self {
        SearchResult {
            total_count: response.total_count,
            items: response.items.into_iter().map(RepositorySummary::from).collect(),
        }
    }
}
