// src/github/details.rs
// =============================================================================
// The Detail Aggregator: three lookups for one repository, reduced into a
// DetailResult.
//
// How it works:
// 1. Fire the commit-history, fork-list and owner-profile requests together
// 2. Wait for all three, whatever happens to each one
// 3. Reduce each result on its own into one field
//
// A failed branch (transport error, non-2xx status, unparsable body) only
// empties its own field. Nothing is retried and nothing is returned as an
// error: the caller always gets all three fields.
// =============================================================================

use futures::join;
use log::{debug, warn};
use serde::de::DeserializeOwned;

use super::fetch::Fetch;
use super::models::{CommitEntry, DetailResult, ForkEntry, RepositorySummary, UserProfile};

/// How many commit authors end up in the summary.
pub const COMMIT_AUTHOR_LIMIT: usize = 3;

pub async fn fetch_details<F: Fetch>(fetcher: &F, item: &RepositorySummary) -> DetailResult {
    let commits_url = strip_url_template(&item.commits_url);
    debug!("fetching details for {}", item.full_name);

    let (commits, forks, owner) = join!(
        fetch_json::<F, Vec<CommitEntry>>(fetcher, commits_url),
        fetch_json::<F, Vec<ForkEntry>>(fetcher, &item.forks_url),
        fetch_json::<F, UserProfile>(fetcher, &item.owner_url),
    );

    let details = DetailResult {
        last_commit_authors: commits.map(|c| join_commit_authors(&c)).unwrap_or_default(),
        last_fork_creator: forks.and_then(|f| first_fork_creator(&f)).unwrap_or_default(),
        owner_bio: owner.and_then(|o| o.bio).unwrap_or_default(),
    };

    if details.is_empty() {
        debug!("no detail available for {}", item.full_name);
    }
    details
}

// Drops a URI template suffix such as `{/sha}` from GitHub's `*_url` fields.
fn strip_url_template(url: &str) -> &str {
    match url.find('{') {
        Some(start) => &url[..start],
        None => url,
    }
}

// One branch of the fan-out. None means "this field is unavailable".
async fn fetch_json<F: Fetch, T: DeserializeOwned>(fetcher: &F, url: &str) -> Option<T> {
    let response = match fetcher.get(url).await {
        Ok(response) => response,
        Err(e) => {
            warn!("detail request failed: {}", e);
            return None;
        }
    };

    if !response.is_success() {
        warn!("detail request {} returned HTTP {}", url, response.status.as_u16());
        return None;
    }

    match response.json() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("could not parse {}: {}", url, e);
            None
        }
    }
}

// GitHub lists commits newest first, so the first entries are the latest.
// Commits without an author name are skipped rather than shown as blanks.
fn join_commit_authors(commits: &[CommitEntry]) -> String {
    commits
        .iter()
        .take(COMMIT_AUTHOR_LIMIT)
        .filter_map(|entry| entry.commit.author.as_ref()?.name.as_deref())
        .collect::<Vec<_>>()
        .join(", ")
}

// The fork list is newest first as well.
fn first_fork_creator(forks: &[ForkEntry]) -> Option<String> {
    forks.first()?.owner.as_ref().map(|owner| owner.login.clone())
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. join! vs try_join!
//    - join! waits for every future and hands back all their outputs
//    - try_join! would stop at the first Err and drop the rest
//    - Each branch here returns Option, so a failure is just a None slot
//
// 2. Why no tokio::spawn?
//    - The three futures are polled by the same task
//    - While one waits on the network the others make progress
//    - Borrowing `fetcher` is fine because nothing outlives this function
// -----------------------------------------------------------------------------
