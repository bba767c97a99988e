// src/github/search.rs
// =============================================================================
// The Query Client: one search request, one classified outcome.
//
// Classification, first match wins:
// 1. HTTP 422 (GitHub's answer to an empty or malformed query) -> EmptySearchTerm
// 2. Any other failure (transport error or non-2xx status)    -> OtherFailure
// 3. 2xx but x-ratelimit-remaining is 0                        -> RateLimited
// 4. Otherwise                                                 -> Success(payload)
//
// A rate-limited response is discarded even though the request succeeded:
// the caller never sees its payload.
//
// A 2xx body we cannot parse is reported as OtherFailure.
// =============================================================================

use log::{debug, warn};
use reqwest::StatusCode;
use url::Url;

use super::fetch::Fetch;
use super::models::{SearchOutcome, SearchQuery, SearchResponse, SearchResult, ITEMS_PER_PAGE};

// Builds the search URL for a query.
//
// The term is percent-encoded into `q`; sanitized terms contain `&` and `#`
// which would otherwise cut the query string short.
pub fn search_url(api_base: &Url, query: &SearchQuery) -> Url {
    let mut url = api_base.clone();
    // Only cannot-be-a-base URLs (mailto: and friends) refuse path segments,
    // and Config never produces one.
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().extend(["search", "repositories"]);
    }
    url.query_pairs_mut()
        .clear()
        .append_pair("q", query.term())
        .append_pair("sort", "stars")
        .append_pair("order", "desc")
        .append_pair("per_page", &ITEMS_PER_PAGE.to_string())
        .append_pair("page", &query.page().to_string());
    url
}

// Runs one search and classifies the result.
//
// Never returns an error: every failure is folded into the outcome.
pub async fn search<F: Fetch>(fetcher: &F, api_base: &Url, query: &SearchQuery) -> SearchOutcome {
    let url = search_url(api_base, query);
    debug!("searching: {}", url);

    let response = match fetcher.get(url.as_str()).await {
        Ok(response) => response,
        Err(e) => {
            warn!("search request failed: {}", e);
            return SearchOutcome::OtherFailure;
        }
    };

    let outcome = if response.status == StatusCode::UNPROCESSABLE_ENTITY {
        SearchOutcome::EmptySearchTerm
    } else if !response.is_success() {
        warn!("search returned HTTP {}", response.status.as_u16());
        SearchOutcome::OtherFailure
    } else if response.rate_limit_remaining == Some(0) {
        SearchOutcome::RateLimited
    } else {
        match response.json::<SearchResponse>() {
            Ok(payload) => SearchOutcome::Success(SearchResult::from(payload)),
            Err(e) => {
                warn!("could not parse search response: {}", e);
                SearchOutcome::OtherFailure
            }
        }
    };

    debug!("search outcome: {:?}", outcome.code());
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::fetch::fake::FakeFetcher;
    use crate::github::models::OutcomeCode;

    const APACHE_PAGE_1: &str = "https://api.github.com/search/repositories?q=apache&sort=stars&order=desc&per_page=10&page=1";

    fn api_base() -> Url {
        Url::parse("https://api.github.com").unwrap()
    }

    fn apache_page() -> String {
        let mut items = Vec::new();
        for i in 0..10 {
            items.push(format!(
                r#"{{
                    "name": "repo{i}",
                    "full_name": "apache/repo{i}",
                    "html_url": "https://github.com/apache/repo{i}",
                    "stargazers_count": {stars},
                    "commits_url": "https://api.github.com/repos/apache/repo{i}/commits{{/sha}}",
                    "forks_url": "https://api.github.com/repos/apache/repo{i}/forks",
                    "owner": {{ "login": "apache", "url": "https://api.github.com/users/apache" }}
                }}"#,
                i = i,
                stars = 1000 - i
            ));
        }
        format!(r#"{{"total_count": 200, "items": [{}]}}"#, items.join(","))
    }

    fn query(term: &str, page: u32) -> SearchQuery {
        SearchQuery::new(term, page).unwrap()
    }

    #[test]
    fn test_search_url_shape() {
        let url = search_url(&api_base(), &query("apache", 1));
        assert_eq!(url.as_str(), APACHE_PAGE_1);

        let url = search_url(&api_base(), &query("apache", 14));
        assert!(url.as_str().ends_with("&per_page=10&page=14"));
    }

    #[test]
    fn test_search_url_encodes_sanitized_term() {
        let url = search_url(&api_base(), &query("c&#43;&#43; lib", 1));
        assert!(url.as_str().contains("q=c%26%2343%3B%26%2343%3B+lib&sort=stars"));
    }

    #[test]
    fn test_search_url_keeps_base_path() {
        let base = Url::parse("https://ghe.example.com/api/v3/").unwrap();
        let url = search_url(&base, &query("x", 2));
        assert!(url
            .as_str()
            .starts_with("https://ghe.example.com/api/v3/search/repositories?q=x&"));
    }

    #[tokio::test]
    async fn test_success_returns_payload() {
        let fetcher = FakeFetcher::new().respond(APACHE_PAGE_1, 200, Some(10), &apache_page());

        let outcome = search(&fetcher, &api_base(), &query("apache", 1)).await;

        assert_eq!(outcome.code(), OutcomeCode::Success);
        let result = outcome.result().unwrap();
        assert_eq!(result.total_count, 200);
        assert_eq!(result.items.len(), 10);
        assert_eq!(result.items[0].full_name, "apache/repo0");
        assert_eq!(result.items[0].star_count, 1000);
        assert_eq!(fetcher.requested(), vec![APACHE_PAGE_1]);
    }

    #[tokio::test]
    async fn test_missing_rate_limit_header_is_not_exhaustion() {
        let fetcher = FakeFetcher::new().respond(APACHE_PAGE_1, 200, None, &apache_page());
        let outcome = search(&fetcher, &api_base(), &query("apache", 1)).await;
        assert_eq!(outcome.code(), OutcomeCode::Success);
    }

    #[tokio::test]
    async fn test_zero_quota_hides_payload() {
        let fetcher = FakeFetcher::new().respond(APACHE_PAGE_1, 200, Some(0), &apache_page());

        let outcome = search(&fetcher, &api_base(), &query("apache", 1)).await;

        assert_eq!(outcome, SearchOutcome::RateLimited);
        assert!(outcome.result().is_none());
    }

    #[tokio::test]
    async fn test_zero_quota_wins_over_unparsable_body() {
        let fetcher = FakeFetcher::new().respond(APACHE_PAGE_1, 200, Some(0), "not json");
        let outcome = search(&fetcher, &api_base(), &query("apache", 1)).await;
        assert_eq!(outcome, SearchOutcome::RateLimited);
    }

    #[tokio::test]
    async fn test_unprocessable_is_empty_search_term() {
        let url = "https://api.github.com/search/repositories?q=&sort=stars&order=desc&per_page=10&page=1";
        let fetcher = FakeFetcher::new().respond(url, 422, Some(10), r#"{"message":"Validation Failed"}"#);

        let outcome = search(&fetcher, &api_base(), &query("", 1)).await;

        assert_eq!(outcome, SearchOutcome::EmptySearchTerm);
    }

    #[tokio::test]
    async fn test_unprocessable_wins_over_zero_quota() {
        let fetcher = FakeFetcher::new().respond(APACHE_PAGE_1, 422, Some(0), "{}");
        let outcome = search(&fetcher, &api_base(), &query("apache", 1)).await;
        assert_eq!(outcome, SearchOutcome::EmptySearchTerm);
    }

    #[tokio::test]
    async fn test_other_statuses_are_other_failure() {
        for status in [400, 401, 403, 404, 500, 503] {
            let fetcher = FakeFetcher::new().respond(APACHE_PAGE_1, status, Some(0), "{}");
            let outcome = search(&fetcher, &api_base(), &query("apache", 1)).await;
            assert_eq!(outcome, SearchOutcome::OtherFailure, "status {}", status);
        }
    }

    #[tokio::test]
    async fn test_transport_error_is_other_failure() {
        let fetcher = FakeFetcher::new().timeout(APACHE_PAGE_1);
        let outcome = search(&fetcher, &api_base(), &query("apache", 1)).await;
        assert_eq!(outcome, SearchOutcome::OtherFailure);
    }

    #[tokio::test]
    async fn test_unparsable_success_is_other_failure() {
        let fetcher = FakeFetcher::new().respond(APACHE_PAGE_1, 200, Some(10), "<html>");
        let outcome = search(&fetcher, &api_base(), &query("apache", 1)).await;
        assert_eq!(outcome, SearchOutcome::OtherFailure);
    }

    #[tokio::test]
    async fn test_repeated_search_is_stable() {
        let fetcher = FakeFetcher::new().respond(APACHE_PAGE_1, 200, Some(10), &apache_page());

        let first = search(&fetcher, &api_base(), &query("apache", 1)).await;
        let second = search(&fetcher, &api_base(), &query("apache", 1)).await;

        assert_eq!(first, second);
        assert_eq!(fetcher.requested().len(), 2);
    }
}
