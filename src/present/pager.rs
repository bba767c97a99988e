// src/present/pager.rs
// =============================================================================
// Pagination and view state for one browsing session.
//
// The state lives in one explicit struct that the caller owns and passes to
// the render functions. Nothing here touches the network: the caller asks
// for the next SearchQuery, runs it, and hands the outcome back via apply().
//
// Rules:
// - prev is disabled before the first search, on page 1, and while loading
// - next is disabled before the first search, without a known total, while
//   loading, and on the last page
// - GitHub never serves more than 1000 search results, so with a bigger total
//   the last page is 1000 / 10 = 100
// - a failed prev/next keeps the page number and total from before
// - a failed search for a new term resets to page 1 with no known total,
//   which disables both prev and next
// =============================================================================

use crate::github::{SearchOutcome, SearchQuery, SearchResult, FIRST_PAGE, ITEMS_PER_PAGE};

use super::render::outcome_message;

/// The search API stops serving results after this many matches.
pub const MAX_RESPONSE_COUNT: u64 = 1000;

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// Nothing searched yet.
    Idle,
    Results(SearchResult),
    Error(&'static str),
}

#[derive(Debug, Clone)]
pub struct PagerState {
    query: Option<String>,
    current_page: u32,
    total_count: Option<u64>,
    loading: bool,
    // The in-flight search is for a freshly submitted term
    new_term: bool,
    view: View,
}

impl Default for PagerState {
    fn default() -> Self {
        Self::new()
    }
}

impl PagerState {
    pub fn new() -> Self {
        Self {
            query: None,
            current_page: FIRST_PAGE,
            total_count: None,
            loading: false,
            new_term: false,
            view: View::Idle,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    // Starts a new search for `term` on the first page.
    //
    // Returns None while another search is still in flight.
    pub fn submit(&mut self, term: String) -> Option<SearchQuery> {
        if self.loading {
            return None;
        }
        let query = SearchQuery::new(term.clone(), FIRST_PAGE).ok()?;
        self.query = Some(term);
        self.loading = true;
        self.new_term = true;
        Some(query)
    }

    pub fn next(&mut self) -> Option<SearchQuery> {
        if self.is_next_disabled() {
            return None;
        }
        self.start(self.current_page + 1)
    }

    pub fn prev(&mut self) -> Option<SearchQuery> {
        if self.is_prev_disabled() {
            return None;
        }
        self.start(self.current_page - 1)
    }

    fn start(&mut self, target_page: u32) -> Option<SearchQuery> {
        let term = self.query.clone()?;
        let query = SearchQuery::new(term, target_page).ok()?;
        self.loading = true;
        self.new_term = false;
        Some(query)
    }

    // Records the outcome of the search started for `query`.
    pub fn apply(&mut self, query: &SearchQuery, outcome: SearchOutcome) {
        self.loading = false;
        let new_term = std::mem::take(&mut self.new_term);
        match outcome {
            SearchOutcome::Success(result) => {
                self.current_page = query.page();
                self.total_count = Some(result.total_count);
                self.view = View::Results(result);
            }
            failure => {
                // The old page and total belong to a different term
                if new_term {
                    self.current_page = FIRST_PAGE;
                    self.total_count = None;
                }
                if let Some(message) = outcome_message(failure.code()) {
                    self.view = View::Error(message);
                }
            }
        }
    }

    pub fn is_prev_disabled(&self) -> bool {
        self.query.is_none() || self.current_page == FIRST_PAGE || self.loading
    }

    pub fn is_next_disabled(&self) -> bool {
        match (&self.query, self.total_count) {
            (Some(_), Some(total)) if !self.loading => u64::from(self.current_page) >= last_page(total),
            _ => true,
        }
    }
}

// Last page reachable for a result set of `total_count` matches.
pub fn last_page(total_count: u64) -> u64 {
    let reachable = total_count.min(MAX_RESPONSE_COUNT);
    reachable.div_ceil(u64::from(ITEMS_PER_PAGE))
}
