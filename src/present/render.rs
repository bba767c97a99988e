// src/present/render.rs
// =============================================================================
// Turns search and detail results into text for the terminal.
//
// Everything here is a pure function of its input except the print_* helpers,
// which only write to stdout.
// =============================================================================

use anyhow::Result;
use serde::Serialize;

use crate::github::{DetailResult, OutcomeCode, SearchResult, FIRST_PAGE};

use super::pager::{last_page, PagerState, View};

// Message shown for each outcome. Success has nothing to say.
pub fn outcome_message(code: OutcomeCode) -> Option<&'static str> {
    match code {
        OutcomeCode::Success => None,
        OutcomeCode::EmptySearchTerm => Some("Please type in a search query"),
        OutcomeCode::RateLimited => Some("Reached API rate limit, please try again later"),
        OutcomeCode::OtherFailure => Some("Something went wrong, please try again"),
    }
}

pub fn detail_text(detail: &DetailResult) -> String {
    let mut lines = Vec::new();
    if !detail.last_commit_authors.is_empty() {
        lines.push(format!("Last 3 commits by {}", detail.last_commit_authors));
    }
    if !detail.last_fork_creator.is_empty() {
        lines.push(format!("The last fork was created by {}", detail.last_fork_creator));
    }
    if !detail.owner_bio.is_empty() {
        lines.push(format!(
            "The owner has this in their biography: \"{}\"",
            detail.owner_bio
        ));
    }

    if lines.is_empty() {
        "Detail is currently not available".to_string()
    } else {
        lines.join("\n")
    }
}

// Renders one page of results as a fixed-width table.
pub fn results_table(result: &SearchResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<4} {:<30} {:<20} {:>8}  {}\n",
        "#", "NAME", "OWNER", "STARS", "LINK"
    ));
    out.push_str(&"=".repeat(100));
    out.push('\n');

    for (row, item) in result.items.iter().enumerate() {
        out.push_str(&format!(
            "{:<4} {:<30} {:<20} {:>8}  {}\n",
            row + 1,
            truncate(&item.name, 30),
            truncate(&item.owner_login, 20),
            item.star_count,
            item.html_url
        ));
    }
    out
}

// Page position and prev/next hints for one page of `search` output.
//
// None when nothing matched: there is no page to be on.
pub fn page_footer(result: &SearchResult, page: u32) -> Option<String> {
    if result.total_count == 0 {
        return None;
    }

    let last = last_page(result.total_count);
    let mut footer = format!(
        "📄 Page {} of {} · {} repositories",
        page, last, result.total_count
    );
    if u64::from(page) < last {
        footer.push_str(&format!("\n   next: --page {}", page + 1));
    }
    if page > FIRST_PAGE {
        footer.push_str(&format!("\n   prev: --page {}", page - 1));
    }
    Some(footer)
}

// Renders the whole screen for the interactive browser.
pub fn render_state(state: &PagerState) -> String {
    let body = match state.view() {
        View::Idle => "Type `s <term>` to search.".to_string(),
        View::Error(message) => format!("❌ {}", message),
        View::Results(result) if result.items.is_empty() => "No repositories found.".to_string(),
        View::Results(result) => results_table(result),
    };

    let mut page_line = match state.total_count() {
        Some(total) => format!("Page {} · {} repositories", state.current_page(), total),
        None => format!("Page {}", state.current_page()),
    };
    if state.is_loading() {
        page_line.push_str(" (loading)");
    }

    format!(
        "{}\n{}   [prev: {}] [next: {}]",
        body.trim_end(),
        page_line,
        on_off(!state.is_prev_disabled()),
        on_off(!state.is_next_disabled())
    )
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json_output = serde_json::to_string_pretty(value)?;
    println!("{}", json_output);
    Ok(())
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

// Truncate for display, on a char boundary
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let kept: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
