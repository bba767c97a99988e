// src/present/mod.rs
// =============================================================================
// The presentation side: everything between the user and the GitHub client.
//
// Submodules:
// - sanitize: Cleans raw input before it becomes a search term
// - pager: Page number, known total and prev/next availability
// - render: Tables, messages and detail text
// =============================================================================

mod pager;
mod render;
mod sanitize;

pub use pager::{PagerState, View};
pub use render::{
    detail_text, outcome_message, page_footer, print_json, render_state, results_table,
};
pub use sanitize::sanitize_query;
