// src/present/sanitize.rs
// =============================================================================
// Turns raw user input into a search term.
//
// Rule: word characters (ASCII letters, digits, underscore), '.' and ' ' pass
// through unchanged. Everything else becomes a numeric character reference,
// e.g. '+' -> "&#43;".
// =============================================================================

use std::fmt::Write;

pub fn sanitize_query(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | ' ') {
            out.push(c);
        } else {
            // Writing into a String cannot fail.
            let _ = write!(out, "&#{};", c as u32);
        }
    }
    out
}
