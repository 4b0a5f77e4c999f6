// src/extractor/mod.rs

pub mod courses;
pub mod resources;
mod schema;

pub use schema::PageSchema;

use regex::Regex;

/// Text strictly between the first match of `start` and the first match of
/// `end` that begins after it. `None` if either anchor is missing.
pub fn extract_between<'t>(text: &'t str, start: &Regex, end: &Regex) -> Option<&'t str> {
    let start_index = start.find(text)?.end();
    let end_match = end.find_at(text, start_index)?;
    Some(&text[start_index..end_match.start()])
}
