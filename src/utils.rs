// src/utils.rs

use std::collections::BTreeSet;

/// Turns `1,3`, `2-4` or `all` into sorted, de-duplicated zero-based indices.
pub fn parse_selection_indices(selection_str: &str, total_items: usize) -> Vec<usize> {
    if selection_str.trim().eq_ignore_ascii_case("all") { return (0..total_items).collect(); }
    let mut indices = BTreeSet::new();
    for part in selection_str.split(',').map(|s| s.trim()) {
        if part.is_empty() { continue; }
        if let Some(range_part) = part.split_once('-') {
            if let (Ok(start), Ok(end)) = (range_part.0.trim().parse::<usize>(), range_part.1.trim().parse::<usize>()) {
                if start == 0 || end == 0 { continue; }
                let (min, max) = (start.min(end), start.max(end).min(total_items));
                indices.extend((min..=max).map(|i| i - 1));
            }
        } else if let Ok(num) = part.parse::<usize>() {
            if num > 0 && num <= total_items { indices.insert(num - 1); }
        }
    }
    indices.into_iter().collect()
}

/// Shortens `text` to at most `max_chars` characters, marking the cut with `...`.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}
