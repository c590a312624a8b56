//! Results list rendering.

use hearth_core::SearchResult;

use crate::model::ListEntry;

/// Render one row. The highlighted row is marked with `>`.
pub fn render_row(item: &SearchResult, selected: bool) -> String {
    let marker = if selected { ">" } else { " " };
    let mut line = format!("{} {}", marker, item.title);
    if let Some(subtitle) = &item.subtitle {
        line.push_str(" - ");
        line.push_str(subtitle);
    }
    if let Some(meta) = &item.meta {
        line.push_str(" (");
        line.push_str(meta);
        line.push(')');
    }
    line.push_str(&format!(" [{}]", item.kind.as_str()));
    line
}

/// Render group headers and rows, one line each.
pub fn render_entries(entries: &[ListEntry], cursor_index: usize) -> Vec<String> {
    entries
        .iter()
        .map(|entry| match entry {
            ListEntry::GroupHeader { title } => format!("# {}", title),
            ListEntry::Item { item, flat_index } => render_row(item, *flat_index == cursor_index),
        })
        .collect()
}
