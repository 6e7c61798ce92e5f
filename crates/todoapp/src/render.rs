//! Plain-text summaries of lists and items.
//!
//! These are conveniences for clients that just want something readable; they
//! carry no business rules and clients are free to render entities themselves.

use crate::model::{format_deadline, Item, ItemStatus, List};

pub fn status_glyph(status: ItemStatus) -> &'static str {
    match status {
        ItemStatus::NotStarted => "[ ]",
        ItemStatus::InProgress => "[~]",
        ItemStatus::Done => "[x]",
        ItemStatus::Paused => "[=]",
        ItemStatus::Abandoned => "[-]",
    }
}

/// `[x] buy milk (2024-05-01 18:30)`
pub fn render_item(item: &Item) -> String {
    let mut line = format!("{} {}", status_glyph(item.status), item.content);
    if let Some(deadline) = &item.deadline {
        line.push_str(&format!(" ({})", format_deadline(deadline)));
    }
    line
}

/// Header line, then one section per non-empty status with each item prefixed
/// by its id.
pub fn render_list(list: &List) -> String {
    let mut out = format!("{} (#{})\n", list.name, list.id);
    if list.items.is_empty() {
        out.push_str("  (empty)\n");
        return out;
    }
    for (status, items) in list.items_by_status() {
        if items.is_empty() {
            continue;
        }
        out.push_str(&format!("{}:\n", status.label()));
        for item in items {
            out.push_str(&format!("  {:>3}  {}\n", item.id, render_item(item)));
        }
    }
    out
}

/// One `name (#id)` line per list.
pub fn render_index(lists: &[List]) -> String {
    lists
        .iter()
        .map(|list| format!("{} (#{})\n", list.name, list.id))
        .collect()
}
