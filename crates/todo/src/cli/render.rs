//! Styled terminal output.
//!
//! Layout follows `todoapp::render`; this module only adds color. `console`
//! drops the styling by itself when stdout isn't a terminal, so piped output
//! and tests see plain text.

use console::{style, StyledObject};
use todoapp::commands::doctor::DoctorReport;
use todoapp::model::{format_deadline, Item, ItemStatus, List, ListId, OwnerKey};
use todoapp::render::status_glyph;

fn styled_glyph(status: ItemStatus) -> StyledObject<&'static str> {
    let glyph = style(status_glyph(status));
    match status {
        ItemStatus::NotStarted => glyph,
        ItemStatus::InProgress => glyph.yellow(),
        ItemStatus::Done => glyph.green(),
        ItemStatus::Paused => glyph.cyan(),
        ItemStatus::Abandoned => glyph.red().dim(),
    }
}

pub fn item_line(item: &Item) -> String {
    let mut line = format!("{} {}", styled_glyph(item.status), item.content);
    if let Some(deadline) = &item.deadline {
        line.push_str(&format!(" {}", style(format!("({})", format_deadline(deadline))).dim()));
    }
    line
}

fn header(list: &List) -> String {
    format!("{} {}", style(&list.name).bold(), style(format!("(#{})", list.id)).dim())
}

pub fn list(list: &List) -> String {
    let mut out = format!("{}\n", header(list));
    if list.items.is_empty() {
        out.push_str(&format!("  {}\n", style("(empty)").dim()));
        return out;
    }
    for (status, items) in list.items_by_status() {
        if items.is_empty() {
            continue;
        }
        out.push_str(&format!("{}\n", style(format!("{}:", status.label())).underlined()));
        for item in items {
            out.push_str(&format!("  {:>3}  {}\n", item.id, item_line(item)));
        }
    }
    out
}

pub fn index(owner: OwnerKey, lists: &[List]) -> String {
    if lists.is_empty() {
        return format!("{}\n", style(format!("No lists for owner {}.", owner)).dim());
    }
    lists.iter().map(|l| format!("{}\n", header(l))).collect()
}

pub fn created(list: &List) -> String {
    format!("Created list {}\n", header(list))
}

pub fn deleted(list: &List) -> String {
    format!("Deleted list {}\n", header(list))
}

pub fn item_added(list_id: ListId, item: &Item) -> String {
    format!("Added to #{}: {:>3}  {}\n", list_id, item.id, item_line(item))
}

pub fn item_removed(list_id: ListId, item: &Item) -> String {
    format!("Removed from #{}: {}\n", list_id, item.content)
}

pub fn item_updated(item: &Item) -> String {
    format!("{:>3}  {}\n", item.id, item_line(item))
}

pub fn shared(list: &List) -> String {
    let authors: Vec<String> = list.authors.iter().map(|a| a.to_string()).collect();
    format!("{} authors: {}\n", header(list), authors.join(", "))
}

pub fn doctor(report: &DoctorReport) -> String {
    if report.is_clean() {
        return format!("{}\n", style("Registry is consistent.").green());
    }
    let join = |ids: &[ListId]| {
        ids.iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };
    let mut out = String::new();
    if !report.released_ids.is_empty() {
        out.push_str(&format!("Released unused ids: {}\n", join(&report.released_ids)));
    }
    if !report.registered_ids.is_empty() {
        out.push_str(&format!("Registered missing ids: {}\n", join(&report.registered_ids)));
    }
    if !report.duplicate_ids.is_empty() {
        out.push_str(&format!(
            "{} {}\n",
            style("Ids used by more than one list:").red(),
            join(&report.duplicate_ids)
        ));
    }
    out
}
