use chrono::Local;
use comfy_table::{modifiers, presets, Attribute, Cell, Color, Table};
use movienight_core::{local_watch_date, resolve_title_link};
use movienight_models::{SearchResult, User, WatchlogItem};
use owo_colors::OwoColorize;

fn table_with_header(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    let header: Vec<Cell> = header
        .iter()
        .map(|h| Cell::new(h).fg(Color::Cyan).add_attribute(Attribute::Bold))
        .collect();
    table.set_header(header);
    table
}

fn or_dash(value: Option<&str>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or("-").to_string()
}

pub fn users_table(users: &[User]) -> Table {
    let mut table = table_with_header(&["#", "ID", "Name", "Email", "Avatar"]);
    for (position, user) in users.iter().enumerate() {
        table.add_row(vec![
            Cell::new(position + 1),
            Cell::new(user.id),
            Cell::new(&user.name),
            Cell::new(or_dash(user.email.as_deref())),
            Cell::new(or_dash(user.avatar_url.as_deref())),
        ]);
    }
    table
}

/// Watch date as the local calendar day, raw value if unparseable
pub fn watch_date(item: &WatchlogItem) -> String {
    local_watch_date(&item.watched_at, &Local)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| item.watched_at.clone())
}

pub fn watchlog_table(items: &[WatchlogItem]) -> Table {
    let mut table = table_with_header(&["ID", "Date", "Title", "Picked by", "Link"]);
    for item in items {
        let title = if item.is_placeholder {
            format!("{} {}", item.title, "(placeholder)".yellow())
        } else {
            item.title.clone()
        };
        table.add_row(vec![
            Cell::new(item.id),
            Cell::new(watch_date(item)),
            Cell::new(title),
            Cell::new(&item.picker_name),
            Cell::new(or_dash(item.search_url.as_deref())),
        ]);
    }
    table
}

pub fn search_table(results: &[SearchResult]) -> Table {
    let mut table = table_with_header(&["#", "Title", "Year", "Type", "Link"]);
    for (position, result) in results.iter().enumerate() {
        let link = resolve_title_link(result);
        table.add_row(vec![
            Cell::new(position + 1),
            Cell::new(&result.title),
            Cell::new(or_dash(result.year.as_deref())),
            Cell::new(link.kind.label()),
            Cell::new(link.url()),
        ]);
    }
    table
}
