//! Text rendering for the grid and timeline views.
//!
//! Pure formatting over the view engine's derivations; all strings are
//! returned so the callers own the printing (and the tests the asserting).

use std::fmt::Write;

use tsundoku_core::config::AppConfig;
use tsundoku_core::timeline::{Side, TimelineGroup};
use tsundoku_core::view::{FilterOption, GridView};
use tsundoku_core::CollectionItem;

/// Inline warning shown above a view when the fetch reported an error.
fn error_line(error: &str) -> String {
    format!("Some data may be missing: {error}\n\n")
}

/// Render the filtered, paginated grid.
pub fn render_grid(items: &[CollectionItem], view: &GridView, error: Option<&str>) -> String {
    let mut out = String::new();
    if let Some(error) = error {
        out.push_str(&error_line(error));
    }

    out.push_str(&filter_row(
        "Type",
        &view.type_options(items),
        |o: &FilterOption<_>| o.key == view.type_filter(),
    ));
    out.push_str(&filter_row(
        "Status",
        &view.status_options(items),
        |o: &FilterOption<_>| o.key == view.status_filter(),
    ));
    out.push('\n');

    if items.is_empty() {
        out.push_str("Nothing to show right now.\n");
        return out;
    }

    let filtered = view.filtered(items);
    let _ = writeln!(out, "Showing {} of {} entries", filtered.len(), items.len());
    out.push('\n');

    for item in view.visible(items) {
        out.push_str(&card_line(item));
    }

    let page_count = view.page_count(items);
    if page_count > 1 {
        let _ = write!(out, "\nPage {} of {}\n", view.current_page(items), page_count);
    }
    out
}

fn filter_row<K>(
    label: &str,
    options: &[FilterOption<K>],
    is_active: impl Fn(&FilterOption<K>) -> bool,
) -> String {
    let cells: Vec<String> = options
        .iter()
        .map(|option| {
            if is_active(option) {
                format!("[{} {}]", option.label, option.count)
            } else {
                format!("{} {}", option.label, option.count)
            }
        })
        .collect();
    format!("{label:<8}{}\n", cells.join("   "))
}

fn card_line(item: &CollectionItem) -> String {
    let score = item
        .score
        .map(|s| s.to_string())
        .unwrap_or_else(|| "-".into());
    let mut line = format!(
        "{score:>3}  {:<6} {:>9}  {:<12} {}\n",
        item.type_category.as_str(),
        item.progress,
        item.status_category.as_str(),
        item.title,
    );
    if !item.tags.is_empty() {
        let _ = writeln!(line, "     tags: {}", item.tags.join(", "));
    }
    line
}

/// Render the year-bucketed timeline.
pub fn render_timeline(groups: &[TimelineGroup<'_>], error: Option<&str>) -> String {
    let mut out = String::new();
    if let Some(error) = error {
        out.push_str(&error_line(error));
    }

    if groups.is_empty() {
        out.push_str("No entries with timeline data yet. Check back soon.\n");
        return out;
    }

    for group in groups {
        let _ = writeln!(out, "── {} ──────────────────────────────", group.year);
        for entry in &group.entries {
            let side = match entry.side {
                Side::Left => "L",
                Side::Right => "R",
            };
            let score = entry
                .item
                .score
                .filter(|&s| s > 0)
                .map(|s| format!("  score {s}"))
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "  {side}  {}  {:>5}px  {}{score}",
                entry.date.format("%Y-%m-%d"),
                entry.bar_height,
                entry.item.title,
            );
            if !entry.item.tags.is_empty() {
                let _ = writeln!(out, "                           {}", entry.item.tags.join(", "));
            }
        }
        out.push('\n');
    }
    out
}

/// Render the effective configuration with the credential masked.
pub fn render_config(config: &AppConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "config file: {}", AppConfig::config_path().display());
    let _ = writeln!(
        out,
        "client_id:   {}",
        config
            .mal
            .client_id
            .as_deref()
            .map(mask)
            .unwrap_or_else(|| "<not set>".into())
    );
    let _ = writeln!(
        out,
        "username:    {}",
        config.mal.username.as_deref().unwrap_or("<not set>")
    );
    let _ = writeln!(out, "page_cap:    {}", config.mal.page_cap);
    out
}

fn mask(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    format!("{visible}…")
}
