//! Normalizer: raw MyAnimeList records into uniform [`CollectionItem`]s.
//!
//! Pure mapping with no failure path. Missing or malformed optional fields
//! degrade to `None`/defaults, and the derived categories always land in
//! their closed sets, so consumers never see upstream vocabulary.

use chrono::{DateTime, NaiveDate, Utc};
use tsundoku_core::{CollectionItem, CollectionKind, StatusCategory, TypeCategory};

use crate::types::{MalListItem, MalListStatus};

/// Normalize a page of records, preserving order.
pub fn map_items(kind: CollectionKind, data: Vec<MalListItem>) -> Vec<CollectionItem> {
    data.into_iter().map(|raw| map_item(kind, raw)).collect()
}

/// Normalize one record.
pub fn map_item(kind: CollectionKind, raw: MalListItem) -> CollectionItem {
    let MalListItem { node, list_status } = raw;
    let status = list_status.unwrap_or_default();

    let native_title = node.alternative_titles.and_then(|alt| alt.ja);
    let title = native_title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| node.title.clone());

    let image = node
        .main_picture
        .and_then(|picture| picture.large.or(picture.medium));

    let status_category = status_category(kind, status.status.as_deref());
    let type_category = type_category(kind, node.media_type.as_deref());
    let progress = progress(kind, &status);
    let start_date = status.start_date.as_deref().and_then(parse_date);
    let finish_date = status.finish_date.as_deref().and_then(parse_date);

    CollectionItem {
        id: node.id,
        kind,
        title,
        native_title,
        image,
        status_category,
        status: status.status,
        type_category,
        media_type: node.media_type,
        score: status.score,
        progress,
        url: format!("https://myanimelist.net/{}/{}", kind, node.id),
        tags: status
            .tags
            .unwrap_or_default()
            .into_iter()
            .filter(|tag| !tag.trim().is_empty())
            .collect(),
        start_date,
        finish_date,
    }
}

/// Fixed per-kind lookup from raw status vocabulary to the closed set.
fn status_category(kind: CollectionKind, raw: Option<&str>) -> StatusCategory {
    match kind {
        CollectionKind::Anime => match raw {
            Some("watching") => StatusCategory::Consuming,
            Some("completed") => StatusCategory::Completed,
            Some("plan_to_watch") => StatusCategory::Plan,
            _ => StatusCategory::Other,
        },
        CollectionKind::Manga => match raw {
            Some("reading") => StatusCategory::Consuming,
            Some("completed") => StatusCategory::Completed,
            Some("plan_to_read") => StatusCategory::Plan,
            _ => StatusCategory::Other,
        },
    }
}

/// Manga-kind records are always `Manga`; anime records map their raw
/// media type case-insensitively.
fn type_category(kind: CollectionKind, media_type: Option<&str>) -> TypeCategory {
    if kind == CollectionKind::Manga {
        return TypeCategory::Manga;
    }
    match media_type.map(|m| m.to_ascii_lowercase()).as_deref() {
        Some("tv") => TypeCategory::Tv,
        Some("movie") => TypeCategory::Movie,
        _ => TypeCategory::Other,
    }
}

fn progress(kind: CollectionKind, status: &MalListStatus) -> String {
    match kind {
        CollectionKind::Anime => {
            format!("{} eps", status.num_episodes_watched.unwrap_or(0))
        }
        CollectionKind::Manga => {
            format!("{} ch", status.num_chapters_read.unwrap_or(0))
        }
    }
}

/// Parse the API's `YYYY-MM-DD` date into a UTC-midnight timestamp.
/// Anything unparseable degrades to `None`.
fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
