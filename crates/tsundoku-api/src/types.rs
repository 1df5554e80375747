//! Raw wire types for the MyAnimeList v2 list endpoint.
//!
//! Fields are conservative (`Option` / `#[serde(default)]`) because the
//! API omits or nulls most of them depending on the requested field set;
//! a malformed optional field should degrade, not fail the page.

use serde::Deserialize;

/// Response envelope: `{ data: [...], paging: { next? } }`.
#[derive(Debug, Deserialize)]
pub struct MalListResponse {
    #[serde(default)]
    pub data: Vec<MalListItem>,
    #[serde(default)]
    pub paging: MalPaging,
}

/// One list record: the catalog node plus the user's list status.
#[derive(Debug, Deserialize)]
pub struct MalListItem {
    pub node: MalNode,
    pub list_status: Option<MalListStatus>,
}

#[derive(Debug, Deserialize)]
pub struct MalNode {
    pub id: u64,
    pub title: String,
    pub main_picture: Option<MalPicture>,
    pub alternative_titles: Option<MalAlternativeTitles>,
    pub media_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MalPicture {
    pub medium: Option<String>,
    pub large: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MalAlternativeTitles {
    pub ja: Option<String>,
}

/// The user-side list status. Anime lists carry `num_episodes_watched`,
/// manga lists `num_chapters_read`; the rest is shared.
#[derive(Debug, Default, Deserialize)]
pub struct MalListStatus {
    pub status: Option<String>,
    pub score: Option<u8>,
    pub num_episodes_watched: Option<u32>,
    pub num_chapters_read: Option<u32>,
    pub tags: Option<Vec<String>>,
    pub start_date: Option<String>,
    pub finish_date: Option<String>,
}

/// Pagination cursor: an opaque next-page URL.
#[derive(Debug, Default, Deserialize)]
pub struct MalPaging {
    pub next: Option<String>,
}
