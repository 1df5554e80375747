use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which of the two parallel MyAnimeList resources an item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    Anime,
    Manga,
}

impl CollectionKind {
    /// Wire name, used in endpoint paths and entry URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anime => "anime",
            Self::Manga => "manga",
        }
    }
}

impl std::fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized consumption state. Raw upstream vocabulary never leaves the
/// normalizer; downstream filtering only ever sees these four values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusCategory {
    Consuming,
    Completed,
    Plan,
    Other,
}

impl StatusCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Consuming => "consuming",
            Self::Completed => "completed",
            Self::Plan => "plan",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized media-format class. Manga-kind items are always `Manga`,
/// whatever their raw media type says.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeCategory {
    #[serde(rename = "TV")]
    Tv,
    Movie,
    Manga,
    Other,
}

impl TypeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tv => "TV",
            Self::Movie => "Movie",
            Self::Manga => "Manga",
            Self::Other => "Other",
        }
    }

    pub const ALL: &[TypeCategory] = &[Self::Tv, Self::Movie, Self::Manga, Self::Other];
}

impl std::fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One normalized entry from a user's list. Built once per fetch and never
/// mutated afterwards; `id` + `kind` form the identity within a fetch result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionItem {
    pub id: u64,
    pub kind: CollectionKind,
    /// Display title; the trimmed Japanese title when present and non-blank,
    /// the canonical title otherwise.
    pub title: String,
    pub native_title: Option<String>,
    pub image: Option<String>,
    /// Raw upstream status string, kept for display only.
    pub status: Option<String>,
    pub status_category: StatusCategory,
    /// Raw upstream media type, kept for display only.
    pub media_type: Option<String>,
    pub type_category: TypeCategory,
    pub score: Option<u8>,
    /// Display progress, `"<n> eps"` or `"<n> ch"` depending on kind.
    pub progress: String,
    pub url: String,
    pub tags: Vec<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub finish_date: Option<DateTime<Utc>>,
}

/// Outcome of a list fetch: items plus an optional page-level error message
/// and an optional continuation cursor. A first-page failure carries an
/// error and no items; a fetch-all stopped mid-way carries partial items
/// and no error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionFetchResult {
    pub items: Vec<CollectionItem>,
    pub error: Option<String>,
    pub next: Option<String>,
}

impl CollectionFetchResult {
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            error: Some(error.into()),
            next: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_wire_names() {
        assert_eq!(CollectionKind::Anime.to_string(), "anime");
        assert_eq!(CollectionKind::Manga.to_string(), "manga");
    }

    #[test]
    fn type_category_display_names() {
        let names: Vec<&str> = TypeCategory::ALL.iter().map(|t| t.as_str()).collect();
        assert_eq!(names, ["TV", "Movie", "Manga", "Other"]);
    }

    #[test]
    fn item_serializes_with_closed_set_categories() {
        let item = CollectionItem {
            id: 52991,
            kind: CollectionKind::Anime,
            title: "葬送のフリーレン".into(),
            native_title: Some("葬送のフリーレン".into()),
            image: None,
            status: Some("watching".into()),
            status_category: StatusCategory::Consuming,
            media_type: Some("tv".into()),
            type_category: TypeCategory::Tv,
            score: Some(9),
            progress: "14 eps".into(),
            url: "https://myanimelist.net/anime/52991".into(),
            tags: vec![],
            start_date: None,
            finish_date: None,
        };

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["status_category"], "consuming");
        assert_eq!(json["type_category"], "TV");
        assert_eq!(json["kind"], "anime");
    }

    #[test]
    fn failed_result_has_no_items() {
        let result = CollectionFetchResult::failed("boom");
        assert!(result.items.is_empty());
        assert_eq!(result.error.as_deref(), Some("boom"));
        assert!(result.next.is_none());
    }
}
