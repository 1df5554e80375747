//! Grid view-state engine: filter options with counts, disabled-option
//! rules, and pagination over a normalized item list.
//!
//! The engine holds only the three interaction inputs (type filter, status
//! filter, page) and re-derives everything else from a borrowed item slice,
//! so the same state produces the same view for the same list.

use crate::models::{CollectionItem, StatusCategory, TypeCategory};

/// Entries shown per grid page.
pub const PAGE_SIZE: usize = 6;

/// Type-filter options offered by the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Tv,
    Movie,
    Manga,
}

impl TypeFilter {
    pub const ALL: &[TypeFilter] = &[Self::All, Self::Tv, Self::Movie, Self::Manga];

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Tv => "TV",
            Self::Movie => "Movie",
            Self::Manga => "Manga",
        }
    }

    fn matches(&self, item: &CollectionItem) -> bool {
        match self {
            Self::All => true,
            Self::Tv => item.type_category == TypeCategory::Tv,
            Self::Movie => item.type_category == TypeCategory::Movie,
            Self::Manga => item.type_category == TypeCategory::Manga,
        }
    }
}

/// Status-filter options offered by the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Consuming,
    Completed,
    Plan,
}

impl StatusFilter {
    pub const ALL: &[StatusFilter] = &[
        Self::All,
        Self::Consuming,
        Self::Completed,
        Self::Plan,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Consuming => "Currently Consuming",
            Self::Completed => "Completed",
            Self::Plan => "Plan to Watch",
        }
    }

    fn matches(&self, item: &CollectionItem) -> bool {
        match self {
            Self::All => true,
            Self::Consuming => item.status_category == StatusCategory::Consuming,
            Self::Completed => item.status_category == StatusCategory::Completed,
            Self::Plan => item.status_category == StatusCategory::Plan,
        }
    }
}

/// A filter option with its entry count. Zero-count options are disabled
/// and cannot be activated.
#[derive(Debug, Clone, Copy)]
pub struct FilterOption<K> {
    pub key: K,
    pub label: &'static str,
    pub count: usize,
}

impl<K> FilterOption<K> {
    pub fn disabled(&self) -> bool {
        self.count == 0
    }
}

/// Interaction state of the grid view.
///
/// The type filter is applied first; status-option counts are computed
/// against that intermediate set, so changing the type filter changes which
/// status options are disabled but never the other way around.
#[derive(Debug, Clone, Copy)]
pub struct GridView {
    type_filter: TypeFilter,
    status_filter: StatusFilter,
    page: usize,
}

impl Default for GridView {
    fn default() -> Self {
        Self::new()
    }
}

impl GridView {
    pub fn new() -> Self {
        Self {
            type_filter: TypeFilter::default(),
            status_filter: StatusFilter::default(),
            page: 1,
        }
    }

    pub fn type_filter(&self) -> TypeFilter {
        self.type_filter
    }

    pub fn status_filter(&self) -> StatusFilter {
        self.status_filter
    }

    /// Type options with counts over the full list.
    pub fn type_options(&self, items: &[CollectionItem]) -> Vec<FilterOption<TypeFilter>> {
        TypeFilter::ALL
            .iter()
            .map(|&key| FilterOption {
                key,
                label: key.label(),
                count: items.iter().filter(|i| key.matches(i)).count(),
            })
            .collect()
    }

    /// Status options with counts over the type-filtered intermediate set.
    pub fn status_options(&self, items: &[CollectionItem]) -> Vec<FilterOption<StatusFilter>> {
        StatusFilter::ALL
            .iter()
            .map(|&key| FilterOption {
                key,
                label: key.label(),
                count: items
                    .iter()
                    .filter(|i| self.type_filter.matches(i) && key.matches(i))
                    .count(),
            })
            .collect()
    }

    /// Items passing both active filters, in list order.
    pub fn filtered<'a>(&self, items: &'a [CollectionItem]) -> Vec<&'a CollectionItem> {
        items
            .iter()
            .filter(|i| self.type_filter.matches(i) && self.status_filter.matches(i))
            .collect()
    }

    /// Total pages for the current filters, floored at 1.
    pub fn page_count(&self, items: &[CollectionItem]) -> usize {
        self.filtered(items).len().div_ceil(PAGE_SIZE).max(1)
    }

    /// Current page clamped into `[1, page_count]`.
    pub fn current_page(&self, items: &[CollectionItem]) -> usize {
        self.page.clamp(1, self.page_count(items))
    }

    /// The current page's slice of the filtered list.
    pub fn visible<'a>(&self, items: &'a [CollectionItem]) -> Vec<&'a CollectionItem> {
        let filtered = self.filtered(items);
        let start = (self.current_page(items) - 1) * PAGE_SIZE;
        filtered
            .into_iter()
            .skip(start)
            .take(PAGE_SIZE)
            .collect()
    }

    /// Activate a type filter. Disabled options and re-selecting the active
    /// option are no-ops; a real change resets the page to 1.
    pub fn set_type_filter(&mut self, items: &[CollectionItem], filter: TypeFilter) -> bool {
        if filter == self.type_filter {
            return false;
        }
        if items.iter().filter(|i| filter.matches(i)).count() == 0 {
            return false;
        }
        self.type_filter = filter;
        self.page = 1;
        true
    }

    /// Activate a status filter. Disabled options (counted against the
    /// type-filtered set) and re-selection are no-ops; a change resets the
    /// page to 1.
    pub fn set_status_filter(&mut self, items: &[CollectionItem], filter: StatusFilter) -> bool {
        if filter == self.status_filter {
            return false;
        }
        let count = items
            .iter()
            .filter(|i| self.type_filter.matches(i) && filter.matches(i))
            .count();
        if count == 0 {
            return false;
        }
        self.status_filter = filter;
        self.page = 1;
        true
    }

    /// Move forward one page, clamping at the last page. Never wraps.
    pub fn next_page(&mut self, items: &[CollectionItem]) {
        self.page = (self.current_page(items) + 1).min(self.page_count(items));
    }

    /// Move back one page, clamping at page 1. Never wraps.
    pub fn prev_page(&mut self, items: &[CollectionItem]) {
        self.page = (self.current_page(items) - 1).max(1);
    }

    /// Jump to a page, clamped into the valid range.
    pub fn set_page(&mut self, items: &[CollectionItem], page: usize) {
        self.page = page.clamp(1, self.page_count(items));
    }
}

/// Backing order for the grid view: descending score (missing counts as 0),
/// case-insensitive title as the tie-break.
pub fn sort_for_grid(items: &mut [CollectionItem]) {
    items.sort_by(|a, b| {
        b.score
            .unwrap_or(0)
            .cmp(&a.score.unwrap_or(0))
            .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
    });
}

/// Backing order for the timeline view: descending by finish date, falling
/// back to start date, falling back to the zero timestamp.
pub fn sort_for_timeline(items: &mut [CollectionItem]) {
    items.sort_by_key(|item| {
        std::cmp::Reverse(
            item.finish_date
                .or(item.start_date)
                .unwrap_or(chrono::DateTime::UNIX_EPOCH),
        )
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CollectionKind, StatusCategory, TypeCategory};
    use chrono::{TimeZone, Utc};

    fn item(
        id: u64,
        type_category: TypeCategory,
        status_category: StatusCategory,
    ) -> CollectionItem {
        CollectionItem {
            id,
            kind: CollectionKind::Anime,
            title: format!("Title {id}"),
            native_title: None,
            image: None,
            status: None,
            status_category,
            media_type: None,
            type_category,
            score: None,
            progress: "0 eps".into(),
            url: format!("https://myanimelist.net/anime/{id}"),
            tags: vec![],
            start_date: None,
            finish_date: None,
        }
    }

    fn sample() -> Vec<CollectionItem> {
        vec![
            item(1, TypeCategory::Tv, StatusCategory::Consuming),
            item(2, TypeCategory::Tv, StatusCategory::Completed),
            item(3, TypeCategory::Tv, StatusCategory::Completed),
            item(4, TypeCategory::Movie, StatusCategory::Plan),
            item(5, TypeCategory::Movie, StatusCategory::Other),
        ]
    }

    #[test]
    fn type_counts_cover_full_list() {
        let items = sample();
        let view = GridView::new();
        let options = view.type_options(&items);

        let by_key = |key: TypeFilter| options.iter().find(|o| o.key == key).unwrap().count;
        assert_eq!(by_key(TypeFilter::All), 5);
        assert_eq!(by_key(TypeFilter::Tv), 3);
        assert_eq!(by_key(TypeFilter::Movie), 2);
        assert_eq!(by_key(TypeFilter::Manga), 0);
    }

    #[test]
    fn zero_count_option_is_disabled_and_inert() {
        let items = sample();
        let mut view = GridView::new();

        let manga = view
            .type_options(&items)
            .into_iter()
            .find(|o| o.key == TypeFilter::Manga)
            .unwrap();
        assert!(manga.disabled());

        // Forcing the disabled option changes nothing.
        assert!(!view.set_type_filter(&items, TypeFilter::Manga));
        assert_eq!(view.type_filter(), TypeFilter::All);
        assert_eq!(view.filtered(&items).len(), 5);
    }

    #[test]
    fn status_counts_follow_type_filter() {
        let items = sample();
        let mut view = GridView::new();
        assert!(view.set_type_filter(&items, TypeFilter::Tv));

        let options = view.status_options(&items);
        let by_key = |key: StatusFilter| options.iter().find(|o| o.key == key).unwrap().count;
        assert_eq!(by_key(StatusFilter::All), 3);
        assert_eq!(by_key(StatusFilter::Consuming), 1);
        assert_eq!(by_key(StatusFilter::Completed), 2);
        assert_eq!(by_key(StatusFilter::Plan), 0);
    }

    #[test]
    fn status_filter_does_not_change_type_counts() {
        let items = sample();
        let mut view = GridView::new();
        assert!(view.set_status_filter(&items, StatusFilter::Completed));

        let options = view.type_options(&items);
        let by_key = |key: TypeFilter| options.iter().find(|o| o.key == key).unwrap().count;
        assert_eq!(by_key(TypeFilter::Tv), 3);
        assert_eq!(by_key(TypeFilter::Movie), 2);
    }

    #[test]
    fn thirteen_items_paginate_into_three_pages() {
        let items: Vec<CollectionItem> = (0..13)
            .map(|i| item(i, TypeCategory::Tv, StatusCategory::Completed))
            .collect();
        let mut view = GridView::new();

        assert_eq!(view.page_count(&items), 3);
        view.next_page(&items);
        view.next_page(&items);
        assert_eq!(view.current_page(&items), 3);
        assert_eq!(view.visible(&items).len(), 1);

        // No wraparound past the last page.
        view.next_page(&items);
        assert_eq!(view.current_page(&items), 3);
    }

    #[test]
    fn prev_page_clamps_at_one() {
        let items = sample();
        let mut view = GridView::new();
        view.prev_page(&items);
        assert_eq!(view.current_page(&items), 1);
    }

    #[test]
    fn filter_change_resets_page() {
        let mut items: Vec<CollectionItem> = (0..13)
            .map(|i| item(i, TypeCategory::Tv, StatusCategory::Completed))
            .collect();
        items.extend((13..17).map(|i| item(i, TypeCategory::Movie, StatusCategory::Plan)));

        let mut view = GridView::new();
        view.set_page(&items, 3);
        assert_eq!(view.current_page(&items), 3);

        // Shrinking the result set to 4 items clamps back down to page 1.
        assert!(view.set_type_filter(&items, TypeFilter::Movie));
        assert_eq!(view.current_page(&items), 1);
        assert_eq!(view.page_count(&items), 1);
        assert_eq!(view.filtered(&items).len(), 4);
    }

    #[test]
    fn reselecting_active_filter_keeps_page() {
        let items: Vec<CollectionItem> = (0..13)
            .map(|i| item(i, TypeCategory::Tv, StatusCategory::Completed))
            .collect();
        let mut view = GridView::new();
        view.next_page(&items);
        assert!(!view.set_type_filter(&items, TypeFilter::All));
        assert_eq!(view.current_page(&items), 2);
    }

    #[test]
    fn grid_sort_orders_by_score_then_title() {
        let mut items = sample();
        items[0].score = Some(7);
        items[0].title = "Beta".into();
        items[1].score = Some(9);
        items[1].title = "Gamma".into();
        items[2].score = Some(7);
        items[2].title = "alpha".into();
        items[3].score = None;
        items[3].title = "Delta".into();
        items[4].score = None;
        items[4].title = "Chi".into();

        sort_for_grid(&mut items);
        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["Gamma", "alpha", "Beta", "Chi", "Delta"]);
    }

    #[test]
    fn timeline_sort_prefers_finish_then_start_then_epoch() {
        let date = |y, m, d| Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap();
        let mut items = sample();
        items[0].finish_date = Some(date(2022, 5, 1));
        items[1].start_date = Some(date(2023, 1, 10));
        items[2].finish_date = Some(date(2023, 6, 1));
        items[2].start_date = Some(date(2021, 1, 1));
        // items[3] and items[4] have no dates at all.

        sort_for_timeline(&mut items);
        let ids: Vec<u64> = items.iter().map(|i| i.id).collect();
        assert_eq!(&ids[..3], &[3, 2, 1]);
        // Undated items sink to the end on the epoch fallback.
        assert_eq!(&ids[3..], &[4, 5]);
    }
}
