//! Chronological grouping and layout for the timeline view.
//!
//! Items are bucketed by the year of their anchor date (finish date,
//! falling back to start date); items without either date are excluded.
//! Bucket order and entry order within buckets are inherited from the
//! incoming list (see [`crate::view::sort_for_timeline`] for the backing
//! order), and each entry alternates left/right placement by its global
//! index across all buckets.

use chrono::{DateTime, Datelike, Utc};

use crate::models::CollectionItem;

/// Bar height used when an entry has no start date to measure from.
pub const DEFAULT_BAR_HEIGHT: u32 = 72;
/// Clamp bounds for the duration bar, in pixels.
pub const MIN_BAR_HEIGHT: u32 = 60;
pub const MAX_BAR_HEIGHT: u32 = 220;
/// Scale factor from consumption days to bar pixels.
pub const PIXELS_PER_DAY: f64 = 0.65;

/// Which side of the center line an entry is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// One timeline entry: a dated item with its derived placement and size.
#[derive(Debug, Clone, Copy)]
pub struct TimelineEntry<'a> {
    pub item: &'a CollectionItem,
    /// Anchor date: finish date, else start date.
    pub date: DateTime<Utc>,
    pub side: Side,
    pub bar_height: u32,
}

/// A year bucket of timeline entries, in first-seen order.
#[derive(Debug, Clone)]
pub struct TimelineGroup<'a> {
    pub year: i32,
    pub entries: Vec<TimelineEntry<'a>>,
}

/// Bucket items into year groups and derive per-entry placement.
///
/// The incoming order is preserved; callers wanting the usual
/// newest-first timeline pass a list sorted by
/// [`crate::view::sort_for_timeline`]. Undated items are skipped without
/// affecting the global entry index of the dated ones.
pub fn group_timeline(items: &[CollectionItem]) -> Vec<TimelineGroup<'_>> {
    let mut groups: Vec<TimelineGroup<'_>> = Vec::new();
    let mut index = 0usize;

    for item in items {
        let Some(date) = item.finish_date.or(item.start_date) else {
            continue;
        };
        let entry = TimelineEntry {
            item,
            date,
            side: if index % 2 == 0 { Side::Left } else { Side::Right },
            bar_height: bar_height(item.start_date, item.finish_date),
        };
        index += 1;

        let year = date.year();
        match groups.iter_mut().find(|g| g.year == year) {
            Some(group) => group.entries.push(entry),
            None => groups.push(TimelineGroup {
                year,
                entries: vec![entry],
            }),
        }
    }

    groups
}

/// Visual duration measure for an entry, from the day-span between start
/// and finish. Without a start date the height is fixed at
/// [`DEFAULT_BAR_HEIGHT`]; a missing finish date falls back to the start
/// date, and the span is floored at one day before scaling and clamping.
pub fn bar_height(start: Option<DateTime<Utc>>, finish: Option<DateTime<Utc>>) -> u32 {
    let Some(start) = start else {
        return DEFAULT_BAR_HEIGHT;
    };
    let finish = finish.unwrap_or(start);
    let days = (finish - start).num_days().unsigned_abs().max(1);
    let scaled = (days as f64 * PIXELS_PER_DAY).round() as u32;
    scaled.clamp(MIN_BAR_HEIGHT, MAX_BAR_HEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CollectionKind, StatusCategory, TypeCategory};
    use crate::view::sort_for_timeline;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn dated_item(
        id: u64,
        start: Option<DateTime<Utc>>,
        finish: Option<DateTime<Utc>>,
    ) -> CollectionItem {
        CollectionItem {
            id,
            kind: CollectionKind::Anime,
            title: format!("Title {id}"),
            native_title: None,
            image: None,
            status: None,
            status_category: StatusCategory::Completed,
            media_type: None,
            type_category: TypeCategory::Tv,
            score: None,
            progress: "0 eps".into(),
            url: format!("https://myanimelist.net/anime/{id}"),
            tags: vec![],
            start_date: start,
            finish_date: finish,
        }
    }

    #[test]
    fn buckets_by_anchor_year_newest_first() {
        let mut items = vec![
            dated_item(1, Some(date(2023, 1, 1)), Some(date(2023, 3, 1))),
            dated_item(2, Some(date(2022, 6, 1)), None),
            dated_item(3, None, Some(date(2023, 11, 5))),
        ];
        sort_for_timeline(&mut items);
        let groups = group_timeline(&items);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].year, 2023);
        assert_eq!(groups[1].year, 2022);
        // The 2022 item is anchored by its start date.
        assert_eq!(groups[1].entries[0].item.id, 2);
        assert_eq!(groups[1].entries[0].date, date(2022, 6, 1));
    }

    #[test]
    fn undated_items_are_excluded() {
        let items = vec![
            dated_item(1, None, None),
            dated_item(2, Some(date(2024, 2, 2)), None),
        ];
        let groups = group_timeline(&items);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].entries.len(), 1);
        assert_eq!(groups[0].entries[0].item.id, 2);
    }

    #[test]
    fn sides_alternate_on_the_global_index() {
        let mut items = vec![
            dated_item(1, None, Some(date(2024, 1, 1))),
            dated_item(2, None, Some(date(2023, 12, 1))),
            dated_item(3, None, Some(date(2023, 2, 1))),
            dated_item(4, None, Some(date(2022, 8, 1))),
        ];
        sort_for_timeline(&mut items);
        let groups = group_timeline(&items);

        let sides: Vec<Side> = groups
            .iter()
            .flat_map(|g| g.entries.iter().map(|e| e.side))
            .collect();
        // Parity runs across bucket boundaries, not per bucket.
        assert_eq!(sides, [Side::Left, Side::Right, Side::Left, Side::Right]);
    }

    #[test]
    fn undated_item_does_not_advance_parity() {
        let items = vec![
            dated_item(1, None, Some(date(2024, 1, 1))),
            dated_item(2, None, None),
            dated_item(3, None, Some(date(2024, 1, 1))),
        ];
        let groups = group_timeline(&items);
        let entries = &groups[0].entries;
        assert_eq!(entries[0].side, Side::Left);
        assert_eq!(entries[1].side, Side::Right);
    }

    #[test]
    fn bar_height_defaults_without_start_date() {
        assert_eq!(bar_height(None, None), DEFAULT_BAR_HEIGHT);
        assert_eq!(bar_height(None, Some(date(2023, 1, 1))), DEFAULT_BAR_HEIGHT);
    }

    #[test]
    fn bar_height_clamps_short_spans_to_minimum() {
        // Same-day span floors at one day, well under the minimum height.
        let d = date(2023, 5, 5);
        assert_eq!(bar_height(Some(d), Some(d)), MIN_BAR_HEIGHT);
        // Missing finish falls back to start.
        assert_eq!(bar_height(Some(d), None), MIN_BAR_HEIGHT);
    }

    #[test]
    fn bar_height_scales_with_day_span() {
        // 200 days * 0.65 = 130 px, inside the clamp range.
        let height = bar_height(Some(date(2023, 1, 1)), Some(date(2023, 7, 20)));
        assert_eq!(height, 130);
    }

    #[test]
    fn bar_height_clamps_long_spans_to_maximum() {
        let height = bar_height(Some(date(2020, 1, 1)), Some(date(2023, 1, 1)));
        assert_eq!(height, MAX_BAR_HEIGHT);
    }
}
