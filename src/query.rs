//! Pure in-memory query helpers over collections of work records
//!
//! Every function here is free-standing, total over well-formed input
//! and side-effect free: inputs are never mutated and the results are
//! freshly allocated. All of them accept either record shape through the
//! [`WorkRecord`] trait.

use crate::models::{WorkRecord, WorkType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sort direction for [`sort_by_date`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Newest first
    #[default]
    Desc,
    /// Oldest first
    Asc,
}

/// Observed publication-year bounds, `None` until a year is seen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub min: Option<u32>,
    pub max: Option<u32>,
}

/// Aggregated statistics over a work collection
///
/// Derived on demand and never persisted. Works without a type count
/// under the `"unknown"` key; works without a year are absent from
/// `by_year` and do not move `year_range`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkStats {
    /// Number of input works
    pub total: usize,
    /// Work count per type tag
    pub by_type: BTreeMap<String, usize>,
    /// Work count per publication year
    pub by_year: BTreeMap<u32, usize>,
    /// Smallest and largest publication year observed
    pub year_range: YearRange,
}

/// Keep works whose type is defined and a member of `types`
///
/// Order is preserved. Summaries carry no type tag and are always
/// filtered out.
pub fn filter_by_type<T: WorkRecord + Clone>(works: &[T], types: &[WorkType]) -> Vec<T> {
    works
        .iter()
        .filter(|w| w.work_type().is_some_and(|t| types.contains(&t)))
        .cloned()
        .collect()
}

/// Keep works whose publication year is defined and within
/// `start..=end`
///
/// Both bounds are inclusive; works without a year are excluded. Order
/// is preserved.
pub fn filter_by_year_range<T: WorkRecord + Clone>(works: &[T], start: u32, end: u32) -> Vec<T> {
    works
        .iter()
        .filter(|w| {
            w.publication_year()
                .is_some_and(|year| start <= year && year <= end)
        })
        .cloned()
        .collect()
}

/// Composite calendar key: missing year sorts as 0, missing month and
/// day as 1.
fn date_key<T: WorkRecord>(work: &T) -> (u32, u32, u32) {
    (
        work.publication_year().unwrap_or(0),
        work.publication_month().unwrap_or(1),
        work.publication_day().unwrap_or(1),
    )
}

/// Return a new sequence sorted by publication date
///
/// The sort is stable; the input is left untouched. Works without any
/// date fields sort as year 0 and therefore gather at the old end.
pub fn sort_by_date<T: WorkRecord + Clone>(works: &[T], order: SortOrder) -> Vec<T> {
    let mut sorted = works.to_vec();
    match order {
        SortOrder::Asc => sorted.sort_by(|a, b| date_key(a).cmp(&date_key(b))),
        SortOrder::Desc => sorted.sort_by(|a, b| date_key(b).cmp(&date_key(a))),
    }
    sorted
}

/// Compute aggregate statistics in a single pass
pub fn stats<T: WorkRecord>(works: &[T]) -> WorkStats {
    let mut result = WorkStats {
        total: works.len(),
        ..WorkStats::default()
    };

    for work in works {
        let type_key = work
            .work_type()
            .map_or_else(|| "unknown".to_string(), |t| t.as_str().to_string());
        *result.by_type.entry(type_key).or_insert(0) += 1;

        if let Some(year) = work.publication_year() {
            *result.by_year.entry(year).or_insert(0) += 1;
            result.year_range.min = Some(result.year_range.min.map_or(year, |m| m.min(year)));
            result.year_range.max = Some(result.year_range.max.map_or(year, |m| m.max(year)));
        }
    }

    result
}

/// Bucket works by the string form of a named field
///
/// Absent values and unknown field names bucket under `"unknown"`.
/// Relative order within each bucket is preserved.
pub fn group_by<T: WorkRecord + Clone>(works: &[T], key: &str) -> BTreeMap<String, Vec<T>> {
    let mut groups: BTreeMap<String, Vec<T>> = BTreeMap::new();
    for work in works {
        let bucket = work.field(key).unwrap_or_else(|| "unknown".to_string());
        groups.entry(bucket).or_default().push(work.clone());
    }
    groups
}
