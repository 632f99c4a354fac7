//! Normalization of raw registry JSON into the record schema
//!
//! The registry nests almost every scalar behind one or more wrapper
//! objects ("title.title.value") and is inconsistent about numeric
//! types, so every extraction here goes through [`pluck`] and a small
//! set of coercion helpers. A missing path yields an absent field, never
//! a failure; the only hard error is a top-level payload that is not a
//! JSON object at all.

use crate::models::{Citation, Contributor, ExternalId, Work, WorkSummary, WorkType};
use crate::{Error, Result};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use tracing::debug;

/// Walk a sequence of object keys, `None` on any missing hop
pub fn pluck<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = value;
    for key in path {
        current = current.as_object()?.get(*key)?;
    }
    Some(current)
}

/// Owned string at a path, `None` when absent or not a string
fn string_at(raw: &Value, path: &[&str]) -> Option<String> {
    pluck(raw, path)?.as_str().map(str::to_string)
}

/// Positive integer at a path; accepts numbers and numeric strings
fn u32_at(raw: &Value, path: &[&str]) -> Option<u32> {
    match pluck(raw, path)? {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

/// Millisecond-epoch timestamp at a path
///
/// Numbers and numeric-looking strings are accepted; anything else
/// collapses to the Unix epoch rather than failing the parse.
fn epoch_ms_at(raw: &Value, path: &[&str]) -> DateTime<Utc> {
    let millis = match pluck(raw, path) {
        Some(Value::Number(n)) => n.as_i64().unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse::<i64>().unwrap_or(0),
        _ => 0,
    };
    Utc.timestamp_millis_opt(millis)
        .single()
        .unwrap_or_else(|| Utc.timestamp_millis_opt(0).unwrap())
}

fn require_object<'a>(raw: &'a Value, context: &str) -> Result<&'a serde_json::Map<String, Value>> {
    raw.as_object().ok_or_else(|| Error::Parse {
        context: context.to_string(),
        message: "expected a JSON object".to_string(),
    })
}

fn parse_external_ids(raw: &Value) -> Vec<ExternalId> {
    pluck(raw, &["external-ids", "external-id"])
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .map(|entry| ExternalId {
                    id_type: string_at(entry, &["external-id-type"]).unwrap_or_default(),
                    value: string_at(entry, &["external-id-value"]).unwrap_or_default(),
                    url: string_at(entry, &["external-id-url", "value"]),
                    relationship: string_at(entry, &["external-id-relationship"]),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn parse_contributors(raw: &Value) -> Vec<Contributor> {
    pluck(raw, &["contributors", "contributor"])
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .map(|entry| Contributor {
                    name: string_at(entry, &["credit-name", "value"]),
                    role: string_at(entry, &["contributor-attributes", "contributor-role"]),
                    sequence: string_at(
                        entry,
                        &["contributor-attributes", "contributor-sequence"],
                    ),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Parse one raw work-summary object into a [`WorkSummary`]
///
/// Only a non-object top level is an error; every field extraction is
/// best-effort.
pub fn parse_summary(raw: &Value) -> Result<WorkSummary> {
    require_object(raw, "work-summary")?;

    Ok(WorkSummary {
        put_code: pluck(raw, &["put-code"]).and_then(Value::as_u64),
        created_date: epoch_ms_at(raw, &["created-date", "value"]),
        last_modified_date: epoch_ms_at(raw, &["last-modified-date", "value"]),
        source: string_at(raw, &["source", "source-name", "value"]),
        title: string_at(raw, &["title", "title", "value"]),
        subtitle: string_at(raw, &["title", "subtitle", "value"]),
        translated_title: string_at(raw, &["title", "translated-title", "value"]),
        external_ids: parse_external_ids(raw),
        publication_year: u32_at(raw, &["publication-date", "year", "value"]),
        publication_month: u32_at(raw, &["publication-date", "month", "value"]),
        publication_day: u32_at(raw, &["publication-date", "day", "value"]),
        journal_title: string_at(raw, &["journal-title", "value"]),
        url: string_at(raw, &["url", "value"]),
    })
}

/// Parse one raw full-work object into a [`Work`]
///
/// Builds on [`parse_summary`] and adds the work-only fields. The type
/// tag goes through the closed vocabulary; unrecognized raw values come
/// out as [`WorkType::Unsupported`], never verbatim.
pub fn parse_work(raw: &Value) -> Result<Work> {
    let summary = parse_summary(raw)?;

    let citation = pluck(raw, &["citation"]).map(|block| Citation {
        citation_type: string_at(block, &["citation-type"]),
        value: string_at(block, &["citation-value"]),
    });

    let work_type = pluck(raw, &["type"])
        .and_then(Value::as_str)
        .map_or(WorkType::Unsupported, WorkType::parse_lenient);

    Ok(Work {
        summary,
        short_description: string_at(raw, &["short-description"]),
        citation,
        work_type,
        contributors: parse_contributors(raw),
        language_code: string_at(raw, &["language-code"]),
        country: string_at(raw, &["country", "value"]),
    })
}

/// Parse the summary-listing response (`group[].work-summary[0]`)
///
/// Each group contributes its first summary entry; groups without one
/// are skipped. A missing `group` array yields an empty list.
pub fn parse_summary_listing(raw: &Value) -> Result<Vec<WorkSummary>> {
    require_object(raw, "works-listing")?;

    let summaries: Vec<WorkSummary> = pluck(raw, &["group"])
        .and_then(Value::as_array)
        .map(|groups| {
            groups
                .iter()
                .filter_map(|group| {
                    let first = pluck(group, &["work-summary"])?.as_array()?.first()?;
                    parse_summary(first).ok()
                })
                .collect()
        })
        .unwrap_or_default();

    debug!("Parsed {} work summaries from listing", summaries.len());
    Ok(summaries)
}

/// Parse the bulk response (`bulk[].work`)
///
/// Entries without a `work` object are skipped. A missing `bulk` array
/// yields an empty list.
pub fn parse_bulk(raw: &Value) -> Result<Vec<Work>> {
    require_object(raw, "works-bulk")?;

    let works: Vec<Work> = pluck(raw, &["bulk"])
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| parse_work(pluck(entry, &["work"])?).ok())
                .collect()
        })
        .unwrap_or_default();

    debug!("Parsed {} works from bulk response", works.len());
    Ok(works)
}
