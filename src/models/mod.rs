//! Normalized record schema for ORCID work data
//!
//! Every registry response converges to these flat, well-typed records.
//! Records are constructed only by the parser and never mutated in
//! place; a fresh set is built on every parse call.

pub mod work_type;

pub use work_type::{WorkType, ALL_WORK_TYPES};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One alternate identifier (DOI, ISBN, ...) attached to a work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalId {
    /// Identifier scheme, e.g. "doi" or "isbn"
    pub id_type: String,
    /// Identifier value
    pub value: String,
    /// Resolvable URL for the identifier
    #[serde(default)]
    pub url: Option<String>,
    /// Relationship of the identifier to the work ("self", "part-of")
    #[serde(default)]
    pub relationship: Option<String>,
}

/// One credited person on a work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    /// Credited name
    #[serde(default)]
    pub name: Option<String>,
    /// Contribution role, e.g. "author"
    #[serde(default)]
    pub role: Option<String>,
    /// Position in the credit order, e.g. "first"
    #[serde(default)]
    pub sequence: Option<String>,
}

/// Citation block carried by a full work record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    /// Citation format, e.g. "bibtex"
    #[serde(default)]
    pub citation_type: Option<String>,
    /// Citation text
    #[serde(default)]
    pub value: Option<String>,
}

/// Abbreviated work record from the registry's summary listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkSummary {
    /// Registry-assigned identifier, the primary key for later lookups
    pub put_code: Option<u64>,
    /// When the record was created; Unix epoch when the registry omits it
    pub created_date: DateTime<Utc>,
    /// When the record was last modified; Unix epoch when omitted
    pub last_modified_date: DateTime<Utc>,
    /// Name of the source that asserted the record
    #[serde(default)]
    pub source: Option<String>,
    /// Work title; stays absent when the registry payload carries none
    #[serde(default)]
    pub title: Option<String>,
    /// Subtitle
    #[serde(default)]
    pub subtitle: Option<String>,
    /// Title translated into another language
    #[serde(default)]
    pub translated_title: Option<String>,
    /// External identifiers; empty when the registry carries none
    #[serde(default)]
    pub external_ids: Vec<ExternalId>,
    /// Publication year; absent when missing or non-numeric
    #[serde(default)]
    pub publication_year: Option<u32>,
    /// Publication month; absent when missing or non-numeric
    #[serde(default)]
    pub publication_month: Option<u32>,
    /// Publication day; absent when missing or non-numeric
    #[serde(default)]
    pub publication_day: Option<u32>,
    /// Journal or container title
    #[serde(default)]
    pub journal_title: Option<String>,
    /// Work URL
    #[serde(default)]
    pub url: Option<String>,
}

/// Full work record from the bulk or single-record endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Work {
    /// The summary fields shared with the listing shape
    #[serde(flatten)]
    pub summary: WorkSummary,
    /// Short abstract-like description
    #[serde(default)]
    pub short_description: Option<String>,
    /// Citation block; absent when the raw payload has none
    #[serde(default)]
    pub citation: Option<Citation>,
    /// Work type; always a vocabulary member, never a raw registry string
    pub work_type: WorkType,
    /// Credited contributors; empty when the registry carries none
    #[serde(default)]
    pub contributors: Vec<Contributor>,
    /// ISO language code of the work
    #[serde(default)]
    pub language_code: Option<String>,
    /// Country of publication
    #[serde(default)]
    pub country: Option<String>,
}

impl Work {
    /// Registry-assigned identifier, the primary key for later lookups
    #[must_use]
    pub fn put_code(&self) -> Option<u64> {
        self.summary.put_code
    }

    /// Work title, if the registry carried one
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.summary.title.as_deref()
    }
}

/// Common surface over [`WorkSummary`] and [`Work`]
///
/// Query utilities only need the publication-date fields, the type tag
/// and a string view of named fields, so they accept either record shape
/// through this trait.
pub trait WorkRecord {
    /// Registry-assigned identifier
    fn put_code(&self) -> Option<u64>;

    /// Publication year, when defined
    fn publication_year(&self) -> Option<u32>;

    /// Publication month, when defined
    fn publication_month(&self) -> Option<u32>;

    /// Publication day, when defined
    fn publication_day(&self) -> Option<u32>;

    /// Work type; `None` for summaries, which carry no type tag
    fn work_type(&self) -> Option<WorkType>;

    /// String form of a named field, for grouping
    ///
    /// Accepts both the registry's historic camelCase keys and this
    /// crate's snake_case field names. Unknown keys and absent values
    /// yield `None`.
    fn field(&self, key: &str) -> Option<String>;
}

impl WorkRecord for WorkSummary {
    fn put_code(&self) -> Option<u64> {
        self.put_code
    }

    fn publication_year(&self) -> Option<u32> {
        self.publication_year
    }

    fn publication_month(&self) -> Option<u32> {
        self.publication_month
    }

    fn publication_day(&self) -> Option<u32> {
        self.publication_day
    }

    fn work_type(&self) -> Option<WorkType> {
        None
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            "putCode" | "put_code" => self.put_code.map(|c| c.to_string()),
            "title" => self.title.clone(),
            "subtitle" => self.subtitle.clone(),
            "translatedTitle" | "translated_title" => self.translated_title.clone(),
            "source" => self.source.clone(),
            "publicationYear" | "publication_year" => {
                self.publication_year.map(|y| y.to_string())
            }
            "publicationMonth" | "publication_month" => {
                self.publication_month.map(|m| m.to_string())
            }
            "publicationDay" | "publication_day" => self.publication_day.map(|d| d.to_string()),
            "journalTitle" | "journal_title" => self.journal_title.clone(),
            "url" => self.url.clone(),
            _ => None,
        }
    }
}

impl WorkRecord for Work {
    fn put_code(&self) -> Option<u64> {
        self.summary.put_code
    }

    fn publication_year(&self) -> Option<u32> {
        self.summary.publication_year
    }

    fn publication_month(&self) -> Option<u32> {
        self.summary.publication_month
    }

    fn publication_day(&self) -> Option<u32> {
        self.summary.publication_day
    }

    fn work_type(&self) -> Option<WorkType> {
        Some(self.work_type)
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            "type" | "work_type" | "workType" => Some(self.work_type.as_str().to_string()),
            "shortDescription" | "short_description" => self.short_description.clone(),
            "languageCode" | "language_code" => self.language_code.clone(),
            "country" => self.country.clone(),
            _ => self.summary.field(key),
        }
    }
}
