pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod parser;
pub mod query;

pub use client::{OrcidClient, OrcidId, MAX_BULK_PUT_CODES};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{Error, Result};
pub use models::{
    Citation, Contributor, ExternalId, Work, WorkRecord, WorkSummary, WorkType, ALL_WORK_TYPES,
};
pub use query::{
    filter_by_type, filter_by_year_range, group_by, sort_by_date, stats, SortOrder, WorkStats,
    YearRange,
};
