use chrono::{TimeZone, Utc};
use orcid_works::{
    filter_by_year_range, sort_by_date, stats, OrcidId, SortOrder, WorkSummary, WorkType,
    ALL_WORK_TYPES,
};
use proptest::prelude::*;

fn summary_with_year(put_code: u64, year: Option<u32>) -> WorkSummary {
    WorkSummary {
        put_code: Some(put_code),
        created_date: Utc.timestamp_millis_opt(0).unwrap(),
        last_modified_date: Utc.timestamp_millis_opt(0).unwrap(),
        source: None,
        title: None,
        subtitle: None,
        translated_title: None,
        external_ids: Vec::new(),
        publication_year: year,
        publication_month: None,
        publication_day: None,
        journal_title: None,
        url: None,
    }
}

/// Property-based tests for identifier sanitization
mod identifier_props {
    use super::*;

    proptest! {
        #[test]
        fn test_sanitize_strips_prefix(id in r"[0-9]{4}-[0-9]{4}-[0-9]{4}-[0-9]{3}[0-9X]") {
            let bare = OrcidId::new(&id).unwrap();
            let https = OrcidId::new(&format!("https://orcid.org/{id}")).unwrap();
            let http = OrcidId::new(&format!("http://orcid.org/{id}")).unwrap();
            prop_assert_eq!(bare.as_str(), id.as_str());
            prop_assert_eq!(&https, &bare);
            prop_assert_eq!(&http, &bare);
        }

        #[test]
        fn test_sanitize_is_idempotent(id in r"[0-9]{4}-[0-9]{4}-[0-9]{4}-[0-9]{3}[0-9X]") {
            let once = OrcidId::new(&format!("https://orcid.org/{id}")).unwrap();
            let twice = OrcidId::new(once.as_str()).unwrap();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn test_sanitized_output_is_prefix_free(id in r"[0-9]{4}-[0-9]{4}-[0-9]{4}-[0-9]{3}[0-9X]") {
            let sanitized = OrcidId::new(&format!("https://orcid.org/{id}")).unwrap();
            prop_assert!(!sanitized.as_str().starts_with("http://"));
            prop_assert!(!sanitized.as_str().starts_with("https://"));
        }
    }
}

/// Vocabulary round-trip: every wire value parses back to its symbol
mod vocabulary_props {
    use super::*;

    #[test]
    fn test_every_value_round_trips() {
        for &work_type in ALL_WORK_TYPES {
            assert_eq!(WorkType::parse_lenient(work_type.as_str()), work_type);
        }
    }

    #[test]
    fn test_label_is_lossy_but_value_is_not() {
        // Formatting is for display only; the wire value is the stable
        // round-trip form.
        assert_eq!(WorkType::JournalArticle.label(), "Journal article");
        assert_eq!(
            WorkType::parse_lenient(WorkType::JournalArticle.as_str()),
            WorkType::JournalArticle
        );
    }
}

/// Property-based tests for the query utilities
mod query_props {
    use super::*;

    proptest! {
        #[test]
        fn test_degenerate_year_range_selects_exact_year(
            years in prop::collection::vec(prop::option::of(1900u32..2100), 0..40),
            pick in 1900u32..2100,
        ) {
            let works: Vec<WorkSummary> = years
                .iter()
                .enumerate()
                .map(|(i, y)| summary_with_year(i as u64, *y))
                .collect();

            let selected = filter_by_year_range(&works, pick, pick);
            let expected: Vec<u64> = works
                .iter()
                .filter(|w| w.publication_year == Some(pick))
                .map(|w| w.put_code.unwrap())
                .collect();
            let got: Vec<u64> = selected.iter().map(|w| w.put_code.unwrap()).collect();
            prop_assert_eq!(got, expected);
        }

        #[test]
        fn test_sort_reversal_symmetry_on_distinct_years(
            start in 1900u32..2000,
            len in 0usize..30,
        ) {
            // Distinct year per work keeps the composite keys tie-free
            let mut years: Vec<u32> = (0..len).map(|i| start + i as u32).collect();
            // Shuffle deterministically by splitting around the midpoint
            let back = years.split_off(len / 2);
            let mut shuffled = back;
            shuffled.extend(years);

            let works: Vec<WorkSummary> = shuffled
                .iter()
                .enumerate()
                .map(|(i, y)| summary_with_year(i as u64, Some(*y)))
                .collect();

            let desc = sort_by_date(&works, SortOrder::Desc);
            let asc = sort_by_date(&works, SortOrder::Asc);
            let mut reversed = desc;
            reversed.reverse();
            prop_assert_eq!(reversed, asc);
        }

        #[test]
        fn test_stats_totals_reconcile(
            years in prop::collection::vec(prop::option::of(1900u32..2100), 0..40),
        ) {
            let works: Vec<WorkSummary> = years
                .iter()
                .enumerate()
                .map(|(i, y)| summary_with_year(i as u64, *y))
                .collect();

            let s = stats(&works);
            prop_assert_eq!(s.total, works.len());
            prop_assert_eq!(s.by_type.values().sum::<usize>(), s.total);
            prop_assert!(s.by_year.values().sum::<usize>() <= s.total);

            let with_year = works.iter().filter(|w| w.publication_year.is_some()).count();
            prop_assert_eq!(s.by_year.values().sum::<usize>(), with_year);

            match (s.year_range.min, s.year_range.max) {
                (Some(min), Some(max)) => prop_assert!(min <= max),
                (None, None) => prop_assert_eq!(with_year, 0),
                _ => prop_assert!(false, "year range bounds must agree"),
            }
        }

        #[test]
        fn test_sort_never_changes_membership(
            years in prop::collection::vec(prop::option::of(1900u32..2100), 0..40),
        ) {
            let works: Vec<WorkSummary> = years
                .iter()
                .enumerate()
                .map(|(i, y)| summary_with_year(i as u64, *y))
                .collect();

            let sorted = sort_by_date(&works, SortOrder::Desc);
            prop_assert_eq!(sorted.len(), works.len());

            let mut original: Vec<u64> = works.iter().map(|w| w.put_code.unwrap()).collect();
            let mut after: Vec<u64> = sorted.iter().map(|w| w.put_code.unwrap()).collect();
            original.sort_unstable();
            after.sort_unstable();
            prop_assert_eq!(original, after);
        }
    }
}
