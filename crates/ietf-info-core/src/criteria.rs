//! Run-wide filter configuration.
//!
//! Built once from the command line and shared read-only by every
//! classification workflow.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use chrono::Datelike;

use crate::{CoreError, DocumentRecord};

/// Pseudo-status that switches on the acknowledgment text check.
pub const ACKNOWLEDGMENTS: &str = "ACKNOWLEDGMENTS";

/// Statuses included when the user does not add any.
pub const DEFAULT_STATUSES: &[&str] = &[
    "PROPOSED STANDARD",
    "BEST CURRENT PRACTICE",
    "HISTORIC",
    "EXPERIMENTAL",
    "INFORMATIONAL",
    ACKNOWLEDGMENTS,
];

pub const DEFAULT_FIRST_YEAR: i32 = 2022;
pub const DEFAULT_FIRST_NUMBER: u32 = 7000;
pub const DEFAULT_LAST_NUMBER: u32 = 20_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    name: String,
    statuses: BTreeSet<String>,
    years: RangeInclusive<i32>,
    numbers: RangeInclusive<u32>,
}

impl FilterCriteria {
    /// Validate and build criteria. Statuses are upper-cased.
    pub fn new<I, S>(
        name: impl Into<String>,
        statuses: I,
        years: RangeInclusive<i32>,
        numbers: RangeInclusive<u32>,
    ) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CoreError::MissingName);
        }
        if years.start() > years.end() {
            return Err(CoreError::InvertedRange {
                what: "year",
                first: i64::from(*years.start()),
                last: i64::from(*years.end()),
            });
        }
        if numbers.start() > numbers.end() {
            return Err(CoreError::InvertedRange {
                what: "number",
                first: i64::from(*numbers.start()),
                last: i64::from(*numbers.end()),
            });
        }
        let statuses = statuses
            .into_iter()
            .map(|s| s.as_ref().trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();
        Ok(Self {
            name,
            statuses,
            years,
            numbers,
        })
    }

    /// Criteria with the default statuses, 2022 through the current year,
    /// and RFC numbers 7000..=20000.
    pub fn with_defaults(name: impl Into<String>) -> Result<Self, CoreError> {
        Self::new(
            name,
            DEFAULT_STATUSES.iter().copied(),
            DEFAULT_FIRST_YEAR..=current_year(),
            DEFAULT_FIRST_NUMBER..=DEFAULT_LAST_NUMBER,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn statuses(&self) -> &BTreeSet<String> {
        &self.statuses
    }

    pub fn years(&self) -> &RangeInclusive<i32> {
        &self.years
    }

    pub fn numbers(&self) -> &RangeInclusive<u32> {
        &self.numbers
    }

    pub fn allows_status(&self, status: &str) -> bool {
        self.statuses.contains(status)
    }

    pub fn acknowledgments_enabled(&self) -> bool {
        self.allows_status(ACKNOWLEDGMENTS)
    }

    /// Whether `record` belongs in the working set.
    ///
    /// Requires an allowed status, an issued document, a known year inside
    /// the year range, and a number inside the number range.
    pub fn admits(&self, record: &DocumentRecord) -> bool {
        let status_ok = record.status().is_some_and(|s| self.allows_status(s));
        let year_ok = record.year.is_some_and(|y| self.years.contains(&y));
        status_ok && record.issued && year_ok && self.numbers.contains(&record.number())
    }
}

pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criteria() -> FilterCriteria {
        FilterCriteria::new(
            "Jane Doe",
            ["PROPOSED STANDARD", "informational"],
            2022..=2023,
            7000..=8000,
        )
        .unwrap()
    }

    fn record() -> DocumentRecord {
        DocumentRecord::new(7001, "t")
            .with_status("PROPOSED STANDARD")
            .with_year(2022)
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = FilterCriteria::with_defaults("  ").unwrap_err();
        assert_eq!(err, CoreError::MissingName);
    }

    #[test]
    fn inverted_ranges_are_rejected() {
        let err = FilterCriteria::new("x", ["HISTORIC"], 2023..=2022, 1..=2).unwrap_err();
        assert!(matches!(err, CoreError::InvertedRange { what: "year", .. }));
        let err = FilterCriteria::new("x", ["HISTORIC"], 2022..=2023, 9..=2).unwrap_err();
        assert!(matches!(err, CoreError::InvertedRange { what: "number", .. }));
    }

    #[test]
    fn statuses_are_upper_cased() {
        assert!(criteria().allows_status("INFORMATIONAL"));
        assert!(!criteria().allows_status("informational"));
    }

    #[test]
    fn defaults_enable_acknowledgments() {
        let c = FilterCriteria::with_defaults("Jane Doe").unwrap();
        assert!(c.acknowledgments_enabled());
        assert_eq!(*c.years().start(), DEFAULT_FIRST_YEAR);
        assert_eq!(*c.numbers().end(), DEFAULT_LAST_NUMBER);
        assert!(!criteria().acknowledgments_enabled());
    }

    #[test]
    fn admits_matching_record() {
        assert!(criteria().admits(&record()));
    }

    #[test]
    fn rejects_each_failing_condition() {
        let c = criteria();
        assert!(!c.admits(&record().with_status("HISTORIC")));
        assert!(!c.admits(&record().with_issued(false)));
        assert!(!c.admits(&record().with_year(2021)));
        assert!(!c.admits(&DocumentRecord::new(7001, "t").with_status("PROPOSED STANDARD")));
        assert!(!c.admits(
            &DocumentRecord::new(8001, "t")
                .with_status("PROPOSED STANDARD")
                .with_year(2022)
        ));
    }

    #[test]
    fn bounds_are_inclusive() {
        let c = criteria();
        let at = |n: u32, y: i32| {
            DocumentRecord::new(n, "t")
                .with_status("PROPOSED STANDARD")
                .with_year(y)
        };
        assert!(c.admits(&at(7000, 2022)));
        assert!(c.admits(&at(8000, 2023)));
        assert!(!c.admits(&at(6999, 2022)));
        assert!(!c.admits(&at(8000, 2024)));
    }

    #[test]
    fn moving_one_bound_only_changes_boundary_records() {
        let records: Vec<_> = (6998..=7003)
            .map(|n| {
                DocumentRecord::new(n, "t")
                    .with_status("PROPOSED STANDARD")
                    .with_year(2022)
            })
            .collect();
        let before = criteria();
        let after =
            FilterCriteria::new("Jane Doe", ["PROPOSED STANDARD"], 2022..=2023, 7001..=8000)
                .unwrap();
        let changed: Vec<u32> = records
            .iter()
            .filter(|r| before.admits(r) != after.admits(r))
            .map(DocumentRecord::number)
            .collect();
        assert_eq!(changed, vec![7000]);
    }
}
