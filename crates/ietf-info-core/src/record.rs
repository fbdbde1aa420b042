//! Normalised representation of one RFC index entry.

use std::collections::BTreeMap;

/// One row of the RFC index after parsing.
///
/// `number` is fixed at construction. Everything else in the entry that is
/// not a dedicated field lands in `attributes` with a lower-cased key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRecord {
    number: u32,
    pub title: String,
    pub issued: bool,
    /// Publication year; `None` when the date line could not be parsed.
    pub year: Option<i32>,
    pub attributes: BTreeMap<String, String>,
}

impl DocumentRecord {
    pub fn new(number: u32, title: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into(),
            issued: true,
            year: None,
            attributes: BTreeMap::new(),
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    /// The `status` attribute, e.g. `PROPOSED STANDARD`.
    pub fn status(&self) -> Option<&str> {
        self.attributes.get("status").map(String::as_str)
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.attributes.insert("status".into(), status.into());
        self
    }

    pub fn with_issued(mut self, issued: bool) -> Self {
        self.issued = issued;
        self
    }
}
