//! Attribution rules applied to one document's lookup results.

use ietf_info_core::{Category, ClassificationResult, DocumentRecord, FilterCriteria};
use ietf_info_fetch::{LookupError, Metadata};
use tracing::{info, warn};

use crate::discuss::DiscussMatcher;

/// Everything fetched for one document.
#[derive(Debug)]
pub struct DocumentLookups {
    pub metadata: Result<Metadata, LookupError>,
    /// `None` when the acknowledgment check is switched off.
    pub acknowledgments: Option<Result<String, LookupError>>,
    pub ballot: Result<String, LookupError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentOutcome {
    /// At least one category was recorded.
    Matched,
    /// No lookup mentioned the target name.
    NotFound,
}

/// Matches the target name against lookup results and records hits.
///
/// Every rule runs independently: a document can be authored, balloted,
/// and objected at once. Matching is case-sensitive.
#[derive(Debug, Clone)]
pub struct Classifier {
    name: String,
    acknowledgments: bool,
    discuss: DiscussMatcher,
}

impl Classifier {
    pub fn new(criteria: &FilterCriteria) -> Result<Self, regex::Error> {
        Ok(Self {
            name: criteria.name().to_string(),
            acknowledgments: criteria.acknowledgments_enabled(),
            discuss: DiscussMatcher::new(criteria.name())?,
        })
    }

    pub fn acknowledgments_enabled(&self) -> bool {
        self.acknowledgments
    }

    pub fn classify(
        &self,
        record: &DocumentRecord,
        lookups: &DocumentLookups,
        result: &ClassificationResult,
    ) -> DocumentOutcome {
        let number = record.number();
        let hit = |category: Category| {
            result.record(category, number, &record.title);
            info!(number, category = %category, "match");
        };
        let mut matched = false;

        match &lookups.metadata {
            Ok(meta) => {
                if meta.authors.iter().any(|a| *a == self.name) {
                    hit(Category::Authored);
                    matched = true;
                }
                if self.mentions(meta.shepherd.as_deref()) {
                    hit(Category::Shepherded);
                    matched = true;
                }
                if self.mentions(meta.ad.as_deref()) {
                    hit(Category::ResponsibleApprover);
                    matched = true;
                }
            }
            Err(err) => warn!(number, error = %err, "metadata lookup failed"),
        }

        if self.acknowledgments
            && let Some(lookup) = &lookups.acknowledgments
            && let Some(text) = self.text(record, "acknowledgment", lookup, result)
            && text.contains(&self.name)
        {
            hit(Category::Acknowledged);
            matched = true;
        }

        if let Some(markup) = self.text(record, "ballot", &lookups.ballot, result)
            && markup.contains(&self.name)
        {
            hit(Category::Balloted);
            matched = true;
            if self.discuss.is_match(markup) {
                hit(Category::Objected);
            }
        }

        if matched {
            DocumentOutcome::Matched
        } else {
            info!(number, "name not found");
            DocumentOutcome::NotFound
        }
    }

    // Datatracker renders shepherd and AD as display strings, so containment
    // is used rather than equality.
    fn mentions(&self, field: Option<&str>) -> bool {
        field.is_some_and(|f| f.contains(&self.name))
    }

    /// The decoded text, or `None` after logging why it is unavailable.
    /// Decode failures are filed under [`Category::Failed`].
    fn text<'a>(
        &self,
        record: &DocumentRecord,
        what: &str,
        lookup: &'a Result<String, LookupError>,
        result: &ClassificationResult,
    ) -> Option<&'a str> {
        let number = record.number();
        match lookup {
            Ok(text) => Some(text),
            Err(err) if err.is_decode() => {
                result.record(Category::Failed, number, &record.title);
                warn!(number, lookup = what, error = %err, "could not decode response");
                None
            }
            Err(err) => {
                warn!(number, lookup = what, error = %err, "lookup failed");
                None
            }
        }
    }
}
