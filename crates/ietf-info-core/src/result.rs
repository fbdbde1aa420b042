//! Shared aggregate of per-category matches.
//!
//! Every classification workflow holds a clone of the same
//! [`ClassificationResult`] handle and only ever inserts. A slot
//! (category, number) is written at most once per run, so completion order
//! between workflows cannot change the final contents.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

/// Contribution role a document can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Authored,
    Shepherded,
    ResponsibleApprover,
    Balloted,
    /// Balloted with a withdrawn Discuss position. Always a subset of `Balloted`.
    Objected,
    Acknowledged,
    /// A text lookup could not be decoded.
    Failed,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Authored,
        Category::Shepherded,
        Category::ResponsibleApprover,
        Category::Balloted,
        Category::Objected,
        Category::Acknowledged,
        Category::Failed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Authored => "authored",
            Self::Shepherded => "shepherded",
            Self::ResponsibleApprover => "responsible_approver",
            Self::Balloted => "balloted",
            Self::Objected => "objected",
            Self::Acknowledged => "acknowledged",
            Self::Failed => "failed",
        }
    }

    /// Heading used in the printed summary.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Authored => "Authored",
            Self::Shepherded => "Shepherded",
            Self::ResponsibleApprover => "Responsible AD",
            Self::Balloted => "Balloted",
            Self::Objected => "Discussed",
            Self::Acknowledged => "Acknowledged",
            Self::Failed => "Failed",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Owned, ordered copy of the aggregate: category → (number → title).
pub type ResultSnapshot = BTreeMap<Category, BTreeMap<u32, String>>;

/// Cloneable handle to the run-wide category maps.
#[derive(Debug, Clone, Default)]
pub struct ClassificationResult {
    inner: Arc<Mutex<ResultSnapshot>>,
}

impl ClassificationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// File `number` under `category`. Returns `false` if the slot was
    /// already taken, in which case the stored title is left untouched.
    pub fn record(&self, category: Category, number: u32, title: &str) -> bool {
        let mut maps = self.lock();
        let slot = maps.entry(category).or_default();
        if slot.contains_key(&number) {
            return false;
        }
        slot.insert(number, title.to_string());
        debug!(number, category = %category, "recorded match");
        true
    }

    pub fn contains(&self, category: Category, number: u32) -> bool {
        self.lock()
            .get(&category)
            .is_some_and(|m| m.contains_key(&number))
    }

    pub fn count(&self, category: Category) -> usize {
        self.lock().get(&category).map_or(0, BTreeMap::len)
    }

    /// Copy out every category, including empty ones.
    pub fn snapshot(&self) -> ResultSnapshot {
        let maps = self.lock();
        Category::ALL
            .iter()
            .map(|c| (*c, maps.get(c).cloned().unwrap_or_default()))
            .collect()
    }

    // Inserts cannot leave the maps half-written, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, ResultSnapshot> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
