//! Core types for ietf-info: index records, run criteria, and the shared result aggregate.

mod error;
pub mod criteria;
pub mod record;
pub mod result;

pub use criteria::{ACKNOWLEDGMENTS, DEFAULT_STATUSES, FilterCriteria};
pub use error::CoreError;
pub use record::DocumentRecord;
pub use result::{Category, ClassificationResult, ResultSnapshot};
