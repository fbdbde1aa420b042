//! Contribution classification and the concurrent per-document pipeline.

pub mod classifier;
pub mod discuss;
pub mod pipeline;

pub use classifier::{Classifier, DocumentLookups, DocumentOutcome};
pub use discuss::DiscussMatcher;
pub use pipeline::{PipelineError, RunOptions, RunReport, run};
