use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("a target name is required")]
    MissingName,

    #[error("invalid {what} range: {first} > {last}")]
    InvertedRange {
        what: &'static str,
        first: i64,
        last: i64,
    },
}
