//! RFC index parsing: locate the data table, turn rows into records, filter.

pub mod markup;
pub mod row;

use ietf_info_core::{DocumentRecord, FilterCriteria};
use thiserror::Error;
use tracing::{debug, info};

pub use row::parse_row;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum IndexError {
    #[error("index has {found} top-level tables; data table expected after skipping {skip}")]
    TableNotFound { found: usize, skip: usize },
}

/// Structural assumptions about the index page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOptions {
    /// Number of top-level tables following the first one that precede the
    /// data table. The published page has two (legend tables), so the data
    /// is in the third top-level table.
    pub skip_tables: usize,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self { skip_tables: 2 }
    }
}

/// Parse every data row of the index, in document order.
///
/// Rows that are headers or that fail to parse are skipped. Only a missing
/// data table is an error.
pub fn parse_index<'a>(
    html: &'a str,
    options: &IndexOptions,
) -> Result<impl Iterator<Item = DocumentRecord> + use<'a>, IndexError> {
    let tables = markup::outer_blocks(html, "table");
    let table = tables
        .get(options.skip_tables)
        .cloned()
        .ok_or(IndexError::TableNotFound {
            found: tables.len(),
            skip: options.skip_tables,
        })?;
    let body = markup::inner_html(&html[table]);

    Ok(markup::outer_blocks(body, "tr")
        .into_iter()
        .filter_map(move |range| {
            let parsed = parse_row(&body[range.clone()]);
            if parsed.is_none() {
                debug!(offset = range.start, "skipping non-data index row");
            }
            parsed
        }))
}

/// Keep the records admitted by `criteria`, preserving order.
pub fn filter_records<I>(records: I, criteria: &FilterCriteria) -> Vec<DocumentRecord>
where
    I: IntoIterator<Item = DocumentRecord>,
{
    records.into_iter().filter(|r| criteria.admits(r)).collect()
}

/// Parse and filter in one pass.
pub fn load_index(
    html: &str,
    options: &IndexOptions,
    criteria: &FilterCriteria,
) -> Result<Vec<DocumentRecord>, IndexError> {
    let mut parsed = 0usize;
    let records = filter_records(parse_index(html, options)?.inspect(|_| parsed += 1), criteria);
    info!(parsed, retained = records.len(), "filtered index");
    Ok(records)
}
