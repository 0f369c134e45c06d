//! Row sources backing sampling sessions.
//!
//! Ownership model:
//! - `RowSource` is the driver-facing interface: it reports the population
//!   size a session is created over and materializes drawn ordinal positions
//!   into rows.
//! - `InMemorySource` serves prebuilt rows for tests and library callers.
//! - Implementations under `sources` load rows from external formats.

use crate::errors::SampleError;
use crate::types::{Position, Row, SourceId};

/// Source implementation modules.
pub mod sources;

/// Driver-facing row source interface.
///
/// A source exposes a fixed, stably ordered population of rows: `row_count`
/// supplies the population size a session is created over, and `fetch_rows`
/// materializes drawn positions back into row contents. The order of rows
/// must not change for the lifetime of the source, since sessions address
/// rows purely by ordinal position.
pub trait RowSource: Send + Sync {
    /// Stable source identifier used in log events and error paths.
    fn id(&self) -> &str;

    /// Column names, in field order, for printing fetched rows.
    fn column_names(&self) -> &[String];

    /// Exact number of rows in the population.
    fn row_count(&self) -> u64;

    /// Materialize the rows at the given 1-based ordinal positions,
    /// preserving the order of `positions`.
    ///
    /// A position outside `1..=row_count()` is a `SourceInconsistent` error:
    /// positions handed to a source come from a session created over this
    /// source's own count, so an out-of-range value means the source and the
    /// session disagree about the population.
    fn fetch_rows(&self, positions: &[Position]) -> Result<Vec<Row>, SampleError>;
}

/// Shared position-addressed fetch used by row-backed implementations.
pub(crate) fn rows_at(
    source_id: &str,
    rows: &[Row],
    positions: &[Position],
) -> Result<Vec<Row>, SampleError> {
    let mut fetched = Vec::with_capacity(positions.len());
    for &position in positions {
        if position == 0 || position > rows.len() as u64 {
            return Err(SampleError::SourceInconsistent {
                source_id: source_id.to_string(),
                details: format!(
                    "position {position} outside 1..={} rows",
                    rows.len()
                ),
            });
        }
        fetched.push(rows[(position - 1) as usize].clone());
    }
    Ok(fetched)
}

/// In-memory row source for tests and small populations.
pub struct InMemorySource {
    id: SourceId,
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl InMemorySource {
    /// Create an in-memory source from column names and prebuilt rows.
    ///
    /// Rows are kept in the given order; each row's fields follow the
    /// column order.
    pub fn new(
        id: impl Into<SourceId>,
        columns: impl IntoIterator<Item = impl Into<String>>,
        rows: Vec<Row>,
    ) -> Self {
        Self {
            id: id.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            rows,
        }
    }
}

impl RowSource for InMemorySource {
    fn id(&self) -> &str {
        &self.id
    }

    fn column_names(&self) -> &[String] {
        &self.columns
    }

    fn row_count(&self) -> u64 {
        self.rows.len() as u64
    }

    fn fetch_rows(&self, positions: &[Position]) -> Result<Vec<Row>, SampleError> {
        rows_at(&self.id, &self.rows, positions)
    }
}
