use std::path::PathBuf;

use tracing::debug;

use crate::constants::defaults::DEFAULT_DELIMITER;
use crate::constants::printing::SYNTHETIC_COLUMN_PREFIX;
use crate::errors::SampleError;
use crate::source::{RowSource, rows_at};
use crate::types::{Position, Row, SourceId};

/// Configuration for a delimited-text-file row source.
#[derive(Debug, Clone)]
pub struct DelimitedSourceConfig {
    /// Path of the file to load.
    pub path: PathBuf,
    /// Field delimiter separating columns within a line.
    pub delimiter: char,
    /// Whether the first line carries column names.
    pub has_header: bool,
}

impl DelimitedSourceConfig {
    /// Create a config for `path` with a tab delimiter and a header line.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: DEFAULT_DELIMITER,
            has_header: true,
        }
    }

    /// Override the field delimiter.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set whether the first line is a header. Without a header, column
    /// names are synthesized from the first row's width.
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }
}

/// Row source over a delimited text file, loaded eagerly at construction.
///
/// Line order in the file is the population order, so ordinal positions map
/// to physical lines (after the header, when present) for the lifetime of
/// the source.
#[derive(Debug)]
pub struct DelimitedSource {
    id: SourceId,
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl DelimitedSource {
    /// Load the configured file into memory.
    ///
    /// Fails with `SourceUnavailable` when the file cannot be read, is
    /// empty, or contains a line whose field count differs from the header
    /// width.
    pub fn load(config: DelimitedSourceConfig) -> Result<Self, SampleError> {
        let id = config
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| config.path.display().to_string());
        let content = std::fs::read_to_string(&config.path).map_err(|err| {
            SampleError::SourceUnavailable {
                source_id: id.clone(),
                reason: err.to_string(),
            }
        })?;

        let mut lines = content.lines().enumerate();
        let Some((_, first_line)) = lines.next() else {
            return Err(SampleError::SourceUnavailable {
                source_id: id,
                reason: "file is empty".into(),
            });
        };

        let first_fields = split_line(first_line, config.delimiter);
        let mut rows = Vec::new();
        let columns = if config.has_header {
            first_fields
        } else {
            let names = (1..=first_fields.len())
                .map(|index| format!("{SYNTHETIC_COLUMN_PREFIX}{index}"))
                .collect();
            rows.push(first_fields);
            names
        };

        for (line_index, line) in lines {
            let fields = split_line(line, config.delimiter);
            if fields.len() != columns.len() {
                return Err(SampleError::SourceUnavailable {
                    source_id: id,
                    reason: format!(
                        "line {}: expected {} fields, found {}",
                        line_index + 1,
                        columns.len(),
                        fields.len()
                    ),
                });
            }
            rows.push(fields);
        }

        debug!(
            source_id = %id,
            rows = rows.len(),
            columns = columns.len(),
            "delimited source loaded"
        );
        Ok(Self { id, columns, rows })
    }
}

/// Split one line into fields. `lines()` keeps the `\r` of CRLF endings, so
/// it is stripped here before splitting.
fn split_line(line: &str, delimiter: char) -> Row {
    let line = line.strip_suffix('\r').unwrap_or(line);
    line.split(delimiter).map(str::to_string).collect()
}

impl RowSource for DelimitedSource {
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
