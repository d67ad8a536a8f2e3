// Copyright 2025 Benchplot Contributors
// SPDX-License-Identifier: Apache-2.0

//! Delimited table loading.
//!
//! A [`Schema`] names the source columns a dataset needs and the record
//! fields they bind to. Columns that are not bound are dropped at load time,
//! and every row is checked against the source column count once, so the
//! rest of the pipeline only ever sees typed records.
//!
//! # Example
//!
//! ```no_run
//! use benchplot_report::loader::{load, Schema};
//! use benchplot_report::BenchmarkRecord;
//!
//! let records: Vec<BenchmarkRecord> = load("data/benchmark.csv", &Schema::queue())?;
//! # Ok::<(), benchplot_report::ReportError>(())
//! ```

use crate::error::{ReportError, Result};
use csv::{Position, ReaderBuilder, StringRecord};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Field separator of an input table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// A single byte such as `,` or `\t`.
    Byte(u8),
    /// Any run of whitespace.
    Whitespace,
}

/// Where the source column names come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Columns {
    /// The first row after the skipped lines is a header.
    Header,
    /// The file has no header; columns are named by position.
    Positional(Vec<String>),
}

/// Binds a record field to a source column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Field name on the target record type.
    pub field: String,
    /// Column name in the source file.
    pub column: String,
}

/// Column schema of an input table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    delimiter: Delimiter,
    skip_rows: usize,
    columns: Columns,
    bindings: Vec<Binding>,
    limit: Option<usize>,
}

impl Schema {
    /// Schema whose column names are read from a header row.
    pub fn with_header(delimiter: Delimiter) -> Self {
        Self {
            delimiter,
            skip_rows: 0,
            columns: Columns::Header,
            bindings: Vec::new(),
            limit: None,
        }
    }

    /// Schema for a headerless file whose columns are named by position.
    pub fn positional<S: AsRef<str>>(delimiter: Delimiter, names: &[S]) -> Self {
        Self {
            delimiter,
            skip_rows: 0,
            columns: Columns::Positional(names.iter().map(|n| n.as_ref().to_string()).collect()),
            bindings: Vec::new(),
            limit: None,
        }
    }

    /// Bind `field` on the record type to the source column `column`.
    pub fn bind(mut self, field: impl Into<String>, column: impl Into<String>) -> Self {
        self.bindings.push(Binding {
            field: field.into(),
            column: column.into(),
        });
        self
    }

    /// Skip this many leading lines before the header or first row.
    pub fn skip_rows(mut self, rows: usize) -> Self {
        self.skip_rows = rows;
        self
    }

    /// Keep at most this many data rows.
    pub fn limit(mut self, rows: usize) -> Self {
        self.limit = Some(rows);
        self
    }

    /// Field bindings in declaration order.
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Multi-series queue benchmark: `name,ops,duration`.
    pub fn queue() -> Self {
        Self::with_header(Delimiter::Byte(b','))
            .bind("name", "name")
            .bind("ops", "ops")
            .bind("duration", "duration")
    }

    /// Repeated-trial benchmark: `readDuration,parseDuration,opDuration,count`.
    pub fn runs() -> Self {
        Self::with_header(Delimiter::Byte(b','))
            .bind("ops", "count")
            .bind("duration", "opDuration")
    }

    /// Whitespace-separated edge list with two comment lines.
    pub fn edges(skip_rows: usize, limit: usize) -> Self {
        Self::positional(Delimiter::Whitespace, &["from", "to", "weight", "ts1"])
            .skip_rows(skip_rows)
            .limit(limit)
            .bind("from", "from")
            .bind("to", "to")
    }
}

/// Load a delimited table into typed records according to `schema`.
///
/// # Errors
///
/// Returns [`ReportError::DataFormat`] if the file cannot be read, a bound
/// column is missing, a row has the wrong number of columns, or a value
/// cannot be parsed into the record field.
pub fn load<T: DeserializeOwned>(path: impl AsRef<Path>, schema: &Schema) -> Result<Vec<T>> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(ReportError::data_format(path, "input file not found"));
    }
    let content = fs::read_to_string(path)
        .map_err(|e| ReportError::data_format(path, format!("cannot read file: {}", e)))?;

    // Blank lines are dropped here so that each body line maps back to one
    // physical line of the file.
    let mut physical_lines = Vec::new();
    let mut body_lines = Vec::new();
    for (idx, line) in content.lines().enumerate().skip(schema.skip_rows) {
        if line.trim().is_empty() {
            continue;
        }
        physical_lines.push(idx + 1);
        body_lines.push(match schema.delimiter {
            Delimiter::Byte(_) => line.to_string(),
            Delimiter::Whitespace => line.split_whitespace().collect::<Vec<_>>().join(","),
        });
    }
    let body = body_lines.join("\n");

    let delimiter = match schema.delimiter {
        Delimiter::Byte(b) => b,
        Delimiter::Whitespace => b',',
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(body.as_bytes());
    let mut rows = reader.records();

    let source_columns: Vec<String> = match &schema.columns {
        Columns::Header => match rows.next() {
            Some(header) => header
                .map_err(|e| ReportError::data_format(path, e.to_string()))?
                .iter()
                .map(|c| c.trim().to_string())
                .collect(),
            None => return Err(ReportError::data_format(path, "missing header row")),
        },
        Columns::Positional(names) => names.clone(),
    };

    let indices = schema
        .bindings
        .iter()
        .map(|b| {
            source_columns
                .iter()
                .position(|c| *c == b.column)
                .ok_or_else(|| ReportError::data_format(path, format!("missing column `{}`", b.column)))
        })
        .collect::<Result<Vec<usize>>>()?;

    let fields: StringRecord = schema.bindings.iter().map(|b| b.field.as_str()).collect();
    let at = |position: Option<&Position>| {
        position
            .and_then(|p| (p.line() as usize).checked_sub(1))
            .and_then(|i| physical_lines.get(i))
            .map(|line| format!("line {}: ", line))
            .unwrap_or_default()
    };

    let mut records = Vec::new();
    for row in rows {
        if schema.limit.is_some_and(|limit| records.len() >= limit) {
            break;
        }
        let row = row.map_err(|e| ReportError::data_format(path, format!("{}{}", at(e.position()), e)))?;
        let line = at(row.position());
        if row.len() != source_columns.len() {
            return Err(ReportError::data_format(
                path,
                format!(
                    "{}expected {} columns, found {}",
                    line,
                    source_columns.len(),
                    row.len()
                ),
            ));
        }

        let selected: StringRecord = indices.iter().map(|&i| row[i].trim()).collect();
        let record = selected
            .deserialize(Some(&fields))
            .map_err(|e| ReportError::data_format(path, format!("{}{}", line, e)))?;
        records.push(record);
    }

    debug!(path = %path.display(), rows = records.len(), "Loaded table");
    Ok(records)
}
