// Copyright 2025 Benchplot Contributors
// SPDX-License-Identifier: Apache-2.0

//! Social-graph edge list hand-off.
//!
//! The raw edge list is whitespace separated with two comment lines and
//! four columns (`from to weight ts1`). Only the endpoints are kept, the
//! list is truncated, and the result is written as a small CSV for the
//! external graph layout tool.

use crate::error::Result;
use crate::loader::{self, Schema};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Default output file name.
pub const EDGES_FILE: &str = "edges.csv";

/// Default number of leading comment lines.
pub const DEFAULT_SKIP_ROWS: usize = 2;

/// Default number of edges handed to the layout tool.
pub const DEFAULT_LIMIT: usize = 92;

/// One directed edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Source vertex.
    pub from: u64,
    /// Target vertex.
    pub to: u64,
}

/// Load at most `limit` edges after skipping `skip_rows` lines.
pub fn load_edges(path: impl AsRef<Path>, skip_rows: usize, limit: usize) -> Result<Vec<Edge>> {
    loader::load(path, &Schema::edges(skip_rows, limit))
}

/// Write edges as `from,to` CSV.
pub fn write_edges(edges: &[Edge], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)?;
    for edge in edges {
        writer.serialize(edge)?;
    }
    writer.flush()?;

    debug!(path = %path.display(), edges = edges.len(), "Wrote edge list");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;
    use std::fs;

    #[test]
    fn test_load_and_write_edges() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("out.facebook-wosn-links");
        fs::write(
            &input,
            "% sym unweighted\n% 5 4 4\n1 2 1 1100\n1 3 1 1200\n2 4 1 1300\n3 4 1 1400\n",
        )
        .unwrap();

        let edges = load_edges(&input, DEFAULT_SKIP_ROWS, 3).unwrap();
        assert_eq!(
            edges,
            vec![
                Edge { from: 1, to: 2 },
                Edge { from: 1, to: 3 },
                Edge { from: 2, to: 4 }
            ]
        );

        let output = dir.path().join(EDGES_FILE);
        write_edges(&edges, &output).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "from,to\n1,2\n1,3\n2,4\n");
    }

    #[test]
    fn test_edge_row_with_missing_column() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("edges");
        fs::write(&input, "%\n%\n1 2 1\n").unwrap();

        let err = load_edges(&input, DEFAULT_SKIP_ROWS, DEFAULT_LIMIT).unwrap_err();
        assert!(matches!(err, ReportError::DataFormat { .. }));
    }
}
