//! Merges freshly sampled rows into the persisted table.
//!
//! Every merge reads the whole table, appends the new rows, drops exact
//! duplicates keeping the first occurrence, and writes the table back in full.
//! Rows already persisted therefore always win over new duplicates and keep
//! their order.
use std::collections::HashSet;

use crate::error::Result;
use crate::io::table::TableStore;
use crate::types::DepthSample;

/// Row counts around a single merge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeOutcome {
    /// Rows in the table before the merge
    pub previous_rows: usize,
    /// New rows that were not already present
    pub added_rows: usize,
    /// Rows in the table after the merge
    pub total_rows: usize,
}

/// Sole writer of the persisted table
pub struct Accumulator<S: TableStore> {
    store: S,
}

impl<S: TableStore> Accumulator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Current table contents (empty when nothing was persisted yet)
    pub fn rows(&self) -> Result<Vec<DepthSample>> {
        Ok(self.store.load()?.unwrap_or_default())
    }

    /// Append `new_rows` to the persisted table, deduplicate, and write it back
    pub fn merge(&mut self, new_rows: &[DepthSample]) -> Result<MergeOutcome> {
        let mut combined = self.store.load()?.unwrap_or_default();
        let previous_rows = combined.len();
        combined.extend_from_slice(new_rows);

        let mut seen = HashSet::with_capacity(combined.len());
        let mut added_rows = 0;
        let merged: Vec<DepthSample> = combined
            .into_iter()
            .enumerate()
            .filter(|(i, row)| {
                let fresh = seen.insert(row.dedup_key());
                if fresh && *i >= previous_rows {
                    added_rows += 1;
                }
                fresh
            })
            .map(|(_, row)| row)
            .collect();

        self.store.save(&merged)?;
        Ok(MergeOutcome {
            previous_rows,
            added_rows,
            total_rows: merged.len(),
        })
    }
}
