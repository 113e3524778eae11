//! Persistence of the accumulated depth table.
//!
//! `TableStore` is the seam the accumulator writes through. The CSV store keeps
//! the table as `Longitude,Latitude,InundationDepth_m` with a header row and no
//! index column; the memory store backs tests and embedded use.
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::types::{COLUMNS, DepthSample};

/// Whole-table storage for accumulated samples
pub trait TableStore {
    /// The persisted table, or `None` when nothing was persisted yet
    fn load(&self) -> Result<Option<Vec<DepthSample>>>;

    /// Replace the persisted table with `rows`
    fn save(&mut self, rows: &[DepthSample]) -> Result<()>;
}

/// Parse a table with a header row
pub fn read_table<R: Read>(reader: R) -> Result<Vec<DepthSample>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);
    let rows = rdr
        .deserialize::<DepthSample>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Write a table with a header row; an empty table still gets the header
pub fn write_table<W: Write>(writer: W, rows: &[DepthSample]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(COLUMNS)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// CSV file on disk, replaced in full on every save
#[derive(Debug, Clone)]
pub struct CsvTableStore {
    path: PathBuf,
}

impl CsvTableStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TableStore for CsvTableStore {
    fn load(&self) -> Result<Option<Vec<DepthSample>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let rows = read_table(File::open(&self.path)?)?;
        debug!("Loaded {} rows from {}", rows.len(), self.path.display());
        Ok(Some(rows))
    }

    fn save(&mut self, rows: &[DepthSample]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;
        // Write beside the target and swap it in, so a failed write keeps the old table
        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        write_table(tmp.as_file_mut(), rows)?;
        tmp.persist(&self.path)?;
        debug!("Wrote {} rows to {}", rows.len(), self.path.display());
        Ok(())
    }
}

/// In-memory table
#[derive(Debug, Clone, Default)]
pub struct MemoryTableStore {
    rows: Option<Vec<DepthSample>>,
}

impl MemoryTableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already persisted table
    pub fn with_rows(rows: Vec<DepthSample>) -> Self {
        Self { rows: Some(rows) }
    }

    pub fn rows(&self) -> Option<&[DepthSample]> {
        self.rows.as_deref()
    }
}

impl TableStore for MemoryTableStore {
    fn load(&self) -> Result<Option<Vec<DepthSample>>> {
        Ok(self.rows.clone())
    }

    fn save(&mut self, rows: &[DepthSample]) -> Result<()> {
        self.rows = Some(rows.to_vec());
        Ok(())
    }
}
