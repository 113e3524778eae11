//! I/O layer: raster downloads with a local cache, GDAL-backed raster reading,
//! the persisted depth table, and `writers` for map views and run reports.
pub mod fetch;
pub use self::fetch::{FetchError, Fetcher, HttpTransport, Transport};

pub mod gdal;
pub use self::gdal::{GdalError, GdalRasterReader, RasterMetadata};

pub mod table;
pub use self::table::{CsvTableStore, MemoryTableStore, TableStore};

pub mod writers;
