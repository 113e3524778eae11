#![doc = r#"
INUNDEX — flood-inundation depth extraction from remote GeoTIFFs.

This crate downloads single-band depth rasters from a list of URLs, samples the
pixels that carry a positive inundation depth, places each sampled pixel in
geographic space through the raster's affine transform, and accumulates the
results into one deduplicated CSV table that grows across runs. It powers the
INUNDEX CLI and can be embedded in your own Rust applications.

Requirements
------------
- GDAL development headers and runtime available on your system.
- Rust 2024 edition toolchain.

Quick start: process a URL list
-------------------------------
```rust,no_run
use std::path::Path;
use inundex::{PipelineParams, process_urls, read_url_file};

fn main() -> inundex::Result<()> {
    let params = PipelineParams::default(); // downloads/, output.csv, 100000 samples per raster
    let urls = read_url_file(Path::new("urls.txt"))?;

    let report = process_urls(&urls, &params, |p| {
        println!("{:>5.1}% {}", p.fraction() * 100.0, p.source);
    })?;

    println!("table now holds {} rows", report.table_rows);
    Ok(())
}
```

Injecting the table store
-------------------------
The accumulator only talks to a `TableStore`, so the whole merge logic can run
against memory:

```rust
use inundex::{Accumulator, DepthSample, MemoryTableStore};

fn main() -> inundex::Result<()> {
    let mut acc = Accumulator::new(MemoryTableStore::new());
    acc.merge(&[DepthSample::new(-90.1, 29.9, 0.4), DepthSample::new(-90.2, 29.9, 1.1)])?;
    let outcome = acc.merge(&[DepthSample::new(-90.1, 29.9, 0.4)])?;

    assert_eq!(outcome.added_rows, 0);
    assert_eq!(outcome.total_rows, 2);
    Ok(())
}
```

Sampling a single raster
------------------------
```rust,no_run
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use inundex::{PixelOffset, SamplingOptions, try_sample};

fn main() -> inundex::Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let options = SamplingOptions { cap: 1_000, offset: PixelOffset::Center };
    let samples = try_sample("downloads/depth.tif", options, &mut rng)?;
    println!("{} samples", samples.len());
    Ok(())
}
```

Error handling
--------------
All public functions return `inundex::Result<T>`; match on `inundex::Error` to
handle specific cases. Inside a batch, download and raster failures only skip
their source; failing to read or write the persisted table is returned as an
error.

Useful modules
--------------
- [`api`] — batch pipeline, preview and map view entrypoints.
- [`core`] — parameters, sampling primitives and the accumulator.
- [`io`] — downloads, GDAL raster reading, table stores and writers.
- [`types`] — `DepthSample`, column names and `PixelOffset`.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::params::PipelineParams;
pub use error::{Error, Result};
pub use types::{COLUMNS, DepthSample, PixelOffset, SampleSet};

// Sampling and accumulation
pub use crate::core::accumulate::{Accumulator, MergeOutcome};
pub use crate::core::sampling::{
    DepthGrid, GeoTransform, SamplingOptions, sample, sample_grid, try_sample,
};

// I/O
pub use io::fetch::{FetchError, Fetcher, HttpTransport, Transport};
pub use io::gdal::{GdalError, GdalRasterReader, RasterMetadata};
pub use io::table::{CsvTableStore, MemoryTableStore, TableStore};
pub use io::writers::map::MapView;

// High-level API re-exports
pub use api::{
    BatchReport, Pipeline, Progress, map_view, preview, process_urls, read_url_file,
    read_url_list,
};
