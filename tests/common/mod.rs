#![allow(dead_code)]

use std::cell::Cell;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use gdal::DriverManager;
use gdal::raster::Buffer;

use inundex::{FetchError, Transport};

/// Write a single-band Float32 GeoTIFF; `values` is row-major with `rows` rows
pub fn write_geotiff(
    path: &Path,
    rows: usize,
    cols: usize,
    values: &[f32],
    nodata: Option<f64>,
    geotransform: [f64; 6],
) {
    assert_eq!(values.len(), rows * cols);
    let driver = DriverManager::get_driver_by_name("GTiff").unwrap();
    let mut ds = driver
        .create_with_band_type::<f32, _>(path, cols, rows, 1)
        .unwrap();
    ds.set_geo_transform(&geotransform).unwrap();
    let mut band = ds.rasterband(1).unwrap();
    if let Some(nd) = nodata {
        band.set_no_data_value(Some(nd)).unwrap();
    }
    let mut buffer = Buffer::new((cols, rows), values.to_vec());
    band.write((0, 0), (cols, rows), &mut buffer).unwrap();
}

/// Serves fixture files by URL and counts transfers
#[derive(Default)]
pub struct FixtureTransport {
    files: HashMap<String, PathBuf>,
    pub calls: Cell<usize>,
}

impl FixtureTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serve(mut self, url: &str, file: &Path) -> Self {
        self.files.insert(url.to_string(), file.to_path_buf());
        self
    }
}

impl Transport for FixtureTransport {
    fn download(&self, url: &str, sink: &mut dyn Write) -> Result<u64, FetchError> {
        self.calls.set(self.calls.get() + 1);
        let file = self.files.get(url).ok_or(FetchError::Status(404))?;
        let bytes = std::fs::read(file)?;
        sink.write_all(&bytes)?;
        Ok(bytes.len() as u64)
    }
}
