use gdal::raster::GdalDataType;
use gdal::{Dataset, errors::GdalError as GdalCrateError};
use ndarray::Array2;
use std::path::Path;
use thiserror::Error;

use crate::core::sampling::{DepthGrid, GeoTransform};

/// Errors encountered when reading a raster through GDAL
#[derive(Debug, Error)]
pub enum GdalError {
    #[error("GDAL error: {0}")]
    Gdal(#[from] GdalCrateError),
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("Dimension mismatch: expected {0}x{1}, got {2} values")]
    DimensionMismatch(usize, usize, usize),
}

/// Metadata extracted from a GDAL-supported dataset
#[derive(Debug, Clone)]
pub struct RasterMetadata {
    /// Width (pixels) of the raster
    pub size_x: usize,
    /// Height (lines) of the raster
    pub size_y: usize,
    /// Number of raster bands
    pub bands: usize,
    /// Affine geotransform coefficients ([origin_x, pixel_width, rot_x, origin_y, rot_y, pixel_height])
    pub geotransform: [f64; 6],
    /// Projection as EPSG:XXXX when an authority code is present, WKT otherwise
    pub projection: String,
}

/// Reader for depth rasters (GeoTIFF or any other GDAL format)
pub struct GdalRasterReader {
    pub dataset: Dataset,
    pub metadata: RasterMetadata,
}

// Helper to extract EPSG code from WKT authority tag
fn parse_epsg(wkt: &str) -> Option<String> {
    const KEY: &str = "AUTHORITY[\"EPSG\",\"";
    if let Some(idx) = wkt.rfind(KEY) {
        let start = idx + KEY.len();
        if let Some(end) = wkt[start..].find('"') {
            let code = &wkt[start..start + end];
            return Some(format!("EPSG:{}", code));
        }
    }
    None
}

/// Bring a declared no-data value to the precision the band stores.
///
/// A `Float32` band cannot hold most doubles exactly, so the sentinel is rounded
/// the same way the pixels were before the exact comparison.
pub fn nodata_at_band_precision(nodata: f64, band_type: GdalDataType) -> f64 {
    match band_type {
        GdalDataType::Float32 => nodata as f32 as f64,
        _ => nodata,
    }
}

impl GdalRasterReader {
    /// Open a GDAL-supported dataset
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, GdalError> {
        let dataset = Dataset::open(path.as_ref())?;
        let (size_x, size_y) = dataset.raster_size();
        let bands = dataset.raster_count() as usize;
        if bands == 0 {
            return Err(GdalError::UnsupportedFormat("No raster bands found".into()));
        }
        // Rasters without a geotransform fall back to pixel space
        let geotransform = match dataset.geo_transform() {
            Ok(gt) => gt,
            Err(_) => GeoTransform::IDENTITY.0,
        };
        let proj = dataset.projection();
        let projection = if proj.starts_with("EPSG:") {
            proj
        } else if let Some(code) = parse_epsg(&proj) {
            code
        } else {
            proj
        };
        Ok(GdalRasterReader {
            dataset,
            metadata: RasterMetadata {
                size_x: size_x as usize,
                size_y: size_y as usize,
                bands,
                geotransform,
                projection,
            },
        })
    }

    /// Read a single band (1-based index) as an f64 ndarray of shape (height, width)
    pub fn read_band(&self, index: usize) -> Result<Array2<f64>, GdalError> {
        if index == 0 || index > self.metadata.bands {
            return Err(GdalError::UnsupportedFormat(format!(
                "Band index {} out of range",
                index
            )));
        }
        let band = self.dataset.rasterband(index)?;
        let window = (self.metadata.size_x, self.metadata.size_y);
        let buf = band.read_as::<f64>((0, 0), window, window, None)?;
        let data_vec = buf.data().to_vec();
        let len = data_vec.len();
        Array2::from_shape_vec((self.metadata.size_y, self.metadata.size_x), data_vec).map_err(
            |_| GdalError::DimensionMismatch(self.metadata.size_x, self.metadata.size_y, len),
        )
    }

    /// Declared no-data value of a band, at the band's storage precision
    pub fn nodata(&self, index: usize) -> Result<Option<f64>, GdalError> {
        let band = self.dataset.rasterband(index)?;
        let band_type = band.band_type();
        Ok(band
            .no_data_value()
            .map(|nd| nodata_at_band_precision(nd, band_type)))
    }

    /// Read band 1 together with its no-data value and geotransform
    pub fn read_depth_grid(&self) -> Result<DepthGrid, GdalError> {
        Ok(DepthGrid {
            values: self.read_band(1)?,
            nodata: self.nodata(1)?,
            geotransform: GeoTransform(self.metadata.geotransform),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epsg_code_is_taken_from_last_authority() {
        let wkt = r#"GEOGCS["WGS 84",DATUM["WGS_1984",AUTHORITY["EPSG","6326"]],AUTHORITY["EPSG","4326"]]"#;
        assert_eq!(parse_epsg(wkt).as_deref(), Some("EPSG:4326"));
        assert_eq!(parse_epsg("LOCAL_CS[\"x\"]"), None);
    }

    #[test]
    fn float32_nodata_is_rounded_to_band_precision() {
        let declared = 0.1f64;
        let stored = 0.1f32 as f64;
        assert_ne!(declared, stored);
        assert_eq!(
            nodata_at_band_precision(declared, GdalDataType::Float32),
            stored
        );
        assert_eq!(
            nodata_at_band_precision(-9999.0, GdalDataType::Int16),
            -9999.0
        );
    }
}
