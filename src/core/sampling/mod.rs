//! Depth sampling: select valid pixels of a single-band raster, bound their
//! number, and place each selected pixel in geographic space.
pub mod draw;
pub mod mask;
pub mod transform;

use std::path::Path;

use ndarray::Array2;
use rand::Rng;
use tracing::{debug, error};

use crate::io::gdal::{GdalError, GdalRasterReader};
use crate::types::{DepthSample, PixelOffset, SampleSet};

pub use draw::draw_without_replacement;
pub use mask::{is_valid_depth, valid_positions};
pub use transform::GeoTransform;

/// First band of a raster, ready for sampling
#[derive(Debug, Clone)]
pub struct DepthGrid {
    /// Pixel values, shape (rows, cols)
    pub values: Array2<f64>,
    /// Declared no-data value, if any
    pub nodata: Option<f64>,
    pub geotransform: GeoTransform,
}

/// How many pixels to keep per raster and where inside a pixel to place it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingOptions {
    pub cap: usize,
    pub offset: PixelOffset,
}

/// Sample an in-memory grid
pub fn sample_grid<R: Rng + ?Sized>(
    grid: &DepthGrid,
    options: SamplingOptions,
    rng: &mut R,
) -> SampleSet {
    let valid = valid_positions(&grid.values, grid.nodata);
    let valid_count = valid.len();
    let selected = draw_without_replacement(valid, options.cap, rng);
    debug!(
        "Selected {} of {} valid pixels (cap {})",
        selected.len(),
        valid_count,
        options.cap
    );

    selected
        .into_iter()
        .map(|(row, col)| {
            let (x, y) = grid.geotransform.pixel_to_geo(row, col, options.offset);
            DepthSample::new(x, y, grid.values[[row, col]])
        })
        .collect()
}

/// Open the raster at `path` and sample its first band
pub fn try_sample<P: AsRef<Path>, R: Rng + ?Sized>(
    path: P,
    options: SamplingOptions,
    rng: &mut R,
) -> Result<SampleSet, GdalError> {
    let reader = GdalRasterReader::open(path.as_ref())?;
    debug!(
        "Sampling {} ({}x{}, {})",
        path.as_ref().display(),
        reader.metadata.size_x,
        reader.metadata.size_y,
        reader.metadata.projection
    );
    let grid = reader.read_depth_grid()?;
    Ok(sample_grid(&grid, options, rng))
}

/// Like `try_sample`, but an unreadable raster is reported and yields no samples
pub fn sample<P: AsRef<Path>, R: Rng + ?Sized>(
    path: P,
    options: SamplingOptions,
    rng: &mut R,
) -> SampleSet {
    match try_sample(path.as_ref(), options, rng) {
        Ok(samples) => samples,
        Err(e) => {
            error!("Error processing {}: {}", path.as_ref().display(), e);
            SampleSet::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn options(cap: usize) -> SamplingOptions {
        SamplingOptions {
            cap,
            offset: PixelOffset::Center,
        }
    }

    #[test]
    fn no_valid_pixels_gives_empty_set() {
        let grid = DepthGrid {
            values: array![[0.0, -1.0], [-9999.0, 0.0]],
            nodata: Some(-9999.0),
            geotransform: GeoTransform::IDENTITY,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(sample_grid(&grid, options(10), &mut rng).is_empty());
    }

    #[test]
    fn under_cap_returns_every_valid_pixel_with_coordinates() {
        let grid = DepthGrid {
            values: array![[0.5, 0.0], [-3.0, 1.25]],
            nodata: None,
            geotransform: GeoTransform([100.0, 2.0, 0.0, 50.0, 0.0, -2.0]),
        };
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let samples = sample_grid(&grid, options(10), &mut rng);
        assert_eq!(
            samples,
            vec![
                DepthSample::new(101.0, 49.0, 0.5),
                DepthSample::new(103.0, 47.0, 1.25),
            ]
        );
    }

    #[test]
    fn over_cap_returns_cap_distinct_valid_pixels() {
        let values = Array2::from_shape_fn((40, 30), |(r, c)| {
            if (r + c) % 3 == 0 { 0.0 } else { (r * 30 + c) as f64 }
        });
        let grid = DepthGrid {
            values,
            nodata: Some(0.0),
            geotransform: GeoTransform::IDENTITY,
        };
        let valid: HashSet<_> = valid_positions(&grid.values, grid.nodata)
            .into_iter()
            .collect();
        assert!(valid.len() > 100);

        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let samples = sample_grid(&grid, options(100), &mut rng);
        assert_eq!(samples.len(), 100);

        let picked: HashSet<_> = samples
            .iter()
            .map(|s| ((s.latitude - 0.5) as usize, (s.longitude - 0.5) as usize))
            .collect();
        assert_eq!(picked.len(), 100);
        assert!(picked.is_subset(&valid));
        for s in &samples {
            let (row, col) = ((s.latitude - 0.5) as usize, (s.longitude - 0.5) as usize);
            assert_eq!(s.depth, grid.values[[row, col]]);
        }
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let grid = DepthGrid {
            values: Array2::from_elem((20, 20), 1.0),
            nodata: None,
            geotransform: GeoTransform::IDENTITY,
        };
        let a = sample_grid(&grid, options(15), &mut ChaCha8Rng::seed_from_u64(3));
        let b = sample_grid(&grid, options(15), &mut ChaCha8Rng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn unreadable_raster_yields_empty_set() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.tif");
        std::fs::write(&path, b"definitely not a tiff").unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        assert!(try_sample(&path, options(10), &mut rng).is_err());
        assert!(sample(&path, options(10), &mut rng).is_empty());
    }
}
