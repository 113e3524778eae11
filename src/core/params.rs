use std::path::{Path, PathBuf};
use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::sampling::SamplingOptions;
use crate::error::{Error, Result};
use crate::types::PixelOffset;

pub const DEFAULT_CACHE_DIR: &str = "downloads";
pub const DEFAULT_OUTPUT: &str = "output.csv";
pub const DEFAULT_SAMPLE_LIMIT: usize = 100_000;
pub const DEFAULT_PREVIEW_ROWS: usize = 50;

/// Pipeline parameters suitable for config files; missing keys take defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineParams {
    /// Directory downloaded rasters are cached in
    pub cache_dir: PathBuf,
    /// Persisted output table
    pub output: PathBuf,
    /// Maximum number of pixels sampled per raster
    pub sample_limit: usize,
    /// Where inside a pixel coordinates are taken
    pub pixel_offset: PixelOffset,
    /// Fixed seed for reproducible sampling; None draws from OS entropy
    pub seed: Option<u64>,
    /// Per-request timeout; None means no timeout
    pub fetch_timeout_secs: Option<u64>,
    /// Rows shown by the preview
    pub preview_rows: usize,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            output: PathBuf::from(DEFAULT_OUTPUT),
            sample_limit: DEFAULT_SAMPLE_LIMIT,
            pixel_offset: PixelOffset::Center,
            seed: None,
            fetch_timeout_secs: None,
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

impl PipelineParams {
    /// Load from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_limit == 0 {
            return Err(Error::ZeroSampleLimit {
                limit: self.sample_limit,
            });
        }
        if self.preview_rows == 0 {
            return Err(Error::InvalidArgument {
                arg: "preview_rows",
                value: self.preview_rows.to_string(),
            });
        }
        Ok(())
    }

    pub fn sampling(&self) -> SamplingOptions {
        SamplingOptions {
            cap: self.sample_limit,
            offset: self.pixel_offset,
        }
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_secs.map(Duration::from_secs)
    }

    /// Generator used for pixel draws
    pub fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }
}
