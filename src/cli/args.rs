use clap::{Parser, Subcommand};
use std::path::PathBuf;

use inundex::PixelOffset;

#[derive(Parser)]
#[command(name = "inundex", version, about = "INUNDEX CLI")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// JSON file with pipeline parameters; flags given here override it
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output table (CSV)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true, default_value_t = false)]
    pub log: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Download, sample and accumulate every raster listed in a URL file
    Run {
        /// Text file with one GeoTIFF URL per line
        #[arg(short, long)]
        urls: PathBuf,

        /// Directory downloaded rasters are cached in
        #[arg(long)]
        cache_dir: Option<PathBuf>,

        /// Maximum number of pixels sampled per raster
        #[arg(long)]
        sample_limit: Option<usize>,

        /// Where inside a pixel coordinates are taken (center or upper-left)
        #[arg(long, value_enum)]
        pixel_offset: Option<PixelOffset>,

        /// Seed for reproducible sampling
        #[arg(long)]
        seed: Option<u64>,

        /// Per-download timeout in seconds (no timeout by default)
        #[arg(long)]
        timeout: Option<u64>,

        /// Write a JSON run report to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Print the leading rows of the output table as CSV
    Preview {
        /// Number of rows to print
        #[arg(short = 'n', long)]
        rows: Option<usize>,
    },

    /// Write a JSON map view (point layer, tooltip, initial view) of the output table
    Map {
        /// Destination JSON file
        #[arg(long)]
        out: PathBuf,
    },
}
