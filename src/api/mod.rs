//! High-level, ergonomic library API: run the download → sample → accumulate
//! pipeline over a batch of URLs, and read the accumulated table back as a
//! preview or a map view. Prefer these entrypoints over the lower-level
//! `core` and `io` modules when integrating INUNDEX.
use std::path::Path;

use chrono::{DateTime, Utc};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::core::accumulate::{Accumulator, MergeOutcome};
use crate::core::params::PipelineParams;
use crate::core::sampling::{SamplingOptions, try_sample};
use crate::error::Result;
use crate::io::fetch::{Fetcher, HttpTransport, Transport};
use crate::io::table::{CsvTableStore, TableStore};
use crate::io::writers::map::MapView;
use crate::types::DepthSample;

/// One URL per line; surrounding whitespace and blank lines are ignored
pub fn read_url_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read a URL list file
pub fn read_url_file(path: &Path) -> Result<Vec<String>> {
    Ok(read_url_list(&std::fs::read_to_string(path)?))
}

/// Emitted after each source of a batch has been handled
#[derive(Debug, Clone, Copy)]
pub struct Progress<'a> {
    /// 0-based position of the source
    pub index: usize,
    pub total: usize,
    pub source: &'a str,
}

impl Progress<'_> {
    /// Completed share of the batch, `(index + 1) / total`
    pub fn fraction(&self) -> f64 {
        (self.index + 1) as f64 / self.total as f64
    }
}

/// Outcome counters of a batch run
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub total: usize,
    /// Sources resolved to a local file (downloaded or cached)
    pub fetched: usize,
    pub fetch_failures: usize,
    pub read_failures: usize,
    /// Rasters without a single valid pixel
    pub empty: usize,
    pub rows_sampled: usize,
    pub rows_added: usize,
    /// Rows in the persisted table at the end of the run
    pub table_rows: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl BatchReport {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            fetched: 0,
            fetch_failures: 0,
            read_failures: 0,
            empty: 0,
            rows_sampled: 0,
            rows_added: 0,
            table_rows: 0,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn finish(&mut self, table_rows: usize) {
        self.table_rows = table_rows;
        self.finished_at = Some(Utc::now());
    }
}

/// Sequential fetch → sample → merge driver
pub struct Pipeline<T: Transport, S: TableStore, R: Rng> {
    fetcher: Fetcher<T>,
    accumulator: Accumulator<S>,
    sampling: SamplingOptions,
    rng: R,
}

impl Pipeline<HttpTransport, CsvTableStore, ChaCha8Rng> {
    /// HTTP downloads into `params.cache_dir`, table persisted at `params.output`
    pub fn from_params(params: &PipelineParams) -> Result<Self> {
        params.validate()?;
        let transport = HttpTransport::new(params.fetch_timeout())?;
        Ok(Self::new(
            Fetcher::new(&params.cache_dir, transport),
            Accumulator::new(CsvTableStore::new(&params.output)),
            params.sampling(),
            params.rng(),
        ))
    }
}

impl<T: Transport, S: TableStore, R: Rng> Pipeline<T, S, R> {
    pub fn new(
        fetcher: Fetcher<T>,
        accumulator: Accumulator<S>,
        sampling: SamplingOptions,
        rng: R,
    ) -> Self {
        Self {
            fetcher,
            accumulator,
            sampling,
            rng,
        }
    }

    pub fn fetcher(&self) -> &Fetcher<T> {
        &self.fetcher
    }

    pub fn accumulator(&self) -> &Accumulator<S> {
        &self.accumulator
    }

    pub fn into_accumulator(self) -> Accumulator<S> {
        self.accumulator
    }

    /// Process every URL in order, calling `on_progress` after each one.
    ///
    /// Download and raster failures only skip their source. A failure to read or
    /// write the persisted table stops the batch; merges done before it are kept.
    pub fn run<F>(&mut self, urls: &[String], mut on_progress: F) -> Result<BatchReport>
    where
        F: FnMut(&Progress<'_>),
    {
        let total = urls.len();
        let mut report = BatchReport::new(total);
        let mut table_rows = self.accumulator.rows()?.len();

        if urls.is_empty() {
            warn!("No raster URLs to process");
        }

        for (index, url) in urls.iter().enumerate() {
            info!("Processing {} ({} of {})", url, index + 1, total);
            match self.fetcher.fetch(url) {
                Some(path) => {
                    report.fetched += 1;
                    if let Some(outcome) = self.process_raster(&path, &mut report)? {
                        table_rows = outcome.total_rows;
                    }
                }
                None => report.fetch_failures += 1,
            }
            on_progress(&Progress {
                index,
                total,
                source: url,
            });
        }

        report.finish(table_rows);
        Ok(report)
    }

    fn process_raster(
        &mut self,
        path: &Path,
        report: &mut BatchReport,
    ) -> Result<Option<MergeOutcome>> {
        let samples = match try_sample(path, self.sampling, &mut self.rng) {
            Ok(samples) => samples,
            Err(e) => {
                error!("Error processing {}: {}", path.display(), e);
                report.read_failures += 1;
                return Ok(None);
            }
        };
        if samples.is_empty() {
            debug!("No valid depth pixels in {}", path.display());
            report.empty += 1;
            return Ok(None);
        }

        report.rows_sampled += samples.len();
        let outcome = self.accumulator.merge(&samples)?;
        report.rows_added += outcome.added_rows;
        debug!(
            "Merged {} samples from {}: {} new, {} total",
            samples.len(),
            path.display(),
            outcome.added_rows,
            outcome.total_rows
        );
        Ok(Some(outcome))
    }
}

/// Run the pipeline over `urls` with HTTP downloads and the CSV table from `params`
pub fn process_urls<F>(urls: &[String], params: &PipelineParams, on_progress: F) -> Result<BatchReport>
where
    F: FnMut(&Progress<'_>),
{
    Pipeline::from_params(params)?.run(urls, on_progress)
}

/// First `rows` rows of the table in stored order; empty when nothing was persisted
pub fn preview<S: TableStore>(store: &S, rows: usize) -> Result<Vec<DepthSample>> {
    let mut table = store.load()?.unwrap_or_default();
    table.truncate(rows);
    Ok(table)
}

/// Map view over the table; `None` when no complete row exists
pub fn map_view<S: TableStore>(store: &S) -> Result<Option<MapView>> {
    let table = store.load()?.unwrap_or_default();
    Ok(MapView::from_samples(&table))
}
