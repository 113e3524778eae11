use std::path::Path;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use inundex::io::table::write_table;
use inundex::io::writers::{write_map_view, write_report_sidecar};
use inundex::{CsvTableStore, PipelineParams, map_view, preview, process_urls, read_url_file};

use super::args::{CliArgs, Command};
use super::errors::AppError;

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_params(config: Option<&Path>) -> Result<PipelineParams, AppError> {
    match config {
        Some(path) => {
            PipelineParams::from_json_file(path).map_err(|source| AppError::InvalidConfig {
                path: path.to_path_buf(),
                source,
            })
        }
        None => Ok(PipelineParams::default()),
    }
}

fn run_batch(
    params: &PipelineParams,
    urls_path: &Path,
    report_path: Option<&Path>,
) -> Result<(), AppError> {
    let urls = read_url_file(urls_path).map_err(|source| AppError::UrlList {
        path: urls_path.to_path_buf(),
        source,
    })?;
    if urls.is_empty() {
        warn!("The URL list {:?} is empty or improperly formatted.", urls_path);
        return Ok(());
    }
    info!("{} URLs loaded.", urls.len());
    info!("Cache directory: {:?}", params.cache_dir);
    info!("Output table: {:?}", params.output);

    let report = process_urls(&urls, params, |p| {
        info!("Progress: {:.1}%", p.fraction() * 100.0);
    })?;

    info!("All files processed and data extracted!");
    info!("Fetched: {}", report.fetched);
    info!("Download failures: {}", report.fetch_failures);
    info!("Read failures: {}", report.read_failures);
    info!("Without valid pixels: {}", report.empty);
    info!("Rows added: {}", report.rows_added);
    info!("Rows in table: {}", report.table_rows);

    if let Some(path) = report_path {
        write_report_sidecar(&report, path)?;
        info!("Run report written to {:?}", path);
    }
    Ok(())
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(args.log);

    let mut params = load_params(args.config.as_deref())?;
    if let Some(output) = args.output {
        params.output = output;
    }

    match args.command {
        Command::Run {
            urls,
            cache_dir,
            sample_limit,
            pixel_offset,
            seed,
            timeout,
            report,
        } => {
            if let Some(dir) = cache_dir {
                params.cache_dir = dir;
            }
            if let Some(limit) = sample_limit {
                params.sample_limit = limit;
            }
            if let Some(offset) = pixel_offset {
                params.pixel_offset = offset;
            }
            if seed.is_some() {
                params.seed = seed;
            }
            if timeout.is_some() {
                params.fetch_timeout_secs = timeout;
            }
            run_batch(&params, &urls, report.as_deref())?;
        }
        Command::Preview { rows } => {
            if let Some(rows) = rows {
                params.preview_rows = rows;
            }
            params.validate()?;
            let store = CsvTableStore::new(&params.output);
            if !store.path().exists() {
                warn!("No output table at {:?}", params.output);
                return Ok(());
            }
            let head = preview(&store, params.preview_rows)?;
            info!("Preview: top {} records from {:?}", head.len(), params.output);
            write_table(std::io::stdout().lock(), &head)?;
        }
        Command::Map { out } => {
            let store = CsvTableStore::new(&params.output);
            match map_view(&store)? {
                Some(view) => {
                    write_map_view(&view, &out)?;
                    info!(
                        "Map view with {} points written to {:?}",
                        view.point_count(),
                        out
                    );
                }
                None => warn!("No complete rows in {:?}; no map written", params.output),
            }
        }
    }

    Ok(())
}
