use crate::analyzers::WeatherAnalyzer;
use crate::archive::{ArchiveGateway, DirectoryArchive};
use crate::cli::args::{Cli, Commands, Selection};
use crate::config::PipelineConfig;
use crate::error::{ProcessingError, Result};
use crate::models::{AnalyticsSummary, StationDirectory, WeatherSchema, YearWindow};
use crate::processors::{require_archived, Imputer, MultiYearPipeline, PipelineReport};
use crate::readers::StationReader;
use crate::sources::{ClimateBulkClient, HttpReferenceDownloader, ReferenceSource};
use crate::utils::progress::ProgressReporter;
use crate::writers::XlsxWorkbookWriter;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, error, info};

pub fn run(cli: Cli) -> Result<()> {
    setup_logging(cli.verbose, cli.log_file.as_deref())?;

    let config = PipelineConfig::load(cli.config.as_deref())?;
    debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Run {
            selection,
            json,
            refresh_stations,
        } => {
            let window = check_selection(&config, &selection)?;
            let archive = DirectoryArchive::new(&config.archive_root, &config.bucket)?;

            ingest(&config, &selection, window, refresh_stations, &archive, cli.quiet)?;
            let summary = summarize(&selection, window, &archive)?;
            print_summary(&summary, json)?;
        }

        Commands::Ingest {
            selection,
            refresh_stations,
        } => {
            let window = check_selection(&config, &selection)?;
            let archive = DirectoryArchive::new(&config.archive_root, &config.bucket)?;

            let report = ingest(&config, &selection, window, refresh_stations, &archive, cli.quiet)?;
            require_archived(&report)?;
        }

        Commands::Summarize { selection, json } => {
            let window = check_selection(&config, &selection)?;
            let archive = DirectoryArchive::new(&config.archive_root, &config.bucket)?;

            let summary = summarize(&selection, window, &archive)?;
            print_summary(&summary, json)?;
        }
    }

    Ok(())
}

/// Validate the year selector against the configured set
fn check_selection(config: &PipelineConfig, selection: &Selection) -> Result<YearWindow> {
    config.check_year(selection.year)?;
    Ok(YearWindow::new(selection.year))
}

fn ingest(
    config: &PipelineConfig,
    selection: &Selection,
    window: YearWindow,
    refresh_stations: bool,
    archive: &dyn ArchiveGateway,
    quiet: bool,
) -> Result<PipelineReport> {
    let schema = WeatherSchema::climate_daily();
    let stations = load_stations(config, &schema, refresh_stations)?;

    let source = ClimateBulkClient::new(&config.bulk_data_url, selection.city.station_id())
        .with_selector(config.request_month, config.request_day, config.timeframe);
    let workbook = XlsxWorkbookWriter::new(&config.output_dir);
    let imputer = Imputer::new(schema.clone()).with_strict(config.strict_imputation);

    let years = window.years();
    let progress = ProgressReporter::new(years.len() as u64, "Processing years...", quiet);

    let report = MultiYearPipeline::new(&source, archive, &workbook)
        .with_schema(schema)
        .with_imputer(imputer)
        .run(selection.city, window, &stations, Some(&progress));

    progress.finish_with_message(&format!(
        "Archived {}/{} years",
        report.archived_years().len(),
        years.len()
    ));
    progress.println(&format!("\n{}", report.summary()));

    Ok(report)
}

/// Reuse the local station inventory unless it is missing or a refresh is requested
fn load_stations(
    config: &PipelineConfig,
    schema: &WeatherSchema,
    refresh: bool,
) -> Result<StationDirectory> {
    let path = &config.station_inventory_path;
    if refresh || !path.is_file() {
        HttpReferenceDownloader::new(&config.station_inventory_url).fetch(path)?;
    } else {
        info!(path = %path.display(), "Using cached station inventory");
    }

    StationReader::with_skip_rows(config.station_inventory_skip_rows).read_directory(path, schema)
}

fn summarize(
    selection: &Selection,
    window: YearWindow,
    archive: &dyn ArchiveGateway,
) -> Result<AnalyticsSummary> {
    WeatherAnalyzer::new(archive)
        .summarize(selection.city, window)
        .inspect_err(|e| {
            error!(year = window.target, city = %selection.city, error = %e, "Summary failed");
        })
}

fn print_summary(summary: &AnalyticsSummary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        println!("\n{}", summary.report());
    }
    Ok(())
}

/// Set up structured logging on stderr, or into `log_file` when given
pub fn setup_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let log_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("climate_archiver={}", log_level)));

    let result = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
        }
        None => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };
    result.map_err(|e| ProcessingError::Config(format!("Failed to initialise logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}
