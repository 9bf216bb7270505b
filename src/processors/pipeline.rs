use crate::archive::ArchiveGateway;
use crate::error::{ProcessingError, Result};
use crate::models::{City, ObservationTable, StationDirectory, Table, WeatherSchema, YearWindow};
use crate::processors::{DataMerger, ImputationReport, Imputer};
use crate::sources::ObservationSource;
use crate::utils::filename::{archive_key, workbook_name};
use crate::utils::progress::ProgressReporter;
use crate::writers::{WorkbookSheet, WorkbookSink};
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Step of the per-year processing where a failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetch,
    Merge,
    Impute,
    Persist,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Fetch => "fetch",
            Stage::Merge => "merge",
            Stage::Impute => "impute",
            Stage::Persist => "persist",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug)]
pub enum YearStatus {
    Archived {
        key: String,
        rows: usize,
        imputation: ImputationReport,
    },
    Failed {
        stage: Stage,
        error: ProcessingError,
    },
}

#[derive(Debug)]
pub struct YearOutcome {
    pub year: i32,
    pub status: YearStatus,
}

impl YearOutcome {
    pub fn is_archived(&self) -> bool {
        matches!(self.status, YearStatus::Archived { .. })
    }
}

#[derive(Debug)]
pub enum WorkbookStatus {
    Written { path: PathBuf, sheets: Vec<String> },
    /// No year was fetched, so there was nothing to write
    Skipped,
    Failed(ProcessingError),
}

#[derive(Debug)]
pub struct PipelineReport {
    pub city: City,
    pub window: YearWindow,
    pub outcomes: Vec<YearOutcome>,
    pub workbook: WorkbookStatus,
}

impl PipelineReport {
    pub fn archived_years(&self) -> Vec<i32> {
        self.outcomes
            .iter()
            .filter(|o| o.is_archived())
            .map(|o| o.year)
            .collect()
    }

    pub fn failed_years(&self) -> Vec<i32> {
        self.outcomes
            .iter()
            .filter(|o| !o.is_archived())
            .map(|o| o.year)
            .collect()
    }

    pub fn summary(&self) -> String {
        let years = self.window.years();
        let mut out = match (years.first(), years.last()) {
            (Some(first), Some(last)) => format!("Pipeline for {} ({}-{}):", self.city, first, last),
            _ => format!("Pipeline for {}:", self.city),
        };
        for outcome in &self.outcomes {
            match &outcome.status {
                YearStatus::Archived {
                    key,
                    rows,
                    imputation,
                } => out.push_str(&format!(
                    "\n  {}: archived {} rows as {} ({} values imputed{})",
                    outcome.year,
                    rows,
                    key,
                    imputation.total_filled(),
                    if imputation.undefined.is_empty() {
                        String::new()
                    } else {
                        format!(", {} columns left empty", imputation.undefined.len())
                    }
                )),
                YearStatus::Failed { stage, error } => out.push_str(&format!(
                    "\n  {}: failed during {}: {}",
                    outcome.year, stage, error
                )),
            }
        }
        match &self.workbook {
            WorkbookStatus::Written { path, sheets } => out.push_str(&format!(
                "\n  Workbook: {} (sheets: {})",
                path.display(),
                sheets.join(", ")
            )),
            WorkbookStatus::Skipped => out.push_str("\n  Workbook: skipped, no year fetched"),
            WorkbookStatus::Failed(e) => out.push_str(&format!("\n  Workbook: failed: {}", e)),
        }
        out
    }
}

/// Fetch, merge, impute and archive each year of a [`YearWindow`], then
/// write the raw tables of every fetched year to one workbook.
pub struct MultiYearPipeline<'a> {
    source: &'a dyn ObservationSource,
    archive: &'a dyn ArchiveGateway,
    workbook: &'a dyn WorkbookSink,
    merger: DataMerger,
    imputer: Imputer,
}

impl<'a> MultiYearPipeline<'a> {
    pub fn new(
        source: &'a dyn ObservationSource,
        archive: &'a dyn ArchiveGateway,
        workbook: &'a dyn WorkbookSink,
    ) -> Self {
        Self {
            source,
            archive,
            workbook,
            merger: DataMerger::default(),
            imputer: Imputer::default(),
        }
    }

    pub fn with_schema(mut self, schema: WeatherSchema) -> Self {
        self.merger = DataMerger::new(schema.clone());
        self.imputer = Imputer::new(schema);
        self
    }

    pub fn with_imputer(mut self, imputer: Imputer) -> Self {
        self.imputer = imputer;
        self
    }

    pub fn run(
        &self,
        city: City,
        window: YearWindow,
        stations: &StationDirectory,
        progress: Option<&ProgressReporter>,
    ) -> PipelineReport {
        let mut outcomes = Vec::new();
        let mut sheets = Vec::new();

        for year in window.years() {
            if let Some(p) = progress {
                p.set_message(&format!("Processing {} {}", city, year));
            }

            let (status, raw) = self.process_year(city, year, stations);
            match &status {
                YearStatus::Archived { key, rows, .. } => {
                    info!(year, %city, key = %key, rows, "Archived merged data");
                }
                YearStatus::Failed { stage, error } => {
                    error!(year, %city, %stage, %error, "Failed to process year");
                }
            }

            // A fetched year keeps its raw sheet even when a later stage failed
            if let Some(raw) = raw {
                sheets.push(WorkbookSheet::new(year.to_string(), raw.table));
            }
            outcomes.push(YearOutcome { year, status });

            if let Some(p) = progress {
                p.increment(1);
            }
        }

        let workbook = self.write_workbook(city, &sheets);

        PipelineReport {
            city,
            window,
            outcomes,
            workbook,
        }
    }

    fn process_year(
        &self,
        city: City,
        year: i32,
        stations: &StationDirectory,
    ) -> (YearStatus, Option<ObservationTable>) {
        let raw = match self.source.fetch(year) {
            Ok(raw) => raw,
            Err(error) => {
                return (
                    YearStatus::Failed {
                        stage: Stage::Fetch,
                        error,
                    },
                    None,
                )
            }
        };

        let status = match self.merge_and_archive(city, year, stations, &raw) {
            Ok((key, rows, imputation)) => YearStatus::Archived {
                key,
                rows,
                imputation,
            },
            Err((stage, error)) => YearStatus::Failed { stage, error },
        };
        (status, Some(raw))
    }

    fn merge_and_archive(
        &self,
        city: City,
        year: i32,
        stations: &StationDirectory,
        raw: &ObservationTable,
    ) -> std::result::Result<(String, usize, ImputationReport), (Stage, ProcessingError)> {
        let mut merged: Table = self
            .merger
            .merge(stations, raw)
            .map_err(|e| (Stage::Merge, e))?;
        if merged.is_empty() && !raw.is_empty() {
            warn!(year, %city, "No observation matched a station in the inventory");
        }

        let context = format!("merged table for {}", year);
        let imputation = self
            .imputer
            .impute(&mut merged, &context)
            .map_err(|e| (Stage::Impute, e))?;

        let key = archive_key(city, year);
        self.archive
            .put(&key, &merged)
            .map_err(|e| (Stage::Persist, e))?;

        Ok((key, merged.len(), imputation))
    }

    fn write_workbook(&self, city: City, sheets: &[WorkbookSheet]) -> WorkbookStatus {
        if sheets.is_empty() {
            warn!(%city, "No year was fetched, skipping workbook");
            return WorkbookStatus::Skipped;
        }

        let name = workbook_name(city);
        match self.workbook.write(&name, sheets) {
            Ok(path) => {
                info!(path = %path.display(), sheets = sheets.len(), "Workbook written");
                WorkbookStatus::Written {
                    path,
                    sheets: sheets.iter().map(|s| s.name.clone()).collect(),
                }
            }
            Err(error) => {
                error!(%city, %error, "Failed to write workbook");
                WorkbookStatus::Failed(error)
            }
        }
    }
}

/// Shorthand for callers that only need the archived years
pub fn require_archived(report: &PipelineReport) -> Result<()> {
    if report.archived_years().is_empty() {
        return Err(ProcessingError::MissingData(format!(
            "no year of {} could be archived",
            report.city
        )));
    }
    Ok(())
}
