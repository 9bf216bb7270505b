pub mod data_merger;
pub mod imputer;
pub mod pipeline;

pub use data_merger::DataMerger;
pub use imputer::{ColumnFill, ImputationReport, Imputer};
pub use pipeline::{
    require_archived, MultiYearPipeline, PipelineReport, Stage, WorkbookStatus, YearOutcome,
    YearStatus,
};
