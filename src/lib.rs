pub mod analysis;
pub mod config;
pub mod dataset;
pub mod error;
pub mod ingest;
pub mod input;
pub mod output;
pub mod schema;

pub use analysis::{analyze, AnalysisInputs, AnalysisResult, CorrelationType, JoinedPageRecord};
pub use error::{AnalysisError, DatasetKind};
