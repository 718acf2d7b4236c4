use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The four input exports an analysis run can consume.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    GaBefore,
    GaAfter,
    ScBefore,
    ScAfter,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 4] = [
        DatasetKind::GaBefore,
        DatasetKind::GaAfter,
        DatasetKind::ScBefore,
        DatasetKind::ScAfter,
    ];

    pub fn as_slug(&self) -> &'static str {
        match self {
            Self::GaBefore => "ga_before",
            Self::GaAfter => "ga_after",
            Self::ScBefore => "sc_before",
            Self::ScAfter => "sc_after",
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, Self::GaBefore | Self::GaAfter)
    }
}

impl Display for DatasetKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::GaBefore => "GA before",
            Self::GaAfter => "GA after",
            Self::ScBefore => "Search Console before",
            Self::ScAfter => "Search Console after",
        };
        write!(f, "{display}")
    }
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("both GA exports are required (before and after); missing: {}", format_missing(.0))]
    MissingRequiredInput(Vec<DatasetKind>),
    #[error("{dataset} export contains no usable data rows")]
    EmptyDataset { dataset: DatasetKind },
    #[error("analysis failed: {0}")]
    Unexpected(String),
}

impl From<csv::Error> for AnalysisError {
    fn from(value: csv::Error) -> Self {
        Self::Unexpected(format!("malformed tabular input: {value}"))
    }
}

fn format_missing(kinds: &[DatasetKind]) -> String {
    kinds
        .iter()
        .map(|kind| kind.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::{AnalysisError, DatasetKind};

    #[test]
    fn missing_input_message_names_every_dataset() {
        let err = AnalysisError::MissingRequiredInput(vec![
            DatasetKind::GaBefore,
            DatasetKind::GaAfter,
        ]);
        let message = err.to_string();
        assert!(message.contains("both GA exports are required"));
        assert!(message.contains("GA before, GA after"));
    }

    #[test]
    fn only_ga_datasets_are_required() {
        let required = DatasetKind::ALL
            .iter()
            .filter(|kind| kind.is_required())
            .count();
        assert_eq!(required, 2);
    }
}
