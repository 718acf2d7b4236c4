use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::analysis::AnalysisInputs;
use crate::error::{AnalysisError, DatasetKind};

/// Export file locations as supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct InputFiles {
    pub ga_before: Option<PathBuf>,
    pub ga_after: Option<PathBuf>,
    pub sc_before: Option<PathBuf>,
    pub sc_after: Option<PathBuf>,
}

impl InputFiles {
    pub fn path(&self, kind: DatasetKind) -> Option<&Path> {
        let path = match kind {
            DatasetKind::GaBefore => &self.ga_before,
            DatasetKind::GaAfter => &self.ga_after,
            DatasetKind::ScBefore => &self.sc_before,
            DatasetKind::ScAfter => &self.sc_after,
        };
        path.as_deref()
    }
}

/// Reads every supplied export concurrently and waits for all of them.
///
/// Missing GA files are reported before anything is read. A lone SC file is
/// dropped unread.
pub async fn load_inputs(files: &InputFiles) -> Result<AnalysisInputs> {
    let missing: Vec<DatasetKind> = DatasetKind::ALL
        .into_iter()
        .filter(|kind| kind.is_required() && files.path(*kind).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(AnalysisError::MissingRequiredInput(missing).into());
    }

    let (sc_before, sc_after) = match (files.sc_before.as_deref(), files.sc_after.as_deref()) {
        (Some(before), Some(after)) => (Some(before), Some(after)),
        (None, None) => (None, None),
        (before, after) => {
            let lone = before.or(after).map(|p| p.display().to_string());
            warn!(
                file = lone.as_deref().unwrap_or_default(),
                "search console exports must be supplied as a pair, ignoring the lone export"
            );
            (None, None)
        }
    };

    let (ga_before, ga_after, sc_before, sc_after) = tokio::try_join!(
        read_export(DatasetKind::GaBefore, files.ga_before.as_deref()),
        read_export(DatasetKind::GaAfter, files.ga_after.as_deref()),
        read_export(DatasetKind::ScBefore, sc_before),
        read_export(DatasetKind::ScAfter, sc_after),
    )?;

    Ok(AnalysisInputs {
        ga_before,
        ga_after,
        sc_before,
        sc_after,
    })
}

async fn read_export(kind: DatasetKind, path: Option<&Path>) -> Result<Option<String>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed reading {kind} export: {}", path.display()))?;
    debug!(dataset = kind.as_slug(), bytes = bytes.len(), path = %path.display(), "read export");
    Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
}
