use anyhow::Result;
use serde::Serialize;

use crate::analysis::AnalysisResult;

pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Full result including unflagged pages and per-dataset diagnostics.
pub fn render_result_json(result: &AnalysisResult) -> Result<String> {
    render_json(result)
}
