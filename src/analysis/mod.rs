pub mod aggregate;
pub mod classifier;
pub mod joiner;

use std::fmt::{Display, Formatter};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::dataset::{DatasetIndexes, DatasetStats};
use crate::error::{AnalysisError, DatasetKind};
use crate::ingest::{parse_table, RawTable};

pub use aggregate::aggregate;
pub use classifier::classify_page;
pub use joiner::join_pages;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CorrelationType {
    None,
    EngagementOnly,
    RankingOnly,
    Both,
}

impl CorrelationType {
    pub fn as_name(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::EngagementOnly => "ENGAGEMENT_ONLY",
            Self::RankingOnly => "RANKING_ONLY",
            Self::Both => "BOTH",
        }
    }

    pub fn is_flagged(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl Display for CorrelationType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_name())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JoinedPageRecord {
    pub path: String,
    pub sessions_after: u64,
    pub sessions_change_percent: f64,
    pub engagement_change_percent: f64,
    pub bounce_change_percent: f64,
    pub position_change: f64,
    pub has_engagement_problem: bool,
    pub has_ranking_problem: bool,
    pub correlation_type: CorrelationType,
    #[serde(skip)]
    pub sessions_before: u64,
    #[serde(skip)]
    pub position_before: f64,
    #[serde(skip)]
    pub position_after: f64,
}

impl JoinedPageRecord {
    /// True when both sides carry ranking data, so `position_change` is real.
    pub fn has_position_data(&self) -> bool {
        self.position_before > 0.0 && self.position_after > 0.0
    }
}

/// Row accounting for each supplied input.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Diagnostics {
    pub ga_before: DatasetStats,
    pub ga_after: DatasetStats,
    pub sc_before: Option<DatasetStats>,
    pub sc_after: Option<DatasetStats>,
}

impl Diagnostics {
    pub fn from_indexes(indexes: &DatasetIndexes) -> Self {
        let search = |stats: DatasetStats| indexes.has_position_data.then_some(stats);
        Self {
            ga_before: indexes.ga_before.stats,
            ga_after: indexes.ga_after.stats,
            sc_before: search(indexes.sc_before.stats),
            sc_after: search(indexes.sc_after.stats),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    EngagementDriven,
    RankingDriven,
    Inconclusive,
}

impl Display for Verdict {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::EngagementDriven => "Engagement-driven: pages losing traffic also lost engagement",
            Self::RankingDriven => "Ranking-driven: traffic loss follows ranking loss",
            Self::Inconclusive => "Inconclusive: no dominant cause across flagged pages",
        };
        write!(f, "{display}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    pub total_pages: usize,
    pub both_problems: usize,
    pub only_engagement: usize,
    pub only_ranking: usize,
    pub correlation_percentage: u32,
    pub is_engagement_cause: bool,
    pub has_position_data: bool,
    pub total_sessions_before: u64,
    pub total_sessions_after: u64,
    pub sessions_change_percent: f64,
    pub diagnostics: Diagnostics,
    /// Sorted by `sessions_after`, highest first.
    pub pages: Vec<JoinedPageRecord>,
}

impl AnalysisResult {
    pub fn verdict(&self) -> Verdict {
        if self.is_engagement_cause {
            Verdict::EngagementDriven
        } else if self.only_ranking > self.only_engagement {
            Verdict::RankingDriven
        } else {
            Verdict::Inconclusive
        }
    }

    pub fn flagged_pages(&self) -> impl Iterator<Item = &JoinedPageRecord> {
        self.pages.iter().filter(|p| p.correlation_type.is_flagged())
    }

    pub fn flagged_count(&self) -> usize {
        self.both_problems + self.only_engagement + self.only_ranking
    }
}

/// Raw export texts for one run. GA exports are mandatory; SC exports are
/// used only as a pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisInputs {
    pub ga_before: Option<String>,
    pub ga_after: Option<String>,
    pub sc_before: Option<String>,
    pub sc_after: Option<String>,
}

impl AnalysisInputs {
    pub fn new(ga_before: impl Into<String>, ga_after: impl Into<String>) -> Self {
        Self {
            ga_before: Some(ga_before.into()),
            ga_after: Some(ga_after.into()),
            sc_before: None,
            sc_after: None,
        }
    }

    pub fn with_search_console(
        mut self,
        before: impl Into<String>,
        after: impl Into<String>,
    ) -> Self {
        self.sc_before = Some(before.into());
        self.sc_after = Some(after.into());
        self
    }

    pub fn text(&self, kind: DatasetKind) -> Option<&str> {
        let text = match kind {
            DatasetKind::GaBefore => &self.ga_before,
            DatasetKind::GaAfter => &self.ga_after,
            DatasetKind::ScBefore => &self.sc_before,
            DatasetKind::ScAfter => &self.sc_after,
        };
        text.as_deref()
    }

    pub fn missing_required(&self) -> Vec<DatasetKind> {
        DatasetKind::ALL
            .into_iter()
            .filter(|kind| kind.is_required() && self.text(*kind).is_none())
            .collect()
    }
}

/// Runs the full pipeline over in-memory export texts.
///
/// Fails before parsing when a GA export is missing, and when any supplied
/// export has no usable data rows. Everything else degrades to zero values.
pub fn analyze(inputs: &AnalysisInputs) -> Result<AnalysisResult, AnalysisError> {
    let started = Instant::now();
    let missing = inputs.missing_required();
    if !missing.is_empty() {
        return Err(AnalysisError::MissingRequiredInput(missing));
    }

    let ga_before = parse_required(inputs, DatasetKind::GaBefore)?;
    let ga_after = parse_required(inputs, DatasetKind::GaAfter)?;
    let search = match (inputs.sc_before.as_deref(), inputs.sc_after.as_deref()) {
        (Some(_), Some(_)) => Some((
            parse_required(inputs, DatasetKind::ScBefore)?,
            parse_required(inputs, DatasetKind::ScAfter)?,
        )),
        (None, None) => None,
        (before, _) => {
            let supplied = if before.is_some() {
                DatasetKind::ScBefore
            } else {
                DatasetKind::ScAfter
            };
            warn!(
                dataset = supplied.as_slug(),
                "search console exports must be supplied as a pair, ignoring the lone export"
            );
            None
        }
    };

    let indexes = DatasetIndexes::build(
        &ga_before,
        &ga_after,
        search.as_ref().map(|(before, after)| (before, after)),
    );
    let pages = join_pages(&indexes)
        .iter()
        .map(classify_page)
        .collect::<Vec<_>>();
    let result = aggregate(
        pages,
        indexes.has_position_data,
        Diagnostics::from_indexes(&indexes),
    );

    info!(
        pages = result.total_pages,
        both = result.both_problems,
        engagement_only = result.only_engagement,
        ranking_only = result.only_ranking,
        correlation_pct = result.correlation_percentage,
        position_data = result.has_position_data,
        duration_ms = started.elapsed().as_millis(),
        "analysis complete"
    );
    Ok(result)
}

fn parse_required(inputs: &AnalysisInputs, kind: DatasetKind) -> Result<RawTable, AnalysisError> {
    let text = inputs
        .text(kind)
        .ok_or_else(|| AnalysisError::MissingRequiredInput(vec![kind]))?;
    let table = parse_table(text)?;
    if table.is_empty() {
        return Err(AnalysisError::EmptyDataset { dataset: kind });
    }
    Ok(table)
}
