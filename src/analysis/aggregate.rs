use crate::analysis::classifier::relative_change_percent;
use crate::analysis::{AnalysisResult, CorrelationType, Diagnostics, JoinedPageRecord};

/// Share of pages with both problems at which traffic loss is attributed to
/// engagement.
pub const ENGAGEMENT_CAUSE_PERCENT: u32 = 40;

pub fn correlation_percentage(both_problems: usize, total_pages: usize) -> u32 {
    if total_pages == 0 {
        return 0;
    }
    (both_problems as f64 / total_pages as f64 * 100.0).round() as u32
}

/// Rolls classified pages up into the portfolio verdict.
///
/// `pages` arrive in join order; the sort by sessions-after is stable so
/// ties keep that order.
pub fn aggregate(
    mut pages: Vec<JoinedPageRecord>,
    has_position_data: bool,
    diagnostics: Diagnostics,
) -> AnalysisResult {
    let count = |kind: CorrelationType| pages.iter().filter(|p| p.correlation_type == kind).count();
    let both_problems = count(CorrelationType::Both);
    let only_engagement = count(CorrelationType::EngagementOnly);
    let only_ranking = count(CorrelationType::RankingOnly);
    let total_pages = pages.len();
    let correlation_percentage = correlation_percentage(both_problems, total_pages);

    let total_sessions_before: u64 = pages.iter().map(|p| p.sessions_before).sum();
    let total_sessions_after: u64 = pages.iter().map(|p| p.sessions_after).sum();

    pages.sort_by(|a, b| b.sessions_after.cmp(&a.sessions_after));

    AnalysisResult {
        total_pages,
        both_problems,
        only_engagement,
        only_ranking,
        correlation_percentage,
        is_engagement_cause: correlation_percentage >= ENGAGEMENT_CAUSE_PERCENT,
        has_position_data,
        total_sessions_before,
        total_sessions_after,
        sessions_change_percent: relative_change_percent(
            total_sessions_before as f64,
            total_sessions_after as f64,
        ),
        diagnostics,
        pages,
    }
}
