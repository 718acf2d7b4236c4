use crate::analysis::joiner::JoinedPage;
use crate::analysis::{CorrelationType, JoinedPageRecord};

pub const ENGAGEMENT_DROP_PERCENT: f64 = -15.0;
pub const BOUNCE_RISE_PERCENT: f64 = 15.0;
pub const SESSIONS_DROP_ENGAGEMENT_PERCENT: f64 = -20.0;
pub const POSITION_DROP: f64 = 5.0;
pub const SESSIONS_DROP_RANKING_PERCENT: f64 = -30.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageDeltas {
    pub sessions_change_percent: f64,
    pub engagement_change_percent: f64,
    pub bounce_change_percent: f64,
    /// Positive means the page ranks worse.
    pub position_change: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub has_engagement_problem: bool,
    pub has_ranking_problem: bool,
    pub correlation_type: CorrelationType,
}

/// Relative change in percent, or 0 when there is no baseline.
pub fn relative_change_percent(before: f64, after: f64) -> f64 {
    if before > 0.0 {
        (after - before) * 100.0 / before
    } else {
        0.0
    }
}

/// Absolute position delta, suppressed unless both sides have ranking data.
pub fn position_change(before: f64, after: f64) -> f64 {
    if before > 0.0 && after > 0.0 {
        after - before
    } else {
        0.0
    }
}

pub fn compute_deltas(page: &JoinedPage) -> PageDeltas {
    PageDeltas {
        sessions_change_percent: relative_change_percent(
            page.ga_before.sessions as f64,
            page.ga_after.sessions as f64,
        ),
        engagement_change_percent: relative_change_percent(
            page.ga_before.engagement_rate_percent,
            page.ga_after.engagement_rate_percent,
        ),
        bounce_change_percent: relative_change_percent(
            page.ga_before.bounce_rate_percent,
            page.ga_after.bounce_rate_percent,
        ),
        position_change: position_change(page.sc_before.position, page.sc_after.position),
    }
}

/// Thresholds are strict: a delta sitting exactly on a boundary does not flag.
pub fn classify(deltas: &PageDeltas) -> Classification {
    let has_engagement_problem = deltas.engagement_change_percent < ENGAGEMENT_DROP_PERCENT
        || deltas.bounce_change_percent > BOUNCE_RISE_PERCENT
        || deltas.sessions_change_percent < SESSIONS_DROP_ENGAGEMENT_PERCENT;
    let has_ranking_problem = deltas.position_change > POSITION_DROP
        || deltas.sessions_change_percent < SESSIONS_DROP_RANKING_PERCENT;
    let correlation_type = match (has_engagement_problem, has_ranking_problem) {
        (true, true) => CorrelationType::Both,
        (true, false) => CorrelationType::EngagementOnly,
        (false, true) => CorrelationType::RankingOnly,
        (false, false) => CorrelationType::None,
    };
    Classification {
        has_engagement_problem,
        has_ranking_problem,
        correlation_type,
    }
}

pub fn classify_page(page: &JoinedPage) -> JoinedPageRecord {
    let deltas = compute_deltas(page);
    let classification = classify(&deltas);
    JoinedPageRecord {
        path: page.path.clone(),
        sessions_after: page.ga_after.sessions,
        sessions_change_percent: deltas.sessions_change_percent,
        engagement_change_percent: deltas.engagement_change_percent,
        bounce_change_percent: deltas.bounce_change_percent,
        position_change: deltas.position_change,
        has_engagement_problem: classification.has_engagement_problem,
        has_ranking_problem: classification.has_ranking_problem,
        correlation_type: classification.correlation_type,
        sessions_before: page.ga_before.sessions,
        position_before: page.sc_before.position,
        position_after: page.sc_after.position,
    }
}
