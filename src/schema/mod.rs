pub mod aliases;
pub mod normalize;
pub mod path;
pub mod values;

use serde::{Deserialize, Serialize};

pub use aliases::{resolve_field, CanonicalField};
pub use normalize::{normalize_analytics_row, normalize_search_row};
pub use path::canonicalize_path;

/// Behavior metrics for one page on one side of the update.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct CanonicalPageMetrics {
    pub sessions: u64,
    pub engagement_rate_percent: f64,
    pub bounce_rate_percent: f64,
}

/// Average ranking for one page. `0.0` means no ranking data.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct CanonicalPagePosition {
    pub position: f64,
}

impl CanonicalPagePosition {
    pub fn has_data(&self) -> bool {
        self.position > 0.0
    }
}
