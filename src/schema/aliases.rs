use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ingest::RawRow;

/// Canonical fields the normalizer knows how to fill.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    AnalyticsPath,
    Sessions,
    EngagementRate,
    BounceRate,
    SearchPath,
    Position,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 6] = [
        CanonicalField::AnalyticsPath,
        CanonicalField::Sessions,
        CanonicalField::EngagementRate,
        CanonicalField::BounceRate,
        CanonicalField::SearchPath,
        CanonicalField::Position,
    ];

    /// Recognized lower-cased headers, most specific first.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::AnalyticsPath => ANALYTICS_PATH_ALIASES,
            Self::Sessions => SESSIONS_ALIASES,
            Self::EngagementRate => ENGAGEMENT_RATE_ALIASES,
            Self::BounceRate => BOUNCE_RATE_ALIASES,
            Self::SearchPath => SEARCH_PATH_ALIASES,
            Self::Position => POSITION_ALIASES,
        }
    }
}

impl Display for CanonicalField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::AnalyticsPath => "analytics path",
            Self::Sessions => "sessions",
            Self::EngagementRate => "engagement rate",
            Self::BounceRate => "bounce rate",
            Self::SearchPath => "search path",
            Self::Position => "position",
        };
        write!(f, "{display}")
    }
}

const ANALYTICS_PATH_ALIASES: &[&str] = &[
    "landing page + query string",
    "landing page",
    "page path",
    "page",
    "url",
    "landingsside + forespørgselsstreng",
    "landingsside",
    "sidesti",
    "side",
    "page path and screen class",
    "page title and screen class",
];

const SESSIONS_ALIASES: &[&str] = &["sessions", "sessioner"];

const ENGAGEMENT_RATE_ALIASES: &[&str] = &[
    "session key event rate",
    "engagement rate",
    "sessionsfrekvens for nøglehændelse",
    "engagement-rate",
];

const BOUNCE_RATE_ALIASES: &[&str] = &["bounce rate", "afvisningsfrekvens", "bounce-rate"];

const SEARCH_PATH_ALIASES: &[&str] = &["top pages", "page", "url", "landing page"];

const POSITION_ALIASES: &[&str] = &["position"];

/// Returns the first non-empty value among `aliases`, in alias order.
pub fn resolve_field<'a>(row: &'a RawRow, aliases: &[&str]) -> Option<&'a str> {
    aliases
        .iter()
        .filter_map(|alias| row.get(*alias))
        .map(String::as_str)
        .find(|value| !value.is_empty())
}
