use crate::ingest::RawRow;
use crate::schema::values::{parse_count, parse_position, parse_rate_percent};
use crate::schema::{
    canonicalize_path, resolve_field, CanonicalField, CanonicalPageMetrics,
    CanonicalPagePosition,
};

pub fn normalize_analytics_row(row: &RawRow) -> Option<(String, CanonicalPageMetrics)> {
    let path = resolve_field(row, CanonicalField::AnalyticsPath.aliases())?;
    let metrics = CanonicalPageMetrics {
        sessions: numeric_field(row, CanonicalField::Sessions, parse_count),
        engagement_rate_percent: numeric_field(
            row,
            CanonicalField::EngagementRate,
            parse_rate_percent,
        ),
        bounce_rate_percent: numeric_field(row, CanonicalField::BounceRate, parse_rate_percent),
    };
    Some((canonicalize_path(path), metrics))
}

pub fn normalize_search_row(row: &RawRow) -> Option<(String, CanonicalPagePosition)> {
    let path = resolve_field(row, CanonicalField::SearchPath.aliases())?;
    let position = CanonicalPagePosition {
        position: numeric_field(row, CanonicalField::Position, parse_position),
    };
    Some((canonicalize_path(path), position))
}

fn numeric_field<T: Default>(row: &RawRow, field: CanonicalField, parse: fn(&str) -> T) -> T {
    resolve_field(row, field.aliases())
        .map(parse)
        .unwrap_or_default()
}
