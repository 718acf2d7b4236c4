use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::analysis::{AnalysisResult, CorrelationType, JoinedPageRecord};
use crate::output::csv::format_percent;

/// Display limits for the page table. The CSV export ignores these.
#[derive(Debug, Clone, Copy)]
pub struct TableOptions {
    pub top_pages: usize,
    pub show_unflagged: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            top_pages: 20,
            show_unflagged: false,
        }
    }
}

pub fn render_summary_table(result: &AnalysisResult) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Pages analyzed".to_string(), result.total_pages.to_string()]);
    table.add_row(vec![
        "Sessions before / after".to_string(),
        format!(
            "{} / {} ({})",
            result.total_sessions_before,
            result.total_sessions_after,
            format_percent(result.sessions_change_percent)
        ),
    ]);
    table.add_row(vec!["Both problems".to_string(), result.both_problems.to_string()]);
    table.add_row(vec![
        "Engagement only".to_string(),
        result.only_engagement.to_string(),
    ]);
    table.add_row(vec!["Ranking only".to_string(), result.only_ranking.to_string()]);
    table.add_row(vec![
        "Correlation".to_string(),
        format!("{}%", result.correlation_percentage),
    ]);
    let cause_cell = if result.is_engagement_cause {
        Cell::new("YES").fg(Color::Red)
    } else {
        Cell::new("NO").fg(Color::Green)
    };
    table.add_row(Row::from(vec![Cell::new("Engagement is the cause"), cause_cell]));
    table.add_row(vec![
        "Position data".to_string(),
        if result.has_position_data {
            "yes".to_string()
        } else {
            "not supplied".to_string()
        },
    ]);

    let mut out = table.to_string();
    out.push_str(&format!("\nVerdict: {}", result.verdict()));
    out
}

pub fn render_pages_table(result: &AnalysisResult, options: TableOptions) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Page",
        "Sessions",
        "Sessions Δ",
        "Engagement Δ",
        "Bounce Δ",
        "Position Δ",
        "Type",
    ]);

    let candidates: Vec<&JoinedPageRecord> = result
        .pages
        .iter()
        .filter(|p| options.show_unflagged || p.correlation_type.is_flagged())
        .collect();
    for page in candidates.iter().take(options.top_pages) {
        table.add_row(Row::from(vec![
            Cell::new(&page.path),
            Cell::new(page.sessions_after),
            Cell::new(format_percent(page.sessions_change_percent)),
            Cell::new(format_percent(page.engagement_change_percent)),
            Cell::new(format_percent(page.bounce_change_percent)),
            Cell::new(if page.has_position_data() {
                format!("{:+.1}", page.position_change)
            } else {
                "-".to_string()
            }),
            type_cell(page.correlation_type),
        ]));
    }

    let mut out = table.to_string();
    if candidates.len() > options.top_pages {
        out.push_str(&format!(
            "\nShowing {} of {} pages; use --top or the CSV export for the rest.",
            options.top_pages,
            candidates.len()
        ));
    }
    out
}

fn type_cell(kind: CorrelationType) -> Cell {
    let cell = Cell::new(kind.as_name());
    match kind {
        CorrelationType::Both => cell.fg(Color::Red),
        CorrelationType::EngagementOnly => cell.fg(Color::Yellow),
        CorrelationType::RankingOnly => cell.fg(Color::Magenta),
        CorrelationType::None => cell,
    }
}
