use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::{QuoteStyle, WriterBuilder};

use crate::analysis::{AnalysisResult, JoinedPageRecord};

pub const EXPORT_HEADER: [&str; 7] = [
    "Page",
    "Sessions",
    "Sessions Change",
    "Engagement Change",
    "Bounce Change",
    "Position Change",
    "Type",
];

pub fn export_file_name(date: NaiveDate) -> String {
    format!("core-update-analysis-{}.csv", date.format("%Y-%m-%d"))
}

/// Every flagged page, fully quoted. Unflagged pages are left out; nothing
/// else is truncated.
pub fn flagged_pages_to_csv(result: &AnalysisResult) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(vec![]);
    writer.write_record(EXPORT_HEADER)?;
    for page in result.flagged_pages() {
        writer.write_record([
            page.path.clone(),
            page.sessions_after.to_string(),
            format_percent(page.sessions_change_percent),
            format_percent(page.engagement_change_percent),
            format_percent(page.bounce_change_percent),
            format_position_change(result, page),
            page.correlation_type.to_string(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn write_export(result: &AnalysisResult, directory: &Path, date: NaiveDate) -> Result<PathBuf> {
    fs::create_dir_all(directory)
        .with_context(|| format!("failed creating export directory: {}", directory.display()))?;
    let path = directory.join(export_file_name(date));
    let data = flagged_pages_to_csv(result)?;
    fs::write(&path, data)
        .with_context(|| format!("failed writing export: {}", path.display()))?;
    Ok(path)
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

fn format_position_change(result: &AnalysisResult, page: &JoinedPageRecord) -> String {
    if result.has_position_data && page.has_position_data() {
        format!("{:.1}", page.position_change)
    } else {
        "N/A".to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::analysis::{analyze, AnalysisInputs};
    use crate::ingest::parse_table;

    use super::{export_file_name, flagged_pages_to_csv};

    const GA_BEFORE: &str = "page,sessions,engagement rate,bounce rate\n/a,100,0.50,0.30\n/b,80,0.40,0.40\n/c,60,0.5,0.3\n";
    const GA_AFTER: &str = "page,sessions,engagement rate,bounce rate\n/a,70,0.30,0.45\n/b,50,0.40,0.40\n/c,61,0.5,0.3\n";

    #[test]
    fn file_name_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).expect("valid date");
        assert_eq!(export_file_name(date), "core-update-analysis-2024-03-09.csv");
    }

    #[test]
    fn export_quotes_every_field_and_marks_missing_positions() {
        let result = analyze(&AnalysisInputs::new(GA_BEFORE, GA_AFTER)).expect("analysis failed");
        let csv = flagged_pages_to_csv(&result).expect("export failed");
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("\"Page\",\"Sessions\",\"Sessions Change\",\"Engagement Change\",\"Bounce Change\",\"Position Change\",\"Type\"")
        );
        assert_eq!(
            lines.next(),
            Some("\"/a\",\"70\",\"-30.0%\",\"-40.0%\",\"50.0%\",\"N/A\",\"ENGAGEMENT_ONLY\"")
        );
        assert_eq!(
            lines.next(),
            Some("\"/b\",\"50\",\"-37.5%\",\"0.0%\",\"0.0%\",\"N/A\",\"BOTH\"")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn reparsed_export_matches_flagged_pages() {
        let inputs = AnalysisInputs::new(GA_BEFORE, GA_AFTER).with_search_console(
            "top pages,position\n/a,2\n/b,3\n",
            "top pages,position\n/a,9\n",
        );
        let result = analyze(&inputs).expect("analysis failed");
        let csv = flagged_pages_to_csv(&result).expect("export failed");
        let table = parse_table(&csv).expect("reparse failed");

        let exported: Vec<(String, String)> = table
            .rows
            .iter()
            .map(|row| (row["page"].clone(), row["type"].clone()))
            .collect();
        let expected: Vec<(String, String)> = result
            .flagged_pages()
            .map(|p| (p.path.clone(), p.correlation_type.to_string()))
            .collect();
        assert_eq!(exported, expected);

        let positions: Vec<&str> = table
            .rows
            .iter()
            .map(|row| row["position change"].as_str())
            .collect();
        assert_eq!(positions, vec!["7.0", "N/A"]);
    }

    #[test]
    fn reparsed_export_without_search_console_has_no_positions() {
        let result = analyze(&AnalysisInputs::new(GA_BEFORE, GA_AFTER)).expect("analysis failed");
        let csv = flagged_pages_to_csv(&result).expect("export failed");
        let table = parse_table(&csv).expect("reparse failed");
        assert!(!table.is_empty());
        assert!(table.rows.iter().all(|row| row["position change"] == "N/A"));
    }
}
