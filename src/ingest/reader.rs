use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::error::AnalysisError;
use crate::ingest::{detect_delimiter, RawRow, RawTable};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Parses one export into a [`RawTable`].
///
/// Blank lines and `#` comment lines are dropped before anything else. With
/// fewer than two usable lines left (header plus one data row) the result is
/// an empty table. Cells are split on the detected delimiter without quote
/// handling, then stripped of `"` characters and surrounding whitespace.
pub fn parse_table(content: &str) -> Result<RawTable, AnalysisError> {
    let content = content.strip_prefix(BYTE_ORDER_MARK).unwrap_or(content);
    let lines: Vec<&str> = content
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .collect();

    let Some((header_line, data_lines)) = lines.split_first() else {
        return Ok(RawTable::empty());
    };
    if data_lines.is_empty() {
        return Ok(RawTable::empty());
    }

    let delimiter = detect_delimiter(header_line);
    let headers: Vec<String> = header_line
        .split(delimiter.as_char())
        .map(|cell| clean_cell(cell).to_lowercase())
        .collect();

    let body = data_lines.join("\n");
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut rows = Vec::with_capacity(data_lines.len());
    let mut skipped_rows = 0usize;
    let mut record = StringRecord::new();
    while reader.read_record(&mut record)? {
        if record.len() < 2 {
            skipped_rows += 1;
            continue;
        }
        rows.push(zip_row(&headers, &record));
    }

    debug!(
        delimiter = %delimiter,
        columns = headers.len(),
        rows = rows.len(),
        skipped = skipped_rows,
        "parsed tabular export"
    );

    Ok(RawTable {
        headers,
        rows,
        delimiter: Some(delimiter),
        skipped_rows,
    })
}

fn clean_cell(cell: &str) -> String {
    cell.replace('"', "").trim().to_string()
}

fn zip_row(headers: &[String], record: &StringRecord) -> RawRow {
    headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            let value = record.get(idx).map(clean_cell).unwrap_or_default();
            (header.clone(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::ingest::{parse_table, Delimiter};

    #[test]
    fn parses_semicolon_export_with_comments() {
        let content = "# Analytics export\n# Period: 2024-01-01\n\n\"Landing page\";\"Sessions\";\"Engagement rate\"\n\"/a\";\"100\";\"0.5\"\n/b;20;0.25\n";
        let table = parse_table(content).expect("parse failed");
        assert_eq!(table.delimiter, Some(Delimiter::Semicolon));
        assert_eq!(
            table.headers,
            vec!["landing page", "sessions", "engagement rate"]
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0]["landing page"], "/a");
        assert_eq!(table.rows[1]["engagement rate"], "0.25");
    }

    #[test]
    fn needs_header_and_one_data_line() {
        assert!(parse_table("").expect("parse failed").is_empty());
        assert!(parse_table("page,sessions\n").expect("parse failed").is_empty());
        assert!(parse_table("# only\n\n  \n").expect("parse failed").is_empty());
    }

    #[test]
    fn drops_rows_with_fewer_than_two_cells() {
        let content = "page,sessions,bounce rate\n/a,10,0.2\ntruncated\n/b,5\n";
        let table = parse_table(content).expect("parse failed");
        assert_eq!(table.len(), 2);
        assert_eq!(table.skipped_rows, 1);
        assert_eq!(table.rows[1]["bounce rate"], "");
    }

    #[test]
    fn tab_separated_with_crlf_and_bom() {
        let content = "\u{feff}Page\tPosition\r\n/x\t4.2\r\n";
        let table = parse_table(content).expect("parse failed");
        assert_eq!(table.delimiter, Some(Delimiter::Tab));
        assert_eq!(table.rows[0]["page"], "/x");
        assert_eq!(table.rows[0]["position"], "4.2");
    }

    #[test]
    fn all_malformed_data_lines_yield_empty_table() {
        let table = parse_table("page,sessions\nbroken\nalso broken\n").expect("parse failed");
        assert!(table.is_empty());
        assert_eq!(table.skipped_rows, 2);
    }
}
