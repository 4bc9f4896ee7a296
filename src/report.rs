use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::ExportError;
use crate::models::{OutputRow, PartySummary, CSV_HEADER};

/// Writes the header and one record per row; returns the number of rows.
///
/// The header is written even when `rows` is empty.
pub fn write_rows<W: Write>(rows: &[OutputRow], writer: W) -> Result<usize, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    writer.write_record(CSV_HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(rows.len())
}

/// Writes the table to `path`. Not atomic: a failure part way through
/// leaves a truncated file behind.
pub fn write_csv_file(rows: &[OutputRow], path: &Path) -> Result<usize, ExportError> {
    let to_write_error = |source: csv::Error| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(|err| to_write_error(err.into()))?;
    let written = write_rows(rows, file).map_err(to_write_error)?;

    info!(path = %path.display(), rows = written, "wrote contact table");
    Ok(written)
}

pub fn summarize_by_party(rows: &[OutputRow]) -> Vec<PartySummary> {
    let mut map: std::collections::HashMap<&str, usize> = std::collections::HashMap::new();

    for row in rows {
        *map.entry(row.party.as_str()).or_insert(0) += 1;
    }

    let mut summaries: Vec<PartySummary> = map
        .into_iter()
        .map(|(party, count)| PartySummary {
            party: party.to_string(),
            count,
        })
        .collect();

    summaries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.party.cmp(&b.party)));
    summaries
}

/// Senate seats and district seats (everything that is not a senate seat).
pub fn chamber_counts(rows: &[OutputRow]) -> (usize, usize) {
    let senators = rows.iter().filter(|row| row.district == "Senate").count();
    (senators, rows.len() - senators)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(state: &str, name: &str, party: &str, district: &str) -> OutputRow {
        OutputRow {
            state: state.to_string(),
            name: name.to_string(),
            party: party.to_string(),
            district: district.to_string(),
            phone: "202-225-0000".to_string(),
            url: "https://example.house.gov".to_string(),
            twitter: String::new(),
            facebook: String::new(),
            youtube: String::new(),
            instagram: String::new(),
        }
    }

    #[test]
    fn writes_header_then_rows() {
        let rows = vec![
            row("Alaska", "Pat Doe", "R", "AK-AL"),
            row("Alaska", "Sam Roe", "R", "Senate"),
        ];
        let mut buffer = Vec::new();
        let written = write_rows(&rows, &mut buffer).unwrap();
        assert_eq!(written, 2);

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "State,name,party,district,phone,url,twitter,facebook,youtube,instagram"
        );
        assert_eq!(
            lines[1],
            "Alaska,Pat Doe,R,AK-AL,202-225-0000,https://example.house.gov,,,,"
        );
        assert_eq!(lines.len(), 3);
        assert_eq!(text.matches("\r\n").count(), 3);
    }

    #[test]
    fn empty_table_still_has_header() {
        let mut buffer = Vec::new();
        assert_eq!(write_rows(&[], &mut buffer).unwrap(), 0);
        assert!(buffer.ends_with(b"instagram\r\n"));
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert_eq!(
            text.trim_end(),
            "State,name,party,district,phone,url,twitter,facebook,youtube,instagram"
        );
    }

    #[test]
    fn quotes_fields_with_delimiters() {
        let mut member = row("Texas", "Jo \"JJ\" Smith", "D", "TX-07");
        member.url = "https://example.com/a,b".to_string();
        let mut buffer = Vec::new();
        write_rows(&[member], &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let record = text.lines().nth(1).unwrap();
        assert!(record.contains("\"Jo \"\"JJ\"\" Smith\""));
        assert!(record.contains("\"https://example.com/a,b\""));
    }

    #[test]
    fn missing_output_directory_is_a_write_error() {
        let path = std::env::temp_dir()
            .join(format!("congress-contacts-{}", uuid::Uuid::new_v4()))
            .join("out.csv");
        let err = write_csv_file(&[], &path).unwrap_err();
        assert_eq!(err.stage(), "write");
    }

    #[test]
    fn party_summary_counts_and_orders() {
        let rows = vec![
            row("Ohio", "A", "R", "OH-01"),
            row("Ohio", "B", "D", "OH-02"),
            row("Ohio", "C", "R", "Senate"),
            row("Vermont", "D", "I", "Senate"),
        ];
        let summaries = summarize_by_party(&rows);
        let pairs: Vec<(&str, usize)> = summaries
            .iter()
            .map(|summary| (summary.party.as_str(), summary.count))
            .collect();
        assert_eq!(pairs, vec![("R", 2), ("D", 1), ("I", 1)]);
        assert_eq!(chamber_counts(&rows), (2, 2));
    }
}
