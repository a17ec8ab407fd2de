//! CSV sheet parsing
//!
//! The exported sheet has a header row followed by one row of field
//! descriptions; data starts on the third line.

use anyhow::{Context, Result, bail};
use csv::{ReaderBuilder, StringRecord};
use std::sync::Arc;

/// One data row of the sheet, addressable by column header
#[derive(Debug, Clone)]
pub struct SheetRow {
    headers: Arc<Vec<String>>,
    record: StringRecord,
    line: u64,
}

impl SheetRow {
    /// Line number in the CSV text (1-based)
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Value of a column; short rows read as empty for trailing columns
    ///
    /// A column missing from the header is an error.
    pub fn get(&self, column: &str) -> Result<&str> {
        let index = match self.headers.iter().position(|h| h == column) {
            Some(index) => index,
            None => bail!("Sheet has no column '{}'", column),
        };
        Ok(self.record.get(index).unwrap_or(""))
    }

    /// Values of every column whose header starts with `prefix`, in column order
    pub fn values_with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .iter()
            .enumerate()
            .filter(move |(_, header)| header.starts_with(prefix))
            .map(move |(index, _)| self.record.get(index).unwrap_or(""))
    }
}

/// Parse sheet text into data rows, dropping the field description row
pub fn parse_sheet(text: &str) -> Result<Vec<SheetRow>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .context("Failed to read sheet header row")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let headers = Arc::new(headers);

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.context("Failed to parse sheet row")?;

        // First record describes the fields
        if index == 0 {
            continue;
        }

        let line = record.position().map(|p| p.line()).unwrap_or_default();
        rows.push(SheetRow {
            headers: Arc::clone(&headers),
            record,
            line,
        });
    }

    log::debug!("Parsed {} data rows from sheet", rows.len());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = "\
Osasto,Nimi,Käyttötarkoitus 1,Käyttötarkoitus 2,Tilatyyppi
Yksikön nimi,Tilan nimi,Pääkäyttötarkoitus,Muu käyttötarkoitus,Tilan tyyppi
Kallion kirjasto,Studio 1,Digitointi,,studio
Pasila,\"Sali, iso\",Tanssi,Voimistelu
";

    #[test]
    fn test_description_row_is_skipped() {
        let rows = parse_sheet(SHEET).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("Osasto").unwrap(), "Kallion kirjasto");
        assert_eq!(rows[0].line(), 3);
        assert_eq!(rows[1].get("Nimi").unwrap(), "Sali, iso");
    }

    #[test]
    fn test_short_row_reads_empty() {
        let rows = parse_sheet(SHEET).unwrap();
        assert_eq!(rows[1].get("Tilatyyppi").unwrap(), "");
    }

    #[test]
    fn test_missing_column_is_error() {
        let rows = parse_sheet(SHEET).unwrap();
        let err = rows[0].get("Kuvaus").unwrap_err();
        assert!(err.to_string().contains("Kuvaus"));
    }

    #[test]
    fn test_values_with_prefix() {
        let rows = parse_sheet(SHEET).unwrap();
        let purposes: Vec<_> = rows[1].values_with_prefix("Käyttötarkoitus").collect();
        assert_eq!(purposes, vec!["Tanssi", "Voimistelu"]);

        let purposes: Vec<_> = rows[0].values_with_prefix("Käyttötarkoitus").collect();
        assert_eq!(purposes, vec!["Digitointi", ""]);
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let text = format!("\u{feff}{}", SHEET);
        let rows = parse_sheet(&text).unwrap();
        assert_eq!(rows[0].get("Osasto").unwrap(), "Kallion kirjasto");
    }

    #[test]
    fn test_header_only_sheet_has_no_rows() {
        assert!(parse_sheet("Osasto,Nimi\n").unwrap().is_empty());
    }
}
