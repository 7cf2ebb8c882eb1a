//! Delimited-text parsing into header-keyed rows.

use std::collections::HashMap;

/// One data line keyed by (trimmed) header name.
pub type CatalogRow = HashMap<String, String>;

/// Parses delimited text whose first line is the header row.
///
/// Quoted fields may contain the delimiter and embedded newlines. Short
/// records simply lack the trailing columns; extra cells beyond the header
/// are ignored. Records the reader cannot make sense of are skipped with a
/// warning instead of failing the whole file.
#[must_use]
pub fn parse_rows(text: &str, delimiter: u8) -> Vec<CatalogRow> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .has_headers(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = match reader.headers() {
        Ok(record) => record.iter().map(clean_header).collect(),
        Err(e) => {
            tracing::warn!(error = %e, "catalog header row is unreadable");
            return Vec::new();
        }
    };
    if headers.iter().all(String::is_empty) {
        return Vec::new();
    }

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(record = index + 1, error = %e, "skipping unreadable record");
                continue;
            }
        };
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let mut row = CatalogRow::with_capacity(headers.len());
        for (header, cell) in headers.iter().zip(record.iter()) {
            if header.is_empty() {
                continue;
            }
            row.entry(header.clone()).or_insert_with(|| cell.to_owned());
        }
        rows.push(row);
    }
    rows
}

fn clean_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_cells_to_headers() {
        let rows = parse_rows("Artikl,Naziv,Mpc\n1001,Mlijeko,1.29\n1002,Kruh,0.99\n", b',');
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Artikl"], "1001");
        assert_eq!(rows[0]["Naziv"], "Mlijeko");
        assert_eq!(rows[1]["Mpc"], "0.99");
    }

    #[test]
    fn quoted_cells_keep_delimiters_and_newlines() {
        let rows = parse_rows(
            "Artikl,Naziv\n1001,\"Keks, čokoladni\"\n1002,\"Sok\nnaranča\"\n",
            b',',
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Naziv"], "Keks, čokoladni");
        assert_eq!(rows[1]["Naziv"], "Sok\nnaranča");
    }

    #[test]
    fn header_names_are_trimmed_and_bom_stripped() {
        let rows = parse_rows("\u{feff}Artikl , Mpc \n1001,2.50\n", b',');
        assert_eq!(rows[0]["Artikl"], "1001");
        assert_eq!(rows[0]["Mpc"], "2.50");
    }

    #[test]
    fn short_records_lack_trailing_columns() {
        let rows = parse_rows("Artikl,Naziv,Marka\n1001,Mlijeko\n", b',');
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["Naziv"], "Mlijeko");
        assert!(!rows[0].contains_key("Marka"));
    }

    #[test]
    fn extra_cells_are_ignored() {
        let rows = parse_rows("Artikl\n1001,extra\n", b',');
        assert_eq!(rows[0].len(), 1);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let rows = parse_rows("Artikl,Naziv\n\n1001,Mlijeko\n,\n", b',');
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn supports_semicolon_delimiter() {
        let rows = parse_rows("Artikl;Mpc\n1001;1,29\n", b';');
        assert_eq!(rows[0]["Mpc"], "1,29");
    }

    #[test]
    fn duplicate_headers_keep_first_value() {
        let rows = parse_rows("Mpc,Mpc\n1.00,2.00\n", b',');
        assert_eq!(rows[0]["Mpc"], "1.00");
    }

    #[test]
    fn empty_text_yields_no_rows() {
        assert!(parse_rows("", b',').is_empty());
        assert!(parse_rows("Artikl,Naziv\n", b',').is_empty());
    }
}
