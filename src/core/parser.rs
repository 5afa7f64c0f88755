// PriceLens - core/parser.rs
//
// Stream-oriented price list parsing.
// Core layer: accepts Read trait objects, never touches the filesystem.

use crate::core::headers::{self, ColumnLayout};
use crate::core::model::{PriceRecord, RowPolicy};
use crate::util::error::ParseError;
use std::io::Read;
use std::path::Path;

/// Result of parsing a single price list.
#[derive(Debug)]
pub enum ParseOutcome {
    /// The header row resolved and the data rows were read.
    Parsed(ParsedFile),

    /// At least one required column is absent; the file contributes nothing.
    MissingColumns { missing: Vec<&'static str> },
}

/// Records read from one price list.
#[derive(Debug, Default)]
pub struct ParsedFile {
    /// Normalised records in row order.
    pub records: Vec<PriceRecord>,
    /// Malformed rows dropped under `RowPolicy::Lenient`.
    pub skipped_rows: Vec<ParseError>,
    /// Data rows examined (header and blank rows excluded).
    pub rows_read: u64,
}

/// Parse a comma-delimited price list.
///
/// The first record is the header row, resolved with `headers::resolve`.
/// Records whose cells are all blank are ignored. A record that cannot be
/// turned into a `PriceRecord` either aborts the file (`Strict`, returned as
/// `Err`) or is collected in `skipped_rows` (`Lenient`). Undecodable CSV
/// aborts the file under both policies.
///
/// `file_path` is used for error context; its file name becomes each
/// record's `source_file`.
pub fn parse_price_list<R: Read>(
    reader: R,
    file_path: &Path,
    policy: RowPolicy,
) -> Result<ParseOutcome, ParseError> {
    let source_file = file_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_path.display().to_string());

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut rows = csv_reader.records();

    let header_row = match rows.next() {
        Some(row) => row.map_err(|e| ParseError::Csv {
            file: file_path.to_path_buf(),
            source: e,
        })?,
        None => {
            tracing::debug!(file = %file_path.display(), "Price list is empty");
            return Ok(ParseOutcome::MissingColumns {
                missing: headers::resolve(Vec::<String>::new()).missing(),
            });
        }
    };

    let resolved = headers::resolve(header_row.iter());
    let layout = match resolved.complete() {
        Some(layout) => layout,
        None => {
            return Ok(ParseOutcome::MissingColumns {
                missing: resolved.missing(),
            })
        }
    };

    tracing::trace!(
        file = %file_path.display(),
        name = layout.name,
        price = layout.price,
        weight = layout.weight,
        "Columns resolved"
    );

    let mut parsed = ParsedFile::default();

    for row in rows {
        let row = row.map_err(|e| ParseError::Csv {
            file: file_path.to_path_buf(),
            source: e,
        })?;

        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        parsed.rows_read += 1;

        let line = row.position().map(|p| p.line()).unwrap_or(0);
        match parse_row(&row, &layout, &source_file, file_path, line) {
            Ok(record) => parsed.records.push(record),
            Err(e) => match policy {
                RowPolicy::Strict => return Err(e),
                RowPolicy::Lenient => {
                    tracing::warn!(error = %e, "Skipping malformed row");
                    parsed.skipped_rows.push(e);
                }
            },
        }
    }

    Ok(ParseOutcome::Parsed(parsed))
}

/// Turn one data row into a record.
fn parse_row(
    row: &csv::StringRecord,
    layout: &ColumnLayout,
    source_file: &str,
    file_path: &Path,
    line: u64,
) -> Result<PriceRecord, ParseError> {
    let cell = |index: usize, column: &'static str| {
        row.get(index).ok_or_else(|| ParseError::MissingCell {
            file: file_path.to_path_buf(),
            line,
            column,
        })
    };

    let name = cell(layout.name, "name")?;
    let price = parse_number(cell(layout.price, "price")?, "price", file_path, line)?;
    let weight = parse_number(cell(layout.weight, "weight")?, "weight", file_path, line)?;

    PriceRecord::new(name, price, weight, source_file).map_err(|source| {
        ParseError::InvalidRecord {
            file: file_path.to_path_buf(),
            line,
            source,
        }
    })
}

/// Parse a decimal cell, ignoring surrounding whitespace.
fn parse_number(
    raw: &str,
    column: &'static str,
    file_path: &Path,
    line: u64,
) -> Result<f64, ParseError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidNumber {
            file: file_path.to_path_buf(),
            line,
            column,
            raw: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::error::RecordError;
    use std::path::PathBuf;

    fn parse(content: &str, policy: RowPolicy) -> Result<ParseOutcome, ParseError> {
        parse_price_list(content.as_bytes(), &PathBuf::from("data/price_1.csv"), policy)
    }

    fn parsed(content: &str, policy: RowPolicy) -> ParsedFile {
        match parse(content, policy).unwrap() {
            ParseOutcome::Parsed(file) => file,
            other => panic!("expected parsed file, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_basic_rows() {
        let file = parsed(
            "товар,цена,вес\nЯблоко,100,2\nГруша,90,1.5\n",
            RowPolicy::Strict,
        );
        assert_eq!(file.records.len(), 2);
        assert_eq!(file.rows_read, 2);

        let apple = &file.records[0];
        assert_eq!(apple.name(), "Яблоко");
        assert_eq!(apple.price(), 100.0);
        assert_eq!(apple.weight(), 2.0);
        assert_eq!(apple.unit_price(), 50.0);
        assert_eq!(apple.source_file(), "price_1.csv");

        assert_eq!(file.records[1].name(), "Груша");
        assert!((file.records[1].unit_price() - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_arbitrary_column_order() {
        let file = parsed(
            "фасовка,артикул,розница,наименование\n0.5,A-1,30,Чай\n",
            RowPolicy::Strict,
        );
        assert_eq!(file.records[0].name(), "Чай");
        assert_eq!(file.records[0].unit_price(), 60.0);
    }

    #[test]
    fn test_parse_missing_column_skips_file() {
        let outcome = parse("название,масса\nЯблоко,2\n", RowPolicy::Strict).unwrap();
        match outcome {
            ParseOutcome::MissingColumns { missing } => assert_eq!(missing, vec!["price"]),
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_empty_content() {
        let outcome = parse("", RowPolicy::Strict).unwrap();
        assert!(matches!(outcome, ParseOutcome::MissingColumns { .. }));
    }

    #[test]
    fn test_parse_header_only() {
        let file = parsed("товар,цена,вес\n", RowPolicy::Strict);
        assert!(file.records.is_empty());
        assert_eq!(file.rows_read, 0);
    }

    #[test]
    fn test_parse_skips_blank_rows() {
        let file = parsed(
            "товар,цена,вес\n\nЯблоко,100,2\n,,\n\nСлива,40,0.5\n",
            RowPolicy::Strict,
        );
        let names: Vec<_> = file.records.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["Яблоко", "Слива"]);
    }

    #[test]
    fn test_parse_trims_numeric_cells_only() {
        let file = parsed("товар,цена,вес\n  Мёд , 300 , 0.5 \n", RowPolicy::Strict);
        assert_eq!(file.records[0].name(), "  Мёд ");
        assert_eq!(file.records[0].price(), 300.0);
        assert_eq!(file.records[0].unit_price(), 600.0);
    }

    #[test]
    fn test_parse_quoted_cells() {
        let file = parsed(
            "товар,цена,вес\n\"Орехи, ассорти\",450,0.25\n",
            RowPolicy::Strict,
        );
        assert_eq!(file.records[0].name(), "Орехи, ассорти");
        assert_eq!(file.records[0].unit_price(), 1800.0);
    }

    #[test]
    fn test_strict_zero_weight_aborts_file() {
        let err = parse(
            "товар,цена,вес\nЯблоко,100,2\nВоздух,10,0\n",
            RowPolicy::Strict,
        )
        .unwrap_err();
        match err {
            ParseError::InvalidRecord { line, source, .. } => {
                assert_eq!(line, 3);
                assert_eq!(source, RecordError::ZeroWeight);
            }
            other => panic!("expected InvalidRecord, got {other:?}"),
        }
    }

    #[test]
    fn test_strict_non_numeric_price_aborts_file() {
        let err = parse("товар,цена,вес\nЯблоко,сто,2\n", RowPolicy::Strict).unwrap_err();
        match err {
            ParseError::InvalidNumber {
                line, column, raw, ..
            } => {
                assert_eq!(line, 2);
                assert_eq!(column, "price");
                assert_eq!(raw, "сто");
            }
            other => panic!("expected InvalidNumber, got {other:?}"),
        }
    }

    #[test]
    fn test_tiny_weight_does_not_produce_infinite_unit_price() {
        let err = parse("товар,цена,вес\nПыль,100,1e-309\n", RowPolicy::Strict).unwrap_err();
        match err {
            ParseError::InvalidRecord { line, source, .. } => {
                assert_eq!(line, 2);
                assert_eq!(
                    source,
                    RecordError::NonFinite {
                        field: "unit_price"
                    }
                );
            }
            other => panic!("expected InvalidRecord, got {other:?}"),
        }

        let file = parsed(
            "товар,цена,вес\nПыль,100,1e-309\nСлива,40,0.5\n",
            RowPolicy::Lenient,
        );
        assert_eq!(file.records.len(), 1);
        assert!(file.records.iter().all(|r| r.unit_price().is_finite()));
    }

    #[test]
    fn test_short_row_reports_missing_cell() {
        let err = parse("товар,цена,вес\nЯблоко,100\n", RowPolicy::Strict).unwrap_err();
        assert!(matches!(
            err,
            ParseError::MissingCell {
                column: "weight",
                ..
            }
        ));
    }

    #[test]
    fn test_lenient_skips_malformed_rows() {
        let file = parsed(
            "товар,цена,вес\nЯблоко,100,2\nВоздух,10,0\nКамень,abc,1\nСлива,40,0.5\n",
            RowPolicy::Lenient,
        );
        let names: Vec<_> = file.records.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["Яблоко", "Слива"]);
        assert_eq!(file.skipped_rows.len(), 2);
        assert_eq!(file.rows_read, 4);
        assert_eq!(file.skipped_rows[0].line(), Some(3));
        assert_eq!(file.skipped_rows[1].line(), Some(4));
    }

    #[test]
    fn test_invalid_utf8_aborts_file() {
        let mut bytes = "товар,цена,вес\n".as_bytes().to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe, b',', b'1', b',', b'1', b'\n']);
        let result = parse_price_list(
            bytes.as_slice(),
            &PathBuf::from("price_bad.csv"),
            RowPolicy::Lenient,
        );
        assert!(matches!(result, Err(ParseError::Csv { .. })));
    }
}
