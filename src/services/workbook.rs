// src/services/workbook.rs
// DOCUMENTATION: Spreadsheet export
// PURPOSE: Map enriched records onto a fixed column schema and serialize as .xlsx

use crate::errors::ExtractorError;
use crate::models::PlaceDetail;
use chrono::{DateTime, Utc};
use rust_xlsxwriter::{Format, Workbook, XlsxError};

/// Column headers, in output order
pub const COLUMNS: [&str; 12] = [
    "Name",
    "Phone",
    "Address",
    "Latitude",
    "Longitude",
    "Rating",
    "Reviews",
    "Website",
    "Status",
    "Open Now",
    "Types",
    "Place ID",
];

/// MIME type for .xlsx downloads
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub const SHEET_NAME: &str = "Places";

/// Longest string a worksheet cell can hold, in characters
pub const MAX_CELL_CHARS: usize = 32_767;

/// Column widths in characters, aligned with COLUMNS
const COLUMN_WIDTHS: [f64; 12] = [
    32.0, 18.0, 45.0, 12.0, 12.0, 8.0, 10.0, 35.0, 20.0, 10.0, 40.0, 30.0,
];

/// A single worksheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    fn text(value: &str) -> Self {
        if value.is_empty() {
            return Cell::Empty;
        }
        match value.char_indices().nth(MAX_CELL_CHARS) {
            Some((cut, _)) => {
                log::warn!(
                    "Truncating {}-byte value to {} characters for the worksheet",
                    value.len(),
                    MAX_CELL_CHARS
                );
                Cell::Text(value[..cut].to_string())
            }
            None => Cell::Text(value.to_string()),
        }
    }

    fn optional_text(value: Option<&str>) -> Self {
        value.map(Cell::text).unwrap_or(Cell::Empty)
    }

    fn optional_number(value: Option<f64>) -> Self {
        value.map(Cell::Number).unwrap_or(Cell::Empty)
    }
}

pub struct WorkbookBuilder;

impl WorkbookBuilder {
    /// Map one record onto the fixed column schema
    /// DOCUMENTATION: Absent values become empty cells, never zero or "No"
    pub fn row(record: &PlaceDetail) -> [Cell; 12] {
        let open_now = match record.open_now {
            Some(true) => Cell::Text("Yes".to_string()),
            Some(false) => Cell::Text("No".to_string()),
            None => Cell::Empty,
        };

        [
            Cell::text(&record.name),
            Cell::text(record.display_phone()),
            Cell::text(&record.address),
            Cell::optional_number(record.coordinates.map(|c| c.lat)),
            Cell::optional_number(record.coordinates.map(|c| c.lng)),
            Cell::optional_number(record.rating),
            Cell::optional_number(record.review_count.map(f64::from)),
            Cell::optional_text(record.website.as_deref()),
            Cell::optional_text(record.status.as_deref()),
            open_now,
            Cell::text(&record.types.join(", ")),
            Cell::text(&record.id),
        ]
    }

    /// All data rows, in input order
    pub fn rows(records: &[PlaceDetail]) -> Vec<[Cell; 12]> {
        records.iter().map(Self::row).collect()
    }

    /// Serialize records into an .xlsx file held in memory
    /// DOCUMENTATION: Row 0 is the bold header, records follow unchanged in order
    pub fn build(records: &[PlaceDetail]) -> Result<Vec<u8>, ExtractorError> {
        Self::write(records).map_err(|e| {
            log::error!("Workbook generation failed: {}", e);
            ExtractorError::Workbook(e.to_string())
        })
    }

    fn write(records: &[PlaceDetail]) -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;

        for (col, title) in COLUMNS.iter().enumerate() {
            let col = col as u16;
            worksheet.write_string_with_format(0, col, *title, &header_format)?;
            worksheet.set_column_width(col, COLUMN_WIDTHS[col as usize])?;
        }
        worksheet.set_freeze_panes(1, 0)?;

        for (idx, row) in Self::rows(records).iter().enumerate() {
            let row_num = (idx + 1) as u32;
            for (col, cell) in row.iter().enumerate() {
                let col = col as u16;
                match cell {
                    Cell::Text(value) => {
                        worksheet.write_string(row_num, col, value)?;
                    }
                    Cell::Number(value) => {
                        worksheet.write_number(row_num, col, *value)?;
                    }
                    Cell::Empty => {}
                }
            }
        }

        workbook.save_to_buffer()
    }
}

/// Read a generated workbook back into rows of cell values
#[cfg(test)]
pub(crate) fn read_sheet(bytes: &[u8]) -> Vec<Vec<calamine::Data>> {
    use calamine::{open_workbook_from_rs, Reader, Xlsx};

    let mut workbook: Xlsx<_> = open_workbook_from_rs(std::io::Cursor::new(bytes))
        .expect("generated bytes should open as .xlsx");
    let range = workbook
        .worksheet_range(SHEET_NAME)
        .expect("worksheet should exist");
    range.rows().map(|row| row.to_vec()).collect()
}

/// Download filename stamped with the generation time (UTC)
pub fn generate_filename(now: DateTime<Utc>) -> String {
    format!("places_{}.xlsx", now.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinates;
    use calamine::Data;
    use chrono::TimeZone;

    fn header(rows: &[Vec<Data>]) -> Vec<String> {
        rows[0].iter().map(|c| c.to_string()).collect()
    }

    fn full_record() -> PlaceDetail {
        PlaceDetail {
            id: "ChIJ123".to_string(),
            name: "Test Restaurant".to_string(),
            address: "Calle Mayor 1, 28013 Madrid, Spain".to_string(),
            phone: Some("912 34 56 78".to_string()),
            international_phone: Some("+34 912 34 56 78".to_string()),
            website: Some("https://testrestaurant.com".to_string()),
            rating: Some(4.5),
            review_count: Some(100),
            types: vec!["restaurant".to_string(), "food".to_string()],
            coordinates: Some(Coordinates {
                lat: 40.4168,
                lng: -3.7038,
            }),
            open_now: Some(true),
            status: Some("OPERATIONAL".to_string()),
        }
    }

    #[test]
    fn test_row_follows_column_order() {
        let row = WorkbookBuilder::row(&full_record());

        assert_eq!(row[0], Cell::Text("Test Restaurant".to_string()));
        assert_eq!(row[1], Cell::Text("912 34 56 78".to_string()));
        assert_eq!(row[3], Cell::Number(40.4168));
        assert_eq!(row[4], Cell::Number(-3.7038));
        assert_eq!(row[5], Cell::Number(4.5));
        assert_eq!(row[6], Cell::Number(100.0));
        assert_eq!(row[8], Cell::Text("OPERATIONAL".to_string()));
        assert_eq!(row[9], Cell::Text("Yes".to_string()));
        assert_eq!(row[10], Cell::Text("restaurant, food".to_string()));
        assert_eq!(row[11], Cell::Text("ChIJ123".to_string()));
    }

    #[test]
    fn test_absent_fields_render_empty() {
        let record = PlaceDetail {
            id: "p1".to_string(),
            name: "Bare".to_string(),
            ..Default::default()
        };
        let row = WorkbookBuilder::row(&record);

        for idx in [1, 2, 3, 4, 5, 6, 7, 8, 9, 10] {
            assert_eq!(row[idx], Cell::Empty, "column {} should be empty", COLUMNS[idx]);
        }
    }

    #[test]
    fn test_open_now_false_is_no() {
        let record = PlaceDetail {
            open_now: Some(false),
            ..Default::default()
        };
        assert_eq!(WorkbookBuilder::row(&record)[9], Cell::Text("No".to_string()));
    }

    #[test]
    fn test_phone_uses_international_when_local_missing() {
        let record = PlaceDetail {
            international_phone: Some("+1 212-555-0100".to_string()),
            ..Default::default()
        };
        assert_eq!(
            WorkbookBuilder::row(&record)[1],
            Cell::Text("+1 212-555-0100".to_string())
        );
    }

    #[test]
    fn test_rows_keep_input_order() {
        let mut second = full_record();
        second.id = "second".to_string();
        let mut first = full_record();
        first.id = "first".to_string();

        let rows = WorkbookBuilder::rows(&[first, second]);
        assert_eq!(rows[0][11], Cell::Text("first".to_string()));
        assert_eq!(rows[1][11], Cell::Text("second".to_string()));
    }

    #[test]
    fn test_build_writes_header_and_rows() {
        let bare = PlaceDetail {
            id: "p2".to_string(),
            name: "Bare".to_string(),
            ..Default::default()
        };
        let bytes = WorkbookBuilder::build(&[full_record(), bare]).unwrap();
        // .xlsx is a zip container
        assert_eq!(&bytes[..2], b"PK");

        let rows = read_sheet(&bytes);
        assert_eq!(rows.len(), 3);
        assert_eq!(header(&rows), COLUMNS);

        let full = &rows[1];
        assert_eq!(full[0], Data::String("Test Restaurant".to_string()));
        assert_eq!(full[3], Data::Float(40.4168));
        assert_eq!(full[6], Data::Float(100.0));
        assert_eq!(full[9], Data::String("Yes".to_string()));

        let bare = &rows[2];
        assert_eq!(bare[0], Data::String("Bare".to_string()));
        for idx in 1..=10 {
            assert_eq!(bare[idx], Data::Empty, "column {} should be empty", COLUMNS[idx]);
        }
        assert_eq!(bare[11], Data::String("p2".to_string()));
    }

    #[test]
    fn test_build_with_no_records_still_has_header() {
        let bytes = WorkbookBuilder::build(&[]).unwrap();
        let rows = read_sheet(&bytes);
        assert_eq!(rows.len(), 1);
        assert_eq!(header(&rows), COLUMNS);
    }

    #[test]
    fn test_oversized_text_is_truncated_not_rejected() {
        let mut record = full_record();
        record.website = Some(format!("https://example.com/{}", "é".repeat(40_000)));

        let row = WorkbookBuilder::row(&record);
        match &row[7] {
            Cell::Text(value) => assert_eq!(value.chars().count(), MAX_CELL_CHARS),
            other => panic!("expected text, got {:?}", other),
        }

        let bytes = WorkbookBuilder::build(&[record]).unwrap();
        let rows = read_sheet(&bytes);
        assert_eq!(rows[1][7].to_string().chars().count(), MAX_CELL_CHARS);
    }

    #[test]
    fn test_filename_encodes_timestamp() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(generate_filename(now), "places_20240309_140507.xlsx");
    }
}
