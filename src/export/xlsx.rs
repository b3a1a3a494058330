use rust_xlsxwriter::{Format, FormatBorder, Workbook, XlsxError};
use unicode_width::UnicodeWidthStr;

use super::model::Sheet;

pub const CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Serialize a sheet into an in-memory `.xlsx` workbook.
pub fn encode(sheet: &Sheet) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet.name)?;

    let header_format = Format::new().set_bold().set_border(FormatBorder::Thin);
    for (col, header) in sheet.headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    // Blank cells are only stored when their format carries a property, so
    // NULL values get the bordered cell format to keep empty records in range.
    let cell_format = Format::new().set_border(FormatBorder::Thin);
    let mut col_widths: Vec<usize> = sheet.headers.iter().map(|h| h.width()).collect();

    for (row_index, values) in sheet.rows.iter().enumerate() {
        let row = (row_index + 1) as u32;
        for (col, value) in values.iter().enumerate() {
            let Some(v) = value.as_deref() else {
                worksheet.write_blank(row, col as u16, &cell_format)?;
                continue;
            };
            worksheet.write_string_with_format(row, col as u16, v, &cell_format)?;
            if let Some(w) = col_widths.get_mut(col) {
                *w = (*w).max(v.width());
            }
        }
    }

    for (col, w) in col_widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, *w as f64 + 2.0)?;
    }

    workbook.save_to_buffer()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::model::students_sheet;
    use crate::students::repo::{student, Student};
    use std::io::{Cursor, Read};

    fn sheet_xml(bytes: &[u8]) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut xml = String::new();
        archive
            .by_name("xl/worksheets/sheet1.xml")
            .unwrap()
            .read_to_string(&mut xml)
            .unwrap();
        xml
    }

    fn workbook_xml(bytes: &[u8]) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut xml = String::new();
        archive
            .by_name("xl/workbook.xml")
            .unwrap()
            .read_to_string(&mut xml)
            .unwrap();
        xml
    }

    #[test]
    fn writes_header_plus_one_row_per_record() {
        let sheet = Sheet {
            name: "Students",
            headers: vec!["student_number", "full_name", "course"],
            rows: vec![
                vec![Some("1".into()), Some("Amy".into()), Some("BSIT".into())],
                vec![Some("2".into()), None, Some("BSN".into())],
            ],
        };
        let bytes = encode(&sheet).unwrap();
        assert!(bytes.starts_with(b"PK"));

        let xml = sheet_xml(&bytes);
        assert_eq!(xml.matches("<row ").count(), 3);
        assert!(workbook_xml(&bytes).contains(r#"name="Students""#));
    }

    #[test]
    fn record_with_only_nulls_keeps_its_row() {
        let sheet = students_sheet(vec![
            student("1", "A", "X"),
            Student {
                student_number: None,
                full_name: None,
                course: None,
            },
        ]);
        let bytes = encode(&sheet).unwrap();

        let xml = sheet_xml(&bytes);
        assert_eq!(xml.matches("<row ").count(), 3);
        assert!(xml.contains(r#"<row r="3""#));
    }

    #[test]
    fn empty_sheet_still_has_headers() {
        let sheet = Sheet {
            name: "Visits",
            headers: vec!["Student Number", "Full Name", "Course", "Date & Time"],
            rows: Vec::new(),
        };
        let bytes = encode(&sheet).unwrap();
        assert_eq!(sheet_xml(&bytes).matches("<row ").count(), 1);
        assert!(workbook_xml(&bytes).contains(r#"name="Visits""#));
    }
}
