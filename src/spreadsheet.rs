// Spreadsheet export: builds a single-sheet .xlsx workbook from the collected records

use crate::exporter::{validate_trip, ExportError};
use crate::options_table::{build_options_table, OPTION_COLUMNS};
use crate::trip::{FlightOption, TripDetails};
use crate::xlsx_sheet::{
    cell_reference, column_name, XmlCell, XmlCol, XmlCols, XmlDimension, XmlInlineString,
    XmlMergeCell, XmlMergeCells, XmlRow, XmlSheetData, XmlWorksheet, SPREADSHEET_NS,
};
use bytes::Bytes;
use quick_xml::escape::escape;
use serde::{Deserialize, Serialize};
use std::io::{Cursor, Write};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const LEGACY_EXCEL_MIME: &str = "application/vnd.ms-excel";

// Indices into cellXfs of styles.xml
pub const STYLE_TITLE: u32 = 1;
pub const STYLE_HEADER: u32 = 2;
pub const STYLE_DATA: u32 = 3;

pub const TITLE_ROW: u32 = 1;
pub const HEADER_ROW: u32 = 3;

const WIDTH_PADDING: usize = 2;

const SUMMARY_TITLE: &str = "Flight Booking Details";

/// The three planner variants. They differ in sheet content, title size,
/// file name and the MIME label offered for download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpreadsheetLayout {
    /// Label/value rows of the trip fields only.
    TripSummary,
    #[default]
    FlightOptions,
    FlightOptionsLegacy,
}

impl SpreadsheetLayout {
    pub fn title_font_size(&self) -> u32 {
        match self {
            SpreadsheetLayout::TripSummary | SpreadsheetLayout::FlightOptions => 14,
            SpreadsheetLayout::FlightOptionsLegacy => 13,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            SpreadsheetLayout::TripSummary | SpreadsheetLayout::FlightOptions => XLSX_MIME,
            SpreadsheetLayout::FlightOptionsLegacy => LEGACY_EXCEL_MIME,
        }
    }

    pub fn sheet_name(&self) -> &'static str {
        match self {
            SpreadsheetLayout::TripSummary => "Flight Search",
            SpreadsheetLayout::FlightOptions | SpreadsheetLayout::FlightOptionsLegacy => {
                "Flight Options"
            }
        }
    }

    pub fn file_name(&self, trip: &TripDetails) -> String {
        match self {
            SpreadsheetLayout::TripSummary => format!(
                "Flight_Search_{}_to_{}_{}.xlsx",
                trip.from_city,
                trip.to_city,
                trip.departure_label()
            ),
            SpreadsheetLayout::FlightOptions | SpreadsheetLayout::FlightOptionsLegacy => format!(
                "Flight_Options_{}_to_{}_{}-{}.xlsx",
                trip.from_city,
                trip.to_city,
                trip.departure_label(),
                trip.return_label()
            ),
        }
    }

    pub fn title(&self, trip: &TripDetails) -> String {
        match self {
            SpreadsheetLayout::TripSummary => SUMMARY_TITLE.to_string(),
            SpreadsheetLayout::FlightOptions | SpreadsheetLayout::FlightOptionsLegacy => format!(
                "Flight Options: {} to {} ({} - {})",
                trip.from_city,
                trip.to_city,
                trip.departure_label(),
                trip.return_label()
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Bytes,
}

impl ExportedFile {
    /// The download name with path separators and control characters
    /// replaced, safe to join onto an output directory.
    pub fn disk_file_name(&self) -> String {
        self.file_name
            .chars()
            .map(|c| {
                if matches!(c, '/' | '\\') || c.is_control() {
                    '_'
                } else {
                    c
                }
            })
            .collect()
    }

    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let name = self.disk_file_name();
        let mut components = Path::new(&name).components();
        if !matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        ) {
            return Err(ExportError::ConversionError(format!(
                "unsafe file name: {}",
                self.file_name
            )));
        }

        std::fs::create_dir_all(dir)?;
        let path = dir.join(&name);
        std::fs::write(&path, &self.bytes)?;
        info!(path = %path.display(), size = self.bytes.len(), "workbook written");
        Ok(path)
    }
}

#[derive(Debug, Clone, Copy)]
enum SheetValue<'a> {
    Text(&'a str),
    Number(u64),
}

impl SheetValue<'_> {
    fn display_len(&self) -> usize {
        match self {
            SheetValue::Text(text) => text.chars().count(),
            SheetValue::Number(number) => number.to_string().len(),
        }
    }
}

// Collects rows and tracks the widest text seen per column
struct SheetBuilder {
    rows: Vec<XmlRow>,
    widths: Vec<usize>,
    merges: Vec<String>,
    last_column: u32,
}

impl SheetBuilder {
    fn new(column_count: u32) -> Self {
        Self {
            rows: Vec::new(),
            widths: vec![0; column_count as usize],
            merges: Vec::new(),
            last_column: column_count.saturating_sub(1),
        }
    }

    // The title spans every column, so it is left out of the width calculation
    fn title(&mut self, text: &str) {
        self.rows.push(XmlRow {
            number: TITLE_ROW,
            cells: vec![Self::cell(TITLE_ROW, 0, SheetValue::Text(text), STYLE_TITLE)],
        });
        if self.last_column > 0 {
            self.merges.push(format!(
                "{}:{}",
                cell_reference(TITLE_ROW, 0),
                cell_reference(TITLE_ROW, self.last_column)
            ));
        }
    }

    fn row(&mut self, number: u32, values: &[SheetValue<'_>], styles: &[u32]) {
        let cells = values
            .iter()
            .zip(styles.iter())
            .enumerate()
            .map(|(column, (value, style))| {
                if let Some(width) = self.widths.get_mut(column) {
                    *width = (*width).max(value.display_len());
                }
                Self::cell(number, column as u32, *value, *style)
            })
            .collect();
        self.rows.push(XmlRow { number, cells });
    }

    fn cell(row: u32, column: u32, value: SheetValue<'_>, style: u32) -> XmlCell {
        let reference = cell_reference(row, column);
        match value {
            SheetValue::Text(text) => XmlCell {
                reference,
                style: Some(style),
                cell_type: Some("inlineStr".to_string()),
                value: None,
                inline_string: Some(XmlInlineString::new(text)),
            },
            SheetValue::Number(number) => XmlCell {
                reference,
                style: Some(style),
                cell_type: None,
                value: Some(number.to_string()),
                inline_string: None,
            },
        }
    }

    fn finish(self) -> XmlWorksheet {
        let last_row = self.rows.last().map_or(TITLE_ROW, |row| row.number);
        let cols = self
            .widths
            .iter()
            .enumerate()
            .map(|(column, width)| XmlCol {
                min: column as u32 + 1,
                max: column as u32 + 1,
                width: (width + WIDTH_PADDING) as f64,
                custom_width: 1,
            })
            .collect();
        let merge_cells = if self.merges.is_empty() {
            None
        } else {
            Some(XmlMergeCells {
                count: self.merges.len(),
                cells: self
                    .merges
                    .into_iter()
                    .map(|reference| XmlMergeCell { reference })
                    .collect(),
            })
        };

        XmlWorksheet {
            xmlns: SPREADSHEET_NS.to_string(),
            dimension: XmlDimension {
                reference: format!("A1:{}{}", column_name(self.last_column), last_row),
            },
            cols: XmlCols { cols },
            sheet_data: XmlSheetData { rows: self.rows },
            merge_cells,
        }
    }
}

fn trip_summary_sheet(trip: &TripDetails) -> XmlWorksheet {
    let departure = trip.departure_label();
    let return_label = trip.return_label();
    let class = trip.travel_class.label();
    let fields = [
        ("From City", SheetValue::Text(&trip.from_city)),
        ("To City", SheetValue::Text(&trip.to_city)),
        ("Departure Date", SheetValue::Text(&departure)),
        ("Return Date", SheetValue::Text(&return_label)),
        ("Travellers", SheetValue::Number(u64::from(trip.travellers))),
        ("Class", SheetValue::Text(class)),
    ];

    let mut builder = SheetBuilder::new(2);
    builder.title(SUMMARY_TITLE);
    for (offset, (label, value)) in fields.into_iter().enumerate() {
        builder.row(
            HEADER_ROW + offset as u32,
            &[SheetValue::Text(label), value],
            &[STYLE_HEADER, STYLE_DATA],
        );
    }
    builder.finish()
}

fn flight_options_sheet(
    trip: &TripDetails,
    options: &[FlightOption],
    layout: SpreadsheetLayout,
) -> XmlWorksheet {
    let table = build_options_table(options);
    let header_styles = [STYLE_HEADER; OPTION_COLUMNS.len()];
    let data_styles = [STYLE_DATA; OPTION_COLUMNS.len()];

    let mut builder = SheetBuilder::new(OPTION_COLUMNS.len() as u32);
    builder.title(&layout.title(trip));
    builder.row(
        HEADER_ROW,
        &table.headers().map(SheetValue::Text),
        &header_styles,
    );
    for (offset, row) in table.rows().iter().enumerate() {
        let values: Vec<SheetValue<'_>> = row.iter().map(|cell| SheetValue::Text(cell)).collect();
        builder.row(HEADER_ROW + 1 + offset as u32, &values, &data_styles);
    }
    builder.finish()
}

pub fn styles_xml(title_font_size: u32) -> String {
    let thin = r#"style="thin"><color rgb="FF000000"/>"#;
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="{ns}"><fonts count="3"><font><sz val="11"/><name val="Calibri"/></font><font><b/><sz val="11"/><name val="Calibri"/></font><font><b/><sz val="{title}"/><name val="Calibri"/></font></fonts><fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills><borders count="2"><border><left/><right/><top/><bottom/><diagonal/></border><border><left {thin}</left><right {thin}</right><top {thin}</top><bottom {thin}</bottom><diagonal/></border></borders><cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs><cellXfs count="4"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/><xf numFmtId="0" fontId="2" fillId="0" borderId="0" xfId="0" applyFont="1"/><xf numFmtId="0" fontId="1" fillId="0" borderId="1" xfId="0" applyFont="1" applyBorder="1" applyAlignment="1"><alignment horizontal="center" vertical="center"/></xf><xf numFmtId="0" fontId="0" fillId="0" borderId="1" xfId="0" applyBorder="1" applyAlignment="1"><alignment horizontal="center" vertical="center"/></xf></cellXfs><cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles></styleSheet>"#,
        ns = SPREADSHEET_NS,
        title = title_font_size,
        thin = thin,
    )
}

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/></Types>"#;

const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

fn workbook_xml(sheet_name: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="{}" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        SPREADSHEET_NS,
        escape(sheet_name)
    )
}

// Fixed entry timestamps keep the archive bytes stable for identical input
fn package_workbook(
    sheet_name: &str,
    worksheet_xml: &str,
    styles: &str,
) -> Result<Vec<u8>, ExportError> {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());

    let workbook = workbook_xml(sheet_name);
    let parts: [(&str, &str); 6] = [
        ("[Content_Types].xml", CONTENT_TYPES_XML),
        ("_rels/.rels", ROOT_RELS_XML),
        ("xl/workbook.xml", &workbook),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS_XML),
        ("xl/styles.xml", styles),
        ("xl/worksheets/sheet1.xml", worksheet_xml),
    ];

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in parts {
        writer.start_file(name, options)?;
        writer.write_all(content.as_bytes())?;
    }
    Ok(writer.finish()?.into_inner())
}

/// Builds the workbook for `layout`. Refuses to produce anything when
/// either city is empty.
pub fn export_spreadsheet(
    trip: &TripDetails,
    options: &[FlightOption],
    layout: SpreadsheetLayout,
) -> Result<ExportedFile, ExportError> {
    validate_trip(trip)?;

    let worksheet = match layout {
        SpreadsheetLayout::TripSummary => trip_summary_sheet(trip),
        SpreadsheetLayout::FlightOptions | SpreadsheetLayout::FlightOptionsLegacy => {
            flight_options_sheet(trip, options, layout)
        }
    };
    let worksheet_xml = worksheet
        .to_xml()
        .map_err(ExportError::ConversionError)?;
    debug!(
        rows = worksheet.sheet_data.rows.len(),
        "worksheet serialized"
    );

    let bytes = package_workbook(
        layout.sheet_name(),
        &worksheet_xml,
        &styles_xml(layout.title_font_size()),
    )?;

    Ok(ExportedFile {
        file_name: layout.file_name(trip),
        mime_type: layout.mime_type(),
        bytes: Bytes::from(bytes),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trip::TravelClass;
    use chrono::NaiveDate;
    use std::io::Read;
    use test_case::test_case;
    use zip::ZipArchive;

    fn trip() -> TripDetails {
        let mut trip = TripDetails::new(
            "Bangalore",
            "Delhi",
            NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
        );
        trip.travellers = 2;
        trip.travel_class = TravelClass::Business;
        trip
    }

    fn options(count: usize) -> Vec<FlightOption> {
        (0..count)
            .map(|i| FlightOption {
                outbound_airline: format!("IndiGo 6E-{}", 100 + i),
                outbound_departure: "06:10".to_string(),
                outbound_arrival: "09:00".to_string(),
                return_airline: "Air India AI-503".to_string(),
                return_departure: "17:00".to_string(),
                return_arrival: "19:45".to_string(),
                round_trip_cost: format!("{},500", 10 + i),
                ..FlightOption::new(i)
            })
            .collect()
    }

    fn read_part(file: &ExportedFile, name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(file.bytes.to_vec())).unwrap();
        let mut content = String::new();
        archive
            .by_name(name)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        content
    }

    fn read_sheet(file: &ExportedFile) -> XmlWorksheet {
        XmlWorksheet::from_xml(&read_part(file, "xl/worksheets/sheet1.xml")).unwrap()
    }

    #[test_case(SpreadsheetLayout::FlightOptions; "options layout")]
    #[test_case(SpreadsheetLayout::FlightOptionsLegacy; "legacy layout")]
    fn test_header_row_matches_fixed_columns(layout: SpreadsheetLayout) {
        let file = export_spreadsheet(&trip(), &options(3), layout).unwrap();
        let sheet = read_sheet(&file);

        let header = sheet.row(HEADER_ROW).unwrap();
        assert_eq!(header.texts(), OPTION_COLUMNS.map(String::from).to_vec());
        assert!(header.cells.iter().all(|c| c.style == Some(STYLE_HEADER)));
    }

    #[test]
    fn test_data_rows_are_verbatim() {
        let opts = options(4);
        let file = export_spreadsheet(&trip(), &opts, SpreadsheetLayout::FlightOptions).unwrap();
        let sheet = read_sheet(&file);

        // title + header + 4 data rows
        assert_eq!(sheet.sheet_data.rows.len(), 6);
        let last = sheet.row(HEADER_ROW + 4).unwrap();
        assert_eq!(
            last.texts(),
            vec![
                "Option 4",
                "IndiGo 6E-103",
                "Air India AI-503",
                "06:10",
                "09:00",
                "17:00",
                "19:45",
                "13,500",
            ]
        );
        assert_eq!(last.cells[7].reference, "H7");
        assert!(last.cells.iter().all(|c| c.style == Some(STYLE_DATA)));
    }

    #[test]
    fn test_title_is_merged_across_columns() {
        let trip = trip().with_return(NaiveDate::from_ymd_opt(2025, 5, 6).unwrap());
        let file = export_spreadsheet(&trip, &options(1), SpreadsheetLayout::FlightOptions).unwrap();
        let sheet = read_sheet(&file);

        let title = sheet.row(TITLE_ROW).unwrap();
        assert_eq!(
            title.texts(),
            vec!["Flight Options: Bangalore to Delhi (01-May-2025 - 06-May-2025)"]
        );
        assert_eq!(title.cells[0].style, Some(STYLE_TITLE));
        assert_eq!(sheet.merge_cells.unwrap().cells[0].reference, "A1:H1");
        assert_eq!(sheet.dimension.reference, "A1:H4");
    }

    #[test_case(SpreadsheetLayout::TripSummary, 14)]
    #[test_case(SpreadsheetLayout::FlightOptions, 14)]
    #[test_case(SpreadsheetLayout::FlightOptionsLegacy, 13)]
    fn test_title_font_size(layout: SpreadsheetLayout, size: u32) {
        let file = export_spreadsheet(&trip(), &options(1), layout).unwrap();
        let styles = read_part(&file, "xl/styles.xml");
        assert!(styles.contains(&format!("<font><b/><sz val=\"{}\"/>", size)));
        assert!(styles.contains("<alignment horizontal=\"center\" vertical=\"center\"/>"));
    }

    #[test]
    fn test_column_widths_follow_longest_text() {
        let mut opts = options(2);
        opts[1].return_airline = "An exceptionally long airline name".to_string();
        let file = export_spreadsheet(&trip(), &opts, SpreadsheetLayout::FlightOptions).unwrap();
        let sheet = read_sheet(&file);

        let widths: Vec<f64> = sheet.cols.cols.iter().map(|c| c.width).collect();
        assert_eq!(widths.len(), 8);
        assert_eq!(widths[0], ("Option 1".len() + 2) as f64);
        assert_eq!(
            widths[2],
            ("An exceptionally long airline name".len() + 2) as f64
        );
        assert_eq!(
            widths[3],
            ("Outbound Departure Time".len() + 2) as f64
        );
    }

    #[test]
    fn test_trip_summary_layout() {
        let file = export_spreadsheet(&trip(), &[], SpreadsheetLayout::TripSummary).unwrap();
        assert_eq!(file.file_name, "Flight_Search_Bangalore_to_Delhi_01-May-2025.xlsx");
        assert_eq!(file.mime_type, XLSX_MIME);

        let sheet = read_sheet(&file);
        assert_eq!(sheet.row(TITLE_ROW).unwrap().texts(), vec!["Flight Booking Details"]);
        assert_eq!(sheet.merge_cells.as_ref().unwrap().cells[0].reference, "A1:B1");
        assert_eq!(sheet.row(3).unwrap().texts(), vec!["From City", "Bangalore"]);
        assert_eq!(sheet.row(6).unwrap().texts(), vec!["Return Date", "One-way"]);
        assert_eq!(sheet.row(8).unwrap().texts(), vec!["Class", "Business"]);

        let travellers = &sheet.row(7).unwrap().cells[1];
        assert_eq!(travellers.value.as_deref(), Some("2"));
        assert!(travellers.inline_string.is_none());
    }

    #[test]
    fn test_options_file_names_and_mime() {
        let trip = trip().with_return(NaiveDate::from_ymd_opt(2025, 5, 6).unwrap());

        let file = export_spreadsheet(&trip, &options(1), SpreadsheetLayout::FlightOptions).unwrap();
        assert_eq!(
            file.file_name,
            "Flight_Options_Bangalore_to_Delhi_01-May-2025-06-May-2025.xlsx"
        );
        assert_eq!(file.mime_type, XLSX_MIME);

        let file =
            export_spreadsheet(&trip, &options(1), SpreadsheetLayout::FlightOptionsLegacy).unwrap();
        assert_eq!(file.mime_type, LEGACY_EXCEL_MIME);
    }

    #[test]
    fn test_package_parts_present() {
        let file = export_spreadsheet(&trip(), &options(1), SpreadsheetLayout::FlightOptions).unwrap();
        let workbook = read_part(&file, "xl/workbook.xml");
        assert!(workbook.contains("<sheet name=\"Flight Options\" sheetId=\"1\" r:id=\"rId1\"/>"));
        assert!(read_part(&file, "[Content_Types].xml").contains("/xl/worksheets/sheet1.xml"));
        assert!(read_part(&file, "_rels/.rels").contains("xl/workbook.xml"));
        assert!(read_part(&file, "xl/_rels/workbook.xml.rels").contains("styles.xml"));
    }

    #[test]
    fn test_export_is_deterministic() {
        let first = export_spreadsheet(&trip(), &options(5), SpreadsheetLayout::FlightOptions).unwrap();
        let second = export_spreadsheet(&trip(), &options(5), SpreadsheetLayout::FlightOptions).unwrap();
        assert_eq!(first.bytes, second.bytes);
    }

    #[test_case("", "Delhi"; "missing departure city")]
    #[test_case("Bangalore", ""; "missing arrival city")]
    #[test_case("   ", "Delhi"; "blank departure city")]
    fn test_missing_city_produces_no_file(from: &str, to: &str) {
        let mut trip = trip();
        trip.from_city = from.to_string();
        trip.to_city = to.to_string();

        let result = export_spreadsheet(&trip, &options(2), SpreadsheetLayout::FlightOptions);
        assert!(matches!(result, Err(ExportError::MissingRequiredField(_))));
    }

    #[test]
    fn test_write_to_directory() {
        let dir = std::env::temp_dir().join(format!("flight_planner_{}", std::process::id()));
        let file = export_spreadsheet(&trip(), &options(1), SpreadsheetLayout::TripSummary).unwrap();

        let path = file.write_to(&dir).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), file.bytes.to_vec());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_padded_cost_keeps_whitespace() {
        let mut opts = options(1);
        opts[0].round_trip_cost = "  12,000 ".to_string();
        let file = export_spreadsheet(&trip(), &opts, SpreadsheetLayout::FlightOptions).unwrap();

        let xml = read_part(&file, "xl/worksheets/sheet1.xml");
        assert!(xml.contains(
            "<c r=\"H4\" s=\"3\" t=\"inlineStr\"><is><t xml:space=\"preserve\">  12,000 </t></is></c>"
        ));
    }

    #[test]
    fn test_control_characters_are_encoded() {
        let mut opts = options(1);
        opts[0].outbound_airline = "Indi\u{b}Go".to_string();
        let file = export_spreadsheet(&trip(), &opts, SpreadsheetLayout::FlightOptions).unwrap();

        let xml = read_part(&file, "xl/worksheets/sheet1.xml");
        assert!(!xml.contains('\u{b}'));
        assert!(xml.contains("<t>Indi_x000B_Go</t>"));

        let sheet = XmlWorksheet::from_xml(&xml).unwrap();
        assert_eq!(sheet.row(HEADER_ROW + 1).unwrap().texts()[1], "Indi\u{b}Go");
    }

    #[test]
    fn test_city_with_slash_writes_into_output_dir() {
        let dir = std::env::temp_dir().join(format!("flight_planner_slash_{}", std::process::id()));
        let trip = TripDetails::new("Delhi/NCR", "Goa", NaiveDate::from_ymd_opt(2025, 5, 1).unwrap());
        let file = export_spreadsheet(&trip, &options(1), SpreadsheetLayout::TripSummary).unwrap();
        assert_eq!(file.file_name, "Flight_Search_Delhi/NCR_to_Goa_01-May-2025.xlsx");

        let path = file.write_to(&dir).unwrap();
        assert_eq!(path, dir.join("Flight_Search_Delhi_NCR_to_Goa_01-May-2025.xlsx"));
        assert!(path.is_file());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_parent_segments_stay_inside_output_dir() {
        let dir = std::env::temp_dir().join(format!("flight_planner_parent_{}", std::process::id()));
        let trip = TripDetails::new("../../etc", "Goa", NaiveDate::from_ymd_opt(2025, 5, 1).unwrap());
        let file = export_spreadsheet(&trip, &options(1), SpreadsheetLayout::TripSummary).unwrap();

        let path = file.write_to(&dir).unwrap();
        assert_eq!(path.parent(), Some(dir.as_path()));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_dot_dot_file_name_is_rejected() {
        let file = ExportedFile {
            file_name: "..".to_string(),
            mime_type: XLSX_MIME,
            bytes: Bytes::new(),
        };
        let dir = std::env::temp_dir().join(format!("flight_planner_dotdot_{}", std::process::id()));
        assert!(matches!(
            file.write_to(&dir),
            Err(ExportError::ConversionError(_))
        ));
        assert!(!dir.exists());
    }
}
