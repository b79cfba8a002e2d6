// SpreadsheetML worksheet structures, serialized with quick-xml
use serde::{Deserialize, Serialize};

pub const SPREADSHEET_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";

#[derive(Debug, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
#[serde(rename = "worksheet")]
pub struct XmlWorksheet {
    #[serde(rename = "@xmlns")]
    pub xmlns: String,
    #[serde(rename = "dimension")]
    pub dimension: XmlDimension,
    #[serde(rename = "cols", skip_serializing_if = "XmlCols::is_empty")]
    pub cols: XmlCols,
    #[serde(rename = "sheetData")]
    pub sheet_data: XmlSheetData,
    #[serde(rename = "mergeCells", skip_serializing_if = "Option::is_none")]
    pub merge_cells: Option<XmlMergeCells>,
}

impl XmlWorksheet {
    pub fn to_xml(&self) -> Result<String, String> {
        let body = quick_xml::se::to_string(self).map_err(|e| e.to_string())?;
        Ok(format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n{}",
            body
        ))
    }

    pub fn from_xml(xml: &str) -> Result<Self, String> {
        quick_xml::de::from_str(xml).map_err(|e| e.to_string())
    }

    pub fn row(&self, number: u32) -> Option<&XmlRow> {
        self.sheet_data.rows.iter().find(|row| row.number == number)
    }
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default)]
pub struct XmlDimension {
    #[serde(rename = "@ref")]
    pub reference: String,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default)]
pub struct XmlCols {
    #[serde(rename = "col")]
    pub cols: Vec<XmlCol>,
}

impl XmlCols {
    pub fn is_empty(&self) -> bool {
        self.cols.is_empty()
    }
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default)]
pub struct XmlCol {
    #[serde(rename = "@min")]
    pub min: u32,
    #[serde(rename = "@max")]
    pub max: u32,
    #[serde(rename = "@width")]
    pub width: f64,
    #[serde(rename = "@customWidth")]
    pub custom_width: u8,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default)]
pub struct XmlSheetData {
    #[serde(rename = "row")]
    pub rows: Vec<XmlRow>,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default)]
pub struct XmlRow {
    #[serde(rename = "@r")]
    pub number: u32,
    #[serde(rename = "c")]
    pub cells: Vec<XmlCell>,
}

impl XmlRow {
    /// Display text of every cell in the row, in column order.
    pub fn texts(&self) -> Vec<String> {
        self.cells.iter().map(XmlCell::text).collect()
    }
}

// Text goes in as an inline string (t="inlineStr"), numbers as <v>
#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default)]
pub struct XmlCell {
    #[serde(rename = "@r")]
    pub reference: String,
    #[serde(rename = "@s", skip_serializing_if = "Option::is_none")]
    pub style: Option<u32>,
    #[serde(rename = "@t", skip_serializing_if = "Option::is_none")]
    pub cell_type: Option<String>,
    #[serde(rename = "v", skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(rename = "is", skip_serializing_if = "Option::is_none")]
    pub inline_string: Option<XmlInlineString>,
}

impl XmlCell {
    pub fn text(&self) -> String {
        match (&self.inline_string, &self.value) {
            (Some(inline), _) => decode_control_chars(&inline.text.value),
            (None, Some(value)) => value.clone(),
            (None, None) => String::new(),
        }
    }
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default)]
pub struct XmlInlineString {
    #[serde(rename = "t")]
    pub text: XmlText,
}

impl XmlInlineString {
    pub fn new(text: &str) -> Self {
        Self {
            text: XmlText::new(text),
        }
    }
}

// Excel trims leading/trailing whitespace unless xml:space="preserve" is set
#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default)]
pub struct XmlText {
    #[serde(rename = "@xml:space", skip_serializing_if = "Option::is_none")]
    pub space: Option<String>,
    #[serde(rename = "$text")]
    pub value: String,
}

impl XmlText {
    pub fn new(text: &str) -> Self {
        let padded = text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace);
        Self {
            space: padded.then(|| "preserve".to_string()),
            value: encode_control_chars(text),
        }
    }
}

fn is_forbidden_in_xml(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}')
}

fn is_escape_sequence_at(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() >= 7
        && bytes[0] == b'_'
        && bytes[1] == b'x'
        && bytes[2..6].iter().all(u8::is_ascii_hexdigit)
        && bytes[6] == b'_'
}

/// Encodes characters XML 1.0 cannot carry as OOXML `_xHHHH_` escapes.
/// A literal `_xHHHH_` in the input gets its underscore escaped as
/// `_x005F_` so Excel does not decode it.
pub fn encode_control_chars(text: &str) -> String {
    let mut encoded = String::with_capacity(text.len());
    for (offset, c) in text.char_indices() {
        if is_forbidden_in_xml(c) {
            encoded.push_str(&format!("_x{:04X}_", c as u32));
        } else if c == '_' && is_escape_sequence_at(&text[offset..]) {
            encoded.push_str("_x005F_");
        } else {
            encoded.push(c);
        }
    }
    encoded
}

/// Reverses [`encode_control_chars`].
pub fn decode_control_chars(text: &str) -> String {
    let mut decoded = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("_x") {
        decoded.push_str(&rest[..start]);
        let candidate = &rest[start..];
        let code = is_escape_sequence_at(candidate)
            .then(|| u32::from_str_radix(&candidate[2..6], 16).ok())
            .flatten()
            .and_then(char::from_u32);
        match code {
            Some(c) => {
                decoded.push(c);
                rest = &candidate[7..];
            }
            None => {
                decoded.push_str("_x");
                rest = &candidate[2..];
            }
        }
    }
    decoded.push_str(rest);
    decoded
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default)]
pub struct XmlMergeCells {
    #[serde(rename = "@count")]
    pub count: usize,
    #[serde(rename = "mergeCell")]
    pub cells: Vec<XmlMergeCell>,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default)]
pub struct XmlMergeCell {
    #[serde(rename = "@ref")]
    pub reference: String,
}

/// Column letters for a zero-based column index (0 -> A, 26 -> AA).
pub fn column_name(mut index: u32) -> String {
    let mut name = Vec::new();
    loop {
        name.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    name.reverse();
    String::from_utf8_lossy(&name).into_owned()
}

pub fn cell_reference(row: u32, column: u32) -> String {
    format!("{}{}", column_name(column), row)
}
