use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("file not found: {0}")]
    NotFound(String),
    #[error("unsupported file format: .{0}")]
    UnsupportedFormat(String),
    #[error("could not parse file: {0}")]
    Parse(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One decoded cell. Spreadsheet cells arrive typed from calamine; CSV cells
/// are always text.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Cell {
    pub fn as_text(&self) -> String {
        match self {
            Cell::Text(s) => s.trim().to_string(),
            // Whole numbers print without the float tail, so a numeric
            // "Roll No" column round-trips as "101" rather than "101.0".
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            Cell::Bool(b) => b.to_string(),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => s.trim().parse::<f64>().ok(),
            Cell::Bool(_) => None,
        }
    }

    fn is_blank(&self) -> bool {
        match self {
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

/// One decoded spreadsheet row: normalized header -> cell. Transient; rows
/// are discarded once merged.
#[derive(Debug, Clone)]
pub struct ImportRow {
    cells: Vec<(String, Cell)>,
}

/// Header names recognized as the email column after normalization
/// ("Email", "E-Mail", "email address", ...).
pub const EMAIL_HEADERS: &[&str] = &["email", "emailaddress"];

/// Lowercases and strips separators so "Roll No", "roll_no" and "RollNo"
/// all index the same column.
pub fn normalize_header(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl ImportRow {
    pub fn new(cells: Vec<(String, Cell)>) -> Self {
        ImportRow { cells }
    }

    /// First cell whose header matches one of the accepted spellings.
    /// `keys` are already normalized constants.
    pub fn get(&self, keys: &[&str]) -> Option<&Cell> {
        for key in keys {
            if let Some((_, cell)) = self.cells.iter().find(|(h, _)| h == key) {
                return Some(cell);
            }
        }
        None
    }

    /// Non-empty trimmed text for the column, if present.
    pub fn text(&self, keys: &[&str]) -> Option<String> {
        let t = self.get(keys)?.as_text();
        if t.is_empty() {
            None
        } else {
            Some(t)
        }
    }

    pub fn number(&self, keys: &[&str]) -> Option<f64> {
        self.get(keys)?.as_number()
    }

    /// Comma-separated text splits into trimmed tokens; a non-text cell
    /// coerces to a single-element list.
    pub fn list(&self, keys: &[&str]) -> Option<Vec<String>> {
        let cell = self.get(keys)?;
        let items: Vec<String> = match cell {
            Cell::Text(s) => s
                .split(',')
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            other => vec![other.as_text()],
        };
        if items.is_empty() {
            None
        } else {
            Some(items)
        }
    }

    /// The merge key. None when the row has no usable email, in which case
    /// the row is skipped by the merge.
    pub fn email(&self) -> Option<String> {
        self.text(EMAIL_HEADERS)
    }
}

/// Decodes the file at `path` into ordered rows, dispatching on extension.
/// Rows whose cells are all blank are dropped.
pub fn decode_rows(path: &Path) -> Result<Vec<ImportRow>, SheetError> {
    if !path.exists() {
        return Err(SheetError::NotFound(path.display().to_string()));
    }
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "csv" => decode_csv(path),
        "xlsx" | "xls" => decode_workbook(path),
        other => Err(SheetError::UnsupportedFormat(other.to_string())),
    }
}

fn decode_csv(path: &Path) -> Result<Vec<ImportRow>, SheetError> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| SheetError::Parse(e.to_string()))?
        .iter()
        .map(normalize_header)
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| SheetError::Parse(e.to_string()))?;
        let mut cells = Vec::new();
        for (i, field) in record.iter().enumerate() {
            let Some(header) = headers.get(i) else {
                continue;
            };
            if header.is_empty() {
                continue;
            }
            cells.push((header.clone(), Cell::Text(field.to_string())));
        }
        push_unless_blank(&mut rows, cells);
    }
    Ok(rows)
}

fn decode_workbook(path: &Path) -> Result<Vec<ImportRow>, SheetError> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| SheetError::Parse(e.to_string()))?;
    let sheet_names = workbook.sheet_names();
    let Some(sheet_name) = sheet_names.first().cloned() else {
        return Err(SheetError::Parse("workbook has no sheets".to_string()));
    };
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| SheetError::Parse(e.to_string()))?;

    let mut data_rows = range.rows();
    let Some(header_row) = data_rows.next() else {
        return Ok(Vec::new());
    };
    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| normalize_header(&cell.to_string()))
        .collect();

    let mut rows = Vec::new();
    for data_row in data_rows {
        let mut cells = Vec::new();
        for (i, cell) in data_row.iter().enumerate() {
            let Some(header) = headers.get(i) else {
                continue;
            };
            if header.is_empty() {
                continue;
            }
            let value = match cell {
                Data::Empty => continue,
                Data::String(s) => Cell::Text(s.clone()),
                Data::Float(f) => Cell::Number(*f),
                Data::Int(i) => Cell::Number(*i as f64),
                Data::Bool(b) => Cell::Bool(*b),
                other => Cell::Text(other.to_string()),
            };
            cells.push((header.clone(), value));
        }
        push_unless_blank(&mut rows, cells);
    }
    Ok(rows)
}

fn push_unless_blank(rows: &mut Vec<ImportRow>, cells: Vec<(String, Cell)>) {
    if cells.iter().all(|(_, c)| c.is_blank()) {
        return;
    }
    rows.push(ImportRow::new(cells));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_csv(contents: &str) -> NamedTempFile {
        let mut f = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .expect("temp csv");
        f.write_all(contents.as_bytes()).expect("write csv");
        f
    }

    #[test]
    fn normalize_header_strips_separators() {
        assert_eq!(normalize_header("Email"), "email");
        assert_eq!(normalize_header("E-Mail"), "email");
        assert_eq!(normalize_header("Email Address"), "emailaddress");
        assert_eq!(normalize_header("roll_no"), "rollno");
    }

    #[test]
    fn decode_csv_maps_headers_case_insensitively() {
        let f = temp_csv("NAME,E-Mail,Roll No\nEmma,emma@school.edu,101\n");
        let rows = decode_rows(f.path()).expect("decode");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].email().as_deref(), Some("emma@school.edu"));
        assert_eq!(rows[0].text(&["rollno"]).as_deref(), Some("101"));
        assert_eq!(rows[0].text(&["name"]).as_deref(), Some("Emma"));
    }

    #[test]
    fn decode_csv_skips_blank_rows() {
        let f = temp_csv("Name,Email\nA,a@x.com\n,\nB,b@x.com\n");
        let rows = decode_rows(f.path()).expect("decode");
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn decode_csv_handles_quoted_commas() {
        let f = temp_csv("Name,Email,Classes\nA,a@x.com,\"10-A, 11-B\"\n");
        let rows = decode_rows(f.path()).expect("decode");
        let classes = rows[0].list(&["classes"]).expect("classes");
        assert_eq!(classes, vec!["10-A".to_string(), "11-B".to_string()]);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let mut f = tempfile::Builder::new()
            .suffix(".pdf")
            .tempfile()
            .expect("temp file");
        f.write_all(b"not a sheet").expect("write");
        match decode_rows(f.path()) {
            Err(SheetError::UnsupportedFormat(ext)) => assert_eq!(ext, "pdf"),
            other => panic!("expected UnsupportedFormat, got {:?}", other.map(|r| r.len())),
        }
    }

    #[test]
    fn corrupt_workbook_is_a_parse_error() {
        let mut f = tempfile::Builder::new()
            .suffix(".xlsx")
            .tempfile()
            .expect("temp file");
        f.write_all(b"definitely not a zip archive").expect("write");
        assert!(matches!(decode_rows(f.path()), Err(SheetError::Parse(_))));
    }

    #[test]
    fn missing_file_is_not_found() {
        let p = std::env::temp_dir().join("school-hub-no-such-file.csv");
        assert!(matches!(
            decode_rows(&p),
            Err(SheetError::NotFound(_))
        ));
    }

    #[test]
    fn number_cells_print_without_float_tail() {
        assert_eq!(Cell::Number(101.0).as_text(), "101");
        assert_eq!(Cell::Number(62.5).as_text(), "62.5");
    }
}
