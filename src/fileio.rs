use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use tracing::info;

use crate::table::Table;

/// Detected file format
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FileFormat {
    Csv,
    Tsv,
}

impl FileFormat {
    /// Detect format from file extension
    fn from_extension(path: &PathBuf) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "csv" => Some(FileFormat::Csv),
            "tsv" => Some(FileFormat::Tsv),
            _ => None,
        }
    }

    fn delimiter(&self) -> u8 {
        match self {
            FileFormat::Csv => b',',
            FileFormat::Tsv => b'\t',
        }
    }
}

/// Convert a column index to spreadsheet-style letters (0 -> A, 25 -> Z, 26 -> AA, etc.)
pub fn col_to_letters(mut col: usize) -> String {
    let mut result = String::new();
    loop {
        result.insert(0, (b'A' + (col % 26) as u8) as char);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    result
}

/// Result of loading a file, including any warnings
pub struct LoadResult {
    pub table: Table,
    pub warnings: Vec<String>,
}

pub struct FileIO {
    pub file_path: PathBuf,
    delimiter: u8,
    has_header: bool,
}

impl FileIO {
    /// `delimiter` overrides the one implied by the file extension
    pub fn new(file_path: PathBuf, delimiter: Option<u8>, has_header: bool) -> Self {
        let delimiter = delimiter
            .or_else(|| FileFormat::from_extension(&file_path).map(|f| f.delimiter()))
            .unwrap_or(b',');
        Self { file_path, delimiter, has_header }
    }

    pub fn file_name(&self) -> String {
        self.file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file_path.display().to_string())
    }

    pub fn delimiter_name(&self) -> String {
        match self.delimiter {
            b',' => "comma".to_string(),
            b'\t' => "tab".to_string(),
            b';' => "semicolon".to_string(),
            b'|' => "pipe".to_string(),
            d => format!("'{}'", d as char),
        }
    }

    /// Load the file into a table, padding short rows to the widest record
    pub fn load_table(&self) -> io::Result<LoadResult> {
        let file = File::open(&self.file_path)?;
        let reader = BufReader::with_capacity(1 << 20, file); // 1 MB

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut records: Vec<Vec<String>> = Vec::new();
        let mut max_cols: usize = 0;
        let mut needs_padding = false;

        for result in csv_reader.records() {
            let record = result.map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            let row: Vec<String> = record.iter().map(|s| s.to_string()).collect();

            if row.len() > max_cols {
                if max_cols > 0 {
                    needs_padding = true;
                }
                max_cols = row.len();
            } else if row.len() < max_cols {
                needs_padding = true;
            }

            records.push(row);
        }

        let mut warnings = Vec::new();

        if needs_padding {
            warnings.push(format!(
                "Padded rows with empty cells (max width: {} columns)",
                max_cols
            ));
            for row in records.iter_mut() {
                row.resize(max_cols, String::new());
            }
        }

        let table = if self.has_header {
            Table::from_records(records)
        } else {
            let labels = (0..max_cols).map(col_to_letters).collect();
            Table::new(labels, records)
        };

        info!(
            path = %self.file_path.display(),
            rows = table.row_count(),
            cols = table.col_count(),
            "loaded table"
        );

        Ok(LoadResult { table, warnings })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_format_detection() {
        assert_eq!(FileFormat::from_extension(&PathBuf::from("test.csv")), Some(FileFormat::Csv));
        assert_eq!(FileFormat::from_extension(&PathBuf::from("test.TSV")), Some(FileFormat::Tsv));
        assert_eq!(FileFormat::from_extension(&PathBuf::from("test.txt")), None);
    }

    #[test]
    fn test_col_to_letters() {
        assert_eq!(col_to_letters(0), "A");
        assert_eq!(col_to_letters(25), "Z");
        assert_eq!(col_to_letters(26), "AA");
        assert_eq!(col_to_letters(27), "AB");
    }

    #[test]
    fn test_load_with_header() {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        writeln!(file, "Name,Version").unwrap();
        writeln!(file, "Carry On,1.8.0").unwrap();
        writeln!(file, "\"Ruins, Better\",0.4.6").unwrap();

        let result = FileIO::new(file.path().to_path_buf(), None, true).load_table().unwrap();
        assert!(result.warnings.is_empty());
        assert_eq!(result.table.col_count(), 2);
        assert_eq!(result.table.row_count(), 2);
        assert_eq!(result.table.header[1].label, "Version");
        assert_eq!(result.table.get_cell(1, 0).unwrap().text, "Ruins, Better");
    }

    #[test]
    fn test_tsv_without_header() {
        let mut file = NamedTempFile::with_suffix(".tsv").unwrap();
        writeln!(file, "a\tb\tc").unwrap();
        writeln!(file, "d\te\tf").unwrap();

        let file_io = FileIO::new(file.path().to_path_buf(), None, false);
        assert_eq!(file_io.delimiter_name(), "tab");
        let result = file_io.load_table().unwrap();
        assert_eq!(result.table.row_count(), 2);
        let labels: Vec<&str> = result.table.header.iter().map(|h| h.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_csv_padding_warning() {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        writeln!(file, "a,b,c").unwrap();
        writeln!(file, "1,2").unwrap();  // Short row
        writeln!(file, "3,4,5").unwrap();

        let result = FileIO::new(file.path().to_path_buf(), None, true).load_table().unwrap();

        assert_eq!(result.table.col_count(), 3);
        assert!(!result.warnings.is_empty());
        assert!(result.warnings[0].contains("Padded"));
        assert_eq!(result.table.get_row(0).unwrap().cells.len(), 3);
    }

    #[test]
    fn test_explicit_delimiter_wins() {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        writeln!(file, "x;y").unwrap();
        writeln!(file, "1;2").unwrap();

        let result = FileIO::new(file.path().to_path_buf(), Some(b';'), true).load_table().unwrap();
        assert_eq!(result.table.col_count(), 2);
    }

    #[test]
    fn test_missing_file_is_error() {
        let file_io = FileIO::new(PathBuf::from("/nonexistent/tabview/data.csv"), None, true);
        assert!(file_io.load_table().is_err());
    }
}
