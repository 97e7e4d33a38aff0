//! Delimited input decoding

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::DecodeError;

/// Columns that must be present in the header row.
///
/// `price` and `quantity` are deliberately absent: rows tolerate missing
/// values for both and the normalizer repairs them.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "order_id",
    "order_date",
    "product",
    "category",
    "customer_id",
];

/// One decoded input row: raw column values keyed by header name.
///
/// No invariants beyond "one row per input line". Fields are untyped
/// strings exactly as decoded; typing and repair happen downstream.
#[derive(Debug, Clone)]
pub struct RawRow {
    /// 0-based data row index (header excluded)
    pub index: usize,
    fields: HashMap<String, String>,
}

impl RawRow {
    /// Build a row from decoded (column, value) pairs
    pub fn new(index: usize, fields: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            index,
            fields: fields.into_iter().collect(),
        }
    }

    /// Get a field value, treating absent and empty fields as missing
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .get(column)
            .map(|v| v.as_str())
            .filter(|v| !v.is_empty())
    }

    /// Get a field value exactly as decoded, empty or not
    pub fn raw(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(|v| v.as_str())
    }
}

/// Decoder for delimited text input with a header row
#[derive(Debug, Clone)]
pub struct CsvDecoder {
    path: PathBuf,
    delimiter: u8,
}

impl CsvDecoder {
    /// Create a decoder for the given input file (comma-delimited)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: b',',
        }
    }

    /// Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Get the input path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decode the whole input into raw rows.
    ///
    /// Fails fast: an unreadable file, a missing required column, or a
    /// structurally malformed record aborts the decode with nothing
    /// emitted. Extra columns are carried through and ignored downstream.
    pub fn read_rows(&self) -> Result<Vec<RawRow>, DecodeError> {
        if !self.path.is_file() {
            return Err(DecodeError::InputNotFound(self.path.clone()));
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|e| self.malformed(e))?;

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| self.malformed(e))?
            .iter()
            .map(|h| h.to_string())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(DecodeError::MissingHeader(self.path.clone()));
        }

        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(DecodeError::MissingColumn {
                    path: self.path.clone(),
                    column: (*column).to_string(),
                });
            }
        }

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record.map_err(|e| self.malformed(e))?;
            let fields = headers
                .iter()
                .cloned()
                .zip(record.iter().map(|v| v.to_string()));
            rows.push(RawRow::new(index, fields));
        }

        debug!(input = %self.path.display(), rows = rows.len(), "Decoded input");
        Ok(rows)
    }

    fn malformed(&self, err: csv::Error) -> DecodeError {
        DecodeError::Malformed {
            path: self.path.clone(),
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        write!(file, "{}", content).unwrap();
        path
    }

    #[test]
    fn test_read_rows() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "sales.csv",
            "order_id,order_date,product,category,price,quantity,customer_id\n\
             1,2025-05-25,Widget,Tools,9.99,2,C001\n\
             2,2025-05-26,Gadget,Toys,,1,C002\n",
        );

        let rows = CsvDecoder::new(&path).read_rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].index, 0);
        assert_eq!(rows[0].get("order_id"), Some("1"));
        assert_eq!(rows[0].get("product"), Some("Widget"));
        // Empty price is missing
        assert_eq!(rows[1].get("price"), None);
        assert_eq!(rows[1].raw("price"), Some(""));
    }

    #[test]
    fn test_missing_required_column() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "sales.csv",
            "order_id,product,category,price,quantity,customer_id\n1,Widget,Tools,9.99,2,C001\n",
        );

        let err = CsvDecoder::new(&path).read_rows().unwrap_err();
        match err {
            DecodeError::MissingColumn { column, .. } => assert_eq!(column, "order_date"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_price_column_is_tolerated() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "sales.csv",
            "order_id,order_date,product,category,customer_id\n1,2025-05-25,Widget,Tools,C001\n",
        );

        let rows = CsvDecoder::new(&path).read_rows().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("price"), None);
        assert_eq!(rows[0].raw("price"), None);
    }

    #[test]
    fn test_input_not_found() {
        let err = CsvDecoder::new("/no/such/file.csv").read_rows().unwrap_err();
        assert!(matches!(err, DecodeError::InputNotFound(_)));
    }

    #[test]
    fn test_malformed_record_fails_fast() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "sales.csv",
            "order_id,order_date,product,category,price,quantity,customer_id\n\
             1,2025-05-25,Widget,Tools,9.99,2,C001\n\
             2,2025-05-26,Gadget\n",
        );

        let err = CsvDecoder::new(&path).read_rows().unwrap_err();
        assert!(matches!(err, DecodeError::Malformed { .. }));
    }

    #[test]
    fn test_extra_columns_ignored() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "sales.csv",
            "order_id,order_date,product,category,price,quantity,customer_id,region\n\
             1,2025-05-25,Widget,Tools,9.99,2,C001,EMEA\n",
        );

        let rows = CsvDecoder::new(&path).read_rows().unwrap();
        assert_eq!(rows[0].get("region"), Some("EMEA"));
        assert_eq!(rows[0].get("customer_id"), Some("C001"));
    }

    #[test]
    fn test_custom_delimiter() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "sales.tsv",
            "order_id;order_date;product;category;price;quantity;customer_id\n\
             1;2025-05-25;Widget;Tools;9.99;2;C001\n",
        );

        let rows = CsvDecoder::new(&path)
            .with_delimiter(b';')
            .read_rows()
            .unwrap();
        assert_eq!(rows[0].get("order_id"), Some("1"));
    }
}
