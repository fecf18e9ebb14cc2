use log::info;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::core::types::TransferRecord;
use crate::utils::str_to_bigdecimal;

/// Required ledger columns
pub const SOURCE_COLUMN: &str = "Source_Wallet";
pub const DEST_COLUMN: &str = "Dest_Wallet";
pub const AMOUNT_COLUMN: &str = "Amount";

/// Errors raised at the ledger loading boundary.
///
/// The analysis core assumes the three required fields exist and are
/// typed correctly, so any schema violation aborts the run here before
/// any analysis starts.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("failed to read ledger file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("ledger is missing required column: {0}")]
    MissingColumn(String),
    #[error("row {row} is missing field {column}")]
    MissingField { row: usize, column: String },
    #[error("row {row} has an unparseable amount: {value}")]
    InvalidAmount { row: usize, value: String },
    #[error("failed to parse CSV ledger: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to parse JSON ledger: {0}")]
    Json(#[from] serde_json::Error),
}

/// Ledger loader for CSV and JSON transfer datasets
pub struct LedgerLoader;

impl LedgerLoader {
    /// Load a ledger file, dispatching on the file extension
    pub fn load(path: &str) -> Result<Vec<TransferRecord>, LoaderError> {
        let is_json = Path::new(path)
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            Self::load_json(path)
        } else {
            Self::load_csv(path)
        }
    }

    /// Load a CSV ledger with Source_Wallet / Dest_Wallet / Amount columns
    pub fn load_csv(path: &str) -> Result<Vec<TransferRecord>, LoaderError> {
        let mut reader = csv::Reader::from_path(path)?;

        let headers = reader.headers()?.clone();
        let source_idx = Self::column_index(&headers, SOURCE_COLUMN)?;
        let dest_idx = Self::column_index(&headers, DEST_COLUMN)?;
        let amount_idx = Self::column_index(&headers, AMOUNT_COLUMN)?;

        let mut records = Vec::new();
        for (i, result) in reader.records().enumerate() {
            let row = result?;
            // The header occupies line 1, data rows start at line 2
            let line = i + 2;

            let source = Self::field(&row, source_idx, line, SOURCE_COLUMN)?;
            let dest = Self::field(&row, dest_idx, line, DEST_COLUMN)?;
            let raw_amount = Self::field(&row, amount_idx, line, AMOUNT_COLUMN)?;

            let amount =
                str_to_bigdecimal(raw_amount).map_err(|_| LoaderError::InvalidAmount {
                    row: line,
                    value: raw_amount.to_string(),
                })?;

            records.push(TransferRecord::new(
                source.to_string(),
                dest.to_string(),
                amount,
            ));
        }

        info!("Loaded {} transfer records from {}", records.len(), path);
        Ok(records)
    }

    /// Load a JSON ledger: an array of transfer records
    pub fn load_json(path: &str) -> Result<Vec<TransferRecord>, LoaderError> {
        let content = fs::read_to_string(path).map_err(|source| LoaderError::Io {
            path: path.to_string(),
            source,
        })?;
        let records: Vec<TransferRecord> = serde_json::from_str(&content)?;

        info!("Loaded {} transfer records from {}", records.len(), path);
        Ok(records)
    }

    fn column_index(
        headers: &csv::StringRecord,
        column: &str,
    ) -> Result<usize, LoaderError> {
        headers
            .iter()
            .position(|header| header == column)
            .ok_or_else(|| LoaderError::MissingColumn(column.to_string()))
    }

    fn field<'a>(
        row: &'a csv::StringRecord,
        idx: usize,
        line: usize,
        column: &str,
    ) -> Result<&'a str, LoaderError> {
        row.get(idx).ok_or_else(|| LoaderError::MissingField {
            row: line,
            column: column.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use std::io::Write;
    use std::str::FromStr;
    use tempfile::NamedTempFile;

    fn temp_file_with(content: &str, suffix: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_csv() {
        let file = temp_file_with(
            "Source_Wallet,Dest_Wallet,Amount\nA,B,100.5\nB,C,7\n",
            ".csv",
        );

        let records = LedgerLoader::load(file.path().to_str().unwrap()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].source_wallet, "A");
        assert_eq!(records[0].dest_wallet, "B");
        assert_eq!(records[0].amount, BigDecimal::from_str("100.5").unwrap());
        assert_eq!(records[1].amount, BigDecimal::from(7));
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let file = temp_file_with(
            "Tx_Id,Source_Wallet,Dest_Wallet,Amount\n1,A,B,10\n",
            ".csv",
        );

        let records = LedgerLoader::load_csv(file.path().to_str().unwrap()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].source_wallet, "A");
    }

    #[test]
    fn test_missing_column_fails() {
        let file = temp_file_with("Source_Wallet,Amount\nA,10\n", ".csv");

        let result = LedgerLoader::load_csv(file.path().to_str().unwrap());

        match result {
            Err(LoaderError::MissingColumn(column)) => assert_eq!(column, DEST_COLUMN),
            other => panic!("expected MissingColumn error, got {:?}", other),
        }
    }

    #[test]
    fn test_unparseable_amount_fails_with_row_number() {
        let file = temp_file_with(
            "Source_Wallet,Dest_Wallet,Amount\nA,B,10\nB,C,abc\n",
            ".csv",
        );

        let result = LedgerLoader::load_csv(file.path().to_str().unwrap());

        match result {
            Err(LoaderError::InvalidAmount { row, value }) => {
                assert_eq!(row, 3);
                assert_eq!(value, "abc");
            }
            other => panic!("expected InvalidAmount error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_json_ledger() {
        let file = temp_file_with(
            r#"[{"Source_Wallet": "A", "Dest_Wallet": "B", "Amount": 12.5}]"#,
            ".json",
        );

        let records = LedgerLoader::load(file.path().to_str().unwrap()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].amount, BigDecimal::from_str("12.5").unwrap());
    }
}
