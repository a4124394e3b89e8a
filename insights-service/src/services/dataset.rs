//! Tabular data sources for the detectors.
//!
//! Tables are read in full on every call; nothing is cached between
//! requests. Any row that fails to deserialize rejects the whole table.

use crate::models::{DemographicUpdateRecord, EnrolmentRecord};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use service_core::error::AppError;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("dataset {path} is unreachable: {source}")]
    Unreachable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("dataset {path} is not valid CSV: {message}")]
    Unparsable { path: String, message: String },

    #[error("dataset {path} does not match its schema{}: {message}", at_line(.line))]
    Schema {
        path: String,
        line: Option<u64>,
        message: String,
    },
}

fn at_line(line: &Option<u64>) -> String {
    line.map(|l| format!(" at line {}", l)).unwrap_or_default()
}

impl DataError {
    fn from_csv(path: &Path, err: csv::Error) -> Self {
        let path = path.display().to_string();
        match err.kind() {
            csv::ErrorKind::Deserialize { pos, err: de } => DataError::Schema {
                path,
                line: pos.as_ref().map(|p| p.line()),
                message: de.to_string(),
            },
            csv::ErrorKind::Io(_) => DataError::Unreachable {
                path,
                source: std::io::Error::other(err.to_string()),
            },
            _ => DataError::Unparsable {
                path,
                message: err.to_string(),
            },
        }
    }
}

impl From<DataError> for AppError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::Schema { .. } => AppError::SchemaError(anyhow::Error::new(err)),
            DataError::Unreachable { .. } | DataError::Unparsable { .. } => {
                AppError::DataSourceError(anyhow::Error::new(err))
            }
        }
    }
}

/// Provider of the enrolment and demographic update tables.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    async fn load_enrolment(&self) -> Result<Vec<EnrolmentRecord>, DataError>;

    async fn load_demographic_updates(&self) -> Result<Vec<DemographicUpdateRecord>, DataError>;

    /// Checks that both tables can be reached without loading them.
    async fn health_check(&self) -> Result<(), DataError>;
}

/// Reads both tables from CSV files with a header row.
#[derive(Debug, Clone)]
pub struct CsvDatasetSource {
    enrolment_path: PathBuf,
    demographic_path: PathBuf,
}

impl CsvDatasetSource {
    pub fn new(enrolment_path: impl Into<PathBuf>, demographic_path: impl Into<PathBuf>) -> Self {
        Self {
            enrolment_path: enrolment_path.into(),
            demographic_path: demographic_path.into(),
        }
    }

    pub fn enrolment_path(&self) -> &Path {
        &self.enrolment_path
    }

    pub fn demographic_path(&self) -> &Path {
        &self.demographic_path
    }
}

#[async_trait]
impl DatasetSource for CsvDatasetSource {
    async fn load_enrolment(&self) -> Result<Vec<EnrolmentRecord>, DataError> {
        read_table(&self.enrolment_path).await
    }

    async fn load_demographic_updates(&self) -> Result<Vec<DemographicUpdateRecord>, DataError> {
        read_table(&self.demographic_path).await
    }

    async fn health_check(&self) -> Result<(), DataError> {
        for path in [&self.enrolment_path, &self.demographic_path] {
            let metadata = tokio::fs::metadata(path)
                .await
                .map_err(|source| DataError::Unreachable {
                    path: path.display().to_string(),
                    source,
                })?;

            if !metadata.is_file() {
                return Err(DataError::Unreachable {
                    path: path.display().to_string(),
                    source: std::io::Error::other("not a regular file"),
                });
            }
        }
        Ok(())
    }
}

async fn read_table<T: Table>(path: &Path) -> Result<Vec<T>, DataError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| DataError::Unreachable {
            path: path.display().to_string(),
            source,
        })?;

    let rows: Vec<T> = parse_table(path, &bytes)?;

    tracing::debug!(path = %path.display(), rows = rows.len(), "Loaded dataset");
    Ok(rows)
}

/// A row type read from a CSV table with a header row.
pub trait Table: DeserializeOwned {
    /// Header names that must be present. Other columns are ignored.
    const REQUIRED_COLUMNS: &'static [&'static str];
}

impl Table for EnrolmentRecord {
    const REQUIRED_COLUMNS: &'static [&'static str] =
        &["state", "district", "age_0_5", "age_5_17", "age_18_greater"];
}

impl Table for DemographicUpdateRecord {
    const REQUIRED_COLUMNS: &'static [&'static str] = &["district", "demo_age_18_greater"];
}

/// Parses CSV bytes into typed rows. `path` is only used in error messages.
///
/// Only header names are trimmed; district and state values are kept byte for
/// byte since they are grouping keys.
pub fn parse_table<T: Table>(path: &Path, bytes: &[u8]) -> Result<Vec<T>, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| DataError::from_csv(path, e))?;
    let missing: Vec<&str> = T::REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|h| h == *column))
        .collect();
    if !missing.is_empty() {
        return Err(DataError::Schema {
            path: path.display().to_string(),
            line: Some(1),
            message: format!("missing required column(s): {}", missing.join(", ")),
        });
    }

    reader
        .deserialize()
        .map(|row| row.map_err(|e| DataError::from_csv(path, e)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn path() -> &'static Path {
        Path::new("enrolment.csv")
    }

    #[test]
    fn test_parse_ignores_extra_columns() {
        let csv = "date,state,district,pincode,age_0_5,age_5_17,age_18_greater\n\
                   01-03-2025,Bihar,Patna,800001,96,3,2\n";

        let rows: Vec<EnrolmentRecord> = parse_table(path(), csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].district, "Patna");
        assert_eq!(rows[0].total(), 101);
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let csv = "state,district,age_0_5,age_5_17\nBihar,Patna,96,3\n";

        let err = parse_table::<EnrolmentRecord>(path(), csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::Schema { line: Some(1), .. }));
        assert!(err.to_string().contains("age_18_greater"));
    }

    #[test]
    fn test_header_is_checked_even_without_rows() {
        let err = parse_table::<EnrolmentRecord>(path(), b"foo,bar\n").unwrap_err();
        match err {
            DataError::Schema { line, message, .. } => {
                assert_eq!(line, Some(1));
                assert!(message.contains("state"));
                assert!(message.contains("age_0_5"));
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_file_is_schema_error() {
        let err = parse_table::<DemographicUpdateRecord>(path(), b"").unwrap_err();
        assert!(matches!(err, DataError::Schema { line: Some(1), .. }));
    }

    #[test]
    fn test_header_only_table_is_empty() {
        let csv = "district,demo_age_18_greater\n";
        let rows: Vec<DemographicUpdateRecord> = parse_table(path(), csv.as_bytes()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_district_whitespace_is_significant() {
        let csv = "district,demo_age_18_greater\nPune,10\n\"Pune \",5\n";

        let rows: Vec<DemographicUpdateRecord> = parse_table(path(), csv.as_bytes()).unwrap();
        assert_eq!(rows[1].district, "Pune ");

        let hubs = crate::services::MigrationPulseRanker::default().rank(&rows);
        assert_eq!(hubs.len(), 2);
        assert_eq!(hubs[0].district, "Pune");
        assert_eq!(hubs[0].demo_age_18_greater, 10);
        assert_eq!(hubs[1].district, "Pune ");
    }

    #[test]
    fn test_padded_counts_and_headers_are_accepted() {
        let csv = " district , demo_age_18_greater \nPune, 10 \n";

        let rows: Vec<DemographicUpdateRecord> = parse_table(path(), csv.as_bytes()).unwrap();
        assert_eq!(rows[0].demo_age_18_greater, 10);
    }

    #[test]
    fn test_negative_count_is_schema_error() {
        let csv = "district,demo_age_18_greater\nPune,-4\n";

        let err = parse_table::<DemographicUpdateRecord>(path(), csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::Schema { line: Some(2), .. }));
    }

    #[test]
    fn test_non_numeric_count_is_schema_error_with_line() {
        let csv = "state,district,age_0_5,age_5_17,age_18_greater\n\
                   Bihar,Patna,96,3,2\n\
                   Bihar,Gaya,many,3,2\n";

        let err = parse_table::<EnrolmentRecord>(path(), csv.as_bytes()).unwrap_err();
        match err {
            DataError::Schema { line, .. } => assert_eq!(line, Some(3)),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_ragged_row_is_unparsable() {
        let csv = "district,demo_age_18_greater\nPatna,10\nGaya\n";

        let err = parse_table::<DemographicUpdateRecord>(path(), csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::Unparsable { .. }));
    }

    #[test]
    fn test_error_mapping_to_app_error() {
        let schema = DataError::Schema {
            path: "x.csv".to_string(),
            line: Some(2),
            message: "invalid digit".to_string(),
        };
        assert!(matches!(AppError::from(schema), AppError::SchemaError(_)));

        let unreachable = DataError::Unreachable {
            path: "x.csv".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(matches!(
            AppError::from(unreachable),
            AppError::DataSourceError(_)
        ));
    }

    #[tokio::test]
    async fn test_csv_source_reads_both_tables() {
        let dir = tempfile::tempdir().unwrap();
        let enrolment = dir.path().join("enrolment.csv");
        let demographic = dir.path().join("demographic.csv");

        let mut file = std::fs::File::create(&enrolment).unwrap();
        writeln!(file, "state,district,age_0_5,age_5_17,age_18_greater").unwrap();
        writeln!(file, "Bihar,Patna,96,3,2").unwrap();

        let mut file = std::fs::File::create(&demographic).unwrap();
        writeln!(file, "district,demo_age_18_greater").unwrap();
        writeln!(file, "Patna,40").unwrap();
        writeln!(file, "Patna,2").unwrap();

        let source = CsvDatasetSource::new(&enrolment, &demographic);
        assert!(source.health_check().await.is_ok());
        assert_eq!(source.load_enrolment().await.unwrap().len(), 1);
        assert_eq!(source.load_demographic_updates().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_file_is_unreachable() {
        let dir = tempfile::tempdir().unwrap();
        let source = CsvDatasetSource::new(
            dir.path().join("absent.csv"),
            dir.path().join("absent-too.csv"),
        );

        assert!(matches!(
            source.load_enrolment().await,
            Err(DataError::Unreachable { .. })
        ));
        assert!(source.health_check().await.is_err());
    }
}
